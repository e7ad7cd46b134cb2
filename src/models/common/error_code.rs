/// API 业务错误码
///
/// 0 表示成功，1xxx 为通用错误，2xxx 为认证/账号相关，3xxx 为考勤/成绩录入相关。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    InternalServerError = 1500,

    // 认证与账号
    AuthFailed = 2000,
    UserNameAlreadyExists = 2001,
    UserNameInvalid = 2002,
    UserEmailInvalid = 2003,
    UserPasswordInvalid = 2004,

    // 录入表单
    AttendanceFormInvalid = 3000,
    MarksFormInvalid = 3001,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success as i32, 0);
        assert_eq!(ErrorCode::AuthFailed as i32, 2000);
        assert_eq!(ErrorCode::MarksFormInvalid as i32, 3001);
    }
}

use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9@.+_-]+$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

pub const USERNAME_MAX_LEN: usize = 150;

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    // 用户名长度校验：1 <= x <= 150
    if username.is_empty() || username.chars().count() > USERNAME_MAX_LEN {
        return Err("Username length must be between 1 and 150 characters");
    }
    // 用户名格式校验：字母、数字以及 @ . + - _
    if !USERNAME_RE.is_match(username) {
        return Err("Username may contain only letters, numbers and @/./+/-/_ characters");
    }
    Ok(())
}

/// 邮箱可以为空，不为空时必须格式正确
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.is_empty() {
        return Ok(());
    }
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 不做强度要求，只要求非空
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.is_empty() {
        return Err("Password must not be empty");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_rules() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("a").is_ok());
        assert!(validate_username("first.last+tag@uni_x-1").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username("has space").is_err());
        assert!(validate_username("semi;colon").is_err());
        assert!(validate_username(&"x".repeat(150)).is_ok());
        assert!(validate_username(&"x".repeat(151)).is_err());
    }

    #[test]
    fn test_email_optional() {
        assert!(validate_email("").is_ok());
        assert!(validate_email("alice@example.edu").is_ok());
        assert!(validate_email("alice@").is_err());
        assert!(validate_email("not-an-email").is_err());
    }

    #[test]
    fn test_password_non_empty() {
        assert!(validate_password("1").is_ok());
        assert!(validate_password("").is_err());
    }
}

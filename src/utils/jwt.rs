use crate::config::AppConfig;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::header;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user ID)
    pub sid: String, // 会话 ID
    pub exp: usize,  // Expiration time (时间戳)
    pub iat: usize,  // Issued at (签发时间)
}

impl Claims {
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

pub struct JwtUtils;

impl JwtUtils {
    // 获取会话签名密钥
    fn get_secret() -> String {
        AppConfig::get().session.secret.clone()
    }

    /// 为会话签发 token，过期时间与会话一致
    pub fn generate_session_token(
        user_id: i64,
        session_id: &str,
        expires_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        Self::generate_with_secret(user_id, session_id, expires_at, &Self::get_secret())
    }

    fn generate_with_secret(
        user_id: i64,
        session_id: &str,
        expires_at: chrono::DateTime<chrono::Utc>,
        secret: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();

        let claims = Claims {
            sub: user_id.to_string(),
            sid: session_id.to_string(),
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let encoding_key = EncodingKey::from_secret(secret.as_ref());
        encode(&Header::default(), &claims, &encoding_key)
    }

    // 验证 JWT token
    pub fn verify_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::verify_with_secret(token, &Self::get_secret())
    }

    fn verify_with_secret(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let decoding_key = DecodingKey::from_secret(secret.as_ref());
        let validation = Validation::default();

        decode::<Claims>(token, &decoding_key, &validation).map(|token_data| token_data.claims)
    }

    /// 创建会话 Cookie
    pub fn create_session_cookie(token: &str) -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build(config.session.cookie_name.clone(), token.to_string())
            .path("/")
            .max_age(actix_web::cookie::time::Duration::minutes(
                config.session.expiry,
            ))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(config.is_production()) // 生产环境下使用 HTTPS
            .finish()
    }

    /// 创建空的会话 Cookie（用于注销）
    pub fn create_empty_session_cookie() -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build(config.session.cookie_name.clone(), "")
            .path("/")
            .max_age(actix_web::cookie::time::Duration::seconds(0))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(config.is_production())
            .finish()
    }

    /// 从请求中提取会话 token，优先 Cookie，其次 Authorization: Bearer
    pub fn extract_session_token(req: &actix_web::HttpRequest) -> Option<String> {
        let cookie_name = &AppConfig::get().session.cookie_name;
        if let Some(cookie) = req.cookie(cookie_name)
            && !cookie.value().is_empty()
        {
            return Some(cookie.value().to_string());
        }

        req.headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_roundtrip() {
        let expires_at = chrono::Utc::now() + chrono::Duration::minutes(30);
        let token =
            JwtUtils::generate_with_secret(42, "abc-123", expires_at, "test-secret").unwrap();
        let claims = JwtUtils::verify_with_secret(&token, "test-secret").unwrap();

        assert_eq!(claims.user_id(), Some(42));
        assert_eq!(claims.sid, "abc-123");
        assert_eq!(claims.exp, expires_at.timestamp() as usize);
    }

    #[test]
    fn test_token_wrong_secret() {
        let expires_at = chrono::Utc::now() + chrono::Duration::minutes(30);
        let token = JwtUtils::generate_with_secret(1, "sid", expires_at, "secret-a").unwrap();
        assert!(JwtUtils::verify_with_secret(&token, "secret-b").is_err());
    }

    #[test]
    fn test_token_expired() {
        let expires_at = chrono::Utc::now() - chrono::Duration::hours(1);
        let token = JwtUtils::generate_with_secret(1, "sid", expires_at, "secret").unwrap();
        assert!(JwtUtils::verify_with_secret(&token, "secret").is_err());
    }

    #[test]
    fn test_extract_bearer_token() {
        let req = actix_web::test::TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer abc.def.ghi"))
            .to_http_request();
        assert_eq!(
            JwtUtils::extract_session_token(&req).as_deref(),
            Some("abc.def.ghi")
        );

        let req = actix_web::test::TestRequest::default().to_http_request();
        assert!(JwtUtils::extract_session_token(&req).is_none());
    }
}

//! JWT 令牌服务
//!
//! 处理管理员会话令牌的生成、验证和解析。

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JWT 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// JWT 密钥 (应至少 32 字节)
    pub secret: String,
    /// 令牌过期时间 (分钟)
    pub expiration_minutes: i64,
    /// 令牌签发者
    pub issuer: String,
    /// 令牌受众
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        let secret = match std::env::var("JWT_SECRET") {
            Ok(secret) if secret.len() >= 32 => secret,
            Ok(_) => {
                tracing::warn!(
                    "JWT_SECRET shorter than 32 characters, generating ephemeral key \
                     (sessions will not survive a restart)"
                );
                generate_secure_printable_jwt_secret()
            }
            Err(_) => {
                tracing::warn!(
                    "JWT_SECRET not set, generating ephemeral key \
                     (sessions will not survive a restart)"
                );
                generate_secure_printable_jwt_secret()
            }
        };

        Self {
            secret,
            expiration_minutes: std::env::var("JWT_EXPIRATION_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(240), // 默认 4 小时
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "sorteo-server".to_string()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "sorteo-admin".to_string()),
        }
    }
}

/// 存储在令牌中的 JWT Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// 主体 (固定为 "admin")
    pub sub: String,
    /// 角色名称
    pub role: String,
    /// 令牌类型
    pub token_type: String,
    /// 过期时间戳
    pub exp: i64,
    /// 签发时间戳
    pub iat: i64,
    /// 签发者
    pub iss: String,
    /// 受众
    pub aud: String,
}

/// JWT 错误
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("无效令牌: {0}")]
    InvalidToken(String),

    #[error("令牌已过期")]
    ExpiredToken,

    #[error("无效签名")]
    InvalidSignature,

    #[error("令牌生成失败: {0}")]
    GenerationFailed(String),
}

/// 生成可打印的安全 JWT 密钥
///
/// 随机数生成失败时直接 panic，服务没有安全密钥就不应启动。
pub fn generate_secure_printable_jwt_secret() -> String {
    let allowed_chars =
        "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()-_=+";

    let rng = SystemRandom::new();
    let mut bytes = [0u8; 64];
    rng.fill(&mut bytes)
        .expect("system RNG unavailable, cannot generate JWT secret");

    bytes
        .iter()
        .map(|b| {
            let idx = (*b as usize) % allowed_chars.len();
            allowed_chars.as_bytes()[idx] as char
        })
        .collect()
}

/// JWT 令牌服务
#[derive(Debug, Clone)]
pub struct JwtService {
    pub config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    /// 使用默认配置创建新的 JWT 服务
    pub fn new() -> Self {
        Self::with_config(JwtConfig::default())
    }

    /// 使用指定配置创建新的 JWT 服务
    pub fn with_config(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// 为管理员签发会话令牌
    pub fn generate_admin_token(&self) -> Result<String, JwtError> {
        let now = Utc::now();
        let expiration = now + Duration::minutes(self.config.expiration_minutes);

        let claims = Claims {
            sub: "admin".to_string(),
            role: "admin".to_string(),
            token_type: "access".to_string(),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// 验证并解码令牌
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss", "aud"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                ErrorKind::InvalidToken => JwtError::InvalidToken(e.to_string()),
                _ => JwtError::InvalidToken(format!("Token validation failed: {}", e)),
            }
        })?;

        Ok(token_data.claims)
    }

    /// 从 Authorization 头提取令牌
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }

    /// 获取距离过期的剩余秒数
    pub fn get_expiration_seconds(&self, claims: &Claims) -> i64 {
        let now = Utc::now().timestamp();
        (claims.exp - now).max(0)
    }
}

impl Default for JwtService {
    fn default() -> Self {
        Self::new()
    }
}

/// 当前用户上下文 (从 JWT Claims 解析)
///
/// 由认证中间件创建，注入到请求扩展。
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// 主体标识
    pub id: String,
    /// 角色名称
    pub role: String,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            role: claims.role,
        }
    }
}

impl CurrentUser {
    /// 是否管理员
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service() -> JwtService {
        JwtService::with_config(JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hs256".to_string(),
            expiration_minutes: 240,
            issuer: "sorteo-server".to_string(),
            audience: "sorteo-admin".to_string(),
        })
    }

    #[test]
    fn test_token_generation_and_validation() {
        let service = test_service();
        let token = service
            .generate_admin_token()
            .expect("Failed to generate test token");

        let claims = service
            .validate_token(&token)
            .expect("Failed to validate test token");

        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.role, "admin");
        assert!(CurrentUser::from(claims).is_admin());
    }

    #[test]
    fn test_token_expires_in_four_hours() {
        let service = test_service();
        let token = service.generate_admin_token().unwrap();
        let claims = service.validate_token(&token).unwrap();

        let lifetime = claims.exp - claims.iat;
        assert_eq!(lifetime, 240 * 60);
        let remaining = service.get_expiration_seconds(&claims);
        assert!(remaining > 0 && remaining <= 240 * 60);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let service = test_service();
        let token = service.generate_admin_token().unwrap();

        let other = JwtService::with_config(JwtConfig {
            secret: "another-secret-that-is-also-long-enough".to_string(),
            ..service.config.clone()
        });
        assert!(matches!(
            other.validate_token(&token),
            Err(JwtError::InvalidSignature)
        ));
    }

    #[test]
    fn test_extract_from_header() {
        assert_eq!(
            JwtService::extract_from_header("Bearer abc.def.ghi"),
            Some("abc.def.ghi")
        );
        assert_eq!(JwtService::extract_from_header("Basic abc"), None);
    }

    #[test]
    fn test_generated_secret_is_long_and_random() {
        let a = generate_secure_printable_jwt_secret();
        let b = generate_secure_printable_jwt_secret();
        assert_eq!(a.len(), 64);
        assert_ne!(a, b);
    }
}

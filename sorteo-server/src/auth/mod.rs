//! 认证模块
//!
//! 单管理员模型：登录密码经 Argon2 校验后签发短期 JWT，
//! 管理端点由中间件统一保护。

pub mod jwt;
pub mod middleware;
pub mod service;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::require_auth;
pub use service::AdminAuthService;

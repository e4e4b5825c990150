//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 管理员认证接口
//! - [`numbers`] - 号码列表与统计 (公开)
//! - [`pricing`] - 报价接口 (公开)
//! - [`reservations`] - 预留接口 (公开)
//! - [`purchase`] - 购买接口 (公开)
//! - [`admin`] - 管理操作接口 (需要令牌)

pub mod admin;
pub mod auth;
pub mod health;
pub mod numbers;
pub mod pricing;
pub mod purchase;
pub mod reservations;

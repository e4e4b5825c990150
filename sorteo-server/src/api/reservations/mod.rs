//! 预留路由
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/reservations | POST | 预留一批号码 | 无 |
//! | /api/reservations | DELETE | 主动释放预留 | 无 |

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/api/reservations",
        post(handler::reserve).delete(handler::release),
    )
}

//! 号码查询路由
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/numbers | GET | 全部 99 个号码的状态 | 无 |
//! | /api/numbers/{number} | GET | 单个号码的状态 | 无 |
//! | /api/stats | GET | 售出统计 | 无 |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/numbers", get(handler::list))
        .route("/api/numbers/{number}", get(handler::get_one))
        .route("/api/stats", get(handler::stats))
}

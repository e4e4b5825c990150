//! 管理操作路由 (全部需要管理员令牌)
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/admin/sales | POST | 手工登记售出 |
//! | /api/admin/sales/{number} | DELETE | 强制释放号码 (任意状态) |
//! | /api/admin/reservations/clear | POST | 清空全部预留 |
//! | /api/admin/reset | POST | 重置全部库存 (需确认) |
//! | /api/admin/refresh | POST | 强制远程刷新 |
//! | /api/admin/export | GET | 售出列表 CSV 导出 |
//! | /api/admin/sold | GET | 售出列表 |

mod handler;

use axum::{Router, routing::delete, routing::get, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/admin/sales", post(handler::record_sale))
        .route("/api/admin/sales/{number}", delete(handler::release))
        .route(
            "/api/admin/reservations/clear",
            post(handler::clear_reservations),
        )
        .route("/api/admin/reset", post(handler::reset))
        .route("/api/admin/refresh", post(handler::refresh))
        .route("/api/admin/export", get(handler::export_csv))
        .route("/api/admin/sold", get(handler::sold))
}

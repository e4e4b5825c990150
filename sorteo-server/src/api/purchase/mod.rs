//! 购买路由
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/purchase | POST | 线下支付购买 (银行转账/现金) | 无 |
//! | /api/purchase/paypal | POST | PayPal 支付完成后的登记 | 无 |

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/purchase", post(handler::purchase))
        .route("/api/purchase/paypal", post(handler::purchase_paypal))
}

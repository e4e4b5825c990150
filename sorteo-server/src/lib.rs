//! Sorteo Server - 抽奖售票服务
//!
//! # 架构概述
//!
//! 本模块是 Sorteo Server 的主入口，提供以下核心功能：
//!
//! - **库存** (`inventory`): 99 张奖券的状态机（available/reserved/sold）
//! - **远程同步** (`sheets`): Google Sheets 作为权威存储，尽力同步
//! - **定价** (`pricing`): PayPal 手续费计算（美元/科多巴换算）
//! - **认证** (`auth`): Argon2 + JWT 管理员认证
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! sorteo-server/src/
//! ├── core/          # 配置、状态、服务器、后台任务
//! ├── auth/          # JWT 认证
//! ├── inventory/     # 票务库存与预留生命周期
//! ├── sheets/        # 远程表格存储客户端
//! ├── pricing/       # 手续费计算器
//! ├── services/      # 配置提供者、导出、WhatsApp 链接
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 工具函数
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod inventory;
pub mod pricing;
pub mod services;
pub mod sheets;
pub mod utils;

// Re-export 公共类型
pub use auth::{AdminAuthService, JwtService};
pub use core::{Config, Server, ServerState};
pub use inventory::InventoryService;
pub use pricing::PricingService;
pub use sheets::SheetsClient;

// Re-export unified error types from shared
pub use shared::{ApiResponse, AppError, AppResult, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
   _____            __
  / ___/____  _____/ /____  ____
  \__ \/ __ \/ ___/ __/ _ \/ __ \
 ___/ / /_/ / /  / /_/  __/ /_/ /
/____/\____/_/   \__/\___/\____/

   Sorteo Server v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}

/// 设置运行环境 (dotenv + 日志)
pub fn setup_environment() {
    // Load .env if present; missing file is fine
    let _ = dotenv::dotenv();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    utils::logger::init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
}

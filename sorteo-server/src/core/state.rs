use std::sync::Arc;

use tokio::sync::Mutex;

use crate::auth::{AdminAuthService, JwtService};
use crate::core::{BackgroundTasks, Config, TaskKind};
use crate::inventory::InventoryService;
use crate::pricing::PricingService;
use crate::services::{WhatsAppLink, fetch_remote_config};
use crate::sheets::SheetsClient;

/// 服务器状态 - 持有所有服务的单例引用
///
/// ServerState 是服务的核心数据结构，持有所有服务的共享引用。
/// 使用 Arc 实现浅拷贝，所有权成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | inventory | InventoryService | 票务库存状态机 |
/// | pricing | PricingService | 手续费计算器 |
/// | auth | AdminAuthService | 管理员认证 (Argon2 + JWT) |
/// | whatsapp | WhatsAppLink | 确认消息链接生成 |
/// | tasks | Arc<Mutex<BackgroundTasks>> | 后台任务注册表 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 票务库存
    pub inventory: InventoryService,
    /// 手续费计算器
    pub pricing: PricingService,
    /// 管理员认证服务
    pub auth: AdminAuthService,
    /// WhatsApp 链接生成器
    pub whatsapp: WhatsAppLink,
    /// 后台任务注册表
    tasks: Arc<Mutex<BackgroundTasks>>,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 远程配置 (CONFIG_URL，失败时继续使用环境变量)
    /// 2. 管理员凭据 (远程明文密码立即哈希后丢弃)
    /// 3. 远程表格客户端 (未配置时进入本地模式)
    /// 4. 库存 (从远程表格加载，失败时降级为 99 张可用)
    pub async fn initialize(config: &Config) -> Self {
        let mut config = config.clone();

        // 1. Remote config fills gaps env left open
        let mut remote_admin_password = None;
        if let Some(url) = config.config_url.clone() {
            if let Some(remote) = fetch_remote_config(&url).await {
                config.apply_remote(&remote);
                remote_admin_password = remote.admin_password;
            }
        }

        // 2. Admin credential: a local hash wins; a remote plaintext is
        //    hashed here and the plaintext dropped
        let password_hash = match (&config.admin_password_hash, remote_admin_password) {
            (Some(hash), _) => Some(hash.clone()),
            (None, Some(plain)) => match AdminAuthService::hash_password(&plain) {
                Ok(hash) => Some(hash),
                Err(e) => {
                    tracing::error!(error = %e, "Could not hash remote admin password");
                    None
                }
            },
            (None, None) => None,
        };
        let auth = AdminAuthService::new(JwtService::with_config(config.jwt.clone()), password_hash);

        // 3. Sheets client
        let sheets = match (&config.sheet_id, &config.sheets_api_key) {
            (Some(id), Some(key)) => match SheetsClient::new(id.clone(), key.clone()) {
                Ok(client) => Some(client),
                Err(e) => {
                    tracing::error!(error = %e, "Could not build sheets client, running local");
                    None
                }
            },
            _ => None,
        };

        // 4. Inventory load happens here, not behind a readiness poll:
        //    when initialize returns the state is fully usable
        let inventory = InventoryService::initialize(sheets, config.cache_ttl()).await;

        let pricing = PricingService::new(config.pricing());
        let whatsapp = WhatsAppLink::new(config.whatsapp_number.clone());

        Self {
            config,
            inventory,
            pricing,
            auth,
            whatsapp,
            tasks: Arc::new(Mutex::new(BackgroundTasks::new())),
        }
    }

    /// 启动后台任务
    ///
    /// 必须在 `Server::run()` 之前调用
    ///
    /// 启动的任务：
    /// - 周期性远程同步 (仅在配置了远程表格时)
    pub async fn start_background_tasks(&self) {
        if !self.inventory.has_remote() {
            tracing::info!("No remote store, periodic sync not started");
            return;
        }

        let inventory = self.inventory.clone();
        let interval = self.config.refresh_interval();

        let mut tasks = self.tasks.lock().await;
        let token = tasks.shutdown_token();
        tasks.spawn("sheet-sync", TaskKind::Periodic, async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        if let Err(e) = inventory.sync_if_stale().await {
                            tracing::warn!(error = %e, "Periodic sheet sync failed");
                        }
                    }
                }
            }
        });
    }

    /// 关闭所有后台任务并等待其退出
    pub async fn shutdown_background_tasks(&self) {
        let mut tasks = self.tasks.lock().await;
        let drained = std::mem::take(&mut *tasks);
        drained.shutdown().await;
    }
}

#[cfg(test)]
impl ServerState {
    /// 本地模式下的最小状态，供处理器测试使用
    pub(crate) fn local_for_tests(admin_password: Option<&str>) -> Self {
        let config = Config::from_env();
        let password_hash =
            admin_password.map(|p| AdminAuthService::hash_password(p).expect("hashing"));
        Self {
            inventory: InventoryService::new_local(std::time::Duration::from_secs(30)),
            pricing: PricingService::new(config.pricing()),
            auth: AdminAuthService::new(
                JwtService::with_config(crate::auth::JwtConfig {
                    secret: "test-secret-that-is-long-enough-for-hs256".into(),
                    expiration_minutes: 240,
                    issuer: "sorteo-server".into(),
                    audience: "sorteo-admin".into(),
                }),
                password_hash,
            ),
            whatsapp: WhatsAppLink::new(config.whatsapp_number.clone()),
            tasks: Arc::new(Mutex::new(BackgroundTasks::new())),
            config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_local_state_has_no_background_tasks() {
        let state = ServerState::local_for_tests(None);
        state.start_background_tasks().await;
        assert!(state.tasks.lock().await.is_empty());
        state.shutdown_background_tasks().await;
    }
}

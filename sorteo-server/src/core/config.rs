use std::time::Duration;

use shared::models::RemoteConfig;

use crate::auth::JwtConfig;
use crate::pricing::PricingConfig;

/// 服务器配置 - 所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_PORT | 8080 | HTTP 服务端口 |
/// | CONFIG_URL | (未设置) | 远程配置端点 (get-config) |
/// | SHEET_ID | (未设置) | Google Sheet ID |
/// | SHEETS_API_KEY | (未设置) | Google Sheets API Key |
/// | ADMIN_PASSWORD_HASH | (未设置) | 管理员密码的 argon2 哈希 |
/// | TICKET_PRICE_CORDOBAS | 70 | 单张奖券价格 (科多巴) |
/// | PAYPAL_FEE_RATE | 0.045 | PayPal 百分比手续费 |
/// | PAYPAL_FIXED_FEE_USD | 0.30 | PayPal 固定手续费 (美元) |
/// | EXCHANGE_RATE | 36.5 | 汇率 (科多巴/美元) |
/// | RESERVATION_MINUTES | 15 | 预留有效期 (分钟) |
/// | REFRESH_INTERVAL_SECS | 30 | 远程刷新周期 (秒) |
/// | SHEETS_CACHE_TTL_SECS | 30 | 读缓存有效期 (秒) |
/// | WHATSAPP_NUMBER | 50588888888 | WhatsApp 收单号码 |
///
/// # 示例
///
/// ```ignore
/// SHEET_ID=abc SHEETS_API_KEY=key HTTP_PORT=3000 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 远程配置端点 (外部 key-value 配置提供者)
    pub config_url: Option<String>,
    /// Google Sheet ID (未设置时使用本地模式)
    pub sheet_id: Option<String>,
    /// Google Sheets API Key
    pub sheets_api_key: Option<String>,
    /// 管理员密码哈希 (argon2 PHC 字符串)
    pub admin_password_hash: Option<String>,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 单张奖券价格 (科多巴)
    pub ticket_price_cordobas: f64,
    /// PayPal 百分比手续费率
    pub paypal_fee_rate: f64,
    /// PayPal 固定手续费 (美元)
    pub paypal_fixed_fee_usd: f64,
    /// 汇率 (科多巴/美元)
    pub exchange_rate: f64,
    /// 预留有效期 (分钟)
    pub reservation_minutes: u64,
    /// 远程刷新周期 (秒)
    pub refresh_interval_secs: u64,
    /// 读缓存有效期 (秒)
    pub sheets_cache_ttl_secs: u64,
    /// WhatsApp 收单号码
    pub whatsapp_number: String,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            config_url: std::env::var("CONFIG_URL").ok().filter(|s| !s.is_empty()),
            sheet_id: std::env::var("SHEET_ID").ok().filter(|s| !s.is_empty()),
            sheets_api_key: std::env::var("SHEETS_API_KEY")
                .ok()
                .filter(|s| !s.is_empty()),
            admin_password_hash: std::env::var("ADMIN_PASSWORD_HASH")
                .ok()
                .filter(|s| !s.is_empty()),
            jwt: JwtConfig::default(),
            ticket_price_cordobas: std::env::var("TICKET_PRICE_CORDOBAS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(70.0),
            paypal_fee_rate: std::env::var("PAYPAL_FEE_RATE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0.045),
            paypal_fixed_fee_usd: std::env::var("PAYPAL_FIXED_FEE_USD")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0.30),
            exchange_rate: std::env::var("EXCHANGE_RATE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(36.5),
            reservation_minutes: std::env::var("RESERVATION_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(15),
            refresh_interval_secs: std::env::var("REFRESH_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            sheets_cache_ttl_secs: std::env::var("SHEETS_CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            whatsapp_number: std::env::var("WHATSAPP_NUMBER")
                .unwrap_or_else(|_| "50588888888".into()),
        }
    }

    /// 合并远程配置 (本地环境变量优先)
    ///
    /// 远程提供的 sheet 连接参数仅在本地未设置时填充。
    /// 管理员密码由认证服务单独处理 (先哈希，绝不明文保存)。
    pub fn apply_remote(&mut self, remote: &RemoteConfig) {
        if self.sheet_id.is_none() {
            self.sheet_id = remote.sheet_id.clone();
        }
        if self.sheets_api_key.is_none() {
            self.sheets_api_key = remote.api_key.clone();
        }
    }

    /// 是否配置了远程表格存储
    pub fn has_sheet_config(&self) -> bool {
        self.sheet_id.is_some() && self.sheets_api_key.is_some()
    }

    /// 预留有效期
    pub fn reservation_duration(&self) -> Duration {
        Duration::from_secs(self.reservation_minutes * 60)
    }

    /// 读缓存有效期
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.sheets_cache_ttl_secs)
    }

    /// 远程刷新周期
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    /// 定价常量 (汇率与费率是配置常量，不实时获取)
    pub fn pricing(&self) -> PricingConfig {
        PricingConfig {
            unit_price_cordobas: self.ticket_price_cordobas,
            fee_rate: self.paypal_fee_rate,
            fixed_fee_usd: self.paypal_fixed_fee_usd,
            exchange_rate: self.exchange_rate,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_remote_prefers_local() {
        let mut config = Config::from_env();
        config.sheet_id = Some("local-sheet".into());
        config.sheets_api_key = None;

        let remote = RemoteConfig {
            sheet_id: Some("remote-sheet".into()),
            api_key: Some("remote-key".into()),
            admin_password: None,
        };
        config.apply_remote(&remote);

        assert_eq!(config.sheet_id.as_deref(), Some("local-sheet"));
        assert_eq!(config.sheets_api_key.as_deref(), Some("remote-key"));
        assert!(config.has_sheet_config());
    }
}

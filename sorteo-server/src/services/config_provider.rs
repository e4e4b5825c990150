//! Remote configuration bootstrap.
//!
//! At startup the server may fetch a small JSON document from an external
//! endpoint (`CONFIG_URL`) carrying the sheet connection parameters and
//! optionally the admin password. The fetch is best-effort: any failure
//! logs a warning and the server continues on env-only configuration.

use std::time::Duration;

use shared::models::RemoteConfig;

/// Fetch the remote config document, or `None` on any failure
pub async fn fetch_remote_config(url: &str) -> Option<RemoteConfig> {
    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            tracing::warn!(error = %e, "Could not build config client");
            return None;
        }
    };

    let response = match client.get(url).send().await {
        Ok(resp) => resp,
        Err(e) => {
            tracing::warn!(error = %e, "Remote config fetch failed");
            return None;
        }
    };

    if !response.status().is_success() {
        tracing::warn!(status = %response.status(), "Remote config endpoint returned an error");
        return None;
    }

    match response.json::<RemoteConfig>().await {
        Ok(config) => {
            tracing::info!(
                has_sheet = config.has_sheet_config(),
                has_admin_password = config.admin_password.is_some(),
                "Remote config loaded"
            );
            Some(config)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Remote config body was not valid JSON");
            None
        }
    }
}

//! SheetsClient — HTTP client for the Google Sheets values API

use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::AppError;

/// Column range holding the sale data on the first sheet
const RANGE: &str = "A:F";

/// Response body of a values read
#[derive(Debug, Deserialize)]
struct ValuesResponse {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

/// Request body of a values append
#[derive(Debug, Serialize)]
struct AppendRequest<'a> {
    values: &'a [Vec<String>],
}

/// HTTP client for the remote sheet
///
/// Auth is the API key in the query string, the original integration's
/// model. No retries here; callers decide whether a failure matters.
#[derive(Debug, Clone)]
pub struct SheetsClient {
    client: Client,
    sheet_id: String,
    api_key: String,
}

impl SheetsClient {
    /// Create a new client for one spreadsheet
    pub fn new(sheet_id: String, api_key: String) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            sheet_id,
            api_key,
        })
    }

    fn read_url(&self) -> String {
        format!(
            "https://sheets.googleapis.com/v4/spreadsheets/{}/values/{}?key={}",
            self.sheet_id, RANGE, self.api_key
        )
    }

    fn append_url(&self) -> String {
        format!(
            "https://sheets.googleapis.com/v4/spreadsheets/{}/values/{}:append?valueInputOption=RAW&key={}",
            self.sheet_id, RANGE, self.api_key
        )
    }

    /// Fetch the raw value rows of the data range
    ///
    /// Row 0 is the sheet header; callers parse with [`super::parse_rows`].
    pub async fn fetch_values(&self) -> Result<Vec<Vec<String>>, AppError> {
        let response = self
            .client
            .get(self.read_url())
            .send()
            .await
            .map_err(|e| AppError::network(format!("Sheet read request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::sheet(format!(
                "Sheet read failed with status {status}: {body}"
            )));
        }

        let body: ValuesResponse = response
            .json()
            .await
            .map_err(|e| AppError::sheet(format!("Failed to parse sheet response: {e}")))?;

        Ok(body.values)
    }

    /// Append rows to the sheet
    ///
    /// Any non-success response is a sync failure; the caller decides
    /// whether to surface or swallow it.
    pub async fn append_rows(&self, rows: &[Vec<String>]) -> Result<(), AppError> {
        let response = self
            .client
            .post(self.append_url())
            .json(&AppendRequest { values: rows })
            .send()
            .await
            .map_err(|e| AppError::network(format!("Sheet append request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::sheet(format!(
                "Sheet append failed with status {status}: {body}"
            )));
        }

        Ok(())
    }
}

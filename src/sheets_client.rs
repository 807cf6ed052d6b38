//! src/sheets_client.rs
use anyhow::Context;
use reqwest::{Client, StatusCode, Url};
use secrecy::{ExposeSecret, Secret};
use tokio::sync::Mutex;

/// Client for a spreadsheet values API shaped like Google Sheets v4.
/// All calls target one sheet of one spreadsheet.
pub struct SheetsClient {
    http_client: Client,
    base_url: Url,
    spreadsheet_id: String,
    sheet_name: String,
    authorization_token: Secret<String>,
    // Held from the row count until the append lands, so only one record
    // in this process can ever see an empty sheet.
    record_lock: Mutex<()>,
}

#[derive(serde::Deserialize)]
struct ValueRange {
    // Omitted by the API when the sheet is empty.
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

#[derive(serde::Serialize)]
struct AppendRequest<'a> {
    values: &'a [Vec<String>],
}

#[derive(serde::Deserialize)]
struct ErrorResponse {
    error: ApiError,
}

#[derive(serde::Deserialize)]
struct ApiError {
    message: String,
}

// Reading a tab that does not exist is a 400 whose message names the range.
fn is_unknown_range(body: &str) -> bool {
    serde_json::from_str::<ErrorResponse>(body)
        .map(|response| response.error.message.starts_with("Unable to parse range"))
        .unwrap_or(false)
}

impl SheetsClient {
    pub fn new(
        base_url: &str,
        spreadsheet_id: String,
        sheet_name: String,
        authorization_token: Secret<String>,
        timeout: std::time::Duration,
    ) -> Result<Self, anyhow::Error> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("{} is not a valid spreadsheet API url.", base_url))?;
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build the spreadsheet HTTP client.")?;
        Ok(Self {
            http_client,
            base_url,
            spreadsheet_id,
            sheet_name,
            authorization_token,
            record_lock: Mutex::new(()),
        })
    }

    /// Number of rows currently in the sheet, `None` if the sheet does not exist.
    #[tracing::instrument(name = "Count rows in sheet", skip(self), fields(sheet = %self.sheet_name))]
    pub async fn row_count(&self) -> Result<Option<usize>, anyhow::Error> {
        let url = self.spreadsheet_url(&["values", &self.sheet_name])?;
        let response = self
            .http_client
            .get(url)
            .bearer_auth(self.authorization_token.expose_secret())
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .context("Failed to reach the spreadsheet service.")?;
        if response.status() == StatusCode::BAD_REQUEST {
            let body = response
                .text()
                .await
                .map_err(reqwest::Error::without_url)
                .context("The spreadsheet service returned an unreadable error.")?;
            if is_unknown_range(&body) {
                return Ok(None);
            }
            anyhow::bail!("The spreadsheet service refused to read the sheet: {}", body);
        }
        let range: ValueRange = response
            .error_for_status()
            .map_err(reqwest::Error::without_url)
            .context("The spreadsheet service refused to read the sheet.")?
            .json()
            .await
            .map_err(reqwest::Error::without_url)
            .context("The spreadsheet service returned an unreadable value range.")?;
        Ok(Some(range.values.len()))
    }

    #[tracing::instrument(name = "Create sheet", skip(self), fields(sheet = %self.sheet_name))]
    pub async fn create_sheet(&self) -> Result<(), anyhow::Error> {
        let url = self.spreadsheet_url(&[])?;
        let url = with_method(url, "batchUpdate")?;
        let body = serde_json::json!({
            "requests": [
                { "addSheet": { "properties": { "title": self.sheet_name } } }
            ]
        });
        self.http_client
            .post(url)
            .bearer_auth(self.authorization_token.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .context("Failed to reach the spreadsheet service.")?
            .error_for_status()
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("Failed to create the sheet '{}'.", self.sheet_name))?;
        Ok(())
    }

    /// Opens the sheet, creating it on first use, and returns its row count.
    pub async fn open_or_create(&self) -> Result<usize, anyhow::Error> {
        match self.row_count().await? {
            Some(rows) => Ok(rows),
            None => {
                tracing::info!("Sheet '{}' does not exist yet, creating it.", self.sheet_name);
                self.create_sheet().await?;
                Ok(0)
            }
        }
    }

    /// Appends `row`, preceded by `header` when the sheet is new or empty.
    /// Both rows travel in the same append call.
    #[tracing::instrument(name = "Append record to sheet", skip(self, header, row), fields(sheet = %self.sheet_name))]
    pub async fn append_record(&self, header: Vec<String>, row: Vec<String>) -> Result<(), anyhow::Error> {
        let _guard = self.record_lock.lock().await;
        let existing_rows = self.open_or_create().await?;
        let rows = if existing_rows == 0 {
            vec![header, row]
        } else {
            vec![row]
        };
        self.append_rows(&rows).await
    }

    #[tracing::instrument(name = "Append rows to sheet", skip(self, rows), fields(sheet = %self.sheet_name))]
    pub async fn append_rows(&self, rows: &[Vec<String>]) -> Result<(), anyhow::Error> {
        let url = self.spreadsheet_url(&["values"])?;
        let mut url = append_segment(url, &format!("{}:append", self.sheet_name))?;
        url.query_pairs_mut()
            .append_pair("valueInputOption", "RAW")
            .append_pair("insertDataOption", "INSERT_ROWS");
        self.http_client
            .post(url)
            .bearer_auth(self.authorization_token.expose_secret())
            .json(&AppendRequest { values: rows })
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .context("Failed to reach the spreadsheet service.")?
            .error_for_status()
            .map_err(reqwest::Error::without_url)
            .context("The spreadsheet service refused to append the rows.")?;
        Ok(())
    }

    fn spreadsheet_url(&self, segments: &[&str]) -> Result<Url, anyhow::Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("{} cannot be used as a base url.", self.base_url))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", self.spreadsheet_id.as_str()])
            .extend(segments);
        Ok(url)
    }
}

fn append_segment(mut url: Url, segment: &str) -> Result<Url, anyhow::Error> {
    url.path_segments_mut()
        .map_err(|_| anyhow::anyhow!("The spreadsheet url cannot be a base."))?
        .push(segment);
    Ok(url)
}

// Spreadsheet-level methods are addressed as `{spreadsheet_id}:{method}`.
fn with_method(mut url: Url, method: &str) -> Result<Url, anyhow::Error> {
    let last = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .map(str::to_string)
        .context("The spreadsheet url has no path.")?;
    url.path_segments_mut()
        .map_err(|_| anyhow::anyhow!("The spreadsheet url cannot be a base."))?
        .pop()
        .push(&format!("{}:{}", last, method));
    Ok(url)
}

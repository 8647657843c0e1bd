use super::{ClientFactory, SheetOperations, UpstreamError, UpstreamResult};
use crate::error::{AppError, Result};
use crate::models::Credential;
use crate::sheets::auth::service_account_authenticator;
use async_trait::async_trait;
use google_drive3::api::Scope as DriveScope;
use google_sheets4::api::{Scope, Sheets};
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use serde_json::Value;
use tracing::{debug, instrument};

// Read-only access to cell contents
const SHEETS_SCOPE: Scope = Scope::SpreadsheetReadonly;

// Read-only access to file metadata
const DRIVE_SCOPE: DriveScope = DriveScope::MetadataReadonly;

const VALUE_RENDER_OPTION: &str = "FORMATTED_VALUE";
const DATE_TIME_RENDER_OPTION: &str = "FORMATTED_STRING";

/// Authenticated Google Sheets session for a single credential.
pub struct SheetsClient {
    hub: Sheets<HttpsConnector<HttpConnector>>,
}

impl SheetsClient {
    #[instrument(name = "Authenticating to Google Sheets", skip_all)]
    pub async fn new(credential: &Credential) -> Result<Self> {
        let auth = service_account_authenticator(credential).await?;

        let connector = hyper_rustls::HttpsConnectorBuilder::new()
            .with_native_roots()
            .map_err(|e| AppError::Auth(format!("Failed to load root certificates: {}", e)))?
            .https_or_http()
            .enable_http1()
            .build();

        let client = Client::builder(hyper_util::rt::TokioExecutor::new()).build(connector);

        Ok(Self {
            hub: Sheets::new(client, auth),
        })
    }
}

#[async_trait]
impl SheetOperations for SheetsClient {
    #[instrument(name = "Fetching sheet titles", skip(self))]
    async fn sheet_titles(&self, spreadsheet_id: &str) -> UpstreamResult<Vec<String>> {
        let (_, spreadsheet) = self
            .hub
            .spreadsheets()
            .get(spreadsheet_id)
            .param("fields", "sheets.properties.title")
            .add_scope(SHEETS_SCOPE)
            .add_scope(DRIVE_SCOPE)
            .doit()
            .await?;

        let titles: Vec<String> = spreadsheet
            .sheets
            .unwrap_or_default()
            .into_iter()
            .filter_map(|sheet| sheet.properties.and_then(|props| props.title))
            .collect();
        debug!(count = titles.len(), "Fetched sheet titles");

        Ok(titles)
    }

    #[instrument(name = "Fetching spreadsheet title", skip(self))]
    async fn spreadsheet_title(&self, spreadsheet_id: &str) -> UpstreamResult<Option<String>> {
        let (_, spreadsheet) = self
            .hub
            .spreadsheets()
            .get(spreadsheet_id)
            .param("fields", "properties.title")
            .add_scope(SHEETS_SCOPE)
            .add_scope(DRIVE_SCOPE)
            .doit()
            .await?;

        Ok(spreadsheet.properties.and_then(|props| props.title))
    }

    #[instrument(name = "Fetching values", skip(self))]
    async fn values(&self, spreadsheet_id: &str, range: &str) -> UpstreamResult<Vec<Vec<String>>> {
        let (_, response) = self
            .hub
            .spreadsheets()
            .values_get(spreadsheet_id, range)
            .value_render_option(VALUE_RENDER_OPTION)
            .date_time_render_option(DATE_TIME_RENDER_OPTION)
            .major_dimension("ROWS")
            .add_scope(SHEETS_SCOPE)
            .add_scope(DRIVE_SCOPE)
            .doit()
            .await?;

        // Values are Option<Vec<Vec<serde_json::Value>>>; rows stay ragged.
        let rows: Vec<Vec<String>> = response
            .values
            .unwrap_or_default()
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect();
        debug!(rows = rows.len(), "Fetched values");

        Ok(rows)
    }
}

/// Creates a [`SheetsClient`] per request. Holds no state of its own.
#[derive(Debug, Default, Clone)]
pub struct GoogleClientFactory;

#[async_trait]
impl ClientFactory for GoogleClientFactory {
    async fn connect(&self, credential: &Credential) -> Result<Box<dyn SheetOperations>> {
        Ok(Box::new(SheetsClient::new(credential).await?))
    }
}

impl From<google_sheets4::Error> for UpstreamError {
    fn from(err: google_sheets4::Error) -> Self {
        match err {
            // Google error bodies look like {"error": {"code": 403, "message": ...}}
            google_sheets4::Error::BadRequest(body) => UpstreamError {
                code: body
                    .pointer("/error/code")
                    .and_then(Value::as_u64)
                    .and_then(|code| u16::try_from(code).ok()),
                message: body
                    .pointer("/error/message")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            },
            google_sheets4::Error::Failure(response) => {
                let status = response.status();
                UpstreamError {
                    code: Some(status.as_u16()),
                    message: status.canonical_reason().map(str::to_string),
                }
            }
            other => UpstreamError::new(None, Some(&other.to_string())),
        }
    }
}

/// Formatted rendering yields strings; anything else is printed as JSON.
fn cell_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bad_request_body_converted() {
        let err = google_sheets4::Error::BadRequest(json!({
            "error": {
                "code": 403,
                "message": "The caller does not have permission",
                "status": "PERMISSION_DENIED"
            }
        }));

        assert_eq!(
            UpstreamError::from(err),
            UpstreamError::new(Some(403), Some("The caller does not have permission"))
        );
    }

    #[test]
    fn test_bad_request_without_error_object() {
        let err = google_sheets4::Error::BadRequest(json!({"unexpected": true}));

        assert_eq!(UpstreamError::from(err), UpstreamError::new(None, None));
    }

    #[test]
    fn test_other_errors_keep_message() {
        let converted = UpstreamError::from(google_sheets4::Error::Cancelled);

        assert_eq!(converted.code, None);
        assert!(converted.message.is_some());
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(json!("$1,200.00")), "$1,200.00");
        assert_eq!(cell_text(json!(42)), "42");
        assert_eq!(cell_text(json!(true)), "true");
        assert_eq!(cell_text(Value::Null), "");
    }
}

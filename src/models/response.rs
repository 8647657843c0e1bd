use serde::{Serialize, Serializer};

/// Machine-readable failure code carried by every error body.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorCode {
    /// Status code reported by the upstream API.
    Http(u16),
    InvalidRequest,
    NotFound,
    Unknown,
}

impl From<Option<u16>> for ErrorCode {
    fn from(code: Option<u16>) -> Self {
        code.map(ErrorCode::Http).unwrap_or(ErrorCode::Unknown)
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ErrorCode::Http(code) => serializer.serialize_u16(*code),
            ErrorCode::InvalidRequest => serializer.serialize_str("INVALID_REQUEST"),
            ErrorCode::NotFound => serializer.serialize_str("NOT_FOUND"),
            ErrorCode::Unknown => serializer.serialize_str("UNKNOWN"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetsResponse {
    pub success: bool,
    pub sheet_names: Vec<String>,
    pub count: usize,
    pub spreadsheet_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadersResponse {
    pub success: bool,
    pub headers: Vec<String>,
    pub count: usize,
    pub sheet_name: String,
    pub spreadsheet_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataResponse {
    pub success: bool,
    pub data: Vec<Vec<String>>,
    pub row_count: usize,
    pub sheet_name: String,
    pub spreadsheet_id: String,
}

/// Outcome of an access check. Denied access is a normal result, so the
/// failure fields live alongside `has_access` rather than in an error body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessResponse {
    pub success: bool,
    pub has_access: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spreadsheet_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
}

#[derive(Debug, Serialize)]
pub struct FailureResponse {
    pub success: bool,
    pub error: String,
    pub code: ErrorCode,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotFoundResponse {
    pub success: bool,
    pub error: &'static str,
    pub code: ErrorCode,
    pub available_endpoints: &'static [&'static str],
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_code_serialization() {
        assert_eq!(serde_json::to_value(ErrorCode::Http(403)).unwrap(), json!(403));
        assert_eq!(serde_json::to_value(ErrorCode::Unknown).unwrap(), json!("UNKNOWN"));
        assert_eq!(
            serde_json::to_value(ErrorCode::InvalidRequest).unwrap(),
            json!("INVALID_REQUEST")
        );
        assert_eq!(serde_json::to_value(ErrorCode::NotFound).unwrap(), json!("NOT_FOUND"));
    }

    #[test]
    fn test_access_granted_omits_failure_fields() {
        let response = AccessResponse {
            success: true,
            has_access: true,
            spreadsheet_title: Some("Budget".to_string()),
            error: None,
            code: None,
        };

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"success": true, "hasAccess": true, "spreadsheetTitle": "Budget"})
        );
    }
}

use crate::error::{AppError, Result};
use crate::models::{Connection, Credential};
use serde::Deserialize;

/// Range used for header lookups when the caller does not supply one.
pub const DEFAULT_HEADER_RANGE: &str = "A1:ZZ1";

/// Request body shared by all spreadsheet endpoints. Endpoints differ only in
/// which fields they require.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GatewayRequest {
    pub spreadsheet_id: Option<String>,
    pub sheet_name: Option<String>,
    pub range: Option<String>,
    pub connection: Option<Connection>,
}

/// Identifies a whole spreadsheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SpreadsheetRef {
    pub spreadsheet_id: String,
}

/// Identifies a named sheet, optionally narrowed to a range.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetRef {
    pub spreadsheet_id: String,
    pub sheet_name: String,
    pub range: Option<String>,
}

impl SheetRef {
    /// A1 range for the header row, `Sheet!A1:ZZ1` unless overridden.
    pub fn header_range(&self) -> String {
        let range = self.range.as_deref().unwrap_or(DEFAULT_HEADER_RANGE);
        format!("{}!{}", self.sheet_name, range)
    }

    /// A1 range for a data fetch; the bare sheet name selects the whole sheet.
    pub fn data_range(&self) -> String {
        match &self.range {
            Some(range) => format!("{}!{}", self.sheet_name, range),
            None => self.sheet_name.clone(),
        }
    }
}

impl GatewayRequest {
    /// Validate a request that targets a whole spreadsheet.
    pub fn into_spreadsheet(self) -> Result<(SpreadsheetRef, Credential)> {
        let mut missing = Vec::new();
        let spreadsheet_id = present(&self.spreadsheet_id, "spreadsheetId", &mut missing);
        let credential = self.credential(&mut missing);

        match (spreadsheet_id, credential) {
            (Some(spreadsheet_id), Some(credential)) if missing.is_empty() => Ok((
                SpreadsheetRef {
                    spreadsheet_id: spreadsheet_id.to_string(),
                },
                credential,
            )),
            _ => Err(missing_fields(&missing)),
        }
    }

    /// Validate a request that targets a named sheet.
    pub fn into_sheet(self) -> Result<(SheetRef, Credential)> {
        let mut missing = Vec::new();
        let spreadsheet_id = present(&self.spreadsheet_id, "spreadsheetId", &mut missing);
        let sheet_name = present(&self.sheet_name, "sheetName", &mut missing);
        let credential = self.credential(&mut missing);

        match (spreadsheet_id, sheet_name, credential) {
            (Some(spreadsheet_id), Some(sheet_name), Some(credential)) if missing.is_empty() => {
                let range = self
                    .range
                    .as_deref()
                    .filter(|r| !r.is_empty())
                    .map(str::to_string);
                Ok((
                    SheetRef {
                        spreadsheet_id: spreadsheet_id.to_string(),
                        sheet_name: sheet_name.to_string(),
                        range,
                    },
                    credential,
                ))
            }
            _ => Err(missing_fields(&missing)),
        }
    }

    fn credential(&self, missing: &mut Vec<&'static str>) -> Option<Credential> {
        let connection = self.connection.clone().unwrap_or_default();
        let client_email = present(&connection.client_email, "connection.clientEmail", missing);
        let private_key = present(&connection.private_key, "connection.privateKey", missing);
        let project_id = present(&connection.project_id, "connection.projectId", missing);

        Some(Credential::new(client_email?, private_key?, project_id?))
    }
}

fn present<'a>(
    field: &'a Option<String>,
    name: &'static str,
    missing: &mut Vec<&'static str>,
) -> Option<&'a str> {
    match field.as_deref() {
        Some(value) if !value.is_empty() => Some(value),
        _ => {
            missing.push(name);
            None
        }
    }
}

fn missing_fields(missing: &[&str]) -> AppError {
    AppError::Validation(format!("Missing required fields: {}", missing.join(", ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::credential::test_helpers::mock_connection;

    fn sheet_request(range: Option<&str>) -> GatewayRequest {
        GatewayRequest {
            spreadsheet_id: Some("sheet-123".to_string()),
            sheet_name: Some("Orders".to_string()),
            range: range.map(str::to_string),
            connection: Some(mock_connection()),
        }
    }

    #[test]
    fn test_spreadsheet_request_valid() {
        let request = GatewayRequest {
            spreadsheet_id: Some("sheet-123".to_string()),
            connection: Some(mock_connection()),
            ..Default::default()
        };

        let (spreadsheet, credential) = request.into_spreadsheet().unwrap();
        assert_eq!(spreadsheet.spreadsheet_id, "sheet-123");
        assert_eq!(credential.project_id, "test-project");
        assert!(!credential.private_key.contains("\\n"));
    }

    #[test]
    fn test_missing_fields_are_named() {
        let request = GatewayRequest {
            spreadsheet_id: Some(String::new()),
            connection: Some(Connection {
                private_key: None,
                ..mock_connection()
            }),
            ..Default::default()
        };

        let err = request.into_sheet().unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(
            err.to_string(),
            "Missing required fields: spreadsheetId, sheetName, connection.privateKey"
        );
    }

    #[test]
    fn test_missing_connection() {
        let request = GatewayRequest {
            spreadsheet_id: Some("sheet-123".to_string()),
            ..Default::default()
        };

        let err = request.into_spreadsheet().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required fields: connection.clientEmail, connection.privateKey, connection.projectId"
        );
    }

    #[test]
    fn test_header_range_defaults() {
        let (sheet, _) = sheet_request(None).into_sheet().unwrap();
        assert_eq!(sheet.header_range(), "Orders!A1:ZZ1");

        let (sheet, _) = sheet_request(Some("B2:F2")).into_sheet().unwrap();
        assert_eq!(sheet.header_range(), "Orders!B2:F2");
    }

    #[test]
    fn test_data_range() {
        let (sheet, _) = sheet_request(None).into_sheet().unwrap();
        assert_eq!(sheet.data_range(), "Orders");

        let (sheet, _) = sheet_request(Some("")).into_sheet().unwrap();
        assert_eq!(sheet.data_range(), "Orders");

        let (sheet, _) = sheet_request(Some("A1:C10")).into_sheet().unwrap();
        assert_eq!(sheet.data_range(), "Orders!A1:C10");
    }
}

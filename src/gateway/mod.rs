mod errors;

pub use errors::{Operation, translate};

use crate::error::{AppError, Result};
use crate::models::{
    AccessResponse, Credential, DataResponse, ErrorCode, GatewayRequest, HeadersResponse,
    SheetsResponse,
};
use crate::sheets::{ClientFactory, SheetOperations};
use std::sync::Arc;
use tracing::{info, instrument};

/// Runs the spreadsheet operations: validate, connect, one upstream call, shape.
#[derive(Clone)]
pub struct Gateway {
    factory: Arc<dyn ClientFactory>,
}

impl Gateway {
    pub fn new(factory: Arc<dyn ClientFactory>) -> Self {
        Self { factory }
    }

    async fn connect(&self, credential: &Credential) -> Result<Box<dyn SheetOperations>> {
        self.factory.connect(credential).await
    }

    #[instrument(name = "fetchSheets", skip_all)]
    pub async fn fetch_sheets(&self, request: GatewayRequest) -> Result<SheetsResponse> {
        let (spreadsheet, credential) = request.into_spreadsheet()?;
        let client = self.connect(&credential).await?;

        let sheet_names = client
            .sheet_titles(&spreadsheet.spreadsheet_id)
            .await
            .map_err(|e| {
                AppError::upstream(
                    translate(Operation::FetchSheets, &e, &credential.client_email),
                    &e,
                )
            })?;
        info!(spreadsheet_id = %spreadsheet.spreadsheet_id, count = sheet_names.len(), "Listed sheets");

        Ok(SheetsResponse {
            success: true,
            count: sheet_names.len(),
            sheet_names,
            spreadsheet_id: spreadsheet.spreadsheet_id,
        })
    }

    #[instrument(name = "fetchHeaders", skip_all)]
    pub async fn fetch_headers(&self, request: GatewayRequest) -> Result<HeadersResponse> {
        let (sheet, credential) = request.into_sheet()?;
        let client = self.connect(&credential).await?;

        let rows = client
            .values(&sheet.spreadsheet_id, &sheet.header_range())
            .await
            .map_err(|e| {
                AppError::upstream(
                    translate(Operation::FetchHeaders, &e, &credential.client_email),
                    &e,
                )
            })?;

        let headers: Vec<String> = rows
            .into_iter()
            .next()
            .unwrap_or_default()
            .into_iter()
            .filter(|header| !header.trim().is_empty())
            .collect();
        info!(sheet = %sheet.sheet_name, count = headers.len(), "Fetched headers");

        Ok(HeadersResponse {
            success: true,
            count: headers.len(),
            headers,
            sheet_name: sheet.sheet_name,
            spreadsheet_id: sheet.spreadsheet_id,
        })
    }

    #[instrument(name = "fetchData", skip_all)]
    pub async fn fetch_data(&self, request: GatewayRequest) -> Result<DataResponse> {
        let (sheet, credential) = request.into_sheet()?;
        let client = self.connect(&credential).await?;

        let data = client
            .values(&sheet.spreadsheet_id, &sheet.data_range())
            .await
            .map_err(|e| {
                AppError::upstream(
                    translate(Operation::FetchData, &e, &credential.client_email),
                    &e,
                )
            })?;
        info!(sheet = %sheet.sheet_name, rows = data.len(), "Fetched data");

        Ok(DataResponse {
            success: true,
            row_count: data.len(),
            data,
            sheet_name: sheet.sheet_name,
            spreadsheet_id: sheet.spreadsheet_id,
        })
    }

    /// Check access to a spreadsheet. Only validation errors are returned as
    /// `Err`; every other failure is reported as `has_access: false`.
    #[instrument(name = "testAccess", skip_all)]
    pub async fn test_access(&self, request: GatewayRequest) -> Result<AccessResponse> {
        let (spreadsheet, credential) = request.into_spreadsheet()?;

        let client = match self.connect(&credential).await {
            Ok(client) => client,
            Err(e) => return Ok(denied(e.to_string(), e.code())),
        };

        match client.spreadsheet_title(&spreadsheet.spreadsheet_id).await {
            Ok(title) => {
                info!(spreadsheet_id = %spreadsheet.spreadsheet_id, "Access confirmed");
                Ok(AccessResponse {
                    success: true,
                    has_access: true,
                    spreadsheet_title: title,
                    error: None,
                    code: None,
                })
            }
            Err(e) => {
                info!(spreadsheet_id = %spreadsheet.spreadsheet_id, error = %e, "Access denied");
                Ok(denied(
                    translate(Operation::TestAccess, &e, &credential.client_email),
                    ErrorCode::from(e.code),
                ))
            }
        }
    }
}

fn denied(error: String, code: ErrorCode) -> AccessResponse {
    AccessResponse {
        success: true,
        has_access: false,
        spreadsheet_title: None,
        error: Some(error),
        code: Some(code),
    }
}

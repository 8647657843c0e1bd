mod auth;
mod client;

pub use client::GoogleClientFactory;

use crate::error::Result;
use crate::models::Credential;
use async_trait::async_trait;
use std::fmt;

/// Failure reported by the spreadsheet API, or by the transport in front of it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpstreamError {
    /// HTTP-style status code, when the upstream supplied one.
    pub code: Option<u16>,
    pub message: Option<String>,
}

impl UpstreamError {
    pub fn new(code: Option<u16>, message: Option<&str>) -> Self {
        UpstreamError {
            code,
            message: message.map(str::to_string),
        }
    }
}

impl fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.code, &self.message) {
            (Some(code), Some(message)) => write!(f, "{} ({})", message, code),
            (Some(code), None) => write!(f, "upstream returned {}", code),
            (None, Some(message)) => write!(f, "{}", message),
            (None, None) => write!(f, "unknown upstream error"),
        }
    }
}

impl std::error::Error for UpstreamError {}

pub type UpstreamResult<T> = std::result::Result<T, UpstreamError>;

/// Read-only calls against a single authenticated spreadsheet session.
#[async_trait]
pub trait SheetOperations: Send + Sync {
    /// Titles of every sheet in the spreadsheet, in upstream order.
    async fn sheet_titles(&self, spreadsheet_id: &str) -> UpstreamResult<Vec<String>>;

    /// Title of the spreadsheet itself.
    async fn spreadsheet_title(&self, spreadsheet_id: &str) -> UpstreamResult<Option<String>>;

    /// Cell values for an A1 range, rendered as displayed strings.
    async fn values(&self, spreadsheet_id: &str, range: &str) -> UpstreamResult<Vec<Vec<String>>>;
}

/// Builds a fresh authenticated session from a caller's credential.
#[async_trait]
pub trait ClientFactory: Send + Sync {
    async fn connect(&self, credential: &Credential) -> Result<Box<dyn SheetOperations>>;
}

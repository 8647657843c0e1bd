pub mod credential;
pub mod request;
pub mod response;

pub use credential::{Connection, Credential};
pub use request::GatewayRequest;
pub use response::{
    AccessResponse, DataResponse, ErrorCode, FailureResponse, HeadersResponse, HealthResponse,
    NotFoundResponse, SheetsResponse,
};

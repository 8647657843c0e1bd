use crate::error::{AppError, Result};
use crate::models::Credential;
use hyper_util::client::legacy::connect::HttpConnector;
use tracing::{debug, instrument};
use yup_oauth2::{
    ServiceAccountAuthenticator, ServiceAccountKey, authenticator::Authenticator,
    hyper_rustls::HttpsConnector,
};

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_CERT_URL: &str = "https://www.googleapis.com/oauth2/v1/certs";

pub(super) type AuthType = Authenticator<HttpsConnector<HttpConnector>>;

/// Create a service-account authenticator for one request.
///
/// A malformed PEM key fails here. No token is fetched yet, so a well-formed
/// key that Google rejects only fails on the first API call.
#[instrument(name = "Building service account authenticator", skip_all, fields(client_email = %credential.client_email))]
pub(super) async fn service_account_authenticator(credential: &Credential) -> Result<AuthType> {
    let key = service_account_key(credential);

    let auth = ServiceAccountAuthenticator::builder(key)
        .build()
        .await
        .map_err(|e| AppError::Auth(format!("Failed to build authenticator: {}", e)))?;
    debug!("Authenticator ready");

    Ok(auth)
}

fn service_account_key(credential: &Credential) -> ServiceAccountKey {
    ServiceAccountKey {
        key_type: Some("service_account".to_string()),
        project_id: Some(credential.project_id.clone()),
        private_key_id: None,
        private_key: credential.private_key.clone(),
        client_email: credential.client_email.clone(),
        client_id: None,
        auth_uri: Some(GOOGLE_AUTH_URL.to_string()),
        token_uri: GOOGLE_TOKEN_URL.to_string(),
        auth_provider_x509_cert_url: Some(GOOGLE_CERT_URL.to_string()),
        client_x509_cert_url: None,
    }
}

use crate::config::{GoogleAuthMode, GoogleConfig};
use crate::error::{AppError, Result};
use hyper_util::client::legacy::connect::HttpConnector;
use std::fs;
use tracing::debug;
use tracing::instrument;
use yup_oauth2::{
    InstalledFlowAuthenticator, InstalledFlowReturnMethod, ServiceAccountAuthenticator,
    authenticator::Authenticator, hyper_rustls::HttpsConnector,
};

type AuthType = Authenticator<HttpsConnector<HttpConnector>>;

/// Create and verify an authenticator by fetching a token for the given scopes
pub(super) async fn create_and_verify_authenticator(
    config: &GoogleConfig,
    scopes: &[String],
) -> Result<AuthType> {
    let auth = match config.auth {
        GoogleAuthMode::Oauth => from_installed_flow(config).await?,
        GoogleAuthMode::ServiceAccount => from_service_account(config).await?,
    };

    // Trigger authentication by requesting a token
    let _token = auth
        .token(scopes)
        .await
        .map_err(|e| AppError::Auth(format!("Failed to get token: {}", e)))?;

    Ok(auth)
}

async fn from_installed_flow(config: &GoogleConfig) -> Result<AuthType> {
    let secret = yup_oauth2::read_application_secret(&config.credentials)
        .await
        .map_err(|e| {
            AppError::Auth(format!(
                "Failed to read client secret {:?}: {}",
                config.credentials, e
            ))
        })?;

    let token_cache_path = config.token_cache_path()?;

    // Create parent directory if it doesn't exist
    if let Some(parent) = token_cache_path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            AppError::Auth(format!("Failed to create token cache directory: {}", e))
        })?;
    }

    // Redirect flow: a local listener on an ephemeral port receives the
    // authorization code from the browser. Cached tokens are refreshed
    // from disk on later runs without re-prompting.
    let auth = InstalledFlowAuthenticator::builder(secret, InstalledFlowReturnMethod::HTTPRedirect)
        .persist_tokens_to_disk(token_cache_path)
        .build()
        .await
        .map_err(|e| AppError::Auth(format!("Failed to build authenticator: {}", e)))?;

    Ok(auth)
}

async fn from_service_account(config: &GoogleConfig) -> Result<AuthType> {
    let key = yup_oauth2::read_service_account_key(&config.credentials)
        .await
        .map_err(|e| {
            AppError::Auth(format!(
                "Failed to read service account key {:?}: {}",
                config.credentials, e
            ))
        })?;

    // Service account keys sign a fresh short-lived token every run; nothing
    // is cached and there is no refresh token
    let auth = ServiceAccountAuthenticator::builder(key)
        .build()
        .await
        .map_err(|e| AppError::Auth(format!("Failed to build authenticator: {}", e)))?;

    Ok(auth)
}

/// Clear cached Google tokens by deleting the token cache file
#[instrument(name = "Clearing auth tokens for Google Sheets", skip_all)]
pub fn clear_tokens(config: &GoogleConfig) -> Result<()> {
    let token_path = config.token_cache_path()?;

    if !token_path.exists() {
        debug!("No Google Sheets tokens to clear");
        return Ok(());
    }

    fs::remove_file(&token_path)
        .map_err(|e| AppError::Auth(format!("Failed to delete tokens file: {}", e)))?;
    debug!("Cleared Google Sheets cached tokens");

    Ok(())
}

//! Login exchange and session setup

use reqwest::{header, Client, StatusCode};
use tracing::{debug, info};

use crate::api::models::{LoginRequest, LoginResponse};
use crate::api::{AbsClient, ApiError};
use crate::config::Settings;

/// Sends the credentials to `POST /login` and extracts the token.
pub async fn login(
    client: &Client,
    server_url: &str,
    username: &str,
    password: &str,
) -> Result<LoginResponse, ApiError> {
    let server_url = server_url.trim_end_matches('/');
    let login_url = format!("{}/login", server_url);

    let login_request = LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    };

    let response = client
        .post(&login_url)
        .header(header::CONTENT_TYPE, "application/json")
        .json(&login_request)
        .send()
        .await?;

    let status = response.status();
    let response_text = response.text().await?;
    debug!(%status, "login response received");

    match status {
        StatusCode::OK => serde_json::from_str::<LoginResponse>(&response_text)
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse login response: {}", e))),
        _ => Err(ApiError::Authentication(format!(
            "Login failed ({}): {}",
            status, response_text
        ))),
    }
}

/// Produces a ready client from the settings.
///
/// A password always triggers a fresh login, whose token is written back
/// into `settings`; otherwise a stored token is reused.
pub async fn open_session(
    settings: &mut Settings,
    password: Option<&str>,
) -> Result<AbsClient, ApiError> {
    let client = AbsClient::new(&settings.server_url);

    match (password, settings.username.clone()) {
        (Some(password), Some(username)) => {
            let mut client = client;
            let login = client.authenticate(&username, password).await?;
            settings.token = Some(login.user.token);
            Ok(client)
        }
        (Some(_), None) => Err(ApiError::Authentication(
            "Password provided but no username specified".to_string(),
        )),
        (None, _) => match &settings.token {
            Some(token) => {
                info!("Using stored token for authentication.");
                Ok(client.with_token(token))
            }
            None => Err(ApiError::Authentication(
                "No password or stored token available".to_string(),
            )),
        },
    }
}

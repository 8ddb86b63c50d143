//! Authenticated REST client for the media server API

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, Request, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::api::models::LoginResponse;
use crate::api::{ApiError, ApiResponse};

/// Query parameters as sent on the wire
pub type Params<'a> = [(&'a str, String)];

/// Client for the media server REST API.
///
/// Holds one bearer token for its whole lifetime. Every verb method returns
/// the response whatever its status; only transport failures are errors.
#[derive(Clone)]
pub struct AbsClient {
    client: Client,
    server_url: String,
    token: Option<String>,
}

impl AbsClient {
    /// Create a new client for the server URL
    pub fn new(server_url: &str) -> Self {
        let client = match Client::builder().build() {
            Ok(client) => client,
            Err(e) => {
                warn!("Error creating HTTP client: {:?}. Falling back to default.", e);
                Client::new()
            }
        };

        let normalized_url = server_url.trim_end_matches('/').to_string();
        debug!("Normalized server URL: {}", normalized_url);

        AbsClient {
            client,
            server_url: normalized_url,
            token: None,
        }
    }

    /// Set a bearer token obtained earlier
    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.server_url, path)
    }

    fn ensure_authenticated(&self) -> Result<&str, ApiError> {
        self.token.as_deref().ok_or(ApiError::NotAuthenticated)
    }

    /// Starts a request with the headers every call carries.
    fn request_builder(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self
            .client
            .request(method, self.build_url(path))
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Builds an authenticated request without sending it.
    ///
    /// `None` and an empty parameter slice give the same URL, with no `?`.
    pub fn build_request(
        &self,
        method: Method,
        path: &str,
        params: Option<&Params<'_>>,
        body: Option<&Value>,
    ) -> Result<Request, ApiError> {
        self.ensure_authenticated()?;

        let mut builder = self.request_builder(method, path);
        if let Some(params) = params.filter(|p| !p.is_empty()) {
            builder = builder.query(params);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }
        Ok(builder.build()?)
    }

    async fn execute(&self, request: Request) -> Result<ApiResponse, ApiError> {
        debug!(method = %request.method(), url = %request.url(), "sending request");
        let response = self.client.execute(request).await?;
        let response = ApiResponse::from_response(response).await?;
        debug!(status = %response.status, "request finished");
        Ok(response)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        params: Option<&Params<'_>>,
        body: Option<Value>,
    ) -> Result<ApiResponse, ApiError> {
        let request = self.build_request(method, path, params, body.as_ref())?;
        self.execute(request).await
    }

    fn encode<B: Serialize + ?Sized>(body: &B) -> Result<Value, ApiError> {
        serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))
    }

    /// Log in and keep the returned token for every later call.
    pub async fn authenticate(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<LoginResponse, ApiError> {
        info!("Authenticating user: {}", username);
        let login =
            crate::api::auth::login(&self.client, &self.server_url, username, password).await?;
        info!("Authentication successful for user: {}", username);
        self.token = Some(login.user.token.clone());
        Ok(login)
    }

    /// `GET /ping`; needs no token.
    pub async fn ping(&self) -> Result<ApiResponse, ApiError> {
        let request = self.request_builder(Method::GET, "/ping").build()?;
        self.execute(request).await
    }

    pub async fn get(&self, path: &str, params: Option<&Params<'_>>) -> Result<ApiResponse, ApiError> {
        self.send(Method::GET, path, params, None).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<ApiResponse, ApiError> {
        let body = Self::encode(body)?;
        self.send(Method::POST, path, None, Some(body)).await
    }

    pub async fn patch<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<ApiResponse, ApiError> {
        let body = Self::encode(body)?;
        self.send(Method::PATCH, path, None, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.send(Method::DELETE, path, None, None).await
    }

    /// Sends an arbitrary request, for the `request` command.
    pub async fn raw(
        &self,
        method: Method,
        path: &str,
        params: Option<&Params<'_>>,
        body: Option<Value>,
    ) -> Result<ApiResponse, ApiError> {
        self.send(method, path, params, body).await
    }
}

//! LeadFlow API client implementation
//!
//! Every request goes through [`LeadflowClient::send`], which attaches the
//! session's access token as a bearer credential. A 401 is answered once by
//! exchanging the refresh token for a new access token and replaying the
//! request; a second 401 is returned to the caller. If the exchange fails the
//! session is ended with [`SessionEvent::Expired`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client as HttpClient, Method, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use super::api::{AuthApi, LeadApi};
use super::models::{
    AccessToken, Lead, LeadDraft, LeadFilter, LeadList, LeadStats, LoginRequest, RefreshRequest,
    SignupRequest, TokenPair, User,
};
use crate::error::{ApiError, Result};
use crate::session::{Session, SessionEvent};

/// Request timeout applied by the underlying HTTP client
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Token refresh endpoint, relative to the API root
const REFRESH_PATH: &str = "/auth/token/refresh/";

/// An outbound call that may be replayed once after a token refresh
#[derive(Debug, Clone)]
pub struct PendingRequest {
    method: Method,
    path: String,
    query: Vec<(&'static str, String)>,
    body: Option<serde_json::Value>,
    retried: bool,
}

impl PendingRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            retried: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn with_query(mut self, query: Vec<(&'static str, String)>) -> Self {
        self.query = query;
        self
    }

    /// Attach a JSON body
    pub fn with_json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn is_retried(&self) -> bool {
        self.retried
    }
}

/// LeadFlow API client
pub struct LeadflowClient {
    http: HttpClient,
    base_url: String,
    session: Arc<Session>,
    refresh_lock: Mutex<()>,
}

impl LeadflowClient {
    /// Create a client for the API rooted at `base_url` (e.g. `http://host/api`)
    pub fn new(base_url: impl Into<String>, session: Arc<Session>) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
            refresh_lock: Mutex::new(()),
        })
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send an authenticated request.
    ///
    /// Returns the first response that is not a 401. Non-401 error statuses
    /// are returned as responses, untouched; see [`check_status`].
    pub async fn send(&self, mut request: PendingRequest) -> Result<Response> {
        loop {
            let token = self.session.access_token().await;
            let response = self.dispatch(&request, token.as_deref()).await?;

            if response.status() != StatusCode::UNAUTHORIZED {
                return Ok(response);
            }

            if request.is_retried() {
                warn!(
                    "{} {} still unauthorized after token refresh",
                    request.method, request.path
                );
                return Err(ApiError::Unauthorized.into());
            }

            request.retried = true;
            self.recover_session(token.as_deref()).await?;
        }
    }

    /// Obtain a usable access token after `stale` was rejected.
    ///
    /// Refreshes are serialized. When another request already replaced the
    /// stale token, its result is reused instead of refreshing again.
    async fn recover_session(&self, stale: Option<&str>) -> Result<()> {
        let _guard = self.refresh_lock.lock().await;

        let tokens = self.session.snapshot().await;
        if tokens.access_token.is_some() && tokens.access_token.as_deref() != stale {
            debug!("Access token was refreshed concurrently; retrying with it");
            return Ok(());
        }

        let Some(refresh) = tokens.refresh_token else {
            debug!("No refresh token stored; returning 401");
            return Err(ApiError::Unauthorized.into());
        };

        debug!("Access token rejected; refreshing");
        match self.exchange_refresh_token(refresh).await {
            Ok(access) => {
                self.session.replace_access(access).await?;
                Ok(())
            }
            Err(err) => {
                warn!("Token refresh failed, ending session: {}", err);
                if let Err(store_err) = self.session.end(SessionEvent::Expired).await {
                    warn!("Could not remove stored tokens: {}", store_err);
                }
                Err(ApiError::RefreshFailed(err.to_string()).into())
            }
        }
    }

    /// `POST /auth/token/refresh/` without a bearer credential
    async fn exchange_refresh_token(
        &self,
        refresh: String,
    ) -> std::result::Result<String, ApiError> {
        let url = format!("{}{}", self.base_url, REFRESH_PATH);
        let response = self
            .http
            .post(&url)
            .json(&RefreshRequest { refresh })
            .send()
            .await?;

        let response = check_status(response).await?;
        let token: AccessToken = response.json().await.map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse refresh response: {}", e))
        })?;

        Ok(token.access)
    }

    /// Put a single request on the wire
    async fn dispatch(&self, request: &PendingRequest, token: Option<&str>) -> Result<Response> {
        let url = format!("{}{}", self.base_url, request.path);
        debug!(
            "{} {}{}",
            request.method,
            request.path,
            if request.is_retried() { " (retry)" } else { "" }
        );

        let mut builder = self.http.request(request.method.clone(), &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(ApiError::from)?;
        debug!("{} {} -> {}", request.method, request.path, response.status());
        Ok(response)
    }

    /// Authenticated request with a JSON response body
    async fn request_json<T: DeserializeOwned>(&self, request: PendingRequest) -> Result<T> {
        let response = check_status(self.send(request).await?).await?;
        let data = response.json::<T>().await.map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse response: {}", e))
        })?;
        Ok(data)
    }

    /// Authenticated request whose response body is ignored
    async fn request_empty(&self, request: PendingRequest) -> Result<()> {
        check_status(self.send(request).await?).await?;
        Ok(())
    }

    /// Credential exchange for login and signup.
    ///
    /// These calls carry no bearer token and bypass the refresh protocol, so a
    /// 401 here means the credentials were rejected.
    async fn exchange_credentials<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<TokenPair> {
        let request = PendingRequest::new(Method::POST, path).with_json(body)?;
        let response = self.dispatch(&request, None).await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(ApiError::InvalidCredentials.into());
        }

        let pair: TokenPair = check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse tokens: {}", e)))?;

        self.session
            .establish(pair.access.clone(), pair.refresh.clone())
            .await?;
        Ok(pair)
    }
}

/// Turn an error status into a typed error, passing successes through
pub async fn check_status(response: Response) -> std::result::Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match status {
        StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
        StatusCode::FORBIDDEN => Err(ApiError::Forbidden),
        StatusCode::NOT_FOUND => {
            let error_msg = response
                .text()
                .await
                .unwrap_or_else(|_| "Resource not found".to_string());
            Err(ApiError::NotFound(error_msg))
        }
        StatusCode::TOO_MANY_REQUESTS => {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(60);
            Err(ApiError::RateLimit(Duration::from_secs(retry_after)))
        }
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            let error_msg = response
                .text()
                .await
                .unwrap_or_else(|_| "Bad request".to_string());
            Err(ApiError::BadRequest(error_msg))
        }
        status if status.is_server_error() => {
            let error_msg = response
                .text()
                .await
                .unwrap_or_else(|_| format!("Server error: {}", status));
            Err(ApiError::ServerError(error_msg))
        }
        _ => Err(ApiError::InvalidResponse(format!(
            "Unexpected status code: {}",
            status
        ))),
    }
}

#[async_trait]
impl AuthApi for LeadflowClient {
    async fn signup(&self, username: &str, email: &str, password: &str) -> Result<TokenPair> {
        let body = SignupRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        self.exchange_credentials("/auth/signup/", &body).await
    }

    async fn login(&self, username: &str, password: &str) -> Result<TokenPair> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.exchange_credentials("/auth/login/", &body).await
    }

    async fn logout(&self) -> Result<()> {
        self.session.end(SessionEvent::SignedOut).await
    }

    async fn is_authenticated(&self) -> bool {
        self.session.is_authenticated().await
    }

    async fn current_user(&self) -> Result<User> {
        self.request_json(PendingRequest::get("/auth/user/")).await
    }
}

#[async_trait]
impl LeadApi for LeadflowClient {
    async fn list_leads(&self, filter: &LeadFilter) -> Result<Vec<Lead>> {
        let request = PendingRequest::get("/leads/").with_query(filter.to_query_params());
        let list: LeadList = self.request_json(request).await?;
        Ok(list.into())
    }

    async fn get_lead(&self, id: u64) -> Result<Lead> {
        self.request_json(PendingRequest::get(format!("/leads/{}/", id)))
            .await
    }

    async fn create_lead(&self, draft: &LeadDraft) -> Result<Lead> {
        let request = PendingRequest::new(Method::POST, "/leads/").with_json(draft)?;
        self.request_json(request).await
    }

    async fn update_lead(&self, id: u64, draft: &LeadDraft) -> Result<Lead> {
        let request = PendingRequest::new(Method::PUT, format!("/leads/{}/", id)).with_json(draft)?;
        self.request_json(request).await
    }

    async fn delete_lead(&self, id: u64) -> Result<()> {
        self.request_empty(PendingRequest::delete(format!("/leads/{}/", id)))
            .await
    }

    async fn lead_stats(&self) -> Result<LeadStats> {
        self.request_json(PendingRequest::get("/leads/stats/")).await
    }

    async fn recent_leads(&self) -> Result<Vec<Lead>> {
        let list: LeadList = self
            .request_json(PendingRequest::get("/leads/recent/"))
            .await?;
        Ok(list.into())
    }
}

//! REST client for the wallet backend.
//!
//! ARCHITECTURE
//! ============
//! Every request goes through one pipeline: build URL → [`ApiClient::authorize`]
//! (attach `Authorization: Bearer <token>` when the session holds one) → send →
//! map status → decode. Login and register go through the same step; with no
//! session they simply carry no header.
//!
//! ERROR HANDLING
//! ==============
//! All operations return `Result<_, ApiError>`. A 401 on a protected endpoint
//! ends the session here, centrally, so no view can keep rendering with a
//! credential the backend has already rejected.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::path::Path;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ApiError;
use super::types::{
    Bank, DepositResponse, LoginResponse, Registration, Transaction, TransactionList, TransferRequest, User,
};
use crate::config::{ApiTimeouts, WalletConfig};
use crate::state::session::SessionStore;

pub(crate) const LOGIN_PATH: &str = "/auth/login/";
pub(crate) const REGISTER_PATH: &str = "/auth/register/";
pub(crate) const CURRENT_USER_PATH: &str = "/auth/users/me/";
pub(crate) const BANKS_PATH: &str = "/banking/banks/";
pub(crate) const TRANSFER_PATH: &str = "/banking/monnify/transfer/";
pub(crate) const DEPOSIT_PATH: &str = "/banking/monnify/deposit/";

pub(crate) fn transactions_path(user_id: &str) -> String {
    format!("/banking/transactions/{user_id}")
}

/// Whether a 401 from this endpoint means the session credential is dead.
/// On the sign-in endpoints a 401 only means the submitted form was wrong.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Access {
    Public,
    Protected,
}

/// A request that has been through the authorization step.
struct Outbound {
    builder: RequestBuilder,
    path: String,
    access: Access,
    /// Token attached to this request, if any.
    bearer: Option<String>,
}

impl Outbound {
    fn with(self, f: impl FnOnce(RequestBuilder) -> RequestBuilder) -> Self {
        let Self { builder, path, access, bearer } = self;
        Self { builder: f(builder), path, access, bearer }
    }
}

/// Bearer-authenticated client for the wallet backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionStore,
}

impl ApiClient {
    /// Build a client for `base_url` that reads credentials from `session`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::HttpClientBuild`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeouts: ApiTimeouts, session: SessionStore) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_owned(), session })
    }

    /// Build a client from parsed config.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::HttpClientBuild`] if the HTTP client cannot be built.
    pub fn from_config(config: &WalletConfig, session: SessionStore) -> Result<Self, ApiError> {
        Self::new(&config.base_url, config.timeouts, session)
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =========================================================================
    // AUTH
    // =========================================================================

    /// `POST /auth/login/` with form fields `username` and `password`.
    ///
    /// Does not touch the session; see [`ApiClient::sign_in`].
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or credentials are rejected.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let outbound = self
            .request(Method::POST, LOGIN_PATH, Access::Public)
            .with(|b| b.form(&[("username", email), ("password", password)]));
        self.send_json(outbound).await
    }

    /// Log in and store the returned token in the session.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if login fails or the token cannot be persisted.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<(), ApiError> {
        let response = self.login(email, password).await?;
        self.session.set_token(response.access_token)?;
        Ok(())
    }

    /// `POST /auth/register/` as multipart, attaching the profile picture
    /// when one is given.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the picture cannot be read or the backend
    /// rejects the registration.
    pub async fn register(&self, registration: &Registration) -> Result<Value, ApiError> {
        let mut form = Form::new()
            .text("name", registration.name.clone())
            .text("email", registration.email.clone())
            .text("phone", registration.phone.clone())
            .text("password", registration.password.clone());
        if let Some(path) = &registration.profile_image {
            form = form.part("profile_image", image_part(path).await?);
        }

        let outbound = self
            .request(Method::POST, REGISTER_PATH, Access::Public)
            .with(|b| b.multipart(form));
        self.send_value(outbound).await
    }

    /// `GET /auth/users/me/`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the session is rejected.
    pub async fn current_user(&self) -> Result<User, ApiError> {
        let outbound = self.request(Method::GET, CURRENT_USER_PATH, Access::Protected);
        self.send_json(outbound).await
    }

    /// Fetch the profile and cache it in the session.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the session is rejected.
    pub async fn refresh_user(&self) -> Result<User, ApiError> {
        let user = self.current_user().await?;
        self.session.set_user(user.clone());
        Ok(user)
    }

    // =========================================================================
    // BANKING
    // =========================================================================

    /// `GET /banking/banks/`. A body that is not a JSON array yields an empty
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or an entry is malformed.
    pub async fn banks(&self) -> Result<Vec<Bank>, ApiError> {
        let outbound = self.request(Method::GET, BANKS_PATH, Access::Protected);
        let value = self.send_value(outbound).await?;
        if !value.is_array() {
            tracing::warn!("bank directory is not an array; treating as empty");
            return Ok(Vec::new());
        }
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// `POST /banking/monnify/transfer/` with the transfer in the query string.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the backend refuses it.
    pub async fn initiate_transfer(&self, transfer: &TransferRequest) -> Result<Value, ApiError> {
        let query = [
            ("amount", transfer.amount.normalize().to_string()),
            ("destination_bank_code", transfer.bank_code.clone()),
            ("destination_account_number", transfer.account_number.clone()),
            ("narration", transfer.narration.clone()),
        ];
        let outbound = self
            .request(Method::POST, TRANSFER_PATH, Access::Protected)
            .with(|b| b.query(&query));
        self.send_value(outbound).await
    }

    /// `POST /banking/monnify/deposit/?amount=..`; returns the payment page.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the backend refuses it.
    pub async fn initiate_deposit(&self, amount: Decimal) -> Result<DepositResponse, ApiError> {
        let query = [("amount", amount.normalize().to_string())];
        let outbound = self
            .request(Method::POST, DEPOSIT_PATH, Access::Protected)
            .with(|b| b.query(&query));
        self.send_json(outbound).await
    }

    /// `GET /banking/transactions/{user_id}`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the list is malformed.
    pub async fn transactions(&self, user_id: &str) -> Result<Vec<Transaction>, ApiError> {
        let outbound = self.request(Method::GET, &transactions_path(user_id), Access::Protected);
        let list: TransactionList = self.send_json(outbound).await?;
        Ok(list.transactions)
    }

    // =========================================================================
    // PIPELINE
    // =========================================================================

    fn request(&self, method: Method, path: &str, access: Access) -> Outbound {
        let url = format!("{}{}", self.base_url, path);
        let (builder, bearer) = self.authorize(self.http.request(method, url));
        Outbound { builder, path: path.to_owned(), access, bearer }
    }

    /// Attach the session's bearer token, if there is one. Returns the token
    /// that was attached.
    fn authorize(&self, builder: RequestBuilder) -> (RequestBuilder, Option<String>) {
        match self.session.token() {
            Some(token) => (builder.bearer_auth(&token), Some(token)),
            None => (builder, None),
        }
    }

    async fn send(&self, outbound: Outbound) -> Result<String, ApiError> {
        let Outbound { builder, path, access, bearer } = outbound;
        tracing::debug!(%path, authorized = bearer.is_some(), "api request");

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if status == 401 {
            tracing::warn!(%path, "backend rejected credentials");
            if access == Access::Protected {
                if let Some(sent) = bearer {
                    // Only end the session the request was made with.
                    if self.session.token().as_deref() == Some(sent.as_str()) {
                        self.session.invalidate(&format!("401 from {path}"));
                    }
                }
            }
            return Err(ApiError::Unauthorized { status });
        }
        if !(200..300).contains(&status) {
            tracing::warn!(%path, status, "api request failed");
            return Err(ApiError::Status { status, body: text });
        }
        Ok(text)
    }

    async fn send_json<T: DeserializeOwned>(&self, outbound: Outbound) -> Result<T, ApiError> {
        let text = self.send(outbound).await?;
        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Like [`Self::send_json`] for opaque bodies; an empty body is `null`.
    async fn send_value(&self, outbound: Outbound) -> Result<Value, ApiError> {
        let text = self.send(outbound).await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

async fn image_part(path: &Path) -> Result<Part, ApiError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| ApiError::InvalidRequest(format!("cannot read {}: {e}", path.display())))?;
    let file_name = path
        .file_name()
        .map_or_else(|| "profile_image".to_owned(), |name| name.to_string_lossy().into_owned());
    Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(image_mime(path))
        .map_err(|e| ApiError::InvalidRequest(e.to_string()))
}

fn image_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

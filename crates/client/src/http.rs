//! HTTP clients for the VitalFlow API.
//!
//! Two flavours built the same way:
//!
//! - [`ApiClient::plain`] sends requests as-is (public pages, login, register).
//! - [`ApiClient::secure`] attaches `Authorization: Bearer <token>` from a
//!   shared [`TokenStore`]. When the API rejects the token (401 or 403) the
//!   store is cleared and the call fails with [`ClientError::SessionExpired`].
//!
//! Every endpoint has one typed method. List calls take a
//! [`ListQuery`](crate::listing::ListQuery), which already carries the
//! 0-indexed API page.

use std::sync::{Arc, RwLock};

use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use vitalflow_core::blood_group::BloodGroup;
use vitalflow_core::forms::{
    AccountForm, DonationRequestForm, LoginForm, ProfileForm, ProfileUpdateForm,
};
use vitalflow_core::location::{District, LocationDirectory, Upazila};
use vitalflow_core::pagination::Page;
use vitalflow_core::request_status::RequestStatus;
use vitalflow_core::roles::{AccountStatus, Role};
use vitalflow_core::types::DbId;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::listing::ListQuery;
use crate::models::{
    AdminStatsView, AuthSession, DonationRequestView, DonorView, FundingView, MeView,
    PublicDonorView, RequestDetailView, RoleView, TotalFunding,
};

/* --------------------------------------------------------------------------
Token store
-------------------------------------------------------------------------- */

/// Bearer token shared between the secure client and the session service.
#[derive(Debug, Clone, Default)]
pub struct TokenStore {
    inner: Arc<RwLock<Option<String>>>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<String> {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn set(&self, token: impl Into<String>) {
        *self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(token.into());
    }

    pub fn clear(&self) {
        *self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
    }

    pub fn is_set(&self) -> bool {
        self.get().is_some()
    }
}

/* --------------------------------------------------------------------------
Client
-------------------------------------------------------------------------- */

/// `{error, code}` body of every API failure.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(default)]
    code: String,
}

#[derive(Debug, Serialize)]
struct StatusChange<'a> {
    email: &'a str,
    status: AccountStatus,
}

#[derive(Debug, Serialize)]
struct RoleChange<'a> {
    email: &'a str,
    role: Role,
}

#[derive(Debug, Serialize)]
struct StatusUpdate {
    status: RequestStatus,
}

#[derive(Debug, Serialize)]
struct RecordFunding<'a> {
    amount_cents: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    currency: Option<&'a str>,
    transaction_id: &'a str,
}

/// Filters for the public donor search. Blank fields are not sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DonorSearch {
    #[serde(rename = "bloodGroup", skip_serializing_if = "Option::is_none")]
    pub blood_group: Option<BloodGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upazila: Option<String>,
}

/// HTTP client for the VitalFlow API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    tokens: Option<TokenStore>,
}

impl ApiClient {
    /// Client without credentials.
    pub fn plain(config: &ClientConfig) -> Result<Self, ClientError> {
        Ok(Self::with_client(build_http(config)?, &config.base_url, None))
    }

    /// Client that attaches the bearer token held in `tokens`.
    pub fn secure(config: &ClientConfig, tokens: TokenStore) -> Result<Self, ClientError> {
        Ok(Self::with_client(
            build_http(config)?,
            &config.base_url,
            Some(tokens),
        ))
    }

    /// Reuse an existing [`reqwest::Client`] (shared connection pool).
    pub fn with_client(
        client: reqwest::Client,
        base_url: &str,
        tokens: Option<TokenStore>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_secure(&self) -> bool {
        self.tokens.is_some()
    }

    // ---- auth ----

    /// `POST /auth/register`
    pub async fn register(&self, form: &AccountForm) -> Result<AuthSession, ClientError> {
        self.send_json(self.request(Method::POST, "/auth/register").json(form))
            .await
    }

    /// `POST /auth/login`
    pub async fn login(&self, form: &LoginForm) -> Result<AuthSession, ClientError> {
        self.send_json(self.request(Method::POST, "/auth/login").json(form))
            .await
    }

    /// `DELETE /auth/account`
    pub async fn delete_account(&self) -> Result<(), ClientError> {
        self.send(self.request(Method::DELETE, "/auth/account"))
            .await
            .map(drop)
    }

    /// `GET /auth/me`
    pub async fn me(&self) -> Result<MeView, ClientError> {
        self.send_json(self.request(Method::GET, "/auth/me")).await
    }

    // ---- donors ----

    /// `POST /donor`
    pub async fn create_profile(&self, form: &ProfileForm) -> Result<DonorView, ClientError> {
        self.send_json(self.request(Method::POST, "/donor").json(form))
            .await
    }

    /// `GET /donor?page=&size=&filter=`
    pub async fn list_donors(&self, query: &ListQuery) -> Result<Page<DonorView>, ClientError> {
        self.send_json(self.request(Method::GET, "/donor").query(query))
            .await
    }

    /// `GET /donor/role/{email}`
    pub async fn role_of(&self, email: &str) -> Result<RoleView, ClientError> {
        self.send_json(self.request_segments(Method::GET, &["donor", "role", email])?)
            .await
    }

    /// `PATCH /donor/update/{email}`
    pub async fn update_profile(
        &self,
        email: &str,
        form: &ProfileUpdateForm,
    ) -> Result<DonorView, ClientError> {
        form.validate()?;
        self.send_json(
            self.request_segments(Method::PATCH, &["donor", "update", email])?
                .json(form),
        )
        .await
    }

    /// `PATCH /update/donor/status`
    pub async fn update_donor_status(
        &self,
        email: &str,
        status: AccountStatus,
    ) -> Result<DonorView, ClientError> {
        self.send_json(
            self.request(Method::PATCH, "/update/donor/status")
                .json(&StatusChange { email, status }),
        )
        .await
    }

    /// `PATCH /update/donor/role`
    pub async fn update_donor_role(
        &self,
        email: &str,
        role: Role,
    ) -> Result<DonorView, ClientError> {
        self.send_json(
            self.request(Method::PATCH, "/update/donor/role")
                .json(&RoleChange { email, role }),
        )
        .await
    }

    /// `GET /search-donors?bloodGroup=&district=&upazila=`
    pub async fn search_donors(
        &self,
        search: &DonorSearch,
    ) -> Result<Vec<PublicDonorView>, ClientError> {
        self.send_json(self.request(Method::GET, "/search-donors").query(search))
            .await
    }

    // ---- donation requests ----

    /// `POST /requests`
    pub async fn create_request(
        &self,
        form: &DonationRequestForm,
    ) -> Result<DonationRequestView, ClientError> {
        form.validate()?;
        self.send_json(self.request(Method::POST, "/requests").json(form))
            .await
    }

    /// `GET /requests/{id}`
    pub async fn get_request(&self, id: DbId) -> Result<RequestDetailView, ClientError> {
        self.send_json(self.request(Method::GET, &format!("/requests/{id}")))
            .await
    }

    /// `GET /requests?limit=`
    pub async fn recent_requests(
        &self,
        limit: Option<i64>,
    ) -> Result<Vec<DonationRequestView>, ClientError> {
        let mut builder = self.request(Method::GET, "/requests");
        if let Some(limit) = limit {
            builder = builder.query(&[("limit", limit)]);
        }
        self.send_json(builder).await
    }

    /// `GET /urgent-requests?bloodGroup=`
    pub async fn urgent_requests(
        &self,
        blood_group: Option<BloodGroup>,
    ) -> Result<Vec<DonationRequestView>, ClientError> {
        let mut builder = self.request(Method::GET, "/urgent-requests");
        if let Some(group) = blood_group {
            builder = builder.query(&[("bloodGroup", group.as_str())]);
        }
        self.send_json(builder).await
    }

    /// `PATCH /update-request/{id}`
    pub async fn update_request(
        &self,
        id: DbId,
        form: &DonationRequestForm,
    ) -> Result<DonationRequestView, ClientError> {
        form.validate()?;
        self.send_json(
            self.request(Method::PATCH, &format!("/update-request/{id}"))
                .json(form),
        )
        .await
    }

    /// `PATCH /update-donation-status/{id}`
    pub async fn update_donation_status(
        &self,
        id: DbId,
        status: RequestStatus,
    ) -> Result<DonationRequestView, ClientError> {
        self.send_json(
            self.request(Method::PATCH, &format!("/update-donation-status/{id}"))
                .json(&StatusUpdate { status }),
        )
        .await
    }

    /// `GET /my-request?page=&size=&filter=`
    pub async fn my_requests(
        &self,
        query: &ListQuery,
    ) -> Result<Page<DonationRequestView>, ClientError> {
        self.send_json(self.request(Method::GET, "/my-request").query(query))
            .await
    }

    /// `GET /my-recent-requests`
    pub async fn my_recent_requests(&self) -> Result<Vec<DonationRequestView>, ClientError> {
        self.send_json(self.request(Method::GET, "/my-recent-requests"))
            .await
    }

    /// `GET /all-requests?page=&size=&filter=`
    pub async fn all_requests(
        &self,
        query: &ListQuery,
    ) -> Result<Page<DonationRequestView>, ClientError> {
        self.send_json(self.request(Method::GET, "/all-requests").query(query))
            .await
    }

    /// `DELETE /delete-request/{id}`
    pub async fn delete_request(&self, id: DbId) -> Result<(), ClientError> {
        self.send(self.request(Method::DELETE, &format!("/delete-request/{id}")))
            .await
            .map(drop)
    }

    /// `DELETE /admin/delete-request/{id}`
    pub async fn admin_delete_request(&self, id: DbId) -> Result<(), ClientError> {
        self.send(self.request(Method::DELETE, &format!("/admin/delete-request/{id}")))
            .await
            .map(drop)
    }

    // ---- fundings ----

    /// `POST /fundings` after the payment provider confirmed the charge.
    pub async fn record_funding(
        &self,
        amount_cents: i64,
        currency: Option<&str>,
        transaction_id: &str,
    ) -> Result<FundingView, ClientError> {
        let body = RecordFunding {
            amount_cents,
            currency,
            transaction_id,
        };
        self.send_json(self.request(Method::POST, "/fundings").json(&body))
            .await
    }

    /// `GET /fundings?page=&size=`
    pub async fn fundings(&self, query: &ListQuery) -> Result<Page<FundingView>, ClientError> {
        self.send_json(self.request(Method::GET, "/fundings").query(query))
            .await
    }

    /// `GET /total-funding`, in minor units.
    pub async fn total_funding(&self) -> Result<i64, ClientError> {
        let total: TotalFunding = self
            .send_json(self.request(Method::GET, "/total-funding"))
            .await?;
        Ok(total.total)
    }

    /// `GET /admin-stats`
    pub async fn admin_stats(&self) -> Result<AdminStatsView, ClientError> {
        self.send_json(self.request(Method::GET, "/admin-stats"))
            .await
    }

    // ---- static location data ----

    /// `GET /districts.json`
    pub async fn districts(&self) -> Result<Vec<District>, ClientError> {
        self.send_json(self.request(Method::GET, "/districts.json"))
            .await
    }

    /// `GET /upazilas.json`
    pub async fn upazilas(&self) -> Result<Vec<Upazila>, ClientError> {
        self.send_json(self.request(Method::GET, "/upazilas.json"))
            .await
    }

    /// Both location files as one lookup for the pickers.
    pub async fn locations(&self) -> Result<LocationDirectory, ClientError> {
        let districts = self.districts().await?;
        let upazilas = self.upazilas().await?;
        Ok(LocationDirectory::new(districts, upazilas))
    }

    // ---- private helpers ----

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.authorize(
            self.client
                .request(method, format!("{}{}", self.base_url, path)),
        )
    }

    /// Request whose path is built from user-supplied segments, such as an
    /// email that may contain `#`, `?` or `/`.
    fn request_segments(
        &self,
        method: Method,
        segments: &[&str],
    ) -> Result<RequestBuilder, ClientError> {
        let url = segment_url(&self.base_url, segments)?;
        Ok(self.authorize(self.client.request(method, url)))
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.tokens.as_ref().and_then(TokenStore::get) {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send and ensure a success status.
    ///
    /// On the secure client a 401 or 403 clears the stored token.
    async fn send(&self, builder: RequestBuilder) -> Result<Response, ClientError> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if let Some(tokens) = &self.tokens {
            if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
                tracing::warn!(
                    status = status.as_u16(),
                    url = %response.url(),
                    "Bearer token rejected, signing out",
                );
                tokens.clear();
                return Err(ClientError::SessionExpired);
            }
        }

        Err(Self::api_error(response).await)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = self.send(builder).await?;
        Ok(response.json::<T>().await?)
    }

    /// Turn a non-2xx response into [`ClientError::Api`].
    async fn api_error(response: Response) -> ClientError {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());

        match serde_json::from_str::<ErrorBody>(&body) {
            Ok(parsed) => ClientError::Api {
                status,
                code: parsed.code,
                message: parsed.error,
            },
            Err(_) => ClientError::Api {
                status,
                code: String::new(),
                message: body,
            },
        }
    }
}

fn build_http(config: &ClientConfig) -> Result<reqwest::Client, ClientError> {
    Ok(reqwest::Client::builder().timeout(config.timeout).build()?)
}

/// Append percent-encoded path segments to `base`.
fn segment_url(base: &str, segments: &[&str]) -> Result<Url, ClientError> {
    let mut url = Url::parse(base)
        .map_err(|e| ClientError::Config(format!("invalid API base URL {base}: {e}")))?;
    url.path_segments_mut()
        .map_err(|()| ClientError::Config(format!("API base URL {base} cannot take a path")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

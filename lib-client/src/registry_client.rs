//! Off-chain registry port and its HTTP client

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use lib_types::{
    ErrorResponse, InvestRequest, InvestResponse, InvestmentRecord, ReferralValidation,
    RegisterRequest, RegisterResponse, UserLookup, UserRecord, WalletAddress,
};

use crate::error::{ClientError, Result};

/// Registry operations the client depends on
#[async_trait]
pub trait RegistryPort: Send + Sync {
    async fn lookup_user(&self, wallet: &WalletAddress) -> Result<UserLookup>;

    async fn validate_referral(&self, referrer: &WalletAddress) -> Result<ReferralValidation>;

    async fn register(&self, wallet: &WalletAddress, referrer: &WalletAddress) -> Result<UserRecord>;

    async fn record_investment(&self, request: &InvestRequest) -> Result<InvestmentRecord>;
}

/// JSON-over-HTTP registry client
///
/// `base_url` includes the `/api` prefix, e.g. `http://localhost:5000/api`.
#[derive(Debug, Clone)]
pub struct HttpRegistryClient {
    base_url: String,
    http: reqwest::Client,
}

fn unavailable(err: reqwest::Error) -> ClientError {
    ClientError::Unavailable {
        what: "registry",
        reason: err.to_string(),
    }
}

impl HttpRegistryClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        let body = response.bytes().await.map_err(unavailable)?;

        if status.is_success() {
            return Ok(serde_json::from_slice(&body)?);
        }

        let message = serde_json::from_slice::<ErrorResponse>(&body)
            .map(|e| e.error)
            .unwrap_or_else(|_| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            });
        Err(ClientError::Registry {
            status: status.as_u16(),
            message,
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        debug!(url = %self.url(path), "registry GET");
        let response = self.http.get(self.url(path)).send().await.map_err(unavailable)?;
        Self::decode(response).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: serde::Serialize + Sync,
        T: DeserializeOwned,
    {
        debug!(url = %self.url(path), "registry POST");
        let response = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(unavailable)?;
        Self::decode(response).await
    }
}

fn missing_payload(what: &'static str) -> ClientError {
    ClientError::Registry {
        status: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
        message: format!("response carried no {}", what),
    }
}

#[async_trait]
impl RegistryPort for HttpRegistryClient {
    async fn lookup_user(&self, wallet: &WalletAddress) -> Result<UserLookup> {
        self.get(&format!("/users/{}", wallet)).await
    }

    async fn validate_referral(&self, referrer: &WalletAddress) -> Result<ReferralValidation> {
        self.get(&format!("/referral/{}", referrer)).await
    }

    async fn register(&self, wallet: &WalletAddress, referrer: &WalletAddress) -> Result<UserRecord> {
        let request = RegisterRequest {
            wallet_address: Some(wallet.to_string()),
            referrer_address: Some(referrer.to_string()),
        };
        let response: RegisterResponse = self.post("/register", &request).await?;
        response.user.ok_or_else(|| missing_payload("user"))
    }

    async fn record_investment(&self, request: &InvestRequest) -> Result<InvestmentRecord> {
        let response: InvestResponse = self.post("/invest", request).await?;
        response.investment.ok_or_else(|| missing_payload("investment"))
    }
}

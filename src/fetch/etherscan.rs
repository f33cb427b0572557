//! Remote ABI lookup via an Etherscan-style API

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

const DEFAULT_BASE_URL: &str = "https://api.etherscan.io/api";

/// Failure classes for one lookup attempt. Transport problems and rejected
/// lookups are transient (the API rate-limits and flakes); a payload that
/// arrives with a success status but is not valid JSON will not improve on
/// retry.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("lookup rejected for {address}: {message}")]
    Rejected { address: String, message: String },
    #[error("ABI payload is not valid JSON: {0}")]
    BadPayload(#[source] serde_json::Error),
}

impl FetchError {
    pub fn is_transient(&self) -> bool {
        !matches!(self, Self::BadPayload(_))
    }
}

/// A source of contract ABIs. The production implementation talks to the
/// Etherscan API; tests inject a fake.
#[async_trait]
pub trait AbiSource: Send + Sync {
    async fn fetch_abi(&self, chain_id: u64, address: &str) -> Result<Value, FetchError>;
}

/// Etherscan getabi response. On success `result` is a JSON-encoded string
/// holding the ABI array; on failure it carries an error message.
#[derive(Debug, Deserialize)]
struct LookupResponse {
    status: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    result: String,
}

/// ABI lookups against the Etherscan `contract/getabi` endpoint.
pub struct EtherscanClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl EtherscanClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("Failed to create HTTP client"),
            base_url,
            api_key,
        }
    }
}

#[async_trait]
impl AbiSource for EtherscanClient {
    async fn fetch_abi(&self, chain_id: u64, address: &str) -> Result<Value, FetchError> {
        let url = format!(
            "{}?module=contract&action=getabi&address={}&chainid={}&apikey={}",
            self.base_url, address, chain_id, self.api_key
        );

        let response = self.http.get(&url).send().await?;
        let data: LookupResponse = response.json().await?;

        if data.status != "1" {
            let message = if data.result.is_empty() {
                data.message
            } else {
                data.result
            };
            return Err(FetchError::Rejected {
                address: address.to_string(),
                message,
            });
        }

        // The ABI is double-encoded: result is itself a JSON string.
        serde_json::from_str(&data.result).map_err(FetchError::BadPayload)
    }
}

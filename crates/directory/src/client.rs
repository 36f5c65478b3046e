//! REST client for the cost-center entity set.
//!
//! Wraps the controlling master-data OData API using [`reqwest`]. Codes are
//! looked up verbatim first, then widened by left-zero-padding up to the
//! canonical 10 digits before the lookup is reported as a miss.

use async_trait::async_trait;
use serde::Deserialize;

use ssp_core::costcenter::{CostCenterDetails, CostCenterDirectory, LookupError};

/// Canonical cost-center code length; padding stops here.
const FULL_CODE_LEN: usize = 10;

/// HTTP client for the cost-center directory.
pub struct DirectoryClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// Errors from the directory REST layer.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The directory returned a non-2xx status code.
    #[error("Directory API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// OData v2 JSON envelope: `{ "d": { "results": [ ... ] } }`.
#[derive(Debug, Deserialize)]
struct ODataEnvelope {
    d: ODataBody,
}

#[derive(Debug, Deserialize)]
struct ODataBody {
    #[serde(default)]
    results: Vec<CostCenterEntity>,
}

#[derive(Debug, Deserialize)]
struct CostCenterEntity {
    #[serde(rename = "CostCenter", default)]
    cost_center: String,
    #[serde(rename = "Name3", default)]
    name3: String,
    #[serde(rename = "Name4", default)]
    name4: String,
    #[serde(rename = "Department", default)]
    department: String,
    #[serde(rename = "Responsible", default)]
    responsible: String,
    #[serde(rename = "ResponsibleOrgOffice", default)]
    responsible_org_office: String,
}

impl From<CostCenterEntity> for CostCenterDetails {
    fn from(entity: CostCenterEntity) -> Self {
        CostCenterDetails {
            cost_center: entity.cost_center,
            name3: entity.name3,
            name4: entity.name4,
            department: entity.department,
            responsible: entity.responsible,
            responsible_org_office: entity.responsible_org_office,
        }
    }
}

impl DirectoryClient {
    /// Create a new directory client.
    ///
    /// * `base_url` - Base URL of the cost-center service, up to and
    ///   excluding `/CostCenterEntitySet`.
    /// * `api_key` - Value for the `KeyId` header.
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: String, api_key: String) -> Self {
        Self {
            client,
            base_url,
            api_key,
        }
    }

    /// Query the entity set for a single exact code.
    async fn fetch(&self, code: &str) -> Result<Option<CostCenterDetails>, DirectoryApiError> {
        let url = format!(
            "{}/CostCenterEntitySet?$filter=CostCenter eq '{code}'&$format=json",
            self.base_url
        );

        let response = self
            .client
            .get(url)
            .header("KeyId", &self.api_key)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DirectoryApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: ODataEnvelope = response.json().await?;
        Ok(envelope.d.results.into_iter().next().map(Into::into))
    }
}

#[async_trait]
impl CostCenterDirectory for DirectoryClient {
    /// Resolve a cost-center code with the widening retry.
    ///
    /// User-entered codes are often missing leading zeros; each miss pads
    /// one more zero until the code reaches its canonical 10 digits.
    async fn lookup(&self, code: &str) -> Result<Option<CostCenterDetails>, LookupError> {
        let mut candidate = code.trim().to_uppercase();
        if candidate.is_empty() {
            return Ok(None);
        }

        while candidate.len() <= FULL_CODE_LEN {
            match self.fetch(&candidate).await {
                Ok(Some(details)) => {
                    tracing::debug!(code = %candidate, "Cost center resolved");
                    return Ok(Some(details));
                }
                Ok(None) => {
                    candidate = format!("0{candidate}");
                }
                Err(err) => {
                    tracing::warn!(code = %candidate, error = %err, "Directory lookup failed");
                    return Err(LookupError(err.to_string()));
                }
            }
        }

        tracing::debug!(code = %code, "Cost center not found after widening retry");
        Ok(None)
    }
}

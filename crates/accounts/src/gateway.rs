use async_trait::async_trait;
use serde::Deserialize;
use shared::config::GatewayConfig;
use shared::models::Account;
use shared::{Error, Result};
use std::time::Duration;
use tracing::debug;

/// Single-attempt read against the external accounts gateway.
///
/// Implementations make exactly one outbound call per invocation; retries and
/// cache fallback are the coordinator's business.
#[async_trait]
pub trait AccountGateway: Send + Sync {
    async fn fetch_accounts(&self, customer_id: &str) -> Result<Vec<Account>>;
}

// Gateway response structures. The gateway returns one account record under a
// fixed "account" key; any other shape is a failure.
#[derive(Debug, Deserialize)]
struct GatewayResponse {
    account: GatewayAccount,
}

#[derive(Debug, Deserialize)]
struct GatewayAccount {
    iban: String,
    #[serde(rename = "type")]
    account_type: String,
    balance: String,
    currency: Option<String>,
}

const DEFAULT_CURRENCY: &str = "JOD";

/// Maps a raw gateway record into the internal account shape, or fails.
/// Never produces a partially populated account.
fn map_account(raw: GatewayAccount, customer_id: &str) -> Result<Account> {
    if raw.iban.trim().is_empty() {
        return Err(Error::Gateway("account record has an empty iban".to_string()));
    }
    if raw.balance.parse::<f64>().is_err() {
        return Err(Error::Gateway(format!(
            "account balance is not numeric: {}",
            raw.balance
        )));
    }

    Ok(Account {
        iban: raw.iban,
        account_type: raw.account_type,
        currency: raw.currency.unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
        balance: raw.balance,
        customer_id: customer_id.to_string(),
    })
}

pub struct HttpAccountGateway {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpAccountGateway {
    pub fn new(config: &GatewayConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        }
    }
}

#[async_trait]
impl AccountGateway for HttpAccountGateway {
    async fn fetch_accounts(&self, customer_id: &str) -> Result<Vec<Account>> {
        if customer_id.trim().is_empty() {
            return Err(Error::Validation(
                "customer id must not be empty".to_string(),
            ));
        }

        debug!("Fetching accounts for customer {}", customer_id);

        let response = self
            .client
            .get(&self.base_url)
            .header("x-customer-id", customer_id)
            .header("x-api-key", &self.api_key)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::Gateway(format!("accounts gateway timed out: {}", e))
                } else {
                    Error::Gateway(format!("accounts gateway request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Gateway(format!(
                "accounts gateway returned {}",
                status
            )));
        }

        let payload: GatewayResponse = response
            .json()
            .await
            .map_err(|e| Error::Gateway(format!("malformed accounts payload: {}", e)))?;

        let account = map_account(payload.account, customer_id)?;
        Ok(vec![account])
    }
}

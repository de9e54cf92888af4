use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::ProviderError;
use crate::api::read_json;

pub const PROVIDER_NAME: &str = "Birdeye";

#[derive(Debug, Clone)]
pub struct BirdeyeClient {
    base_url: String,
    api_key: Option<String>,
    client: Client,
}

// --- Response Structs ---

// Structure for the /defi/token_overview endpoint response
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct TokenOverviewResponse {
    pub data: Option<TokenOverviewData>,
    pub success: Option<bool>,
}

// Birdeye has renamed several overview fields over time (`mc` vs `marketCap`,
// `holder` vs `holders`, `extensions` vs `socials`). Both spellings are kept
// as separate fields so a payload carrying both still deserializes.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TokenOverviewData {
    // Core Info
    pub address: Option<String>,
    pub name: Option<String>,
    pub symbol: Option<String>,

    // Market Data
    pub price: Option<Value>,
    pub market_cap: Option<Value>,
    pub mc: Option<Value>,
    #[serde(rename = "volume24h")]
    pub volume_24h: Option<Value>,
    #[serde(rename = "v24hUSD")]
    pub v24h_usd: Option<Value>,
    pub holders: Option<Value>,
    pub holder: Option<Value>,

    // Social links, keyed by network ("twitter", "telegram", "website", ...)
    pub socials: Option<Map<String, Value>>,
    pub extensions: Option<Map<String, Value>>,
}

impl TokenOverviewData {
    pub fn market_cap(&self) -> Option<&Value> {
        self.market_cap.as_ref().or(self.mc.as_ref())
    }

    pub fn volume_24h(&self) -> Option<&Value> {
        self.volume_24h.as_ref().or(self.v24h_usd.as_ref())
    }

    pub fn holders(&self) -> Option<&Value> {
        self.holders.as_ref().or(self.holder.as_ref())
    }

    pub fn socials(&self) -> Option<&Map<String, Value>> {
        self.socials.as_ref().or(self.extensions.as_ref())
    }
}

// --- Birdeye Client Implementation ---

impl BirdeyeClient {
    pub fn new(client: Client, base_url: &str, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client,
        }
    }

    /// Fetches the token overview (metadata, market cap, holders, socials)
    /// from the /defi/token_overview endpoint.
    pub async fn get_token_overview(&self, token_address: &str) -> Result<TokenOverviewResponse, ProviderError> {
        let url = format!("{}/defi/token_overview", self.base_url);

        debug!("Fetching token overview from Birdeye for {}: {}", token_address, url);

        let mut request = self
            .client
            .get(&url)
            .header("x-chain", "solana")
            .query(&[("address", token_address)]);
        if let Some(api_key) = &self.api_key {
            request = request.header("X-API-KEY", api_key);
        }

        let response = request.send().await?;
        let overview: TokenOverviewResponse = read_json(response).await?;

        if overview.success == Some(false) {
            warn!("Birdeye Token Overview API reported failure for token {}", token_address);
        }
        if overview.data.is_none() {
            debug!("Birdeye returned no data object for token {}", token_address);
        }

        Ok(overview)
    }
}

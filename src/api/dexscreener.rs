//! DexScreener client: aggregated trading pairs for a token.
//!
//! `GET /latest/dex/tokens/{address}` returns every pair the token trades in,
//! ordered by DexScreener's own ranking. No API key is required.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::api::read_json;
use crate::error::ProviderError;

pub const PROVIDER_NAME: &str = "DexScreener";

#[derive(Debug, Clone)]
pub struct DexScreenerClient {
    base_url: String,
    client: Client,
}

// --- Response Structs ---

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DexPairsResponse {
    pub schema_version: Option<String>,
    pub pairs: Option<Vec<DexPair>>, // null when the token has no pairs
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DexPair {
    pub chain_id: Option<String>,
    pub dex_id: Option<String>,
    pub url: Option<String>,
    pub pair_address: Option<String>,
    pub base_token: Option<DexToken>,
    pub quote_token: Option<DexToken>,

    // Figures are kept loose: DexScreener sends prices as strings and
    // aggregates as numbers, but neither is guaranteed.
    pub price_native: Option<Value>,
    pub price_usd: Option<Value>,
    pub price_change: Option<DexWindows>,
    pub volume: Option<DexWindows>,
    pub liquidity: Option<DexLiquidity>,
    pub fdv: Option<Value>,
    pub market_cap: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DexToken {
    pub address: Option<String>,
    pub name: Option<String>,
    pub symbol: Option<String>,
}

/// Rolling windows used by both `priceChange` and `volume`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DexWindows {
    pub m5: Option<Value>,
    pub h1: Option<Value>,
    pub h6: Option<Value>,
    pub h24: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DexLiquidity {
    pub usd: Option<Value>,
    pub base: Option<Value>,
    pub quote: Option<Value>,
}

impl DexPairsResponse {
    /// The pair DexScreener lists first, if any.
    pub fn first_pair(&self) -> Option<&DexPair> {
        self.pairs.as_ref().and_then(|pairs| pairs.first())
    }
}

// --- DexScreener Client Implementation ---

impl DexScreenerClient {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Fetches all trading pairs for a token.
    pub async fn get_token_pairs(&self, token_address: &str) -> Result<DexPairsResponse, ProviderError> {
        let url = format!("{}/latest/dex/tokens/{}", self.base_url, token_address);

        debug!("Fetching pairs from DexScreener for {}: {}", token_address, url);

        let response = self.client.get(&url).send().await?;
        let pairs: DexPairsResponse = read_json(response).await?;

        debug!(
            "DexScreener returned {} pair(s) for {}",
            pairs.pairs.as_ref().map_or(0, Vec::len),
            token_address
        );
        Ok(pairs)
    }
}


use crate::api::birdeye::TokenOverviewResponse;
use crate::api::dexscreener::DexPairsResponse;
use crate::error::ProviderError;

/// Outcome of one provider call for one lookup.
#[derive(Debug, Clone)]
pub struct ProviderResult<T> {
    pub provider: &'static str,
    pub outcome: Result<T, ProviderError>,
}

impl<T> ProviderResult<T> {
    pub fn new(provider: &'static str, outcome: Result<T, ProviderError>) -> Self {
        Self { provider, outcome }
    }

    pub fn succeeded(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn payload(&self) -> Option<&T> {
        self.outcome.as_ref().ok()
    }

    pub fn error_detail(&self) -> Option<String> {
        self.outcome
            .as_ref()
            .err()
            .map(|e| format!("{}: {}", self.provider, e))
    }
}

/// Raw results of both providers for a single address.
#[derive(Debug, Clone)]
pub struct TokenLookup {
    pub address: String,
    pub pairs: ProviderResult<DexPairsResponse>,
    pub overview: ProviderResult<TokenOverviewResponse>,
}

/// Which provider the report's figures were taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportSource {
    TradingPair,
    TokenOverview,
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialLink {
    pub label: &'static str,
    pub url: String,
}

/// Merged view of a token. Figures are `None` when missing or not numeric.
#[derive(Debug, Clone)]
pub struct TokenReport {
    pub address: String,
    pub source: ReportSource,
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub price_usd: Option<f64>,
    pub change_24h: Option<f64>,
    pub volume_24h: Option<f64>,
    pub liquidity_usd: Option<f64>,
    pub dex_id: Option<String>,
    pub pair_address: Option<String>,
    pub market_cap: Option<f64>,
    pub holders: Option<f64>,
    pub social_links: Vec<SocialLink>,
}

impl TokenReport {
    pub fn empty(address: &str, source: ReportSource) -> Self {
        Self {
            address: address.to_string(),
            source,
            name: None,
            symbol: None,
            price_usd: None,
            change_24h: None,
            volume_24h: None,
            liquidity_usd: None,
            dex_id: None,
            pair_address: None,
            market_cap: None,
            holders: None,
            social_links: Vec::new(),
        }
    }

    pub fn has_data(&self) -> bool {
        self.source != ReportSource::NotFound
    }
}

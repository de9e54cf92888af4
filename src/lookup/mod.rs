pub mod address;
pub mod fetcher;
pub mod report;

use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

use crate::api::birdeye::BirdeyeClient;
use crate::api::build_http_client;
use crate::api::dexscreener::DexScreenerClient;
use crate::config::Config;

pub use fetcher::TokenInfoFetcher;
pub use report::ReportFormatter;

/// Validate → fetch → format. Every input produces exactly one reply text.
#[derive(Debug, Clone)]
pub struct TokenLookupService {
    fetcher: TokenInfoFetcher,
    formatter: ReportFormatter,
}

impl TokenLookupService {
    pub fn new(fetcher: TokenInfoFetcher, formatter: ReportFormatter) -> Self {
        Self { fetcher, formatter }
    }

    /// Wires both provider clients onto one pooled HTTP client.
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = build_http_client(config.http_timeout_secs)?;
        let dexscreener = Arc::new(DexScreenerClient::new(http.clone(), &config.dexscreener_api_url));
        let birdeye = Arc::new(BirdeyeClient::new(
            http,
            &config.birdeye_api_url,
            config.birdeye_api_key.clone(),
        ));

        Ok(Self::new(
            TokenInfoFetcher::new(dexscreener, birdeye),
            ReportFormatter::from_config(config),
        ))
    }

    pub async fn respond(&self, candidate: &str) -> String {
        if !address::is_valid(candidate) {
            debug!("Rejected token address candidate: {:?}", candidate);
            return invalid_address_prompt();
        }

        info!("Looking up token {}", candidate);
        let result = self.fetcher.fetch(candidate).await;
        self.formatter.format(&result)
    }
}

pub fn invalid_address_prompt() -> String {
    format!(
        "❌ That doesn't look like a valid Solana token address.\n\n\
        Please send a contract address, for example:\n{}",
        address::EXAMPLE_ADDRESS
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    const ADDRESS: &str = "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263";

    #[tokio::test]
    async fn test_invalid_address_gets_prompt_without_network() {
        // Nothing listens here, so a stray request would yield a report, not the prompt.
        let config = Config::for_providers("http://127.0.0.1:9", "http://127.0.0.1:9");
        let service = TokenLookupService::from_config(&config).unwrap();

        for input in ["", "hello", "0x6982508145454Ce325dDbE47a25d4ec3d2311933"] {
            let reply = service.respond(input).await;
            assert_eq!(reply, invalid_address_prompt());
            assert!(reply.contains(address::EXAMPLE_ADDRESS));
        }
    }

    #[tokio::test]
    async fn test_respond_end_to_end() {
        let mut dex = mockito::Server::new_async().await;
        let mut bird = mockito::Server::new_async().await;
        let dex_mock = dex
            .mock("GET", format!("/latest/dex/tokens/{}", ADDRESS).as_str())
            .with_status(200)
            .with_body(
                r#"{"pairs":[{"dexId":"raydium","pairAddress":"Pair1",
                    "baseToken":{"name":"Bonk","symbol":"Bonk"},
                    "priceUsd":"0.00002345","volume":{"h24":1234567.8},"liquidity":{"usd":9876.5}}]}"#,
            )
            .create_async()
            .await;
        let bird_mock = bird
            .mock("GET", "/defi/token_overview")
            .match_query(Matcher::UrlEncoded("address".into(), ADDRESS.into()))
            .with_status(200)
            .with_body(r#"{"success":true,"data":{"socials":{"twitter":"https://twitter.com/bonk_inu"}}}"#)
            .create_async()
            .await;

        let service = TokenLookupService::from_config(&Config::for_providers(&dex.url(), &bird.url())).unwrap();
        let reply = service.respond(ADDRESS).await;

        dex_mock.assert_async().await;
        bird_mock.assert_async().await;
        assert!(reply.contains("Name: Bonk"));
        assert!(reply.contains("Price: $0.00002345"));
        assert!(reply.contains("Volume: $1,234,567.80"));
        assert!(reply.contains("Liquidity: $9,876.50"));
        assert!(reply.contains("Twitter: https://twitter.com/bonk_inu"));
        assert!(reply.contains(&format!("Explorer: https://solscan.io/token/{}", ADDRESS)));
    }

    #[tokio::test]
    async fn test_respond_when_both_providers_fail() {
        let mut dex = mockito::Server::new_async().await;
        let mut bird = mockito::Server::new_async().await;
        dex.mock("GET", Matcher::Any).with_status(429).create_async().await;
        bird.mock("GET", Matcher::Any).with_status(500).create_async().await;

        let service = TokenLookupService::from_config(&Config::for_providers(&dex.url(), &bird.url())).unwrap();
        let reply = service.respond(ADDRESS).await;

        assert!(reply.contains("Name: Not Found"));
        assert!(reply.contains("No trading data available"));
        assert!(reply.contains("Trade: https://raydium.io/swap/"));
    }
}

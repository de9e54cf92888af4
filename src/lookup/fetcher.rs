use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::api::birdeye::{self, BirdeyeClient};
use crate::api::dexscreener::{self, DexScreenerClient};
use crate::error::LookupError;
use crate::models::token::{ProviderResult, TokenLookup};

/// Queries DexScreener and Birdeye for one address.
///
/// Both calls run as separate tasks. A failing provider is recorded in its
/// `ProviderResult` and never stops the other one; only a task that panics or
/// gets cancelled fails the lookup as a whole.
#[derive(Debug, Clone)]
pub struct TokenInfoFetcher {
    dexscreener: Arc<DexScreenerClient>,
    birdeye: Arc<BirdeyeClient>,
}

impl TokenInfoFetcher {
    pub fn new(dexscreener: Arc<DexScreenerClient>, birdeye: Arc<BirdeyeClient>) -> Self {
        Self { dexscreener, birdeye }
    }

    pub async fn fetch(&self, address: &str) -> Result<TokenLookup, LookupError> {
        let pairs_task = {
            let client = self.dexscreener.clone();
            let address = address.to_string();
            tokio::spawn(async move { client.get_token_pairs(&address).await })
        };
        let overview_task = {
            let client = self.birdeye.clone();
            let address = address.to_string();
            tokio::spawn(async move { client.get_token_overview(&address).await })
        };

        let (pairs, overview) = tokio::join!(pairs_task, overview_task);

        let pairs = pairs.map_err(|e| task_failed(dexscreener::PROVIDER_NAME, address, e))?;
        let overview = overview.map_err(|e| task_failed(birdeye::PROVIDER_NAME, address, e))?;

        let lookup = TokenLookup {
            address: address.to_string(),
            pairs: ProviderResult::new(dexscreener::PROVIDER_NAME, pairs),
            overview: ProviderResult::new(birdeye::PROVIDER_NAME, overview),
        };

        for detail in [lookup.pairs.error_detail(), lookup.overview.error_detail()]
            .into_iter()
            .flatten()
        {
            warn!("Provider unavailable for {}: {}", address, detail);
        }
        debug!(
            "Lookup for {} finished (DexScreener ok: {}, Birdeye ok: {})",
            address,
            lookup.pairs.succeeded(),
            lookup.overview.succeeded()
        );

        Ok(lookup)
    }
}

fn task_failed(provider: &'static str, address: &str, err: tokio::task::JoinError) -> LookupError {
    error!("{} lookup task for {} did not complete: {}", provider, address, err);
    LookupError::TaskFailed {
        provider,
        detail: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::build_http_client;
    use crate::error::ProviderError;
    use mockito::Matcher;

    const ADDRESS: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";

    fn fetcher_for(dex: &mockito::Server, bird: &mockito::Server) -> TokenInfoFetcher {
        let http = build_http_client(5).unwrap();
        TokenInfoFetcher::new(
            Arc::new(DexScreenerClient::new(http.clone(), &dex.url())),
            Arc::new(BirdeyeClient::new(http, &bird.url(), None)),
        )
    }

    #[tokio::test]
    async fn test_fetch_both_providers() {
        let mut dex = mockito::Server::new_async().await;
        let mut bird = mockito::Server::new_async().await;
        dex.mock("GET", format!("/latest/dex/tokens/{}", ADDRESS).as_str())
            .with_status(200)
            .with_body(r#"{"pairs":[{"dexId":"raydium"}]}"#)
            .create_async()
            .await;
        bird.mock("GET", "/defi/token_overview")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"success":true,"data":{"name":"USD Coin"}}"#)
            .create_async()
            .await;

        let lookup = fetcher_for(&dex, &bird).fetch(ADDRESS).await.unwrap();
        assert_eq!(lookup.address, ADDRESS);
        assert!(lookup.pairs.succeeded());
        assert!(lookup.overview.succeeded());
        assert_eq!(lookup.pairs.provider, "DexScreener");
        assert_eq!(lookup.overview.provider, "Birdeye");
    }

    #[tokio::test]
    async fn test_one_failing_provider_does_not_abort_the_other() {
        let mut dex = mockito::Server::new_async().await;
        let mut bird = mockito::Server::new_async().await;
        dex.mock("GET", format!("/latest/dex/tokens/{}", ADDRESS).as_str())
            .with_status(500)
            .create_async()
            .await;
        bird.mock("GET", "/defi/token_overview")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"data":{"name":"Bar","symbol":"BAR"}}"#)
            .create_async()
            .await;

        let lookup = fetcher_for(&dex, &bird).fetch(ADDRESS).await.unwrap();
        assert!(!lookup.pairs.succeeded());
        assert!(lookup.pairs.error_detail().unwrap().starts_with("DexScreener: HTTP 500"));
        assert_eq!(
            lookup.overview.payload().unwrap().data.as_ref().unwrap().symbol.as_deref(),
            Some("BAR")
        );
    }

    #[tokio::test]
    async fn test_both_failing_still_completes() {
        let mut dex = mockito::Server::new_async().await;
        let mut bird = mockito::Server::new_async().await;
        dex.mock("GET", format!("/latest/dex/tokens/{}", ADDRESS).as_str())
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;
        bird.mock("GET", "/defi/token_overview")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("")
            .create_async()
            .await;

        let lookup = fetcher_for(&dex, &bird).fetch(ADDRESS).await.unwrap();
        assert!(matches!(lookup.pairs.outcome, Err(ProviderError::Decode(_))));
        assert_eq!(lookup.overview.outcome.as_ref().unwrap_err(), &ProviderError::EmptyBody);
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_a_transport_failure() {
        let mut bird = mockito::Server::new_async().await;
        bird.mock("GET", "/defi/token_overview")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"data":null}"#)
            .create_async()
            .await;

        let http = build_http_client(5).unwrap();
        let fetcher = TokenInfoFetcher::new(
            // Nothing listens on the discard port
            Arc::new(DexScreenerClient::new(http.clone(), "http://127.0.0.1:9")),
            Arc::new(BirdeyeClient::new(http, &bird.url(), None)),
        );

        let lookup = fetcher.fetch(ADDRESS).await.unwrap();
        assert!(matches!(
            lookup.pairs.outcome,
            Err(ProviderError::Transport(_)) | Err(ProviderError::Timeout)
        ));
        assert!(lookup.overview.succeeded());
    }

    #[tokio::test]
    async fn test_stalled_provider_times_out_without_blocking_the_other() {
        // Accepts connections and never answers
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let stalled_url = format!("http://{}", listener.local_addr().unwrap());
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let mut bird = mockito::Server::new_async().await;
        bird.mock("GET", "/defi/token_overview")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"data":{"name":"Bar","symbol":"BAR"}}"#)
            .create_async()
            .await;

        let fetcher = TokenInfoFetcher::new(
            Arc::new(DexScreenerClient::new(build_http_client(1).unwrap(), &stalled_url)),
            Arc::new(BirdeyeClient::new(build_http_client(5).unwrap(), &bird.url(), None)),
        );

        let lookup = fetcher.fetch(ADDRESS).await.unwrap();
        assert_eq!(lookup.pairs.outcome.as_ref().unwrap_err(), &ProviderError::Timeout);
        assert_eq!(
            lookup.pairs.error_detail().as_deref(),
            Some("DexScreener: request timed out")
        );
        assert_eq!(
            lookup.overview.payload().unwrap().data.as_ref().unwrap().symbol.as_deref(),
            Some("BAR")
        );
    }
}

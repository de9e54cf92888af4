//! Merges provider results into a `TokenReport` and renders it as the
//! chat reply.
//!
//! DexScreener's first pair wins. Birdeye's overview is only used when
//! DexScreener has no pair; its social links are shown either way.

use num_format::{Locale, ToFormattedString};
use serde_json::{Map, Value};
use tracing::info;

use crate::api::birdeye::TokenOverviewData;
use crate::api::dexscreener::DexPair;
use crate::api::figure;
use crate::config::Config;
use crate::error::LookupError;
use crate::models::token::{ReportSource, SocialLink, TokenLookup, TokenReport};

pub const NOT_AVAILABLE: &str = "N/A";
pub const NOT_FOUND: &str = "Not Found";
pub const CHAIN_LABEL: &str = "Solana";

/// Social networks rendered from Birdeye, in display order.
const SOCIAL_KEYS: [(&str, &str); 3] = [
    ("twitter", "Twitter"),
    ("telegram", "Telegram"),
    ("website", "Website"),
];

#[derive(Debug, Clone)]
pub struct ReportFormatter {
    trade_url: String,
    explorer_url: String,
}

impl ReportFormatter {
    pub fn new(trade_url: &str, explorer_url: &str) -> Self {
        Self {
            trade_url: trade_url.to_string(),
            explorer_url: explorer_url.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.trade_url, &config.explorer_url)
    }

    /// Renders the outcome of a lookup. Never fails.
    pub fn format(&self, result: &Result<TokenLookup, LookupError>) -> String {
        match result {
            Ok(lookup) => {
                let report = build_report(lookup);
                if !report.has_data() {
                    info!("No provider had data for {}", lookup.address);
                }
                self.render(&report)
            }
            Err(e) => format!("❌ Error fetching token information: {}", e),
        }
    }

    pub fn render(&self, report: &TokenReport) -> String {
        let mut lines: Vec<String> = vec!["🪙 Token Information".to_string(), String::new()];

        let (name, symbol) = match report.source {
            ReportSource::NotFound => (NOT_FOUND, NOT_FOUND),
            _ => (
                report.name.as_deref().unwrap_or("Unknown"),
                report.symbol.as_deref().unwrap_or("Unknown"),
            ),
        };
        lines.push(format!("Name: {}", name));
        lines.push(format!("Symbol: {}", symbol));
        lines.push(format!("Blockchain: {}", CHAIN_LABEL));
        lines.push(format!("Address: {}", report.address));
        lines.push(String::new());

        match report.source {
            ReportSource::TradingPair => {
                lines.push(format!("💰 Price: {}", or_na(report.price_usd, format_price)));
                lines.push(format!("📈 24h Change: {}", or_na(report.change_24h, format_percent)));
                lines.push(format!("📊 Volume: {}", or_na(report.volume_24h, format_usd)));
                lines.push(format!("💧 Liquidity: {}", or_na(report.liquidity_usd, format_usd)));
                lines.push(format!("🏦 DEX: {}", report.dex_id.as_deref().unwrap_or(NOT_AVAILABLE)));
                lines.push(format!("🔁 Pair: {}", report.pair_address.as_deref().unwrap_or(NOT_AVAILABLE)));
            }
            ReportSource::TokenOverview => {
                lines.push(format!("💎 Market Cap: {}", or_na(report.market_cap, format_usd)));
                lines.push(format!("📊 Volume: {}", or_na(report.volume_24h, format_usd)));
                lines.push(format!("👥 Holders: {}", or_na(report.holders, format_count)));
            }
            ReportSource::NotFound => {
                lines.push("❌ No trading data available for this token.".to_string());
            }
        }

        lines.push(String::new());
        lines.push("🔗 Links".to_string());
        lines.push(format!("🛒 Trade: {}", self.trade_url));
        for link in &report.social_links {
            lines.push(format!("{} {}: {}", social_icon(link.label), link.label, link.url));
        }
        lines.push(format!("🔍 Explorer: {}{}", self.explorer_url, report.address));

        lines.join("\n")
    }
}

/// Picks the report fields by provider precedence.
pub fn build_report(lookup: &TokenLookup) -> TokenReport {
    let first_pair = lookup.pairs.payload().and_then(|p| p.first_pair());
    let overview = lookup.overview.payload().and_then(|o| o.data.as_ref());

    let mut report = match (first_pair, overview) {
        (Some(pair), _) => from_pair(&lookup.address, pair),
        (None, Some(data)) => from_overview(&lookup.address, data),
        (None, None) => TokenReport::empty(&lookup.address, ReportSource::NotFound),
    };

    if let Some(socials) = overview.and_then(|data| data.socials()) {
        report.social_links = social_links(socials);
    }

    report
}

fn from_pair(address: &str, pair: &DexPair) -> TokenReport {
    let mut report = TokenReport::empty(address, ReportSource::TradingPair);
    if let Some(base) = &pair.base_token {
        report.name = base.name.clone();
        report.symbol = base.symbol.clone();
    }
    report.price_usd = figure(pair.price_usd.as_ref());
    report.change_24h = figure(pair.price_change.as_ref().and_then(|w| w.h24.as_ref()));
    report.volume_24h = figure(pair.volume.as_ref().and_then(|w| w.h24.as_ref()));
    report.liquidity_usd = figure(pair.liquidity.as_ref().and_then(|l| l.usd.as_ref()));
    report.dex_id = pair.dex_id.clone();
    report.pair_address = pair.pair_address.clone();
    report
}

fn from_overview(address: &str, data: &TokenOverviewData) -> TokenReport {
    let mut report = TokenReport::empty(address, ReportSource::TokenOverview);
    report.name = data.name.clone();
    report.symbol = data.symbol.clone();
    report.market_cap = figure(data.market_cap());
    report.volume_24h = figure(data.volume_24h());
    report.holders = figure(data.holders());
    report
}

fn social_links(socials: &Map<String, Value>) -> Vec<SocialLink> {
    SOCIAL_KEYS
        .iter()
        .filter_map(|(key, label)| {
            let url = socials.get(*key)?.as_str()?.trim();
            if url.is_empty() {
                return None;
            }
            Some(SocialLink {
                label: *label,
                url: url.to_string(),
            })
        })
        .collect()
}

fn social_icon(label: &str) -> &'static str {
    match label {
        "Twitter" => "🐦",
        "Telegram" => "💬",
        _ => "🌐",
    }
}

fn or_na(value: Option<f64>, render: fn(f64) -> String) -> String {
    value.map(render).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// `$1,234.56`. Values too large to represent in cents render as N/A.
pub fn format_usd(value: f64) -> String {
    let cents = (value.abs() * 100.0).round();
    if !cents.is_finite() || cents >= u64::MAX as f64 {
        return NOT_AVAILABLE.to_string();
    }
    let cents = cents as u64;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!(
        "{}${}.{:02}",
        sign,
        (cents / 100).to_formatted_string(&Locale::en),
        cents % 100
    )
}

/// Sub-cent prices keep their significant digits instead of collapsing to $0.00.
/// Anything below ten decimals switches to scientific notation.
pub fn format_price(value: f64) -> String {
    if value == 0.0 || value.abs() >= 0.01 {
        return format_usd(value);
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let fixed = format!("{:.10}", value.abs());
    let digits = fixed.trim_end_matches('0').trim_end_matches('.');
    if digits == "0" {
        return format!("{}${:.2e}", sign, value.abs());
    }
    format!("{}${}", sign, digits)
}

pub fn format_percent(value: f64) -> String {
    format!("{:+.2}%", value)
}

pub fn format_count(value: f64) -> String {
    if value < 0.0 || value >= u64::MAX as f64 {
        return NOT_AVAILABLE.to_string();
    }
    (value.round() as u64).to_formatted_string(&Locale::en)
}

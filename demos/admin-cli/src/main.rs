//! Survey Admin client walkthrough
//!
//! Signs in (when credentials are given and no token is stored yet), then
//! lists the first page of users, merchants and merchant tags.
//!
//! ## Usage
//!
//! ```bash
//! export SURVEY_ADMIN_API_BASE_URL="http://localhost:9001/api/v1"
//! export SURVEY_ADMIN_USERNAME="admin"
//! export SURVEY_ADMIN_PASSWORD="secret"
//! export SURVEY_ADMIN_TOKEN_FILE="$HOME/.survey-admin/token.json"
//!
//! cargo run -p survey-admin-demo
//! ```

use survey_admin_client::{AdminClient, ClientConfig};
use survey_admin_core::geocode::{AccuracyLevel, GeocodeRequest, format_geocode_result};
use survey_admin_core::requests::{MerchantListParams, TagListParams, UserListParams};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const PAGE_SIZE: u32 = 10;

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamped to 0..=100
fn accuracy(score: f64) -> AccuracyLevel {
    AccuracyLevel::from_score(score.clamp(0.0, 100.0).round() as u32)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,survey_admin_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ClientConfig::from_env();
    tracing::info!(
        base_url = %config.base_url,
        timeout_secs = config.timeout.as_secs(),
        token_file = ?config.token_file,
        "Configuration loaded"
    );

    let client = AdminClient::from_config(&config)?;

    if client.tokens().read().is_none() {
        let username = std::env::var("SURVEY_ADMIN_USERNAME").ok();
        let password = std::env::var("SURVEY_ADMIN_PASSWORD").ok();
        match (username, password) {
            (Some(username), Some(password)) => {
                let outcome = client.login(&username, &password).await?;
                if outcome.token.is_none() {
                    anyhow::bail!("login succeeded but no token was issued");
                }
            }
            _ => tracing::warn!("No stored token and no credentials, requests may be rejected"),
        }
    }

    let users = client
        .fetch_users(&UserListParams {
            page: Some(1),
            page_size: Some(PAGE_SIZE),
            q: None,
        })
        .await?;
    println!("Users ({} shown, {:?} on server)", users.total, users.server_total);
    for user in &users.items {
        let status = if user.active { "active" } else { "disabled" };
        println!("  #{:<5} {:<20} {:<24} {status}", user.id, user.username, user.full_name);
    }

    let merchants = client
        .fetch_merchants(&MerchantListParams {
            page: Some(1),
            page_size: Some(PAGE_SIZE),
            ..MerchantListParams::default()
        })
        .await?;
    println!("\nMerchants ({} shown)", merchants.total);
    for merchant in &merchants.items {
        let precision = merchant
            .geocode_score
            .map_or("not geocoded", |score| accuracy(score).description());
        println!("  #{:<5} {:<24} {} [{precision}]", merchant.id, merchant.name, merchant.address);
    }

    let tags = client
        .fetch_tags(&TagListParams {
            page: Some(1),
            page_size: Some(PAGE_SIZE),
            ..TagListParams::default()
        })
        .await?;
    println!("\nTags ({} shown)", tags.total);
    for tag in &tags.items {
        println!("  #{:<5} {}", tag.id, tag.label());
    }

    if let Ok(address) = std::env::var("SURVEY_ADMIN_GEOCODE_ADDRESS") {
        match client.geocode(&GeocodeRequest::new(address)).await {
            Ok(result) => println!("\nGeocoded: {}", format_geocode_result(&result)),
            Err(error) => tracing::warn!(category = ?error.category(), "{}", error.message()),
        }
    }

    Ok(())
}

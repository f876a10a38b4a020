//! POS Back-Office - connectivity smoke check
//!
//! Signs in with the account from the environment, pulls the last week of
//! dashboard figures and the current stock snapshot, and logs what it
//! finds. Run against a staging API after a deployment.

use anyhow::Context;
use chrono::{Duration, Local};

use pos_backoffice_client::api::ApiClient;
use pos_backoffice_client::services::{CountSheetService, DashboardService};
use pos_backoffice_client::session::{Session, SessionStore};
use pos_backoffice_client::Config;
use shared::models::net_sales_total;
use shared::types::DateRange;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pos_backoffice_client::init_tracing();

    // Load configuration
    let config = Config::load()?;

    tracing::info!("Starting POS back-office smoke check");
    tracing::info!("Environment: {}", config.environment);
    tracing::info!("API base URL: {}", config.api.base_url);

    let username = std::env::var("POS_USERNAME").context("POS_USERNAME is not set")?;
    let password = std::env::var("POS_PASSWORD").context("POS_PASSWORD is not set")?;

    // Sign in and install the session
    let api = ApiClient::new(&config.api)?;
    let outcome = api.login(&username, &password).await?;
    tracing::info!(
        "Signed in as {} ({})",
        outcome.profile.name,
        outcome.profile.role
    );

    let mut store = SessionStore::new(config.session.expiry_leeway_secs);
    store.install(Session::from_token(&outcome.token)?);

    // Last week of sales
    let today = Local::now().date_naive();
    let range = DateRange {
        start: today - Duration::days(7),
        end: today,
    };

    let dashboard = DashboardService::new(api.clone());
    let sales = dashboard.daily_sales(&store, &range).await?;
    tracing::info!(
        "Sales: {} day(s), net total {}",
        sales.len(),
        net_sales_total(&sales)
    );

    // Current stock snapshot
    let counts = CountSheetService::new(api);
    let sheet = counts.start_new(&store).await?;
    tracing::info!("Current stock snapshot: {} line(s)", sheet.lines.len());

    tracing::info!("Smoke check passed");
    Ok(())
}

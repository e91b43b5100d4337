use anyhow::Context;
use oanda_v20::{AccountID, Client, Config, EventStream, PricingStreamQuery, StreamEvent};
use std::fmt::Debug;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "oanda_v20=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!("Connecting to {} ({})", config.api_url, config.environment);

    let account = config
        .account_id
        .clone()
        .map(AccountID::new)
        .context("OANDA_ACCOUNT_ID is not set")?;
    let client = Client::new(&config)?;

    let summary = client.account_summary(&account).await?;
    info!(
        "Account {} ({}): NAV {} balance {} open trades {} last transaction {}",
        summary.account.id,
        summary.account.currency,
        summary.account.nav,
        summary.account.balance,
        summary.account.open_trade_count,
        summary.last_transaction_id
    );

    // OANDA_INSTRUMENTS=EUR_USD,USD_JPY follows prices, otherwise account activity
    match std::env::var("OANDA_INSTRUMENTS").ok().filter(|v| !v.is_empty()) {
        Some(instruments) => {
            let query = PricingStreamQuery::new(instruments.split(',').map(str::trim));
            let events = client.pricing_stream(&account, &query).await?;
            follow(events).await;
        }
        None => {
            let events = client.transaction_stream(&account).await?;
            follow(events).await;
        }
    }

    Ok(())
}

async fn follow<T: StreamEvent + Debug>(mut events: EventStream<T>) {
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down");
                events.close();
                break;
            }
            next = events.recv() => match next {
                Some(Ok(event)) => info!("{} event: {:?}", T::NAME, event),
                Some(Err(e)) => {
                    warn!("{} stream failed: {}", T::NAME, e);
                    break;
                }
                None => {
                    info!("{} stream ended", T::NAME);
                    break;
                }
            },
        }
    }
}

//! Example fetching a batch of assets with an overall progress bar.
//!
//! Every file is reported through the relay, so the download tasks never
//! wait on rendering. Failed files are retried once.
//!
//! Run with `RUST_LOG=progressmgr=debug` to see the registry's tracing.

use color_eyre::Result;
use comfy_table::Table;
use futures::stream::{self, StreamExt};
use progressmgr::progress::{StyleOptions, TerminalPresenter};
use progressmgr::{relay, RegistryBuilder, RelaySender, StaticText};
use rand::Rng;
use tracing_subscriber::EnvFilter;

const FILE_SIZE: u64 = 256_000;
const CONCURRENT_FETCHES: usize = 5;

struct Fetched {
    name: String,
    attempts: u32,
    bytes: u64,
    error: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let presenter = TerminalPresenter::new(StyleOptions::default())?;
    let registry = RegistryBuilder::new()
        .presenter(presenter.clone())
        .build()?;
    let (sender, driver) = relay::channel(&registry);
    let pump = tokio::spawn(driver.run());

    // Using httpbin.org's byte endpoint; the seed makes every file unique.
    let mut rng = rand::rng();
    let assets: Vec<_> = (1..=20)
        .map(|i| {
            let seed: u32 = rng.random();
            (
                format!("asset{:02}.prp", i),
                format!("https://httpbin.org/bytes/{}?seed={}", FILE_SIZE, seed),
            )
        })
        .collect();

    let overall = sender.register_overall_operation(
        (FILE_SIZE * assets.len() as u64) as f64,
        "Updating age",
        StaticText::Updating,
        true,
    )?;

    let client = reqwest::Client::new();
    let results: Vec<Fetched> = stream::iter(assets)
        .map(|(name, url)| fetch_with_retry(&client, &sender, name, url))
        .buffer_unordered(CONCURRENT_FETCHES)
        .collect()
        .await;

    overall.finish();
    drop(sender);
    pump.await?;

    let mut table = Table::new();
    table.set_header(vec!["File", "Attempts", "Bytes", "Status"]);
    for fetched in &results {
        table.add_row(vec![
            fetched.name.clone(),
            fetched.attempts.to_string(),
            fetched.bytes.to_string(),
            fetched.error.clone().unwrap_or_else(|| "ok".to_string()),
        ]);
    }
    println!("{table}");

    let failed = results.iter().filter(|f| f.error.is_some()).count();
    println!(
        "\nFetch complete! {} file(s), {} failed.",
        results.len(),
        failed
    );

    Ok(())
}

async fn fetch_with_retry(
    client: &reqwest::Client,
    sender: &RelaySender,
    name: String,
    url: String,
) -> Fetched {
    let mut fetched = Fetched {
        name,
        attempts: 0,
        bytes: 0,
        error: None,
    };

    for attempt in 0..2 {
        fetched.attempts += 1;
        match fetch(client, sender, &fetched.name, &url, attempt > 0).await {
            Ok(bytes) => {
                fetched.bytes = bytes;
                fetched.error = None;
                break;
            }
            Err(e) => {
                tracing::warn!("Fetching {} failed: {}", fetched.name, e);
                fetched.error = Some(e.to_string());
            }
        }
    }
    fetched
}

async fn fetch(
    client: &reqwest::Client,
    sender: &RelaySender,
    name: &str,
    url: &str,
    is_retry: bool,
) -> Result<u64> {
    // A retry adds its length to the overall total; the failed attempt gave
    // back its unfinished part when it aborted.
    let ticket =
        sender.register_operation(FILE_SIZE as f64, name, StaticText::Updating, is_retry, true)?;

    let response = match client.get(url).send().await.and_then(|r| r.error_for_status()) {
        Ok(response) => response,
        Err(e) => {
            ticket.set_aborting()?;
            return Err(e.into());
        }
    };
    if let Some(length) = response.content_length() {
        ticket.set_length(length as f64)?;
    }

    let mut received = 0;
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        if ticket.is_aborting() {
            break;
        }
        match chunk {
            Ok(bytes) => {
                received += bytes.len() as u64;
                ticket.increment(bytes.len() as f64)?;
            }
            Err(e) => {
                ticket.set_aborting()?;
                return Err(e.into());
            }
        }
    }

    Ok(received)
}

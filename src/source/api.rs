use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{DocumentSet, TokenProvider};
use crate::models::{Document, Driver};

const BATCH_SIZE: usize = 25;
const USER_AGENT: &str = concat!("fleetdoc/", env!("CARGO_PKG_VERSION"));

/// List endpoints either return a bare array or wrap it in an envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum Listing<T> {
    Bare(Vec<T>),
    Data { data: Vec<T> },
    Documents { documents: Vec<T> },
    Drivers { drivers: Vec<T> },
}

impl<T> Listing<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Listing::Bare(items)
            | Listing::Data { data: items }
            | Listing::Documents { documents: items }
            | Listing::Drivers { drivers: items } => items,
        }
    }
}

pub fn build_client(timeout_secs: u64) -> Result<Client> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(USER_AGENT)
        .build()?)
}

/// Fetch the driver roster, then every driver's documents in concurrent batches.
///
/// A failing roster request is an error. A failing per-driver request is
/// logged and the driver is reported with whatever was fetched (nothing).
pub async fn fetch(
    client: &Client,
    base_url: &str,
    tokens: &dyn TokenProvider,
    quiet: bool,
) -> Result<DocumentSet> {
    let base = Url::parse(base_url).with_context(|| format!("Invalid API base URL {}", base_url))?;
    let token = tokens.token();
    if token.is_none() {
        tracing::warn!("no API token available, sending unauthenticated requests");
    }

    let drivers: Vec<Driver> = get_list(client, endpoint(&base, &["drivers"])?, token.as_deref())
        .await
        .context("Failed to fetch driver roster")?;
    tracing::info!(drivers = drivers.len(), "fetched driver roster");

    let pb = if !quiet {
        let pb = ProgressBar::new(drivers.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut documents = Vec::new();
    for batch in drivers.chunks(BATCH_SIZE) {
        let futures: Vec<_> = batch
            .iter()
            .map(|driver| {
                let url = endpoint(&base, &["drivers", driver.id.as_str(), "documents"]);
                let token = token.as_deref();
                async move {
                    let url = url?;
                    get_list::<Document>(client, url, token).await
                }
            })
            .collect();

        let results = join_all(futures).await;

        for (driver, result) in batch.iter().zip(results) {
            match result {
                Ok(docs) => documents.extend(docs.into_iter().map(|mut doc| {
                    if doc.driver_id.is_empty() {
                        doc.driver_id = driver.id.clone();
                    }
                    doc
                })),
                Err(e) => {
                    tracing::warn!(driver_id = %driver.id, error = %format!("{:#}", e), "failed to fetch driver documents");
                }
            }
            if let Some(pb) = &pb {
                pb.inc(1);
            }
        }
    }

    if let Some(pb) = pb {
        pb.finish_with_message("Done");
    }

    Ok(DocumentSet { drivers, documents })
}

/// Append path segments to `base`, percent-encoding each one.
fn endpoint(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| anyhow!("API base URL cannot be a base: {}", base))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

async fn get_list<T: DeserializeOwned>(
    client: &Client,
    url: Url,
    token: Option<&str>,
) -> Result<Vec<T>> {
    tracing::debug!(%url, "GET");
    let mut request = client.get(url.clone()).header("Accept", "application/json");
    if let Some(token) = token {
        request = request.bearer_auth(token);
    }

    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        bail!("{} returned {}", url, status);
    }

    let listing: Listing<T> = response.json().await?;
    Ok(listing.into_vec())
}

//! `depots` subcommand: concurrent lookups, JSON on stdout.

use depotgen_core::{is_integer_id, DepotRecord};
use depotgen_scraper::SteamDbClient;
use futures::stream::{self, StreamExt};
use serde::Serialize;

use crate::SourceArgs;

/// Result of one lookup. Exactly one of `depots` / `error` is set.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AppDepots {
    pub app_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depots: Option<Vec<DepotRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub(crate) async fn run_depots(
    app_ids: &[String],
    concurrency: usize,
    source: &SourceArgs,
) -> anyhow::Result<()> {
    let client = SteamDbClient::new(&source.base_url, source.timeout_secs, &source.user_agent)?;
    let results = lookup_all(&client, app_ids, concurrency).await;

    println!("{}", serde_json::to_string_pretty(&results)?);

    let failed = results.iter().filter(|r| r.error.is_some()).count();
    if failed > 0 {
        anyhow::bail!("{failed} of {} depot lookups failed", results.len());
    }
    Ok(())
}

/// Looks up every id with at most `concurrency` requests in flight.
/// Results keep the order of `app_ids`.
pub(crate) async fn lookup_all(
    client: &SteamDbClient,
    app_ids: &[String],
    concurrency: usize,
) -> Vec<AppDepots> {
    stream::iter(app_ids)
        .map(|app_id| lookup_one(client, app_id))
        .buffered(concurrency.max(1))
        .collect()
        .await
}

async fn lookup_one(client: &SteamDbClient, app_id: &str) -> AppDepots {
    let app_id = app_id.trim();
    if !is_integer_id(app_id) {
        return AppDepots {
            app_id: app_id.to_owned(),
            depots: None,
            error: Some("invalid app id".to_owned()),
        };
    }

    match client.fetch_depots(app_id).await {
        Ok(depots) => {
            tracing::info!(app_id, count = depots.len(), "depots fetched");
            AppDepots {
                app_id: app_id.to_owned(),
                depots: Some(depots),
                error: None,
            }
        }
        Err(e) => {
            tracing::error!(app_id, error = %e, "depot lookup failed");
            AppDepots {
                app_id: app_id.to_owned(),
                depots: None,
                error: Some(e.to_string()),
            }
        }
    }
}

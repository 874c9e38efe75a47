// src/pipeline.rs - Orchestration: state discovery, scope filtering, then
// per-state city collection in table order.
use crate::cities::CityCollector;
use crate::config::Config;
use crate::error::{Result, ScrapeError};
use crate::fetch::PageFetcher;
use crate::models::{CityMap, PipelineResult, StateFailure, StateRecord};
use crate::states::StateDirectory;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Which states a run should process.
#[derive(Debug, Clone)]
pub enum Scope {
    All,
    States(Vec<String>),
}

impl Scope {
    /// Parses a comma-separated list of names/codes; an empty or
    /// whitespace-only string means all states.
    pub fn parse(input: &str) -> Self {
        let identifiers: Vec<String> = input
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        if identifiers.is_empty() {
            Scope::All
        } else {
            Scope::States(identifiers)
        }
    }
}

pub struct Pipeline {
    directory: StateDirectory,
    collector: CityCollector,
    config: Config,
}

impl Pipeline {
    pub fn new(config: Config, fetcher: Arc<dyn PageFetcher>) -> Self {
        let directory = StateDirectory::new(
            Arc::clone(&fetcher),
            config.scraping.states_index_url.clone(),
        );
        let collector = CityCollector::new(fetcher, config.scraping.state_listing_base_url.clone());

        Self {
            directory,
            collector,
            config,
        }
    }

    /// Runs the full collection: resolve states, filter to `scope`, then
    /// collect cities state by state in table order.
    ///
    /// State-directory failures always abort. Per-state collection failures
    /// are recorded in the result's failure report and the run continues,
    /// unless `strict` is set, in which case the first one aborts the run.
    pub async fn run(
        &self,
        scope: &Scope,
        reference: Option<&Path>,
        strict: bool,
    ) -> Result<PipelineResult> {
        let table = self.directory.resolve_states(reference).await?;
        let selected = filter_scope(&table, scope)?;
        info!(
            "Collecting cities for {} of {} states",
            selected.len(),
            table.len()
        );

        let mut cities = CityMap::default();
        let mut failures: Vec<StateFailure> = Vec::new();

        for (index, state) in selected.iter().enumerate() {
            info!("Retrieving cities for {}", state.name);

            match self.collector.collect_cities(state).await {
                Ok(list) => cities.insert(state.name.clone(), list),
                Err(e) if strict => return Err(e),
                Err(e) => {
                    warn!("Failed to collect cities for {}: {}", state.name, e);
                    failures.push(StateFailure {
                        state: state.name.clone(),
                        error: e.to_string(),
                    });
                }
            }

            let interval = self.config.logging.progress_interval;
            if interval > 0 && (index + 1) % interval == 0 {
                info!("Progress: {}/{} states", index + 1, selected.len());
            }

            if index < selected.len() - 1 {
                self.rate_limit_pause().await;
            }
        }

        info!(
            "Run complete: {} states collected, {} failed",
            cities.len(),
            failures.len()
        );

        Ok(PipelineResult {
            states: selected.into_iter().cloned().collect(),
            cities,
            failures,
            scraped_at: chrono::Utc::now().to_rfc3339(),
        })
    }

    // Jittered sleep between state requests, mirroring a polite crawler.
    async fn rate_limit_pause(&self) {
        let min = self.config.scraping.rate_limit_min_ms;
        let max = self.config.scraping.rate_limit_max_ms.max(min);
        if max == 0 {
            return;
        }
        let delay = if min == max {
            min
        } else {
            fastrand::u64(min..=max)
        };
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }
}

/// Narrows the table to the scoped states, keeping table order. Every
/// identifier that matches nothing is reported in one `UnknownState` error.
fn filter_scope<'a>(table: &'a [StateRecord], scope: &Scope) -> Result<Vec<&'a StateRecord>> {
    let identifiers = match scope {
        Scope::All => return Ok(table.iter().collect()),
        Scope::States(identifiers) => identifiers,
    };

    let unknown: Vec<String> = identifiers
        .iter()
        .filter(|id| !table.iter().any(|record| record.matches(id)))
        .cloned()
        .collect();
    if !unknown.is_empty() {
        return Err(ScrapeError::UnknownState(unknown));
    }

    Ok(table
        .iter()
        .filter(|record| identifiers.iter().any(|id| record.matches(id)))
        .collect())
}

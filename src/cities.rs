// src/cities.rs - Per-state city enumeration from the listing page.
use crate::error::{Result, ScrapeError};
use crate::fetch::PageFetcher;
use crate::models::StateRecord;
use crate::states::normalize_name;
use scraper::{Html, Selector};
use std::sync::Arc;
use tracing::debug;

const LISTING_COLUMN_SELECTOR: &str = "div.col-md-4";
const CITY_LINK_SELECTOR: &str = "a[href]";

/// Scrapes the complete city list for one state from its listing page.
pub struct CityCollector {
    fetcher: Arc<dyn PageFetcher>,
    listing_base_url: String,
}

impl CityCollector {
    pub fn new(fetcher: Arc<dyn PageFetcher>, listing_base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            listing_base_url: listing_base_url.into(),
        }
    }

    /// The listing URL is a pure function of the state code: same record,
    /// same URL, on every call.
    pub fn listing_url(&self, state: &StateRecord) -> String {
        format!(
            "{}{}",
            self.listing_base_url,
            state.code.to_ascii_lowercase()
        )
    }

    /// Returns the state's cities in page order, whitespace-normalized and
    /// deduplicated case-insensitively (first-seen casing wins).
    pub async fn collect_cities(&self, state: &StateRecord) -> Result<Vec<String>> {
        let url = self.listing_url(state);
        let html = self.fetcher.fetch(&url).await?;
        let cities = extract_cities(&html, &url, &state.name)?;
        debug!("Found {} cities for {}", cities.len(), state.name);
        Ok(cities)
    }
}

/// Pulls city names out of the listing columns.
///
/// No listing column at all means the page layout changed
/// (`ScrapeStructure`); columns present but holding zero city links is the
/// distinct `EmptyResult` signal. On this source every state lists at least
/// one city, so an empty column block is treated as a site change too, just
/// a distinguishable one.
fn extract_cities(html: &str, url: &str, state_name: &str) -> Result<Vec<String>> {
    let document = Html::parse_document(html);
    let column_selector =
        Selector::parse(LISTING_COLUMN_SELECTOR).expect("static selector must parse");
    let link_selector = Selector::parse(CITY_LINK_SELECTOR).expect("static selector must parse");

    let mut columns = document.select(&column_selector).peekable();
    if columns.peek().is_none() {
        return Err(ScrapeError::structure(url, LISTING_COLUMN_SELECTOR));
    }

    let mut cities: Vec<String> = Vec::new();
    let mut seen: Vec<String> = Vec::new();
    for column in columns {
        for link in column.select(&link_selector) {
            let name = normalize_name(&link.text().collect::<String>());
            if name.is_empty() {
                continue;
            }

            let folded = name.to_lowercase();
            if seen.contains(&folded) {
                continue;
            }
            seen.push(folded);
            cities.push(name);
        }
    }

    if cities.is_empty() {
        return Err(ScrapeError::EmptyResult {
            state: state_name.to_string(),
            url: url.to_string(),
        });
    }

    Ok(cities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FixtureFetcher {
        html: &'static str,
    }

    #[async_trait]
    impl PageFetcher for FixtureFetcher {
        async fn fetch(&self, _url: &str) -> Result<String> {
            Ok(self.html.to_string())
        }
    }

    fn collector(html: &'static str) -> CityCollector {
        CityCollector::new(
            Arc::new(FixtureFetcher { html }),
            "https://www.bestplaces.net/find/state.aspx?state=",
        )
    }

    #[test]
    fn listing_url_is_deterministic() {
        let collector = collector("");
        let texas = StateRecord::new("Texas", "TX");

        let first = collector.listing_url(&texas);
        let second = collector.listing_url(&texas);
        assert_eq!(first, second);
        assert_eq!(first, "https://www.bestplaces.net/find/state.aspx?state=tx");
    }

    #[tokio::test]
    async fn collects_cities_in_page_order() {
        let html = r#"
            <div class="col-md-4">
              <a href="/city/Texas/Austin">Austin</a>
              <a href="/city/Texas/Houston">Houston</a>
            </div>
            <div class="col-md-4">
              <a href="/city/Texas/Dallas">  Dallas </a>
            </div>
        "#;
        let cities = collector(html)
            .collect_cities(&StateRecord::new("Texas", "TX"))
            .await
            .unwrap();

        assert_eq!(cities, vec!["Austin", "Houston", "Dallas"]);
    }

    #[tokio::test]
    async fn dedup_keeps_first_seen_casing() {
        let html = r#"
            <div class="col-md-4">
              <a href="/city/Texas/Austin">Austin</a>
              <a href="/city/Texas/austin">austin</a>
              <a href="/city/Texas/Houston">Houston</a>
            </div>
        "#;
        let cities = collector(html)
            .collect_cities(&StateRecord::new("Texas", "TX"))
            .await
            .unwrap();

        assert_eq!(cities, vec!["Austin", "Houston"]);
    }

    #[tokio::test]
    async fn missing_listing_columns_is_a_structure_error() {
        let html = "<html><body><p>Maintenance page</p></body></html>";
        let err = collector(html)
            .collect_cities(&StateRecord::new("Texas", "TX"))
            .await
            .unwrap_err();

        assert!(matches!(err, ScrapeError::ScrapeStructure { .. }));
    }

    #[tokio::test]
    async fn empty_listing_columns_is_an_empty_result() {
        let html = r#"<div class="col-md-4"></div>"#;
        let err = collector(html)
            .collect_cities(&StateRecord::new("Texas", "TX"))
            .await
            .unwrap_err();

        assert!(matches!(err, ScrapeError::EmptyResult { .. }));
    }
}

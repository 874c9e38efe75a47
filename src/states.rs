// src/states.rs - State discovery: reference table or live index scrape.
use crate::error::{Result, ScrapeError};
use crate::fetch::PageFetcher;
use crate::models::StateRecord;
use csv::{ReaderBuilder, Trim};
use scraper::{Html, Selector};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use url::Url;

const STATE_LINK_SELECTOR: &str = r#"a[href*="state.aspx?state="]"#;

/// Resolves the canonical table of states, either from a caller-supplied
/// CSV reference table or from one scrape of the source site's index page.
pub struct StateDirectory {
    fetcher: Arc<dyn PageFetcher>,
    index_url: String,
}

#[derive(Debug, Deserialize)]
struct ReferenceRow {
    #[serde(rename = "State")]
    state: String,
    #[serde(rename = "StateCode")]
    code: String,
}

impl StateDirectory {
    pub fn new(fetcher: Arc<dyn PageFetcher>, index_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            index_url: index_url.into(),
        }
    }

    /// Returns the state table in the order it was encountered, either in
    /// reference-table row order or index-page listing order. Makes at most
    /// one network call, and none when a reference table is supplied.
    pub async fn resolve_states(&self, reference: Option<&Path>) -> Result<Vec<StateRecord>> {
        match reference {
            Some(path) => {
                info!("Resolving states from reference table {}", path.display());
                let file = std::fs::File::open(path)
                    .map_err(|e| ScrapeError::Reference(format!("{}: {}", path.display(), e)))?;
                parse_reference(file)
            }
            None => {
                info!("Resolving states from {}", self.index_url);
                let html = self.fetcher.fetch(&self.index_url).await?;
                extract_states(&html, &self.index_url)
            }
        }
    }
}

/// Parses a `State,StateCode` CSV into state records, preserving row order.
fn parse_reference(reader: impl Read) -> Result<Vec<StateRecord>> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let mut records: Vec<StateRecord> = Vec::new();
    for (index, row) in csv_reader.deserialize::<ReferenceRow>().enumerate() {
        // Header is row 0, so the first data row is row 1 for messages.
        let row_number = index + 1;
        let row = row
            .map_err(|e| ScrapeError::MalformedReference(format!("row {}: {}", row_number, e)))?;

        let name = normalize_name(&row.state);
        if name.is_empty() {
            return Err(ScrapeError::MalformedReference(format!(
                "row {}: missing state name",
                row_number
            )));
        }

        let code = validate_code(&row.code).ok_or_else(|| {
            ScrapeError::MalformedReference(format!(
                "row {}: invalid state code {:?}",
                row_number, row.code
            ))
        })?;

        if records.iter().any(|r| r.code == code) {
            return Err(ScrapeError::MalformedReference(format!(
                "row {}: duplicate state code {}",
                row_number, code
            )));
        }
        if records.iter().any(|r| r.name.eq_ignore_ascii_case(&name)) {
            return Err(ScrapeError::MalformedReference(format!(
                "row {}: duplicate state name {}",
                row_number, name
            )));
        }

        records.push(StateRecord::new(name, code));
    }

    if records.is_empty() {
        return Err(ScrapeError::MalformedReference(
            "reference table has no data rows".to_string(),
        ));
    }

    Ok(records)
}

/// Extracts (name, code) pairs from the index page's state links, in page
/// order. The code comes from the link's `state` query parameter, the name
/// from the link text. Repeat links for an already-seen code are skipped.
fn extract_states(html: &str, index_url: &str) -> Result<Vec<StateRecord>> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(STATE_LINK_SELECTOR).expect("static selector must parse");

    let base = Url::parse(index_url).map_err(|e| ScrapeError::fetch(index_url, e))?;

    let mut records: Vec<StateRecord> = Vec::new();
    for element in document.select(&selector) {
        let href = match element.value().attr("href") {
            Some(href) => href,
            None => continue,
        };

        let link = match base.join(href) {
            Ok(link) => link,
            Err(_) => continue,
        };
        let code = link
            .query_pairs()
            .find(|(key, _)| key == "state")
            .and_then(|(_, value)| validate_code(&value));
        let code = match code {
            Some(code) => code,
            None => continue,
        };

        if records.iter().any(|r| r.code == code) {
            continue;
        }

        let name = normalize_name(&element.text().collect::<String>());
        if name.is_empty() {
            continue;
        }

        records.push(StateRecord::new(name, code));
    }

    if records.is_empty() {
        return Err(ScrapeError::structure(index_url, STATE_LINK_SELECTOR));
    }

    info!("Extracted {} states from index page", records.len());
    Ok(records)
}

/// Collapses internal whitespace and trims the ends.
pub fn normalize_name(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Accepts exactly two ASCII letters, normalized to uppercase.
fn validate_code(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.len() == 2 && trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(trimmed.to_ascii_uppercase())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reference_rows_resolve_in_input_order() {
        let csv = "State,StateCode\nTexas,TX\nOhio,OH\nWest Virginia,wv\n";
        let records = parse_reference(Cursor::new(csv)).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0], StateRecord::new("Texas", "TX"));
        assert_eq!(records[1], StateRecord::new("Ohio", "OH"));
        // Lowercase codes are normalized to uppercase.
        assert_eq!(records[2], StateRecord::new("West Virginia", "WV"));
    }

    #[test]
    fn duplicate_code_is_malformed() {
        let csv = "State,StateCode\nCalifornia,CA\nCarolina,CA\n";
        let err = parse_reference(Cursor::new(csv)).unwrap_err();
        match err {
            ScrapeError::MalformedReference(msg) => assert!(msg.contains("duplicate state code")),
            other => panic!("expected MalformedReference, got {:?}", other),
        }
    }

    #[test]
    fn duplicate_name_is_malformed_case_insensitively() {
        let csv = "State,StateCode\nTexas,TX\nTEXAS,TA\n";
        let err = parse_reference(Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, ScrapeError::MalformedReference(_)));
    }

    #[test]
    fn invalid_code_is_malformed() {
        let csv = "State,StateCode\nTexas,TEX\n";
        let err = parse_reference(Cursor::new(csv)).unwrap_err();
        match err {
            ScrapeError::MalformedReference(msg) => assert!(msg.contains("invalid state code")),
            other => panic!("expected MalformedReference, got {:?}", other),
        }
    }

    #[test]
    fn missing_name_is_malformed() {
        let csv = "State,StateCode\n,TX\n";
        let err = parse_reference(Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, ScrapeError::MalformedReference(_)));
    }

    #[test]
    fn extracts_states_from_index_page() {
        let html = r#"
            <html><body><div class="col-md-4">
              <a href="state.aspx?state=TX">Texas</a>
              <a href="state.aspx?state=OH">  Ohio </a>
              <a href="state.aspx?state=TX">Texas (repeat)</a>
              <a href="/about">About</a>
            </div></body></html>
        "#;
        let records = extract_states(html, "https://www.bestplaces.net/find/").unwrap();

        assert_eq!(
            records,
            vec![
                StateRecord::new("Texas", "TX"),
                StateRecord::new("Ohio", "OH"),
            ]
        );
    }

    #[test]
    fn missing_state_links_is_a_structure_error() {
        let html = "<html><body><p>Maintenance page</p></body></html>";
        let err = extract_states(html, "https://www.bestplaces.net/find/").unwrap_err();
        assert!(matches!(err, ScrapeError::ScrapeStructure { .. }));
    }
}

use serde::{Deserialize, Serialize};

use crate::{config::Config, pipeline::Pipeline};

pub struct CliApp {
    pub config: Config,
    pub pipeline: Pipeline,
}

/// One resolved state: full name plus its two-letter uppercase code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRecord {
    pub name: String,
    pub code: String,
}

impl StateRecord {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
        }
    }

    /// Case-insensitive match against either the name or the code.
    pub fn matches(&self, identifier: &str) -> bool {
        self.name.eq_ignore_ascii_case(identifier) || self.code.eq_ignore_ascii_case(identifier)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateCities {
    pub state: String,
    pub cities: Vec<String>,
}

/// Ordered mapping from state name to its city list.
///
/// Entry order is insertion order, which the pipeline keeps equal to
/// state-table order so repeated runs are comparable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CityMap {
    entries: Vec<StateCities>,
}

impl CityMap {
    pub fn insert(&mut self, state: impl Into<String>, cities: Vec<String>) {
        self.entries.push(StateCities {
            state: state.into(),
            cities,
        });
    }

    pub fn get(&self, state: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|e| e.state.eq_ignore_ascii_case(state))
            .map(|e| e.cities.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &StateCities> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_cities(&self) -> usize {
        self.entries.iter().map(|e| e.cities.len()).sum()
    }
}

/// A per-state collection failure recorded by a non-strict run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateFailure {
    pub state: String,
    pub error: String,
}

/// Output of one pipeline run: the collected cities, the state table that
/// drove the run, and any per-state failures. A run either returns this
/// (possibly with failures listed) or a single typed error, never a result
/// that silently omits states.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineResult {
    pub states: Vec<StateRecord>,
    pub cities: CityMap,
    pub failures: Vec<StateFailure>,
    pub scraped_at: String,
}

impl PipelineResult {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_map_preserves_insertion_order() {
        let mut map = CityMap::default();
        map.insert("Texas", vec!["Austin".to_string()]);
        map.insert("Ohio", vec!["Akron".to_string()]);

        let order: Vec<&str> = map.iter().map(|e| e.state.as_str()).collect();
        assert_eq!(order, vec!["Texas", "Ohio"]);
    }

    #[test]
    fn city_map_lookup_is_case_insensitive() {
        let mut map = CityMap::default();
        map.insert("Texas", vec!["Austin".to_string()]);

        assert_eq!(map.get("texas"), Some(&["Austin".to_string()][..]));
        assert!(map.get("Ohio").is_none());
    }

    #[test]
    fn state_record_matches_name_or_code() {
        let record = StateRecord::new("Texas", "TX");
        assert!(record.matches("tx"));
        assert!(record.matches("TEXAS"));
        assert!(!record.matches("ZZ"));
    }
}

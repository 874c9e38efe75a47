// src/export.rs - Snapshot a pipeline result to the output directory.
use crate::config::OutputConfig;
use crate::models::PipelineResult;
use std::path::PathBuf;
use tracing::info;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Writes the full result (states, cities, failure report) as JSON.
pub async fn write_json(result: &PipelineResult, output: &OutputConfig) -> Result<PathBuf> {
    let json = if output.pretty_json {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    let path = PathBuf::from(&output.directory).join("cities.json");
    tokio::fs::write(&path, json).await?;
    info!("Wrote JSON snapshot to {}", path.display());

    Ok(path)
}

/// Writes a flat `City,State,StateCode` table, one row per collected city.
pub fn write_csv(result: &PipelineResult, output: &OutputConfig) -> Result<PathBuf> {
    let path = PathBuf::from(&output.directory).join("places.csv");
    let mut writer = csv::Writer::from_path(&path)?;

    writer.write_record(["City", "State", "StateCode"])?;
    for entry in result.cities.iter() {
        let code = result
            .states
            .iter()
            .find(|s| s.name == entry.state)
            .map(|s| s.code.as_str())
            .unwrap_or("");
        for city in &entry.cities {
            writer.write_record([city.as_str(), entry.state.as_str(), code])?;
        }
    }
    writer.flush()?;
    info!(
        "Wrote {} city rows to {}",
        result.cities.total_cities(),
        path.display()
    );

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CityMap, StateRecord};

    fn sample_result() -> PipelineResult {
        let mut cities = CityMap::default();
        cities.insert(
            "Texas",
            vec!["Austin".to_string(), "Houston".to_string()],
        );
        PipelineResult {
            states: vec![StateRecord::new("Texas", "TX")],
            cities,
            failures: vec![],
            scraped_at: "2025-01-01T00:00:00Z".to_string(),
        }
    }

    #[tokio::test]
    async fn csv_export_has_one_row_per_city() {
        let dir = std::env::temp_dir().join(format!("city-scraper-export-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let output = OutputConfig {
            directory: dir.to_string_lossy().to_string(),
            pretty_json: false,
        };

        let path = write_csv(&sample_result(), &output).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_dir_all(&dir).ok();

        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "City,State,StateCode");
        assert_eq!(lines[1], "Austin,Texas,TX");
        assert_eq!(lines[2], "Houston,Texas,TX");
    }
}

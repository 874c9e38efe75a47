use std::path::Path;

use crate::{
    cli::cli::Result,
    models::CliApp,
    pipeline::Scope,
};
use tracing::info;

/// Default reference table location; when absent the state list is scraped.
const DEFAULT_REFERENCE: &str = "data/states.csv";

impl CliApp {
    pub async fn run_basic_pipeline(&self) -> Result<()> {
        println!("\n🗺️  Basic pipeline: all states");
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

        let reference = Path::new(DEFAULT_REFERENCE);
        let reference = if reference.is_file() {
            info!("Using reference table at {}", DEFAULT_REFERENCE);
            Some(reference)
        } else {
            info!("No reference table found, scraping the states index");
            None
        };

        let result = self.pipeline.run(&Scope::All, reference, false).await?;
        self.display_run_summary(&result).await?;

        Ok(())
    }
}

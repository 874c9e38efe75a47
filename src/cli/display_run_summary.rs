use crate::{cli::cli::Result, export, models::CliApp, models::PipelineResult};

impl CliApp {
    /// Prints the run summary and writes the JSON/CSV snapshots.
    pub async fn display_run_summary(&self, result: &PipelineResult) -> Result<()> {
        println!("\n📊 Run Summary");
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━");
        println!("States processed: {}", result.states.len());
        println!("States collected: {}", result.cities.len());
        println!("Cities collected: {}", result.cities.total_cities());

        if !result.failures.is_empty() {
            println!("\n⚠️  {} state(s) failed:", result.failures.len());
            for failure in &result.failures {
                println!("  ✗ {}: {}", failure.state, failure.error);
            }
        }

        let json_path = export::write_json(result, &self.config.output).await?;
        let csv_path = export::write_csv(result, &self.config.output)?;
        println!("\n📤 Exported:");
        println!("  {}", json_path.display());
        println!("  {}", csv_path.display());

        Ok(())
    }
}

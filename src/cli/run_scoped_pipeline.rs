use std::path::PathBuf;

use dialoguer::{theme::ColorfulTheme, Confirm, Input};

use crate::{
    cli::cli::Result,
    models::CliApp,
    pipeline::Scope,
};

impl CliApp {
    pub async fn run_scoped_pipeline(&self) -> Result<()> {
        println!("\n🎯 Scoped pipeline: selected states");
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

        let scope_input: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("States to collect (names or codes, comma-separated; empty = all)")
            .allow_empty(true)
            .interact_text()?;
        let scope = Scope::parse(&scope_input);

        let reference_input: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Reference table CSV (empty = scrape the states index)")
            .allow_empty(true)
            .interact_text()?;
        let reference: Option<PathBuf> = if reference_input.trim().is_empty() {
            None
        } else {
            Some(PathBuf::from(reference_input.trim()))
        };

        let strict = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Strict mode (abort on first per-state failure)?")
            .default(false)
            .interact()?;

        let result = self
            .pipeline
            .run(&scope, reference.as_deref(), strict)
            .await?;
        self.display_run_summary(&result).await?;

        Ok(())
    }
}

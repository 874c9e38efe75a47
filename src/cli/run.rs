use dialoguer::{theme::ColorfulTheme, Select};

use crate::{
    cli::cli::{MenuAction, Result},
    models::CliApp,
};
use tracing::error;

impl CliApp {
    pub async fn run(&self) -> Result<()> {
        println!("\n🗺️  Welcome to City Scraper!");
        println!("═══════════════════════════════════════");

        loop {
            let actions = vec![
                MenuAction::RunBasicPipeline,
                MenuAction::RunScopedPipeline,
                MenuAction::ShowConfig,
                MenuAction::Exit,
            ];

            let selection = Select::with_theme(&ColorfulTheme::default())
                .with_prompt("\nSelect an action")
                .default(0)
                .items(&actions)
                .interact()?;

            match &actions[selection] {
                MenuAction::RunBasicPipeline => {
                    if let Err(e) = self.run_basic_pipeline().await {
                        error!("Basic pipeline failed: {}", e);
                    }
                }
                MenuAction::RunScopedPipeline => {
                    if let Err(e) = self.run_scoped_pipeline().await {
                        error!("Scoped pipeline failed: {}", e);
                    }
                }
                MenuAction::ShowConfig => {
                    if let Err(e) = self.show_config() {
                        error!("Failed to show configuration: {}", e);
                    }
                }
                MenuAction::Exit => {
                    println!("\n👋 Thanks for using City Scraper!");
                    break;
                }
            }
        }

        Ok(())
    }
}

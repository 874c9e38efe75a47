use std::sync::Arc;

use crate::config::Config;
use crate::fetch::HttpFetcher;
use crate::models::CliApp;
use crate::pipeline::Pipeline;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Debug, Clone)]
pub enum MenuAction {
    RunBasicPipeline,
    RunScopedPipeline,
    ShowConfig,
    Exit,
}

impl std::fmt::Display for MenuAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MenuAction::RunBasicPipeline => {
                write!(f, "🗺️  Basic pipeline: collect cities for all states")
            }
            MenuAction::RunScopedPipeline => {
                write!(f, "🎯 Scoped pipeline: collect cities for selected states")
            }
            MenuAction::ShowConfig => write!(f, "⚙️  Show active configuration"),
            MenuAction::Exit => write!(f, "🚪 Exit"),
        }
    }
}

impl CliApp {
    pub fn new(config: Config) -> Result<Self> {
        let fetcher = Arc::new(HttpFetcher::new(&config.scraping));
        let pipeline = Pipeline::new(config.clone(), fetcher);

        Ok(Self { config, pipeline })
    }
}

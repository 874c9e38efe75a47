pub mod cli;
pub mod display_run_summary;
pub mod run;
pub mod run_basic_pipeline;
pub mod run_scoped_pipeline;
pub mod show_config;

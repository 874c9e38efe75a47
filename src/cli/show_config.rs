use crate::{cli::cli::Result, models::CliApp};

impl CliApp {
    pub fn show_config(&self) -> Result<()> {
        println!("\n⚙️  Active Configuration");
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━");
        println!("{}", serde_yaml::to_string(&self.config)?);
        Ok(())
    }
}

use crate::config::toml_config::PosConfig;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "coffee-pos")]
#[command(about = "Cashier front counter for the coffee shop POS backend")]
pub struct CliConfig {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override api.base_url from the config file
    #[arg(long)]
    pub api_url: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List the menu fetched from the backend
    Menu,
    /// Ring up an order script and print the receipt
    Checkout {
        /// TOML order script
        #[arg(short, long)]
        order: PathBuf,

        /// Build and print the receipt without submitting the transaction
        #[arg(long)]
        dry_run: bool,
    },
}

impl CliConfig {
    /// 載入配置檔並套用命令列覆蓋設定
    pub fn load_config(&self) -> Result<PosConfig> {
        let mut config = match &self.config {
            Some(path) => PosConfig::from_file(path)?,
            None => PosConfig::default(),
        };

        if let Some(api_url) = &self.api_url {
            config.api.base_url = api_url.clone();
        }

        Ok(config)
    }
}

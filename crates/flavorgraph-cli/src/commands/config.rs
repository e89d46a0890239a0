//! Config command for managing CLI configuration

use clap::{Args, Subcommand};

use crate::config::{config_file_path, Config};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Get a config value
    Get {
        /// Config key name
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key name
        key: String,
        /// New value (empty to unset)
        value: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
    /// Initialize default config file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

pub fn run(args: &ConfigArgs) -> anyhow::Result<()> {
    let path = config_file_path();
    match &args.command {
        ConfigCommands::Get { key } => {
            println!("{}", Config::try_load()?.require(key)?);
        }
        ConfigCommands::Set { key, value } => {
            let shown = Config::update_file(&path, key, value)?;
            println!("Set {} = {}", key, shown);
        }
        ConfigCommands::List => {
            let config = Config::try_load()?;
            println!("Config file: {}", path.display());
            println!();
            for (key, value) in config.entries() {
                println!("{} = {}", key, value);
            }
        }
        ConfigCommands::Path => println!("{}", path.display()),
        ConfigCommands::Init { force } => {
            Config::init_file(&path, *force)?;
            println!("Created config file at {}", path.display());
        }
    }
    Ok(())
}

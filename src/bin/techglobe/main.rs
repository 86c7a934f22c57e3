use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use spdlog::{info, warn};

use techglobe::logger::configure_logger;
use techglobe::server::server_run;

use crate::config::{generate_cfg, open_config};

mod config;
mod config_data;

const CFG_FILE_NAME: &str = "techglobe.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path
    #[arg(short, long)]
    config_path: Option<String>,

    /// Writes a sample configuration to the config path (or the user config dir) and exits
    #[arg(short, long)]
    generate_config: bool,
}

#[ntex::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.config_path.map(PathBuf::from);

    if args.generate_config {
        let path = generate_cfg(config_path)?;
        println!("Sample configuration written to {}", path.display());
        return Ok(());
    }

    let config = match open_config(config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            eprintln!("Please run techglobe --help");
            return Ok(());
        }
    };

    if let Err(err) = configure_logger(config.log.as_ref()) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    info!("Starting TechGlobe =-=-=-=-=-=-=-=-=-=-=-=-=-=-=-");
    info!("Listening on {}:{}", config.server.address, config.server.port);

    Ok(server_run(config).await?)
}

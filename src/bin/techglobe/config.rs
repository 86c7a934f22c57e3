use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use techglobe::config::{read_config, Config};

use crate::config_data::write_sample_cfg;
use crate::CFG_FILE_NAME;

fn get_config_path() -> Option<PathBuf> {
    let exe_dir = env::current_exe().ok()
        .and_then(|exe| exe.parent().map(|dir| dir.to_path_buf()));
    let candidates = [
        exe_dir,
        env::current_dir().ok(),
        dirs::config_dir(),
    ];

    candidates.into_iter()
        .flatten()
        .map(|dir| dir.join(CFG_FILE_NAME))
        .find(|path| path.exists())
}

pub(crate) fn open_config(cfg_path: Option<PathBuf>) -> Result<Config> {
    let config_path = match cfg_path.or_else(get_config_path) {
        Some(path) => path,
        None => return Err(anyhow!("Could not find TechGlobe configuration ({})", CFG_FILE_NAME)),
    };

    println!("Reading config from {}", config_path.display());
    let mut config = read_config(&config_path)?;

    if let Some(mut log) = config.log {
        if log.location.is_none() {
            log.location = dirs::cache_dir()
                .map(|dir| dir.join("TechGlobe").join("log").join("server.log"));
        }
        match log.location {
            Some(ref location) => println!("Log enabled. Files will be written in {}", location.display()),
            None => println!("Log enabled. No cache dir found, using stdout"),
        }
        config.log = Some(log);
    } else {
        println!("Log disabled. Using stdout");
    }

    Ok(config)
}

pub(crate) fn generate_cfg(config_path: Option<PathBuf>) -> Result<PathBuf> {
    let path = match config_path {
        Some(path) => path,
        None => dirs::config_dir()
            .context("Could not find user config dir")?
            .join(CFG_FILE_NAME),
    };

    write_sample_cfg(&path)
        .with_context(|| format!("Error writing sample config to {}", path.display()))?;

    Ok(path)
}

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

#[derive(Deserialize)]
pub struct Site {
    pub title: String,
    pub tagline: String,
}

#[derive(Deserialize)]
pub struct Paths {
    pub template_dir: PathBuf,
    pub public_dir: PathBuf,
}

#[derive(Deserialize)]
pub struct Defaults {
    #[serde(default = "default_related_limit")]
    pub related_limit: usize,
    #[serde(default = "default_toc_offset")]
    pub toc_offset: f64,
    pub rendering_cache_enabled: bool,
}

fn default_related_limit() -> usize {
    crate::related::DEFAULT_RELATED_LIMIT
}

fn default_toc_offset() -> f64 {
    100.0
}

#[derive(Deserialize)]
pub struct Server {
    pub address: String,
    pub port: u16,
}

#[derive(Deserialize)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone, Debug, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize)]
pub struct Subscribe {
    pub delay_ms: u64,
}

impl Default for Subscribe {
    fn default() -> Self {
        Subscribe { delay_ms: 1500 }
    }
}

#[derive(Deserialize)]
pub struct Comments {
    pub default_author: String,
}

impl Default for Comments {
    fn default() -> Self {
        Comments { default_author: "You".to_string() }
    }
}

#[derive(Deserialize)]
pub struct Ads {
    pub client: String,
    pub home_slot: Option<String>,
    pub article_slot: Option<String>,
    pub search_slot: Option<String>,
}

#[derive(Deserialize)]
pub struct Config {
    pub site: Site,
    pub paths: Paths,
    pub defaults: Defaults,
    pub server: Server,
    pub log: Option<Log>,
    #[serde(default)]
    pub subscribe: Subscribe,
    #[serde(default)]
    pub comments: Comments,
    pub ads: Option<Ads>,
}

fn parse_path(path: PathBuf) -> io::Result<PathBuf> {
    if !path.starts_with("${exe_dir}") {
        return Ok(path);
    }

    let cur_exe = env::current_exe()?;
    let exe_dir = cur_exe.parent()
        .ok_or_else(|| io::Error::new(ErrorKind::NotFound, "Executable has no parent directory"))?;
    let rest = path.strip_prefix("${exe_dir}")
        .map_err(|e| io::Error::new(ErrorKind::InvalidInput, e.to_string()))?;
    Ok(exe_dir.join(rest))
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    cfg.paths = Paths {
        template_dir: parse_path(cfg.paths.template_dir)?,
        public_dir: parse_path(cfg.paths.public_dir)?,
    };

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}

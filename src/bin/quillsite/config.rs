use std::env;
use std::path::PathBuf;

use quillsite::config::{read_config, Config};

use crate::CFG_FILE_NAME;

fn get_config_path() -> Option<PathBuf> {
    let mut candidates = vec![];

    if let Some(exe_dir) = env::current_exe().ok().and_then(|exe| exe.parent().map(|p| p.to_path_buf())) {
        candidates.push(exe_dir.join(CFG_FILE_NAME));
    }
    if let Ok(cur_dir) = env::current_dir() {
        candidates.push(cur_dir.join(CFG_FILE_NAME));
    }
    if let Some(cfg_dir) = dirs::config_dir() {
        candidates.push(cfg_dir.join("quillsite").join(CFG_FILE_NAME));
    }

    candidates.into_iter().find(|path| path.exists())
}

/// An explicit path must exist. Without one the usual places are searched, and
/// when nothing is found the built-in defaults are used.
pub(crate) fn open_config(cfg_path: Option<PathBuf>) -> anyhow::Result<Config> {
    let config_path = match cfg_path {
        Some(path) => Some(path),
        None => get_config_path(),
    };

    let mut config = match config_path {
        Some(ref path) => {
            println!("Reading config from {}", path.display());
            read_config(path)?
        }
        None => {
            println!("No {} found. Using defaults", CFG_FILE_NAME);
            Config::default()
        }
    };

    if let Some(ref mut log) = config.log {
        if log.location.is_none() {
            log.location = dirs::cache_dir()
                .map(|dir| dir.join("quillsite").join("log").join("quillsite.log"));
        }
        if let Some(ref location) = log.location {
            println!("Log enabled. Files will be written in {}", location.display());
        }
    }

    Ok(config)
}

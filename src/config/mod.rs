use std::fs;
use std::path::Path;
use log::warn;
use serde::Deserialize;

/// Optional rules file. When present, its `[[rules]]` tables replace the
/// built-in categorisation table, in file order.
#[derive(Deserialize, Debug, Default)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) rules: Vec<RuleGroup>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct RuleGroup {
    pub(crate) category: String,
    pub(crate) keywords: Vec<String>,
}

impl Config {
    pub(crate) fn empty() -> Config {
        Config { rules: vec![] }
    }

    pub(crate) fn load_from_file(file_path: &str) -> Config {
        let path = Path::new(file_path);
        if path.exists() && path.is_file() {
            match fs::read_to_string(path) {
                Ok(content) => match toml::from_str::<Config>(&content) {
                    Ok(config) => config,
                    Err(e) => {
                        warn!("Ignoring rules file {file_path}: {e}");
                        Config::empty()
                    }
                },
                Err(e) => {
                    warn!("Unable to read rules file {file_path}: {e}");
                    Config::empty()
                }
            }
        } else {
            Config::empty()
        }
    }
}

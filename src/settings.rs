use anyhow::{anyhow, Result};
use std::env;
use std::path::PathBuf;

use crate::bank::{ParseMode, DEFAULT_SLOT};
use crate::storage;

#[derive(Clone, Debug)]
pub struct Settings {
    /// Where saved banks live. Defaults to the platform data directory.
    pub data_dir: Option<PathBuf>,
    pub slot: String,
    pub randomize_by_default: bool,
    pub parse_mode: ParseMode,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            data_dir: None,
            slot: DEFAULT_SLOT.to_owned(),
            randomize_by_default: false,
            parse_mode: ParseMode::Lenient,
        }
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" | "" => Ok(false),
        other => Err(anyhow!("{} must be true or false, found {:?}", name, other)),
    }
}

impl Settings {
    pub fn from_env() -> Result<Settings> {
        Settings::from_vars(|name| env::var(name).ok())
    }

    pub fn from_vars<F>(lookup: F) -> Result<Settings>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();
        if let Some(dir) = lookup("QUIZ_BANK_DIR") {
            settings.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(slot) = lookup("QUIZ_BANK_SLOT") {
            if slot.trim().is_empty() {
                return Err(anyhow!("QUIZ_BANK_SLOT cannot be blank"));
            }
            settings.slot = slot.trim().to_owned();
        }
        if let Some(value) = lookup("QUIZ_BANK_RANDOMIZE") {
            settings.randomize_by_default = parse_flag("QUIZ_BANK_RANDOMIZE", &value)?;
        }
        if let Some(value) = lookup("QUIZ_BANK_STRICT") {
            if parse_flag("QUIZ_BANK_STRICT", &value)? {
                settings.parse_mode = ParseMode::Strict;
            }
        }
        Ok(settings)
    }

    pub fn storage_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => storage::get_data_dir(),
        }
    }
}

use crate::settings::error::SettingsError;
use std::{collections::HashMap, fs, path::Path};

/// Page size of paginated `SELECT`s.
pub const BATCH_SIZE_VAR: &str = "CURSOR_BATCH_SIZE";

/// Default row count of `fetch_many`.
pub const ARRAY_SIZE_VAR: &str = "CURSOR_ARRAY_SIZE";

/// Environment variables from the process, optionally overlaid with a
/// `.env` style file.
#[derive(Debug, Clone, Default)]
pub struct EnvVars {
    vars: HashMap<String, String>,
}

impl EnvVars {
    /// Snapshot of the process environment.
    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    pub fn from_map(vars: HashMap<String, String>) -> Self {
        Self { vars }
    }

    /// Overlay variables from a `.env` file; file entries win.
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), SettingsError> {
        let content = fs::read_to_string(path.as_ref())?;
        self.parse_env_content(&content)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Reads `key` as a `usize`; `Ok(None)` when unset or blank.
    pub fn get_usize(&self, key: &str) -> Result<Option<usize>, SettingsError> {
        match self.get(key).map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse::<usize>()
                .map(Some)
                .map_err(|_| SettingsError::InvalidValue {
                    key: key.to_string(),
                    value: raw.to_string(),
                }),
        }
    }

    fn parse_env_content(&mut self, content: &str) -> Result<(), SettingsError> {
        for (line_num, line) in content.lines().enumerate() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                return Err(SettingsError::EnvFile(format!(
                    "malformed line {} (expected KEY=VALUE)",
                    line_num + 1
                )));
            };

            let key = key.trim();
            if key.is_empty() {
                return Err(SettingsError::EnvFile(format!(
                    "empty key at line {}",
                    line_num + 1
                )));
            }

            self.vars
                .insert(key.to_string(), Self::unquote_value(value).to_string());
        }

        Ok(())
    }

    fn unquote_value(value: &str) -> &str {
        let value = value.trim();
        for quote in ['"', '\''] {
            if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
                return &value[1..value.len() - 1];
            }
        }
        value
    }
}

use crate::settings::{
    env::{ARRAY_SIZE_VAR, BATCH_SIZE_VAR, EnvVars},
    error::SettingsError,
    validated::ValidatedSettings,
    validator::SettingsValidator,
};
use engine_core::cursor::{DEFAULT_ARRAY_SIZE, DEFAULT_BATCH_SIZE};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod env;
pub mod error;
pub mod validated;
pub mod validator;

/// Cursor tuning as written by the user, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorSettings {
    /// Rows per page of a paginated `SELECT`.
    pub batch_size: usize,
    /// Rows returned by `fetch_many` without an explicit count.
    pub array_size: usize,
}

impl Default for CursorSettings {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE.get(),
            array_size: DEFAULT_ARRAY_SIZE,
        }
    }
}

impl CursorSettings {
    /// Reads settings from a JSON document; missing keys keep their defaults.
    pub fn from_json(source: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Reads `CURSOR_BATCH_SIZE` / `CURSOR_ARRAY_SIZE`; unset variables keep
    /// their defaults.
    pub fn from_env(env: &EnvVars) -> Result<Self, SettingsError> {
        let defaults = Self::default();
        Ok(Self {
            batch_size: env
                .get_usize(BATCH_SIZE_VAR)?
                .unwrap_or(defaults.batch_size),
            array_size: env
                .get_usize(ARRAY_SIZE_VAR)?
                .unwrap_or(defaults.array_size),
        })
    }

    /// Reads settings from the process environment, with `env_file` entries
    /// (if any) taking precedence.
    pub fn from_process_env(env_file: Option<&Path>) -> Result<Self, SettingsError> {
        let mut env = EnvVars::from_process();
        if let Some(path) = env_file {
            env.load_from_file(path)?;
        }
        Self::from_env(&env)
    }

    pub fn validate(&self) -> Result<ValidatedSettings, SettingsError> {
        SettingsValidator::new(self).validate()
    }
}

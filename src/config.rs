// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::remote::DEFAULT_BASE_URL;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Pitaka", "pitaka"));

pub const ENV_API_URL: &str = "PITAKA_API_URL";
pub const ENV_DB: &str = "PITAKA_DB";
pub const ENV_SESSION: &str = "PITAKA_SESSION";

pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(APP.0, APP.1, APP.2)
}

/// Where transactions live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Backend {
    Remote {
        #[serde(default = "default_base_url")]
        base_url: String,
        #[serde(default)]
        session_cookie: Option<String>,
    },
    Local {
        #[serde(default)]
        db_path: Option<PathBuf>,
    },
}

impl Default for Backend {
    fn default() -> Self {
        Backend::Local { db_path: None }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_notice_ttl() -> u64 {
    5
}

fn default_timeout() -> u64 {
    15
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: Backend,
    #[serde(default = "default_notice_ttl")]
    pub notice_ttl_secs: u64,
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub color_seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            notice_ttl_secs: default_notice_ttl(),
            request_timeout_secs: default_timeout(),
            color_seed: None,
        }
    }
}

impl Config {
    pub fn path() -> Result<PathBuf, ConfigError> {
        let proj = project_dirs().ok_or(ConfigError::NoHomeDir)?;
        Ok(proj.config_dir().join("config.json"))
    }

    /// Reads the config file if present and applies environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let cfg = Self::from_file(&Self::path()?)?;
        Ok(cfg.with_overrides(|k| env::var(k).ok()))
    }

    /// Defaults when `path` does not exist.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.display().to_string(),
                    source,
                })
            }
        };
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// `lookup` resolves environment variable names; injected for tests.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.is_empty()) {
            let session_cookie = match &self.backend {
                Backend::Remote { session_cookie, .. } => session_cookie.clone(),
                Backend::Local { .. } => None,
            };
            self.backend = Backend::Remote {
                base_url: url,
                session_cookie,
            };
        } else if let Some(db) = lookup(ENV_DB).filter(|v| !v.is_empty()) {
            self.backend = Backend::Local {
                db_path: Some(PathBuf::from(db)),
            };
        }
        if let Some(cookie) = lookup(ENV_SESSION).filter(|v| !v.is_empty()) {
            if let Backend::Remote { session_cookie, .. } = &mut self.backend {
                *session_cookie = Some(cookie);
            }
        }
        self
    }

    pub fn notice_ttl(&self) -> Duration {
        Duration::from_secs(self.notice_ttl_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

//! Service configuration.
//!
//! Loaded from a YAML file with per-field serde defaults; Twilio credentials
//! and numbers may also come from the environment (`TWILIO_ACCOUNT_SID`,
//! `TWILIO_AUTH_TOKEN`, `TWILIO_FROM_NUMBER`, `TWILIO_TO_NUMBER`), which
//! takes precedence over the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::call::CallTarget;
use crate::error::Result;

// ---------------------------------------------------------------------------
// TwilioConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwilioConfig {
    #[serde(default)]
    pub account_sid: String,
    #[serde(default)]
    pub auth_token: String,
    #[serde(default)]
    pub from_number: String,
    #[serde(default)]
    pub to_number: String,
    /// TwiML document fetched by Twilio when the callee answers.
    #[serde(default = "default_voice_url")]
    pub voice_url: String,
    /// Overridable so tests can point the client at a mock server.
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

fn default_voice_url() -> String {
    "http://demo.twilio.com/docs/voice.xml".to_string()
}

fn default_api_base() -> String {
    "https://api.twilio.com".to_string()
}

impl Default for TwilioConfig {
    fn default() -> Self {
        Self {
            account_sid: String::new(),
            auth_token: String::new(),
            from_number: String::new(),
            to_number: String::new(),
            voice_url: default_voice_url(),
            api_base: default_api_base(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
    #[serde(default)]
    pub twilio: TwilioConfig,
}

fn default_port() -> u16 {
    8080
}

fn default_db_path() -> PathBuf {
    PathBuf::from("dialback.redb")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            db_path: default_db_path(),
            twilio: TwilioConfig::default(),
        }
    }
}

impl Config {
    /// Load the config file at `path`, falling back to defaults if it does
    /// not exist, then apply environment overrides.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(path)?;
            serde_yaml::from_str(&raw)?
        } else {
            Config::default()
        };
        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(v) = std::env::var("TWILIO_ACCOUNT_SID") {
            self.twilio.account_sid = v;
        }
        if let Ok(v) = std::env::var("TWILIO_AUTH_TOKEN") {
            self.twilio.auth_token = v;
        }
        if let Ok(v) = std::env::var("TWILIO_FROM_NUMBER") {
            self.twilio.from_number = v;
        }
        if let Ok(v) = std::env::var("TWILIO_TO_NUMBER") {
            self.twilio.to_number = v;
        }
    }

    /// The fixed target pair every scheduled call dials.
    pub fn target(&self) -> CallTarget {
        CallTarget {
            to_number: self.twilio.to_number.clone(),
            from_number: self.twilio.from_number.clone(),
        }
    }
}

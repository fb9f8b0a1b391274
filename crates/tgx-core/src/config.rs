use std::{env, fs, path::Path};

use crate::{
    errors::Error,
    messaging::{
        options::{DeliveryOptions, SendOptions},
        types::ParseMode,
    },
    Result,
};

/// Typed configuration for the SDK.
///
/// Values come from the environment, optionally seeded from a `.env` file in
/// the working directory (existing variables are never overridden).
#[derive(Clone, Debug)]
pub struct Config {
    pub bot_token: String,
    /// Custom Bot API server (e.g. a local `telegram-bot-api` instance).
    pub api_url: Option<String>,

    // Send defaults
    pub link_preview: bool,
    pub parse_mode: Option<ParseMode>,
    pub silent: bool,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (environment, map, ...).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bot_token = lookup("TGX_BOT_TOKEN").unwrap_or_default();
        if bot_token.trim().is_empty() {
            return Err(Error::Config(
                "TGX_BOT_TOKEN environment variable is required".to_string(),
            ));
        }

        let api_url = lookup("TGX_API_URL").and_then(non_empty);

        let link_preview = lookup("TGX_LINK_PREVIEW")
            .map(|v| parse_bool(&v))
            .unwrap_or(true);
        let silent = lookup("TGX_SILENT")
            .map(|v| parse_bool(&v))
            .unwrap_or(false);

        let parse_mode = match lookup("TGX_PARSE_MODE").and_then(non_empty) {
            Some(v) => Some(
                v.parse::<ParseMode>()
                    .map_err(|_| Error::Config(format!("TGX_PARSE_MODE: unknown mode {v:?}")))?,
            ),
            None => None,
        };

        Ok(Self {
            bot_token,
            api_url,
            link_preview,
            parse_mode,
            silent,
        })
    }

    /// Base options for a dispatcher built from this config.
    pub fn send_defaults(&self) -> SendOptions {
        SendOptions {
            delivery: DeliveryOptions {
                silent: self.silent,
                parse_mode: self.parse_mode,
                ..Default::default()
            },
            link_preview: self.link_preview,
            ..Default::default()
        }
    }
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for (key, val) in parse_dotenv(&contents) {
        if env::var_os(&key).is_some() {
            continue; // do not override existing env
        }
        env::set_var(key, val);
    }
}

fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        out.push((key.to_string(), val));
    }
    out
}

fn parse_bool(s: &str) -> bool {
    matches!(
        s.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use reqwest::Url;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_LOG_FILE: &str = "todo-client.log";

const API_URL_VAR: &str = "TODO_API_URL";
const LOG_FILE_VAR: &str = "TODO_LOG_FILE";

/// Runtime settings for the client.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Service root, without a trailing slash and without the `/tasks` collection.
    pub api_url: String,
    /// Where diagnostics go, since the terminal itself is taken by the UI.
    pub log_file: PathBuf,
}

impl Config {
    /// Reads the settings from the process environment, after loading a `.env` file if any.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the settings from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_url = non_blank(lookup(API_URL_VAR)).unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = normalize_api_url(&raw_url)
            .with_context(|| format!("{API_URL_VAR} is not a usable base URL: {raw_url}"))?;

        let log_file = non_blank(lookup(LOG_FILE_VAR))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

        Ok(Self { api_url, log_file })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Validates the base URL and strips trailing slashes.
/// A URL pointing at the collection itself (`.../tasks`) is accepted as well.
fn normalize_api_url(raw: &str) -> Result<String> {
    let url = Url::parse(raw.trim()).context("Failed to parse URL")?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("unsupported scheme '{}'", url.scheme());
    }
    // `/tasks` is appended to the path, so nothing may follow it
    if url.query().is_some() || url.fragment().is_some() {
        bail!("query strings and fragments are not supported");
    }

    let trimmed = url.as_str().trim_end_matches('/');
    let root = trimmed.strip_suffix("/tasks").unwrap_or(trimmed);
    Ok(root.to_string())
}

// Copyright (c) 2026 - present gitpost contributors
// SPDX-License-Identifier: MIT

//! Generation context
//!
//! Settings that shape the prompt: the API key for a downstream model, an
//! optional custom persona, example posts and the template. The context is
//! loaded once and passed explicitly to whatever needs it.

use crate::prompt::PromptTemplate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable that overrides the stored API key
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Errors while loading a generation context file
#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    /// The file exists but could not be read
    #[error("Failed to read context file {path}: {source}")]
    Read {
        /// Context file path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The file is not valid context JSON
    #[error("Invalid context file {path}: {source}")]
    Parse {
        /// Context file path
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },
}

/// Prompt settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationContext {
    /// Key for the downstream generative-text API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Replaces the default persona line of the prompt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_prompt: Option<String>,
    /// Posts whose style the output should follow
    pub example_urls: Vec<String>,
    /// Prompt shape
    pub template: PromptTemplate,
    /// Append the statistics report to the prompt
    pub include_stats: bool,
}

impl Default for GenerationContext {
    fn default() -> Self {
        Self {
            api_key: None,
            custom_prompt: None,
            example_urls: Vec::new(),
            template: PromptTemplate::default(),
            include_stats: true,
        }
    }
}

impl GenerationContext {
    /// Load a context from a JSON file
    ///
    /// A missing file yields the default context.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ContextError> {
        let path = path.as_ref();
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No context file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ContextError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        serde_json::from_str(&text).map_err(|source| ContextError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Replace the API key when `key` is present and non-blank
    #[must_use]
    pub fn with_api_key_override(mut self, key: Option<String>) -> Self {
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
        self
    }

    /// Apply the `GEMINI_API_KEY` environment override
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_api_key_override(std::env::var(API_KEY_ENV).ok())
    }

    /// Custom persona line, if one is set and non-blank
    #[must_use]
    pub fn custom_prompt(&self) -> Option<&str> {
        self.custom_prompt
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }

    /// API key safe for display: first and last four characters
    ///
    /// Keys of eight characters or fewer are fully masked.
    #[must_use]
    pub fn masked_api_key(&self) -> Option<String> {
        let key = self.api_key.as_deref()?;
        let chars: Vec<char> = key.chars().collect();
        if chars.len() <= 8 {
            return Some("*".repeat(chars.len()));
        }
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        Some(format!("{head}...{tail}"))
    }
}

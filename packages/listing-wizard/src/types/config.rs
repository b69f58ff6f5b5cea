//! Configuration for a wizard session.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};

use crate::i18n::Language;

/// Storage key the basic-info payload is persisted under.
pub const DRAFT_STORAGE_KEY: &str = "post-ad-basic-info";

/// Storage key for the selected UI language.
pub const LANGUAGE_STORAGE_KEY: &str = "lang";

/// Limits and storage keys used by the wizard.
///
/// Missing fields take their [`Default`] values when deserialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    /// Maximum number of photos in the gallery.
    ///
    /// Files beyond the limit are rejected with a capacity notice.
    /// Default: 20.
    pub max_media: usize,

    /// Per-file size shown as a hint next to the upload area.
    ///
    /// Display only, nothing is rejected on size. Default: 10 MB.
    pub max_file_size_bytes: usize,

    /// Accept filter hint for the file input. Default: `image/*`.
    pub accept: String,

    /// Key the draft is persisted under.
    pub storage_key: String,

    /// Key the language preference is persisted under.
    pub language_key: String,

    /// Language consulted when a key is missing in the active one.
    ///
    /// Default: German.
    pub fallback_language: Language,

    /// Maximum length of the free-text property description.
    pub max_description_chars: usize,

    /// Directory for file-backed storage. `None` keeps everything in memory.
    pub storage_dir: Option<PathBuf>,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            max_media: 20,
            max_file_size_bytes: 10 * 1024 * 1024,
            accept: "image/*".to_string(),
            storage_key: DRAFT_STORAGE_KEY.to_string(),
            language_key: LANGUAGE_STORAGE_KEY.to_string(),
            fallback_language: Language::De,
            max_description_chars: 2000,
            storage_dir: None,
        }
    }
}

impl WizardConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load overrides from environment variables (and `.env` if present).
    ///
    /// - `LISTING_MAX_MEDIA`: gallery capacity
    /// - `LISTING_STORAGE_DIR`: directory for persisted values
    /// - `LISTING_FALLBACK_LANG`: fallback language code
    pub fn from_env() -> Result<Self> {
        let _ = dotenv();

        let mut config = Self::default();
        if let Ok(max) = env::var("LISTING_MAX_MEDIA") {
            config.max_media = max
                .parse()
                .context("LISTING_MAX_MEDIA must be a valid number")?;
        }
        if let Ok(dir) = env::var("LISTING_STORAGE_DIR") {
            config.storage_dir = Some(PathBuf::from(dir));
        }
        if let Ok(lang) = env::var("LISTING_FALLBACK_LANG") {
            config.fallback_language = lang
                .parse()
                .context("LISTING_FALLBACK_LANG must be one of de, en, fr, ar")?;
        }
        Ok(config)
    }

    /// Set the gallery capacity.
    pub fn with_max_media(mut self, max: usize) -> Self {
        self.max_media = max;
        self
    }

    /// Set the draft storage key.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn with_fallback_language(mut self, lang: Language) -> Self {
        self.fallback_language = lang;
        self
    }

    pub fn with_storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = Some(dir.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_upload_form() {
        let config = WizardConfig::default();
        assert_eq!(config.max_media, 20);
        assert_eq!(config.max_file_size_bytes, 10 * 1024 * 1024);
        assert_eq!(config.accept, "image/*");
        assert_eq!(config.storage_key, "post-ad-basic-info");
        assert_eq!(config.language_key, "lang");
        assert_eq!(config.fallback_language, Language::De);
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let config: WizardConfig =
            serde_json::from_str(r#"{"max_media": 5, "fallback_language": "en"}"#).unwrap();
        assert_eq!(config.max_media, 5);
        assert_eq!(config.fallback_language, Language::En);
        assert_eq!(config.storage_key, DRAFT_STORAGE_KEY);
        assert_eq!(config.max_description_chars, 2000);
        assert!(config.storage_dir.is_none());
    }

    #[test]
    fn builders_override_defaults() {
        let config = WizardConfig::new()
            .with_max_media(3)
            .with_storage_key("draft")
            .with_fallback_language(Language::En);
        assert_eq!(config.max_media, 3);
        assert_eq!(config.storage_key, "draft");
        assert_eq!(config.fallback_language, Language::En);
    }
}

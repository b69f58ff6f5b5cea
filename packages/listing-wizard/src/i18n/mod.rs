//! Translation lookup for wizard strings.
//!
//! Tables are nested JSON objects. `t("post_ad.steps.photos")` walks the
//! active language's table segment by segment, falls back to the same path
//! in the fallback language, and finally returns the key itself.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Result, WizardError};
use crate::store::KeyValueStore;

const DE: &str = include_str!("locales/de.json");
const EN: &str = include_str!("locales/en.json");
const FR: &str = include_str!("locales/fr.json");
const AR: &str = include_str!("locales/ar.json");

/// Supported UI languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    De,
    En,
    Fr,
    Ar,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::De => "de",
            Language::En => "en",
            Language::Fr => "fr",
            Language::Ar => "ar",
        }
    }

    /// Name of the language in itself, for the language picker.
    pub fn native_name(&self) -> &'static str {
        match self {
            Language::De => "Deutsch",
            Language::En => "English",
            Language::Fr => "Français",
            Language::Ar => "العربية",
        }
    }

    pub fn direction(&self) -> Direction {
        match self {
            Language::Ar => Direction::Rtl,
            _ => Direction::Ltr,
        }
    }

    pub fn all() -> &'static [Language] {
        &[Language::De, Language::En, Language::Fr, Language::Ar]
    }

    /// Map a locale such as `fr-CA` to a language; anything unknown is German.
    pub fn from_locale(locale: &str) -> Self {
        let locale = locale.to_ascii_lowercase();
        if locale.starts_with("fr") {
            Language::Fr
        } else if locale.starts_with("ar") {
            Language::Ar
        } else if locale.starts_with("en") {
            Language::En
        } else {
            Language::De
        }
    }

    /// Initial language: a valid stored choice wins, else the locale.
    pub fn initial(stored: Option<&str>, locale: &str) -> Self {
        stored
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(|| Self::from_locale(locale))
    }
}

impl FromStr for Language {
    type Err = WizardError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|l| l.code() == s)
            .ok_or_else(|| WizardError::UnsupportedLanguage(s.to_string()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Text direction of the active language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

/// Resolves dotted keys against per-language tables.
#[derive(Debug, Clone)]
pub struct Translator {
    tables: HashMap<Language, Value>,
    active: Language,
    fallback: Language,
}

impl Translator {
    /// Translator with the bundled wizard tables.
    pub fn bundled(active: Language, fallback: Language) -> Result<Self> {
        let mut translator = Self::empty(active, fallback);
        for (lang, json) in [
            (Language::De, DE),
            (Language::En, EN),
            (Language::Fr, FR),
            (Language::Ar, AR),
        ] {
            translator.load_json(lang, json)?;
        }
        Ok(translator)
    }

    /// Translator without any tables; every lookup returns its key.
    pub fn empty(active: Language, fallback: Language) -> Self {
        Self {
            tables: HashMap::new(),
            active,
            fallback,
        }
    }

    /// Install a table for `lang`, replacing any previous one.
    pub fn with_table(mut self, lang: Language, table: Value) -> Self {
        self.tables.insert(lang, table);
        self
    }

    pub fn load_json(&mut self, lang: Language, json: &str) -> Result<()> {
        let table = serde_json::from_str(json).map_err(|source| WizardError::TranslationTable {
            lang: lang.code().to_string(),
            source,
        })?;
        self.tables.insert(lang, table);
        Ok(())
    }

    pub fn language(&self) -> Language {
        self.active
    }

    pub fn direction(&self) -> Direction {
        self.active.direction()
    }

    pub fn set_language(&mut self, lang: Language) {
        self.active = lang;
    }

    /// Translate `key`, falling back to the fallback language, then the key.
    ///
    /// An empty text in the active language counts as missing; the
    /// fallback language's text is used as it is, even when empty.
    pub fn t(&self, key: &str) -> String {
        self.lookup(self.active, key)
            .filter(|s| !s.is_empty())
            .or_else(|| self.lookup(self.fallback, key))
            .map(str::to_string)
            .unwrap_or_else(|| {
                debug!(key, "missing translation");
                key.to_string()
            })
    }

    fn lookup(&self, lang: Language, key: &str) -> Option<&str> {
        let mut current = self.tables.get(&lang)?;
        for segment in key.split('.') {
            current = current.as_object()?.get(segment)?;
        }
        current.as_str()
    }
}

/// Language choice persisted under a fixed key.
pub struct LanguagePreference<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> LanguagePreference<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Stored language if valid, else inferred from `locale`.
    pub fn resolve(&self, locale: &str) -> Language {
        let stored = match self.store.get(&self.key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %self.key, error = %e, "could not read language preference");
                None
            }
        };
        Language::initial(stored.as_deref(), locale)
    }

    /// Persist the choice. Failures are logged and ignored.
    pub fn save(&self, lang: Language) {
        if let Err(e) = self.store.set(&self.key, lang.code()) {
            warn!(key = %self.key, error = %e, "language preference not saved");
        }
    }
}

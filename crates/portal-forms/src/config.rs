// File: src/config.rs
// Purpose: Portal configuration parsing from portal.toml

use anyhow::{Context, Result};
use portal_forms_validation::{AttachmentPolicy, NumberRule};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Portal configuration, injected into every form validator
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PortalConfig {
    #[serde(default)]
    pub districts: Districts,

    #[serde(default)]
    pub attachment: AttachmentPolicy,

    #[serde(default)]
    pub rules: RulesConfig,

    #[serde(default)]
    pub behavior: BehaviorConfig,
}

/// Named districts (osiedla) and their numeric identifiers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Districts(BTreeMap<String, u32>);

impl Districts {
    pub fn new(entries: impl IntoIterator<Item = (String, u32)>) -> Self {
        Self(entries.into_iter().collect())
    }

    /// Identifier of a district, if the name is known
    pub fn id_of(&self, name: &str) -> Option<u32> {
        self.0.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Districts {
    fn default() -> Self {
        Self::new(
            DEFAULT_DISTRICTS
                .iter()
                .map(|&(name, id)| (name.to_string(), id)),
        )
    }
}

const DEFAULT_DISTRICTS: &[(&str, u32)] = &[
    ("Winiary", 1),
    ("Skarpa", 2),
    ("Miodowa", 3),
    ("Stare Miasto", 4),
    ("Tysiąclecia", 5),
    ("Kochanowskiego", 6),
    ("Dworcowa", 7),
    ("Trzepowo", 8),
    ("Łukasiewicza", 9),
    ("Kolegialna", 10),
    ("Wyszogrodzka", 11),
    ("Międzytorze", 12),
    ("Podolszyce Pn.", 13),
    ("Podolszyce Pd.", 14),
    ("Zielony Jar", 15),
    ("Borowiczki", 16),
    ("Imielnica", 17),
    ("Radziwie", 18),
    ("Góry", 19),
    ("Ciechomice", 20),
    ("Pradolina Wisły", 21),
];

/// Limits used by the rule sets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Maximum trimmed length of the notes field (default: 256)
    #[serde(default = "default_notes_max_len")]
    pub notes_max_len: usize,

    /// Minimum age in whole calendar years (default: 18)
    #[serde(default = "default_min_age_years")]
    pub min_age_years: i32,

    /// Extra numeric inputs on the application form
    #[serde(default)]
    pub numeric_fields: Vec<NumericField>,
}

/// A numeric input validated with a configurable rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericField {
    pub name: String,

    #[serde(flatten)]
    pub rule: NumberRule,
}

/// Event wiring switches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehaviorConfig {
    /// Validate a field when it loses focus (default: true)
    #[serde(default = "default_true")]
    pub validate_on_blur: bool,
}

// Default values
fn default_notes_max_len() -> usize {
    256
}

fn default_min_age_years() -> i32 {
    18
}

fn default_true() -> bool {
    true
}

// Default implementations
impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            notes_max_len: default_notes_max_len(),
            min_age_years: default_min_age_years(),
            numeric_fields: Vec::new(),
        }
    }
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            validate_on_blur: true,
        }
    }
}

impl PortalConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Parse configuration from TOML text; empty text yields the defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: PortalConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from default path (./portal.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("portal.toml")
    }
}

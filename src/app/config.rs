//! Configuration types for agent creation.
//!
//! Agents are configured from whitespace-separated `key=value` option strings
//! (a bare `key` stands for `key=true`). The strings are parsed once into
//! [`AgentOptions`] and then into a typed [`PlayerConfig`] or
//! [`EnvironmentConfig`].

use std::{collections::BTreeMap, fmt::Display, path::PathBuf, str::FromStr};

use log::warn;

use crate::{
    Error, Result,
    ntuple::{DEFAULT_PATTERN_COUNT, FULL_PATTERNS},
    td_learning::DEFAULT_ALPHA,
};

/// Parsed `key=value` option tokens
///
/// Later tokens override earlier ones with the same key.
///
/// # Examples
///
/// ```
/// use threes_td::app::AgentOptions;
///
/// let options = AgentOptions::parse("name=learner alpha=0.05 init");
/// assert_eq!(options.get("name"), Some("learner"));
/// assert!(options.is_bare("init"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentOptions {
    entries: BTreeMap<String, Option<String>>,
}

impl AgentOptions {
    /// Split `input` on whitespace into options. Never fails.
    pub fn parse(input: &str) -> Self {
        let entries = input
            .split_whitespace()
            .map(|token| match token.split_once('=') {
                Some((key, value)) => (key.to_string(), Some(value.to_string())),
                None => (token.to_string(), None),
            })
            .collect();
        Self { entries }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Value given for `key`; a bare key reads as `"true"`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .map(|value| value.as_deref().unwrap_or("true"))
    }

    /// Whether `key` was given without a value
    pub fn is_bare(&self, key: &str) -> bool {
        matches!(self.entries.get(key), Some(None))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Explicit value of a key that cannot be bare
    fn required_value(&self, key: &str) -> Result<Option<&str>> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(None) => Err(Error::MissingOptionValue {
                key: key.to_string(),
            }),
            Some(Some(value)) => Ok(Some(value.as_str())),
        }
    }

    /// Parse the explicit value of `key`
    fn parsed<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.required_value(key)?
            .map(|value| {
                value.parse().map_err(|err: T::Err| Error::InvalidOption {
                    key: key.to_string(),
                    value: value.to_string(),
                    reason: err.to_string(),
                })
            })
            .transpose()
    }

    /// Log every key outside `known` and check the informational role.
    fn check_keys(&self, known: &[&str], role: &str) {
        for key in self.keys().filter(|key| !known.contains(key)) {
            warn!("ignoring unknown {role} option '{key}'");
        }
        if let Some(given) = self.get("role") {
            if given != role {
                warn!("{role} configured with role '{given}'; the role is fixed");
            }
        }
    }
}

impl FromStr for AgentOptions {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self::parse(s))
    }
}

/// Configuration for creating the learning player.
///
/// # Examples
///
/// ```
/// use threes_td::app::PlayerConfig;
///
/// let config: PlayerConfig = "name=td alpha=0.0025 init=17 save=weights.bin".parse()?;
/// assert_eq!(config.init, Some(17));
/// assert_eq!(config.alpha, 0.0025);
///
/// let config = PlayerConfig::new("td").with_alpha(0.0).with_seed(7);
/// assert_eq!(config.seed, Some(7));
/// # Ok::<(), threes_td::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerConfig {
    /// Display name
    pub name: String,
    /// Random seed (the greedy policy itself is deterministic)
    pub seed: Option<u64>,
    /// Learning rate; 0 disables learning
    pub alpha: f32,
    /// Number of tuple patterns for fresh tables
    pub init: Option<usize>,
    /// Weight file to load at construction
    pub load: Option<PathBuf>,
    /// Weight file written when the player is done
    pub save: Option<PathBuf>,
}

impl PlayerConfig {
    const KEYS: [&'static str; 7] = ["name", "role", "seed", "alpha", "init", "load", "save"];

    /// Configuration with the default learning rate and eight patterns.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            seed: None,
            alpha: DEFAULT_ALPHA,
            init: None,
            load: None,
            save: None,
        }
    }

    /// Build from parsed options.
    ///
    /// # Errors
    ///
    /// Malformed values (`alpha=abc`, `seed=-1`, `init=99`) and value-less
    /// `name`, `seed`, `alpha`, `load`, or `save` keys.
    pub fn from_options(options: &AgentOptions) -> Result<Self> {
        options.check_keys(&Self::KEYS, "player");

        let mut config = Self::default();
        if let Some(name) = options.required_value("name")? {
            config.name = name.to_string();
        }
        config.seed = options.parsed("seed")?;
        if let Some(alpha) = options.parsed::<f32>("alpha")? {
            if !alpha.is_finite() || alpha < 0.0 {
                return Err(Error::InvalidOption {
                    key: "alpha".to_string(),
                    value: alpha.to_string(),
                    reason: "learning rate must be a non-negative number".to_string(),
                });
            }
            config.alpha = alpha;
        }
        if options.is_bare("init") {
            config.init = Some(DEFAULT_PATTERN_COUNT);
        } else if let Some(count) = options.parsed::<usize>("init")? {
            if count == 0 || count > FULL_PATTERNS.len() {
                return Err(Error::InvalidOption {
                    key: "init".to_string(),
                    value: count.to_string(),
                    reason: format!("pattern count must be 1-{}", FULL_PATTERNS.len()),
                });
            }
            config.init = Some(count);
        }
        config.load = options.required_value("load")?.map(PathBuf::from);
        config.save = options.required_value("save")?.map(PathBuf::from);
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    /// Start from fresh tables over the first `count` patterns.
    pub fn with_init(mut self, count: usize) -> Self {
        self.init = Some(count);
        self
    }

    pub fn with_load(mut self, path: impl Into<PathBuf>) -> Self {
        self.load = Some(path.into());
        self
    }

    pub fn with_save(mut self, path: impl Into<PathBuf>) -> Self {
        self.save = Some(path.into());
        self
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self::new("td")
    }
}

impl FromStr for PlayerConfig {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_options(&AgentOptions::parse(s))
    }
}

/// Configuration for creating the tile-inserting environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentConfig {
    /// Display name
    pub name: String,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl EnvironmentConfig {
    const KEYS: [&'static str; 3] = ["name", "role", "seed"];

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            seed: None,
        }
    }

    /// Build from parsed options.
    pub fn from_options(options: &AgentOptions) -> Result<Self> {
        options.check_keys(&Self::KEYS, "environment");

        let mut config = Self::default();
        if let Some(name) = options.required_value("name")? {
            config.name = name.to_string();
        }
        config.seed = options.parsed("seed")?;
        Ok(config)
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self::new("random")
    }
}

impl FromStr for EnvironmentConfig {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_options(&AgentOptions::parse(s))
    }
}

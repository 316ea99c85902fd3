//! Startup configuration loaded from TOML
//!
//! Read from ~/.config/blockfall/settings.toml (or platform equivalent).
//! The file is only ever read; nothing is written back.

use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Largest accepted board width or height, in cells
pub const MAX_BOARD_SIDE: usize = 255;
/// Largest accepted `score_per_line`
pub const MAX_SCORE_PER_LINE: u64 = 1_000_000;
/// Largest accepted `level_up_score_step`
pub const MAX_LEVEL_UP_SCORE_STEP: u64 = 1_000_000_000;

/// All settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Rules and board size
    pub game: GameConfig,
    /// Keybindings
    pub keys: KeyBindings,
}

/// Game rules and board dimensions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Grid width
    pub cols: usize,
    /// Grid height
    pub rows: usize,
    pub initial_fall_interval_ms: u32,
    pub score_per_line: u64,
    /// Level `n` ends once the score reaches `n * level_up_score_step`
    pub level_up_score_step: u64,
    pub speed_decrease_per_level: u32,
    /// Floor for the fall interval after level ups
    pub min_fall_interval_ms: u32,
    /// Fixed piece seed; random when unset
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cols: 10,
            rows: 20,
            initial_fall_interval_ms: 1000,
            score_per_line: 100,
            level_up_score_step: 500,
            speed_decrease_per_level: 100,
            min_fall_interval_ms: 100,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Reject configurations the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        // Pieces reach two columns either side of a pivot at cols/2 - 1
        if self.cols < 4 {
            bail!("cols must be at least 4, got {}", self.cols);
        }
        if self.rows < 4 {
            bail!("rows must be at least 4, got {}", self.rows);
        }
        if self.cols > MAX_BOARD_SIDE || self.rows > MAX_BOARD_SIDE {
            bail!(
                "board of {}x{} is too large, each side is limited to {}",
                self.cols,
                self.rows,
                MAX_BOARD_SIDE
            );
        }
        if self.initial_fall_interval_ms == 0 {
            bail!("initial_fall_interval_ms must be positive");
        }
        if self.min_fall_interval_ms == 0 {
            bail!("min_fall_interval_ms must be positive");
        }
        if self.level_up_score_step == 0 {
            bail!("level_up_score_step must be positive");
        }
        if self.score_per_line > MAX_SCORE_PER_LINE {
            bail!(
                "score_per_line must be at most {}, got {}",
                MAX_SCORE_PER_LINE,
                self.score_per_line
            );
        }
        if self.level_up_score_step > MAX_LEVEL_UP_SCORE_STEP {
            bail!(
                "level_up_score_step must be at most {}, got {}",
                MAX_LEVEL_UP_SCORE_STEP,
                self.level_up_score_step
            );
        }
        Ok(())
    }
}

/// Key bindings (stored as strings for easy editing)
/// Each action can have one or more keys bound to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub move_left: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub move_right: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub soft_drop: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub rotate: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub quit: Vec<String>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_left: vec!["Left".to_string()],
            move_right: vec!["Right".to_string()],
            soft_drop: vec!["Down".to_string()],
            rotate: vec!["Up".to_string(), "x".to_string()],
            quit: vec!["q".to_string(), "Esc".to_string()],
        }
    }
}

/// Deserialize keys as either a single string or array of strings
fn deserialize_keys<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};

    struct KeysVisitor;

    impl<'de> Visitor<'de> for KeysVisitor {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a key name or a list of key names")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![v.to_string()])
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: de::SeqAccess<'de>,
        {
            let mut keys = Vec::new();
            while let Some(key) = seq.next_element::<String>()? {
                keys.push(key);
            }
            Ok(keys)
        }
    }

    deserializer.deserialize_any(KeysVisitor)
}

/// Serialize keys: single key as string, multiple as array
#[allow(clippy::ptr_arg)]
fn serialize_keys<S>(keys: &Vec<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeSeq;

    if let [key] = keys.as_slice() {
        serializer.serialize_str(key)
    } else {
        let mut seq = serializer.serialize_seq(Some(keys.len()))?;
        for key in keys {
            seq.serialize_element(key)?;
        }
        seq.end()
    }
}

impl Settings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "blockfall", "blockfall")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Default settings file path
    pub fn default_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("settings.toml"))
    }

    /// Load from the default location, or defaults if no file exists there
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load and parse a specific settings file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("invalid settings in {}", path.display()))
    }

    /// Parse settings from TOML text
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

//! Editor configuration file handling

use crate::actor::{ActorModel, Stage};
use crate::error::ConfigError;
use helix_core::{time::DEFAULT_FPS, Point, Timestamp};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in a directory
pub const CONFIG_FILE: &str = "helix.toml";

/// Top-level editor configuration (helix.toml)
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct EditorConfig {
    /// Playback frame rate
    #[serde(default = "default_fps")]
    pub fps: f64,
    #[serde(default)]
    pub persistence: PersistenceConfig,
    /// Actors placed on the stage at startup
    #[serde(default = "default_actors")]
    pub actors: Vec<ActorConfig>,
}

fn default_fps() -> f64 {
    DEFAULT_FPS
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            persistence: PersistenceConfig::default(),
            actors: default_actors(),
        }
    }
}

/// Where and how often editor state is saved
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct PersistenceConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Storage key the state is saved under
    #[serde(default = "default_key")]
    pub key: String,
    /// Quiet period after the last change before writing
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: f64,
    /// Storage directory, the working directory if unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

fn default_key() -> String {
    "helix-editor-state".to_string()
}

fn default_debounce_ms() -> f64 {
    250.0
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            key: default_key(),
            debounce_ms: default_debounce_ms(),
            dir: None,
        }
    }
}

impl PersistenceConfig {
    pub fn debounce(&self) -> Timestamp {
        Timestamp::from_millis(self.debounce_ms)
    }
}

/// One actor's starting position
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ActorConfig {
    pub name: String,
    pub x: f32,
    pub y: f32,
}

impl ActorConfig {
    pub fn new(name: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            name: name.into(),
            x,
            y,
        }
    }
}

fn default_actors() -> Vec<ActorConfig> {
    vec![
        ActorConfig::new("0", 150.0, 250.0),
        ActorConfig::new("1", 500.0, 250.0),
        ActorConfig::new("2", 850.0, 250.0),
    ]
}

impl EditorConfig {
    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: EditorConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load from a directory (looks for helix.toml) or a file path
    pub fn load_from_dir(path: &Path) -> Result<Self, ConfigError> {
        if path.is_file() {
            Self::load(path)
        } else {
            Self::load(&path.join(CONFIG_FILE))
        }
    }

    /// Like [`EditorConfig::load_from_dir`], but a missing file yields the
    /// defaults
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load_from_dir(path) {
            Err(ConfigError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fps.is_finite() && self.fps > 0.0) {
            return Err(ConfigError::Invalid(format!("fps must be positive, got {}", self.fps)));
        }

        let debounce = self.persistence.debounce_ms;
        if !(debounce.is_finite() && debounce >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "persistence.debounce_ms must not be negative, got {debounce}"
            )));
        }

        let mut seen = FxHashSet::default();
        for actor in &self.actors {
            if !seen.insert(actor.name.as_str()) {
                return Err(ConfigError::Invalid(format!("duplicate actor {:?}", actor.name)));
            }
        }

        Ok(())
    }

    /// A stage holding the configured actors at their starting positions
    pub fn stage(&self) -> Stage {
        Stage::new(
            self.actors
                .iter()
                .map(|actor| ActorModel::new(actor.name.as_str(), Point::new(actor.x, actor.y)))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.fps, 60.0);
        assert_eq!(config.persistence.key, "helix-editor-state");
        assert_eq!(config.persistence.debounce(), Timestamp::from_millis(250.0));

        let stage = config.stage();
        assert_eq!(stage.actors().len(), 3);
        assert_eq!(stage.actor("2").unwrap().position, Point::new(850.0, 250.0));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: EditorConfig = toml::from_str(
            r#"
            fps = 30

            [persistence]
            enabled = false

            [[actors]]
            name = "hero"
            x = 10
            y = 20
            "#,
        )
        .unwrap();

        assert_eq!(config.fps, 30.0);
        assert!(!config.persistence.enabled);
        assert_eq!(config.persistence.key, "helix-editor-state");
        assert_eq!(config.actors, vec![ActorConfig::new("hero", 10.0, 20.0)]);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = EditorConfig::default();
        let parsed: EditorConfig = toml::from_str(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = EditorConfig {
            fps: 0.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = EditorConfig::default();
        config.persistence.debounce_ms = -1.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = EditorConfig::default();
        config.actors.push(ActorConfig::new("0", 0.0, 0.0));
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_or_default_without_file() {
        let dir = std::env::temp_dir().join(format!("helix-config-missing-{}", std::process::id()));
        assert_eq!(EditorConfig::load_or_default(&dir).unwrap(), EditorConfig::default());
    }

    #[test]
    fn test_load_from_dir() {
        let dir = std::env::temp_dir().join(format!("helix-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(CONFIG_FILE), "fps = 24\n").unwrap();

        let config = EditorConfig::load_from_dir(&dir).unwrap();
        assert_eq!(config.fps, 24.0);
        assert_eq!(config.actors.len(), 3);

        fs::write(dir.join(CONFIG_FILE), "fps = \"fast\"\n").unwrap();
        assert!(matches!(
            EditorConfig::load_from_dir(&dir),
            Err(ConfigError::Parse { .. })
        ));

        let _ = fs::remove_dir_all(&dir);
    }
}

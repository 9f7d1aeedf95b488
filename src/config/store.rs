//! On-disk load/save/modify for the acceptance file
//!
//! Writes go to a temp file in the same directory followed by a rename, so a
//! reader never observes a half-written file. Two truly concurrent writers
//! are not serialized against each other; the last rename wins.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::error::ConfigError;
use crate::config::model::AcceptanceConfig;

/// Default location of the acceptance file, relative to the project root.
pub const DEFAULT_CONFIG_FILE: &str = ".api-baseline.yml";

/// Handle on the on-disk acceptance file.
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the current config, or an empty one when the file does not
    /// exist yet. A file that exists but fails to decode is an error.
    pub fn load(&self) -> Result<AcceptanceConfig, ConfigError> {
        if !self.path.exists() {
            return Ok(AcceptanceConfig::empty());
        }

        let contents = fs::read_to_string(&self.path)?;
        Ok(serde_yaml::from_str(&contents)?)
    }

    /// Serializes `config` in canonical sorted-key order and atomically
    /// replaces the file. Saving the same logical content twice produces
    /// byte-identical output.
    pub fn save(&self, config: &AcceptanceConfig) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_yaml::to_string(config)?;

        let temp_path = self.path.with_extension("yml.tmp");
        fs::write(&temp_path, contents)?;
        fs::rename(&temp_path, &self.path)?;

        Ok(())
    }

    /// Applies `mutate` to the current config and persists the result as one
    /// load-modify-store cycle, returning the stored value.
    ///
    /// This is the only mutation entry point. It guarantees a caller never
    /// persists on top of half-written state; it does not serialize true
    /// concurrent writers, whose updates resolve as last-writer-wins.
    pub fn modify<F>(&self, mutate: F) -> Result<AcceptanceConfig, ConfigError>
    where
        F: FnOnce(AcceptanceConfig) -> AcceptanceConfig,
    {
        let updated = mutate(self.load()?);
        self.save(&updated)?;

        debug!("acceptance config written to {}", self.path.display());

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use tempfile::TempDir;

    use super::*;
    use crate::artifact::{ArtifactKey, VersionToken};
    use crate::config::model::{AcceptedBreak, Justification};

    fn store_in(dir: &TempDir) -> ConfigStore {
        ConfigStore::new(dir.path().join(DEFAULT_CONFIG_FILE))
    }

    fn sample_config() -> AcceptanceConfig {
        let coordinate =
            ArtifactKey::new("com.example", "widgets").at_version(VersionToken::new("1.0"));

        AcceptanceConfig::empty()
            .with_version_override(coordinate.clone(), VersionToken::new("1.5"))
            .with_accepted_breaks(
                &coordinate,
                BTreeSet::from([AcceptedBreak::new(
                    "method.removed f()",
                    Justification::new("dead code").unwrap(),
                )]),
            )
    }

    #[test]
    fn load_returns_empty_config_when_file_is_absent() {
        let dir = TempDir::new().unwrap();

        let config = store_in(&dir).load().unwrap();

        assert_eq!(config, AcceptanceConfig::empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let config = sample_config();

        store.save(&config).unwrap();

        assert_eq!(store.load().unwrap(), config);
    }

    #[test]
    fn repeated_saves_are_byte_identical() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let config = sample_config();

        store.save(&config).unwrap();
        let first = fs::read_to_string(store.path()).unwrap();

        store.save(&store.load().unwrap()).unwrap();
        let second = fs::read_to_string(store.path()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn keys_are_written_in_sorted_order() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        // Inserted deliberately out of order.
        let config = AcceptanceConfig::empty()
            .with_version_override(
                ArtifactKey::new("org.zeta", "z").at_version(VersionToken::new("2.0")),
                VersionToken::new("2.1"),
            )
            .with_version_override(
                ArtifactKey::new("com.alpha", "a").at_version(VersionToken::new("1.0")),
                VersionToken::new("1.1"),
            );
        store.save(&config).unwrap();

        let contents = fs::read_to_string(store.path()).unwrap();
        let alpha = contents.find("com.alpha").unwrap();
        let zeta = contents.find("org.zeta").unwrap();
        assert!(alpha < zeta);
    }

    #[test]
    fn load_fails_on_malformed_yaml() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "version-overrides: [not, a, mapping\n").unwrap();

        let result = store.load();

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn modify_applies_the_mutation_and_persists_it() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let coordinate = ArtifactKey::new("g", "n").at_version(VersionToken::new("1.0"));

        store
            .modify(|config| {
                config.with_version_override(coordinate.clone(), VersionToken::new("1.5"))
            })
            .unwrap();

        let reloaded = store.load().unwrap();
        assert_eq!(
            reloaded.version_override_for(&coordinate),
            Some(VersionToken::new("1.5"))
        );
    }

    #[test]
    fn modify_builds_on_the_persisted_state_not_a_cached_one() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let first = ArtifactKey::new("g", "n").at_version(VersionToken::new("1.0"));
        let second = ArtifactKey::new("g", "n").at_version(VersionToken::new("2.0"));

        store
            .modify(|config| config.with_version_override(first.clone(), VersionToken::new("1.5")))
            .unwrap();
        store
            .modify(|config| config.with_version_override(second.clone(), VersionToken::new("2.5")))
            .unwrap();

        let reloaded = store.load().unwrap();
        assert_eq!(
            reloaded.version_override_for(&first),
            Some(VersionToken::new("1.5"))
        );
        assert_eq!(
            reloaded.version_override_for(&second),
            Some(VersionToken::new("2.5"))
        );
    }

    #[test]
    fn save_leaves_no_temp_file_behind() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.save(&sample_config()).unwrap();

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn save_creates_missing_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::new(dir.path().join("nested").join(DEFAULT_CONFIG_FILE));

        store.save(&sample_config()).unwrap();

        assert_eq!(store.load().unwrap(), sample_config());
    }
}

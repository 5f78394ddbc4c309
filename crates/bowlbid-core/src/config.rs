// League configuration loading and validation (config/league.toml).

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub league: LeagueConfig,
    /// File the league rules were read from.
    pub league_path: PathBuf,
}

// ---------------------------------------------------------------------------
// league.toml structs
// ---------------------------------------------------------------------------

/// Wrapper for the top-level `[league]` table in league.toml.
#[derive(Debug, Clone, Deserialize)]
struct LeagueFile {
    league: LeagueConfig,
}

/// How a new player's level is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelMode {
    /// Entered with the player, 1..=max_level.
    #[default]
    Explicit,
    /// Number of skills + 1.
    FromSkills,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueConfig {
    pub name: String,
    #[serde(default)]
    pub level_mode: LevelMode,
    #[serde(default = "default_max_level")]
    pub max_level: u8,
    #[serde(default = "default_max_skills")]
    pub max_skills: usize,
    pub races: Vec<RaceConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RaceConfig {
    pub name: String,
    pub positions: Vec<String>,
}

fn default_max_level() -> u8 {
    7
}

fn default_max_skills() -> usize {
    6
}

impl LeagueConfig {
    /// Parse and validate league rules from TOML text. `path` is only used
    /// for error reporting.
    pub fn from_toml_str(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let file: LeagueFile = toml::from_str(text).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;
        validate(&file.league)?;
        Ok(file.league)
    }

    /// Look up a race by exact name.
    pub fn race(&self, name: &str) -> Option<&RaceConfig> {
        self.races.iter().find(|r| r.name == name)
    }

    pub fn race_names(&self) -> impl Iterator<Item = &str> {
        self.races.iter().map(|r| r.name.as_str())
    }

    /// Positions selectable for `race`. An empty or unknown race offers every
    /// position of every race, de-duplicated, in declaration order.
    pub fn positions_for(&self, race: &str) -> Vec<&str> {
        if let Some(r) = self.race(race) {
            return r.positions.iter().map(String::as_str).collect();
        }

        let mut seen = HashSet::new();
        self.races
            .iter()
            .flat_map(|r| r.positions.iter())
            .map(String::as_str)
            .filter(|p| seen.insert(*p))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/league.toml` relative to the
/// given `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy defaults.
/// Prefer `load_config()` which handles default initialization automatically.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let league_path = base_dir.join("config").join("league.toml");
    let league_text = read_file(&league_path)?;
    let league = LeagueConfig::from_toml_str(&league_text, &league_path)?;

    debug!(
        "League rules loaded from {}: {} races",
        league_path.display(),
        league.races.len()
    );

    Ok(Config {
        league,
        league_path,
    })
}

/// Seed `config/` with any file from `defaults/` it doesn't have yet.
///
/// Existing files are never overwritten and `*.example` templates are not
/// copied. Returns the paths that were created.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.is_dir() {
        if config_dir.is_dir() {
            return Ok(vec![]);
        }
        return Err(copy_error(format!(
            "neither defaults/ nor config/ directory found in {}; \
             run from the project root or ensure defaults/ is present",
            base_dir.display()
        )));
    }

    std::fs::create_dir_all(&config_dir)
        .map_err(|e| copy_error(format!("cannot create {}: {e}", config_dir.display())))?;
    let entries = std::fs::read_dir(&defaults_dir)
        .map_err(|e| copy_error(format!("cannot list {}: {e}", defaults_dir.display())))?;

    let mut copied = Vec::new();
    for entry in entries {
        let source = entry
            .map_err(|e| copy_error(format!("cannot read defaults entry: {e}")))?
            .path();
        let Some(file_name) = source.file_name().filter(|_| source.is_file()) else {
            continue;
        };
        if file_name.to_string_lossy().ends_with(".example") {
            continue;
        }

        let target = config_dir.join(file_name);
        if copy_new(&source, &target)? {
            info!("Copied default config to {}", target.display());
            copied.push(target);
        }
    }

    Ok(copied)
}

/// Copy `source` to `target` unless `target` already exists. Returns whether
/// a copy happened.
fn copy_new(source: &Path, target: &Path) -> Result<bool, ConfigError> {
    let mut dest = match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(target)
    {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(copy_error(format!("cannot create {}: {e}", target.display()))),
    };

    let content = std::fs::read(source)
        .map_err(|e| copy_error(format!("cannot read {}: {e}", source.display())))?;
    std::io::Write::write_all(&mut dest, &content)
        .map_err(|e| copy_error(format!("cannot write {}: {e}", target.display())))?;
    Ok(true)
}

/// Convenience wrapper: loads config relative to the current working directory.
/// Ensures default config files are copied before loading.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn copy_error(message: String) -> ConfigError {
    ConfigError::DefaultsCopyError { message }
}

fn invalid(field: impl Into<String>, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field: field.into(),
        message: message.into(),
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(league: &LeagueConfig) -> Result<(), ConfigError> {
    if league.max_level == 0 {
        return Err(invalid("league.max_level", "must be greater than 0"));
    }

    if league.max_skills == 0 {
        return Err(invalid("league.max_skills", "must be greater than 0"));
    }

    if league.races.is_empty() {
        return Err(invalid("league.races", "at least one race is required"));
    }

    let mut names = HashSet::new();
    for (i, race) in league.races.iter().enumerate() {
        if race.name.trim().is_empty() {
            return Err(invalid(format!("league.races[{i}].name"), "must not be empty"));
        }
        if !names.insert(race.name.as_str()) {
            return Err(invalid(
                format!("league.races[{i}].name"),
                format!("duplicate race `{}`", race.name),
            ));
        }
        if race.positions.is_empty() {
            return Err(invalid(
                format!("league.races[{i}].positions"),
                format!("race `{}` has no positions", race.name),
            ));
        }
        if race.positions.iter().any(|p| p.trim().is_empty()) {
            return Err(invalid(
                format!("league.races[{i}].positions"),
                "position names must not be empty",
            ));
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Helper: the workspace root holding `defaults/league.toml`.
    fn project_root() -> PathBuf {
        let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        manifest
            .ancestors()
            .find(|dir| dir.join("defaults/league.toml").exists())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| panic!("Cannot locate defaults/ directory above {:?}", manifest))
    }

    /// Fresh temp dir with an empty `config/` inside.
    fn scratch_dir(name: &str) -> PathBuf {
        let tmp = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();
        tmp
    }

    fn parse(text: &str) -> Result<LeagueConfig, ConfigError> {
        LeagueConfig::from_toml_str(text, Path::new("league.toml"))
    }

    fn expect_field(err: ConfigError, expected: &str) {
        match &err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, expected),
            other => panic!("expected ValidationError, got: {other}"),
        }
    }

    #[test]
    fn load_valid_config_from_project_files() {
        let tmp = scratch_dir("bowlbid_config_defaults");
        fs::copy(
            project_root().join("defaults/league.toml"),
            tmp.join("config/league.toml"),
        )
        .unwrap();

        let config = load_config_from(&tmp).expect("should load valid config");
        assert_eq!(config.league.name, "Old World Open Draft");
        assert_eq!(config.league.level_mode, LevelMode::Explicit);
        assert_eq!(config.league.max_level, 7);
        assert_eq!(config.league.max_skills, 6);
        assert!(config.league.race("Orc").is_some());
        assert!(config.league.race("Elf").is_some());
        assert!(config.league_path.ends_with("league.toml"));

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn optional_fields_use_defaults() {
        let league = parse(
            r#"
[league]
name = "Minimal"

[[league.races]]
name = "Orc"
positions = ["Lineman"]
"#,
        )
        .unwrap();
        assert_eq!(league.level_mode, LevelMode::Explicit);
        assert_eq!(league.max_level, 7);
        assert_eq!(league.max_skills, 6);
    }

    #[test]
    fn from_skills_level_mode() {
        let league = parse(
            r#"
[league]
name = "Derived"
level_mode = "from_skills"

[[league.races]]
name = "Orc"
positions = ["Lineman"]
"#,
        )
        .unwrap();
        assert_eq!(league.level_mode, LevelMode::FromSkills);
    }

    #[test]
    fn positions_for_known_race() {
        let league = parse(
            r#"
[league]
name = "T"

[[league.races]]
name = "Orc"
positions = ["Lineman", "Blitzer"]

[[league.races]]
name = "Elf"
positions = ["Lineman", "Catcher"]
"#,
        )
        .unwrap();
        assert_eq!(league.positions_for("Elf"), vec!["Lineman", "Catcher"]);
        assert_eq!(
            league.positions_for(""),
            vec!["Lineman", "Blitzer", "Catcher"]
        );
        assert_eq!(
            league.positions_for("Goblin"),
            vec!["Lineman", "Blitzer", "Catcher"]
        );
        assert_eq!(league.race_names().collect::<Vec<_>>(), vec!["Orc", "Elf"]);
    }

    #[test]
    fn rejects_no_races() {
        let err = parse("[league]\nname = \"Empty\"\nraces = []\n").unwrap_err();
        expect_field(err, "league.races");
    }

    #[test]
    fn rejects_duplicate_race() {
        let err = parse(
            r#"
[league]
name = "Dup"

[[league.races]]
name = "Orc"
positions = ["Lineman"]

[[league.races]]
name = "Orc"
positions = ["Blitzer"]
"#,
        )
        .unwrap_err();
        expect_field(err, "league.races[1].name");
    }

    #[test]
    fn rejects_race_without_positions() {
        let err = parse(
            r#"
[league]
name = "NoPos"

[[league.races]]
name = "Orc"
positions = []
"#,
        )
        .unwrap_err();
        expect_field(err, "league.races[0].positions");
    }

    #[test]
    fn rejects_max_level_zero() {
        let err = parse(
            r#"
[league]
name = "Zero"
max_level = 0

[[league.races]]
name = "Orc"
positions = ["Lineman"]
"#,
        )
        .unwrap_err();
        expect_field(err, "league.max_level");
    }

    #[test]
    fn rejects_max_skills_zero() {
        let err = parse(
            r#"
[league]
name = "Zero"
max_skills = 0

[[league.races]]
name = "Orc"
positions = ["Lineman"]
"#,
        )
        .unwrap_err();
        expect_field(err, "league.max_skills");
    }

    #[test]
    fn file_not_found_for_missing_league_toml() {
        let tmp = scratch_dir("bowlbid_config_missing");

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::FileNotFound { path } => assert!(path.ends_with("league.toml")),
            other => panic!("expected FileNotFound, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn parse_error_for_invalid_toml() {
        let tmp = scratch_dir("bowlbid_config_invalid");
        fs::write(tmp.join("config/league.toml"), "this is not valid [[[ toml").unwrap();

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ParseError { path, .. } => assert!(path.ends_with("league.toml")),
            other => panic!("expected ParseError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_copies_missing_files() {
        let tmp = std::env::temp_dir().join("bowlbid_config_ensure_copies");
        let _ = fs::remove_dir_all(&tmp);
        let defaults_dir = tmp.join("defaults");
        fs::create_dir_all(&defaults_dir).unwrap();

        fs::copy(
            project_root().join("defaults/league.toml"),
            defaults_dir.join("league.toml"),
        )
        .unwrap();
        fs::write(defaults_dir.join("house_rules.toml.example"), "# optional\n").unwrap();

        assert!(!tmp.join("config").exists());

        let copied = ensure_config_files(&tmp).expect("should succeed");
        assert_eq!(copied.len(), 1);
        assert!(tmp.join("config/league.toml").exists());
        assert!(!tmp.join("config/house_rules.toml.example").exists());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_skips_existing() {
        let tmp = scratch_dir("bowlbid_config_ensure_skips");
        let defaults_dir = tmp.join("defaults");
        fs::create_dir_all(&defaults_dir).unwrap();
        fs::copy(
            project_root().join("defaults/league.toml"),
            defaults_dir.join("league.toml"),
        )
        .unwrap();

        fs::write(tmp.join("config/league.toml"), "# custom\n").unwrap();

        let copied = ensure_config_files(&tmp).expect("should succeed");
        assert!(copied.is_empty());

        let content = fs::read_to_string(tmp.join("config/league.toml")).unwrap();
        assert_eq!(content, "# custom\n");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_no_defaults_dir_is_ok() {
        let tmp = scratch_dir("bowlbid_config_no_defaults");

        let copied = ensure_config_files(&tmp).expect("should succeed");
        assert!(copied.is_empty());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_errors_when_both_dirs_missing() {
        let tmp = std::env::temp_dir().join("bowlbid_config_both_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        let err = ensure_config_files(&tmp).unwrap_err();
        match &err {
            ConfigError::DefaultsCopyError { message } => {
                assert!(message.contains("neither defaults/ nor config/"));
            }
            other => panic!("expected DefaultsCopyError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }
}

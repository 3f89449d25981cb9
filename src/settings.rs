//! Report settings.
//!
//! Values are layered, later sources winning:
//!
//! 1. built-in defaults
//! 2. an optional TOML file (`blog-timeline.toml` unless `--config` says otherwise)
//! 3. `BLOG_TIMELINE_*` environment variables, e.g. `BLOG_TIMELINE_TOP_N=5`
//! 4. command-line flags
//!
//! ```toml
//! posts_file = "data/blog_data_scrape.json"
//! counts_file = "data/blog_data_counts.json"
//! top_n = 10
//! format = "json"
//! ```

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File, Map};
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "blog-timeline.toml";
pub const ENV_PREFIX: &str = "BLOG_TIMELINE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub posts_file: PathBuf,
    pub counts_file: Option<PathBuf>,
    pub locations_file: Option<PathBuf>,
    pub top_n: usize,
    pub format: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            posts_file: PathBuf::from("blog_data_scrape.json"),
            counts_file: Some(PathBuf::from("blog_data_counts.json")),
            locations_file: Some(PathBuf::from("locations.json")),
            top_n: 10,
            format: OutputFormat::Text,
        }
    }
}

/// Command-line values that take precedence over every other source
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub posts_file: Option<PathBuf>,
    pub counts_file: Option<PathBuf>,
    pub locations_file: Option<PathBuf>,
    pub top_n: Option<usize>,
    pub format: Option<OutputFormat>,
}

impl Settings {
    /// Load defaults, then `config_file` (if it exists), then the environment.
    pub fn load(config_file: &Path) -> Result<Self, ConfigError> {
        Self::load_with_env(config_file, None)
    }

    /// Like [`Settings::load`], reading variables from `env` instead of the
    /// process environment when given.
    pub fn load_with_env(
        config_file: &Path,
        env: Option<Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(config_file).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .source(env),
            )
            .build()?
            .try_deserialize()
    }

    pub fn apply(mut self, overrides: Overrides) -> Self {
        if let Some(path) = overrides.posts_file {
            self.posts_file = path;
        }
        if let Some(path) = overrides.counts_file {
            self.counts_file = Some(path);
        }
        if let Some(path) = overrides.locations_file {
            self.locations_file = Some(path);
        }
        if let Some(n) = overrides.top_n {
            self.top_n = n;
        }
        if let Some(format) = overrides.format {
            self.format = format;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_with_env(&dir.path().join("absent.toml"), env(&[])).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_file_values() {
        let mut temp_file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(temp_file, "posts_file = \"data/posts.json\"").unwrap();
        writeln!(temp_file, "top_n = 3").unwrap();
        writeln!(temp_file, "format = \"json\"").unwrap();

        let settings = Settings::load_with_env(temp_file.path(), env(&[])).unwrap();
        assert_eq!(settings.posts_file, PathBuf::from("data/posts.json"));
        assert_eq!(settings.top_n, 3);
        assert_eq!(settings.format, OutputFormat::Json);
        // untouched keys keep their defaults
        assert_eq!(settings.counts_file, Settings::default().counts_file);
    }

    fn env(vars: &[(&str, &str)]) -> Option<Map<String, String>> {
        Some(
            vars.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_env_values() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_with_env(
            &dir.path().join("absent.toml"),
            env(&[
                ("BLOG_TIMELINE_TOP_N", "7"),
                ("BLOG_TIMELINE_FORMAT", "json"),
                ("BLOG_TIMELINE_POSTS_FILE", "env/posts.json"),
                ("UNRELATED_TOP_N", "99"),
            ]),
        )
        .unwrap();

        assert_eq!(settings.top_n, 7);
        assert_eq!(settings.format, OutputFormat::Json);
        assert_eq!(settings.posts_file, PathBuf::from("env/posts.json"));
    }

    #[test]
    fn test_env_beats_file_and_flags_beat_env() {
        let mut temp_file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(temp_file, "top_n = 3").unwrap();
        writeln!(temp_file, "format = \"json\"").unwrap();

        let settings =
            Settings::load_with_env(temp_file.path(), env(&[("BLOG_TIMELINE_TOP_N", "7")]))
                .unwrap();
        assert_eq!(settings.top_n, 7);
        assert_eq!(settings.format, OutputFormat::Json);

        let settings = settings.apply(Overrides {
            top_n: Some(2),
            format: Some(OutputFormat::Text),
            ..Overrides::default()
        });
        assert_eq!(settings.top_n, 2);
        assert_eq!(settings.format, OutputFormat::Text);
    }

    #[test]
    fn test_overrides_win() {
        let settings = Settings::default().apply(Overrides {
            posts_file: Some(PathBuf::from("other.json")),
            top_n: Some(25),
            ..Overrides::default()
        });

        assert_eq!(settings.posts_file, PathBuf::from("other.json"));
        assert_eq!(settings.top_n, 25);
        assert_eq!(settings.format, OutputFormat::Text);
    }
}

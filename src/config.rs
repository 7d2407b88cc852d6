//! Settings read from `datepoll.toml`

use crate::render::Locale;
use chrono::{Month, NaiveDate};
use log::LevelFilter;
use miette::{Diagnostic, NamedSource, SourceSpan};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tally::{Calendar, month_from_index};
use thiserror::Error;

/// Where the configuration is looked for when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "./datepoll.toml";

/// Problem with the configuration. Stops the program before a session starts.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// The file exists (or was asked for explicitly) but could not be read.
    #[error("could not load configuration from {path}")]
    #[diagnostic(help("make sure the file exists and can be read"))]
    Read {
        /// Path as given.
        path: String,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML or has unexpected fields.
    #[error("invalid configuration: {message}")]
    #[diagnostic(help("expected keys: year, months, locale, log_level"))]
    Parse {
        /// Reason reported by the parser.
        message: String,
        /// The file contents.
        #[source_code]
        src: NamedSource<String>,
        /// Where in the file the problem is.
        #[label("here")]
        span: Option<SourceSpan>,
    },

    /// A month index outside `0..12`.
    #[error("month index {index} does not exist")]
    #[diagnostic(help("months are zero-based: 0 is January, 11 is December"))]
    MonthIndex {
        /// The rejected index.
        index: u32,
    },

    /// No months to show.
    #[error("no months configured")]
    #[diagnostic(help("list at least one month, e.g. `months = [6, 7]`"))]
    NoMonths,

    /// A year outside what the calendar can represent.
    #[error("year {year} cannot be shown")]
    Year {
        /// The rejected year.
        year: i32,
    },
}

/// Contents of `datepoll.toml`. Every key is optional.
///
/// ```toml
/// year = 2025
/// months = [6, 7]   # zero-based: July and August
/// locale = "nl"
/// log_level = "warn"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Year the calendar shows.
    pub year: i32,

    /// Months the calendar shows, zero-based, in display order.
    pub months: Vec<u32>,

    /// Language for labels and messages.
    pub locale: Locale,

    /// Log verbosity when no `-v` flag is given.
    pub log_level: Option<LevelFilter>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            year: 2025,
            months: vec![6, 7],
            locale: Locale::default(),
            log_level: None,
        }
    }
}

impl Config {
    /// Parse TOML text; `name` is only used in diagnostics.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] pointing at the offending part of `src`.
    pub fn from_toml(src: &str, name: &str) -> Result<Self, ConfigError> {
        toml::from_str(src).map_err(|e| ConfigError::Parse {
            message: e.message().to_string(),
            span: e.span().map(SourceSpan::from),
            src: NamedSource::new(name, src.to_string()),
        })
    }

    /// Load the configuration.
    ///
    /// With `path` given, the file must exist. Without it,
    /// [`DEFAULT_CONFIG_PATH`] is tried and defaults are used if it is absent.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Read`] or [`ConfigError::Parse`].
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
        };

        match std::fs::read_to_string(&path) {
            Ok(src) => {
                log::info!("using configuration from {}", path.display());
                Self::from_toml(&src, &path.display().to_string())
            }
            Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("{} not found, using defaults", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Read {
                path: path.display().to_string(),
                source,
            }),
        }
    }

    /// Replace configured values with the ones given on the command line.
    ///
    /// [`None`] and an empty `months` keep what the file (or the default) says.
    pub fn apply_overrides(&mut self, year: Option<i32>, months: Vec<u32>, locale: Option<Locale>) {
        if let Some(year) = year {
            self.year = year;
        }
        if !months.is_empty() {
            self.months = months;
        }
        if let Some(locale) = locale {
            self.locale = locale;
        }
    }

    /// The configured months as [`Month`]s, in order.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NoMonths`] or [`ConfigError::MonthIndex`].
    pub fn months(&self) -> Result<Vec<Month>, ConfigError> {
        if self.months.is_empty() {
            return Err(ConfigError::NoMonths);
        }
        self.months
            .iter()
            .map(|&index| month_from_index(index).ok_or(ConfigError::MonthIndex { index }))
            .collect()
    }

    /// Build the calendar this configuration describes.
    ///
    /// # Errors
    ///
    /// See [`Config::months`]; also [`ConfigError::Year`] for years that
    /// cannot be represented.
    pub fn calendar(&self) -> Result<Calendar, ConfigError> {
        let months = self.months()?;
        if NaiveDate::from_ymd_opt(self.year, 1, 1).is_none()
            || NaiveDate::from_ymd_opt(self.year, 12, 31).is_none()
        {
            return Err(ConfigError::Year { year: self.year });
        }
        Ok(Calendar::new(self.year, months))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.year, 2025);
        assert_eq!(config.months().unwrap(), [Month::July, Month::August]);
        assert_eq!(config.locale, Locale::Nl);
        assert_eq!(config.log_level, None);
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(Config::from_toml("", "empty.toml").unwrap(), Config::default());
    }

    #[test]
    fn test_full_file() {
        let config = Config::from_toml(
            r#"
                year = 2026
                months = [11, 0]
                locale = "en"
                log_level = "debug"
            "#,
            "full.toml",
        )
        .unwrap();
        assert_eq!(
            config,
            Config {
                year: 2026,
                months: vec![11, 0],
                locale: Locale::En,
                log_level: Some(LevelFilter::Debug),
            }
        );
        assert_eq!(config.months().unwrap(), [Month::December, Month::January]);
    }

    #[test]
    fn test_overrides_beat_file() {
        let file = r#"
            year = 2026
            months = [0]
            locale = "nl"
        "#;

        let mut config = Config::from_toml(file, "file.toml").unwrap();
        config.apply_overrides(Some(2030), Vec::new(), None);
        assert_eq!(config.year, 2030);
        assert_eq!(config.months, [0]);
        assert_eq!(config.locale, Locale::Nl);

        let mut config = Config::from_toml(file, "file.toml").unwrap();
        config.apply_overrides(None, vec![3, 4], None);
        assert_eq!(config.year, 2026);
        assert_eq!(config.months, [3, 4]);

        let mut config = Config::from_toml(file, "file.toml").unwrap();
        config.apply_overrides(None, Vec::new(), Some(Locale::En));
        assert_eq!(config.locale, Locale::En);
        assert_eq!(config.months, [0]);
    }

    #[test]
    fn test_no_overrides_keep_file() {
        let mut config = Config::from_toml("year = 2027", "file.toml").unwrap();
        config.apply_overrides(None, Vec::new(), None);
        assert_eq!(
            config,
            Config {
                year: 2027,
                ..Config::default()
            }
        );
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = Config::from_toml("yaer = 2025", "typo.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }), "{err:?}");
    }

    #[test]
    fn test_bad_locale_rejected() {
        assert!(Config::from_toml(r#"locale = "fr""#, "fr.toml").is_err());
    }

    #[test]
    fn test_month_index_out_of_range() {
        let config = Config {
            months: vec![6, 12],
            ..Config::default()
        };
        assert!(matches!(
            config.months(),
            Err(ConfigError::MonthIndex { index: 12 })
        ));
        assert!(config.calendar().is_err());
    }

    #[test]
    fn test_no_months() {
        let config = Config {
            months: Vec::new(),
            ..Config::default()
        };
        assert!(matches!(config.calendar(), Err(ConfigError::NoMonths)));
    }

    #[test]
    fn test_unrepresentable_year() {
        let config = Config {
            year: i32::MAX,
            ..Config::default()
        };
        assert!(matches!(config.calendar(), Err(ConfigError::Year { .. })));
    }

    #[test]
    fn test_calendar_from_config() {
        let calendar = Config::default().calendar().unwrap();
        assert_eq!(calendar.months().len(), 2);
        assert_eq!(calendar.days().count(), 62);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let path = std::env::temp_dir().join("datepoll-test-missing-config.toml");
        assert!(matches!(
            Config::load(Some(&path)),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn test_load_explicit_file() {
        let path = std::env::temp_dir().join(format!(
            "datepoll-test-config-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "year = 2030\nlocale = \"en\"\n").unwrap();
        let config = Config::load(Some(&path));
        std::fs::remove_file(&path).unwrap();
        let config = config.unwrap();
        assert_eq!(config.year, 2030);
        assert_eq!(config.locale, Locale::En);
        assert_eq!(config.months, [6, 7]);
    }
}

//! Runtime configuration, read once from the environment at startup.
//!
//! The whole option set lives in an explicit [`Config`] struct that is
//! constructed before any network call and passed into the sync service.
//! Missing required variables are a fatal startup error; everything else
//! falls back to a documented default.

use std::env;
use std::path::PathBuf;

use thiserror::Error;

/// Configuration error types.
///
/// Each variant is a fatal startup error: the binary reports it on stderr
/// and exits with status 1 without touching the network.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("REPOSITORY environment variable is not set")]
    MissingRepository,

    #[error("REPOSITORY must be in 'owner/name' form, got: '{0}'")]
    InvalidRepository(String),

    #[error("TYPETALK_TOPIC_ID environment variable is not set")]
    MissingTopicId,

    #[error("TYPETALK_TOKEN environment variable is not set")]
    MissingTypetalkToken,
}

/// Immutable runtime configuration for one invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Optional GitHub token; requests go out unauthenticated without it.
    pub github_token: Option<String>,
    /// When set, the close and create calls are skipped.
    pub dry_run: bool,
    /// Repository owner (user or organisation name).
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Handle of the diary author; their own comments render without the
    /// `(@handle)` suffix and the next entry is assigned to them.
    pub assignee: Option<String>,
    /// Label used both to select diary issues and to tag the next entry.
    pub label: Option<String>,
    /// Path to the template file used as the next entry's body.
    pub template_path: Option<PathBuf>,
    /// Typetalk topic the digest is posted to.
    pub typetalk_topic_id: String,
    /// Typetalk API token (`X-TYPETALK-TOKEN`).
    pub typetalk_token: String,
    /// Days added to the shifted current date for the next entry's title.
    pub target_day_offset: i64,
}

impl Config {
    /// Build the configuration from the process environment.
    ///
    /// Empty-string values are treated as unset. `DRY_RUN` enables dry-run
    /// only when it is exactly `"true"`. A missing or non-numeric
    /// `TARGET_DAY_OFFSET` falls back to 0.
    pub fn from_env() -> Result<Self, ConfigError> {
        let repository = var("REPOSITORY").ok_or(ConfigError::MissingRepository)?;
        let (owner, repo) = repository
            .split_once('/')
            .filter(|(owner, repo)| !owner.is_empty() && !repo.is_empty())
            .ok_or_else(|| ConfigError::InvalidRepository(repository.clone()))?;

        let typetalk_topic_id = var("TYPETALK_TOPIC_ID").ok_or(ConfigError::MissingTopicId)?;
        let typetalk_token = var("TYPETALK_TOKEN").ok_or(ConfigError::MissingTypetalkToken)?;

        Ok(Self {
            github_token: var("GH_TOKEN"),
            dry_run: var("DRY_RUN").as_deref() == Some("true"),
            owner: owner.to_string(),
            repo: repo.to_string(),
            assignee: var("ASSIGN_USER"),
            label: var("ISSUE_LABEL"),
            template_path: var("ISSUE_TEMPLATE").map(PathBuf::from),
            typetalk_topic_id,
            typetalk_token,
            target_day_offset: var("TARGET_DAY_OFFSET")
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
        })
    }
}

/// Read an environment variable, treating an empty value as unset.
fn var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Full variable set for tests; individual entries are overridden below.
    const BASE_VARS: [(&str, Option<&str>); 9] = [
        ("REPOSITORY", Some("my-org/diary")),
        ("TYPETALK_TOPIC_ID", Some("12345")),
        ("TYPETALK_TOKEN", Some("tt-token")),
        ("GH_TOKEN", None),
        ("DRY_RUN", None),
        ("ASSIGN_USER", None),
        ("ISSUE_LABEL", None),
        ("ISSUE_TEMPLATE", None),
        ("TARGET_DAY_OFFSET", None),
    ];

    fn with_overrides<F: FnOnce()>(overrides: &[(&str, Option<&str>)], f: F) {
        let mut vars = BASE_VARS.to_vec();
        for (name, value) in overrides {
            if let Some(entry) = vars.iter_mut().find(|(n, _)| n == name) {
                entry.1 = *value;
            }
        }
        temp_env::with_vars(vars, f);
    }

    // ── required variables ──────────────────────────────────────────────────

    #[test]
    fn test_minimal_config() {
        with_overrides(&[], || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.owner, "my-org");
            assert_eq!(config.repo, "diary");
            assert_eq!(config.typetalk_topic_id, "12345");
            assert_eq!(config.typetalk_token, "tt-token");
            assert!(!config.dry_run);
            assert!(config.github_token.is_none());
            assert!(config.assignee.is_none());
            assert!(config.label.is_none());
            assert!(config.template_path.is_none());
            assert_eq!(config.target_day_offset, 0);
        });
    }

    #[test]
    fn test_missing_repository() {
        with_overrides(&[("REPOSITORY", None)], || {
            let err = Config::from_env().unwrap_err();
            assert!(matches!(err, ConfigError::MissingRepository));
        });
    }

    #[test]
    fn test_empty_repository_treated_as_missing() {
        with_overrides(&[("REPOSITORY", Some(""))], || {
            let err = Config::from_env().unwrap_err();
            assert!(matches!(err, ConfigError::MissingRepository));
        });
    }

    #[test]
    fn test_repository_without_slash_rejected() {
        with_overrides(&[("REPOSITORY", Some("just-a-name"))], || {
            let err = Config::from_env().unwrap_err();
            match err {
                ConfigError::InvalidRepository(value) => assert_eq!(value, "just-a-name"),
                other => panic!("Expected InvalidRepository, got: {other:?}"),
            }
        });
    }

    #[test]
    fn test_repository_with_empty_owner_rejected() {
        with_overrides(&[("REPOSITORY", Some("/diary"))], || {
            assert!(matches!(
                Config::from_env(),
                Err(ConfigError::InvalidRepository(_))
            ));
        });
    }

    #[test]
    fn test_missing_topic_id() {
        with_overrides(&[("TYPETALK_TOPIC_ID", None)], || {
            let err = Config::from_env().unwrap_err();
            assert!(matches!(err, ConfigError::MissingTopicId));
        });
    }

    #[test]
    fn test_missing_typetalk_token() {
        with_overrides(&[("TYPETALK_TOKEN", None)], || {
            let err = Config::from_env().unwrap_err();
            assert!(matches!(err, ConfigError::MissingTypetalkToken));
        });
    }

    // ── DRY_RUN parsing ─────────────────────────────────────────────────────

    #[test]
    fn test_dry_run_exactly_true() {
        with_overrides(&[("DRY_RUN", Some("true"))], || {
            assert!(Config::from_env().unwrap().dry_run);
        });
    }

    #[test]
    fn test_dry_run_other_values_disabled() {
        for value in ["TRUE", "1", "yes", "false"] {
            with_overrides(&[("DRY_RUN", Some(value))], || {
                assert!(!Config::from_env().unwrap().dry_run, "value: {value}");
            });
        }
    }

    // ── TARGET_DAY_OFFSET parsing ───────────────────────────────────────────

    #[test]
    fn test_offset_parsed() {
        with_overrides(&[("TARGET_DAY_OFFSET", Some("1"))], || {
            assert_eq!(Config::from_env().unwrap().target_day_offset, 1);
        });
    }

    #[test]
    fn test_offset_negative() {
        with_overrides(&[("TARGET_DAY_OFFSET", Some("-2"))], || {
            assert_eq!(Config::from_env().unwrap().target_day_offset, -2);
        });
    }

    #[test]
    fn test_offset_non_numeric_defaults_to_zero() {
        with_overrides(&[("TARGET_DAY_OFFSET", Some("tomorrow"))], || {
            assert_eq!(Config::from_env().unwrap().target_day_offset, 0);
        });
    }

    // ── optional variables ──────────────────────────────────────────────────

    #[test]
    fn test_optional_values_carried_through() {
        with_overrides(
            &[
                ("GH_TOKEN", Some("ghp_abc")),
                ("ASSIGN_USER", Some("alice")),
                ("ISSUE_LABEL", Some("diary")),
                ("ISSUE_TEMPLATE", Some(".github/diary.md")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.github_token.as_deref(), Some("ghp_abc"));
                assert_eq!(config.assignee.as_deref(), Some("alice"));
                assert_eq!(config.label.as_deref(), Some("diary"));
                assert_eq!(
                    config.template_path.as_deref(),
                    Some(std::path::Path::new(".github/diary.md"))
                );
            },
        );
    }

    #[test]
    fn test_empty_optional_treated_as_unset() {
        with_overrides(&[("ISSUE_LABEL", Some(""))], || {
            assert!(Config::from_env().unwrap().label.is_none());
        });
    }
}

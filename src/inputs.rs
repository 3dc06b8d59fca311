//! Run inputs resolved from CLI flags, action inputs and configuration
//!
//! Priority, highest first: CLI flags, `INPUT_*` environment variables (as set
//! by a GitHub Actions runner), the config file, built-in defaults. The token
//! falls back to `GITHUB_TOKEN` last.

use std::time::Duration;

use crate::config::Config;
use crate::error::{CalverError, Result};
use crate::release::RepoSlug;

pub const TOKEN_INPUT: &str = "github-token";
pub const DRY_RUN_INPUT: &str = "dry-run";
pub const DRAFT_INPUT: &str = "draft";

const TRUE_VALUES: [&str; 3] = ["true", "True", "TRUE"];
const FALSE_VALUES: [&str; 3] = ["false", "False", "FALSE"];

/// Values given explicitly on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub token: Option<String>,
    pub dry_run: Option<bool>,
    pub draft: Option<bool>,
    pub repository: Option<String>,
    pub api_url: Option<String>,
}

/// Everything a run needs, fully resolved
#[derive(Clone, PartialEq, Eq)]
pub struct ReleaseInputs {
    pub token: String,
    pub dry_run: bool,
    pub draft: bool,
    pub repository: RepoSlug,
    pub api_url: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for ReleaseInputs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReleaseInputs")
            .field("token", &"***")
            .field("dry_run", &self.dry_run)
            .field("draft", &self.draft)
            .field("repository", &self.repository)
            .field("api_url", &self.api_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ReleaseInputs {
    /// Resolve inputs against the process environment
    pub fn from_env(cli: &CliOverrides, config: &Config) -> Result<Self> {
        Self::resolve(cli, config, |name| std::env::var(name).ok())
    }

    /// Resolve inputs using `env` to look up environment variables
    pub fn resolve<F>(cli: &CliOverrides, config: &Config, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // The ambient GITHUB_TOKEN only fills in when no token was given explicitly
        let token = cli
            .token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .or_else(|| get_input(&env, TOKEN_INPUT))
            .or_else(|| {
                env("GITHUB_TOKEN")
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty())
            })
            .ok_or_else(|| {
                CalverError::input(format!("Input required and not supplied: {}", TOKEN_INPUT))
            })?;

        let dry_run = match cli.dry_run {
            Some(v) => v,
            None => get_boolean_input(&env, DRY_RUN_INPUT)?.unwrap_or(config.release.dry_run),
        };
        let draft = match cli.draft {
            Some(v) => v,
            None => get_boolean_input(&env, DRAFT_INPUT)?.unwrap_or(config.release.draft),
        };

        let slug = cli
            .repository
            .clone()
            .or_else(|| config.github.repository.clone())
            .or_else(|| env("GITHUB_REPOSITORY").filter(|s| !s.is_empty()))
            .ok_or_else(|| {
                CalverError::config("No repository given: pass --repository or set GITHUB_REPOSITORY")
            })?;
        let repository = RepoSlug::parse(&slug)?;

        let api_url = cli
            .api_url
            .clone()
            .or_else(|| env("GITHUB_API_URL").filter(|s| !s.is_empty()))
            .unwrap_or_else(|| config.github.api_url.clone());

        Ok(ReleaseInputs {
            token,
            dry_run,
            draft,
            repository,
            api_url,
            timeout: Duration::from_secs(config.github.timeout_secs),
        })
    }
}

/// Environment variable an action input is passed through
pub fn input_env_name(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

/// Trimmed value of an action input; empty counts as unset
pub fn get_input<F>(env: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    env(&input_env_name(name))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Boolean action input, accepting only the YAML 1.2 core schema spellings
pub fn get_boolean_input<F>(env: &F, name: &str) -> Result<Option<bool>>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = get_input(env, name) else {
        return Ok(None);
    };

    if TRUE_VALUES.contains(&value.as_str()) {
        Ok(Some(true))
    } else if FALSE_VALUES.contains(&value.as_str()) {
        Ok(Some(false))
    } else {
        Err(CalverError::input(format!(
            "Input '{}' is not a boolean ('{}'); supported values: true | True | TRUE | false | False | FALSE",
            name, value
        )))
    }
}

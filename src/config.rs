//! Helper configuration: defaults, JSON, environment overrides.

use serde::{Deserialize, Serialize};

use crate::sink::DEFAULT_LOG_LIMIT;
use crate::{Error, Result};

pub const ENV_PRETTY_PRINT: &str = "UI_HELPERS_PRETTY_PRINT";
pub const ENV_HIDDEN_CLASS: &str = "UI_HELPERS_HIDDEN_CLASS";
pub const ENV_DISABLED_CLASS: &str = "UI_HELPERS_DISABLED_CLASS";
pub const ENV_LOG_LIMIT: &str = "UI_HELPERS_LOG_LIMIT";

pub const DEFAULT_HIDDEN_CLASS: &str = "d-none";
pub const DEFAULT_DISABLED_CLASS: &str = "disabled";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HelperConfig {
    /// Render structured inspection results as indented JSON.
    pub pretty_print: bool,
    /// Class marking an element as hidden.
    pub hidden_class: String,
    /// Class marking a control as disabled.
    pub disabled_class: String,
    /// Buffer size of a [`TraceLog`](crate::TraceLog) built with
    /// `TraceLog::from_config`.
    pub log_limit: usize,
}

impl Default for HelperConfig {
    fn default() -> Self {
        Self {
            pretty_print: false,
            hidden_class: DEFAULT_HIDDEN_CLASS.to_string(),
            disabled_class: DEFAULT_DISABLED_CLASS.to_string(),
            log_limit: DEFAULT_LOG_LIMIT,
        }
    }
}

impl HelperConfig {
    pub fn from_json_str(src: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(src).map_err(|err| Error::InvalidConfig(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Applies `UI_HELPERS_*` variables on top of `self`. Unset, empty or
    /// unparsable values leave the field alone, and so do marker values that
    /// are not a single class name.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    pub(crate) fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };

        if let Some(pretty) = lookup(ENV_PRETTY_PRINT).and_then(|raw| parse_flag(&raw)) {
            self.pretty_print = pretty;
        }
        if let Some(class) = lookup(ENV_HIDDEN_CLASS).filter(|class| is_single_class(class)) {
            self.hidden_class = class;
        }
        if let Some(class) = lookup(ENV_DISABLED_CLASS).filter(|class| is_single_class(class)) {
            self.disabled_class = class;
        }
        if let Some(limit) = lookup(ENV_LOG_LIMIT)
            .and_then(|raw| raw.parse::<usize>().ok())
            .filter(|limit| *limit > 0)
        {
            self.log_limit = limit;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        for (field, class) in [
            ("hidden_class", &self.hidden_class),
            ("disabled_class", &self.disabled_class),
        ] {
            if !is_single_class(class) {
                return Err(Error::InvalidConfig(format!(
                    "{field} must be a single class name, got '{class}'"
                )));
            }
        }
        if self.log_limit == 0 {
            return Err(Error::InvalidConfig(
                "log_limit requires at least 1 entry".into(),
            ));
        }
        Ok(())
    }

    pub fn pretty_print(mut self, enabled: bool) -> Self {
        self.pretty_print = enabled;
        self
    }

    pub fn hidden_class(mut self, class: impl Into<String>) -> Self {
        self.hidden_class = class.into();
        self
    }

    pub fn disabled_class(mut self, class: impl Into<String>) -> Self {
        self.disabled_class = class.into();
        self
    }

    pub fn log_limit(mut self, max_entries: usize) -> Self {
        self.log_limit = max_entries;
        self
    }
}

/// A marker is toggled as one class token, so it must be exactly one.
pub(crate) fn is_single_class(class: &str) -> bool {
    !class.is_empty() && !class.chars().any(char::is_whitespace)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

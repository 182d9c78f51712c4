use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use serde_with::serde_as;

use crate::Result;
use crate::error::ConfigError;

use super::defaults::{
    default_dismiss_after, default_max_cards, default_reveal_delay, default_template,
};
use super::env::{env_duration, env_parse, env_string};
use super::{HumantimeDuration, MAX_CARDS_BOUNDS, Settings};

pub(super) fn load(path: impl AsRef<Path>) -> std::result::Result<RawSettings, ConfigError> {
    let mut builder = ::config::Config::builder();
    let path = path.as_ref();
    builder = builder.add_source(::config::File::from(path).required(false));
    builder = builder.add_source(
        ::config::Environment::with_prefix("TOASTS")
            .separator("__")
            .try_parsing(true),
    );

    builder
        .build()
        .map_err(|err| ConfigError::Other(err.to_string()))?
        .try_deserialize()
        .map_err(|err| ConfigError::Parse(err.to_string()))
}

#[serde_as]
#[derive(Debug, Deserialize)]
pub(super) struct RawSettings {
    #[serde(default)]
    pub(super) stack: RawStack,
}

#[serde_as]
#[derive(Debug, Deserialize)]
pub(super) struct RawStack {
    #[serde(default = "default_max_cards")]
    pub(super) max_cards: usize,
    #[serde(default = "default_reveal_delay")]
    #[serde_as(as = "HumantimeDuration")]
    pub(super) reveal_delay: Duration,
    #[serde(default = "default_dismiss_after")]
    #[serde_as(as = "HumantimeDuration")]
    pub(super) dismiss_after: Duration,
    #[serde(default = "default_template")]
    pub(super) template: String,
}

impl RawSettings {
    pub(super) fn apply_env_overrides(&mut self) -> std::result::Result<(), ConfigError> {
        if let Some(max_cards) = env_parse::<usize>("MAX_CARDS")? {
            self.stack.max_cards = max_cards;
        }
        if let Some(reveal_delay) = env_duration("REVEAL_DELAY")? {
            self.stack.reveal_delay = reveal_delay;
        }
        if let Some(dismiss_after) = env_duration("DISMISS_AFTER")? {
            self.stack.dismiss_after = dismiss_after;
        }
        if let Some(template) = env_string("TEMPLATE")? {
            self.stack.template = template;
        }
        Ok(())
    }

    pub(super) fn validate_and_build(self) -> Result<Settings> {
        if !MAX_CARDS_BOUNDS.contains(&self.stack.max_cards) {
            return Err(ConfigError::InvalidField {
                field: "stack.max_cards",
                message: format!(
                    "expected between {} and {}, got {}",
                    MAX_CARDS_BOUNDS.start(),
                    MAX_CARDS_BOUNDS.end(),
                    self.stack.max_cards
                ),
            }
            .into());
        }
        if self.stack.dismiss_after.is_zero() {
            return Err(ConfigError::InvalidField {
                field: "stack.dismiss_after",
                message: "display time must be greater than zero".to_string(),
            }
            .into());
        }
        if self.stack.reveal_delay >= self.stack.dismiss_after {
            return Err(ConfigError::InvalidField {
                field: "stack.reveal_delay",
                message: "entrance delay must be shorter than stack.dismiss_after".to_string(),
            }
            .into());
        }
        if self.stack.template.trim().is_empty() {
            return Err(ConfigError::InvalidField {
                field: "stack.template",
                message: "template name cannot be empty".to_string(),
            }
            .into());
        }

        Ok(Settings {
            max_cards: self.stack.max_cards,
            reveal_delay: self.stack.reveal_delay,
            dismiss_after: self.stack.dismiss_after,
            template: self.stack.template,
        })
    }
}

impl Default for RawStack {
    fn default() -> Self {
        Self {
            max_cards: default_max_cards(),
            reveal_delay: default_reveal_delay(),
            dismiss_after: default_dismiss_after(),
            template: default_template(),
        }
    }
}

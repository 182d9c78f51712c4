use std::ops::RangeInclusive;
use std::path::Path;
use std::time::Duration;

use crate::Result;
use crate::error::Error as ToastError;

mod defaults;
mod env;
mod raw;
mod serde;

pub(crate) use self::serde::HumantimeDuration;

const MAX_CARDS_BOUNDS: RangeInclusive<usize> = 1..=25;

/// Display behaviour of the notification stack.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Capacity ceiling for simultaneously displayed cards.
    pub max_cards: usize,
    /// Delay before the entrance marker is applied to a freshly inserted
    /// card, so the element is attached (and transition-capable) first.
    pub reveal_delay: Duration,
    /// Time on screen before a card fades out and is detached.
    pub dismiss_after: Duration,
    /// Logical name requested from the template source.
    pub template: String,
}

impl Settings {
    /// Load settings from a TOML file and `TOASTS_*` environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be parsed, when an environment
    /// override is invalid, or when the resulting values fail validation.
    pub fn from_env_and_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut raw = raw::load(path).map_err(ToastError::from)?;
        raw.apply_env_overrides().map_err(ToastError::from)?;
        raw.validate_and_build()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_cards: defaults::default_max_cards(),
            reveal_delay: defaults::default_reveal_delay(),
            dismiss_after: defaults::default_dismiss_after(),
            template: defaults::default_template(),
        }
    }
}

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// One transient message handed to the manager for display.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Notification {
    pub title: String,
    pub content: String,
    /// Symbolic icon identifier; an empty string means no icon.
    #[serde(default)]
    pub icon: String,
    /// When present, the rendered card becomes clickable and a click
    /// navigates to this target.
    #[serde(default)]
    pub navigation_target: Option<String>,
}

impl Notification {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            icon: icon.into(),
            navigation_target: None,
        }
    }

    #[must_use]
    pub fn with_navigation(mut self, target: impl Into<String>) -> Self {
        self.navigation_target = Some(target.into());
        self
    }
}

/// Lifecycle of one displayed card, from insertion to detachment.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CardState {
    Entering,
    Visible,
    Fading,
    Removed,
}

impl CardState {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Entering => "entering",
            Self::Visible => "visible",
            Self::Fading => "fading",
            Self::Removed => "removed",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Removed)
    }
}

impl Display for CardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

use std::fmt::{self, Display};

use uuid::Uuid;

/// Handle for one rendered card element, minted by the manager and shared
/// with the surface for the lifetime of the element.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct CardId(Uuid);

impl CardId {
    pub(crate) fn mint() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// Visual state class applied to a card element.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Marker {
    /// Entrance transition: the card has settled into the stack.
    Shown,
    /// Exit transition applied just before detachment.
    FadeOut,
    /// The card reacts to clicks.
    Clickable,
}

impl Marker {
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Shown => "show",
            Self::FadeOut => "fadeout",
            Self::Clickable => "clickable",
        }
    }
}

/// Ordered, mutable collection of card elements owned by the host shell.
///
/// The manager holds exclusive ownership of every element it prepends, from
/// creation until its own `remove` call; hosts must not detach children on
/// their own.
pub trait Surface {
    /// Number of card elements currently attached.
    fn child_count(&self) -> usize;

    /// Attaches rendered markup as the new first child.
    fn prepend(&mut self, card: CardId, markup: &str);

    /// Detaches the element for `card`.
    fn remove(&mut self, card: CardId);

    /// Applies a visual marker class to the element for `card`.
    fn apply_marker(&mut self, card: CardId, marker: Marker);
}

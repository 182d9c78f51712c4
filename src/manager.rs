use std::collections::VecDeque;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::Result;
use crate::config::Settings;
use crate::error::Error;
use crate::navigate::Navigator;
use crate::render::{self, TemplateUnavailable};
use crate::schedule::{TimerId, TimerQueue};
use crate::surface::{CardId, Marker, Surface};
use crate::templates::TemplateSource;
use crate::types::{CardState, Notification};

/// One displayed card, tracked while its element is on screen.
#[derive(Debug)]
struct Card {
    id: CardId,
    state: CardState,
    navigation: Option<String>,
    reveal_timer: Option<TimerId>,
    dismiss_timer: Option<TimerId>,
}

/// Lifecycle manager for the on-screen notification stack.
///
/// Owns every card it displays: bounded capacity with oldest-first
/// eviction, newest-first stacking, and the timed entering → visible →
/// fading → removed transitions. Timers are plain data driven by
/// [`service`](Self::service) with a caller-supplied clock, so the whole
/// lifecycle runs deterministically on a single thread.
pub struct NotificationManager<T, N, S> {
    templates: T,
    navigator: N,
    settings: Settings,
    surface: Option<S>,
    timers: TimerQueue,
    /// Front is the newest card, mirroring the surface's child order.
    cards: VecDeque<Card>,
}

impl<T, N, S> NotificationManager<T, N, S>
where
    T: TemplateSource,
    N: Navigator,
    S: Surface,
{
    pub fn new(templates: T, navigator: N, settings: Settings) -> Self {
        Self {
            templates,
            navigator,
            settings,
            surface: None,
            timers: TimerQueue::new(),
            cards: VecDeque::new(),
        }
    }

    /// Binds the rendering surface. Required before the first [`post`].
    ///
    /// Binding again replaces the surface: pending timers are cancelled and
    /// the cards handed to the previous surface are forgotten (their
    /// elements stay with it).
    ///
    /// [`post`]: Self::post
    pub fn configure(&mut self, surface: S) {
        if self.surface.is_some() {
            debug!(cards = self.cards.len(), "rebinding surface");
        }
        for card in self.cards.drain(..) {
            if let Some(timer) = card.reveal_timer {
                self.timers.cancel(timer);
            }
            if let Some(timer) = card.dismiss_timer {
                self.timers.cancel(timer);
            }
        }
        self.surface = Some(surface);
    }

    /// Enqueues a notification for display.
    ///
    /// Returns the handle of the freshly inserted card, or `None` when the
    /// template source had nothing to render with — that post is a silent
    /// no-op.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NotConfigured`] when no surface is bound.
    pub fn post(&mut self, notification: Notification, now: Instant) -> Result<Option<CardId>> {
        let surface = self.surface.as_mut().ok_or(Error::NotConfigured)?;

        if surface.child_count() >= self.settings.max_cards {
            if let Some(evicted) = self.cards.pop_back() {
                if let Some(timer) = evicted.reveal_timer {
                    self.timers.cancel(timer);
                }
                if let Some(timer) = evicted.dismiss_timer {
                    self.timers.cancel(timer);
                }
                surface.remove(evicted.id);
                debug!(card = %evicted.id, state = %evicted.state, "evicted oldest card over capacity");
            }
        }

        let markup =
            match render::render_card(&self.templates, &self.settings.template, &notification) {
                Ok(markup) => markup,
                Err(TemplateUnavailable(name)) => {
                    warn!(template = %name, "notification template unavailable, dropping post");
                    return Ok(None);
                }
            };

        let id = CardId::mint();
        surface.prepend(id, &markup);

        if notification.navigation_target.is_some() {
            surface.apply_marker(id, Marker::Clickable);
        }

        let dismiss_timer = self.timers.schedule(now, self.settings.dismiss_after);
        let reveal_timer = self.timers.schedule(now, self.settings.reveal_delay);

        info!(
            card = %id,
            title = %notification.title,
            clickable = notification.navigation_target.is_some(),
            "notification posted"
        );

        self.cards.push_front(Card {
            id,
            state: CardState::Entering,
            navigation: notification.navigation_target,
            reveal_timer: Some(reveal_timer),
            dismiss_timer: Some(dismiss_timer),
        });

        Ok(Some(id))
    }

    /// Applies every transition whose timer is due at `now`, earliest
    /// first. Safe to call at any cadence; nothing happens between
    /// deadlines.
    pub fn service(&mut self, now: Instant) {
        while let Some(timer) = self.timers.pop_due(now) {
            self.apply_transition(timer);
        }
    }

    /// Host-reported click on a card element. Navigates when the card
    /// carries a target; clicks on targetless or unknown cards are ignored.
    pub fn click(&mut self, card: CardId) {
        let Some(entry) = self.cards.iter().find(|entry| entry.id == card) else {
            debug!(%card, "click on unknown card ignored");
            return;
        };
        if let Some(target) = entry.navigation.as_deref() {
            info!(card = %entry.id, target, "navigating from card click");
            self.navigator.navigate_to(target);
        }
    }

    /// Number of cards currently on screen.
    pub fn active(&self) -> usize {
        self.cards.len()
    }

    /// Deadline of the next pending transition, for host scheduling loops.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Lifecycle state of a displayed card; `None` once it is gone.
    pub fn state_of(&self, card: CardId) -> Option<CardState> {
        self.cards
            .iter()
            .find(|entry| entry.id == card)
            .map(|entry| entry.state)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn apply_transition(&mut self, timer: TimerId) {
        let Some(index) = self.cards.iter().position(|card| {
            card.reveal_timer == Some(timer) || card.dismiss_timer == Some(timer)
        }) else {
            debug!(?timer, "timer fired with no matching card");
            return;
        };
        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        if self.cards[index].reveal_timer == Some(timer) {
            let card = &mut self.cards[index];
            card.reveal_timer = None;
            card.state = CardState::Visible;
            surface.apply_marker(card.id, Marker::Shown);
            debug!(card = %card.id, "card revealed");
        } else if let Some(mut card) = self.cards.remove(index) {
            // The dismiss timer just fired; only a still-pending reveal
            // needs cancelling. Fade-out and detachment happen in the same
            // action.
            if let Some(reveal) = card.reveal_timer.take() {
                self.timers.cancel(reveal);
            }
            surface.apply_marker(card.id, Marker::FadeOut);
            surface.remove(card.id);
            debug!(card = %card.id, last_state = %card.state, "card faded out and detached");
        }
    }
}

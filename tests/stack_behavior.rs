#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use toasts::config::Settings;
use toasts::error::Error;
use toasts::manager::NotificationManager;
use toasts::navigate::Navigator;
use toasts::surface::{CardId, Marker, Surface};
use toasts::templates::{DEFAULT_TEMPLATE, StaticTemplates};
use toasts::types::{CardState, Notification};

const TEMPLATE: &str = "<div>%TITLE%:%CONTENT%:%ICON%</div>";

#[derive(Default)]
struct SurfaceLog {
    /// Front is the first child, mirroring stack order.
    children: Vec<(CardId, String)>,
    markers: Vec<(CardId, Marker)>,
    removals: Vec<CardId>,
}

/// Surface double that records every mutation for inspection.
#[derive(Clone, Default)]
struct RecordingSurface {
    inner: Rc<RefCell<SurfaceLog>>,
}

impl RecordingSurface {
    fn children(&self) -> Vec<(CardId, String)> {
        self.inner.borrow().children.clone()
    }

    fn removals(&self) -> Vec<CardId> {
        self.inner.borrow().removals.clone()
    }

    fn markers_for(&self, card: CardId) -> Vec<Marker> {
        self.inner
            .borrow()
            .markers
            .iter()
            .filter(|(owner, _)| *owner == card)
            .map(|(_, marker)| *marker)
            .collect()
    }

    fn is_attached(&self, card: CardId) -> bool {
        self.inner
            .borrow()
            .children
            .iter()
            .any(|(child, _)| *child == card)
    }
}

impl Surface for RecordingSurface {
    fn child_count(&self) -> usize {
        self.inner.borrow().children.len()
    }

    fn prepend(&mut self, card: CardId, markup: &str) {
        self.inner
            .borrow_mut()
            .children
            .insert(0, (card, markup.to_string()));
    }

    fn remove(&mut self, card: CardId) {
        let mut inner = self.inner.borrow_mut();
        inner.children.retain(|(child, _)| *child != card);
        inner.removals.push(card);
    }

    fn apply_marker(&mut self, card: CardId, marker: Marker) {
        self.inner.borrow_mut().markers.push((card, marker));
    }
}

struct RecordingNavigator {
    log: Rc<RefCell<Vec<String>>>,
}

impl Navigator for RecordingNavigator {
    fn navigate_to(&mut self, target: &str) {
        self.log.borrow_mut().push(target.to_string());
    }
}

type Manager = NotificationManager<StaticTemplates, RecordingNavigator, RecordingSurface>;

fn fixture_with_template(template: &str) -> (Manager, RecordingSurface, Rc<RefCell<Vec<String>>>) {
    let templates = StaticTemplates::new().with("notification", template);
    let log = Rc::new(RefCell::new(Vec::new()));
    let navigator = RecordingNavigator {
        log: Rc::clone(&log),
    };
    let mut manager = NotificationManager::new(templates, navigator, Settings::default());
    let surface = RecordingSurface::default();
    manager.configure(surface.clone());
    (manager, surface, log)
}

fn fixture() -> (Manager, RecordingSurface, Rc<RefCell<Vec<String>>>) {
    fixture_with_template(TEMPLATE)
}

fn post(manager: &mut Manager, notification: Notification, now: Instant) -> CardId {
    manager
        .post(notification, now)
        .expect("surface is configured")
        .expect("template is registered")
}

#[test]
fn display_stays_bounded_and_reverse_chronological() {
    let (mut manager, surface, _log) = fixture();
    let start = Instant::now();

    for index in 0..7 {
        post(
            &mut manager,
            Notification::new(format!("note {index}"), "body", ""),
            start,
        );
    }

    let children = surface.children();
    assert_eq!(children.len(), 5);
    assert_eq!(manager.active(), 5);
    for (position, (_, markup)) in children.iter().enumerate() {
        let expected_title = format!("note {}", 6 - position);
        assert!(
            markup.contains(&expected_title),
            "child {position} should be {expected_title}, got {markup}"
        );
    }
}

#[test]
fn posting_at_capacity_evicts_exactly_the_oldest() {
    let (mut manager, surface, _log) = fixture();
    let start = Instant::now();

    let first = post(&mut manager, Notification::new("first", "", ""), start);
    for index in 1..5 {
        post(
            &mut manager,
            Notification::new(format!("note {index}"), "", ""),
            start,
        );
    }
    assert!(surface.removals().is_empty());

    post(&mut manager, Notification::new("sixth", "", ""), start);
    assert_eq!(surface.removals(), vec![first]);
    assert_eq!(surface.child_count(), 5);
}

#[test]
fn eviction_cancels_the_pending_timers() {
    let (mut manager, surface, _log) = fixture();
    let start = Instant::now();

    let evicted = post(&mut manager, Notification::new("evicted", "", ""), start);
    for index in 0..5 {
        post(
            &mut manager,
            Notification::new(format!("note {index}"), "", ""),
            start,
        );
    }
    assert_eq!(surface.removals(), vec![evicted]);
    // The evicted card went straight from entering to removed.
    assert!(surface.markers_for(evicted).is_empty());
    assert_eq!(manager.state_of(evicted), None);

    manager.service(start + Duration::from_secs(9));

    // One removal per card, never a second attempt against the evicted one.
    let removals = surface.removals();
    assert_eq!(removals.len(), 6);
    let unique: std::collections::HashSet<_> = removals.iter().collect();
    assert_eq!(unique.len(), 6);
    assert_eq!(manager.active(), 0);
    assert_eq!(manager.next_deadline(), None);
}

#[test]
fn substitution_fills_every_placeholder() {
    let (mut manager, surface, _log) = fixture();
    post(
        &mut manager,
        Notification::new("A", "B", "C"),
        Instant::now(),
    );

    let children = surface.children();
    assert_eq!(children[0].1, "<div>A:B:C</div>");
    assert!(!children[0].1.contains('%'));
}

#[test]
fn substitution_touches_only_the_first_occurrence_and_trims() {
    let (mut manager, surface, _log) =
        fixture_with_template("  <b>%TITLE% %TITLE%</b>\n");
    post(
        &mut manager,
        Notification::new("X", "ignored", ""),
        Instant::now(),
    );

    assert_eq!(surface.children()[0].1, "<b>X %TITLE%</b>");
}

#[test]
fn stock_card_markup_renders_cleanly() {
    let (mut manager, surface, _log) = fixture_with_template(DEFAULT_TEMPLATE);
    post(
        &mut manager,
        Notification::new("Flight ready", "Launch window open", "rocket"),
        Instant::now(),
    );

    let markup = surface.children()[0].1.clone();
    insta::assert_snapshot!(markup, @r#"<div class="notification-card">
  <i class="icon">rocket</i>
  <div class="title">Flight ready</div>
  <div class="content">Launch window open</div>
</div>"#);
}

#[test]
fn template_failure_is_silent() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let navigator = RecordingNavigator {
        log: Rc::clone(&log),
    };
    let mut manager =
        NotificationManager::new(StaticTemplates::new(), navigator, Settings::default());
    let surface = RecordingSurface::default();
    manager.configure(surface.clone());

    let posted = manager.post(Notification::new("A", "B", ""), Instant::now());
    assert!(matches!(posted, Ok(None)));
    assert_eq!(surface.child_count(), 0);
    assert_eq!(manager.active(), 0);
}

#[test]
fn click_navigates_exactly_once_per_click() {
    let (mut manager, surface, log) = fixture();
    let now = Instant::now();

    let clickable = post(
        &mut manager,
        Notification::new("Flight ready", "", "").with_navigation("Mars"),
        now,
    );
    assert_eq!(surface.markers_for(clickable), vec![Marker::Clickable]);

    manager.click(clickable);
    assert_eq!(*log.borrow(), vec!["Mars".to_string()]);
}

#[test]
fn cards_without_a_target_are_not_clickable() {
    let (mut manager, surface, log) = fixture();

    let plain = post(
        &mut manager,
        Notification::new("Download complete", "", ""),
        Instant::now(),
    );
    assert!(surface.markers_for(plain).is_empty());

    manager.click(plain);
    assert!(log.borrow().is_empty());
}

#[test]
fn entrance_marker_appears_only_after_the_reveal_delay() {
    let (mut manager, surface, _log) = fixture();
    let start = Instant::now();

    let card = post(&mut manager, Notification::new("A", "B", ""), start);
    assert!(surface.markers_for(card).is_empty());
    assert_eq!(manager.state_of(card), Some(CardState::Entering));

    manager.service(start + Duration::from_millis(59));
    assert!(surface.markers_for(card).is_empty());

    manager.service(start + Duration::from_millis(60));
    assert_eq!(surface.markers_for(card), vec![Marker::Shown]);
    assert_eq!(manager.state_of(card), Some(CardState::Visible));
}

#[test]
fn cards_are_dismissed_after_their_display_time() {
    let (mut manager, surface, _log) = fixture();
    let start = Instant::now();

    let card = post(&mut manager, Notification::new("A", "B", ""), start);

    manager.service(start + Duration::from_millis(7_999));
    assert!(surface.is_attached(card));
    assert_eq!(manager.active(), 1);

    manager.service(start + Duration::from_millis(8_001));
    assert!(!surface.is_attached(card));
    assert_eq!(
        surface.markers_for(card),
        vec![Marker::Shown, Marker::FadeOut]
    );
    assert_eq!(surface.removals(), vec![card]);
    assert_eq!(manager.state_of(card), None);
    assert_eq!(manager.active(), 0);
    assert_eq!(manager.next_deadline(), None);
}

#[test]
fn post_without_configure_surfaces_the_contract_violation() {
    let templates = StaticTemplates::new().with("notification", TEMPLATE);
    let navigator = RecordingNavigator {
        log: Rc::new(RefCell::new(Vec::new())),
    };
    let mut manager: Manager = NotificationManager::new(templates, navigator, Settings::default());

    let result = manager.post(Notification::new("A", "B", ""), Instant::now());
    assert!(matches!(result, Err(Error::NotConfigured)));
}

#[test]
fn rebinding_the_surface_forgets_pending_cards() {
    let (mut manager, old_surface, _log) = fixture();
    let start = Instant::now();

    post(&mut manager, Notification::new("A", "", ""), start);
    post(&mut manager, Notification::new("B", "", ""), start);
    assert_eq!(manager.active(), 2);

    let fresh = RecordingSurface::default();
    manager.configure(fresh.clone());
    assert_eq!(manager.active(), 0);
    assert_eq!(manager.next_deadline(), None);
    // Elements handed to the previous surface stay with it.
    assert_eq!(old_surface.child_count(), 2);

    let card = post(&mut manager, Notification::new("C", "", ""), start);
    assert!(fresh.is_attached(card));
    assert!(!old_surface.is_attached(card));
}

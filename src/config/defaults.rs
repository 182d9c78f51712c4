use std::time::Duration;

pub(super) const fn default_max_cards() -> usize {
    5
}

pub(super) const fn default_reveal_delay() -> Duration {
    Duration::from_millis(60)
}

pub(super) const fn default_dismiss_after() -> Duration {
    Duration::from_millis(8_000)
}

pub(super) fn default_template() -> String {
    "notification".to_string()
}

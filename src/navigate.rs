/// Click-to-navigate collaborator. Fire-and-forget: no return value is
/// consumed.
pub trait Navigator {
    fn navigate_to(&mut self, target: &str);
}

impl<F> Navigator for F
where
    F: FnMut(&str),
{
    fn navigate_to(&mut self, target: &str) {
        self(target);
    }
}

/// Navigator for hosts without a navigation facility; clicks go nowhere.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoNavigation;

impl Navigator for NoNavigation {
    fn navigate_to(&mut self, _target: &str) {}
}

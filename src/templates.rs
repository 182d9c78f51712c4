use std::collections::HashMap;
use std::io;
use std::path::Path;

use tracing::debug;

/// Ready-made card markup carrying the three placeholder tokens. Hosts that
/// ship their own stylesheet can register it under the configured template
/// name instead of providing files.
pub const DEFAULT_TEMPLATE: &str = r#"<div class="notification-card">
  <i class="icon">%ICON%</i>
  <div class="title">%TITLE%</div>
  <div class="content">%CONTENT%</div>
</div>"#;

/// Provider of renderable card markup, looked up by logical name.
pub trait TemplateSource {
    /// Returns the markup for `name`, or `None` when no such template
    /// exists.
    fn template(&self, name: &str) -> Option<String>;
}

impl<F> TemplateSource for F
where
    F: Fn(&str) -> Option<String>,
{
    fn template(&self, name: &str) -> Option<String> {
        self(name)
    }
}

/// In-memory template registry, the registration path a shell uses at
/// startup.
#[derive(Clone, Debug, Default)]
pub struct StaticTemplates {
    entries: HashMap<String, String>,
}

impl StaticTemplates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, markup: impl Into<String>) {
        self.entries.insert(name.into(), markup.into());
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, markup: impl Into<String>) -> Self {
        self.insert(name, markup);
        self
    }
}

impl TemplateSource for StaticTemplates {
    fn template(&self, name: &str) -> Option<String> {
        self.entries.get(name).cloned()
    }
}

/// Templates loaded once from `<name>.html` files in a directory.
#[derive(Clone, Debug)]
pub struct DirTemplates {
    entries: HashMap<String, String>,
}

impl DirTemplates {
    /// Scans `dir` and keeps the contents of every `*.html` file, keyed by
    /// file stem.
    ///
    /// # Errors
    ///
    /// Fails when the directory cannot be read. Unreadable individual files
    /// are skipped with a log line.
    pub fn load(dir: impl AsRef<Path>) -> io::Result<Self> {
        let mut entries = HashMap::new();
        for dir_entry in std::fs::read_dir(dir)? {
            let path = dir_entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("html") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            match std::fs::read_to_string(&path) {
                Ok(markup) => {
                    entries.insert(stem.to_string(), markup);
                }
                Err(err) => {
                    debug!(path = %path.display(), error = %err, "skipping unreadable template file");
                }
            }
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TemplateSource for DirTemplates {
    fn template(&self, name: &str) -> Option<String> {
        self.entries.get(name).cloned()
    }
}

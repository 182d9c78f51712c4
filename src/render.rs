use thiserror::Error;

use crate::templates::TemplateSource;
use crate::types::Notification;

const TITLE_TOKEN: &str = "%TITLE%";
const CONTENT_TOKEN: &str = "%CONTENT%";
const ICON_TOKEN: &str = "%ICON%";

/// The template source had no markup under the requested name.
#[derive(Debug, Error)]
#[error("notification template {0:?} is unavailable")]
pub struct TemplateUnavailable(pub String);

/// Fetches the card template and substitutes the notification fields into
/// it.
///
/// Substitution is literal and touches only the first occurrence of each
/// token; no escaping is applied. The result is trimmed of surrounding
/// whitespace.
pub fn render_card<T: TemplateSource>(
    templates: &T,
    name: &str,
    notification: &Notification,
) -> Result<String, TemplateUnavailable> {
    let markup = templates
        .template(name)
        .ok_or_else(|| TemplateUnavailable(name.to_string()))?;
    Ok(substitute(&markup, notification))
}

fn substitute(markup: &str, notification: &Notification) -> String {
    markup
        .replacen(TITLE_TOKEN, &notification.title, 1)
        .replacen(CONTENT_TOKEN, &notification.content, 1)
        .replacen(ICON_TOKEN, &notification.icon, 1)
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::{TemplateUnavailable, render_card, substitute};
    use crate::templates::StaticTemplates;
    use crate::types::Notification;

    fn sample() -> Notification {
        Notification::new("A", "B", "C")
    }

    #[test]
    fn substitutes_every_token() {
        let markup = substitute("<div>%TITLE%:%CONTENT%:%ICON%</div>", &sample());
        assert_eq!(markup, "<div>A:B:C</div>");
        assert!(!markup.contains('%'));
    }

    #[test]
    fn replaces_only_the_first_occurrence() {
        let markup = substitute("<b>%TITLE% %TITLE%</b>", &sample());
        assert_eq!(markup, "<b>A %TITLE%</b>");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let markup = substitute("\n  <div>%TITLE%</div>\n  ", &sample());
        assert_eq!(markup, "<div>A</div>");
    }

    #[test]
    fn missing_template_names_the_lookup() {
        let templates = StaticTemplates::new();
        let err = match render_card(&templates, "notification", &sample()) {
            Err(err) => err,
            Ok(markup) => panic!("unexpected render: {markup}"),
        };
        let TemplateUnavailable(name) = err;
        assert_eq!(name, "notification");
    }
}

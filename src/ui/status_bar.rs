use crate::i18n::{self, Language};
use crate::state::{ConnectionState, Snapshot};

use super::style;

pub fn render(snapshot: &Snapshot, locale: Language, dark_mode: bool) -> Vec<String> {
    let status_key = match snapshot.connection {
        ConnectionState::Connected => "status_connected",
        ConnectionState::Disconnected => "status_disconnected",
    };
    let theme_key = if dark_mode {
        "status_theme_dark"
    } else {
        "status_theme_light"
    };

    let mut line = format!(
        "{}  \u{2502}  {}  \u{2502}  {}",
        i18n::ts(locale, "app_title"),
        i18n::ts(locale, status_key),
        i18n::ts(locale, theme_key),
    );
    if let Some(results) = &snapshot.results {
        line.push_str(&format!("  \u{2502}  {}", results.total()));
    }

    vec![line, style::rule(dark_mode)]
}

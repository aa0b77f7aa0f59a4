mod results_list;
mod search_bar;
mod status_bar;
mod style;

use crate::i18n::{self, Language};
use crate::state::Snapshot;

#[derive(Debug, Clone, Copy, Default)]
pub struct ViewOptions {
    pub locale: Language,
    pub dark_mode: bool,
}

/// Draws the whole screen for one snapshot: status line, mode toggle, error
/// banner, then results.
pub fn render(snapshot: &Snapshot, opts: ViewOptions) -> String {
    let mut lines = status_bar::render(snapshot, opts.locale, opts.dark_mode);
    lines.extend(search_bar::render(snapshot.mode, opts.locale));

    if let Some(error) = &snapshot.error {
        lines.push(format!("! {}", error));
    }

    lines.push(String::new());
    lines.extend(results_list::render(snapshot, opts.locale));
    lines.push(style::rule(opts.dark_mode));
    lines.push(i18n::ts(opts.locale, "app_footer"));
    lines.join("\n")
}

use crate::i18n::{self, Language};
use crate::state::SearchMode;

const MODES: [(SearchMode, &str, &str); 3] = [
    (SearchMode::Similar, "mode_similar", "hint_similar"),
    (SearchMode::Image, "mode_image", "hint_image"),
    (SearchMode::Text, "mode_text", "hint_text"),
];

/// Mode toggle with the active mode bracketed, then the input hint for it.
pub fn render(mode: SearchMode, locale: Language) -> Vec<String> {
    let toggles: Vec<String> = MODES
        .iter()
        .map(|(m, label_key, _)| {
            let label = i18n::ts(locale, label_key);
            if *m == mode {
                format!("[{}]", label)
            } else {
                format!(" {} ", label)
            }
        })
        .collect();

    let hint_key = MODES
        .iter()
        .find(|(m, _, _)| *m == mode)
        .map(|(_, _, hint)| *hint)
        .unwrap_or("hint_text");

    vec![toggles.join(" "), format!("> {}", i18n::ts(locale, hint_key))]
}

use crate::i18n::{self, Language};
use crate::state::{ImageResult, Phase, SearchResults, Snapshot};

use super::style;

fn card(position: usize, image: &ImageResult, locale: Language) -> Vec<String> {
    let mut head = format!(
        "  {:>2}. {}  {}",
        position + 1,
        image.dataset_name,
        i18n::t(locale, "results_index", &[("index", &image.index.to_string())]),
    );
    if let Some(distance) = image.distance {
        head.push_str("  ");
        head.push_str(&i18n::t(
            locale,
            "results_distance",
            &[("distance", &style::format_distance(distance))],
        ));
    }
    vec![
        head,
        format!(
            "      id {}  ({})",
            image.id,
            style::payload_size(&image.base64_image)
        ),
    ]
}

fn columns(results: &SearchResults, locale: Language) -> Vec<String> {
    let mut lines = Vec::new();
    for (target, images) in results.columns() {
        lines.push(style::column_header(target.label(), images.len()));
        if images.is_empty() {
            lines.push(format!("  {}", i18n::ts(locale, "results_no_results")));
        }
        for (i, image) in images.iter().enumerate() {
            lines.extend(card(i, image, locale));
        }
        lines.push(String::new());
    }
    lines
}

pub fn render(snapshot: &Snapshot, locale: Language) -> Vec<String> {
    if snapshot.phase == Phase::Loading {
        return vec![i18n::ts(locale, "results_loading")];
    }

    match &snapshot.results {
        Some(results) => {
            let mut lines = columns(results, locale);
            if snapshot.has_last_search {
                lines.push(i18n::t(
                    locale,
                    "results_load_more",
                    &[("count", &snapshot.page_size.to_string())],
                ));
            }
            lines
        }
        None if !snapshot.predefined.is_empty() && !snapshot.has_last_search => {
            let mut lines = vec![i18n::ts(locale, "predefined_title")];
            for (i, image) in snapshot.predefined.iter().enumerate() {
                lines.extend(card(i, image, locale));
            }
            lines
        }
        None => vec![i18n::ts(locale, "results_no_search")],
    }
}

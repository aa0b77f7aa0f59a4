#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    En,
    Tr,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Tr => "tr",
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code {
            "tr" => Language::Tr,
            _ => Language::En,
        }
    }

    /// `auto` defers to the environment, anything else is a language code.
    pub fn from_setting(setting: &str) -> Self {
        if setting == "auto" {
            detect_system_language()
        } else {
            Language::from_code(setting)
        }
    }
}

pub fn detect_system_language() -> Language {
    match sys_locale::get_locale() {
        Some(locale) => language_from_locale(&locale),
        None => Language::En,
    }
}

/// `tr-TR`, `tr_TR.UTF-8` and `tr` all map to Turkish.
fn language_from_locale(locale: &str) -> Language {
    let lang = locale.split(['_', '-', '.']).next().unwrap_or("en");
    Language::from_code(&lang.to_lowercase())
}

fn get_string(lang: Language, key: &str) -> &'static str {
    match lang {
        Language::En => en(key),
        Language::Tr => {
            let val = tr(key);
            if val.is_empty() { en(key) } else { val }
        }
    }
}

pub fn t(lang: Language, key: &str, vars: &[(&str, &str)]) -> String {
    let mut s = get_string(lang, key).to_string();
    for (k, v) in vars {
        s = s.replace(&format!("{{{{{}}}}}", k), v);
    }
    s
}

pub fn ts(lang: Language, key: &str) -> String {
    get_string(lang, key).to_string()
}

fn en(key: &str) -> &'static str {
    match key {
        "app_title" => "CLIP Arena",
        "app_footer" => "Powered by Weaviate",
        "status_connected" => "Status: Connected",
        "status_disconnected" => "Status: Disconnected",
        "status_theme_dark" => "dark",
        "status_theme_light" => "light",
        "mode_similar" => "Find Similar",
        "mode_image" => "Image Search",
        "mode_text" => "Text Search",
        "hint_similar" => "Enter an image id to find similar images",
        "hint_image" => "Enter the path of an image file (JPG, PNG, GIF, WEBP)",
        "hint_text" => "Search for images...",
        "results_loading" => "Searching for images...",
        "results_no_search" => "Enter a search query to see results",
        "results_no_results" => "No results found",
        "results_index" => "Index: {{index}}",
        "results_distance" => "Distance: {{distance}}",
        "results_load_more" => "Type 'more' to load 10 more ({{count}} per model)",
        "predefined_title" => "Sample images -- use 'similar <id>' to search",
        "error_not_connected" => "Not connected to Weaviate database",
        "error_connect_failed" => "Failed to connect to Weaviate. Please check your configuration.",
        "error_text_search" => "Text search failed. Please try again.",
        "error_image_search" => "Image search failed. Please try again.",
        "error_similar_search" => "Similar search failed. Please try again.",
        "error_not_an_image" => "Please drop an image file",
        "error_unknown_command" => "Unknown command '{{command}}'. Type 'help' for a list.",
        "help" => "\
Commands:
  text <query>      search by text
  image <path>      search by image file
  similar <id>      find images similar to a stored image
  more              load 10 more results per model
  mode <name>       switch input mode: text, image, similar
  status            redraw the current view
  help              show this help
  quit              exit
A line without a command is read according to the current mode.",
        _ => "???",
    }
}

fn tr(key: &str) -> &'static str {
    match key {
        "status_connected" => "Durum: Bagli",
        "status_disconnected" => "Durum: Bagli degil",
        "status_theme_dark" => "koyu",
        "status_theme_light" => "acik",
        "mode_similar" => "Benzerini Bul",
        "mode_image" => "Gorsel Arama",
        "mode_text" => "Metin Arama",
        "hint_similar" => "Benzerlerini bulmak icin bir gorsel kimligi girin",
        "hint_image" => "Bir gorsel dosyasinin yolunu girin (JPG, PNG, GIF, WEBP)",
        "hint_text" => "Gorsel ara...",
        "results_loading" => "Gorseller araniyor...",
        "results_no_search" => "Sonuclari gormek icin bir arama yapin",
        "results_no_results" => "Sonuc bulunamadi",
        "results_index" => "Indeks: {{index}}",
        "results_distance" => "Uzaklik: {{distance}}",
        "results_load_more" => "10 sonuc daha yuklemek icin 'more' yazin (model basina {{count}})",
        "predefined_title" => "Ornek gorseller -- aramak icin 'similar <id>' kullanin",
        "error_not_connected" => "Weaviate veritabanina bagli degil",
        "error_connect_failed" => "Weaviate'e baglanilamadi. Lutfen yapilandirmanizi kontrol edin.",
        "error_text_search" => "Metin aramasi basarisiz. Lutfen tekrar deneyin.",
        "error_image_search" => "Gorsel aramasi basarisiz. Lutfen tekrar deneyin.",
        "error_similar_search" => "Benzer arama basarisiz. Lutfen tekrar deneyin.",
        "error_not_an_image" => "Lutfen bir gorsel dosyasi secin",
        "error_unknown_command" => "Bilinmeyen komut '{{command}}'. Liste icin 'help' yazin.",
        _ => "",
    }
}

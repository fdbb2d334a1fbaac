/// DeepL target code for a project locale, or `None` if DeepL can't target it.
///
/// See https://developers.deepl.com/docs/api-reference/languages
pub fn deepl_target_code(locale: &str) -> Option<&'static str> {
    let code = match locale.to_ascii_lowercase().as_str() {
        "en" | "en-us" => "EN-US",
        "en-gb" => "EN-GB",
        "de" => "DE",
        "ru" => "RU",
        "es" => "ES",
        "fr" => "FR",
        "it" => "IT",
        "pt" | "pt-br" => "PT-BR",
        "pt-pt" => "PT-PT",
        "nl" => "NL",
        "pl" => "PL",
        "uk" => "UK",
        "ja" => "JA",
        "zh" => "ZH",
        _ => return None,
    };
    Some(code)
}

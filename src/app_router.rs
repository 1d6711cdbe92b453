use deckdraw_core::{clamp_interval, AUTO_DRAW_DEFAULT_MS, DEFAULT_API_BASE};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct InitConfig {
    pub(crate) api_base: String,
    pub(crate) auto_start: bool,
    pub(crate) interval_ms: u32,
}

pub(crate) fn load_init_config() -> InitConfig {
    let search = web_sys::window()
        .and_then(|window| window.location().search().ok())
        .unwrap_or_default();
    parse_init_config(&search, default_api_base())
}

pub(crate) fn default_api_base() -> String {
    option_env!("DECKDRAW_API_BASE")
        .or(option_env!("TRUNK_PUBLIC_DECKDRAW_API_BASE"))
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .unwrap_or(DEFAULT_API_BASE)
        .to_string()
}

/// Reads `auto` and `speed` from a location search string.
pub(crate) fn parse_init_config(search: &str, api_base: String) -> InitConfig {
    let mut config = InitConfig {
        api_base,
        auto_start: false,
        interval_ms: AUTO_DRAW_DEFAULT_MS,
    };
    let query = search.trim_start_matches('?');
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            "auto" => {
                config.auto_start = matches!(
                    value.trim().to_ascii_lowercase().as_str(),
                    "1" | "true" | "on" | "yes"
                );
            }
            "speed" => {
                if let Ok(ms) = value.trim().parse::<u32>() {
                    config.interval_ms = clamp_interval(ms);
                }
            }
            _ => {}
        }
    }
    config
}

use std::sync::OnceLock;

use regex::Regex;

fn whitespace_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s\s+").expect("regex should be valid"))
}

/// Returns the part of `s` before the first run of two or more whitespace characters.
///
/// NetNutrition pads item names with icon text, e.g. `"Grilled Chicken  (V)"`.
pub fn first_segment(s: &str) -> &str {
    let s = s.trim();
    whitespace_run()
        .find(s)
        .map_or(s, |m| s[..m.start()].trim_end())
}

use std::sync::OnceLock;

use regex::Regex;

fn hours_regex() -> Option<&'static Regex> {
    static HOURS: OnceLock<Option<Regex>> = OnceLock::new();
    HOURS.get_or_init(|| Regex::new(r"(\d+)\s*hr").ok()).as_ref()
}

fn minutes_regex() -> Option<&'static Regex> {
    static MINUTES: OnceLock<Option<Regex>> = OnceLock::new();
    MINUTES.get_or_init(|| Regex::new(r"(\d+)\s*min").ok()).as_ref()
}

/// Parse a free-text duration such as `"1 hr 15 min"` into minutes.
///
/// Only the first `<n> hr` and first `<n> min` are read; a missing component
/// counts as zero, so unparseable text yields `0`.
pub fn parse_minutes(text: &str) -> u32 {
    let capture = |re: Option<&Regex>| -> u32 {
        re.and_then(|re| re.captures(text))
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .unwrap_or(0)
    };
    capture(hours_regex())
        .saturating_mul(60)
        .saturating_add(capture(minutes_regex()))
}

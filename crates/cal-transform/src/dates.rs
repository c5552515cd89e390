//! Course date normalization.

use std::sync::LazyLock;

use regex::Regex;

/// `DD/MM/YYYY` with fixed-width ASCII digits.
static COURSE_DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{2})/([0-9]{2})/([0-9]{4})$").expect("Invalid course date regex")
});

/// Convert a `DD/MM/YYYY` course date to `YYYYMMDD`.
///
/// Anything else yields an empty string. Only the digit grouping is
/// checked, so calendar-invalid dates such as `35/01/2024` pass through.
pub fn normalize_date(value: &str) -> String {
    let Some(caps) = COURSE_DATE_REGEX.captures(value) else {
        return String::new();
    };
    format!("{}{}{}", &caps[3], &caps[2], &caps[1])
}

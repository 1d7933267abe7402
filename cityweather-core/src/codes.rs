//! WMO weather interpretation code (WW) table: numeric code to label and
//! icon, plus the CSS-class-safe slug derived from a label.

/// Human label and icon for one weather code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Condition {
    pub label: &'static str,
    pub icon: &'static str,
}

/// Sentinel for codes outside the table.
pub const UNKNOWN: Condition = Condition { label: "Unknown", icon: "❓" };

/// Map a weather code to its label and icon.
///
/// Total: any code not in the table resolves to [`UNKNOWN`], never to an
/// absent or empty condition.
pub fn condition_for(code: u8) -> Condition {
    let (label, icon) = match code {
        0 => ("Clear", "☀️"),
        1 => ("Mainly Clear", "🌤️"),
        2 => ("Partly Cloudy", "⛅"),
        3 => ("Cloudy", "☁️"),
        45 | 48 => ("Fog", "🌫️"),
        51 | 53 | 55 => ("Drizzle", "🌦️"),
        56 | 57 => ("Freezing Drizzle", "🌧️"),
        61 | 63 | 65 => ("Rain", "🌧️"),
        66 | 67 => ("Freezing Rain", "🌧️"),
        71 | 73 | 75 => ("Snow", "🌨️"),
        77 => ("Snow Grains", "🌨️"),
        80 | 81 | 82 => ("Rain Showers", "🌦️"),
        85 | 86 => ("Snow Showers", "🌨️"),
        95 => ("Thunderstorm", "⛈️"),
        96 | 99 => ("Thunderstorm With Hail", "⛈️"),
        _ => return UNKNOWN,
    };

    Condition { label, icon }
}

/// Lowercase a condition label and collapse internal whitespace runs into a
/// single hyphen, yielding a CSS-class-safe slug.
pub fn slugify(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

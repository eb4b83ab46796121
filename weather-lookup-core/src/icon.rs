use serde::{Deserialize, Serialize};

/// Icon bucket for an upstream condition code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IconCategory {
    Thunderstorm,
    Drizzle,
    Rain,
    Snow,
    Atmosphere,
    Clear,
    Clouds,
}

#[derive(Debug, Clone, Copy)]
enum Bound {
    AtMost(i32),
    Exactly(i32),
}

impl Bound {
    const fn matches(self, code: i32) -> bool {
        match self {
            Bound::AtMost(max) => code <= max,
            Bound::Exactly(value) => code == value,
        }
    }
}

/// Ordered lookup table, first matching row wins.
const ICON_TABLE: &[(Bound, IconCategory)] = &[
    (Bound::AtMost(232), IconCategory::Thunderstorm),
    (Bound::AtMost(321), IconCategory::Drizzle),
    (Bound::AtMost(531), IconCategory::Rain),
    (Bound::AtMost(622), IconCategory::Snow),
    (Bound::AtMost(781), IconCategory::Atmosphere),
    (Bound::Exactly(800), IconCategory::Clear),
];

const FALLBACK: IconCategory = IconCategory::Clouds;

impl IconCategory {
    /// Resolve a condition code. Total: anything not covered by the table is `Clouds`.
    pub fn from_code(code: i32) -> Self {
        ICON_TABLE
            .iter()
            .find(|(bound, _)| bound.matches(code))
            .map(|(_, category)| *category)
            .unwrap_or(FALLBACK)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IconCategory::Thunderstorm => "Thunderstorm",
            IconCategory::Drizzle => "Drizzle",
            IconCategory::Rain => "Rain",
            IconCategory::Snow => "Snow",
            IconCategory::Atmosphere => "Atmosphere",
            IconCategory::Clear => "Clear",
            IconCategory::Clouds => "Clouds",
        }
    }

    /// Terminal glyph used by the text renderer.
    pub fn glyph(&self) -> &'static str {
        match self {
            IconCategory::Thunderstorm => "⛈",
            IconCategory::Drizzle => "🌦",
            IconCategory::Rain => "🌧",
            IconCategory::Snow => "❄",
            IconCategory::Atmosphere => "🌫",
            IconCategory::Clear => "☀",
            IconCategory::Clouds => "☁",
        }
    }
}

impl std::fmt::Display for IconCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_codes() {
        let cases = [
            (200, IconCategory::Thunderstorm),
            (232, IconCategory::Thunderstorm),
            (233, IconCategory::Drizzle),
            (321, IconCategory::Drizzle),
            (322, IconCategory::Rain),
            (531, IconCategory::Rain),
            (532, IconCategory::Snow),
            (622, IconCategory::Snow),
            (623, IconCategory::Atmosphere),
            (781, IconCategory::Atmosphere),
            (800, IconCategory::Clear),
            (801, IconCategory::Clouds),
        ];

        for (code, expected) in cases {
            assert_eq!(IconCategory::from_code(code), expected, "code {code}");
        }
    }

    #[test]
    fn gap_between_atmosphere_and_clear_is_clouds() {
        assert_eq!(IconCategory::from_code(782), IconCategory::Clouds);
        assert_eq!(IconCategory::from_code(799), IconCategory::Clouds);
    }

    #[test]
    fn extreme_codes_still_resolve() {
        assert_eq!(IconCategory::from_code(i32::MIN), IconCategory::Thunderstorm);
        assert_eq!(IconCategory::from_code(-1), IconCategory::Thunderstorm);
        assert_eq!(IconCategory::from_code(i32::MAX), IconCategory::Clouds);
    }

    #[test]
    fn resolution_is_stable() {
        for code in (0..1000).step_by(7) {
            assert_eq!(IconCategory::from_code(code), IconCategory::from_code(code));
        }
    }

    #[test]
    fn every_category_is_reachable() {
        let categories = [
            IconCategory::Thunderstorm,
            IconCategory::Drizzle,
            IconCategory::Rain,
            IconCategory::Snow,
            IconCategory::Atmosphere,
            IconCategory::Clear,
            IconCategory::Clouds,
        ];
        for category in categories {
            let reachable = (0..=1000).any(|code| IconCategory::from_code(code) == category);
            assert!(reachable, "{category} has no code");
        }
    }
}

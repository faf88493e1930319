//! Mapping of free-text weather descriptions onto a fixed set of icons.

use serde::{Deserialize, Serialize};

/// Display-icon bucket a weather description falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconCategory {
    ClearSky,
    FewClouds,
    BrokenClouds,
    ShowerRain,
    Rain,
    Thunderstorm,
    Snow,
    Mist,
    Drizzle,
}

impl IconCategory {
    /// Bucket used when nothing else matches.
    pub const FALLBACK: IconCategory = IconCategory::BrokenClouds;

    pub const fn all() -> &'static [IconCategory] {
        &[
            IconCategory::ClearSky,
            IconCategory::FewClouds,
            IconCategory::BrokenClouds,
            IconCategory::ShowerRain,
            IconCategory::Rain,
            IconCategory::Thunderstorm,
            IconCategory::Snow,
            IconCategory::Mist,
            IconCategory::Drizzle,
        ]
    }

    /// Image asset bundled with the app for this category.
    pub fn asset_name(&self) -> &'static str {
        match self {
            IconCategory::ClearSky => "clear-sky.png",
            IconCategory::FewClouds => "few-clouds.png",
            IconCategory::BrokenClouds => "broken-clouds.png",
            IconCategory::ShowerRain => "shower-rain.png",
            IconCategory::Rain => "rain.png",
            IconCategory::Thunderstorm => "thunderstorm.png",
            IconCategory::Snow => "snow.png",
            IconCategory::Mist => "mist.png",
            IconCategory::Drizzle => "drizzle.png",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IconCategory::ClearSky => "Clear sky",
            IconCategory::FewClouds => "Few clouds",
            IconCategory::BrokenClouds => "Broken clouds",
            IconCategory::ShowerRain => "Shower rain",
            IconCategory::Rain => "Rain",
            IconCategory::Thunderstorm => "Thunderstorm",
            IconCategory::Snow => "Snow",
            IconCategory::Mist => "Mist",
            IconCategory::Drizzle => "Drizzle",
        }
    }
}

impl std::fmt::Display for IconCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

enum Matcher {
    Contains(&'static str),
    OneOf(&'static [&'static str]),
}

impl Matcher {
    fn matches(&self, text: &str) -> bool {
        match self {
            Matcher::Contains(needle) => text.contains(needle),
            Matcher::OneOf(options) => options.iter().any(|option| *option == text),
        }
    }
}

// First match wins: the substring rules must stay ahead of the exact table.
const RULES: &[(Matcher, IconCategory)] = &[
    (Matcher::Contains("drizzle"), IconCategory::Drizzle),
    (Matcher::Contains("thunderstorm"), IconCategory::Thunderstorm),
    (Matcher::OneOf(&["clear sky"]), IconCategory::ClearSky),
    (Matcher::OneOf(&["few clouds"]), IconCategory::FewClouds),
    (
        Matcher::OneOf(&["scattered clouds", "overcast clouds", "broken clouds"]),
        IconCategory::BrokenClouds,
    ),
    (
        Matcher::OneOf(&[
            "extreme rain",
            "very heavy rain",
            "heavy intensity rain",
            "shower rain",
            "heavy rain",
        ]),
        IconCategory::ShowerRain,
    ),
    (
        Matcher::OneOf(&["light rain", "moderate rain", "light intensity shower rain", "rain"]),
        IconCategory::Rain,
    ),
    (Matcher::OneOf(&["thunderstorm"]), IconCategory::Thunderstorm),
    (
        Matcher::OneOf(&["light snow", "rain and snow", "heavy snow", "freezing rain", "snow"]),
        IconCategory::Snow,
    ),
    (Matcher::OneOf(&["smoke", "haze", "fog", "mist"]), IconCategory::Mist),
];

/// Pick the icon for a provider's condition description.
///
/// Total over its input: absent text is treated as empty and anything
/// unrecognised lands in [`IconCategory::FALLBACK`].
pub fn classify(condition: Option<&str>) -> IconCategory {
    let text = condition.unwrap_or_default().to_lowercase();

    RULES
        .iter()
        .find(|(matcher, _)| matcher.matches(&text))
        .map(|(_, category)| *category)
        .unwrap_or(IconCategory::FALLBACK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drizzle_wins_regardless_of_other_words() {
        assert_eq!(classify(Some("Light Drizzle")), IconCategory::Drizzle);
        assert_eq!(classify(Some("thunderstorm with drizzle")), IconCategory::Drizzle);
        assert_eq!(classify(Some("HEAVY INTENSITY DRIZZLE RAIN")), IconCategory::Drizzle);
    }

    #[test]
    fn thunderstorm_substring_matches() {
        assert_eq!(classify(Some("thunderstorm with heavy rain")), IconCategory::Thunderstorm);
        assert_eq!(classify(Some("Ragged Thunderstorm")), IconCategory::Thunderstorm);
        assert_eq!(classify(Some("thunderstorm")), IconCategory::Thunderstorm);
    }

    #[test]
    fn exact_table_is_case_insensitive() {
        assert_eq!(classify(Some("clear sky")), IconCategory::ClearSky);
        assert_eq!(classify(Some("CLEAR SKY")), IconCategory::ClearSky);
        assert_eq!(classify(Some("Few Clouds")), IconCategory::FewClouds);
    }

    #[test]
    fn exact_table_groupings() {
        let cases = [
            ("overcast clouds", IconCategory::BrokenClouds),
            ("scattered clouds", IconCategory::BrokenClouds),
            ("very heavy rain", IconCategory::ShowerRain),
            ("heavy rain", IconCategory::ShowerRain),
            ("light intensity shower rain", IconCategory::Rain),
            ("moderate rain", IconCategory::Rain),
            ("freezing rain", IconCategory::Snow),
            ("rain and snow", IconCategory::Snow),
            ("haze", IconCategory::Mist),
            ("smoke", IconCategory::Mist),
        ];

        for (text, expected) in cases {
            assert_eq!(classify(Some(text)), expected, "classifying {text:?}");
        }
    }

    #[test]
    fn exact_entries_do_not_match_as_substrings() {
        assert_eq!(classify(Some("light rain showers")), IconCategory::BrokenClouds);
        assert_eq!(classify(Some(" clear sky")), IconCategory::BrokenClouds);
    }

    #[test]
    fn unknown_and_missing_text_fall_back() {
        assert_eq!(classify(Some("tornado")), IconCategory::BrokenClouds);
        assert_eq!(classify(Some("")), IconCategory::BrokenClouds);
        assert_eq!(classify(None), IconCategory::BrokenClouds);
    }

    #[test]
    fn every_category_has_an_asset() {
        for category in IconCategory::all() {
            assert!(category.asset_name().ends_with(".png"));
        }
    }
}

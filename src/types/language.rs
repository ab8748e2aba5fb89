//! Display language for day labels.

use chrono::{Locale, NaiveDate, NaiveTime, TimeZone, Utc};
use std::fmt;
use std::str::FromStr;

/// Language used for the relative day labels ("Today", "Tomorrow") and for
/// the localized weekday and month abbreviations of later days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    English,
    Swedish,
}

impl Language {
    pub fn locale(&self) -> Locale {
        match self {
            Language::English => Locale::en_US,
            Language::Swedish => Locale::sv_SE,
        }
    }

    pub fn today(&self) -> &'static str {
        match self {
            Language::English => "Today",
            Language::Swedish => "Idag",
        }
    }

    pub fn tomorrow(&self) -> &'static str {
        match self {
            Language::English => "Tomorrow",
            Language::Swedish => "Imorgon",
        }
    }

    /// Formats `date` as `"{weekday-abbrev}, {day} {month-abbrev}"`, e.g. `"Sat, 17 Oct"`.
    pub fn short_date(&self, date: NaiveDate) -> String {
        // format_localized is only offered on DateTime, so anchor the date at midnight.
        let anchored = Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN));
        anchored
            .format_localized("%a, %-d %b", self.locale())
            .to_string()
    }

    fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Swedish => "sv",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Error returned when parsing an unsupported language code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported language '{0}', expected 'en' or 'sv'")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "sv" | "swedish" | "svenska" => Ok(Language::Swedish),
            other => Err(UnknownLanguage(other.to_string())),
        }
    }
}

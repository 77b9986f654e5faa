//! Language settings for the rendered planner.
//!
//! Month names and weekday names come from chrono's locale tables; the few
//! words the layout prints itself live here.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::PlannerError;

/// Locale used for every piece of text the planner generates.
///
/// Deserializes through `FromStr`, so config files may spell it `de-CH` or
/// `de_CH.UTF-8` as well.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Locale {
    #[default]
    #[serde(rename = "de_CH")]
    DeCh,
    #[serde(rename = "de_DE")]
    DeDe,
    #[serde(rename = "en_US")]
    EnUs,
    #[serde(rename = "en_GB")]
    EnGb,
    #[serde(rename = "fr_CH")]
    FrCh,
    #[serde(rename = "it_CH")]
    ItCh,
}

impl Locale {
    pub const ALL: [Locale; 6] = [
        Locale::DeCh,
        Locale::DeDe,
        Locale::EnUs,
        Locale::EnGb,
        Locale::FrCh,
        Locale::ItCh,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Locale::DeCh => "de_CH",
            Locale::DeDe => "de_DE",
            Locale::EnUs => "en_US",
            Locale::EnGb => "en_GB",
            Locale::FrCh => "fr_CH",
            Locale::ItCh => "it_CH",
        }
    }

    fn chrono(self) -> chrono::Locale {
        match self {
            Locale::DeCh => chrono::Locale::de_CH,
            Locale::DeDe => chrono::Locale::de_DE,
            Locale::EnUs => chrono::Locale::en_US,
            Locale::EnGb => chrono::Locale::en_GB,
            Locale::FrCh => chrono::Locale::fr_CH,
            Locale::ItCh => chrono::Locale::it_CH,
        }
    }

    /// Word that replaces `&` in event titles.
    pub fn and_word(self) -> &'static str {
        match self {
            Locale::DeCh | Locale::DeDe => "und",
            Locale::EnUs | Locale::EnGb => "and",
            Locale::FrCh => "et",
            Locale::ItCh => "e",
        }
    }

    /// Short label printed in front of the week number.
    pub fn week_label(self) -> &'static str {
        match self {
            Locale::DeCh | Locale::DeDe => "KW",
            Locale::EnUs | Locale::EnGb => "Week",
            Locale::FrCh => "Sem.",
            Locale::ItCh => "Sett.",
        }
    }

    /// Full month name of the month `date` falls in, e.g. "März".
    pub fn month_name(self, date: NaiveDate) -> String {
        self.format(date, "%B")
    }

    /// Full weekday name of `date`, e.g. "Montag".
    pub fn weekday_name(self, date: NaiveDate) -> String {
        self.format(date, "%A")
    }

    fn format(self, date: NaiveDate, fmt: &str) -> String {
        date.and_time(NaiveTime::default())
            .and_utc()
            .format_localized(fmt, self.chrono())
            .to_string()
    }
}

impl FromStr for Locale {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept "de_CH", "de-CH" and POSIX forms like "de_CH.UTF-8"
        let normalized = s.split('.').next().unwrap_or(s).replace('-', "_");
        Locale::ALL
            .into_iter()
            .find(|l| l.code().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| PlannerError::UnknownLocale(s.to_string()))
    }
}

impl TryFrom<String> for Locale {
    type Error = PlannerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn german_swiss_names() {
        let locale = Locale::DeCh;
        assert_eq!(locale.month_name(date(2024, 3, 4)), "März");
        assert_eq!(locale.weekday_name(date(2024, 3, 4)), "Montag");
        assert_eq!(locale.weekday_name(date(2024, 3, 10)), "Sonntag");
        assert_eq!(locale.and_word(), "und");
        assert_eq!(locale.week_label(), "KW");
    }

    #[test]
    fn english_names() {
        assert_eq!(Locale::EnUs.month_name(date(2024, 1, 15)), "January");
        assert_eq!(Locale::EnUs.weekday_name(date(2024, 1, 15)), "Monday");
        assert_eq!(Locale::EnGb.and_word(), "and");
    }

    #[test]
    fn parse_locale_codes() {
        assert_eq!("de_CH".parse::<Locale>().unwrap(), Locale::DeCh);
        assert_eq!("de-CH".parse::<Locale>().unwrap(), Locale::DeCh);
        assert_eq!("fr_CH.UTF-8".parse::<Locale>().unwrap(), Locale::FrCh);
        assert!(matches!(
            "xx_YY".parse::<Locale>(),
            Err(PlannerError::UnknownLocale(s)) if s == "xx_YY"
        ));
    }

    #[test]
    fn default_is_german_swiss() {
        assert_eq!(Locale::default(), Locale::DeCh);
        assert_eq!(Locale::default().to_string(), "de_CH");
    }
}

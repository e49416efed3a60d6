use std::sync::OnceLock;

use regex::Regex;

/// Shapes a trimmed text value can be required to match.
///
/// Digit classes are spelled `[0-9]` because `\d` in `regex` is Unicode-aware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextPattern {
    /// Letters and spaces, 2 to 30 characters.
    PersonName,
    /// `local@domain.tld`, deliberately loose.
    Email,
    /// Ten digits, leading 6-9.
    IndianMobile,
    /// Six digits, no leading zero.
    Pincode,
    /// Whole number with at most two decimal places.
    Amount,
}

impl TextPattern {
    pub const fn source(self) -> &'static str {
        match self {
            TextPattern::PersonName => r"^[a-zA-Z\s]{2,30}$",
            TextPattern::Email => r"^[^\s@]+@[^\s@]+\.[^\s@]+$",
            TextPattern::IndianMobile => r"^[6-9][0-9]{9}$",
            TextPattern::Pincode => r"^[1-9][0-9]{5}$",
            TextPattern::Amount => r"^[0-9]+(\.[0-9]{1,2})?$",
        }
    }

    pub fn regex(self) -> &'static Regex {
        static PERSON_NAME: OnceLock<Regex> = OnceLock::new();
        static EMAIL: OnceLock<Regex> = OnceLock::new();
        static INDIAN_MOBILE: OnceLock<Regex> = OnceLock::new();
        static PINCODE: OnceLock<Regex> = OnceLock::new();
        static AMOUNT: OnceLock<Regex> = OnceLock::new();

        let cell = match self {
            TextPattern::PersonName => &PERSON_NAME,
            TextPattern::Email => &EMAIL,
            TextPattern::IndianMobile => &INDIAN_MOBILE,
            TextPattern::Pincode => &PINCODE,
            TextPattern::Amount => &AMOUNT,
        };
        cell.get_or_init(|| Regex::new(self.source()).expect("built-in field pattern compiles"))
    }

    pub fn is_match(self, value: &str) -> bool {
        self.regex().is_match(value)
    }
}

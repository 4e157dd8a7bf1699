//! Day patterns.
//!
//! A day pattern is the weekday string attached to an entry (`"MWF"`,
//! `"TTh"`). Conflict checks compare patterns by their **literal** text only:
//! two entries are on the "same days" iff the strings are equal, and the
//! day-agnostic checks ignore the pattern entirely. The parsed weekday set
//! is kept alongside for shape validation and opt-in daily scoping; it does
//! not change which patterns count as equal.
//!
//! # Tokens
//! `M`, `T`/`Tu`, `W`, `Th`/`R`, `F`, `Sa`, `Su`, and the three-letter
//! names `Mon` through `Sun`. Case-insensitive, longest token first, so
//! `TTh`, `TuTh` and `Tue, Thu` name the same weekdays. Whitespace and
//! commas are ignored.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors produced while parsing a day pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DayPatternError {
    /// A character sequence that is not a weekday token.
    #[error("unknown day token at position {position} in {literal:?}")]
    UnknownToken { literal: String, position: usize },
}

/// A set of weekdays stored as a 7-bit mask (bit 0 = Monday).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct WeekdaySet {
    bits: u8,
}

impl WeekdaySet {
    /// The empty set.
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    #[inline]
    fn bit(day: Weekday) -> u8 {
        1 << day.num_days_from_monday()
    }

    /// Adds a weekday.
    pub fn insert(&mut self, day: Weekday) {
        self.bits |= Self::bit(day);
    }

    /// Whether the set contains a weekday.
    #[inline]
    pub fn contains(&self, day: Weekday) -> bool {
        self.bits & Self::bit(day) != 0
    }

    /// Whether the two sets share at least one weekday.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        self.bits & other.bits != 0
    }

    /// Number of weekdays in the set.
    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Iterates weekdays Monday-first.
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        let mut day = Weekday::Mon;
        (0..7).filter_map(move |_| {
            let current = day;
            day = day.succ();
            self.contains(current).then_some(current)
        })
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = Self::empty();
        for day in iter {
            set.insert(day);
        }
        set
    }
}

/// Weekday tokens, longest first so `Thu` wins over `Th` and `T`.
const TOKENS: [(&str, Weekday); 16] = [
    ("mon", Weekday::Mon),
    ("tue", Weekday::Tue),
    ("wed", Weekday::Wed),
    ("thu", Weekday::Thu),
    ("fri", Weekday::Fri),
    ("sat", Weekday::Sat),
    ("sun", Weekday::Sun),
    ("tu", Weekday::Tue),
    ("th", Weekday::Thu),
    ("sa", Weekday::Sat),
    ("su", Weekday::Sun),
    ("m", Weekday::Mon),
    ("t", Weekday::Tue),
    ("w", Weekday::Wed),
    ("r", Weekday::Thu),
    ("f", Weekday::Fri),
];

/// The weekday token at the start of `rest` (lowercased) and its width.
fn match_token(rest: &[char]) -> Option<(Weekday, usize)> {
    TOKENS.iter().find_map(|(token, day)| {
        let width = token.len();
        let matches = rest.len() >= width && token.chars().zip(rest).all(|(t, c)| t == *c);
        matches.then_some((*day, width))
    })
}

/// The weekday pattern of a schedule entry.
///
/// Equality is literal-string equality. `"MWF"` and `"M W F"` parse to the
/// same weekday set but are different patterns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DayPattern {
    literal: String,
    weekdays: WeekdaySet,
}

impl DayPattern {
    /// Parses a day pattern, keeping the literal text as given.
    ///
    /// An empty (or all-whitespace) literal parses to an empty pattern;
    /// rejecting it is left to shape validation.
    pub fn parse(literal: &str) -> Result<Self, DayPatternError> {
        let chars: Vec<char> = literal.chars().map(|c| c.to_ascii_lowercase()).collect();
        let mut weekdays = WeekdaySet::empty();
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            if c.is_whitespace() || c == ',' {
                i += 1;
                continue;
            }

            let (day, width) =
                match_token(&chars[i..]).ok_or_else(|| DayPatternError::UnknownToken {
                    literal: literal.to_string(),
                    position: i,
                })?;
            weekdays.insert(day);
            i += width;
        }

        Ok(Self {
            literal: literal.to_string(),
            weekdays,
        })
    }

    /// The literal pattern text.
    pub fn as_str(&self) -> &str {
        &self.literal
    }

    /// Parsed weekdays.
    pub fn weekdays(&self) -> WeekdaySet {
        self.weekdays
    }

    /// Whether the pattern names no weekday.
    pub fn is_empty(&self) -> bool {
        self.weekdays.is_empty()
    }

    /// Day-exact match: identical literal text.
    #[inline]
    pub fn same_literal(&self, other: &Self) -> bool {
        self.literal == other.literal
    }

    /// Whether the two patterns share at least one parsed weekday.
    #[inline]
    pub fn shares_weekday(&self, other: &Self) -> bool {
        self.weekdays.intersects(&other.weekdays)
    }
}

impl TryFrom<String> for DayPattern {
    type Error = DayPatternError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DayPattern> for String {
    fn from(pattern: DayPattern) -> Self {
        pattern.literal
    }
}

impl fmt::Display for DayPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literal)
    }
}

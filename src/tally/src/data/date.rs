//! See [`DateId`]

use crate::error::ValidationError;
use chrono::prelude::*;
use serde::{Deserialize, Serialize, de::Visitor};

const DATE_LEN: usize = "YYYY-MM-DD".len();

/// The only accepted textual form of a [`DateId`].
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A calendar day, used as the key for every selection and score.
///
/// Written as `YYYY-MM-DD` with zero-padded month and day. Parsing is strict:
/// a string is accepted only if it is exactly what [`Display`](std::fmt::Display)
/// would print for that day, so each day has one and only one spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateId(NaiveDate);

impl DateId {
    /// Wrap a [`NaiveDate`].
    #[inline]
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// [`None`] if the year, month (1-based) and day do not form a real date.
    #[inline]
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// The wrapped [`NaiveDate`].
    #[inline]
    pub const fn date(self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for DateId {
    #[inline]
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl std::ops::Deref for DateId {
    type Target = NaiveDate;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for DateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl std::str::FromStr for DateId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ValidationError::MalformedDate {
            input: s.to_string(),
        };
        // four-digit years only; chrono would also take `+10000` or `-0001`
        if s.len() != DATE_LEN || !s.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(malformed());
        }
        let id = NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map(Self)
            .map_err(|_| malformed())?;
        // chrono tolerates unpadded fields; the key must not
        if id.to_string() == s {
            Ok(id)
        } else {
            Err(malformed())
        }
    }
}

impl Serialize for DateId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct DateIdVisitor;

        impl Visitor<'_> for DateIdVisitor {
            type Value = DateId;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a date formatted as YYYY-MM-DD")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(DateIdVisitor)
    }
}

//! [`WeekStart`] — the natural key of a voting period.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::Error;

/// The calendar date a voting week starts on.
///
/// Only the exact `YYYY-MM-DD` shape is accepted, and it must name a real
/// calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeekStart(NaiveDate);

impl WeekStart {
  pub const FORMAT: &'static str = "%Y-%m-%d";

  pub fn parse(raw: &str) -> Result<Self, Error> {
    let shaped = raw.len() == 10
      && raw.bytes().enumerate().all(|(i, b)| match i {
        4 | 7 => b == b'-',
        _ => b.is_ascii_digit(),
      });
    if !shaped {
      return Err(Error::InvalidWeekStart(raw.to_owned()));
    }
    NaiveDate::parse_from_str(raw, Self::FORMAT)
      .map(Self)
      .map_err(|_| Error::InvalidWeekStart(raw.to_owned()))
  }

  pub fn date(self) -> NaiveDate { self.0 }
}

impl From<NaiveDate> for WeekStart {
  fn from(date: NaiveDate) -> Self { Self(date) }
}

impl fmt::Display for WeekStart {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0.format(Self::FORMAT))
  }
}

impl FromStr for WeekStart {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> { Self::parse(s) }
}

impl Serialize for WeekStart {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(self)
  }
}

impl<'de> Deserialize<'de> for WeekStart {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Self::parse(&raw).map_err(de::Error::custom)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_and_renders_iso_date() {
    let week = WeekStart::parse("2025-01-06").unwrap();
    assert_eq!(week.date(), NaiveDate::from_ymd_opt(2025, 1, 6).unwrap());
    assert_eq!(week.to_string(), "2025-01-06");
  }

  #[test]
  fn rejects_malformed_shapes() {
    for raw in [
      "",
      "bad-date",
      "2025-1-06",
      "2025-01-6",
      "25-01-06",
      "2025/01/06",
      " 2025-01-06",
      "2025-01-06T00:00:00",
      "+2025-01-06",
    ] {
      assert!(
        matches!(WeekStart::parse(raw), Err(Error::InvalidWeekStart(_))),
        "accepted {raw:?}"
      );
    }
  }

  #[test]
  fn rejects_impossible_dates() {
    assert!(WeekStart::parse("2025-02-30").is_err());
    assert!(WeekStart::parse("2025-13-01").is_err());
    assert!(WeekStart::parse("2024-02-29").is_ok());
  }

  #[test]
  fn serde_uses_plain_string() {
    let week = WeekStart::parse("2099-01-01").unwrap();
    let json = serde_json::to_string(&week).unwrap();
    assert_eq!(json, "\"2099-01-01\"");
    let back: WeekStart = serde_json::from_str(&json).unwrap();
    assert_eq!(back, week);
    assert!(serde_json::from_str::<WeekStart>("\"01/01/2099\"").is_err());
  }
}

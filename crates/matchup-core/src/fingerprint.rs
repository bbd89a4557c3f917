//! Pseudo-anonymous voter fingerprints.
//!
//! A fingerprint is a SHA-256 digest over the voting week and whatever
//! anti-spam signals the transport supplied. It is a spam deterrent, not an
//! identity: users behind a shared address and browser collide, and that is
//! accepted.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::week::WeekStart;

/// Upper bound on the hashed input, in characters.
pub const MAX_INPUT_CHARS: usize = 500;

/// Request metadata used as anti-spam signals. Both are opaque.
#[derive(Debug, Clone, Default)]
pub struct VoterSignals {
  pub address:    Option<String>,
  pub user_agent: Option<String>,
}

/// A 64-character lowercase hex token identifying a voter within one week.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
  /// Derive the fingerprint for `week`. Never fails; absent signals hash as
  /// empty strings.
  pub fn derive(week: WeekStart, signals: &VoterSignals) -> Self {
    let combined = format!(
      "{week}|{}|{}",
      signals.address.as_deref().unwrap_or_default(),
      signals.user_agent.as_deref().unwrap_or_default(),
    );
    let bounded: String = combined.chars().take(MAX_INPUT_CHARS).collect();
    Self(hex::encode(Sha256::digest(bounded.as_bytes())))
  }

  pub fn as_str(&self) -> &str { &self.0 }

  /// Leading characters only, for log lines.
  pub fn short(&self) -> &str { self.0.get(..8).unwrap_or(&self.0) }
}

impl fmt::Display for Fingerprint {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn week(raw: &str) -> WeekStart { WeekStart::parse(raw).unwrap() }

  fn signals(address: &str, user_agent: &str) -> VoterSignals {
    VoterSignals {
      address:    Some(address.into()),
      user_agent: Some(user_agent.into()),
    }
  }

  #[test]
  fn deterministic_lowercase_hex() {
    let s = signals("203.0.113.7", "Mozilla/5.0");
    let a = Fingerprint::derive(week("2025-01-06"), &s);
    let b = Fingerprint::derive(week("2025-01-06"), &s);
    assert_eq!(a, b);
    assert_eq!(a.as_str().len(), 64);
    assert!(a.as_str().chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
  }

  #[test]
  fn scoped_per_week() {
    let s = signals("203.0.113.7", "Mozilla/5.0");
    assert_ne!(
      Fingerprint::derive(week("2025-01-06"), &s),
      Fingerprint::derive(week("2025-01-13"), &s),
    );
  }

  #[test]
  fn distinct_signals_differ() {
    let w = week("2025-01-06");
    assert_ne!(
      Fingerprint::derive(w, &signals("203.0.113.7", "Mozilla/5.0")),
      Fingerprint::derive(w, &signals("203.0.113.8", "Mozilla/5.0")),
    );
  }

  #[test]
  fn absent_signals_still_hash() {
    let w = week("2025-01-06");
    let none = Fingerprint::derive(w, &VoterSignals::default());
    let empty = Fingerprint::derive(w, &signals("", ""));
    assert_eq!(none, empty);
    assert_eq!(none.as_str().len(), 64);
  }

  #[test]
  fn input_is_bounded() {
    let w = week("2025-01-06");
    let long_a = "x".repeat(MAX_INPUT_CHARS * 2);
    let long_b = format!("{}{}", "x".repeat(MAX_INPUT_CHARS * 2), "tail");
    assert_eq!(
      Fingerprint::derive(w, &signals(&long_a, "ua-a")),
      Fingerprint::derive(w, &signals(&long_b, "ua-b")),
    );
  }

  #[test]
  fn multibyte_input_is_truncated_on_char_boundaries() {
    let w = week("2025-01-06");
    let ua = "é".repeat(MAX_INPUT_CHARS);
    let fp = Fingerprint::derive(w, &signals("198.51.100.1", &ua));
    assert_eq!(fp.short().len(), 8);
  }
}

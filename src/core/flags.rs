//! Country codes and flag-image bookkeeping
//!
//! The provider itself is external (an image CDN). This module only builds
//! URLs and tracks which flags were requested, loaded or gave up on, so the
//! front-end issues exactly one request per code per session.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_FLAG_BASE_URL: &str = "https://flagcdn.com/w40";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CountryCodeError {
    #[error("country code must be two ASCII letters, got {0:?}")]
    Invalid(String),
}

/// ISO 3166-1 alpha-2 code, stored uppercase
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CountryCode([u8; 2]);

impl CountryCode {
    /// From two ASCII letters known to be valid
    pub(crate) const fn from_ascii(bytes: [u8; 2]) -> Self {
        Self([bytes[0].to_ascii_uppercase(), bytes[1].to_ascii_uppercase()])
    }

    pub fn as_str(&self) -> &str {
        // always two ASCII letters
        std::str::from_utf8(&self.0).unwrap_or("??")
    }

    pub fn lower(&self) -> String {
        self.as_str().to_ascii_lowercase()
    }
}

impl FromStr for CountryCode {
    type Err = CountryCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.as_bytes() {
            [a, b] if a.is_ascii_alphabetic() && b.is_ascii_alphabetic() => {
                Ok(Self([a.to_ascii_uppercase(), b.to_ascii_uppercase()]))
            }
            _ => Err(CountryCodeError::Invalid(s.to_string())),
        }
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for CountryCode {
    type Error = CountryCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CountryCode> for String {
    fn from(value: CountryCode) -> Self {
        value.to_string()
    }
}

/// `<base>/<code-lowercase>.png`; a trailing slash on `base` is tolerated.
pub fn flag_url(base: &str, code: CountryCode) -> String {
    format!("{}/{}.png", base.trim_end_matches('/'), code.lower())
}

/// Load state of a single flag
#[derive(Clone, Debug, PartialEq)]
pub enum FlagStatus<T> {
    Pending,
    Ready(T),
    /// Terminal for the session
    Failed,
}

/// Per-code flag state, generic over the loaded image type
#[derive(Debug)]
pub struct FlagCache<T> {
    entries: HashMap<CountryCode, FlagStatus<T>>,
}

impl<T> Default for FlagCache<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<T> FlagCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `code` as pending. Returns true only the first time, i.e. when
    /// the caller should actually start a load.
    pub fn request(&mut self, code: CountryCode) -> bool {
        if self.entries.contains_key(&code) {
            return false;
        }
        self.entries.insert(code, FlagStatus::Pending);
        true
    }

    /// Store a loaded image. Ignored once the code has failed.
    pub fn resolve(&mut self, code: CountryCode, image: T) {
        match self.entries.get(&code) {
            Some(FlagStatus::Failed) => {}
            _ => {
                self.entries.insert(code, FlagStatus::Ready(image));
            }
        }
    }

    pub fn fail(&mut self, code: CountryCode) {
        self.entries.insert(code, FlagStatus::Failed);
    }

    pub fn status(&self, code: CountryCode) -> Option<&FlagStatus<T>> {
        self.entries.get(&code)
    }

    /// Loaded image, if any
    pub fn get(&self, code: CountryCode) -> Option<&T> {
        match self.entries.get(&code) {
            Some(FlagStatus::Ready(image)) => Some(image),
            _ => None,
        }
    }

    pub fn pending(&self) -> usize {
        self.entries
            .values()
            .filter(|s| matches!(s, FlagStatus::Pending))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> CountryCode {
        s.parse().unwrap()
    }

    #[test]
    fn codes_normalize_to_uppercase() {
        assert_eq!(code("fr").as_str(), "FR");
        assert_eq!(code("Kr").to_string(), "KR");
        assert_eq!(code("NL").lower(), "nl");
    }

    #[test]
    fn bad_codes_are_rejected() {
        for bad in ["", "F", "FRA", "F1", "é1", "  "] {
            assert!(bad.parse::<CountryCode>().is_err(), "{bad:?}");
        }
    }

    #[test]
    fn code_serde_is_a_plain_string() {
        let c: CountryCode = serde_json::from_str("\"dz\"").unwrap();
        assert_eq!(c, code("DZ"));
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"DZ\"");
        assert!(serde_json::from_str::<CountryCode>("\"usa\"").is_err());
    }

    #[test]
    fn flag_urls_are_lowercase() {
        assert_eq!(
            flag_url(DEFAULT_FLAG_BASE_URL, code("US")),
            "https://flagcdn.com/w40/us.png"
        );
        assert_eq!(
            flag_url("https://cdn.example/flags/", code("gb")),
            "https://cdn.example/flags/gb.png"
        );
    }

    #[test]
    fn each_code_is_requested_once() {
        let mut cache: FlagCache<u32> = FlagCache::new();
        assert!(cache.request(code("FR")));
        assert!(!cache.request(code("FR")));
        assert_eq!(cache.status(code("FR")), Some(&FlagStatus::Pending));
        assert_eq!(cache.pending(), 1);

        cache.resolve(code("FR"), 7);
        assert_eq!(cache.get(code("FR")), Some(&7));
        assert!(!cache.request(code("FR")));
        assert_eq!(cache.pending(), 0);
    }

    #[test]
    fn failure_is_terminal() {
        let mut cache: FlagCache<u32> = FlagCache::new();
        cache.request(code("KR"));
        cache.fail(code("KR"));
        assert!(!cache.request(code("KR")));
        cache.resolve(code("KR"), 1);
        assert_eq!(cache.status(code("KR")), Some(&FlagStatus::Failed));
        assert_eq!(cache.get(code("KR")), None);
    }
}

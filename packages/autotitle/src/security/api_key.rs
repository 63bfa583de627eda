//! Oracle API key.
//!
//! The key is persisted in plain text in the settings file and only read
//! back when a request is sent. Logs, `Debug` output and status messages
//! see a masked hint instead.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Characters of the key revealed by [`ApiKey::hint`].
const HINT_CHARS: usize = 4;

/// Keys shorter than this are never partially revealed.
const MIN_HINTED_LEN: usize = 12;

/// An API key for the title oracle. Blank means "not configured".
pub struct ApiKey(SecretString);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretString::from(value.into()))
    }

    /// The raw key, for building the request.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    /// True when no key has been entered (empty or whitespace).
    pub fn is_blank(&self) -> bool {
        self.expose().trim().is_empty()
    }

    /// Masked form for settings screens, e.g. `…9f3a`.
    pub fn hint(&self) -> String {
        let key = self.expose().trim();
        if key.is_empty() {
            return "(not set)".to_string();
        }
        let len = key.chars().count();
        if len < MIN_HINTED_LEN {
            return "…".to_string();
        }
        let tail: String = key.chars().skip(len - HINT_CHARS).collect();
        format!("…{}", tail)
    }
}

impl Default for ApiKey {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl Clone for ApiKey {
    fn clone(&self) -> Self {
        Self::new(self.expose())
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey({})", self.hint())
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hint())
    }
}

impl From<String> for ApiKey {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for ApiKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

// The settings file is where the key lives, so it round-trips in full.
impl Serialize for ApiKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.expose())
    }
}

impl<'de> Deserialize<'de> for ApiKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "sk-proj-4be1c0ffee9f3a";

    #[test]
    fn test_debug_and_display_are_masked() {
        let key = ApiKey::new(KEY);
        assert_eq!(format!("{:?}", key), "ApiKey(…9f3a)");
        assert_eq!(key.to_string(), "…9f3a");
        assert!(!format!("{:?}", key).contains("sk-proj"));
    }

    #[test]
    fn test_short_keys_fully_masked() {
        assert_eq!(ApiKey::new("sk-1").hint(), "…");
        assert_eq!(ApiKey::default().hint(), "(not set)");
    }

    #[test]
    fn test_blank_detection() {
        assert!(ApiKey::default().is_blank());
        assert!(ApiKey::new("   ").is_blank());
        assert!(!ApiKey::new("sk-1").is_blank());
    }

    #[test]
    fn test_clone_keeps_full_key() {
        let key = ApiKey::from(KEY.to_string());
        assert_eq!(key.clone().expose(), KEY);
    }

    #[test]
    fn test_settings_file_round_trip() {
        let key: ApiKey = serde_json::from_str(&format!("\"{}\"", KEY)).unwrap();
        assert_eq!(key.expose(), KEY);
        assert_eq!(serde_json::to_string(&key).unwrap(), format!("\"{}\"", KEY));
    }
}

//! Secure credential handling using the secrecy crate
//!
//! Backend credentials (database passwords, access keys) are held in
//! [`SecretString`] values. The `secrecy` crate zeros the memory when a
//! secret is dropped, redacts Debug output, and forces explicit
//! `expose_secret()` calls at the single point where a credential is handed
//! to a driver.

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// Newtype wrapper for String that implements the required traits for Secret
#[derive(Clone, Debug, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl From<&str> for SecretValue {
    fn from(s: &str) -> Self {
        SecretValue(s.to_string())
    }
}

impl SecretValue {
    /// Check if the secret value is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for SecretValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for SecretValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretValue)
    }
}

/// Type alias for a secret string
///
/// This wraps a `SecretValue` in a `Secret` container that:
/// - Zeros the memory when dropped
/// - Prevents accidental logging via Debug
/// - Requires explicit `expose_secret()` to access
pub type SecretString = Secret<SecretValue>;

/// Construct a [`SecretString`] from anything string-like.
pub fn secret_string(value: impl Into<String>) -> SecretString {
    Secret::new(SecretValue::from(value.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_debug_output_is_redacted() {
        let secret = secret_string("hunter2");
        let debug = format!("{:?}", secret);
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_expose_secret_returns_value() {
        let secret = secret_string("hunter2");
        assert_eq!(secret.expose_secret().as_ref(), "hunter2");
    }

    #[test]
    fn test_deserializes_from_plain_string() {
        let secret: SecretString = serde_json::from_str("\"p@ss\"").unwrap();
        assert_eq!(secret.expose_secret().as_ref(), "p@ss");
    }

    #[test]
    fn test_is_empty() {
        assert!(secret_string("").expose_secret().is_empty());
        assert!(!secret_string("x").expose_secret().is_empty());
    }
}

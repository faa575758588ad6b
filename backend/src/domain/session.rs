//! Opaque session tokens and their stored fingerprints.
//!
//! A token is minted once when a user registers and handed to the client in
//! the session cookie. The user store only ever sees the SHA-256 fingerprint,
//! so a leaked table cannot be replayed as cookies.

use std::fmt;

use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// Number of random bytes in a freshly minted token.
const TOKEN_BYTES: usize = 32;
/// Longest raw token accepted from a client.
pub const SESSION_TOKEN_MAX: usize = 256;

/// Validation errors raised when reading a token presented by a client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionTokenError {
    /// Token was empty.
    #[error("session token must not be empty")]
    Empty,
    /// Token exceeded [`SESSION_TOKEN_MAX`] characters.
    #[error("session token must be at most {max} characters")]
    TooLong { max: usize },
    /// Token contained whitespace or control characters.
    #[error("session token contains invalid characters")]
    InvalidCharacters,
}

/// Opaque bearer secret identifying a user's session.
///
/// The value is zeroed on drop and never printed by `Debug`.
///
/// # Examples
/// ```
/// use daily_diet::domain::SessionToken;
///
/// let token = SessionToken::generate();
/// let again = SessionToken::parse(token.expose()).expect("minted tokens parse");
/// assert_eq!(token.fingerprint(), again.fingerprint());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(Zeroizing<String>);

impl SessionToken {
    /// Mint a new token from the operating system RNG.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = Zeroizing::new([0_u8; TOKEN_BYTES]);
        OsRng.fill_bytes(bytes.as_mut_slice());
        Self(Zeroizing::new(hex::encode(bytes.as_slice())))
    }

    /// Validate a token read back from a client cookie.
    pub fn parse(raw: impl Into<String>) -> Result<Self, SessionTokenError> {
        let raw = Zeroizing::new(raw.into());
        if raw.is_empty() {
            return Err(SessionTokenError::Empty);
        }
        if raw.chars().count() > SESSION_TOKEN_MAX {
            return Err(SessionTokenError::TooLong {
                max: SESSION_TOKEN_MAX,
            });
        }
        if raw.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(SessionTokenError::InvalidCharacters);
        }
        Ok(Self(raw))
    }

    /// Raw token value, for writing into the client cookie only.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// Digest persisted on the user record and used for lookups.
    #[must_use]
    pub fn fingerprint(&self) -> SessionFingerprint {
        let digest = Sha256::digest(self.0.as_bytes());
        SessionFingerprint(hex::encode(digest))
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(..)")
    }
}

/// Lower-case hex SHA-256 digest of a [`SessionToken`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionFingerprint(String);

impl SessionFingerprint {
    /// Rehydrate a fingerprint loaded from storage.
    ///
    /// Returns `None` unless `value` is 64 lower-case hex characters.
    pub fn from_stored(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        let well_formed = value.len() == 64
            && value
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        well_formed.then_some(Self(value))
    }

    /// Borrow the hex digest.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for SessionFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

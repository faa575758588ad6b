//! Session cookie key loading.
//!
//! The key file is opened through a cap-std directory handle on its parent,
//! so only that one directory is reachable.

use std::io::Read;
use std::path::{Path, PathBuf};

use actix_web::cookie::Key;
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use tracing::warn;
use zeroize::Zeroizing;

/// Minimum key material accepted by `Key::derive_from`.
pub const MIN_KEY_BYTES: usize = 64;

/// Reasons a session key could not be produced.
#[derive(Debug, thiserror::Error)]
pub enum SessionKeyError {
    #[error("failed to read session key at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key at {path} is {len} bytes; need at least {MIN_KEY_BYTES}")]
    TooShort { path: PathBuf, len: usize },
}

fn read_key_bytes(path: &Path) -> std::io::Result<Zeroizing<Vec<u8>>> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let name = path.file_name().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "key path has no file name")
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
    let mut file = dir.open(name)?;
    let mut bytes = Zeroizing::new(Vec::new());
    file.read_to_end(&mut bytes)?;
    Ok(bytes)
}

/// Load the signing/encryption key for session cookies.
///
/// When the file cannot be read, a random key is used if `allow_ephemeral`
/// is set or this is a debug build. A short key is always an error.
///
/// # Errors
///
/// Returns [`SessionKeyError`] if no usable key can be produced.
pub fn load_session_key(path: &Path, allow_ephemeral: bool) -> Result<Key, SessionKeyError> {
    match read_key_bytes(path) {
        Ok(bytes) if bytes.len() >= MIN_KEY_BYTES => Ok(Key::derive_from(&bytes)),
        Ok(bytes) => Err(SessionKeyError::TooShort {
            path: path.to_path_buf(),
            len: bytes.len(),
        }),
        Err(source) if allow_ephemeral || cfg!(debug_assertions) => {
            warn!(
                path = %path.display(),
                error = %source,
                "using ephemeral session key; sessions will not survive a restart"
            );
            Ok(Key::generate())
        }
        Err(source) => Err(SessionKeyError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

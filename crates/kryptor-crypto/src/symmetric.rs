//! Symmetric key resolution.
//!
//! A user-supplied string resolves to a 256-bit key by classification:
//! empty → no key; a single space → generate a fresh key and hand back its
//! display encoding; base64 shape → key string; existing file → keyfile
//! hash; directory → create a random keyfile inside it; anything else →
//! create the named keyfile. Keyfiles hash to their key via BLAKE2b-256
//! over the full file contents.

use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::debug;
use zeroize::Zeroizing;

use kryptor_core::{KryptorError, KryptorResult};

use crate::keys::SymmetricKey;
use crate::{
    fileio, primitives, HASH_SIZE, KEYFILE_EXTENSION, KEYFILE_LENGTH, KEYFILE_NAME_LENGTH,
    KEY_HEADER_SIZE, KEY_SIZE, SYMMETRIC_KEY_HEADER, SYMMETRIC_KEY_LENGTH,
};

/// Outcome of resolving a key specifier.
pub struct ResolvedKey {
    pub key: SymmetricKey,
    /// Display encoding of a freshly generated key, for the driver to show
    /// the user exactly once. `None` when the key came from existing input.
    pub encoded: Option<String>,
}

/// Resolve a user-supplied key specifier to a symmetric key.
///
/// Returns `Ok(None)` for an empty specifier: the caller proceeds without
/// a symmetric key.
pub fn resolve_symmetric_key(input: &str) -> KryptorResult<Option<ResolvedKey>> {
    if input.is_empty() {
        return Ok(None);
    }

    // Single space: the caller asked for a fresh random key.
    if input == " " {
        let key = SymmetricKey::generate();
        let encoded = encode_symmetric_key(&key);
        return Ok(Some(ResolvedKey {
            key,
            encoded: Some(encoded),
        }));
    }

    // Key strings are fixed-width base64; real paths of that exact width
    // are ruled out before any filesystem probing.
    if input.ends_with('=') || input.len() == SYMMETRIC_KEY_LENGTH {
        let key = decode_key_string(input)?;
        return Ok(Some(ResolvedKey { key, encoded: None }));
    }

    let path = Path::new(input);
    if path.is_file() {
        let key = read_keyfile(path)?;
        return Ok(Some(ResolvedKey { key, encoded: None }));
    }

    let mut path: PathBuf = path.to_path_buf();
    if path.is_dir() {
        path.push(format!(
            "{}.{KEYFILE_EXTENSION}",
            primitives::random_alphanumeric(KEYFILE_NAME_LENGTH)
        ));
    }
    if path.extension().and_then(|ext| ext.to_str()) != Some(KEYFILE_EXTENSION) {
        path.as_mut_os_string().push(format!(".{KEYFILE_EXTENSION}"));
    }

    let key = if path.is_file() {
        read_keyfile(&path)?
    } else {
        generate_keyfile(&path)?
    };
    Ok(Some(ResolvedKey { key, encoded: None }))
}

/// Display encoding of a symmetric key: `base64(header || key)`.
pub fn encode_symmetric_key(key: &SymmetricKey) -> String {
    let mut raw = Zeroizing::new([0u8; KEY_HEADER_SIZE + KEY_SIZE]);
    raw[..KEY_HEADER_SIZE].copy_from_slice(&SYMMETRIC_KEY_HEADER);
    raw[KEY_HEADER_SIZE..].copy_from_slice(key.as_bytes());
    STANDARD.encode(&raw[..])
}

/// Decode and validate an encoded symmetric key string.
pub fn decode_key_string(encoded: &str) -> KryptorResult<SymmetricKey> {
    if encoded.len() != SYMMETRIC_KEY_LENGTH {
        return Err(KryptorError::InvalidFormat(format!(
            "symmetric key must be {SYMMETRIC_KEY_LENGTH} characters, got {}",
            encoded.len()
        )));
    }
    let raw = Zeroizing::new(
        STANDARD
            .decode(encoded)
            .map_err(|_| KryptorError::InvalidFormat("symmetric key is not valid base64".into()))?,
    );
    if raw.len() != KEY_HEADER_SIZE + KEY_SIZE {
        return Err(KryptorError::InvalidFormat(
            "symmetric key has the wrong decoded length".into(),
        ));
    }
    if !primitives::ct_eq(&raw[..KEY_HEADER_SIZE], &SYMMETRIC_KEY_HEADER) {
        return Err(KryptorError::InvalidFormat(
            "unrecognised symmetric key header".into(),
        ));
    }

    let mut bytes = [0u8; KEY_SIZE];
    bytes.copy_from_slice(&raw[KEY_HEADER_SIZE..]);
    Ok(SymmetricKey::from_bytes(bytes))
}

/// Hash an existing keyfile into a symmetric key: BLAKE2b-256 over the
/// entire file contents, streamed.
pub fn read_keyfile(path: &Path) -> KryptorResult<SymmetricKey> {
    let mut file = fileio::open_read(path)?;
    let digest = primitives::blake2b_stream(&mut file, HASH_SIZE)?;

    let mut bytes = [0u8; KEY_SIZE];
    bytes.copy_from_slice(&digest);
    Ok(SymmetricKey::from_bytes(bytes))
}

/// Create a fresh random keyfile at `path`, flag it read-only, and hash it.
fn generate_keyfile(path: &Path) -> KryptorResult<SymmetricKey> {
    let mut contents = Zeroizing::new([0u8; KEYFILE_LENGTH]);
    primitives::random_fill(&mut contents[..]);

    std::fs::write(path, &contents[..])?;
    fileio::set_read_only(path, true)?;
    debug!(path = %path.display(), "generated keyfile");

    read_keyfile(path)
}

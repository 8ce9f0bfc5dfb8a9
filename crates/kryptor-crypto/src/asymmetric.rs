//! Loading and validation of encoded asymmetric keys.
//!
//! Public keys travel as `base64(algorithm header || 32-byte key)`; private
//! keys as the base64 of their password-protected container. The loaders
//! here only validate shape — wrong input is reported and yields `None`,
//! leaving retry decisions to the caller. Decrypting a private-key
//! container is `container::decrypt_private_key`'s job.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::error;
use zeroize::Zeroizing;

use crate::keys::KeyAlgorithm;
use crate::{primitives, KEY_HEADER_SIZE, KEY_SIZE, PRIVATE_KEY_LENGTH, PUBLIC_KEY_LENGTH};

/// A validated public key with its algorithm tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    pub algorithm: KeyAlgorithm,
    bytes: [u8; KEY_SIZE],
}

impl PublicKey {
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }

    /// Display encoding: `base64(algorithm header || key)`.
    pub fn encode(&self) -> String {
        let mut raw = [0u8; KEY_HEADER_SIZE + KEY_SIZE];
        raw[..KEY_HEADER_SIZE].copy_from_slice(&self.algorithm.header());
        raw[KEY_HEADER_SIZE..].copy_from_slice(&self.bytes);
        STANDARD.encode(raw)
    }
}

/// Load a public key from a text file.
pub fn load_public_key(path: &Path) -> Option<PublicKey> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) => {
            error!("unable to read public key {}: {err}", path.display());
            return None;
        }
    };
    let encoded = contents.trim_end_matches(['\r', '\n']);
    if encoded.len() != PUBLIC_KEY_LENGTH {
        error!(
            "{} is not a public key file ({} characters, expected {PUBLIC_KEY_LENGTH})",
            path.display(),
            encoded.len()
        );
        return None;
    }
    parse_public_key(encoded)
}

/// Parse an encoded public key supplied directly (for example, pasted on
/// the command line).
pub fn parse_public_key(encoded: &str) -> Option<PublicKey> {
    let raw = match STANDARD.decode(encoded) {
        Ok(raw) => raw,
        Err(_) => {
            error!("public key is not valid base64");
            return None;
        }
    };
    if raw.len() != KEY_HEADER_SIZE + KEY_SIZE {
        error!("public key has the wrong decoded length");
        return None;
    }
    let Some(algorithm) = KeyAlgorithm::from_header(&raw[..KEY_HEADER_SIZE]) else {
        error!("unrecognised public key header");
        return None;
    };

    let mut bytes = [0u8; KEY_SIZE];
    bytes.copy_from_slice(&raw[KEY_HEADER_SIZE..]);
    Some(PublicKey { algorithm, bytes })
}

/// Load an encrypted private-key container from its base64 text file. The
/// returned bytes are still password-protected.
pub fn load_private_key(path: &Path) -> Option<Zeroizing<Vec<u8>>> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) => {
            error!("unable to read private key {}: {err}", path.display());
            return None;
        }
    };
    let encoded = contents.trim_end_matches(['\r', '\n']);
    if encoded.len() != PRIVATE_KEY_LENGTH {
        error!(
            "{} is not a private key file ({} characters, expected {PRIVATE_KEY_LENGTH})",
            path.display(),
            encoded.len()
        );
        return None;
    }
    match STANDARD.decode(encoded) {
        Ok(raw) => Some(Zeroizing::new(raw)),
        Err(_) => {
            error!("private key is not valid base64");
            None
        }
    }
}

/// Generate a fresh Curve25519 key pair: the encoded public key and the
/// raw secret scalar, ready for the private-key container.
pub fn generate_key_pair() -> (PublicKey, Zeroizing<[u8; KEY_SIZE]>) {
    let secret = Zeroizing::new(primitives::random_array::<KEY_SIZE>());
    let public = PublicKey {
        algorithm: KeyAlgorithm::Curve25519,
        bytes: primitives::x25519_public_key(&secret),
    };
    (public, secret)
}

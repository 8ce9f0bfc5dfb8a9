//! Key newtypes and key-algorithm tags.
//!
//! All secret key types are zeroized on drop and redact their `Debug`
//! output. The engine never exposes raw key bytes except through
//! `as_bytes`, which borrows rather than copies.

use zeroize::Zeroize;

use crate::{
    primitives, CURVE25519_KEY_HEADER, ED25519_KEY_HEADER, KEY_HEADER_SIZE, KEY_SIZE,
    OLD_CURVE25519_KEY_HEADER, OLD_ED25519_KEY_HEADER,
};

macro_rules! secret_key_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone)]
        pub struct $name {
            bytes: [u8; KEY_SIZE],
        }

        impl $name {
            pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
                Self { bytes }
            }

            /// Fresh key from the OS CSPRNG.
            pub fn generate() -> Self {
                Self {
                    bytes: primitives::random_array(),
                }
            }

            pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
                &self.bytes
            }
        }

        impl Drop for $name {
            fn drop(&mut self) {
                self.bytes.zeroize();
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("bytes", &"[REDACTED]")
                    .finish()
            }
        }
    };
}

secret_key_type! {
    /// Per-file 256-bit content key. Generated fresh for every encryption
    /// and transported only inside the encrypted file header.
    FileKey
}

secret_key_type! {
    /// 256-bit key sealing the file header. Derived by the surrounding
    /// protocol (password, keyfile, or key exchange) and handed in.
    HeaderKey
}

secret_key_type! {
    /// 256-bit key resolved from a key string or keyfile.
    SymmetricKey
}

/// Algorithm of the key material inside a private-key container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAlgorithm {
    Curve25519,
    Ed25519,
}

impl KeyAlgorithm {
    /// 4-byte header identifying this algorithm in current formats.
    pub fn header(self) -> [u8; KEY_HEADER_SIZE] {
        match self {
            KeyAlgorithm::Curve25519 => CURVE25519_KEY_HEADER,
            KeyAlgorithm::Ed25519 => ED25519_KEY_HEADER,
        }
    }

    /// Legacy header written by V1 private-key containers.
    pub fn legacy_header(self) -> [u8; KEY_HEADER_SIZE] {
        match self {
            KeyAlgorithm::Curve25519 => OLD_CURVE25519_KEY_HEADER,
            KeyAlgorithm::Ed25519 => OLD_ED25519_KEY_HEADER,
        }
    }

    pub fn from_header(header: &[u8]) -> Option<Self> {
        if header == CURVE25519_KEY_HEADER {
            Some(KeyAlgorithm::Curve25519)
        } else if header == ED25519_KEY_HEADER {
            Some(KeyAlgorithm::Ed25519)
        } else {
            None
        }
    }

    pub fn from_legacy_header(header: &[u8]) -> Option<Self> {
        if header == OLD_CURVE25519_KEY_HEADER {
            Some(KeyAlgorithm::Curve25519)
        } else if header == OLD_ED25519_KEY_HEADER {
            Some(KeyAlgorithm::Ed25519)
        } else {
            None
        }
    }
}

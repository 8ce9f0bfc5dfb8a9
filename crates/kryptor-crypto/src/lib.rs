//! kryptor-crypto: chunked authenticated file encryption engine
//!
//! Pipeline: plaintext → 16 KiB chunks → ChaCha20-BLAKE2b seal → output =
//! `[unencrypted headers][encrypted header][chunk 0]…[chunk n-1]`
//!
//! Key hierarchy:
//! ```text
//! Header Key (32 bytes, supplied by the surrounding protocol)
//! └── File Header: ChaCha20-BLAKE2b, AD = ciphertext length || unencrypted headers
//!     └── File Key (per-file, 32 bytes random, exists only inside the header)
//!         └── Chunk AEAD: ChaCha20-BLAKE2b, nonce = header nonce + 1 + chunk index
//! Password → Argon2id → kcChaCha20-Poly1305 private-key container (V2)
//! ```

pub mod aead;
pub mod asymmetric;
pub mod container;
pub mod fileio;
pub mod header;
pub mod keys;
pub mod primitives;
pub mod stream;
pub mod symmetric;

pub use asymmetric::{
    generate_key_pair, load_private_key, load_public_key, parse_public_key, PublicKey,
};
pub use container::{decrypt_private_key, encrypt_private_key};
pub use header::{decrypt_header, encrypt_header, FileHeader};
pub use keys::{FileKey, HeaderKey, KeyAlgorithm, SymmetricKey};
pub use stream::{decrypt_file, encrypt_file, DecryptedFileInfo};
pub use symmetric::{encode_symmetric_key, resolve_symmetric_key, ResolvedKey};

/// Size of a ChaCha20 key (256-bit)
pub const KEY_SIZE: usize = 32;

/// Size of a ChaCha20 nonce (96-bit)
pub const NONCE_SIZE: usize = 12;

/// Size of an XChaCha20 nonce (192-bit, legacy V1 containers only)
pub const XNONCE_SIZE: usize = 24;

/// Size of a Poly1305 or keyed BLAKE2b authentication tag
pub const TAG_SIZE: usize = 16;

/// Size of the key-commitment prefix inside kcChaCha20-Poly1305
pub const COMMITMENT_SIZE: usize = 32;

/// Size of an Argon2id salt
pub const SALT_SIZE: usize = 16;

/// Plaintext bytes per chunk
pub const FILE_CHUNK_SIZE: usize = 16 * 1024;

/// On-disk bytes per sealed chunk
pub const CIPHERTEXT_CHUNK_SIZE: usize = FILE_CHUNK_SIZE + TAG_SIZE;

/// Padded file-name field inside the file header
pub const FILE_NAME_HEADER_SIZE: usize = 255;

/// Reserved zero bytes inside the file header
pub const SPARE_HEADER_SIZE: usize = 32;

pub(crate) const INT_SIZE: usize = 4;
pub(crate) const LONG_SIZE: usize = 8;

/// Plaintext file header: length, directory flag, name length, padded
/// name, spare, file key.
pub(crate) const PLAINTEXT_HEADER_SIZE: usize =
    LONG_SIZE + 1 + INT_SIZE + FILE_NAME_HEADER_SIZE + SPARE_HEADER_SIZE + KEY_SIZE;

/// Sealed file header as stored on disk
pub const ENCRYPTED_HEADER_SIZE: usize = PLAINTEXT_HEADER_SIZE + TAG_SIZE;

/// Magic prefix identifying the kind of an encoded key string
pub const KEY_HEADER_SIZE: usize = 4;

/// Header bytes prefixed to an encoded symmetric key
pub const SYMMETRIC_KEY_HEADER: [u8; KEY_HEADER_SIZE] = [0x3c, 0xa9, 0xf2, 0x10];

/// Exact character count of an encoded symmetric key string
pub const SYMMETRIC_KEY_LENGTH: usize = 48;

/// Header bytes identifying Curve25519 key material
pub const CURVE25519_KEY_HEADER: [u8; KEY_HEADER_SIZE] = [0x09, 0x11, 0x28, 0x5d];

/// Header bytes identifying Ed25519 key material
pub const ED25519_KEY_HEADER: [u8; KEY_HEADER_SIZE] = [0x4e, 0x64, 0x8a, 0x17];

/// Legacy Curve25519 header used by V1 private-key containers
pub const OLD_CURVE25519_KEY_HEADER: [u8; KEY_HEADER_SIZE] = [0x0a, 0xc5, 0x66, 0x2e];

/// Legacy Ed25519 header used by V1 private-key containers
pub const OLD_ED25519_KEY_HEADER: [u8; KEY_HEADER_SIZE] = [0x1f, 0x3a, 0x90, 0x7b];

/// Version bytes of the legacy private-key container (decrypt only)
pub const PRIVATE_KEY_VERSION1: [u8; 4] = [0x01, 0x00, 0x00, 0x00];

/// Version bytes of the current private-key container
pub const PRIVATE_KEY_VERSION2: [u8; 4] = [0x02, 0x00, 0x00, 0x00];

/// Argon2id iterations pinned by the V1 container format
pub const V1_ARGON2_ITERATIONS: u32 = 12;

/// Exact character count of an encoded public key (header || 32-byte key)
pub const PUBLIC_KEY_LENGTH: usize = 48;

/// Exact character count of an encoded Curve25519 V2 private-key container
pub const PRIVATE_KEY_LENGTH: usize = 140;

/// Random bytes written when generating a fresh keyfile
pub const KEYFILE_LENGTH: usize = 64;

/// Extension appended to keyfiles (without the dot)
pub const KEYFILE_EXTENSION: &str = "key";

/// Characters in a generated keyfile name (before the extension)
pub const KEYFILE_NAME_LENGTH: usize = 16;

/// BLAKE2b digest size used for keyfile hashing
pub const HASH_SIZE: usize = 32;

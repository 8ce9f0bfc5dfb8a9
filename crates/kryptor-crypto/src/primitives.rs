//! Thin wrappers over the crypto stack so the rest of the engine consumes
//! one vocabulary: CSPRNG, BLAKE2b (plain, keyed, KDF), Argon2id, raw
//! ChaCha20/XChaCha20 keystreams with explicit block counters, X25519, and
//! the constant-time helpers the wire formats depend on.
//!
//! Secret inputs are taken by reference so the caller controls their
//! lifetime; secret outputs come back wrapped in `Zeroizing`.

use std::io::Read;

use argon2::{Algorithm, Argon2, Params, Version};
use blake2::digest::consts::{U16, U32};
use blake2::digest::{Mac, Update, VariableOutput};
use blake2::{Blake2bMac, Blake2bVar};
use chacha20::cipher::{KeyIvInit, StreamCipher, StreamCipherSeek};
use chacha20::{ChaCha20, XChaCha20};
use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;
use rand::{Rng, RngCore};
use subtle::ConstantTimeEq;
use x25519_dalek::{PublicKey, StaticSecret};
use zeroize::Zeroizing;

use kryptor_core::{KryptorError, KryptorResult};

use crate::{KEY_SIZE, NONCE_SIZE, SALT_SIZE, TAG_SIZE, XNONCE_SIZE};

/// Bytes of keystream per ChaCha20 block
const CHACHA_BLOCK_SIZE: u64 = 64;

/// Fill `buf` with bytes from the OS CSPRNG.
pub fn random_fill(buf: &mut [u8]) {
    OsRng.fill_bytes(buf);
}

/// Fixed-size random byte array from the OS CSPRNG.
pub fn random_array<const N: usize>() -> [u8; N] {
    let mut bytes = [0u8; N];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Random alphanumeric characters, for generated keyfile and temp names.
pub fn random_alphanumeric(len: usize) -> String {
    OsRng
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Unkeyed BLAKE2b with a caller-chosen digest length (1..=64 bytes).
pub fn blake2b(message: &[u8], len: usize) -> KryptorResult<Vec<u8>> {
    let mut hasher = Blake2bVar::new(len)
        .map_err(|_| KryptorError::InvalidFormat(format!("unsupported digest length: {len}")))?;
    hasher.update(message);
    let mut digest = vec![0u8; len];
    hasher
        .finalize_variable(&mut digest)
        .map_err(|_| KryptorError::InvalidFormat(format!("unsupported digest length: {len}")))?;
    Ok(digest)
}

/// Unkeyed BLAKE2b over everything `reader` yields, without buffering the
/// whole input. Used for keyfile hashing.
pub fn blake2b_stream<R: Read>(reader: &mut R, len: usize) -> KryptorResult<Vec<u8>> {
    let mut hasher = Blake2bVar::new(len)
        .map_err(|_| KryptorError::InvalidFormat(format!("unsupported digest length: {len}")))?;
    let mut buf = vec![0u8; 64 * 1024];
    loop {
        let read = reader.read(&mut buf)?;
        if read == 0 {
            break;
        }
        hasher.update(&buf[..read]);
    }
    let mut digest = vec![0u8; len];
    hasher
        .finalize_variable(&mut digest)
        .map_err(|_| KryptorError::InvalidFormat(format!("unsupported digest length: {len}")))?;
    Ok(digest)
}

/// Keyed BLAKE2b producing a 128-bit MAC over the concatenation of `parts`.
pub fn blake2b_mac(parts: &[&[u8]], key: &[u8]) -> KryptorResult<[u8; TAG_SIZE]> {
    let mut mac = Blake2bMac::<U16>::new_from_slice(key)
        .map_err(|_| KryptorError::InvalidFormat("unsupported MAC key length".into()))?;
    for part in parts {
        Mac::update(&mut mac, part);
    }
    let mut tag = [0u8; TAG_SIZE];
    tag.copy_from_slice(&mac.finalize().into_bytes());
    Ok(tag)
}

/// BLAKE2b key derivation: keyed, salted, and domain-separated through the
/// personalization field. Personalization must be at most 16 bytes.
pub fn blake2b_kdf(
    ikm: &[u8],
    salt: &[u8; SALT_SIZE],
    personal: &[u8],
) -> KryptorResult<Zeroizing<[u8; KEY_SIZE]>> {
    let kdf = Blake2bMac::<U32>::new_with_salt_and_personal(ikm, salt, personal)
        .map_err(|_| KryptorError::InvalidFormat("unsupported KDF parameter length".into()))?;
    let mut okm = Zeroizing::new([0u8; KEY_SIZE]);
    okm.copy_from_slice(&kdf.finalize().into_bytes());
    Ok(okm)
}

/// Argon2id with parallelism pinned to 1. The caller supplies the work
/// factors; failures surface as the single cryptographic error so the
/// public error surface stays oracle-free.
pub fn argon2id(
    out: &mut [u8],
    password: &[u8],
    salt: &[u8; SALT_SIZE],
    iterations: u32,
    mem_kib: u32,
) -> KryptorResult<()> {
    let params = Params::new(mem_kib, iterations, 1, Some(out.len()))
        .map_err(|e| KryptorError::InvalidFormat(format!("invalid Argon2id parameters: {e}")))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
    argon2
        .hash_password_into(password, salt, out)
        .map_err(|_| KryptorError::Cryptographic)
}

/// Write raw ChaCha20 keystream into `out`, starting at `counter`.
pub fn chacha20_keystream(
    out: &mut [u8],
    nonce: &[u8; NONCE_SIZE],
    key: &[u8; KEY_SIZE],
    counter: u32,
) {
    out.fill(0);
    chacha20_xor(out, nonce, key, counter);
}

/// XOR `buf` with ChaCha20 keystream, starting at `counter`.
pub fn chacha20_xor(buf: &mut [u8], nonce: &[u8; NONCE_SIZE], key: &[u8; KEY_SIZE], counter: u32) {
    let mut cipher = ChaCha20::new(key.into(), nonce.into());
    cipher.seek(u64::from(counter) * CHACHA_BLOCK_SIZE);
    cipher.apply_keystream(buf);
}

/// XOR `buf` with XChaCha20 keystream, starting at `counter`.
pub fn xchacha20_xor(
    buf: &mut [u8],
    nonce: &[u8; XNONCE_SIZE],
    key: &[u8; KEY_SIZE],
    counter: u32,
) {
    let mut cipher = XChaCha20::new(key.into(), nonce.into());
    cipher.seek(u64::from(counter) * CHACHA_BLOCK_SIZE);
    cipher.apply_keystream(buf);
}

/// Constant-time equality. Slices of different lengths compare unequal.
pub fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

/// Branch-free little-endian increment, usable on secret counters such as
/// chunk nonces.
pub fn ct_increment_le(buf: &mut [u8]) {
    let mut carry = 1u16;
    for byte in buf.iter_mut() {
        carry += u16::from(*byte);
        *byte = carry as u8;
        carry >>= 8;
    }
}

/// Public key for an X25519 secret scalar.
pub fn x25519_public_key(secret: &[u8; KEY_SIZE]) -> [u8; KEY_SIZE] {
    let secret = StaticSecret::from(*secret);
    PublicKey::from(&secret).to_bytes()
}

/// X25519 shared secret between a local secret scalar and a peer public key.
pub fn x25519_shared_secret(
    secret: &[u8; KEY_SIZE],
    peer_public: &[u8; KEY_SIZE],
) -> Zeroizing<[u8; KEY_SIZE]> {
    let secret = StaticSecret::from(*secret);
    let shared = secret.diffie_hellman(&PublicKey::from(*peer_public));
    Zeroizing::new(*shared.as_bytes())
}

//! ChaCha20-based AEAD constructions.
//!
//! kcChaCha20-Poly1305 output (binary):
//! ```text
//! [32 bytes: key commitment][N bytes: ciphertext][16 bytes: Poly1305 tag]
//! ```
//! Subkeys come from 96 bytes of ChaCha20 keystream under `(key, nonce)` at
//! block 0: `commitment || mac key || enc key`. The ciphertext is produced
//! under the derived enc key starting at block 1, and the tag covers
//! `aad || pad16 || ciphertext || pad16 || le64(|aad|) || le64(|ciphertext|)`.
//!
//! ChaCha20-BLAKE2b and XChaCha20-BLAKE2b are the same encrypt-then-MAC
//! shape without the commitment prefix: 64 bytes of keystream split into
//! `mac key || enc key`, with a keyed BLAKE2b-128 tag over the same layout.

use poly1305::universal_hash::{KeyInit, UniversalHash};
use poly1305::Poly1305;
use zeroize::Zeroizing;

use kryptor_core::{KryptorError, KryptorResult};

use crate::{primitives, COMMITMENT_SIZE, KEY_SIZE, NONCE_SIZE, TAG_SIZE, XNONCE_SIZE};

/// Bytes added by kcChaCha20-Poly1305
pub const KC_OVERHEAD: usize = COMMITMENT_SIZE + TAG_SIZE;

const ZERO_PAD: [u8; 16] = [0u8; 16];

struct SubKeys {
    commitment: [u8; COMMITMENT_SIZE],
    mac_key: Zeroizing<[u8; KEY_SIZE]>,
    enc_key: Zeroizing<[u8; KEY_SIZE]>,
}

enum Stream<'a> {
    ChaCha(&'a [u8; NONCE_SIZE]),
    XChaCha(&'a [u8; XNONCE_SIZE]),
}

impl Stream<'_> {
    fn xor(&self, buf: &mut [u8], key: &[u8; KEY_SIZE], counter: u32) {
        match self {
            Stream::ChaCha(nonce) => primitives::chacha20_xor(buf, nonce, key, counter),
            Stream::XChaCha(nonce) => primitives::xchacha20_xor(buf, nonce, key, counter),
        }
    }

    /// Derive the subkey block from keystream at block 0. With commitment:
    /// `commitment(32) || mac key(32) || enc key(32)`. Without:
    /// `mac key(32) || enc key(32)`, so the two constructions never share
    /// an encryption key under the same `(key, nonce)`.
    fn subkeys(&self, key: &[u8; KEY_SIZE], with_commitment: bool) -> SubKeys {
        let mut stream = Zeroizing::new([0u8; COMMITMENT_SIZE + 2 * KEY_SIZE]);
        let keystream_len = if with_commitment {
            COMMITMENT_SIZE + 2 * KEY_SIZE
        } else {
            2 * KEY_SIZE
        };
        match self {
            Stream::ChaCha(nonce) => {
                primitives::chacha20_keystream(&mut stream[..keystream_len], nonce, key, 0)
            }
            Stream::XChaCha(nonce) => {
                primitives::xchacha20_xor(&mut stream[..keystream_len], nonce, key, 0)
            }
        }

        let offset = if with_commitment { COMMITMENT_SIZE } else { 0 };
        let mut commitment = [0u8; COMMITMENT_SIZE];
        if with_commitment {
            commitment.copy_from_slice(&stream[..COMMITMENT_SIZE]);
        }
        let mut mac_key = Zeroizing::new([0u8; KEY_SIZE]);
        mac_key.copy_from_slice(&stream[offset..offset + KEY_SIZE]);
        let mut enc_key = Zeroizing::new([0u8; KEY_SIZE]);
        enc_key.copy_from_slice(&stream[offset + KEY_SIZE..offset + 2 * KEY_SIZE]);
        SubKeys {
            commitment,
            mac_key,
            enc_key,
        }
    }
}

fn pad16(len: usize) -> &'static [u8] {
    &ZERO_PAD[..(16 - len % 16) % 16]
}

fn length_block(aad: &[u8], ciphertext: &[u8]) -> [u8; 16] {
    let mut block = [0u8; 16];
    block[..8].copy_from_slice(&(aad.len() as u64).to_le_bytes());
    block[8..].copy_from_slice(&(ciphertext.len() as u64).to_le_bytes());
    block
}

fn poly1305_tag(mac_key: &[u8; KEY_SIZE], aad: &[u8], ciphertext: &[u8]) -> [u8; TAG_SIZE] {
    let mut mac = Poly1305::new(poly1305::Key::from_slice(mac_key));
    mac.update_padded(aad);
    mac.update_padded(ciphertext);
    mac.update_padded(&length_block(aad, ciphertext));
    let mut tag = [0u8; TAG_SIZE];
    tag.copy_from_slice(&mac.finalize());
    tag
}

fn blake2b_tag(
    mac_key: &[u8; KEY_SIZE],
    aad: &[u8],
    ciphertext: &[u8],
) -> KryptorResult<[u8; TAG_SIZE]> {
    primitives::blake2b_mac(
        &[
            aad,
            pad16(aad.len()),
            ciphertext,
            pad16(ciphertext.len()),
            &length_block(aad, ciphertext),
        ],
        &mac_key[..],
    )
}

/// Encrypt with key commitment: `commitment || ciphertext || tag`.
pub fn kc_chacha20_poly1305_encrypt(
    plaintext: &[u8],
    nonce: &[u8; NONCE_SIZE],
    key: &[u8; KEY_SIZE],
    aad: &[u8],
) -> KryptorResult<Vec<u8>> {
    let keys = Stream::ChaCha(nonce).subkeys(key, true);

    let mut out = Vec::with_capacity(COMMITMENT_SIZE + plaintext.len() + TAG_SIZE);
    out.extend_from_slice(&keys.commitment);
    out.extend_from_slice(plaintext);
    primitives::chacha20_xor(&mut out[COMMITMENT_SIZE..], nonce, &keys.enc_key, 1);

    let tag = poly1305_tag(&keys.mac_key, aad, &out[COMMITMENT_SIZE..]);
    out.extend_from_slice(&tag);
    Ok(out)
}

/// Open a kcChaCha20-Poly1305 sealed message. The commitment is checked
/// first, in constant time; only then is the tag verified. Either failure
/// surfaces as the same cryptographic error.
pub fn kc_chacha20_poly1305_decrypt(
    sealed: &[u8],
    nonce: &[u8; NONCE_SIZE],
    key: &[u8; KEY_SIZE],
    aad: &[u8],
) -> KryptorResult<Zeroizing<Vec<u8>>> {
    if sealed.len() < KC_OVERHEAD {
        return Err(KryptorError::InvalidFormat(format!(
            "sealed message too short: {} bytes (minimum {KC_OVERHEAD})",
            sealed.len()
        )));
    }
    let keys = Stream::ChaCha(nonce).subkeys(key, true);

    let (commitment, rest) = sealed.split_at(COMMITMENT_SIZE);
    let (ciphertext, tag) = rest.split_at(rest.len() - TAG_SIZE);

    if !primitives::ct_eq(commitment, &keys.commitment) {
        return Err(KryptorError::Cryptographic);
    }
    let expected = poly1305_tag(&keys.mac_key, aad, ciphertext);
    if !primitives::ct_eq(tag, &expected) {
        return Err(KryptorError::Cryptographic);
    }

    let mut plaintext = Zeroizing::new(ciphertext.to_vec());
    primitives::chacha20_xor(&mut plaintext, nonce, &keys.enc_key, 1);
    Ok(plaintext)
}

/// Encrypt-then-MAC without commitment: `ciphertext || tag`.
pub fn chacha20_blake2b_encrypt(
    plaintext: &[u8],
    nonce: &[u8; NONCE_SIZE],
    key: &[u8; KEY_SIZE],
    aad: &[u8],
) -> KryptorResult<Vec<u8>> {
    etm_encrypt(Stream::ChaCha(nonce), plaintext, key, aad)
}

pub fn chacha20_blake2b_decrypt(
    sealed: &[u8],
    nonce: &[u8; NONCE_SIZE],
    key: &[u8; KEY_SIZE],
    aad: &[u8],
) -> KryptorResult<Zeroizing<Vec<u8>>> {
    etm_decrypt(Stream::ChaCha(nonce), sealed, key, aad)
}

/// XChaCha20 variant, kept for V1 private-key containers.
pub fn xchacha20_blake2b_encrypt(
    plaintext: &[u8],
    nonce: &[u8; XNONCE_SIZE],
    key: &[u8; KEY_SIZE],
    aad: &[u8],
) -> KryptorResult<Vec<u8>> {
    etm_encrypt(Stream::XChaCha(nonce), plaintext, key, aad)
}

pub fn xchacha20_blake2b_decrypt(
    sealed: &[u8],
    nonce: &[u8; XNONCE_SIZE],
    key: &[u8; KEY_SIZE],
    aad: &[u8],
) -> KryptorResult<Zeroizing<Vec<u8>>> {
    etm_decrypt(Stream::XChaCha(nonce), sealed, key, aad)
}

fn etm_encrypt(
    stream: Stream<'_>,
    plaintext: &[u8],
    key: &[u8; KEY_SIZE],
    aad: &[u8],
) -> KryptorResult<Vec<u8>> {
    let keys = stream.subkeys(key, false);

    let mut out = Vec::with_capacity(plaintext.len() + TAG_SIZE);
    out.extend_from_slice(plaintext);
    stream.xor(&mut out, &keys.enc_key, 1);

    let tag = blake2b_tag(&keys.mac_key, aad, &out)?;
    out.extend_from_slice(&tag);
    Ok(out)
}

fn etm_decrypt(
    stream: Stream<'_>,
    sealed: &[u8],
    key: &[u8; KEY_SIZE],
    aad: &[u8],
) -> KryptorResult<Zeroizing<Vec<u8>>> {
    if sealed.len() < TAG_SIZE {
        return Err(KryptorError::InvalidFormat(format!(
            "sealed message too short: {} bytes (minimum {TAG_SIZE})",
            sealed.len()
        )));
    }
    let keys = stream.subkeys(key, false);

    let (ciphertext, tag) = sealed.split_at(sealed.len() - TAG_SIZE);
    let expected = blake2b_tag(&keys.mac_key, aad, ciphertext)?;
    if !primitives::ct_eq(tag, &expected) {
        return Err(KryptorError::Cryptographic);
    }

    let mut plaintext = Zeroizing::new(ciphertext.to_vec());
    stream.xor(&mut plaintext, &keys.enc_key, 1);
    Ok(plaintext)
}

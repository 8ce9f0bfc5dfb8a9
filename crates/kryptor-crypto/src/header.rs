//! Encrypted file header codec.
//!
//! Plaintext header layout (332 bytes, then sealed with ChaCha20-BLAKE2b):
//! ```text
//! plaintext_length : u64 LE
//! is_directory     : u8 (0x00 or 0x01)
//! file_name_length : i32 LE (0, or 1..=255)
//! padded_file_name : [u8; 255] (UTF-8, zero padded)
//! spare            : [u8; 32]  (zero)
//! file_key         : [u8; 32]
//! ```
//! Associated data binds `le64(chunk_count * CIPHERTEXT_CHUNK_SIZE)` and the
//! caller's unencrypted headers, so resizing the ciphertext or touching the
//! outer headers breaks authentication at header-open time.

use zeroize::Zeroizing;

use kryptor_core::{KryptorError, KryptorResult};

use crate::keys::{FileKey, HeaderKey};
use crate::{
    aead, CIPHERTEXT_CHUNK_SIZE, ENCRYPTED_HEADER_SIZE, FILE_NAME_HEADER_SIZE, INT_SIZE, KEY_SIZE,
    LONG_SIZE, NONCE_SIZE, PLAINTEXT_HEADER_SIZE, SPARE_HEADER_SIZE,
};

const NAME_OFFSET: usize = LONG_SIZE + 1 + INT_SIZE;
const SPARE_OFFSET: usize = NAME_OFFSET + FILE_NAME_HEADER_SIZE;
const FILE_KEY_OFFSET: usize = SPARE_OFFSET + SPARE_HEADER_SIZE;

/// Decrypted contents of a file header.
pub struct FileHeader {
    pub plaintext_length: u64,
    pub is_directory: bool,
    /// `None` when the file was encrypted without file-name storage.
    pub file_name: Option<String>,
    pub file_key: FileKey,
}

fn associated_data(ciphertext_length: u64, unencrypted_headers: &[u8]) -> Vec<u8> {
    let mut ad = Vec::with_capacity(LONG_SIZE + unencrypted_headers.len());
    ad.extend_from_slice(&ciphertext_length.to_le_bytes());
    ad.extend_from_slice(unencrypted_headers);
    ad
}

/// Build and seal a file header.
///
/// When `store_file_name` is off, the name length field is written as zero
/// and the padded field stays zero; the name is deliberately not copied.
#[allow(clippy::too_many_arguments)]
pub fn encrypt_header(
    chunk_count: u64,
    plaintext_length: u64,
    is_directory: bool,
    file_name: &str,
    store_file_name: bool,
    unencrypted_headers: &[u8],
    file_key: &FileKey,
    nonce: &[u8; NONCE_SIZE],
    header_key: &HeaderKey,
) -> KryptorResult<Vec<u8>> {
    let name_bytes = file_name.as_bytes();
    if store_file_name && (name_bytes.is_empty() || name_bytes.len() > FILE_NAME_HEADER_SIZE) {
        return Err(KryptorError::PolicyViolation(format!(
            "file name must be 1..={FILE_NAME_HEADER_SIZE} bytes of UTF-8, got {}",
            name_bytes.len()
        )));
    }

    let ciphertext_length = chunk_count * CIPHERTEXT_CHUNK_SIZE as u64;
    let ad = associated_data(ciphertext_length, unencrypted_headers);

    let mut plaintext = Zeroizing::new([0u8; PLAINTEXT_HEADER_SIZE]);
    plaintext[..LONG_SIZE].copy_from_slice(&plaintext_length.to_le_bytes());
    plaintext[LONG_SIZE] = u8::from(is_directory);
    if store_file_name {
        plaintext[LONG_SIZE + 1..NAME_OFFSET]
            .copy_from_slice(&(name_bytes.len() as i32).to_le_bytes());
        plaintext[NAME_OFFSET..NAME_OFFSET + name_bytes.len()].copy_from_slice(name_bytes);
    }
    plaintext[FILE_KEY_OFFSET..].copy_from_slice(file_key.as_bytes());

    aead::chacha20_blake2b_encrypt(&plaintext[..], nonce, header_key.as_bytes(), &ad)
}

/// Open a sealed file header.
///
/// `ciphertext_length` is what the decrypter measured on disk; if it does
/// not match what the encrypter committed to, authentication fails.
pub fn decrypt_header(
    sealed: &[u8],
    ciphertext_length: u64,
    unencrypted_headers: &[u8],
    nonce: &[u8; NONCE_SIZE],
    header_key: &HeaderKey,
) -> KryptorResult<FileHeader> {
    if sealed.len() != ENCRYPTED_HEADER_SIZE {
        return Err(KryptorError::InvalidFormat(format!(
            "encrypted header must be {ENCRYPTED_HEADER_SIZE} bytes, got {}",
            sealed.len()
        )));
    }

    let ad = associated_data(ciphertext_length, unencrypted_headers);
    let plaintext = aead::chacha20_blake2b_decrypt(sealed, nonce, header_key.as_bytes(), &ad)?;

    let mut length_bytes = [0u8; LONG_SIZE];
    length_bytes.copy_from_slice(&plaintext[..LONG_SIZE]);
    let plaintext_length = u64::from_le_bytes(length_bytes);

    let is_directory = match plaintext[LONG_SIZE] {
        0 => false,
        1 => true,
        other => {
            return Err(KryptorError::PolicyViolation(format!(
                "directory flag must be 0 or 1, got {other}"
            )))
        }
    };

    let mut name_length_bytes = [0u8; INT_SIZE];
    name_length_bytes.copy_from_slice(&plaintext[LONG_SIZE + 1..NAME_OFFSET]);
    let name_length = i32::from_le_bytes(name_length_bytes);
    if !(0..=FILE_NAME_HEADER_SIZE as i32).contains(&name_length) {
        return Err(KryptorError::PolicyViolation(format!(
            "file name length out of range: {name_length}"
        )));
    }

    let file_name = if name_length == 0 {
        None
    } else {
        let raw = &plaintext[NAME_OFFSET..NAME_OFFSET + name_length as usize];
        Some(
            std::str::from_utf8(raw)
                .map_err(|_| KryptorError::InvalidFormat("file name is not UTF-8".into()))?
                .to_owned(),
        )
    };

    let mut key_bytes = [0u8; KEY_SIZE];
    key_bytes.copy_from_slice(&plaintext[FILE_KEY_OFFSET..]);

    Ok(FileHeader {
        plaintext_length,
        is_directory,
        file_name,
        file_key: FileKey::from_bytes(key_bytes),
    })
}

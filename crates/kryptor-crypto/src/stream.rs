//! Chunked file encryption and decryption.
//!
//! On-disk layout:
//! ```text
//! [unencrypted headers][encrypted header][chunk 0]…[chunk n-1]
//! ```
//! Every chunk is a full `CIPHERTEXT_CHUNK_SIZE` record; a short final read
//! is zero-padded and the authenticated `plaintext_length` lets the
//! decrypter cut the output back to the exact original size. The nonce
//! chain is deterministic: the caller-supplied nonce seals the header,
//! chunk `i` uses seed + 1 + i (constant-time little-endian increment).
//! An empty input still produces one all-zero chunk, so every encrypted
//! file carries at least one sealed record.
//!
//! Output is staged under a random sibling name and renamed into place
//! only once complete; any failure (or cancellation) deletes the staging
//! file, so a partial output never lands at the target path.

use std::fs;
use std::io::{BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

use tracing::debug;
use zeroize::Zeroizing;

use kryptor_core::{CancelFlag, EngineConfig, KryptorError, KryptorResult};

use crate::keys::{FileKey, HeaderKey};
use crate::{
    aead, fileio, header, primitives, CIPHERTEXT_CHUNK_SIZE, ENCRYPTED_HEADER_SIZE,
    FILE_CHUNK_SIZE, NONCE_SIZE,
};

/// Metadata recovered from a decrypted file.
pub struct DecryptedFileInfo {
    pub plaintext_length: u64,
    pub is_directory: bool,
    /// Original name, when the encrypter stored it.
    pub file_name: Option<String>,
}

fn chunk_count_for(plaintext_length: u64) -> u64 {
    plaintext_length.div_ceil(FILE_CHUNK_SIZE as u64).max(1)
}

/// Encrypt `input` to `output`.
///
/// `nonce` and `header_key` come from the surrounding protocol. On success
/// the post-encryption policy runs: the plaintext is shredded
/// (`overwrite_input`) or deleted (directory traversal), and the output is
/// flagged read-only. On any failure the staging output is removed and the
/// input is left untouched.
#[allow(clippy::too_many_arguments)]
pub fn encrypt_file(
    input: &Path,
    output: &Path,
    is_directory: bool,
    unencrypted_headers: &[u8],
    nonce: [u8; NONCE_SIZE],
    header_key: &HeaderKey,
    config: &EngineConfig,
    cancel: &CancelFlag,
) -> KryptorResult<()> {
    let staging = fileio::random_sibling_path(output);
    if let Err(err) = encrypt_to_staging(
        input,
        &staging,
        is_directory,
        unencrypted_headers,
        nonce,
        header_key,
        config,
        cancel,
    ) {
        let _ = fs::remove_file(&staging);
        return Err(err);
    }
    if let Err(err) = fs::rename(&staging, output) {
        let _ = fs::remove_file(&staging);
        return Err(err.into());
    }

    if config.overwrite_input {
        fileio::shred(input)?;
    } else if is_directory {
        fileio::delete_file(input)?;
    }
    fileio::set_read_only(output, true)?;
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn encrypt_to_staging(
    input: &Path,
    staging: &Path,
    is_directory: bool,
    unencrypted_headers: &[u8],
    nonce: [u8; NONCE_SIZE],
    header_key: &HeaderKey,
    config: &EngineConfig,
    cancel: &CancelFlag,
) -> KryptorResult<()> {
    let mut nonce = Zeroizing::new(nonce);
    let source = fileio::open_read(input)?;
    let plaintext_length = source.metadata()?.len();
    let chunk_count = chunk_count_for(plaintext_length);
    let ciphertext_length = chunk_count * CIPHERTEXT_CHUNK_SIZE as u64;
    let total_length =
        unencrypted_headers.len() as u64 + ENCRYPTED_HEADER_SIZE as u64 + ciphertext_length;

    let file_name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let file_key = FileKey::generate();
    let encrypted_header = header::encrypt_header(
        chunk_count,
        plaintext_length,
        is_directory,
        &file_name,
        config.encrypt_file_names,
        unencrypted_headers,
        &file_key,
        &nonce,
        header_key,
    )?;

    let mut sink = BufWriter::new(fileio::create_write(staging, total_length)?);
    sink.write_all(unencrypted_headers)?;
    sink.write_all(&encrypted_header)?;
    primitives::ct_increment_le(nonce.as_mut_slice());

    let mut reader = BufReader::with_capacity(FILE_CHUNK_SIZE, source);
    let mut plaintext = Zeroizing::new(vec![0u8; FILE_CHUNK_SIZE]);
    for _ in 0..chunk_count {
        if cancel.is_cancelled() {
            return Err(KryptorError::Cancelled);
        }
        let read = fileio::read_full(&mut reader, &mut plaintext)?;
        plaintext[read..].fill(0);

        let sealed =
            aead::chacha20_blake2b_encrypt(&plaintext, &nonce, file_key.as_bytes(), &[])?;
        sink.write_all(&sealed)?;
        primitives::ct_increment_le(nonce.as_mut_slice());
    }

    sink.flush()?;
    let file = sink.into_inner().map_err(|err| err.into_error())?;
    file.sync_all()?;

    debug!(
        chunks = chunk_count,
        bytes = total_length,
        total = config.total_count,
        "file encrypted"
    );
    Ok(())
}

/// Decrypt `input` to `output`, returning the recovered metadata.
///
/// The caller supplies the unencrypted headers it read from the file and
/// the protocol-derived nonce and header key; the measured ciphertext size
/// is checked against the encrypter's authenticated commitment before any
/// chunk is opened. Any failure removes the staging output.
pub fn decrypt_file(
    input: &Path,
    output: &Path,
    unencrypted_headers: &[u8],
    nonce: [u8; NONCE_SIZE],
    header_key: &HeaderKey,
    cancel: &CancelFlag,
) -> KryptorResult<DecryptedFileInfo> {
    let staging = fileio::random_sibling_path(output);
    match decrypt_to_staging(
        input,
        &staging,
        unencrypted_headers,
        nonce,
        header_key,
        cancel,
    ) {
        Ok(info) => match fs::rename(&staging, output) {
            Ok(()) => Ok(info),
            Err(err) => {
                let _ = fs::remove_file(&staging);
                Err(err.into())
            }
        },
        Err(err) => {
            let _ = fs::remove_file(&staging);
            Err(err)
        }
    }
}

fn decrypt_to_staging(
    input: &Path,
    staging: &Path,
    unencrypted_headers: &[u8],
    nonce: [u8; NONCE_SIZE],
    header_key: &HeaderKey,
    cancel: &CancelFlag,
) -> KryptorResult<DecryptedFileInfo> {
    let mut nonce = Zeroizing::new(nonce);
    let mut source = fileio::open_read(input)?;
    let total_length = source.metadata()?.len();
    let prologue = unencrypted_headers.len() as u64 + ENCRYPTED_HEADER_SIZE as u64;
    if total_length < prologue + CIPHERTEXT_CHUNK_SIZE as u64 {
        return Err(KryptorError::InvalidFormat(
            "file is too short to be an encrypted file".into(),
        ));
    }
    let ciphertext_length = total_length - prologue;
    if ciphertext_length % CIPHERTEXT_CHUNK_SIZE as u64 != 0 {
        return Err(KryptorError::InvalidFormat(
            "ciphertext is not a whole number of chunks".into(),
        ));
    }
    let chunk_count = ciphertext_length / CIPHERTEXT_CHUNK_SIZE as u64;

    source.seek(SeekFrom::Start(unencrypted_headers.len() as u64))?;
    let mut reader = BufReader::with_capacity(CIPHERTEXT_CHUNK_SIZE, source);
    let mut sealed_header = [0u8; ENCRYPTED_HEADER_SIZE];
    reader.read_exact(&mut sealed_header)?;

    let file_header = header::decrypt_header(
        &sealed_header,
        ciphertext_length,
        unencrypted_headers,
        &nonce,
        header_key,
    )?;
    if file_header.plaintext_length > chunk_count * FILE_CHUNK_SIZE as u64 {
        return Err(KryptorError::PolicyViolation(
            "plaintext length exceeds the committed chunk count".into(),
        ));
    }

    let mut sink = BufWriter::new(fileio::create_write(staging, file_header.plaintext_length)?);
    primitives::ct_increment_le(nonce.as_mut_slice());

    let mut sealed = vec![0u8; CIPHERTEXT_CHUNK_SIZE];
    let mut remaining = file_header.plaintext_length;
    for _ in 0..chunk_count {
        if cancel.is_cancelled() {
            return Err(KryptorError::Cancelled);
        }
        reader.read_exact(&mut sealed)?;
        let plaintext =
            aead::chacha20_blake2b_decrypt(&sealed, &nonce, file_header.file_key.as_bytes(), &[])?;

        let take = remaining.min(FILE_CHUNK_SIZE as u64) as usize;
        sink.write_all(&plaintext[..take])?;
        remaining -= take as u64;
        primitives::ct_increment_le(nonce.as_mut_slice());
    }

    sink.flush()?;
    let file = sink.into_inner().map_err(|err| err.into_error())?;
    file.sync_all()?;

    debug!(chunks = chunk_count, bytes = file_header.plaintext_length, "file decrypted");
    Ok(DecryptedFileInfo {
        plaintext_length: file_header.plaintext_length,
        is_directory: file_header.is_directory,
        file_name: file_header.file_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, TempDir};

    const ZERO_NONCE: [u8; NONCE_SIZE] = [0u8; NONCE_SIZE];

    fn zero_header_key() -> HeaderKey {
        HeaderKey::from_bytes([0u8; 32])
    }

    fn names_on() -> EngineConfig {
        EngineConfig {
            encrypt_file_names: true,
            ..EngineConfig::default()
        }
    }

    /// Write `contents` to `name` inside a fresh temp dir and return both.
    fn fixture(name: &str, contents: &[u8]) -> (TempDir, std::path::PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    fn roundtrip(contents: &[u8]) -> Vec<u8> {
        let (dir, input) = fixture("data.bin", contents);
        let output = dir.path().join("data.bin.enc");
        let restored = dir.path().join("restored.bin");

        encrypt_file(
            &input,
            &output,
            false,
            b"",
            ZERO_NONCE,
            &zero_header_key(),
            &EngineConfig::default(),
            &CancelFlag::new(),
        )
        .unwrap();

        decrypt_file(
            &output,
            &restored,
            b"",
            ZERO_NONCE,
            &zero_header_key(),
            &CancelFlag::new(),
        )
        .unwrap();

        fs::read(&restored).unwrap()
    }

    #[test]
    fn test_small_file_shape_and_roundtrip() {
        let (dir, input) = fixture("a.txt", b"hello\n");
        let output = dir.path().join("a.txt.enc");
        let restored = dir.path().join("a.txt.dec");

        encrypt_file(
            &input,
            &output,
            false,
            b"",
            ZERO_NONCE,
            &zero_header_key(),
            &names_on(),
            &CancelFlag::new(),
        )
        .unwrap();

        assert_eq!(
            fs::metadata(&output).unwrap().len(),
            (ENCRYPTED_HEADER_SIZE + CIPHERTEXT_CHUNK_SIZE) as u64,
            "one short chunk still occupies a full record"
        );

        let info = decrypt_file(
            &output,
            &restored,
            b"",
            ZERO_NONCE,
            &zero_header_key(),
            &CancelFlag::new(),
        )
        .unwrap();

        assert_eq!(fs::read(&restored).unwrap(), b"hello\n");
        assert_eq!(info.plaintext_length, 6);
        assert!(!info.is_directory);
        assert_eq!(info.file_name.as_deref(), Some("a.txt"));
    }

    #[test]
    fn test_empty_file_produces_one_chunk() {
        let (dir, input) = fixture("empty.bin", b"");
        let output = dir.path().join("empty.enc");
        let restored = dir.path().join("empty.dec");

        encrypt_file(
            &input,
            &output,
            false,
            b"outer",
            ZERO_NONCE,
            &zero_header_key(),
            &EngineConfig::default(),
            &CancelFlag::new(),
        )
        .unwrap();

        assert_eq!(
            fs::metadata(&output).unwrap().len(),
            (5 + ENCRYPTED_HEADER_SIZE + CIPHERTEXT_CHUNK_SIZE) as u64
        );

        let info = decrypt_file(
            &output,
            &restored,
            b"outer",
            ZERO_NONCE,
            &zero_header_key(),
            &CancelFlag::new(),
        )
        .unwrap();

        assert_eq!(info.plaintext_length, 0);
        assert_eq!(fs::metadata(&restored).unwrap().len(), 0);
    }

    #[test]
    fn test_exact_chunk_is_single_chunk() {
        let contents = vec![0x41u8; FILE_CHUNK_SIZE];
        let (dir, input) = fixture("exact.bin", &contents);
        let output = dir.path().join("exact.enc");

        encrypt_file(
            &input,
            &output,
            false,
            b"",
            ZERO_NONCE,
            &zero_header_key(),
            &EngineConfig::default(),
            &CancelFlag::new(),
        )
        .unwrap();

        assert_eq!(
            fs::metadata(&output).unwrap().len(),
            (ENCRYPTED_HEADER_SIZE + CIPHERTEXT_CHUNK_SIZE) as u64,
            "16 KiB fills exactly one chunk"
        );
    }

    #[test]
    fn test_chunk_boundaries_roundtrip() {
        for size in [
            FILE_CHUNK_SIZE - 1,
            FILE_CHUNK_SIZE,
            FILE_CHUNK_SIZE + 1,
            3 * FILE_CHUNK_SIZE,
        ] {
            let contents: Vec<u8> = (0..size).map(|i| (i % 251) as u8).collect();
            assert_eq!(roundtrip(&contents), contents, "size {size} must round-trip");
        }
    }

    #[test]
    fn test_one_past_chunk_uses_two_chunks() {
        let contents = vec![0x42u8; FILE_CHUNK_SIZE + 1];
        let (dir, input) = fixture("two.bin", &contents);
        let output = dir.path().join("two.enc");
        let restored = dir.path().join("two.dec");

        encrypt_file(
            &input,
            &output,
            false,
            b"",
            ZERO_NONCE,
            &zero_header_key(),
            &EngineConfig::default(),
            &CancelFlag::new(),
        )
        .unwrap();

        assert_eq!(
            fs::metadata(&output).unwrap().len(),
            (ENCRYPTED_HEADER_SIZE + 2 * CIPHERTEXT_CHUNK_SIZE) as u64
        );

        let info = decrypt_file(
            &output,
            &restored,
            b"",
            ZERO_NONCE,
            &zero_header_key(),
            &CancelFlag::new(),
        )
        .unwrap();
        assert_eq!(info.plaintext_length, (FILE_CHUNK_SIZE + 1) as u64);
        assert_eq!(fs::read(&restored).unwrap(), contents);
    }

    #[test]
    fn test_nonce_chain_is_contiguous() {
        let contents = vec![0x37u8; FILE_CHUNK_SIZE + 10];
        let (dir, input) = fixture("chain.bin", &contents);
        let output = dir.path().join("chain.enc");

        encrypt_file(
            &input,
            &output,
            false,
            b"",
            ZERO_NONCE,
            &zero_header_key(),
            &EngineConfig::default(),
            &CancelFlag::new(),
        )
        .unwrap();

        let encrypted = fs::read(&output).unwrap();
        let header = header::decrypt_header(
            &encrypted[..ENCRYPTED_HEADER_SIZE],
            2 * CIPHERTEXT_CHUNK_SIZE as u64,
            b"",
            &ZERO_NONCE,
            &zero_header_key(),
        )
        .unwrap();

        // Chunk i opens under seed + 1 + i and nothing else.
        let mut nonce = ZERO_NONCE;
        primitives::ct_increment_le(nonce.as_mut_slice());
        let chunk0 = aead::chacha20_blake2b_decrypt(
            &encrypted[ENCRYPTED_HEADER_SIZE..ENCRYPTED_HEADER_SIZE + CIPHERTEXT_CHUNK_SIZE],
            &nonce,
            header.file_key.as_bytes(),
            &[],
        )
        .unwrap();
        assert_eq!(&chunk0[..], &contents[..FILE_CHUNK_SIZE]);

        let swapped = aead::chacha20_blake2b_decrypt(
            &encrypted[ENCRYPTED_HEADER_SIZE + CIPHERTEXT_CHUNK_SIZE..],
            &nonce,
            header.file_key.as_bytes(),
            &[],
        );
        assert!(
            matches!(swapped, Err(KryptorError::Cryptographic)),
            "a chunk must not open under another chunk's nonce"
        );

        primitives::ct_increment_le(nonce.as_mut_slice());
        let chunk1 = aead::chacha20_blake2b_decrypt(
            &encrypted[ENCRYPTED_HEADER_SIZE + CIPHERTEXT_CHUNK_SIZE..],
            &nonce,
            header.file_key.as_bytes(),
            &[],
        )
        .unwrap();
        assert_eq!(&chunk1[..10], &contents[FILE_CHUNK_SIZE..]);
    }

    #[test]
    fn test_tampered_header_rejected_and_no_output() {
        let (dir, input) = fixture("t.bin", b"payload");
        let output = dir.path().join("t.enc");
        let restored = dir.path().join("t.dec");

        encrypt_file(
            &input,
            &output,
            false,
            b"",
            ZERO_NONCE,
            &zero_header_key(),
            &EngineConfig::default(),
            &CancelFlag::new(),
        )
        .unwrap();

        fileio::set_read_only(&output, false).unwrap();
        let mut encrypted = fs::read(&output).unwrap();
        encrypted[10] ^= 0x01;
        fs::write(&output, &encrypted).unwrap();

        let result = decrypt_file(
            &output,
            &restored,
            b"",
            ZERO_NONCE,
            &zero_header_key(),
            &CancelFlag::new(),
        );
        assert!(matches!(result, Err(KryptorError::Cryptographic)));
        assert!(!restored.exists(), "no partial plaintext may be left behind");
    }

    #[test]
    fn test_tampered_chunk_rejected() {
        let (dir, input) = fixture("t.bin", b"payload");
        let output = dir.path().join("t.enc");
        let restored = dir.path().join("t.dec");

        encrypt_file(
            &input,
            &output,
            false,
            b"",
            ZERO_NONCE,
            &zero_header_key(),
            &EngineConfig::default(),
            &CancelFlag::new(),
        )
        .unwrap();

        fileio::set_read_only(&output, false).unwrap();
        let mut encrypted = fs::read(&output).unwrap();
        let index = ENCRYPTED_HEADER_SIZE + 100;
        encrypted[index] ^= 0x80;
        fs::write(&output, &encrypted).unwrap();

        let result = decrypt_file(
            &output,
            &restored,
            b"",
            ZERO_NONCE,
            &zero_header_key(),
            &CancelFlag::new(),
        );
        assert!(matches!(result, Err(KryptorError::Cryptographic)));
        assert!(!restored.exists());
    }

    #[test]
    fn test_truncated_file_rejected() {
        let (dir, input) = fixture("t.bin", &vec![1u8; FILE_CHUNK_SIZE + 1]);
        let output = dir.path().join("t.enc");
        let restored = dir.path().join("t.dec");

        encrypt_file(
            &input,
            &output,
            false,
            b"",
            ZERO_NONCE,
            &zero_header_key(),
            &EngineConfig::default(),
            &CancelFlag::new(),
        )
        .unwrap();

        // Drop the final chunk entirely; the header's committed chunk count
        // no longer matches the measured size.
        fileio::set_read_only(&output, false).unwrap();
        let encrypted = fs::read(&output).unwrap();
        fs::write(&output, &encrypted[..encrypted.len() - CIPHERTEXT_CHUNK_SIZE]).unwrap();

        let result = decrypt_file(
            &output,
            &restored,
            b"",
            ZERO_NONCE,
            &zero_header_key(),
            &CancelFlag::new(),
        );
        assert!(matches!(result, Err(KryptorError::Cryptographic)));
    }

    #[test]
    fn test_wrong_unencrypted_headers_rejected() {
        let (dir, input) = fixture("t.bin", b"payload");
        let output = dir.path().join("t.enc");
        let restored = dir.path().join("t.dec");

        encrypt_file(
            &input,
            &output,
            false,
            b"ephemeral-public-key",
            ZERO_NONCE,
            &zero_header_key(),
            &EngineConfig::default(),
            &CancelFlag::new(),
        )
        .unwrap();

        let result = decrypt_file(
            &output,
            &restored,
            b"ephemeral-public-kez",
            ZERO_NONCE,
            &zero_header_key(),
            &CancelFlag::new(),
        );
        assert!(matches!(result, Err(KryptorError::Cryptographic)));
    }

    #[test]
    fn test_wrong_header_key_rejected() {
        let (dir, input) = fixture("t.bin", b"payload");
        let output = dir.path().join("t.enc");
        let restored = dir.path().join("t.dec");

        encrypt_file(
            &input,
            &output,
            false,
            b"",
            ZERO_NONCE,
            &zero_header_key(),
            &EngineConfig::default(),
            &CancelFlag::new(),
        )
        .unwrap();

        let result = decrypt_file(
            &output,
            &restored,
            b"",
            ZERO_NONCE,
            &HeaderKey::from_bytes([9u8; 32]),
            &CancelFlag::new(),
        );
        assert!(matches!(result, Err(KryptorError::Cryptographic)));
    }

    #[test]
    fn test_output_is_read_only() {
        let (dir, input) = fixture("ro.bin", b"data");
        let output = dir.path().join("ro.enc");

        encrypt_file(
            &input,
            &output,
            false,
            b"",
            ZERO_NONCE,
            &zero_header_key(),
            &EngineConfig::default(),
            &CancelFlag::new(),
        )
        .unwrap();

        assert!(fs::metadata(&output).unwrap().permissions().readonly());
        assert!(input.exists(), "input stays by default");
    }

    #[test]
    fn test_overwrite_policy_removes_input() {
        let (dir, input) = fixture("burn.bin", &vec![0x11u8; 5000]);
        let output = dir.path().join("burn.enc");

        let config = EngineConfig {
            overwrite_input: true,
            ..EngineConfig::default()
        };
        encrypt_file(
            &input,
            &output,
            false,
            b"",
            ZERO_NONCE,
            &zero_header_key(),
            &config,
            &CancelFlag::new(),
        )
        .unwrap();

        assert!(!input.exists(), "plaintext must be shredded");
        assert!(output.exists());
    }

    #[test]
    fn test_directory_input_is_deleted() {
        let (dir, input) = fixture("packed.bin", b"zipped directory bytes");
        let output = dir.path().join("packed.enc");

        encrypt_file(
            &input,
            &output,
            true,
            b"",
            ZERO_NONCE,
            &zero_header_key(),
            &EngineConfig::default(),
            &CancelFlag::new(),
        )
        .unwrap();

        assert!(!input.exists());
        let restored = dir.path().join("packed.dec");
        let info = decrypt_file(
            &output,
            &restored,
            b"",
            ZERO_NONCE,
            &zero_header_key(),
            &CancelFlag::new(),
        )
        .unwrap();
        assert!(info.is_directory);
    }

    #[test]
    fn test_cancellation_cleans_up() {
        let (dir, input) = fixture("c.bin", &vec![7u8; FILE_CHUNK_SIZE * 2]);
        let output = dir.path().join("c.enc");

        let cancel = CancelFlag::new();
        cancel.cancel();
        let result = encrypt_file(
            &input,
            &output,
            false,
            b"",
            ZERO_NONCE,
            &zero_header_key(),
            &EngineConfig::default(),
            &cancel,
        );

        assert!(matches!(result, Err(KryptorError::Cancelled)));
        assert!(!output.exists(), "cancelled runs must leave nothing behind");
        assert!(input.exists(), "the input is never touched on failure");

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(leftovers.len(), 1, "staging file must be removed: {leftovers:?}");
    }

    #[test]
    fn test_file_name_not_stored_by_default() {
        let (dir, input) = fixture("secret-name.txt", b"data");
        let output = dir.path().join("anon.enc");
        let restored = dir.path().join("anon.dec");

        encrypt_file(
            &input,
            &output,
            false,
            b"",
            ZERO_NONCE,
            &zero_header_key(),
            &EngineConfig::default(),
            &CancelFlag::new(),
        )
        .unwrap();

        let info = decrypt_file(
            &output,
            &restored,
            b"",
            ZERO_NONCE,
            &zero_header_key(),
            &CancelFlag::new(),
        )
        .unwrap();
        assert_eq!(info.file_name, None);
    }

    #[test]
    fn test_too_short_input_is_malformed() {
        let dir = tempdir().unwrap();
        let bogus = dir.path().join("bogus.enc");
        fs::write(&bogus, vec![0u8; 100]).unwrap();

        let result = decrypt_file(
            &bogus,
            &dir.path().join("out.bin"),
            b"",
            ZERO_NONCE,
            &zero_header_key(),
            &CancelFlag::new(),
        );
        assert!(matches!(result, Err(KryptorError::InvalidFormat(_))));
    }
}

//! File I/O policy: buffered sequential access, pre-sized writes, random
//! overwrite before deletion, read-only flagging, and collision-free
//! sibling names for in-progress output.

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use kryptor_core::KryptorResult;

use crate::{primitives, FILE_CHUNK_SIZE};

/// Open a file for sequential reading.
pub fn open_read(path: &Path) -> KryptorResult<File> {
    Ok(File::open(path)?)
}

/// Create (or truncate) a file for writing, pre-sized when the final
/// length is known up front.
pub fn create_write(path: &Path, size_hint: u64) -> KryptorResult<File> {
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    if size_hint > 0 {
        file.set_len(size_hint)?;
    }
    Ok(file)
}

/// Read until `buf` is full or the reader is exhausted, tolerating short
/// reads. Returns the number of bytes placed in `buf`.
pub fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let read = reader.read(&mut buf[filled..])?;
        if read == 0 {
            break;
        }
        filled += read;
    }
    Ok(filled)
}

/// Overwrite the file's current contents with random bytes of the same
/// length and flush them to disk. Clears a read-only flag first so the
/// rewrite cannot fail on our own output files.
pub fn overwrite_with_random(path: &Path) -> KryptorResult<()> {
    set_read_only(path, false)?;
    let length = fs::metadata(path)?.len();

    let mut file = OpenOptions::new().write(true).open(path)?;
    let mut block = vec![0u8; FILE_CHUNK_SIZE];
    let mut remaining = length;
    while remaining > 0 {
        let take = remaining.min(FILE_CHUNK_SIZE as u64) as usize;
        primitives::random_fill(&mut block[..take]);
        file.write_all(&block[..take])?;
        remaining -= take as u64;
    }
    file.sync_all()?;
    Ok(())
}

/// Overwrite with random bytes, then delete.
pub fn shred(path: &Path) -> KryptorResult<()> {
    overwrite_with_random(path)?;
    fs::remove_file(path)?;
    Ok(())
}

/// Delete a file, clearing a read-only flag if one is set.
pub fn delete_file(path: &Path) -> KryptorResult<()> {
    set_read_only(path, false)?;
    fs::remove_file(path)?;
    Ok(())
}

/// Set or clear the read-only flag.
pub fn set_read_only(path: &Path, read_only: bool) -> KryptorResult<()> {
    let mut permissions = fs::metadata(path)?.permissions();
    if permissions.readonly() != read_only {
        permissions.set_readonly(read_only);
        fs::set_permissions(path, permissions)?;
    }
    Ok(())
}

/// A randomly named sibling of `path`, for output that is renamed into
/// place only once it is complete. The random suffix comes from the
/// CSPRNG, so concurrent operations on the same target cannot collide.
pub fn random_sibling_path(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(
        "{file_name}.tmp.{}",
        primitives::random_alphanumeric(12)
    ))
}

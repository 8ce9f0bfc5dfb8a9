use thiserror::Error;

pub type KryptorResult<T> = Result<T, KryptorError>;

#[derive(Debug, Error)]
pub enum KryptorError {
    #[error("invalid format: {0}")]
    InvalidFormat(String),

    /// Authentication failure. Deliberately covers both a wrong
    /// password/keyfile and tampered ciphertext; callers must not be able
    /// to tell the two apart.
    #[error("incorrect password/keyfile, or the data has been tampered with")]
    Cryptographic,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("policy violation: {0}")]
    PolicyViolation(String),

    #[error("operation cancelled")]
    Cancelled,
}

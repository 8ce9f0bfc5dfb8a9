//! Password-protected private-key container.
//!
//! V2 layout (current, the only one written):
//! ```text
//! [4: algorithm header][4: version][16: salt]
//!   [32: key commitment][|key|: ciphertext][16: Poly1305 tag]
//! ```
//! AD = algorithm header || version. Nonce = 0^12 (the Argon2id salt is
//! fresh per container, so the zero nonce is never reused under a key).
//!
//! V1 layout (legacy, decrypt only):
//! ```text
//! [4: old algorithm header][4: version][16: salt][24: nonce]
//!   [ciphertext][16: BLAKE2b tag]
//! ```
//! V1 pins Argon2id iterations to 12; memory cost follows the engine
//! configuration, as it always has.

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;
use zeroize::Zeroizing;

use kryptor_core::{EngineConfig, KryptorError, KryptorResult};

use crate::keys::KeyAlgorithm;
use crate::{
    aead, primitives, KEY_HEADER_SIZE, KEY_SIZE, NONCE_SIZE, PRIVATE_KEY_VERSION1,
    PRIVATE_KEY_VERSION2, SALT_SIZE, TAG_SIZE, V1_ARGON2_ITERATIONS, XNONCE_SIZE,
};

const AD_SIZE: usize = KEY_HEADER_SIZE + PRIVATE_KEY_VERSION2.len();
const V2_PROLOGUE: usize = AD_SIZE + SALT_SIZE;
const V1_PROLOGUE: usize = AD_SIZE + SALT_SIZE + XNONCE_SIZE;

/// Encrypt a private key under a password. Always writes the current (V2)
/// format. Both the private key and the password are consumed and zeroized
/// here, whatever the outcome.
pub fn encrypt_private_key(
    private_key: Zeroizing<Vec<u8>>,
    password: SecretString,
    algorithm: KeyAlgorithm,
    config: &EngineConfig,
) -> KryptorResult<Vec<u8>> {
    let salt: [u8; SALT_SIZE] = primitives::random_array();
    let nonce = [0u8; NONCE_SIZE];

    let mut key = Zeroizing::new([0u8; KEY_SIZE]);
    primitives::argon2id(
        &mut key[..],
        password.expose_secret().as_bytes(),
        &salt,
        config.argon2_iterations,
        config.argon2_mem_cost_kib,
    )?;
    drop(password);

    let mut ad = [0u8; AD_SIZE];
    ad[..KEY_HEADER_SIZE].copy_from_slice(&algorithm.header());
    ad[KEY_HEADER_SIZE..].copy_from_slice(&PRIVATE_KEY_VERSION2);

    let sealed = aead::kc_chacha20_poly1305_encrypt(&private_key, &nonce, &key, &ad)?;

    let mut out = Vec::with_capacity(V2_PROLOGUE + sealed.len());
    out.extend_from_slice(&ad);
    out.extend_from_slice(&salt);
    out.extend_from_slice(&sealed);
    debug!(bytes = out.len(), "private key container sealed");
    Ok(out)
}

/// Decrypt a private-key container of either version. The version bytes in
/// the blob select the format; new material is only ever V2.
///
/// A wrong password and a tampered container are indistinguishable by
/// design: both surface as the same cryptographic error.
pub fn decrypt_private_key(
    container: &[u8],
    password: SecretString,
    config: &EngineConfig,
) -> KryptorResult<Zeroizing<Vec<u8>>> {
    if container.len() < V2_PROLOGUE {
        return Err(KryptorError::InvalidFormat(
            "private key container too short".into(),
        ));
    }

    let version = &container[KEY_HEADER_SIZE..AD_SIZE];
    if version == PRIVATE_KEY_VERSION2 {
        decrypt_v2(container, password, config)
    } else if version == PRIVATE_KEY_VERSION1 {
        decrypt_v1(container, password, config)
    } else {
        Err(KryptorError::PolicyViolation(
            "unsupported private key container version".into(),
        ))
    }
}

fn decrypt_v2(
    container: &[u8],
    password: SecretString,
    config: &EngineConfig,
) -> KryptorResult<Zeroizing<Vec<u8>>> {
    if KeyAlgorithm::from_header(&container[..KEY_HEADER_SIZE]).is_none() {
        return Err(KryptorError::InvalidFormat(
            "unrecognised key algorithm header".into(),
        ));
    }
    if container.len() < V2_PROLOGUE + aead::KC_OVERHEAD {
        return Err(KryptorError::InvalidFormat(
            "private key container too short".into(),
        ));
    }

    let ad = &container[..AD_SIZE];
    let mut salt = [0u8; SALT_SIZE];
    salt.copy_from_slice(&container[AD_SIZE..V2_PROLOGUE]);
    let sealed = &container[V2_PROLOGUE..];
    let nonce = [0u8; NONCE_SIZE];

    let mut key = Zeroizing::new([0u8; KEY_SIZE]);
    primitives::argon2id(
        &mut key[..],
        password.expose_secret().as_bytes(),
        &salt,
        config.argon2_iterations,
        config.argon2_mem_cost_kib,
    )?;
    drop(password);

    aead::kc_chacha20_poly1305_decrypt(sealed, &nonce, &key, ad)
}

fn decrypt_v1(
    container: &[u8],
    password: SecretString,
    config: &EngineConfig,
) -> KryptorResult<Zeroizing<Vec<u8>>> {
    if KeyAlgorithm::from_legacy_header(&container[..KEY_HEADER_SIZE]).is_none() {
        return Err(KryptorError::InvalidFormat(
            "unrecognised key algorithm header".into(),
        ));
    }
    if container.len() < V1_PROLOGUE + TAG_SIZE {
        return Err(KryptorError::InvalidFormat(
            "private key container too short".into(),
        ));
    }

    let ad = &container[..AD_SIZE];
    let mut salt = [0u8; SALT_SIZE];
    salt.copy_from_slice(&container[AD_SIZE..AD_SIZE + SALT_SIZE]);
    let mut nonce = [0u8; XNONCE_SIZE];
    nonce.copy_from_slice(&container[AD_SIZE + SALT_SIZE..V1_PROLOGUE]);
    let sealed = &container[V1_PROLOGUE..];

    let mut key = Zeroizing::new([0u8; KEY_SIZE]);
    primitives::argon2id(
        &mut key[..],
        password.expose_secret().as_bytes(),
        &salt,
        V1_ARGON2_ITERATIONS,
        config.argon2_mem_cost_kib,
    )?;
    drop(password);

    aead::xchacha20_blake2b_decrypt(sealed, &nonce, &key, ad)
}

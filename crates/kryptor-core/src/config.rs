use serde::{Deserialize, Serialize};

/// Process-scope engine options, set once at startup and read-only
/// thereafter. The driver builds one of these and passes it into every
/// engine call; the engine itself keeps no mutable global state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Overwrite the plaintext input with random bytes before deleting it
    /// after a successful encryption.
    pub overwrite_input: bool,
    /// Store the original file name inside the encrypted header.
    pub encrypt_file_names: bool,
    /// Number of items in the current batch (used for progress reporting).
    pub total_count: u64,
    /// Argon2id memory cost in KiB (default: 65536 = 64 MiB)
    pub argon2_mem_cost_kib: u32,
    /// Argon2id iterations for current key material (default: 3).
    /// Legacy V1 private-key containers pin their own iteration count.
    pub argon2_iterations: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            overwrite_input: false,
            encrypt_file_names: false,
            total_count: 0,
            argon2_mem_cost_kib: 65536,
            argon2_iterations: 3,
        }
    }
}

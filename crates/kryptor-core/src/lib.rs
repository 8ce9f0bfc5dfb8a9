//! kryptor-core: shared plumbing for the Kryptor encryption engine
//!
//! - `error`: the one error enum every engine operation surfaces
//! - `config`: process-scope options, set once at startup
//! - `types`: cancellation flag for cooperative abort between chunks

pub mod config;
pub mod error;
pub mod types;

pub use config::EngineConfig;
pub use error::{KryptorError, KryptorResult};
pub use types::CancelFlag;

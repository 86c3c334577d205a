//! Gold4X off-chain registry
//!
//! A single-collection user registry keyed by wallet address plus an
//! investment log keyed by transaction hash, served over four JSON routes.
//! Addresses are parsed into `WalletAddress` at the edge, so two spellings of
//! the same wallet always hit the same record.
//!
//! Storage is in-memory only.

pub mod error;
pub mod requests;
pub mod routes;
pub mod store;

pub use error::{RegistryError, RegistryResult};
pub use requests::{investment_record, parse_address, Registration};
pub use routes::{router, RegistryState};
pub use store::{MemoryRegistry, DEFAULT_MAX_RECORDS};

//! Gold4X Client Library
//!
//! Ports to the two external collaborators a Gold4X client talks to, and the
//! orchestration built on top of them:
//!
//! - **On-chain reads**: [`AccountReader`], assembled into an
//!   [`AccountSnapshot`](lib_types::AccountSnapshot) by [`SnapshotBuilder`]
//! - **Off-chain registry**: [`RegistryPort`], with an HTTP implementation in
//!   [`HttpRegistryClient`]
//! - **Registration**: [`RegistrationFlow`], the connect / referral / submit
//!   state machine
//!
//! All compensation math lives in `lib-compensation`; this crate only fetches
//! inputs and sequences calls.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use lib_client::{HttpRegistryClient, RegistrationFlow, SnapshotBuilder, StaticAccountReader};
//!
//! let registry = Arc::new(HttpRegistryClient::new("http://localhost:5000/api"));
//! let snapshots = SnapshotBuilder::new(Arc::new(StaticAccountReader::new()));
//! let mut flow = RegistrationFlow::new(registry, snapshots, Arc::new(rules));
//!
//! flow.connect(wallet).await?;
//! flow.submit_referral(referrer).await?;
//! ```

pub mod account_reader;
pub mod error;
pub mod registration;
pub mod registry_client;
pub mod snapshot;

pub use account_reader::{AccountReader, AccountTotals, StaticAccountReader};
pub use error::{ClientError, Result};
pub use registration::{RegistrationFlow, RegistrationState};
pub use registry_client::{HttpRegistryClient, RegistryPort};
pub use snapshot::SnapshotBuilder;

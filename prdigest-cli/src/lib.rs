//! # prdigest CLI Library
//!
//! Orchestration for the prdigest command: input resolution, the digest run
//! itself, and reporting the outcome back to the CI host.

pub mod cli;
pub mod digest;
pub mod error;
pub mod settings;

pub use digest::{RunReport, assemble, run};
pub use error::DigestError;
pub use settings::DigestSettings;

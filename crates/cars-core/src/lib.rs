//! cars-core
//!
//! Pure domain types and storage key conventions for CARS screening.
//! No I/O — this is the shared vocabulary of the scoring pipeline, the
//! storage backends and the command-line front end.

pub mod error;
pub mod keys;
pub mod models;

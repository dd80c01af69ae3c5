//! cars-storage
//!
//! Persistence for screening results. The scoring core never calls into
//! this crate; calling layers pick a backend and hand it finished records.
//!
//! Two interchangeable backends implement [`repository::AssessmentRepository`]:
//! [`local::LocalStore`] keeps every record in one JSON file, and
//! [`s3::S3Store`] keeps one JSON object per record in an S3 bucket.

pub mod error;
pub mod export;
pub mod local;
pub mod objects;
pub mod repository;
pub mod s3;
pub mod stats;

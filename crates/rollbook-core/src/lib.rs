//! Core types and trait definitions for the rollbook class scheduler.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it. The validation engine and the report pivot
//! are pure functions over in-memory records; storage backends feed them.

// We intentionally use native `async fn` in trait impls (stabilised in Rust
// 1.75). Suppress the advisory lint about `Send` bounds on the returned
// futures.
#![allow(async_fn_in_trait)]

pub mod assignment;
pub mod catalog;
pub mod error;
pub mod report;
pub mod schedule;
pub mod store;
pub mod teacher;
pub mod validate;

pub use error::{Error, Rejection, Result, parse_label};

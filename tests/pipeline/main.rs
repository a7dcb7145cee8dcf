//! Decode pipeline integration tests
//!
//! End-to-end runs of `Viewer::open` against real compressed files in a
//! temporary directory, with recording display and scripted consent.
//!
//! ```bash
//! cargo test --test pipeline
//! cargo test --test pipeline offload::
//! ```

#[path = "../common/mod.rs"]
mod common;

mod inline;
mod offload;

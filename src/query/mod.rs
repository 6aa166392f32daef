//! Query Module
//!
//! Read-only analogy queries against a committed store.

mod analogy;

pub use analogy::{AnalogyConfig, AnalogyEngine};

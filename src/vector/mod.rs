//! Vector Module
//!
//! Vector arithmetic shared by import normalization and analogy queries.

mod similarity;

pub use similarity::{dot_product, euclidean_distance, magnitude, unit};

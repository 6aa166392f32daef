//! Model Module
//!
//! Binary word2vec model decoding.

mod reader;

pub use reader::{ModelHeader, ModelReader, RawRecord};

//! Feature extraction module

mod extractor;

pub use extractor::{FeatureVector, DEFAULT_SLIDER_VALUE};

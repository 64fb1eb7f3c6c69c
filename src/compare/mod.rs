//! Multi-model comparison by Akaike Information Criterion.
//!
//! Responsibilities:
//!
//! - define the capability a model needs to be compared (`AicSource`)
//! - hold named models in insertion order (`NamedModels`)
//! - turn AIC values into delta AIC, relative likelihoods and Akaike weights

pub mod source;
pub mod weights;

pub use source::*;
pub use weights::*;

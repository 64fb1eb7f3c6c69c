//! Linear model fitting: formulas, design matrices and OLS fits.
//!
//! `OlsFit` implements `AicSource`, so fits can go straight into `compare`.

pub mod design;
pub mod formula;
pub mod ols;

pub use design::*;
pub use formula::*;
pub use ols::*;

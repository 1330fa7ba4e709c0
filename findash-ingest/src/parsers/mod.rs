//! Bank-specific statement layouts.

pub mod uob;

pub use uob::UOB_LAYOUTS;

#![forbid(unsafe_code)]
#![doc = "Common error types shared by the hitls digest crates."]

pub mod error;

pub use error::*;

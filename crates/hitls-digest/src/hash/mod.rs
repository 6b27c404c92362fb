//! Unified hash module.
//!
//! Re-exports every MD32-family hash context together with the common
//! [`Digest`] trait. Individual algorithms live in their own feature-gated
//! modules and share the streaming engine in [`crate::md32`].

pub use crate::md32::{Md32Algorithm, Md32Context};
pub use crate::provider::Digest;

#[cfg(feature = "md5")]
pub use crate::md5::Md5;

#[cfg(feature = "sha1")]
pub use crate::sha1::Sha1;

#[cfg(feature = "sha2")]
pub use crate::sha2::{Sha224, Sha256};

#[cfg(feature = "sm3")]
pub use crate::sm3::Sm3;

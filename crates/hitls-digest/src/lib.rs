#![forbid(unsafe_code)]
#![doc = "Streaming Merkle-Damgard digest engine and the 32-bit-word hash family built on it."]

// Core traits
pub mod provider;

// Shared streaming engine
pub mod md32;

// Hash algorithms
#[cfg(feature = "md5")]
pub mod md5;
#[cfg(feature = "sha1")]
pub mod sha1;
#[cfg(feature = "sha2")]
pub mod sha2;
#[cfg(feature = "sm3")]
pub mod sm3;

pub mod hash;

//! Tierra Madre Studio
//!
//! Photo normalization for emerald product imagery. The per-pixel algorithm
//! lives in the `emerald-tone` crate; this crate adds decoding, encoding,
//! batch runs and the studio's session and settings storage.

pub mod codec;
pub mod error;
pub mod models;
pub mod services;

//! Utilities Module
//!
//! Pure helpers that sit outside the wire format.

pub mod amounts;

//! Symbol catalogue data model.
//!
//! # Responsibility
//! - Define the immutable records shared by encoding, search and favorites.
//! - Reject malformed records while decoding, never while formatting.
//!
//! # Invariants
//! - Every symbol is identified by a stable string `id`.
//! - Every `unicode` label has been parsed into a valid scalar.

pub mod code_point;
pub mod language;
pub mod symbol;

//! Core types for Synthetic Home
//!
//! This crate provides the vocabulary shared by the device model compiler and
//! the entity simulators: the entity [`Platform`] set, symbolic constants in
//! `domain.EnumName.MEMBER` form, and the [`SymbolResolver`] seam through which
//! the presentation layer plugs its concrete values into the compiler.

mod platform;
mod symbol;
mod table;
mod vocabulary;

pub use platform::{Platform, PlatformError};
pub use symbol::{Symbol, SymbolError, SYMBOL_SHAPE};
pub use table::{SymbolResolver, SymbolTable};

/// Attribute carrying the bit-flag set of an entity
pub const ATTR_SUPPORTED_FEATURES: &str = "supported_features";

//! This crate defines the vocabulary every sqlfield crate relies on:
//! the supported sql dialects and the configurable array syntax.
#![warn(missing_docs)]

pub mod config;
pub mod dialect;

pub use config::ArraySyntax;
pub use dialect::Dialect;

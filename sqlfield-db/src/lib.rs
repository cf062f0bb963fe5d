//! This crate holds the types shared between `sqlfield` and a database driver.
//!
//! The field types in `sqlfield` receive a [`Value`] when scanning a column
//! and produce one when they are written back.
#![warn(missing_docs)]

/**
Errors of sqlfield-db will be specified here.
*/
pub mod error;

/**
The value exchanged with a database driver
*/
pub mod value;

pub use crate::error::Error;
pub use crate::value::Value;

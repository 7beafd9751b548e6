//! Error types for C# code generation.

use std::fmt;

use thiserror::Error;

/// Errors produced while rendering a compile unit to source text.
#[derive(Debug, Error)]
pub enum GenError {
    /// The DOM contains a construct the generator cannot express in C#.
    #[error("unsupported construct: {0}")]
    Unsupported(String),

    /// Writing into the output buffer failed.
    #[error("formatting error")]
    Fmt(#[from] fmt::Error),
}

pub type Result<T> = std::result::Result<T, GenError>;

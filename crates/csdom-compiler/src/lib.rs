//! Batch compilation against an external C# compiler.
//!
//! This crate adapts a "compile source to assembly" interface onto an
//! external `csc`-style executable. Requests arrive as source text, file
//! paths, or [`CompileUnit`](csdom_codegen::CompileUnit) values, singular
//! or batched, and are all normalized onto one on-disk file batch that a
//! [`CompilerBackend`] turns into [`CompilerResults`].
//!
//! Everything is synchronous and blocking. The request object owns the
//! temp files a call creates, and every entry point deletes them on every
//! exit path unless the collection is marked to keep them.

mod compiler;
mod csc;
mod error;
mod params;
mod provider;
mod results;
mod temp;

pub use compiler::{BatchCompiler, CodeCompiler, CompilerBackend};
pub use csc::CscBackend;
pub use error::{CompileError, Result};
pub use params::CompilerParameters;
pub use provider::{CompilerFactory, CscProvider};
pub use results::{CompilerResults, Diagnostic, Severity};
pub use temp::TempFileCollection;

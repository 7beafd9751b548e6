//! Error types for the compilation adapter.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the adapter itself.
///
/// A compilation the external compiler rejects is not an error here: it
/// comes back as `Ok` results carrying error diagnostics. These variants
/// cover failures around the invocation.
#[derive(Debug, Error)]
pub enum CompileError {
    /// A caller-supplied source file could not be opened for reading.
    #[error("failed to read source file {}", path.display())]
    SourceRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A materialized source file could not be written.
    #[error("failed to write generated source {}", path.display())]
    SourceWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Rendering a compile unit to source text failed.
    #[error("code generation failed")]
    Codegen(#[from] csdom_codegen::GenError),

    /// The external compiler could not be started or its output collected.
    #[error("failed to run compiler {}", program.display())]
    Invoke {
        program: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, CompileError>;

//! The mutable request object a compilation call consumes.

use std::path::PathBuf;

use crate::temp::TempFileCollection;

/// Caller-supplied configuration for a single compilation.
///
/// A call mutates its request: materialized sources are appended to
/// `temp_files`, referenced assemblies declared on compile units are
/// merged into `referenced_assemblies`, and a generated output path is
/// written back to `output_assembly` when the caller left it unset.
#[derive(Debug, Default)]
pub struct CompilerParameters {
    /// Path of the produced assembly. Allocated from `temp_files` when unset.
    pub output_assembly: Option<PathBuf>,
    /// Build an executable instead of a library.
    pub generate_executable: bool,
    /// Assemblies the compilation references, in first-seen order.
    pub referenced_assemblies: Vec<String>,
    /// Registry of temp files created on behalf of this request.
    pub temp_files: TempFileCollection,
    /// Extra compiler flags, forwarded verbatim.
    pub compiler_options: Vec<String>,
}

impl CompilerParameters {
    pub fn new() -> Self {
        Self::default()
    }
}

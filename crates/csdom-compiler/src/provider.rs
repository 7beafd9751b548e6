//! Provider factories that hand out compiler sessions.

use std::path::{Path, PathBuf};

use crate::compiler::{BatchCompiler, CodeCompiler};
use crate::csc::CscBackend;

/// Capability to create batch-compiler sessions.
///
/// Each `create_compiler` call returns a fresh session. Nothing is
/// validated until a session first runs the external process.
pub trait CompilerFactory {
    fn create_compiler(&self) -> Box<dyn CodeCompiler>;
}

/// Factory bound to the full path of an external `csc` executable.
pub struct CscProvider {
    csc_path: PathBuf,
}

impl CscProvider {
    /// Store the executable path. No validation, no side effects: a bad
    /// path surfaces only when a session tries to invoke it.
    pub fn new(csc_path: impl Into<PathBuf>) -> Self {
        Self {
            csc_path: csc_path.into(),
        }
    }

    pub fn csc_path(&self) -> &Path {
        &self.csc_path
    }
}

impl CompilerFactory for CscProvider {
    fn create_compiler(&self) -> Box<dyn CodeCompiler> {
        Box::new(BatchCompiler::new(CscBackend::new(self.csc_path.clone())))
    }
}

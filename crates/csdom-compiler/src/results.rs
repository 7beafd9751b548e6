//! Structured results of one compiler invocation.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// Severity of a compiler diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// One diagnostic reported by the external compiler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Source file the compiler attributed the diagnostic to, if any.
    pub file: Option<String>,
    /// 1-based line, or 0 when the compiler reported no position.
    pub line: u32,
    /// 1-based column, or 0 when the compiler reported no position.
    pub column: u32,
    pub severity: Severity,
    /// Compiler code such as `CS0103`.
    pub code: String,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "{}({},{}): ", file, self.line, self.column)?;
        }
        let severity = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{} {}: {}", severity, self.code, self.message)
    }
}

/// Outcome of one external-compiler invocation.
#[derive(Debug, Default, Serialize)]
pub struct CompilerResults {
    /// Parsed diagnostics, in output order.
    pub diagnostics: Vec<Diagnostic>,
    /// Every raw output line the compiler produced.
    pub output: Vec<String>,
    /// Process exit code, when the process ran to completion.
    pub native_return_code: Option<i32>,
    /// The produced artifact, set only when the compilation succeeded.
    pub path_to_assembly: Option<PathBuf>,
}

impl CompilerResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when any diagnostic has error severity.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity == Severity::Error)
    }

    /// Error-severity diagnostics only.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> + '_ {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_position() {
        let diagnostic = Diagnostic {
            file: Some("Program.cs".to_string()),
            line: 12,
            column: 8,
            severity: Severity::Error,
            code: "CS0103".to_string(),
            message: "The name 'x' does not exist".to_string(),
        };
        assert_eq!(
            diagnostic.to_string(),
            "Program.cs(12,8): error CS0103: The name 'x' does not exist"
        );
    }

    #[test]
    fn test_display_without_position() {
        let diagnostic = Diagnostic {
            file: None,
            line: 0,
            column: 0,
            severity: Severity::Warning,
            code: "CS1668".to_string(),
            message: "Invalid search path".to_string(),
        };
        assert_eq!(diagnostic.to_string(), "warning CS1668: Invalid search path");
    }

    #[test]
    fn test_has_errors() {
        let mut results = CompilerResults::new();
        results.diagnostics.push(Diagnostic {
            file: None,
            line: 0,
            column: 0,
            severity: Severity::Warning,
            code: "CS0168".to_string(),
            message: "unused variable".to_string(),
        });
        assert!(!results.has_errors());
        assert_eq!(results.errors().count(), 0);

        results.diagnostics.push(Diagnostic {
            file: None,
            line: 0,
            column: 0,
            severity: Severity::Error,
            code: "CS0103".to_string(),
            message: "unknown name".to_string(),
        });
        assert!(results.has_errors());
        assert_eq!(results.errors().count(), 1);
    }
}

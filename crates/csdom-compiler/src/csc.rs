//! External `csc` invocation: command assembly and output parsing.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::compiler::CompilerBackend;
use crate::error::{CompileError, Result};
use crate::params::CompilerParameters;
use crate::results::{CompilerResults, Diagnostic, Severity};

/// Matches one diagnostic line of compiler output: an optional
/// `file(line,col):` position, an optional tool prefix such as `csc :`,
/// then `error`/`warning`, the code, and the message.
static DIAGNOSTIC_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s*(?:(?P<file>.+?)\((?P<line>\d+),(?P<col>\d+)(?:,\d+,\d+)?\)\s*:\s*)?(?:[A-Za-z][\w.]*\s*:\s*)?(?:fatal\s+)?(?P<sev>error|warning)\s+(?P<code>[A-Za-z]+\d+)\s*:\s*(?P<msg>.*)$",
    )
    .unwrap()
});

/// Backend that drives an external `csc` executable.
///
/// The path is taken on trust. A missing or broken executable is
/// reported by the invocation itself, never at construction.
pub struct CscBackend {
    csc_path: PathBuf,
}

impl CscBackend {
    pub fn new(csc_path: impl Into<PathBuf>) -> Self {
        Self {
            csc_path: csc_path.into(),
        }
    }

    pub fn csc_path(&self) -> &Path {
        &self.csc_path
    }

    /// The output path for this request. When the caller left it unset, a
    /// kept temp path is allocated and written back into the request.
    fn resolve_output(options: &mut CompilerParameters) -> PathBuf {
        if let Some(path) = &options.output_assembly {
            return path.clone();
        }
        let extension = if options.generate_executable { "exe" } else { "dll" };
        let path = options.temp_files.add_extension(extension, true);
        options.output_assembly = Some(path.clone());
        path
    }

    /// Assemble the argument list for one invocation. Empty batch slots
    /// are skipped.
    fn command_line(
        options: &CompilerParameters,
        output: &Path,
        sources: &[Option<PathBuf>],
    ) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::new();
        args.push("/nologo".into());
        args.push("/utf8output".into());
        if options.generate_executable {
            args.push("/t:exe".into());
        } else {
            args.push("/t:library".into());
        }
        let mut out = OsString::from("/out:");
        out.push(output);
        args.push(out);
        for reference in &options.referenced_assemblies {
            args.push(format!("/r:{reference}").into());
        }
        for flag in &options.compiler_options {
            args.push(flag.into());
        }
        for source in sources.iter().flatten() {
            args.push(source.clone().into_os_string());
        }
        args
    }
}

impl CompilerBackend for CscBackend {
    fn compile_file_batch(
        &self,
        options: &mut CompilerParameters,
        sources: &[Option<PathBuf>],
    ) -> Result<CompilerResults> {
        let output_path = Self::resolve_output(options);
        let args = Self::command_line(options, &output_path, sources);
        tracing::debug!(
            program = %self.csc_path.display(),
            sources = sources.iter().flatten().count(),
            "invoking external compiler"
        );
        let output = Command::new(&self.csc_path)
            .args(&args)
            .output()
            .map_err(|e| CompileError::Invoke {
                program: self.csc_path.clone(),
                source: e,
            })?;

        let mut results = CompilerResults::new();
        results.native_return_code = output.status.code();
        collect_output(&mut results, &output.stdout);
        collect_output(&mut results, &output.stderr);
        if output.status.success() && !results.has_errors() {
            results.path_to_assembly = Some(output_path);
        }
        tracing::debug!(
            code = ?results.native_return_code,
            errors = results.errors().count(),
            "external compiler finished"
        );
        Ok(results)
    }
}

/// Record raw output lines and parse the ones that carry diagnostics.
fn collect_output(results: &mut CompilerResults, stream: &[u8]) {
    for line in String::from_utf8_lossy(stream).lines() {
        if let Some(diagnostic) = parse_line(line) {
            results.diagnostics.push(diagnostic);
        }
        results.output.push(line.to_string());
    }
}

/// Parse one output line into a diagnostic, if it follows the
/// `file(line,col): severity CODE: message` convention.
fn parse_line(line: &str) -> Option<Diagnostic> {
    let captures = DIAGNOSTIC_LINE.captures(line)?;
    let severity = match &captures["sev"] {
        "warning" => Severity::Warning,
        _ => Severity::Error,
    };
    Some(Diagnostic {
        file: captures.name("file").map(|m| m.as_str().trim().to_string()),
        line: captures
            .name("line")
            .map_or(0, |m| m.as_str().parse().unwrap_or(0)),
        column: captures
            .name("col")
            .map_or(0, |m| m.as_str().parse().unwrap_or(0)),
        severity,
        code: captures["code"].to_string(),
        message: captures["msg"].trim().to_string(),
    })
}

//! The batch compiler: six input shapes funneled onto one file batch.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use csdom_codegen::{CSharpGenerator, CompileUnit};

use crate::error::{CompileError, Result};
use crate::params::CompilerParameters;
use crate::results::CompilerResults;

/// The integration point: everything downstream of a materialized batch.
///
/// Implementations receive source paths in batch order. A slot may be
/// empty when the corresponding compile unit was absent; backends skip
/// empty slots when assembling work.
pub trait CompilerBackend {
    /// Compile a batch of on-disk source files.
    fn compile_file_batch(
        &self,
        options: &mut CompilerParameters,
        sources: &[Option<PathBuf>],
    ) -> Result<CompilerResults>;
}

/// One compilation session over a backend.
///
/// Accepts requests as source text, file paths, or compile units,
/// singular or batched, and funnels them all into the backend's file
/// batch. Temp files created along the way are deleted when each call
/// finishes unless the request's collection says otherwise.
pub trait CodeCompiler {
    /// Compile a single source string.
    fn compile_from_source(
        &self,
        options: &mut CompilerParameters,
        source: &str,
    ) -> Result<CompilerResults>;

    /// Compile a batch of source strings.
    fn compile_from_source_batch(
        &self,
        options: &mut CompilerParameters,
        sources: &[String],
    ) -> Result<CompilerResults>;

    /// Compile a single existing file.
    fn compile_from_file(
        &self,
        options: &mut CompilerParameters,
        file_name: &Path,
    ) -> Result<CompilerResults>;

    /// Compile a batch of existing files. Every path is checked before
    /// any compilation is attempted.
    fn compile_from_file_batch(
        &self,
        options: &mut CompilerParameters,
        file_names: &[PathBuf],
    ) -> Result<CompilerResults>;

    /// Compile a single compile unit.
    fn compile_from_dom(
        &self,
        options: &mut CompilerParameters,
        unit: &CompileUnit,
    ) -> Result<CompilerResults>;

    /// Compile a batch of compile units. Absent elements are skipped but
    /// keep their positional slot in the materialized batch.
    fn compile_from_dom_batch(
        &self,
        options: &mut CompilerParameters,
        units: &[Option<CompileUnit>],
    ) -> Result<CompilerResults>;
}

/// [`CodeCompiler`] over any [`CompilerBackend`].
pub struct BatchCompiler<B> {
    backend: B,
}

impl<B: CompilerBackend> BatchCompiler<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn from_source_batch(
        &self,
        options: &mut CompilerParameters,
        sources: &[String],
    ) -> Result<CompilerResults> {
        let mut files = Vec::with_capacity(sources.len());
        for (i, source) in sources.iter().enumerate() {
            let path = options.temp_files.add_extension(&format!("{i}.cs"), false);
            fs::write(&path, source).map_err(|e| CompileError::SourceWrite {
                path: path.clone(),
                source: e,
            })?;
            files.push(Some(path));
        }
        tracing::debug!(count = sources.len(), "materialized source batch");
        self.backend.compile_file_batch(options, &files)
    }

    fn from_file_batch(
        &self,
        options: &mut CompilerParameters,
        files: &[Option<PathBuf>],
    ) -> Result<CompilerResults> {
        self.backend.compile_file_batch(options, files)
    }

    fn from_dom_batch(
        &self,
        options: &mut CompilerParameters,
        units: &[Option<CompileUnit>],
    ) -> Result<CompilerResults> {
        let mut generator = CSharpGenerator::new();
        let mut files: Vec<Option<PathBuf>> = vec![None; units.len()];
        for (i, unit) in units.iter().enumerate() {
            // An absent unit keeps its slot empty rather than compacting
            // the batch, so file names still carry the original index.
            let unit = match unit {
                Some(unit) => unit,
                None => continue,
            };
            merge_referenced_assemblies(options, unit);
            let source = generator.generate(unit)?;
            let path = options.temp_files.add_extension(&format!("{i}.cs"), false);
            fs::write(&path, &source).map_err(|e| CompileError::SourceWrite {
                path: path.clone(),
                source: e,
            })?;
            files[i] = Some(path);
        }
        tracing::debug!(count = units.len(), "materialized compile units");
        self.backend.compile_file_batch(options, &files)
    }
}

impl<B: CompilerBackend> CodeCompiler for BatchCompiler<B> {
    fn compile_from_source(
        &self,
        options: &mut CompilerParameters,
        source: &str,
    ) -> Result<CompilerResults> {
        let sources = [source.to_owned()];
        let result = self.from_source_batch(options, &sources);
        options.temp_files.delete();
        result
    }

    fn compile_from_source_batch(
        &self,
        options: &mut CompilerParameters,
        sources: &[String],
    ) -> Result<CompilerResults> {
        let result = self.from_source_batch(options, sources);
        options.temp_files.delete();
        result
    }

    fn compile_from_file(
        &self,
        options: &mut CompilerParameters,
        file_name: &Path,
    ) -> Result<CompilerResults> {
        let result = ensure_readable(file_name)
            .and_then(|()| self.from_file_batch(options, &[Some(file_name.to_path_buf())]));
        options.temp_files.delete();
        result
    }

    fn compile_from_file_batch(
        &self,
        options: &mut CompilerParameters,
        file_names: &[PathBuf],
    ) -> Result<CompilerResults> {
        let result =
            validate_files(file_names).and_then(|files| self.from_file_batch(options, &files));
        options.temp_files.delete();
        result
    }

    fn compile_from_dom(
        &self,
        options: &mut CompilerParameters,
        unit: &CompileUnit,
    ) -> Result<CompilerResults> {
        let units = [Some(unit.clone())];
        let result = self.from_dom_batch(options, &units);
        options.temp_files.delete();
        result
    }

    fn compile_from_dom_batch(
        &self,
        options: &mut CompilerParameters,
        units: &[Option<CompileUnit>],
    ) -> Result<CompilerResults> {
        let result = self.from_dom_batch(options, units);
        options.temp_files.delete();
        result
    }
}

/// Open and immediately close a file to confirm it can be read.
fn ensure_readable(path: &Path) -> Result<()> {
    File::open(path).map(drop).map_err(|e| CompileError::SourceRead {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Check every path in the batch before any compilation is attempted.
fn validate_files(file_names: &[PathBuf]) -> Result<Vec<Option<PathBuf>>> {
    for file_name in file_names {
        ensure_readable(file_name)?;
    }
    Ok(file_names.iter().cloned().map(Some).collect())
}

/// Merge assembly names declared on a unit into the request, first-seen
/// order, skipping names already present.
fn merge_referenced_assemblies(options: &mut CompilerParameters, unit: &CompileUnit) {
    for name in &unit.referenced_assemblies {
        if !options.referenced_assemblies.contains(name) {
            options.referenced_assemblies.push(name.clone());
        }
    }
}

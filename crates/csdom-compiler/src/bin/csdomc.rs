use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use csdom_compiler::{CompilerFactory, CompilerParameters, CscProvider};

#[derive(Parser, Debug)]
#[command(name = "csdomc")]
#[command(about = "Compile C# sources through an external csc executable")]
#[command(version)]
struct Args {
    /// Input C# source files
    #[arg(value_name = "FILE", required = true)]
    inputs: Vec<PathBuf>,

    /// Full path to the csc executable
    #[arg(long, value_name = "PATH")]
    csc: PathBuf,

    /// Output assembly path (a temp path is chosen when omitted)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Produce an executable instead of a library
    #[arg(long)]
    exe: bool,

    /// Reference an assembly (repeatable)
    #[arg(short = 'r', long = "reference", value_name = "ASSEMBLY")]
    references: Vec<String>,

    /// Keep temp files instead of deleting them
    #[arg(long)]
    keep_temp: bool,

    /// Print diagnostics as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Extra flags passed to the compiler verbatim, after `--`
    #[arg(last = true, value_name = "FLAGS")]
    flags: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let fallback = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut options = CompilerParameters::new();
    options.output_assembly = args.output;
    options.generate_executable = args.exe;
    options.referenced_assemblies = args.references;
    options.compiler_options = args.flags;
    options.temp_files.set_keep_files(args.keep_temp);

    let provider = CscProvider::new(args.csc);
    let compiler = provider.create_compiler();
    let results = compiler
        .compile_from_file_batch(&mut options, &args.inputs)
        .context("compilation failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results.diagnostics)?);
    } else {
        for diagnostic in &results.diagnostics {
            eprintln!("{diagnostic}");
        }
    }

    match &results.path_to_assembly {
        Some(path) => {
            println!("Compilation successful! Output written to: {}", path.display());
        }
        None => {
            // Surface raw compiler output when nothing was parsed from it.
            if results.diagnostics.is_empty() {
                for line in &results.output {
                    eprintln!("{line}");
                }
            }
            eprintln!("Compilation failed");
            process::exit(1);
        }
    }

    Ok(())
}

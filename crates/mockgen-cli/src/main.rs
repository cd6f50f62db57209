//! mockgen command line interface.
//!
//! Provides the `mockgen` binary, which loads a JSON contract description,
//! generates a replaying mock for one contract, and writes it next to the
//! description. Uses the same `mockgen_codegen::generate()` pipeline the
//! library tests drive.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use mockgen_codegen::{GenerateOptions, GeneratedMock, SynthError};
use mockgen_core::{CoreError, DescriptionFile, Namespace};

/// Generate replaying mocks for trait contracts.
#[derive(Debug, Parser)]
#[command(name = "mockgen", about = "Generate replaying mocks for trait contracts")]
struct Cli {
    /// Name of the contract to mock.
    #[arg(long = "type", value_name = "NAME")]
    type_name: String,

    /// Output file (default: <input dir>/<type_snake>_mock.rs).
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Expectation helper name format; `%s` is replaced by the method name.
    #[arg(long, value_name = "FMT")]
    assert_name: Option<String>,

    /// Do not import the contract's own namespace.
    #[arg(long)]
    no_self_import: bool,

    /// Namespace the generated file lives in.
    #[arg(long, value_name = "NAMESPACE")]
    home: Option<String>,

    /// Additional qualified type name that is never recorded.
    #[arg(long = "exclude", value_name = "TYPE")]
    excludes: Vec<String>,

    /// Path of the runtime crate in generated code.
    #[arg(long, value_name = "PATH")]
    runtime: Option<String>,

    /// Log synthesis details to stderr.
    #[arg(short, long)]
    verbose: bool,

    /// Description file, or a directory containing mockgen.json.
    #[arg(value_name = "INPUT")]
    inputs: Vec<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    process::exit(run(cli));
}

/// Execute one generation run.
///
/// Returns exit code: 0 = success, 1 = load, synthesis or write error,
/// 2 = usage error, 3 = contract not found, 4 = not a contract.
fn run(cli: Cli) -> i32 {
    let input = match cli.inputs.as_slice() {
        [] => PathBuf::from("."),
        [single] => single.clone(),
        many => {
            eprintln!("Error: expected at most one input, got {}", many.len());
            return 2;
        }
    };

    let provider = match DescriptionFile::load(&input) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: failed to load '{}': {}", input.display(), e);
            return 1;
        }
    };

    let options = build_options(&cli);
    let generated = match mockgen_codegen::generate(&provider, &cli.type_name, &options) {
        Ok(g) => g,
        Err(SynthError::Core(CoreError::DeclarationNotFound { name })) => {
            eprintln!("Error: contract '{}' not found in '{}'", name, input.display());
            return 3;
        }
        Err(SynthError::Core(CoreError::NotAContract { name, kind })) => {
            eprintln!("Error: '{}' is a {}, not a contract", name, kind);
            return 4;
        }
        Err(e @ SynthError::InvalidHelperFormat { .. }) => {
            eprintln!("Error: {}", e);
            return 2;
        }
        Err(e) => {
            eprintln!("Generation error: {}", e);
            return 1;
        }
    };

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output(&input, &cli.type_name));
    if let Err(e) = fs::write(&output, &generated.source) {
        eprintln!("Error: failed to write '{}': {}", output.display(), e);
        return 1;
    }
    tracing::info!(output = %output.display(), "mock written");

    println!("{}", summary(&generated, &output));
    0
}

/// Map command line flags onto generation options.
fn build_options(cli: &Cli) -> GenerateOptions {
    let mut options = GenerateOptions::default();
    if let Some(format) = cli.assert_name.as_deref().filter(|f| !f.is_empty()) {
        options.assert_name = format.to_string();
    }
    options.no_self_import = cli.no_self_import;
    options.home = cli.home.as_deref().map(Namespace::new);
    options.excluded_types.extend(cli.excludes.iter().cloned());
    if let Some(runtime) = &cli.runtime {
        options.runtime_path = runtime.clone();
    }
    options
}

/// `<input dir>/<type_snake>_mock.rs`.
fn default_output(input: &Path, type_name: &str) -> PathBuf {
    let dir = if input.is_dir() {
        input
    } else {
        input.parent().unwrap_or_else(|| Path::new("."))
    };
    dir.join(format!("{}_mock.rs", to_snake_case(type_name)))
}

/// `HttpClient` -> `http_client`, `HTTPClient` -> `http_client`.
fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1);
            let boundary = match prev {
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_uppercase() => next.is_some_and(|n| n.is_lowercase()),
                _ => false,
            };
            if boundary {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(*c);
        }
    }
    out
}

/// Machine-readable description of a finished run.
fn summary(generated: &GeneratedMock, output: &Path) -> String {
    let dependencies: Vec<&str> = generated
        .model
        .dependencies
        .iter()
        .map(|d| d.path.as_str())
        .collect();
    let value = serde_json::json!({
        "output": output.display().to_string(),
        "contract": generated.model.contract.qualified_name(),
        "methods": generated.model.signatures.len(),
        "dependencies": dependencies,
    });
    serde_json::to_string_pretty(&value)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize summary: {}\"}}", e))
}

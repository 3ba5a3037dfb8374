// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use writ::backends::wasm::WasmtimeRuntime;
use writ::config::{Overrides, Settings};
use writ::engine::{
    check_expectation, load_batch, parse_expected, parse_json_args, run_batch, InvocationRequest,
    Orchestrator,
};
use writ::errors::{WritError, WritResult, EXIT_FAILURE, EXIT_SUCCESS};
use writ::observability::init_logging;
use writ::observability::messages::invocation::SettingsResolved;

/// Invoke a function exported by a WebAssembly module with JSON arguments.
#[derive(Parser, Debug)]
#[command(name = "writ", version, about)]
struct Cli {
    /// Interface description (WIT) of the module; enables typed calls
    #[arg(short = 'w', long = "wit", value_name = "FILE")]
    wit: Option<PathBuf>,

    /// Binding cache directory
    #[arg(short = 'c', long = "cache", value_name = "DIR")]
    cache: Option<PathBuf>,

    /// JSON file with one argument list per call
    #[arg(short = 'b', long = "batch", value_name = "FILE", conflicts_with_all = ["args", "expect"])]
    batch: Option<PathBuf>,

    /// Expected result, compared as JSON
    #[arg(short = 'e', long = "expect", value_name = "JSON")]
    expect: Option<String>,

    /// Log debug detail to stderr
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Compile with DWARF debug info
    #[arg(short = 'g', long = "debug-info")]
    debug_info: bool,

    /// Do not print results
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,

    /// Binding generator executable
    #[arg(long = "bindgen", value_name = "PATH")]
    bindgen: Option<PathBuf>,

    /// YAML config file
    #[arg(long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Module to load
    #[arg(value_name = "WASMFILE")]
    wasm_file: Option<PathBuf>,

    /// Exported function to call
    #[arg(value_name = "FUNCNAME")]
    function: Option<String>,

    /// Arguments, each a JSON value
    #[arg(value_name = "ARGS", allow_hyphen_values = true)]
    args: Vec<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            eprintln!("ERROR: {}", e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn run(cli: Cli) -> WritResult<i32> {
    let wasm_file = cli.wasm_file.ok_or(WritError::MissingInput("wasm file"))?;
    let function = cli.function.ok_or(WritError::MissingInput("function name"))?;

    let settings = Settings::resolve(&Overrides {
        cache_dir: cli.cache,
        bindgen: cli.bindgen,
        config: cli.config,
        debug_info: cli.debug_info,
    })?;
    tracing::debug!(
        "{}",
        SettingsResolved {
            cache_dir: &settings.cache_dir,
            config_file: settings.config_file.as_deref(),
        }
    );

    let orchestrator = Orchestrator::new(
        WasmtimeRuntime::new(settings.debug_info),
        settings.binding_cache()?,
    );
    let request = InvocationRequest {
        wasm_file,
        function,
        interface: cli.wit,
    };

    if let Some(batch) = cli.batch {
        let rows = load_batch(&batch)?;
        let prepared = orchestrator.prepare(&request)?;
        let mut failed = 0;
        for (row, result) in run_batch(&orchestrator, &prepared, &rows).into_iter().enumerate() {
            match result {
                Ok(rendered) if !cli.quiet => println!("{}", rendered),
                Ok(_) => {}
                Err(e) => {
                    failed += 1;
                    eprintln!("ERROR: row {}: {}", row, e);
                }
            }
        }
        return Ok(if failed == 0 { EXIT_SUCCESS } else { EXIT_FAILURE });
    }

    let args = parse_json_args(cli.args.as_slice())?;
    let outcome = orchestrator.run(&request, &args)?;
    if !cli.quiet {
        println!("{}", outcome.render()?);
    }
    if let Some(expected) = cli.expect {
        check_expectation(&outcome, &parse_expected(&expected))?;
    }
    Ok(EXIT_SUCCESS)
}

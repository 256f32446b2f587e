// Copyright (c) 2023 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions,
// more details in file LICENSE and CONTRIBUTING.

// `ippc23` runs one IPPcode23 XML program:
//
// - `$ ippc23 --source=prog.xml --input=data.txt`
// - `$ ippc23 --source=prog.xml` (reads stdin for `READ`)
// - `$ ippc23 < prog.xml` (both source and input default to stdin; `READ`
//   then reads whatever is left of stdin once the XML document has been
//   consumed)

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ippc23", disable_help_flag = true)]
struct Cli {
    /// path to the IPPcode23 XML program; defaults to stdin.
    #[arg(long)]
    source: Option<PathBuf>,

    /// path to the file `READ` consumes; defaults to stdin.
    #[arg(long)]
    input: Option<PathBuf>,

    #[arg(long)]
    help: bool,
}

const USAGE: &str = "\
usage: ippc23 [--source=FILE] [--input=FILE]
       ippc23 --help

--source and --input each default to stdin when omitted. --help cannot
be combined with --source or --input.";

fn main() -> ExitCode {
    init_logging();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(10);
        }
    };

    if cli.help {
        if cli.source.is_some() || cli.input.is_some() {
            eprintln!("--help cannot be combined with --source or --input");
            return ExitCode::from(10);
        }
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    match run(cli) {
        Ok(code) => exit_code(code),
        Err(err) => {
            eprintln!("{err}");
            exit_code(10)
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    let xml = read_to_string_or_stdin(cli.source.as_deref())?;
    let program = match ippvm_parser::load_program(&xml) {
        Ok(program) => program,
        Err(err) => {
            tracing::error!(%err, "failed to load program");
            return Ok(err.kind.exit_code());
        }
    };

    let mut input: Box<dyn BufRead> = match cli.input {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };
    let mut output = io::stdout().lock();

    match ippvm_runtime::execute(&program, &mut input, &mut output) {
        Ok(code) => Ok(code),
        Err(err) => {
            tracing::error!(%err, "execution failed");
            Ok(err.kind.exit_code())
        }
    }
}

fn read_to_string_or_stdin(path: Option<&std::path::Path>) -> anyhow::Result<String> {
    let mut text = String::new();
    match path {
        Some(path) => {
            File::open(path)?.read_to_string(&mut text)?;
        }
        None => {
            io::stdin().lock().read_to_string(&mut text)?;
        }
    }
    Ok(text)
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(code.clamp(0, 255) as u8)
}

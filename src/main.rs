use std::{
    fs,
    io::{self, IsTerminal, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::{Parser, ValueEnum};
use nu_ansi_term::Color;
use quill::{ast::indent_rendering, error::Error, interpreter::value::format::ValueFormatter};
use tracing_subscriber::{EnvFilter, fmt};

/// quill runs scripts written in a small dynamically typed language.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path of the script to run.
    script: PathBuf,

    /// When to color printed values.
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,

    /// Print the token stream before running.
    #[arg(long)]
    tokens: bool,

    /// Print the syntax tree before running.
    #[arg(long)]
    ast: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ColorChoice {
    /// Color only when stdout is a terminal.
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    fn enabled(self) -> bool {
        match self {
            Self::Auto => io::stdout().is_terminal(),
            Self::Always => true,
            Self::Never => false,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    // QUILL_LOG controls the log level, WARN when unset
    let filter = EnvFilter::try_from_env("QUILL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter)
         .with_writer(io::stderr)
         .with_target(false)
         .init();

    let source = match fs::read_to_string(&args.script) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Failed to read the script '{}': {e}", args.script.display());
            return ExitCode::FAILURE;
        },
    };

    let colored = args.color.enabled();
    match execute(&source, &args, colored) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.category());
            if colored {
                eprintln!("{}", Color::Red.paint(e.to_string()));
            } else {
                eprintln!("{e}");
            }
            ExitCode::FAILURE
        },
    }
}

fn execute(source: &str, args: &Args, colored: bool) -> Result<(), Error> {
    let tokens = quill::scan(source)?;
    let program = quill::parse(&tokens)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.tokens {
        for token in &tokens {
            print_debug(&mut out, &token.to_string());
        }
    }
    if args.ast {
        print_debug(&mut out, &indent_rendering(&program.to_string()));
    }

    quill::run(&program, &mut out, ValueFormatter::new(colored))?;
    Ok(())
}

fn print_debug(out: &mut impl Write, text: &str) {
    if let Err(e) = writeln!(out, "{text}") {
        tracing::warn!(error = %e, "failed to write debug output");
    }
}

//! contas CLI

use clap::{Args, Parser, Subcommand};
use contas_error::{DiagnosticRenderer, SourceCache};
use contas_eval::{evaluate, evaluate_str, EvalError, ReaderSource, Value, STACK_SIZE};
use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::PathBuf;
use std::thread;
use tracing::{info, warn, Level};

#[derive(Parser)]
#[command(name = "contas")]
#[command(author = "Guilherme Mendes")]
#[command(version = "0.1.0")]
#[command(about = "Integer expression evaluator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Disables colored diagnostics
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluates one expression and prints its value
    Eval {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Checks that an expression is well formed without printing its value
    Check {
        #[command(flatten)]
        input: InputArgs,
    },
}

// Without EXPR or --file, one line is read from stdin
#[derive(Args, Debug)]
struct InputArgs {
    /// Expression to evaluate
    #[arg(value_name = "EXPR", conflicts_with = "file")]
    expr: Option<String>,

    /// Reads the expression from the first line of a file
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,
}

/// An evaluation together with the text it read
struct Outcome {
    /// Input name shown in diagnostics
    name: String,
    /// Characters consumed by the evaluator
    text: String,
    result: contas_eval::Result<Value>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let use_colors = !cli.no_color && io::stderr().is_terminal();

    match cli.command {
        Commands::Eval { input } => {
            let outcome = evaluate_on_large_stack(&input);
            match &outcome.result {
                Ok(value) => println!("{}", value),
                Err(error) => fail(&outcome, error, use_colors),
            }
        }

        Commands::Check { input } => {
            let outcome = evaluate_on_large_stack(&input);
            match &outcome.result {
                Ok(_) => println!("ok"),
                Err(error) => fail(&outcome, error, use_colors),
            }
        }
    }
}

/// Logs go to stderr so stdout only carries results
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .try_init();
}

/// Runs the evaluator on a thread whose stack fits the deepest accepted nesting
fn evaluate_on_large_stack(input: &InputArgs) -> Outcome {
    thread::scope(|scope| {
        let spawned = thread::Builder::new()
            .name("evaluator".to_string())
            .stack_size(STACK_SIZE)
            .spawn_scoped(scope, || evaluate_input(input));

        match spawned {
            Ok(handle) => handle
                .join()
                .unwrap_or_else(|panic| std::panic::resume_unwind(panic)),
            Err(e) => {
                warn!(error = %e, "could not spawn evaluator thread, evaluating in place");
                evaluate_input(input)
            }
        }
    })
}

fn evaluate_input(input: &InputArgs) -> Outcome {
    if let Some(expr) = &input.expr {
        info!(source = "argument", "evaluating expression");
        return Outcome {
            name: "<expr>".to_string(),
            text: expr.clone(),
            result: evaluate_str(expr),
        };
    }

    if let Some(path) = &input.file {
        info!(source = %path.display(), "evaluating expression");
        let name = path.display().to_string();

        return match File::open(path) {
            Ok(file) => {
                let mut source = ReaderSource::new(BufReader::new(file));
                let result = evaluate(&mut source);
                Outcome {
                    name,
                    text: source.into_text(),
                    result,
                }
            }
            Err(e) => Outcome {
                name,
                text: String::new(),
                result: Err(e.into()),
            },
        };
    }

    info!(source = "stdin", "evaluating expression");
    let stdin = io::stdin();
    let mut source = ReaderSource::new(stdin.lock());
    let result = evaluate(&mut source);

    Outcome {
        name: "<stdin>".to_string(),
        text: source.into_text(),
        result,
    }
}

/// Reports a failed evaluation and exits
fn fail(outcome: &Outcome, error: &EvalError, use_colors: bool) -> ! {
    match error {
        EvalError::Parse(parse_error) => {
            let mut cache = SourceCache::new();
            let file_id = cache.add(outcome.name.as_str(), outcome.text.as_str());

            let mut renderer = DiagnosticRenderer::new(&cache);
            if !use_colors {
                renderer = renderer.without_colors();
            }

            eprintln!("{}", renderer.render(&parse_error.to_diagnostic(file_id)));
        }
        EvalError::Io(e) => {
            eprintln!("error: could not read {}: {}", outcome.name, e);
        }
    }

    std::process::exit(1);
}

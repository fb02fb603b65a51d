use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use clap::Subcommand;
use env_logger::Builder;
use log::{debug, info};
use memmap2::Mmap;

use rox::ast_printer::AstPrinter;
use rox::interpreter::Interpreter;
use rox::parser::Parser;
use rox::{run_source, scan, LoxError};

/// Exit code for lexical, syntax and semantic errors.
const EXIT_DATA_ERR: i32 = 65;
/// Exit code for runtime errors.
const EXIT_SOFTWARE: i32 = 70;

#[derive(ClapParser, Debug)]
#[command(version, about = "Lox language interpreter", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    commands: Option<Commands>,

    /// Enable logging to app.log
    #[arg(long, global = true)]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tokenizes input from a file, printing each token
    Tokenize {
        filename: PathBuf,

        /// Emit the token list as JSON instead of one token per line
        #[arg(long)]
        json: bool,
    },

    /// Parses input from a file as a single expression and prints its AST
    Parse { filename: PathBuf },

    /// Evaluates input from a file as a single expression and prints the result
    Evaluate { filename: PathBuf },

    /// Runs input from a file as a Lox program
    Run { filename: PathBuf },

    /// Starts an interactive prompt (the default without a subcommand)
    Repl,
}

/// Memory-maps a source file and copies it out as validated UTF-8.
fn read_file(filename: &PathBuf) -> Result<String> {
    info!("Reading file: {:?}", filename);
    let file = File::open(filename).context(format!("Failed to open file {:?}", filename))?;

    let len = file
        .metadata()
        .context(format!("Failed to stat file {:?}", filename))?
        .len();

    if len == 0 {
        return Ok(String::new());
    }

    // SAFETY: the map is read once, immediately copied, and dropped; the file
    // is not expected to be truncated concurrently.
    let map = unsafe { Mmap::map(&file) }.context(format!("Failed to map file {:?}", filename))?;

    let text = std::str::from_utf8(&map)
        .context(format!("File {:?} is not valid UTF-8", filename))?
        .to_owned();

    info!("Read {} bytes from {:?}", text.len(), filename);

    Ok(text)
}

fn init_logger() -> Result<()> {
    let log_file = File::create("app.log").context("Failed to create app.log")?;

    Builder::new()
        .format(|buf, record| {
            let module = record
                .module_path()
                .unwrap_or("<unnamed>")
                .strip_prefix("rox::")
                .unwrap_or(record.module_path().unwrap_or("<unnamed>"));
            writeln!(
                buf,
                "[{}:{}] - {}",
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug)
        .init();

    info!("Logger initialized, writing to app.log");
    Ok(())
}

fn report(errors: &[LoxError]) {
    for e in errors {
        eprintln!("{}", e);
    }
}

/// 65 unless every error is a runtime one.
fn exit_code(errors: &[LoxError]) -> i32 {
    if errors.iter().all(LoxError::is_runtime) {
        EXIT_SOFTWARE
    } else {
        EXIT_DATA_ERR
    }
}

fn tokenize(filename: PathBuf, json: bool) -> Result<()> {
    let source = read_file(&filename)?;
    let (tokens, errors) = scan(&source);

    report(&errors);

    if json {
        println!("{}", serde_json::to_string_pretty(&tokens)?);
    } else {
        for token in &tokens {
            println!("{}", token);
        }
    }

    if !errors.is_empty() {
        debug!("Tokenization failed, exiting with code {}", EXIT_DATA_ERR);
        std::process::exit(EXIT_DATA_ERR);
    }

    Ok(())
}

fn parse_expression(filename: PathBuf) -> Result<rox::expr::Expr> {
    let source = read_file(&filename)?;
    let (tokens, errors) = scan(&source);

    if !errors.is_empty() {
        report(&errors);
        std::process::exit(EXIT_DATA_ERR);
    }

    match Parser::new(&tokens).parse_expression() {
        Ok(expr) => Ok(expr),
        Err(e) => {
            report(&[e]);
            std::process::exit(EXIT_DATA_ERR);
        }
    }
}

fn run_file(filename: PathBuf) -> Result<()> {
    let source = read_file(&filename)?;
    let mut interpreter = Interpreter::new();

    if let Err(errors) = run_source(&mut interpreter, &source) {
        report(&errors);
        std::process::exit(exit_code(&errors));
    }

    info!("Program executed successfully");
    Ok(())
}

fn repl() -> Result<()> {
    let mut interpreter = Interpreter::new();
    let stdin = io::stdin();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            println!();
            break;
        }

        let input = line.trim();
        if input == "exit" {
            break;
        }

        if let Err(errors) = run_source(&mut interpreter, input) {
            report(&errors);
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    if args.log {
        init_logger()?;
    } else {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .init();
    }

    info!("CLI arguments: {:?}", args);

    match args.commands.unwrap_or(Commands::Repl) {
        Commands::Tokenize { filename, json } => tokenize(filename, json)?,

        Commands::Parse { filename } => {
            let expr = parse_expression(filename)?;
            println!("{}", AstPrinter::print(&expr));
        }

        Commands::Evaluate { filename } => {
            let expr = parse_expression(filename)?;
            let mut interpreter = Interpreter::new();

            match interpreter.evaluate(&expr) {
                Ok(value) => println!("{}", value),
                Err(e) => {
                    report(&[e]);
                    std::process::exit(EXIT_SOFTWARE);
                }
            }
        }

        Commands::Run { filename } => run_file(filename)?,

        Commands::Repl => repl()?,
    }

    Ok(())
}

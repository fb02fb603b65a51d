//! Whole‑pipeline helper for hosts: scan → parse → resolve → interpret.

use log::{debug, info};

use crate::error::LoxError;
use crate::interpreter::Interpreter;
use crate::parser::parse;
use crate::scanner::scan;

/// Run one source text against `interpreter`.
///
/// Lexical and syntax errors are gathered together (the parser still runs
/// over whatever tokens were produced) and stop the pipeline before
/// resolution; semantic errors stop it before interpretation.  A runtime
/// error aborts the batch but leaves `interpreter` usable, so an interactive
/// session can keep going.
pub fn run_source(interpreter: &mut Interpreter, source: &str) -> Result<(), Vec<LoxError>> {
    let (tokens, mut errors) = scan(source);

    let (statements, parse_errors) = parse(&tokens);
    errors.extend(parse_errors);

    if !errors.is_empty() {
        debug!("Stopping after parse with {} error(s)", errors.len());
        return Err(errors);
    }

    let errors = interpreter.resolve(&statements);
    if !errors.is_empty() {
        debug!("Stopping after resolve with {} error(s)", errors.len());
        return Err(errors);
    }

    info!("Running {} statement(s)", statements.len());

    interpreter.interpret(&statements).map_err(|e| vec![e])
}

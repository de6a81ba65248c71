//! Console front end: collect source lines up to a `#` sentinel, run the
//! pipeline, and print the requested stage dumps.

use std::io::{self, BufRead, IsTerminal, Write};

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use thiserror::Error;

use crate::backend::asm::AsmBackend;
use crate::backend::Backend;
use crate::config::PipelineOptions;
use crate::errors::{pretty, CompileError};
use crate::runtime::Execution;
use crate::{ir, lexer, parser, stage};

/// A line consisting of exactly this text ends the source.
pub const SENTINEL: &str = "#";

const PROMPT: &str = "tinyc> ";

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("line editor error: {0}")]
    Readline(#[from] ReadlineError),
    #[error("{0}")]
    Compile(#[from] CompileError),
}

/// Read lines until the sentinel or end of input.
pub fn read_until_sentinel<R: BufRead>(reader: R) -> io::Result<String> {
    let mut source = String::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line == SENTINEL {
            break;
        }
        source.push_str(line);
        source.push('\n');
    }
    Ok(source)
}

/// Read program text from stdin, using a line editor on a terminal.
pub fn read_stdin() -> Result<String, DriverError> {
    if !io::stdin().is_terminal() {
        return Ok(read_until_sentinel(io::stdin().lock())?);
    }

    println!("Enter your source code (end with {} on a new line):", SENTINEL);
    let mut editor = DefaultEditor::new()?;
    let mut source = String::new();
    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                if line.trim_end() == SENTINEL {
                    break;
                }
                let _ = editor.add_history_entry(line.as_str());
                source.push_str(&line);
                source.push('\n');
            }
            Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => break,
            Err(err) => return Err(err.into()),
        }
    }
    Ok(source)
}

/// Run every stage, writing the dumps `options.emit` asks for, then the
/// program output.
pub fn run_source<W: Write>(
    source: &str,
    source_label: &str,
    options: &PipelineOptions,
    out: &mut W,
) -> Result<Execution, DriverError> {
    let emit = options.emit;

    let tokens = stage::lex(source);
    if emit.tokens {
        writeln!(out, "\n--- Tokens ---")?;
        write!(out, "{}", lexer::render_tokens(&tokens))?;
    }

    let program = match stage::parse(tokens) {
        Ok(program) => program,
        Err(err) => {
            writeln!(out, "{}", pretty::format_parse_error(source_label, source, &err))?;
            return Err(CompileError::Syntax(err).into());
        }
    };
    if emit.tree {
        writeln!(out, "\n--- Parse Tree ---")?;
        write!(out, "{}", parser::printer::render_tree(&program))?;
    }

    let checked = stage::analyze(&program);
    let diagnostics = checked.as_ref().err().map(CompileError::diagnostics).unwrap_or(&[]);
    if emit.diagnostics || !diagnostics.is_empty() {
        writeln!(out, "\n--- Semantic Analysis ---")?;
        if diagnostics.is_empty() {
            writeln!(out, "No semantic errors.")?;
        }
        for line in pretty::format_diagnostics(diagnostics) {
            writeln!(out, "{}", line)?;
        }
    }
    if let Err(err) = checked {
        writeln!(out, "\nCompilation stopped due to semantic errors.")?;
        return Err(err.into());
    }

    let ir = stage::generate(&program);
    if emit.ir {
        writeln!(out, "\n--- Intermediate Code ---")?;
        write!(out, "{}", ir::printer::render_program(&ir))?;
    }

    let code = stage::optimize(&ir, options.optimize);
    if options.optimize && emit.optimized {
        writeln!(out, "\n--- Optimized Code ---")?;
        write!(out, "{}", ir::printer::render_program(&code))?;
    }

    if emit.asm {
        let backend = AsmBackend::new();
        writeln!(out, "\n--- Assembly ({}) ---", backend.name())?;
        write!(out, "{}", backend.generate(&code))?;
    }

    let execution = stage::execute(&code);
    if emit.any() {
        writeln!(out, "\n--- Output ---")?;
    }
    for line in &execution.output {
        writeln!(out, "{}", line)?;
    }
    Ok(execution)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stops_reading_at_sentinel_line() {
        let input = "mainn(){\r\nprrint(1);\n}\n#\nignored\n";
        let source = read_until_sentinel(input.as_bytes()).expect("read");
        assert_eq!(source, "mainn(){\nprrint(1);\n}\n");
    }

    #[test]
    fn reads_to_eof_without_sentinel() {
        let source = read_until_sentinel("a\nb".as_bytes()).expect("read");
        assert_eq!(source, "a\nb\n");
    }
}

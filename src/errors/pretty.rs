use crate::parser::ParseError;
use crate::semantic::Diagnostic;

/// `line` followed by a caret under the 1-based `column`.
pub fn underline(line: &str, column: usize) -> String {
    let padding = " ".repeat(column.saturating_sub(1));
    format!("{}\n{}^", line, padding)
}

/// Message, location, and the offending source line with a caret.
pub fn format_parse_error(source_label: &str, source: &str, err: &ParseError) -> String {
    let mut rendered = format!("{}\n--> {}:{}:{}", err, source_label, err.line, err.column);
    if let Some(line) = source.lines().nth(err.line.saturating_sub(1)) {
        rendered.push('\n');
        rendered.push_str(&underline(line, err.column));
    }
    rendered
}

pub fn format_diagnostics(diagnostics: &[Diagnostic]) -> Vec<String> {
    diagnostics.iter().map(ToString::to_string).collect()
}

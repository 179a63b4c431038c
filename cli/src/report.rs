//! Terminal rendering of diagnostics, rustc style:
//!
//! ```text
//! error[BS0001]: Methods not awaitable
//!  --> src/services.rs:3:24
//!   |
//! 3 |     fn count(&self) -> u64;
//!   |                        ^^^ The method `count(&self)` returning `u64` must be awaitable. ...
//! ```

use colored::Colorize;
use std::fs;
use svcgen_core::Diagnostic;

/// Renders `diagnostic`, reading the offending line from its file.
pub fn render(diagnostic: &Diagnostic) -> String {
    let code = fs::read_to_string(&diagnostic.location.file).ok();
    render_with_source(diagnostic, code.as_deref())
}

/// Renders `diagnostic` against `code`, the full text of its file.
///
/// Falls back to a single line when the location does not point into `code`.
pub fn render_with_source(diagnostic: &Diagnostic, code: Option<&str>) -> String {
    let location = &diagnostic.location;
    let code_line = code
        .and_then(|code| code.lines().nth(location.line.checked_sub(1)?))
        .filter(|line| location.column >= 1 && location.column <= line.chars().count() + 1);

    let heading = format!(
        "{}{}",
        format!("error[{}]", diagnostic.code).red().bold(),
        format!(": {}", diagnostic.rule.title()).bold()
    );

    let code_line = match code_line {
        Some(line) => line,
        None => return format!("{}\n{} {}", heading, "-->".blue().bold(), diagnostic),
    };

    let offset = location.column - 1;
    let width = token_width(code_line, offset);
    let indent = " ".repeat(location.line.to_string().len());

    format!(
        "{heading}\n\
         {indent}{arrow} {location}\n\
         {indent} {pipe}\n\
         {label} {pipe} {code}\n\
         {indent} {pipe} {offset}{underline} {message}",
        heading = heading,
        indent = indent,
        arrow = "-->".blue().bold(),
        location = location,
        pipe = "|".blue().bold(),
        label = location.line.to_string().blue().bold(),
        code = code_line.trim_end(),
        offset = " ".repeat(offset),
        underline = "^".repeat(width).red().bold(),
        message = diagnostic.message.red(),
    )
}

/// Width of the token starting at character `offset`; at least one.
fn token_width(line: &str, offset: usize) -> usize {
    line.chars()
        .skip(offset)
        .take_while(|c| !c.is_whitespace() && !matches!(c, ',' | ';' | ':' | ')' | '{'))
        .count()
        .max(1)
}

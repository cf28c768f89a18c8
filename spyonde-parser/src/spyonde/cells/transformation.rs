//! Cell transformation
//!
//! Markdown
//!     A separator line becomes a `# ` heading holding its title, or disappears when it
//!     has none. A line starting with `#` loses it and the whitespace character after
//!     it; any other line, an indented comment included, is kept as written.
//!
//! Code
//!     Content lines are left alone. Trailing blank lines are dropped, as is the
//!     separator line that opened the cell and any bare separators right after it. A
//!     comment that still starts with `#%%` or `# %%` keeps only the `#`. Only real
//!     comment tokens are rewritten; the same text inside a string literal is content.

use super::{is_blank, is_comment, Cell, CellKind};
use crate::spyonde::lexing::{tokenize, TokenKind};
use crate::spyonde::markers::CellMarkers;
use crate::spyonde::source::Source;
use std::collections::HashSet;

/// Apply the transformation matching the cell's kind
pub fn transform(cell: Cell, markers: &CellMarkers) -> Cell {
    let lines = match cell.kind {
        CellKind::Markdown => to_markdown(&cell.lines, markers),
        CellKind::Code => to_code(cell.lines, markers),
    };
    Cell::new(cell.kind, lines)
}

pub fn to_markdown(lines: &[String], markers: &CellMarkers) -> Vec<String> {
    let mut markdown = Vec::with_capacity(lines.len());
    for line in lines {
        if markers.is_separator(line) {
            let title = markers.separator_title(line);
            if !title.is_empty() {
                markdown.push(format!("# {}", title));
            }
        } else {
            markdown.push(uncomment(line).trim_end().to_string());
        }
    }
    markdown
}

/// Strip a leading `#` and a single whitespace character after it
fn uncomment(line: &str) -> &str {
    match line.strip_prefix('#') {
        Some(rest) => {
            let mut chars = rest.chars();
            match chars.next() {
                Some(c) if c.is_whitespace() => chars.as_str(),
                _ => rest,
            }
        }
        None => line,
    }
}

pub fn to_code(mut lines: Vec<String>, markers: &CellMarkers) -> Vec<String> {
    while lines.last().is_some_and(|line| is_blank(line)) {
        lines.pop();
    }

    let mut head = 0;
    if lines
        .first()
        .is_some_and(|line| markers.is_separator(line) && !markers.is_bare_separator(line))
    {
        head = 1;
    }
    while lines
        .get(head)
        .is_some_and(|line| markers.is_bare_separator(line))
    {
        head += 1;
    }

    let mut code = lines.split_off(head);
    for index in comment_lines(&code) {
        code[index] = markers.rewrite_separator_comment(&code[index]);
    }
    code
}

/// Indices of lines that hold nothing but a comment token.
///
/// A cell never starts inside a string, so tokenizing it on its own sees the same
/// strings the whole file did. Tokens after a lexing error are not trusted.
fn comment_lines(lines: &[String]) -> HashSet<usize> {
    let source = Source::new(lines.join("\n"));
    let comments = tokenize(&source)
        .map_while(Result::ok)
        .filter(|token| token.kind == TokenKind::Comment && is_comment(token.line.text))
        .map(|token| token.line.index)
        .collect();
    comments
}

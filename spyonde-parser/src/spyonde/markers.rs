//! Cell boundary detection
//!
//!     Three line predicates drive the whole conversion. All of them look at the line
//!     with its leading whitespace removed.
//!
//!     Separator
//!         Starts with one of `#%%`, `# %%`, `# <codecell>`, or matches `#`, optional
//!         whitespace, `%%` and a non-empty run of non-whitespace glued to it. The two
//!         rules disagree on lines such as `#  %% note` (rejected) versus `#  %%note`
//!         (accepted); both are kept as they are, following the editor conventions they
//!         come from.
//!
//!     Bare separator
//!         `#`, `%%` or `<codecell>`, and nothing else but whitespace.
//!
//!     Ignore marker
//!         `# spyonde: ignore-cell` (or `=`), any amount of `#` and whitespace around.
//!
//!     The patterns are compiled once per [`CellMarkers`] value, which the caller owns
//!     through its [`ConversionContext`](crate::spyonde::context::ConversionContext).

use crate::spyonde::lexing::{Token, TokenKind};
use regex::Regex;

/// Literal separator prefixes recognised by Spyder and IPython
pub const SEPARATOR_PREFIXES: [&str; 3] = ["#%%", "# %%", "# <codecell>"];

/// The separator token a code comment starts with, in the two forms rewritten in code cells
const CODE_SEPARATOR_TOKENS: [&str; 2] = ["#%%", "# %%"];

const SEPARATOR_PATTERN: &str = r"^#\s*%%\S+";
const BARE_PERCENT_PATTERN: &str = r"^#\s*%%\s*$";
const BARE_CODECELL_PATTERN: &str = r"^#\s*<codecell>\s*$";
const IGNORE_PATTERN: &str = r"^#*\s*spyonde\s*[:=]\s*ignore-cell\s*$";

/// Compiled cell marker predicates
#[derive(Debug, Clone)]
pub struct CellMarkers {
    separator: Regex,
    bare_percent: Regex,
    bare_codecell: Regex,
    ignore: Regex,
}

impl CellMarkers {
    pub fn new() -> Self {
        CellMarkers {
            separator: compile(SEPARATOR_PATTERN),
            bare_percent: compile(BARE_PERCENT_PATTERN),
            bare_codecell: compile(BARE_CODECELL_PATTERN),
            ignore: compile(IGNORE_PATTERN),
        }
    }

    /// Whether the line starts a new cell
    pub fn is_separator(&self, line: &str) -> bool {
        let line = line.trim_start();
        SEPARATOR_PREFIXES
            .iter()
            .any(|prefix| line.starts_with(prefix))
            || self.separator.is_match(line)
    }

    /// Whether the line is a separator with no title after it
    pub fn is_bare_separator(&self, line: &str) -> bool {
        let line = line.trim_start();
        self.bare_percent.is_match(line) || self.bare_codecell.is_match(line)
    }

    /// Whether the line asks for its whole cell to be dropped
    pub fn is_ignore_marker(&self, line: &str) -> bool {
        self.ignore.is_match(line.trim_start())
    }

    /// The line index a token opens a cell on, if it does.
    ///
    /// Only comments count, and only when both the comment and its whole line read as a
    /// separator, so a trailing comment after code never splits a cell.
    pub fn boundary_line(&self, token: &Token<'_>) -> Option<usize> {
        let opens_cell = token.kind == TokenKind::Comment
            && self.is_separator(token.text)
            && self.is_separator(token.line.text);
        opens_cell.then_some(token.line.index)
    }

    /// The title that follows the separator syntax, possibly empty.
    ///
    /// `#%% Intro` gives `Intro`; `# % % text` keeps `% % text` since `% %` is not `%%`.
    pub fn separator_title<'l>(&self, line: &'l str) -> &'l str {
        let mut rest = line.trim();
        for syntax in ["#", "%%", "<codecell>"] {
            rest = rest.strip_prefix(syntax).unwrap_or(rest).trim();
        }
        rest
    }

    /// Replace a leading `#%%` or `# %%` with a plain `#`, keeping the rest of the comment
    pub fn rewrite_separator_comment(&self, line: &str) -> String {
        let body = line.trim_start();
        let indent = &line[..line.len() - body.len()];
        for token in CODE_SEPARATOR_TOKENS {
            if let Some(rest) = body.strip_prefix(token) {
                return format!("{}#{}", indent, rest);
            }
        }
        line.to_string()
    }
}

impl Default for CellMarkers {
    fn default() -> Self {
        Self::new()
    }
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("cell marker patterns are valid regexes")
}

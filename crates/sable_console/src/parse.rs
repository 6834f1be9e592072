//! # Line Tokenizer
//!
//! Splits a command line into its name and argument tokens. Runs of
//! whitespace collapse; a `"`-quoted group becomes a single token no matter
//! what it contains.

use thiserror::Error;

/// Errors from splitting a line into tokens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A `"` opened an argument group that never closed.
    #[error("expected a closing '\"' to end argument grouping")]
    UnterminatedQuote,
}

/// Splits `line` into tokens.
///
/// Leading/trailing whitespace and runs between tokens are skipped. Inside
/// a `"..."` group everything (including spaces) is one token; the quotes
/// are not part of it. An empty line tokenizes to an empty vector.
///
/// # Errors
///
/// [`ParseError::UnterminatedQuote`] when a quote group never closes.
pub fn tokenize(line: &str) -> Result<Vec<String>, ParseError> {
    let mut tokens = Vec::new();
    let mut rest = line;

    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }

        if let Some(quoted) = rest.strip_prefix('"') {
            let Some(end) = quoted.find('"') else {
                return Err(ParseError::UnterminatedQuote);
            };
            tokens.push(quoted[..end].to_string());
            rest = &quoted[end + 1..];
        } else {
            let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            tokens.push(rest[..end].to_string());
            rest = &rest[end..];
        }
    }

    Ok(tokens)
}

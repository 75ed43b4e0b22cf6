//! Text-to-number parsing.
//!
//! Accepts whitespace, comma or semicolon separated values with `#`
//! line comments, which covers plain lists, single-column files and
//! simple CSV rows. Integer and decimal tokens both become `f64`.

use thiserror::Error;

/// Parse error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("{source_label}:{line}: invalid number '{token}'")]
    InvalidNumber {
        source_label: String,
        line: usize,
        token: String,
    },
}

fn is_separator(c: char) -> bool {
    c.is_ascii_whitespace() || c == ',' || c == ';'
}

/// Parse a single token. Non-finite values (`nan`, `inf`) are rejected.
pub fn parse_token(token: &str) -> Option<f64> {
    match token.parse::<f64>() {
        Ok(x) if x.is_finite() => Some(x),
        _ => None,
    }
}

/// Parse every number in `text`, in order.
///
/// `source_label` only appears in error messages.
pub fn parse_numbers(text: &str, source_label: &str) -> Result<Vec<f64>, ParseError> {
    let mut numbers = Vec::new();

    for (idx, raw_line) in text.lines().enumerate() {
        let line = match raw_line.find('#') {
            Some(pos) => &raw_line[..pos],
            None => raw_line,
        };

        for token in line.split(is_separator).filter(|t| !t.is_empty()) {
            let number = parse_token(token).ok_or_else(|| ParseError::InvalidNumber {
                source_label: source_label.to_string(),
                line: idx + 1,
                token: token.to_string(),
            })?;
            numbers.push(number);
        }
    }

    Ok(numbers)
}

/// Parse a list of individual values, e.g. positional CLI arguments.
///
/// Each value may itself hold several separated numbers (`"1,2"`).
pub fn parse_values(values: &[String], source_label: &str) -> Result<Vec<f64>, ParseError> {
    let mut numbers = Vec::new();
    for value in values {
        numbers.extend(parse_numbers(value, source_label)?);
    }
    Ok(numbers)
}

//! Tokenizer for the whitespace-separated activity descriptor format.
//!
//! One record per non-blank line:
//! `id description duration predecessor_count predecessor_ids...`
//! where `description` is a single token and `predecessor_count` announces
//! exactly how many id tokens follow.

use std::str::FromStr;

use thiserror::Error;

use crate::models::ActivityDescriptor;

/// Errors raised while tokenizing descriptor input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: missing {field} field")]
    MissingField { line: usize, field: &'static str },
    #[error("line {line}: invalid {field} '{value}'")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },
    #[error("line {line}: expected {expected} predecessor id(s), found {found}")]
    PredecessorCount {
        line: usize,
        expected: usize,
        found: usize,
    },
}

/// Parse every non-blank line of `input` into a descriptor.
///
/// Only tokenization is validated here; whether the referenced ids exist
/// (or form a DAG) is the builder's and the engine's concern.
pub fn parse_descriptors(input: &str) -> Result<Vec<ActivityDescriptor>, ParseError> {
    let mut descriptors = Vec::new();
    for (ix, raw) in input.lines().enumerate() {
        if raw.trim().is_empty() {
            continue;
        }
        descriptors.push(parse_line(raw, ix + 1)?);
    }
    Ok(descriptors)
}

fn parse_line(raw: &str, line: usize) -> Result<ActivityDescriptor, ParseError> {
    let mut tokens = raw.split_whitespace();
    let mut field = |name: &'static str| {
        tokens
            .next()
            .ok_or(ParseError::MissingField { line, field: name })
    };

    let id = field("id")?.to_string();
    let description = field("description")?.to_string();
    let duration: u64 = parse_number(field("duration")?, "duration", line)?;
    let expected: usize = parse_number(field("predecessor count")?, "predecessor count", line)?;

    let predecessor_ids: Vec<String> = tokens.map(str::to_string).collect();
    if predecessor_ids.len() != expected {
        return Err(ParseError::PredecessorCount {
            line,
            expected,
            found: predecessor_ids.len(),
        });
    }

    Ok(ActivityDescriptor {
        id,
        description,
        duration,
        predecessor_ids,
    })
}

fn parse_number<T: FromStr>(token: &str, field: &'static str, line: usize) -> Result<T, ParseError> {
    token.parse().map_err(|_| ParseError::InvalidNumber {
        line,
        field,
        value: token.to_string(),
    })
}

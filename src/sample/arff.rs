//! A minimal reader for dense ARFF files.
//!
//! Numeric attributes are read as they are.
//! Nominal attributes whose values are numbers (e.g. `{0,1}`) are read
//! as those numbers, other nominal values are read as their position
//! in the declaration. Sparse rows and missing values are not supported.

use std::io::{BufRead, BufReader, Read};

use super::reader::{parse_value, Table};
use crate::error::{Result, TransferError};


enum Attribute {
    Numeric,
    Nominal(Vec<String>),
}


impl Attribute {
    fn value(&self, word: &str, line: usize) -> Result<f64> {
        let word = word.trim().trim_matches(|c| c == '\'' || c == '"');
        if word == "?" {
            return Err(TransferError::Parse {
                line,
                reason: "missing values are not supported".into(),
            });
        }
        match self {
            Self::Numeric => parse_value(word, line),
            Self::Nominal(values) => {
                values.iter()
                    .position(|v| v == word)
                    .map(|k| values[k].parse::<f64>().unwrap_or(k as f64))
                    .ok_or_else(|| TransferError::Parse {
                        line,
                        reason: format!("undeclared nominal value `{word}`"),
                    })
            },
        }
    }
}


pub(super) fn read_table<R: Read>(reader: BufReader<R>) -> Result<Table> {
    let mut names = Vec::new();
    let mut attributes = Vec::new();
    let mut rows = Vec::new();
    let mut in_data = false;

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = i + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('%') { continue; }

        if !in_data {
            let lower = line.to_ascii_lowercase();
            if lower.starts_with("@relation") {
                continue;
            } else if lower.starts_with("@data") {
                in_data = true;
            } else if lower.starts_with("@attribute") {
                let (name, attribute) = parse_attribute(line, line_no)?;
                names.push(name);
                attributes.push(attribute);
            } else {
                return Err(TransferError::Parse {
                    line: line_no,
                    reason: format!("unexpected header line `{line}`"),
                });
            }
            continue;
        }

        if line.starts_with('{') {
            return Err(TransferError::Parse {
                line: line_no,
                reason: "sparse ARFF rows are not supported".into(),
            });
        }

        let words = line.split(',').collect::<Vec<_>>();
        if words.len() != attributes.len() {
            return Err(TransferError::Parse {
                line: line_no,
                reason: format!(
                    "expected {} values, got {}",
                    attributes.len(), words.len()
                ),
            });
        }
        let row = attributes.iter()
            .zip(words)
            .map(|(attr, word)| attr.value(word, line_no))
            .collect::<Result<Vec<f64>>>()?;
        rows.push((line_no, row));
    }

    Ok(Table { names, rows })
}


/// Parse `@attribute <name> <type>`.
fn parse_attribute(line: &str, line_no: usize) -> Result<(String, Attribute)> {
    let rest = line["@attribute".len()..].trim();

    let (name, kind) = split_name(rest).ok_or_else(|| TransferError::Parse {
        line: line_no,
        reason: format!("attribute without type `{line}`"),
    })?;
    let name = name.to_string();

    let attribute = if kind.starts_with('{') && kind.ends_with('}') {
        let values = kind[1..kind.len() - 1]
            .split(',')
            .map(|v| v.trim().trim_matches(|c| c == '\'' || c == '"').to_string())
            .collect::<Vec<_>>();
        Attribute::Nominal(values)
    } else {
        match kind.to_ascii_lowercase().as_str() {
            "numeric" | "real" | "integer" => Attribute::Numeric,
            other => {
                return Err(TransferError::Parse {
                    line: line_no,
                    reason: format!("unsupported attribute type `{other}`"),
                });
            },
        }
    };

    Ok((name, attribute))
}


/// Split `<name> <type>`, where a quoted name may contain spaces.
fn split_name(rest: &str) -> Option<(&str, &str)> {
    let (name, kind) = match rest.chars().next()? {
        quote @ ('\'' | '"') => {
            let end = rest[1..].find(quote)? + 1;
            (&rest[1..end], &rest[end + 1..])
        },
        _ => {
            let pos = rest.find(char::is_whitespace)?;
            (&rest[..pos], &rest[pos..])
        },
    };
    let kind = kind.trim();
    if kind.is_empty() { None } else { Some((name, kind)) }
}

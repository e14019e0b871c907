// metaindex-core/src/domain/catalog/fqn.rs
//
// Fully qualified names are dot separated. A segment that itself contains a
// dot is wrapped in double quotes: service."my.db".schema.table

use std::collections::BTreeSet;

use crate::domain::error::DomainError;

const SEPARATOR: char = '.';
const QUOTE: char = '"';

/// Splits an FQN into its segments. Quoted segments keep their quotes so that
/// `build(&split(fqn)?)` gives back the same string.
pub fn split(fqn: &str) -> Result<Vec<String>, DomainError> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in fqn.chars() {
        match c {
            QUOTE => {
                in_quotes = !in_quotes;
                current.push(c);
            }
            SEPARATOR if !in_quotes => {
                parts.push(finish_segment(fqn, &mut current)?);
            }
            _ => current.push(c),
        }
    }

    if in_quotes {
        return Err(DomainError::InvalidFqn(format!(
            "unbalanced quotes in '{}'",
            fqn
        )));
    }
    parts.push(finish_segment(fqn, &mut current)?);
    Ok(parts)
}

fn finish_segment(fqn: &str, current: &mut String) -> Result<String, DomainError> {
    if current.is_empty() || current.as_str() == "\"\"" {
        return Err(DomainError::InvalidFqn(format!("empty segment in '{}'", fqn)));
    }
    Ok(std::mem::take(current))
}

/// Quotes a raw name when it contains the separator.
pub fn quote_name(name: &str) -> String {
    let already_quoted = name.len() >= 2 && name.starts_with(QUOTE) && name.ends_with(QUOTE);
    if name.contains(SEPARATOR) && !already_quoted {
        format!("{QUOTE}{name}{QUOTE}")
    } else {
        name.to_string()
    }
}

pub fn build<S: AsRef<str>>(parts: &[S]) -> String {
    parts
        .iter()
        .map(|p| quote_name(p.as_ref()))
        .collect::<Vec<_>>()
        .join(".")
}

/// FQN of the enclosing entity, `None` for a root.
pub fn parent(fqn: &str) -> Result<Option<String>, DomainError> {
    let parts = split(fqn)?;
    if parts.len() < 2 {
        return Ok(None);
    }
    Ok(Some(build(&parts[..parts.len() - 1])))
}

/// Owning table of a column: the column FQN minus its last segment.
pub fn table_fqn(column_fqn: &str) -> Result<String, DomainError> {
    parent(column_fqn)?.ok_or_else(|| {
        DomainError::InvalidFqn(format!("'{}' is not a column FQN", column_fqn))
    })
}

/// Hierarchical facets: the FQN, every ancestor, every segment, plus the
/// extra inputs (suggestions). Sorted and deduplicated.
pub fn fqn_parts<S: AsRef<str>>(fqn: &str, extra: &[S]) -> Result<Vec<String>, DomainError> {
    let segments = split(fqn)?;
    let mut parts = BTreeSet::new();

    for end in 1..=segments.len() {
        parts.insert(build(&segments[..end]));
    }
    parts.extend(segments);
    parts.extend(extra.iter().map(|s| s.as_ref().to_string()));

    Ok(parts.into_iter().collect())
}

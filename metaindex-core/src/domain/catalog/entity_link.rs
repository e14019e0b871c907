// metaindex-core/src/domain/catalog/entity_link.rs

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

use super::{COLUMN, fqn};
use crate::domain::error::DomainError;

const LINK_SEPARATOR: &str = "::";

fn re_wrapped_link() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^<#E::(?P<body>.+)>$")
            .unwrap_or_else(|_| Regex::new("$^").unwrap_or_else(|_| unreachable!()))
    })
}

fn re_entity_type() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$")
            .unwrap_or_else(|_| Regex::new("$^").unwrap_or_else(|_| unreachable!()))
    })
}

/// Structured reference to an asset, optionally narrowed to a field of it.
///
/// Accepted forms:
/// - `<#E::table::svc.db.sch.orders::columns::amount>`
/// - `column::db.schema.table.col::description`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityLink {
    pub entity_type: String,
    pub entity_fqn: String,
    pub field_name: Option<String>,
    pub array_field_name: Option<String>,
    pub array_field_value: Option<String>,
}

impl EntityLink {
    pub fn parse(link: &str) -> Result<Self, DomainError> {
        let link = link.trim();
        let body = match re_wrapped_link().captures(link) {
            Some(caps) => caps.name("body").map(|m| m.as_str()).unwrap_or_default(),
            None if link.starts_with('<') || link.ends_with('>') => {
                return Err(DomainError::MalformedEntityLink(link.to_string()));
            }
            None => link,
        };

        let parts: Vec<&str> = body.split(LINK_SEPARATOR).collect();
        if !(2..=5).contains(&parts.len()) || parts.iter().any(|p| p.trim().is_empty()) {
            return Err(DomainError::MalformedEntityLink(link.to_string()));
        }
        if !re_entity_type().is_match(parts[0]) {
            return Err(DomainError::MalformedEntityLink(link.to_string()));
        }
        // The FQN must be well formed on its own
        fqn::split(parts[1]).map_err(|_| DomainError::MalformedEntityLink(link.to_string()))?;

        let owned = |i: usize| parts.get(i).map(|s| s.to_string());
        Ok(Self {
            entity_type: parts[0].to_string(),
            entity_fqn: parts[1].to_string(),
            field_name: owned(2),
            array_field_name: owned(3),
            array_field_value: owned(4),
        })
    }

    /// FQN of the table behind the link. Column links point one level below it.
    pub fn table_fqn(&self) -> Result<String, DomainError> {
        if self.entity_type == COLUMN {
            fqn::table_fqn(&self.entity_fqn)
        } else {
            Ok(self.entity_fqn.clone())
        }
    }
}

impl fmt::Display for EntityLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<#E::{}::{}", self.entity_type, self.entity_fqn)?;
        for part in [
            &self.field_name,
            &self.array_field_name,
            &self.array_field_value,
        ]
        .into_iter()
        .flatten()
        {
            write!(f, "::{}", part)?;
        }
        write!(f, ">")
    }
}

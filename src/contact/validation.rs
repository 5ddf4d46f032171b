//! Field-scoped validation errors.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use validator::ValidationErrors;

use super::fields::Field;

/// Per-field validation messages, kept in form order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors {
    errors: BTreeMap<Field, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the first message of every failing field from a validator report.
    pub fn from_validation(report: &ValidationErrors) -> Self {
        let mut errors = BTreeMap::new();
        for (key, failures) in report.field_errors() {
            let key: &str = &key;
            let Ok(field) = key.parse::<Field>() else {
                continue;
            };
            let message = failures
                .first()
                .and_then(|failure| failure.message.as_ref())
                .map(|message| message.to_string())
                .unwrap_or_else(|| field.rule_message().to_string());
            errors.insert(field, message);
        }
        Self { errors }
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn remove(&mut self, field: Field) -> Option<String> {
        self.errors.remove(&field)
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.errors.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        self.errors.iter().map(|(field, message)| (*field, message.as_str()))
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

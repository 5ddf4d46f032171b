//! Contact form fields and the submission value they make up.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use super::validation::FieldErrors;

/// One of the four contact form inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    /// Form order
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Subject, Field::Message];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Subject => "subject",
            Field::Message => "message",
        }
    }

    /// Label shown next to the input
    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Subject => "Subject",
            Field::Message => "Message",
        }
    }

    /// Placeholder text shown in an empty input
    pub fn placeholder(&self) -> &'static str {
        match self {
            Field::Name => "Your name",
            Field::Email => "your.email@example.com",
            Field::Subject => "Project discussion, job opportunity, etc.",
            Field::Message => "Tell me about your project, requirements, or just say hello...",
        }
    }

    /// Message surfaced when the field fails its rule
    pub fn rule_message(&self) -> &'static str {
        match self {
            Field::Name => "Name must be at least 2 characters",
            Field::Email => "Please enter a valid email address",
            Field::Subject => "Subject must be at least 5 characters",
            Field::Message => "Message must be at least 10 characters",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Field::Name),
            "email" => Ok(Field::Email),
            "subject" => Ok(Field::Subject),
            "message" => Ok(Field::Message),
            other => Err(format!("Unknown contact field: {}", other)),
        }
    }
}

/// A contact form submission. Lives in memory only and is dropped once delivery resolves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ContactSubmission {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,

    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,

    #[validate(length(min = 5, message = "Subject must be at least 5 characters"))]
    pub subject: String,

    #[validate(length(min = 10, message = "Message must be at least 10 characters"))]
    pub message: String,
}

impl ContactSubmission {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Subject => self.subject = value,
            Field::Message => self.message = value,
        }
    }

    /// True when every field is empty (the state after a successful send)
    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|f| self.get(*f).is_empty())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Apply the validation contract, collecting every failing field.
    pub fn check(&self) -> Result<(), FieldErrors> {
        self.validate()
            .map_err(|errors| FieldErrors::from_validation(&errors))
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::string_utils::{contains_ignore_case, non_blank};

/// A stored contact
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub birth_date: NaiveDate,
    pub additional_info: Option<String>,
}

impl Contact {
    /// Build a stored contact from a body and the id the store assigned to it
    pub fn from_body(id: i32, body: ContactBody) -> Self {
        Self {
            id,
            first_name: body.first_name,
            last_name: body.last_name,
            email: body.email,
            phone_number: body.phone_number,
            birth_date: body.birth_date,
            additional_info: body.additional_info,
        }
    }
}

/// Payload for creating or fully replacing a contact
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactBody {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub birth_date: NaiveDate,
    #[serde(default)]
    pub additional_info: Option<String>,
}

/// Searchable text fields of a contact
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactField {
    FirstName,
    LastName,
    Email,
}

impl ContactField {
    /// Column holding this field in the `contacts` table
    pub fn column(self) -> &'static str {
        match self {
            ContactField::FirstName => "first_name",
            ContactField::LastName => "last_name",
            ContactField::Email => "email",
        }
    }

    pub fn value(self, contact: &Contact) -> &str {
        match self {
            ContactField::FirstName => &contact.first_name,
            ContactField::LastName => &contact.last_name,
            ContactField::Email => &contact.email,
        }
    }
}

/// Case-insensitive "field contains needle" condition
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldPredicate {
    pub field: ContactField,
    pub needle: String,
}

impl FieldPredicate {
    pub fn matches(&self, contact: &Contact) -> bool {
        contains_ignore_case(self.field.value(contact), &self.needle)
    }
}

/// Optional search filters; every present value must match
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct SearchFilter {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl SearchFilter {
    /// Predicates for the filters that carry a non-blank value
    pub fn predicates(&self) -> Vec<FieldPredicate> {
        [
            (ContactField::FirstName, &self.first_name),
            (ContactField::LastName, &self.last_name),
            (ContactField::Email, &self.email),
        ]
        .into_iter()
        .filter_map(|(field, value)| {
            non_blank(value.as_deref()).map(|needle| FieldPredicate {
                field,
                needle: needle.to_string(),
            })
        })
        .collect()
    }
}

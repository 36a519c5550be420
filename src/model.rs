//! Directory records as exchanged with the directory service.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Server-assigned identifier. The service may send numbers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        Self::Int(id)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

/// A department as listed by `GET department`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
}

impl Department {
    pub fn new(id: impl Into<RecordId>, name: &str) -> Self {
        Self {
            id: id.into(),
            name: name.to_string(),
        }
    }
}

/// A staff member as listed by `GET /staff`, with the department embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    pub department: Department,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip: String,
    #[serde(default)]
    pub country: String,
}

impl Staff {
    /// Single-line postal address, skipping empty parts.
    #[must_use]
    pub fn address_line(&self) -> String {
        address_line(&self.street, &self.city, &self.state, &self.zip, &self.country)
    }
}

fn address_line(street: &str, city: &str, state: &str, zip: &str, country: &str) -> String {
    let region = [state, zip]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    [street, city, region.as_str(), country]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Body of `POST staff`. The department is sent by identifier only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStaff {
    pub name: String,
    pub phone: String,
    pub department_id: RecordId,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

impl NewStaff {
    #[must_use]
    pub fn address_line(&self) -> String {
        address_line(&self.street, &self.city, &self.state, &self.zip, &self.country)
    }
}

/// A create the service accepted.
///
/// Any 2xx answer counts. The response body is kept as the service sent it;
/// its shape is not checked.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatedStaff {
    pub request: NewStaff,
    pub response: Value,
}

impl CreatedStaff {
    /// Identifier assigned by the service, when the response carries one.
    #[must_use]
    pub fn id(&self) -> Option<String> {
        match self.response.get("id")? {
            Value::Null => None,
            Value::String(id) => Some(id.clone()),
            other => Some(other.to_string()),
        }
    }
}

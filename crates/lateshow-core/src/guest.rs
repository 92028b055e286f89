//! Guest — a person who appeared on the show.

use serde::Deserialize;

/// A persisted guest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guest {
  pub id:         i64,
  pub name:       String,
  pub occupation: String,
}

/// Input for creating a guest; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewGuest {
  pub name:       String,
  pub occupation: String,
}

impl NewGuest {
  pub fn new(name: impl Into<String>, occupation: impl Into<String>) -> Self {
    Self { name: name.into(), occupation: occupation.into() }
  }
}

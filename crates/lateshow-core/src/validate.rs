//! Boundary validation for untrusted appearance-creation input.
//!
//! Checks run in a fixed order so the reported error is deterministic:
//!
//! 1. [`required_fields`] — `rating`, `episode_id` and `guest_id` present and
//!    non-null.
//! 2. Referential existence — resolved against the store by the caller, using
//!    [`reference_id`] to read the ids.
//! 3. [`rating`] — a JSON integer in `1..=5`.
//!
//! [`Rating::new`] repeats the range check independently when the value is
//! turned into an entity.

use serde_json::Value;

use crate::{ValidationError, appearance::Rating};

/// The raw, still-unchecked fields of a creation request.
#[derive(Debug, Clone, Copy)]
pub struct AppearanceFields<'a> {
  pub rating:     &'a Value,
  pub episode_id: &'a Value,
  pub guest_id:   &'a Value,
}

/// Step 1: every required key must be present with a non-null value.
pub fn required_fields(body: &Value) -> Result<AppearanceFields<'_>, ValidationError> {
  let field = |key: &str| body.get(key).filter(|v| !v.is_null());

  match (field("rating"), field("episode_id"), field("guest_id")) {
    (Some(rating), Some(episode_id), Some(guest_id)) => {
      Ok(AppearanceFields { rating, episode_id, guest_id })
    }
    _ => Err(ValidationError::missing_fields()),
  }
}

/// Read an entity id. Anything other than a JSON integer cannot name a row,
/// so it yields `None` and the caller reports the entity as not found.
pub fn reference_id(value: &Value) -> Option<i64> { value.as_i64() }

/// Step 3: the rating must be a JSON integer (not a bool, float or string)
/// in `1..=5`.
pub fn rating(value: &Value) -> Result<Rating, ValidationError> {
  let raw = value.as_i64().ok_or_else(ValidationError::rating_out_of_range)?;
  Ok(Rating::new(raw)?)
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;
  use crate::error::{MISSING_FIELDS, RATING_OUT_OF_RANGE};

  #[test]
  fn all_fields_present() {
    let body = json!({ "rating": 5, "episode_id": 1, "guest_id": 2 });
    let fields = required_fields(&body).unwrap();
    assert_eq!(fields.rating, &json!(5));
    assert_eq!(reference_id(fields.episode_id), Some(1));
    assert_eq!(reference_id(fields.guest_id), Some(2));
  }

  #[test]
  fn missing_key_is_rejected() {
    for body in [
      json!({ "episode_id": 1, "guest_id": 2 }),
      json!({ "rating": 5, "guest_id": 2 }),
      json!({ "rating": 5, "episode_id": 1 }),
      json!({}),
    ] {
      let err = required_fields(&body).unwrap_err();
      assert_eq!(err.messages, vec![MISSING_FIELDS]);
    }
  }

  #[test]
  fn null_field_counts_as_missing() {
    let body = json!({ "rating": null, "episode_id": 1, "guest_id": 2 });
    assert!(required_fields(&body).is_err());
  }

  #[test]
  fn non_object_body_is_rejected() {
    for body in [json!(null), json!([1, 2, 3]), json!("rating"), json!(7)] {
      assert!(required_fields(&body).is_err());
    }
  }

  #[test]
  fn non_integer_reference_resolves_to_nothing() {
    assert_eq!(reference_id(&json!("1")), None);
    assert_eq!(reference_id(&json!(1.0)), None);
    assert_eq!(reference_id(&json!(true)), None);
  }

  #[test]
  fn rating_accepts_integers_in_range() {
    for r in 1..=5 {
      assert_eq!(rating(&json!(r)).unwrap().get(), r);
    }
  }

  #[test]
  fn rating_rejects_everything_else() {
    for value in [
      json!(0),
      json!(6),
      json!(-3),
      json!(4.5),
      json!(5.0),
      json!(true),
      json!("5"),
      json!([5]),
      json!(u64::MAX),
    ] {
      let err = rating(&value).unwrap_err();
      assert_eq!(err.messages, vec![RATING_OUT_OF_RANGE], "value: {value}");
    }
  }
}

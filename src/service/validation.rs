//! Creation checks: required fields and referenced ids, in declaration order.

use crate::error::AppError;
use crate::models::fields::required_str;
use crate::models::{Payload, Requirement};
use crate::storage::Storage;
use serde_json::Value;

pub struct RequestValidator;

impl RequestValidator {
    /// Stops at the first failure. A missing field is 400; a reference to an
    /// object that does not exist is 404.
    pub async fn validate(
        storage: &dyn Storage,
        body: &Payload,
        rules: &[Requirement],
    ) -> Result<(), AppError> {
        for rule in rules {
            match *rule {
                Requirement::Field(field) => {
                    if matches!(body.get(field), None | Some(Value::Null)) {
                        return Err(AppError::missing(field));
                    }
                }
                Requirement::Reference(field, kind) => {
                    let id = required_str(body, field)?;
                    if storage.get(kind, &id).await?.is_none() {
                        tracing::debug!(field = field, id = %id, kind = %kind, "reference not found");
                        return Err(AppError::NotFound);
                    }
                }
            }
        }
        Ok(())
    }
}

//! Declarative field-level validation.
//!
//! Rules are pure functions over the command's own fields: non-empty
//! checks and numeric bounds only. No cross-entity or stateful checks
//! belong here.

use common::{Money, Violation, Violations};

use crate::commands::CreateOrder;

/// A command that can check its field-level invariants.
///
/// An empty [`Violations`] set means the command is valid. Handlers must
/// not mutate any store before validation succeeds.
pub trait Validate {
    fn validate(&self) -> Violations;
}

/// Rule: the value must contain at least one non-whitespace character.
fn required(field: &'static str, value: &str) -> Option<Violation> {
    value
        .trim()
        .is_empty()
        .then(|| Violation::new(field, format!("{field} is required")))
}

/// Rule: the amount must be strictly greater than zero.
fn greater_than_zero(field: &'static str, amount: Money) -> Option<Violation> {
    (!amount.is_positive())
        .then(|| Violation::new(field, format!("{field} must be greater than 0")))
}

impl Validate for CreateOrder {
    fn validate(&self) -> Violations {
        let mut violations = Vec::new();
        violations.extend(required("first_name", &self.first_name));
        violations.extend(required("last_name", &self.last_name));
        violations.extend(required("status", &self.status));
        violations.extend(greater_than_zero("total_cost", self.total_cost));
        Violations(violations)
    }
}

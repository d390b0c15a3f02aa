//! Input Validator: pure checks over raw form values. No session or network access.

use super::{Action, Intent, Registration};
use crate::core::fields::{contract, form};
use crate::core::{AmountError, EtherAmount};
use thiserror::Error;

/// Raw field values keyed by form field id.
pub trait FieldSource {
    fn field(&self, id: &str) -> Option<String>;
}

impl FieldSource for [(&str, &str)] {
    fn field(&self, id: &str) -> Option<String> {
        self.iter().find(|(k, _)| *k == id).map(|(_, v)| (*v).to_string())
    }
}

/// A violated input constraint. Display text is user-facing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing field '{0}'")]
    MissingField(&'static str),

    #[error("Age must be a whole number")]
    AgeNotInteger(String),

    #[error("Age must be between {} and {}", contract::MIN_AGE, contract::MAX_AGE)]
    AgeOutOfRange(i64),

    #[error("Name must be {} characters or less", contract::MAX_NAME_CHARS)]
    NameTooLong(usize),

    #[error("Enter a valid {} amount", .action.noun())]
    InvalidAmount {
        action: Action,
        input: String,
        #[source]
        problem: AmountError,
    },
}

/// Validate the fields for `action` into an [`Intent`].
pub fn validate<S: FieldSource + ?Sized>(action: Action, source: &S) -> Result<Intent, ValidationError> {
    let get = |id: &'static str| source.field(id).ok_or(ValidationError::MissingField(id));
    match action {
        Action::Register => {
            validate_registration(&get(form::NAME)?, &get(form::AGE)?, &get(form::MARRIED)?).map(Intent::Register)
        }
        Action::Deposit => validate_amount(action, &get(form::AMOUNT)?).map(Intent::Deposit),
        Action::Withdraw => validate_amount(action, &get(form::WITHDRAW_AMOUNT)?).map(Intent::Withdraw),
    }
}

/// `age` must be an integer in 1..=150, `name` at most 32 characters.
/// `married` is a boolean-valued selector: exactly `"true"` is true.
pub fn validate_registration(name: &str, age: &str, married: &str) -> Result<Registration, ValidationError> {
    let age_raw = age.trim();
    let age: i64 = age_raw
        .parse()
        .map_err(|_| ValidationError::AgeNotInteger(age_raw.to_string()))?;
    if !(contract::MIN_AGE..=contract::MAX_AGE).contains(&age) {
        return Err(ValidationError::AgeOutOfRange(age));
    }
    let chars = name.chars().count();
    if chars > contract::MAX_NAME_CHARS {
        return Err(ValidationError::NameTooLong(chars));
    }
    Ok(Registration {
        name: name.to_string(),
        age: age as u8,
        married: married.trim() == "true",
    })
}

/// Deposit and withdrawal amounts must be numeric and strictly positive.
pub fn validate_amount(action: Action, raw: &str) -> Result<EtherAmount, ValidationError> {
    EtherAmount::parse(raw).map_err(|problem| ValidationError::InvalidAmount {
        action,
        input: raw.to_string(),
        problem,
    })
}

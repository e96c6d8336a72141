//! Local form validation.
//!
//! Nothing here touches the network. Each validator returns the full set of
//! per-field messages so a form can show them all at once; editing a field
//! clears only that field's message.

#[cfg(test)]
#[path = "validation_test.rs"]
mod validation_test;

use std::collections::BTreeMap;

use crate::types::{LoginRequest, NewInfoRecord, SignupRequest};

pub const MIN_NAME_CHARS: usize = 2;
pub const MIN_PASSWORD_CHARS: usize = 6;

/// Form field names, shared with the view layer.
pub mod field {
    pub const NAME: &str = "name";
    pub const EMAIL: &str = "email";
    pub const PASSWORD: &str = "password";
    pub const CONFIRM_PASSWORD: &str = "confirmPassword";

    pub const MEDICINE_NAME: &str = "medicineName";
    pub const USAGE: &str = "usage";
    pub const DOSAGE: &str = "dosage";
    pub const EXP: &str = "exp";
    pub const MAN: &str = "man";
    pub const PRICE: &str = "price";
    pub const BTNO: &str = "btno";
    pub const COMP_NAME: &str = "compName";
    pub const INSTR: &str = "instr";
    pub const DRUGS: &str = "drugs";
}

/// Per-field error messages keyed by form field name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Forget the message for `field`; returns whether one was present.
    pub fn clear(&mut self, field: &str) -> bool {
        self.0.remove(field).is_some()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// `Ok(())` when no field failed.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one message is present.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// Sign-up form as typed, including the confirmation that is never sent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    /// The request body; the confirmation is dropped.
    #[must_use]
    pub fn to_request(&self) -> SignupRequest {
        SignupRequest {
            name: self.name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            password: self.password.clone(),
        }
    }
}

/// Loose `something@something.something` check with no whitespace anywhere
/// in the three parts.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    // Any whitespace-free run containing `@` followed later by a `.` with
    // characters on all sides satisfies the shape.
    email.split_whitespace().any(|token| {
        token.char_indices().any(|(at, c)| {
            c == '@' && at > 0 && {
                let domain = &token[at + 1..];
                domain
                    .char_indices()
                    .any(|(dot, d)| d == '.' && dot > 0 && dot + 1 < domain.len())
            }
        })
    })
}

fn check_email(errors: &mut FieldErrors, email: &str) {
    if email.trim().is_empty() {
        errors.insert(field::EMAIL, "Email is required");
    } else if !is_valid_email(email) {
        errors.insert(field::EMAIL, "Please enter a valid email address");
    }
}

#[must_use]
pub fn validate_login(form: &LoginRequest) -> FieldErrors {
    let mut errors = FieldErrors::new();
    check_email(&mut errors, &form.email);
    if form.password.is_empty() {
        errors.insert(field::PASSWORD, "Password is required");
    }
    errors
}

#[must_use]
pub fn validate_signup(form: &SignupForm) -> FieldErrors {
    let mut errors = FieldErrors::new();

    let name = form.name.trim();
    if name.is_empty() {
        errors.insert(field::NAME, "Name is required");
    } else if name.chars().count() < MIN_NAME_CHARS {
        errors.insert(field::NAME, "Name must be at least 2 characters");
    }

    check_email(&mut errors, &form.email);

    if form.password.is_empty() {
        errors.insert(field::PASSWORD, "Password is required");
    } else if form.password.chars().count() < MIN_PASSWORD_CHARS {
        errors.insert(field::PASSWORD, "Password must be at least 6 characters");
    }

    if form.confirm_password.is_empty() {
        errors.insert(field::CONFIRM_PASSWORD, "Please confirm your password");
    } else if form.confirm_password != form.password {
        errors.insert(field::CONFIRM_PASSWORD, "Passwords do not match");
    }

    errors
}

/// Every medicine field is required after trimming.
#[must_use]
pub fn validate_record(record: &NewInfoRecord) -> FieldErrors {
    let checks: [(&'static str, &str, &str); 10] = [
        (field::MEDICINE_NAME, &record.medicine_name, "Medicine name is required"),
        (field::USAGE, &record.usage, "Usage/Purpose is required"),
        (field::DOSAGE, &record.dosage, "Dosage instructions are required"),
        (field::EXP, &record.exp, "Expiry date is required"),
        (field::MAN, &record.man, "Manufacturing date is required"),
        (field::PRICE, &record.price, "Price is required"),
        (field::BTNO, &record.btno, "Batch number is required"),
        (field::COMP_NAME, &record.comp_name, "Company name is required"),
        (field::INSTR, &record.instr, "Storage instructions are required"),
        (field::DRUGS, &record.drugs, "Drug composition is required"),
    ];

    let mut errors = FieldErrors::new();
    for (name, value, message) in checks {
        if value.trim().is_empty() {
            errors.insert(name, message);
        }
    }
    errors
}

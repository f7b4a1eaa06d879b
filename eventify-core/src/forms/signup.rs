//! Two-step signup
//!
//! Step one collects the account (name, email, password), step two the
//! profile (address, phone, birthdate, PAN). Each step reports every failing
//! field at once, keyed by field.

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use super::{char_len, is_digits, matches};
use crate::event::parse_calendar_date;

const MIN_PASSWORD_LEN: usize = 6;
const MAX_ADDRESS_LEN: usize = 50;

static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
static PAN: OnceLock<Option<Regex>> = OnceLock::new();

/// Everything the signup endpoint receives
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub address: String,
    pub phone: String,
    /// `YYYY-MM-DD`, may be empty
    pub birth_date: String,
    pub pan: String,
}

/// Field carrying a validation error
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SignupField {
    FirstName,
    LastName,
    Email,
    Password,
    Address,
    Phone,
    BirthDate,
    Pan,
}

impl SignupField {
    /// Message shown under the field
    pub fn message(&self) -> &'static str {
        match self {
            SignupField::FirstName => "First name is required",
            SignupField::LastName => "Last name is required",
            SignupField::Email => "Email is invalid",
            SignupField::Password => "Password must be at least 6 characters long",
            SignupField::Address => "Address cannot be more than 50 characters long",
            SignupField::Phone => "Phone number must be 10 numeric digits",
            SignupField::BirthDate => "Birthdate cannot be in the future",
            SignupField::Pan => "PAN number must be 10 alphanumeric characters",
        }
    }
}

impl fmt::Display for SignupField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl SignupForm {
    /// Validate the account step
    pub fn validate_account(&self) -> Vec<SignupField> {
        let mut errors = Vec::new();
        if self.first_name.trim().is_empty() {
            errors.push(SignupField::FirstName);
        }
        if self.last_name.trim().is_empty() {
            errors.push(SignupField::LastName);
        }
        if !matches(&EMAIL, r"\S+@\S+\.\S+", &self.email) {
            errors.push(SignupField::Email);
        }
        if char_len(&self.password) < MIN_PASSWORD_LEN {
            errors.push(SignupField::Password);
        }
        errors
    }

    /// Validate the profile step
    ///
    /// An empty or unreadable birthdate passes; only a date after `today`
    /// is rejected.
    pub fn validate_profile(&self, today: NaiveDate) -> Vec<SignupField> {
        let mut errors = Vec::new();
        if char_len(&self.address) > MAX_ADDRESS_LEN {
            errors.push(SignupField::Address);
        }
        if !is_digits(&self.phone, 10) {
            errors.push(SignupField::Phone);
        }
        if parse_calendar_date(&self.birth_date).is_some_and(|date| date > today) {
            errors.push(SignupField::BirthDate);
        }
        if !matches(&PAN, r"^[A-Z0-9]{10}$", &self.pan) {
            errors.push(SignupField::Pan);
        }
        errors
    }
}

/// Step of the signup wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignupStep {
    #[default]
    Account,
    Profile,
}

/// State of the signup wizard
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignupFlow {
    form: SignupForm,
    step: SignupStep,
    errors: BTreeMap<SignupField, &'static str>,
}

impl SignupFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &SignupForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut SignupForm {
        &mut self.form
    }

    pub fn step(&self) -> SignupStep {
        self.step
    }

    /// Errors of the last validation, by field
    pub fn errors(&self) -> &BTreeMap<SignupField, &'static str> {
        &self.errors
    }

    /// Error for one field, if any
    pub fn error(&self, field: SignupField) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    /// Validate the account step and advance to the profile step
    ///
    /// Returns whether the flow advanced.
    pub fn next(&mut self) -> bool {
        let errors = self.form.validate_account();
        self.record(&errors);
        if errors.is_empty() {
            self.step = SignupStep::Profile;
        }
        errors.is_empty()
    }

    /// Go back to the account step, keeping the entered values
    pub fn back(&mut self) {
        self.errors.clear();
        self.step = SignupStep::Account;
    }

    /// Validate the profile step and hand out the form to submit
    ///
    /// Returns `None` while on the account step or when a profile field
    /// fails.
    pub fn submit(&mut self, today: NaiveDate) -> Option<&SignupForm> {
        if self.step != SignupStep::Profile {
            return None;
        }
        let errors = self.form.validate_profile(today);
        self.record(&errors);
        errors.is_empty().then_some(&self.form)
    }

    fn record(&mut self, errors: &[SignupField]) {
        self.errors = errors.iter().map(|f| (*f, f.message())).collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn filled_form() -> SignupForm {
        SignupForm {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password: "secret1".to_string(),
            address: "12 Analytical Street".to_string(),
            phone: "9876543210".to_string(),
            birth_date: "1990-12-10".to_string(),
            pan: "ABCDE1234F".to_string(),
        }
    }

    #[test]
    fn test_account_collects_every_error() {
        let form = SignupForm {
            email: "not-an-email".to_string(),
            password: "12345".to_string(),
            ..Default::default()
        };
        assert_eq!(
            form.validate_account(),
            vec![
                SignupField::FirstName,
                SignupField::LastName,
                SignupField::Email,
                SignupField::Password,
            ]
        );
        assert!(filled_form().validate_account().is_empty());
    }

    #[test]
    fn test_profile_rules() {
        let form = SignupForm {
            address: "a".repeat(51),
            phone: "12345".to_string(),
            birth_date: "2030-01-01".to_string(),
            pan: "abcde1234f".to_string(),
            ..filled_form()
        };
        assert_eq!(
            form.validate_profile(today()),
            vec![
                SignupField::Address,
                SignupField::Phone,
                SignupField::BirthDate,
                SignupField::Pan,
            ]
        );
        assert!(filled_form().validate_profile(today()).is_empty());
    }

    #[test]
    fn test_empty_or_unreadable_birthdate_passes() {
        for birth_date in ["", "sometime"] {
            let form = SignupForm {
                birth_date: birth_date.to_string(),
                ..filled_form()
            };
            assert!(form.validate_profile(today()).is_empty());
        }

        let born_today = SignupForm {
            birth_date: "2024-06-15".to_string(),
            ..filled_form()
        };
        assert!(born_today.validate_profile(today()).is_empty());
    }

    #[test]
    fn test_flow_advances_only_when_valid() {
        let mut flow = SignupFlow::new();
        assert!(!flow.next());
        assert_eq!(flow.step(), SignupStep::Account);
        assert_eq!(flow.error(SignupField::FirstName), Some("First name is required"));
        assert!(flow.submit(today()).is_none());

        *flow.form_mut() = filled_form();
        assert!(flow.next());
        assert_eq!(flow.step(), SignupStep::Profile);
        assert!(flow.errors().is_empty());

        flow.form_mut().pan = "short".to_string();
        assert!(flow.submit(today()).is_none());
        assert_eq!(
            flow.error(SignupField::Pan),
            Some("PAN number must be 10 alphanumeric characters")
        );

        flow.form_mut().pan = "ABCDE1234F".to_string();
        let submitted = flow.submit(today()).cloned();
        assert_eq!(submitted, Some(filled_form()));
    }

    #[test]
    fn test_back_keeps_values() {
        let mut flow = SignupFlow::new();
        *flow.form_mut() = filled_form();
        assert!(flow.next());
        flow.back();
        assert_eq!(flow.step(), SignupStep::Account);
        assert_eq!(flow.form(), &filled_form());
    }

    #[test]
    fn test_serializes_camel_case() {
        let value = serde_json::to_value(filled_form()).unwrap();
        assert_eq!(value["firstName"], "Ada");
        assert_eq!(value["birthDate"], "1990-12-10");
    }
}

//! Synthetic identity generation
//!
//! Pure functions of random entropy; no I/O. Usernames are alphanumeric only
//! and collision-resistant within a process run (random base plus a
//! millisecond timestamp suffix). Password shape is explicit configuration so
//! the application's complexity rules are visible, not buried in a literal.

use chrono::Utc;
use fake::faker::address::en::{CityName, StateAbbr, StreetName, ZipCode};
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Postal address as the registration form models it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

/// A generated fictitious user profile
///
/// Never mutated after generation; server-assigned identifiers live on
/// [`crate::store::CredentialRecord`], not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub first_name: String,
    pub last_name: String,
    pub address: Address,
    pub phone_number: String,
    pub ssn: String,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

/// Flattened view of an [`Identity`] with address fields hoisted to the top
/// level, for call sites (registration form fill) that expect flat fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityForm {
    pub first_name: String,
    pub last_name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub phone_number: String,
    pub ssn: String,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

impl Identity {
    /// Derive the flattened view without regenerating anything.
    pub fn flattened(&self) -> IdentityForm {
        IdentityForm {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            street: self.address.street.clone(),
            city: self.address.city.clone(),
            state: self.address.state.clone(),
            zip_code: self.address.zip_code.clone(),
            phone_number: self.phone_number.clone(),
            ssn: self.ssn.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            confirm_password: self.confirm_password.clone(),
        }
    }

    /// Override the confirmation value (used to exercise mismatch handling).
    pub fn with_confirm_password(mut self, confirm: &str) -> Self {
        self.confirm_password = confirm.to_string();
        self
    }
}

/// Password shape configuration
///
/// The prefix carries one character of each class the application requires
/// (upper, lower, digit, symbol); the remainder up to `length` is random
/// alphanumeric, with an optional fixed suffix.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    pub length: usize,
    pub prefix: String,
    pub suffix: String,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            length: 12,
            prefix: "Xy7!".to_string(),
            suffix: String::new(),
        }
    }
}

/// Random alphanumeric username, unique within a process run.
pub fn generate_username() -> String {
    let base: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(char::from)
        .collect();
    format!("{}{}", base, Utc::now().timestamp_millis())
}

/// Fixed-length password satisfying the application's character-class checks.
pub fn generate_password(policy: &PasswordPolicy) -> String {
    let fill = policy
        .length
        .saturating_sub(policy.prefix.len() + policy.suffix.len());
    let middle: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(fill)
        .map(char::from)
        .collect();
    format!("{}{}{}", policy.prefix, middle, policy.suffix)
}

fn digits(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len).map(|_| rng.gen_range(b'0'..=b'9') as char).collect()
}

/// Generate a complete identity under the default password policy.
pub fn generate_identity() -> Identity {
    generate_identity_with(&PasswordPolicy::default())
}

/// Generate a complete identity with an explicit password policy.
pub fn generate_identity_with(policy: &PasswordPolicy) -> Identity {
    let password = generate_password(policy);
    Identity {
        first_name: FirstName().fake(),
        last_name: LastName().fake(),
        address: Address {
            street: format!("{} {}", rand::thread_rng().gen_range(1..9999), StreetName().fake::<String>()),
            city: CityName().fake(),
            state: StateAbbr().fake(),
            zip_code: ZipCode().fake(),
        },
        phone_number: digits(10),
        ssn: digits(9),
        username: generate_username(),
        confirm_password: password.clone(),
        password,
    }
}

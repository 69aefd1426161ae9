//! Credential store
//!
//! Append-only JSON array of generated identities, shared across test runs so
//! later suites can reuse a pre-existing user. Known limitation: appends
//! rewrite the whole file with no locking, so the store assumes a single
//! writer (serial test execution). See DESIGN.md for the parallel-run risk.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::identity::Identity;

/// One persisted identity, enriched with server-assigned account ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRecord {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub phone_number: String,
    pub ssn: String,
    pub checking_account_id: Option<String>,
    pub savings_account_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl CredentialRecord {
    /// Build a record from a generated identity plus whatever account ids the
    /// application has assigned so far. `created_at` is stamped on append.
    pub fn from_identity(
        identity: &Identity,
        checking_account_id: Option<String>,
        savings_account_id: Option<String>,
    ) -> Self {
        Self {
            username: identity.username.clone(),
            password: identity.password.clone(),
            first_name: identity.first_name.clone(),
            last_name: identity.last_name.clone(),
            address: identity.address.street.clone(),
            city: identity.address.city.clone(),
            state: identity.address.state.clone(),
            zip_code: identity.address.zip_code.clone(),
            phone_number: identity.phone_number.clone(),
            ssn: identity.ssn.clone(),
            checking_account_id,
            savings_account_id,
            created_at: Utc::now(),
        }
    }
}

/// File-backed, append-only sequence of credential records
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a record, stamping `created_at` with the current time.
    ///
    /// Reads the existing array (empty if the file is absent), pushes, and
    /// writes the whole array back. Creates the file and parent directories
    /// on first use.
    pub fn append(&self, mut record: CredentialRecord) -> Result<()> {
        let mut records = match std::fs::read_to_string(&self.path) {
            Ok(text) => self.parse(&text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        record.created_at = Utc::now();
        debug!(username = %record.username, path = %self.path.display(), "appending credential record");
        records.push(record);

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&records)?)?;
        Ok(())
    }

    /// The most recently appended record.
    pub fn latest(&self) -> Result<CredentialRecord> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::StoreMissing(self.path.clone()))
            }
            Err(e) => return Err(e.into()),
        };
        let records = self.parse(&text)?;
        records
            .into_iter()
            .last()
            .ok_or_else(|| Error::StoreEmpty(self.path.clone()))
    }

    fn parse(&self, text: &str) -> Result<Vec<CredentialRecord>> {
        serde_json::from_str(text).map_err(|e| Error::StoreMalformed {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }
}

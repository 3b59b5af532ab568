//! Secure storage for the Unsplash access key using the OS keyring.
//!
//! The CLI remembers the key between runs without writing it to config
//! files; hosts that pass credentials per invocation never touch this
//! store.

use thiserror::Error;

/// Service name used for Lenz credentials in the OS keyring.
const SERVICE_NAME: &str = "lenz";

/// Keyring entry under which the access key is stored.
const ACCESS_KEY_ENTRY: &str = "unsplash/access_key";

/// Errors that can occur when accessing the credential store.
#[derive(Debug, Error)]
pub enum SecretsError {
    #[error("credential not found: {key}")]
    NotFound { key: String },

    #[error("keyring access denied: {0}")]
    AccessDenied(String),

    #[error("keyring unavailable: {0}")]
    Unavailable(String),

    #[error("keyring error: {0}")]
    Other(String),
}

impl From<keyring::Error> for SecretsError {
    fn from(err: keyring::Error) -> Self {
        match err {
            keyring::Error::NoEntry => SecretsError::NotFound {
                key: ACCESS_KEY_ENTRY.into(),
            },
            keyring::Error::NoStorageAccess(e) => SecretsError::AccessDenied(e.to_string()),
            keyring::Error::PlatformFailure(e) => SecretsError::Unavailable(e.to_string()),
            other => SecretsError::Other(other.to_string()),
        }
    }
}

pub type SecretsResult<T> = Result<T, SecretsError>;

/// Credential store backed by the OS keyring.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    service: String,
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore {
    pub fn new() -> Self {
        Self {
            service: SERVICE_NAME.into(),
        }
    }

    fn entry(&self) -> SecretsResult<keyring::Entry> {
        Ok(keyring::Entry::new(&self.service, ACCESS_KEY_ENTRY)?)
    }

    /// Store the access key in the keyring, replacing any previous value.
    pub fn store_access_key(&self, access_key: &str) -> SecretsResult<()> {
        self.entry()?.set_password(access_key)?;
        tracing::debug!("stored access key in keyring");
        Ok(())
    }

    /// Retrieve the stored access key.
    ///
    /// Returns `SecretsError::NotFound` if no key has been stored.
    pub fn get_access_key(&self) -> SecretsResult<String> {
        match self.entry()?.get_password() {
            Ok(secret) => Ok(secret),
            Err(keyring::Error::NoEntry) => Err(SecretsError::NotFound {
                key: ACCESS_KEY_ENTRY.into(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete the stored access key.
    ///
    /// Returns `Ok(())` even if no key was stored.
    pub fn clear_access_key(&self) -> SecretsResult<()> {
        match self.entry()?.delete_credential() {
            Ok(()) => {
                tracing::debug!("deleted access key from keyring");
                Ok(())
            }
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Check whether an access key is stored.
    pub fn has_access_key(&self) -> SecretsResult<bool> {
        match self.get_access_key() {
            Ok(_) => Ok(true),
            Err(SecretsError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Live keyring access needs a real platform store; only the error
    // mapping is covered here.

    #[test]
    fn missing_entries_map_to_not_found() {
        let err = SecretsError::from(keyring::Error::NoEntry);
        assert!(matches!(err, SecretsError::NotFound { key } if key == ACCESS_KEY_ENTRY));
    }
}

//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Credential policy and first-run provisioning configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Minimum password length for new accounts.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Reject passwords that zxcvbn scores below "safely unguessable".
    #[serde(default)]
    pub require_strong_passwords: bool,
    /// Initial password of the bootstrap `admin` account.
    ///
    /// Only used when the credential store is empty at startup. Operators
    /// are expected to rotate it after the first login.
    #[serde(default = "default_bootstrap_password")]
    pub bootstrap_admin_password: String,
    /// Email address of the bootstrap `admin` account.
    #[serde(default = "default_bootstrap_email")]
    pub bootstrap_admin_email: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            password_min_length: default_password_min(),
            require_strong_passwords: false,
            bootstrap_admin_password: default_bootstrap_password(),
            bootstrap_admin_email: default_bootstrap_email(),
        }
    }
}

fn default_password_min() -> usize {
    6
}

fn default_bootstrap_password() -> String {
    "admin123".to_string()
}

fn default_bootstrap_email() -> String {
    "admin@nas-os.local".to_string()
}

use tbapi_core::utils::Redact;
use tbapi_core::SigningCredential;
use std::fmt::{Debug, Formatter};

/// Credential issued to a partner of the BaaS platform.
///
/// A credential never changes once built. To rotate it, build a new
/// [`Client`](crate::Client) with [`Client::with_credential`](crate::Client::with_credential).
#[derive(Default, Clone, PartialEq, Eq)]
pub struct Credential {
    /// Public partner id, sent in the `Authorization` header.
    pub partner_id: String,
    /// Shared secret used as the HMAC key.
    pub secret: String,
}

impl Credential {
    /// Create a new credential.
    pub fn new(partner_id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            partner_id: partner_id.into(),
            secret: secret.into(),
        }
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("partner_id", &Redact::from(&self.partner_id))
            .field("secret", &Redact::from(&self.secret))
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        !self.partner_id.is_empty() && !self.secret.is_empty()
    }
}

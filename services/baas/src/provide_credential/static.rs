use crate::Credential;
use async_trait::async_trait;
use tbapi_core::{Context, ProvideCredential, Result};

/// StaticCredentialProvider provides the credential given at initialization time.
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider {
    credential: Credential,
}

impl StaticCredentialProvider {
    /// Create a new StaticCredentialProvider with partner id and secret.
    pub fn new(partner_id: &str, secret: &str) -> Self {
        Self {
            credential: Credential::new(partner_id, secret),
        }
    }
}

impl From<Credential> for StaticCredentialProvider {
    fn from(credential: Credential) -> Self {
        Self { credential }
    }
}

#[async_trait]
impl ProvideCredential for StaticCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        Ok(Some(self.credential.clone()))
    }
}

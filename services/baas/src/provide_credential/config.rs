use crate::{Config, Credential};
use async_trait::async_trait;
use std::sync::Arc;
use tbapi_core::{Context, ProvideCredential, Result};

/// ConfigCredentialProvider loads the credential from [`Config`].
///
/// Returns nothing unless both `partner_id` and `secret` are set.
#[derive(Debug)]
pub struct ConfigCredentialProvider {
    config: Arc<Config>,
}

impl ConfigCredentialProvider {
    /// Create a new ConfigCredentialProvider.
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ProvideCredential for ConfigCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        let (Some(partner_id), Some(secret)) = (&self.config.partner_id, &self.config.secret)
        else {
            return Ok(None);
        };

        Ok(Some(Credential::new(partner_id, secret)))
    }
}

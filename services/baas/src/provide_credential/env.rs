use crate::{constants::*, Credential};
use async_trait::async_trait;
use tbapi_core::{Context, ProvideCredential, Result};

/// EnvCredentialProvider loads the credential from environment variables.
///
/// This provider looks for the following environment variables:
/// - `TB_BAAS_PARTNER_ID`: the partner id
/// - `TB_BAAS_SECRET`: the shared secret
///
/// Both must be set, otherwise nothing is loaded.
#[derive(Debug, Default)]
pub struct EnvCredentialProvider;

impl EnvCredentialProvider {
    /// Create a new EnvCredentialProvider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        match (ctx.env_var(TB_BAAS_PARTNER_ID), ctx.env_var(TB_BAAS_SECRET)) {
            (Some(partner_id), Some(secret)) => Ok(Some(Credential { partner_id, secret })),
            _ => Ok(None),
        }
    }
}

use crate::constants::*;
use tbapi_core::utils::Redact;
use tbapi_core::Context;
use std::fmt::{Debug, Formatter};

/// Config for the BaaS client.
#[derive(Clone, Default)]
pub struct Config {
    /// Base uri every request path is relative to, for example
    /// `https://baas.talkbank.io/api/v1/`.
    pub base_uri: Option<String>,
    /// Partner id.
    pub partner_id: Option<String>,
    /// Shared secret.
    pub secret: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("base_uri", &self.base_uri)
            .field("partner_id", &Redact::from(&self.partner_id))
            .field("secret", &Redact::from(&self.secret))
            .finish()
    }
}

impl Config {
    /// Fill the fields that are still unset from environment variables.
    ///
    /// - `TB_BAAS_BASE_URI`
    /// - `TB_BAAS_PARTNER_ID`
    /// - `TB_BAAS_SECRET`
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if self.base_uri.is_none() {
            self.base_uri = ctx.env_var(TB_BAAS_BASE_URI);
        }
        if self.partner_id.is_none() {
            self.partner_id = ctx.env_var(TB_BAAS_PARTNER_ID);
        }
        if self.secret.is_none() {
            self.secret = ctx.env_var(TB_BAAS_SECRET);
        }
        self
    }
}

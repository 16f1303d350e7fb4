//! TalkBank BaaS support with convenience APIs.

pub use tbapi_baas::*;

#[cfg(feature = "default-context")]
use crate::{default_context, Result};

/// Create a client from environment variables.
///
/// - `TB_BAAS_BASE_URI`: base uri, for example `https://baas.example.com/api/v1/`
/// - `TB_BAAS_PARTNER_ID`: partner id
/// - `TB_BAAS_SECRET`: shared secret
///
/// The base uri is required. Missing credentials are reported when the first
/// request is signed.
///
/// # Example
///
/// ```no_run
/// # async fn example() -> tbapi::Result<()> {
/// let client = tbapi::baas::default_client()?;
/// let cards = client.card_list("client-1").await?;
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "default-context")]
pub fn default_client() -> Result<Client> {
    Client::from_config(default_context(), Config::default())
}

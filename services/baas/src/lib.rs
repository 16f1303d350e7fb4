//! TalkBank BaaS client with TB1-HMAC-SHA256 request signing.
//!
//! Every signed request carries four headers:
//!
//! - `Content-Type: application/json`
//! - `TB-Content-SHA256`: hex SHA256 of the JSON body (of `""` without body)
//! - `Date`: RFC 7231 date
//! - `Authorization: TB1-HMAC-SHA256 {partner_id}:{signature}`
//!
//! where the signature is the hex HMAC-SHA256 of the canonical request
//! (see [`CanonicalRequest`]) keyed with the partner secret.
//!
//! ## Quick Start
//!
//! ```no_run
//! use tbapi_baas::{Client, Config};
//! use tbapi_core::{Context, OsEnv};
//! use tbapi_http_send_reqwest::ReqwestHttpSend;
//!
//! # async fn example() -> tbapi_core::Result<()> {
//! let ctx = Context::new()
//!     .with_http_send(ReqwestHttpSend::default())
//!     .with_env(OsEnv);
//!
//! // Reads TB_BAAS_BASE_URI, TB_BAAS_PARTNER_ID and TB_BAAS_SECRET.
//! let client = Client::from_config(ctx, Config::default())?;
//!
//! let balance = client.account_balance().await?;
//! println!("{balance:?}");
//! # Ok(())
//! # }
//! ```
//!
//! Signing without the client is possible too, see [`RequestSigner`].

mod constants;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod sign_request;
pub use sign_request::{CanonicalRequest, RequestSigner};

mod provide_credential;
pub use provide_credential::{
    ConfigCredentialProvider, DefaultCredentialProvider, EnvCredentialProvider,
    StaticCredentialProvider,
};

mod request;
pub use request::RequestSpec;

mod payload;
pub use payload::Payload;

mod multipart;
pub use multipart::Multipart;

mod client;
pub use client::Client;

mod api;
pub use api::{
    AccountTransfer, FormPayment, Hold, HoldWithForm, TransactionsQuery, UnregisteredCardCharge,
};

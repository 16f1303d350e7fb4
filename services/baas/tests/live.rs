use std::env;

use anyhow::Result;
use log::warn;
use tbapi_baas::{Client, Config, Payload};
use tbapi_core::{Context, ErrorKind, OsEnv};
use tbapi_http_send_reqwest::ReqwestHttpSend;

/// Build a client against a real BaaS environment.
///
/// Reads `TB_BAAS_BASE_URI`, `TB_BAAS_PARTNER_ID` and `TB_BAAS_SECRET`,
/// only when `TB_BAAS_TEST` is `on`.
fn init_live_client() -> Option<Client> {
    let _ = env_logger::builder().is_test(true).try_init();
    let _ = dotenv::dotenv();

    if env::var("TB_BAAS_TEST").ok().as_deref() != Some("on") {
        return None;
    }

    let ctx = Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);
    Some(Client::from_config(ctx, Config::default()).expect("TB_BAAS_BASE_URI must be set"))
}

#[tokio::test]
async fn test_live_account_balance() -> Result<()> {
    let Some(client) = init_live_client() else {
        warn!("TB_BAAS_TEST is not set, skipped");
        return Ok(());
    };

    let payload = client.account_balance().await?;
    assert!(matches!(payload, Payload::Json(_)));
    Ok(())
}

#[tokio::test]
async fn test_live_event_subscriptions() -> Result<()> {
    let Some(client) = init_live_client() else {
        warn!("TB_BAAS_TEST is not set, skipped");
        return Ok(());
    };

    client.event_subscription_list().await?;
    Ok(())
}

#[tokio::test]
async fn test_live_wrong_secret_is_rejected() -> Result<()> {
    let Some(client) = init_live_client() else {
        warn!("TB_BAAS_TEST is not set, skipped");
        return Ok(());
    };

    let partner_id = env::var("TB_BAAS_PARTNER_ID")?;
    let client = client.with_credential(tbapi_baas::Credential::new(partner_id, "wrong"));

    let err = client.account_balance().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::HttpStatus);
    assert!(err.is_credential_error());
    Ok(())
}

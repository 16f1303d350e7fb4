use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let client = tbapi::baas::default_client()?;

    let balance = client.account_balance().await?;
    println!("balance: {balance:?}");

    let subscriptions = client.event_subscription_list().await?;
    println!("subscriptions: {subscriptions:?}");

    Ok(())
}

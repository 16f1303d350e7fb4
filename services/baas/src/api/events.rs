use serde::Serialize;
use tbapi_core::Result;

use super::seg;
use crate::{Client, Payload, RequestSpec};

#[derive(Serialize)]
struct Subscription<'a> {
    url: &'a str,
    events: &'a [&'a str],
}

impl Client {
    /// Event subscriptions of the partner.
    ///
    /// `GET event-subscriptions`
    pub async fn event_subscription_list(&self) -> Result<Payload> {
        self.send(RequestSpec::get("event-subscriptions")).await
    }

    /// Subscribe `url` to `events`. An empty list subscribes to nothing.
    ///
    /// `POST event-subscriptions`
    pub async fn event_subscription_store(&self, url: &str, events: &[&str]) -> Result<Payload> {
        self.send(RequestSpec::post("event-subscriptions").json(&Subscription { url, events })?)
            .await
    }

    /// Remove a subscription.
    ///
    /// `DELETE event-subscriptions/{subscription_id}`
    pub async fn event_subscription_remove(&self, subscription_id: &str) -> Result<Payload> {
        let path = format!("event-subscriptions/{}", seg(subscription_id));
        self.send(RequestSpec::delete(path)).await
    }
}

#[cfg(test)]
mod tests {
    use crate::api::testing::{client, describe};
    use pretty_assertions::assert_eq;
    use tbapi_core::Result;

    #[tokio::test]
    async fn test_event_subscription_store() -> Result<()> {
        let (client, recorder) = client();
        client
            .event_subscription_store("https://partner.example.com/hook", &[])
            .await?;

        let (method, paq, body) = describe(&recorder.last());
        assert_eq!(method, "POST");
        assert_eq!(paq, "/api/v1/event-subscriptions");
        assert_eq!(
            body,
            r#"{"events":[],"url":"https://partner.example.com/hook"}"#
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_event_subscription_remove() -> Result<()> {
        let (client, recorder) = client();
        client.event_subscription_remove("42").await?;

        let (method, paq, _) = describe(&recorder.last());
        assert_eq!(method, "DELETE");
        assert_eq!(paq, "/api/v1/event-subscriptions/42");
        Ok(())
    }
}

use serde::Serialize;
use serde_json::{json, Value};
use tbapi_core::Result;

use super::{seg, TransactionsQuery};
use crate::{Client, Payload, RequestSpec};

#[derive(Serialize)]
struct Reason<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'a str>,
}

#[derive(Serialize)]
struct ActivationType<'a> {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    kind: Option<&'a str>,
}

#[derive(Serialize)]
struct CardAmount<'a> {
    amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    order_id: Option<&'a str>,
}

fn card_path(client_id: &str, barcode: &str) -> String {
    format!("clients/{}/cards/{}", seg(client_id), seg(barcode))
}

impl Client {
    /// Cards of a client.
    ///
    /// `GET clients/{client_id}/cards`
    pub async fn card_list(&self, client_id: &str) -> Result<Payload> {
        self.send(RequestSpec::get(format!("clients/{}/cards", seg(client_id))))
            .await
    }

    /// Card details.
    pub async fn card_details(&self, client_id: &str, barcode: &str) -> Result<Payload> {
        self.send(RequestSpec::get(card_path(client_id, barcode)))
            .await
    }

    /// Status of a card order.
    ///
    /// `GET clients/{client_id}/cards/{barcode}/{order_id}`
    pub async fn card_order_status(
        &self,
        client_id: &str,
        barcode: &str,
        order_id: &str,
    ) -> Result<Payload> {
        let path = format!("{}/{}", card_path(client_id, barcode), seg(order_id));
        self.send(RequestSpec::get(path)).await
    }

    /// Card balance.
    pub async fn card_balance(&self, client_id: &str, barcode: &str) -> Result<Payload> {
        let path = format!("{}/balance", card_path(client_id, barcode));
        self.send(RequestSpec::get(path)).await
    }

    /// Whether the card is locked.
    pub async fn card_lock_status(&self, client_id: &str, barcode: &str) -> Result<Payload> {
        let path = format!("{}/lock", card_path(client_id, barcode));
        self.send(RequestSpec::get(path)).await
    }

    /// Lock a card.
    ///
    /// `POST clients/{client_id}/cards/{barcode}/lock`
    pub async fn card_lock(
        &self,
        client_id: &str,
        barcode: &str,
        reason: Option<&str>,
    ) -> Result<Payload> {
        let path = format!("{}/lock", card_path(client_id, barcode));
        self.send(RequestSpec::post(path).json(&Reason { reason })?)
            .await
    }

    /// Unlock a card.
    ///
    /// `DELETE clients/{client_id}/cards/{barcode}/lock`
    pub async fn card_unlock(&self, client_id: &str, barcode: &str) -> Result<Payload> {
        let path = format!("{}/lock", card_path(client_id, barcode));
        self.send(RequestSpec::delete(path)).await
    }

    /// Issue a virtual card.
    ///
    /// `POST clients/{client_id}/virtual-cards`
    pub async fn card_activate_virtual(&self, client_id: &str) -> Result<Payload> {
        self.send(RequestSpec::post(format!(
            "clients/{}/virtual-cards",
            seg(client_id)
        )))
        .await
    }

    /// Activate a card.
    pub async fn card_activate(
        &self,
        client_id: &str,
        barcode: &str,
        kind: Option<&str>,
    ) -> Result<Payload> {
        let path = format!("{}/activate", card_path(client_id, barcode));
        self.send(RequestSpec::post(path).json(&ActivationType { kind })?)
            .await
    }

    /// Activation status of a card.
    pub async fn card_activation(&self, client_id: &str, barcode: &str) -> Result<Payload> {
        let path = format!("{}/activation", card_path(client_id, barcode));
        self.send(RequestSpec::get(path)).await
    }

    /// Card security code.
    ///
    /// `GET clients/{client_id}/cards/{barcode}/security-code`
    pub async fn card_cvv(&self, client_id: &str, barcode: &str) -> Result<Payload> {
        let path = format!("{}/security-code", card_path(client_id, barcode));
        self.send(RequestSpec::get(path)).await
    }

    /// Cardholder data.
    pub async fn card_cardholder_data(&self, client_id: &str, barcode: &str) -> Result<Payload> {
        let path = format!("{}/cardholder/data", card_path(client_id, barcode));
        self.send(RequestSpec::get(path)).await
    }

    /// Card limits.
    pub async fn card_limits(&self, client_id: &str, barcode: &str) -> Result<Payload> {
        let path = format!("{}/limits", card_path(client_id, barcode));
        self.send(RequestSpec::get(path)).await
    }

    /// Card transactions in given period.
    ///
    /// `GET clients/{client_id}/cards/{barcode}/transactions`
    pub async fn card_transactions(
        &self,
        client_id: &str,
        barcode: &str,
        query: &TransactionsQuery,
    ) -> Result<Payload> {
        let path = format!("{}/transactions", card_path(client_id, barcode));
        self.send(query.apply(RequestSpec::get(path))).await
    }

    /// Move money from the account to a card.
    ///
    /// `POST clients/{client_id}/cards/{barcode}/refill`
    pub async fn card_refill(
        &self,
        client_id: &str,
        barcode: &str,
        amount: f64,
        order_id: Option<&str>,
    ) -> Result<Payload> {
        let path = format!("{}/refill", card_path(client_id, barcode));
        self.send(RequestSpec::post(path).json(&CardAmount { amount, order_id })?)
            .await
    }

    /// Move money from a card to the account.
    ///
    /// `POST clients/{client_id}/cards/{barcode}/withdrawal`
    pub async fn card_withdrawal(
        &self,
        client_id: &str,
        barcode: &str,
        amount: f64,
        order_id: Option<&str>,
    ) -> Result<Payload> {
        let path = format!("{}/withdrawal", card_path(client_id, barcode));
        self.send(RequestSpec::post(path).json(&CardAmount { amount, order_id })?)
            .await
    }

    /// Set card pin.
    pub async fn card_set_pin(&self, client_id: &str, barcode: &str, pin: &str) -> Result<Payload> {
        let path = format!("{}/set/pin", card_path(client_id, barcode));
        self.send(RequestSpec::post(path).json(&json!({ "pin": pin }))?)
            .await
    }

    /// Order delivery of a card.
    ///
    /// `params` is passed through as the request body.
    ///
    /// `POST clients/{client_id}/card-deliveries`
    pub async fn card_delivery_store(&self, client_id: &str, params: &Value) -> Result<Payload> {
        let path = format!("clients/{}/card-deliveries", seg(client_id));
        self.send(RequestSpec::post(path).json(params)?).await
    }

    /// Card delivery details.
    ///
    /// `GET clients/{client_id}/card-deliveries/{delivery_id}`
    pub async fn card_delivery_show(&self, client_id: &str, delivery_id: &str) -> Result<Payload> {
        let path = format!(
            "clients/{}/card-deliveries/{}",
            seg(client_id),
            seg(delivery_id)
        );
        self.send(RequestSpec::get(path)).await
    }
}

#[cfg(test)]
mod tests {
    use crate::api::testing::{client, describe};
    use pretty_assertions::assert_eq;
    use tbapi_core::Result;

    #[tokio::test]
    async fn test_card_lock() -> Result<()> {
        let (client, recorder) = client();

        client.card_lock("c-1", "2000", Some("stolen")).await?;
        assert_eq!(
            describe(&recorder.last()),
            (
                "POST".to_string(),
                "/api/v1/clients/c-1/cards/2000/lock".to_string(),
                r#"{"reason":"stolen"}"#.to_string()
            )
        );

        client.card_lock("c-1", "2000", None).await?;
        assert_eq!(describe(&recorder.last()).2, "");

        client.card_unlock("c-1", "2000").await?;
        assert_eq!(describe(&recorder.last()).0, "DELETE");
        Ok(())
    }

    #[tokio::test]
    async fn test_card_balance_path() -> Result<()> {
        let (client, recorder) = client();
        client.card_balance("c 1", "2000").await?;

        assert_eq!(
            describe(&recorder.last()).1,
            "/api/v1/clients/c%201/cards/2000/balance"
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_card_refill() -> Result<()> {
        let (client, recorder) = client();
        client.card_refill("c-1", "2000", 10.5, Some("o-1")).await?;

        let (method, paq, body) = describe(&recorder.last());
        assert_eq!(method, "POST");
        assert_eq!(paq, "/api/v1/clients/c-1/cards/2000/refill");
        assert_eq!(body, r#"{"amount":10.5,"order_id":"o-1"}"#);
        Ok(())
    }

    #[tokio::test]
    async fn test_card_activate_type() -> Result<()> {
        let (client, recorder) = client();
        client.card_activate("c-1", "2000", Some("virtual")).await?;

        assert_eq!(describe(&recorder.last()).2, r#"{"type":"virtual"}"#);
        Ok(())
    }
}

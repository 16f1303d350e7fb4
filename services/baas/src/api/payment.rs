use serde::Serialize;
use serde_json::Value;
use tbapi_core::Result;

use super::seg;
use crate::{Client, Payload, RequestSpec};

/// Parameters of [`Client::payment_from_unregistered_card`].
#[derive(Debug, Clone, Serialize)]
pub struct UnregisteredCardCharge {
    /// Amount in minor units.
    pub amount: u64,
    /// Card data, sent as is.
    pub card_info: Value,
    /// Where to send the user after 3DS.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    /// Partner side order id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_slug: Option<String>,
}

/// Parameters of the payment form endpoints.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FormPayment {
    /// Amount in minor units.
    pub amount: u64,
    /// Partner side order id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_slug: Option<String>,
    /// Where to send the user after the form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
}

/// Bank transfer from the partner account.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AccountTransfer {
    /// Amount in minor units.
    pub amount: u64,
    /// Beneficiary account number.
    pub account: String,
    /// Beneficiary bank BIK.
    pub bik: String,
    /// Beneficiary name.
    pub name: String,
    /// Beneficiary tax number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inn: Option<String>,
    /// Payment purpose.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Partner side order id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_slug: Option<String>,
}

#[derive(Serialize)]
struct TokenCharge<'a> {
    redirect_url: &'a str,
    amount: u64,
}

#[derive(Serialize)]
struct CardTokenPayment<'a> {
    amount: u64,
    card_token: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    order_slug: Option<&'a str>,
}

#[derive(Serialize)]
struct OrderAmount<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    amount: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    order_slug: Option<&'a str>,
}

#[derive(Serialize)]
struct CardNumberRefill<'a> {
    card_number: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    amount: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    order_slug: Option<&'a str>,
}

#[derive(Serialize)]
struct Authorization<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    card_info: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    redirect_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    order_slug: Option<&'a str>,
}

impl Client {
    /// Charge an unregistered card.
    ///
    /// `POST charge/{client_id}/unregistered/card`
    pub async fn payment_from_unregistered_card(
        &self,
        client_id: &str,
        params: &UnregisteredCardCharge,
    ) -> Result<Payload> {
        let path = format!("charge/{}/unregistered/card", seg(client_id));
        self.send(RequestSpec::post(path).json(params)?).await
    }

    /// Status of an unregistered card charge.
    ///
    /// `GET charge/unregistered/card/{order_id}`
    pub async fn payment_from_unregistered_card_status(&self, order_id: &str) -> Result<Payload> {
        let path = format!("charge/unregistered/card/{}", seg(order_id));
        self.send(RequestSpec::get(path)).await
    }

    /// Get a token to charge an unregistered card from the client side.
    ///
    /// `POST charge/{client_id}/token`
    pub async fn payment_from_unregistered_card_token(
        &self,
        client_id: &str,
        redirect_url: &str,
        amount: u64,
    ) -> Result<Payload> {
        let path = format!("charge/{}/token", seg(client_id));
        self.send(RequestSpec::post(path).json(&TokenCharge {
            redirect_url,
            amount,
        })?)
        .await
    }

    /// Get a token to refill an unregistered card from the client side.
    ///
    /// `POST refill/{client_id}/token`
    pub async fn payment_to_unregistered_card_token(
        &self,
        client_id: &str,
        amount: u64,
        order_slug: Option<&str>,
    ) -> Result<Payload> {
        let path = format!("refill/{}/token", seg(client_id));
        self.send(RequestSpec::post(path).json(&OrderAmount {
            amount: Some(amount),
            order_slug,
        })?)
        .await
    }

    /// Charge an unregistered card through the payment form.
    ///
    /// `POST charge/{client_id}/unregistered/card/with/form`
    pub async fn payment_from_unregistered_card_with_form(
        &self,
        client_id: &str,
        params: &FormPayment,
    ) -> Result<Payload> {
        let path = format!("charge/{}/unregistered/card/with/form", seg(client_id));
        self.send(RequestSpec::post(path).json(params)?).await
    }

    /// Charge a registered card.
    ///
    /// `POST payment/from/{client_id}/registered/card`
    pub async fn payment_from_registered_card(
        &self,
        client_id: &str,
        card_token: &str,
        amount: u64,
        order_slug: Option<&str>,
    ) -> Result<Payload> {
        let path = format!("payment/from/{}/registered/card", seg(client_id));
        self.send(RequestSpec::post(path).json(&CardTokenPayment {
            amount,
            card_token,
            order_slug,
        })?)
        .await
    }

    /// Refill a registered card.
    ///
    /// `POST payment/to/{client_id}/registered/card`
    pub async fn payment_to_registered_card(
        &self,
        client_id: &str,
        card_token: &str,
        amount: u64,
        order_slug: Option<&str>,
    ) -> Result<Payload> {
        let path = format!("payment/to/{}/registered/card", seg(client_id));
        self.send(RequestSpec::post(path).json(&CardTokenPayment {
            amount,
            card_token,
            order_slug,
        })?)
        .await
    }

    /// Authorize (register) a card.
    ///
    /// `POST authorize/card/{client_id}`
    pub async fn payment_authorization(
        &self,
        client_id: &str,
        card_info: &Value,
        redirect_url: Option<&str>,
    ) -> Result<Payload> {
        let path = format!("authorize/card/{}", seg(client_id));
        self.send(RequestSpec::post(path).json(&Authorization {
            card_info: Some(card_info),
            redirect_url,
            order_slug: None,
        })?)
        .await
    }

    /// Get a token to authorize a card from the client side.
    ///
    /// `POST authorize/card/{client_id}/token`
    pub async fn payment_authorization_token(
        &self,
        client_id: &str,
        redirect_url: Option<&str>,
    ) -> Result<Payload> {
        let path = format!("authorize/card/{}/token", seg(client_id));
        self.send(RequestSpec::post(path).json(&Authorization {
            card_info: None,
            redirect_url,
            order_slug: None,
        })?)
        .await
    }

    /// Authorize a card through the payment form.
    ///
    /// `POST authorize/card/{client_id}/with/form`
    pub async fn payment_authorization_with_form(
        &self,
        client_id: &str,
        redirect_url: Option<&str>,
        order_slug: Option<&str>,
    ) -> Result<Payload> {
        let path = format!("authorize/card/{}/with/form", seg(client_id));
        self.send(RequestSpec::post(path).json(&Authorization {
            card_info: None,
            redirect_url,
            order_slug,
        })?)
        .await
    }

    /// Bank transfer from the partner account.
    ///
    /// `POST account/transfer`
    pub async fn payment_to_account(&self, params: &AccountTransfer) -> Result<Payload> {
        self.send(RequestSpec::post("account/transfer").json(params)?)
            .await
    }

    /// Refill an unregistered card by its number.
    ///
    /// `POST refill/unregistered/card`
    pub async fn payment_to_unregistered_card(
        &self,
        card_number: &str,
        amount: Option<u64>,
        order_slug: Option<&str>,
    ) -> Result<Payload> {
        self.send(
            RequestSpec::post("refill/unregistered/card").json(&CardNumberRefill {
                card_number,
                amount,
                order_slug,
            })?,
        )
        .await
    }

    /// Refill an unregistered card through the payment form.
    ///
    /// `POST refill/{client_id}/unregistered/card/with/form`
    pub async fn payment_to_unregistered_card_with_form(
        &self,
        client_id: &str,
        params: &FormPayment,
    ) -> Result<Payload> {
        let path = format!("refill/{}/unregistered/card/with/form", seg(client_id));
        self.send(RequestSpec::post(path).json(params)?).await
    }

    /// Status of a payment.
    ///
    /// `GET payment/{order_slug}`
    pub async fn payment_status(&self, order_slug: &str) -> Result<Payload> {
        self.send(RequestSpec::get(format!("payment/{}", seg(order_slug))))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{client, describe};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[tokio::test]
    async fn test_payment_to_registered_card_path() -> Result<()> {
        let (client, recorder) = client();
        client
            .payment_to_registered_card("c-1", "tok", 100, None)
            .await?;

        let (method, paq, body) = describe(&recorder.last());
        assert_eq!(method, "POST");
        assert_eq!(paq, "/api/v1/payment/to/c-1/registered/card");
        assert_eq!(body, r#"{"amount":100,"card_token":"tok"}"#);
        Ok(())
    }

    #[tokio::test]
    async fn test_payment_from_unregistered_card() -> Result<()> {
        let (client, recorder) = client();
        client
            .payment_from_unregistered_card(
                "c-1",
                &UnregisteredCardCharge {
                    amount: 100,
                    card_info: json!({"pan": "4111111111111111"}),
                    redirect_url: None,
                    order_slug: Some("o-1".to_string()),
                },
            )
            .await?;

        let (_, paq, body) = describe(&recorder.last());
        assert_eq!(paq, "/api/v1/charge/c-1/unregistered/card");
        assert_eq!(
            body,
            r#"{"amount":100,"card_info":{"pan":"4111111111111111"},"order_slug":"o-1"}"#
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_payment_to_account() -> Result<()> {
        let (client, recorder) = client();
        client
            .payment_to_account(&AccountTransfer {
                amount: 1000,
                account: "40702810000000000001".to_string(),
                bik: "044525225".to_string(),
                name: "ООО Ромашка".to_string(),
                ..Default::default()
            })
            .await?;

        let (_, paq, body) = describe(&recorder.last());
        assert_eq!(paq, "/api/v1/account/transfer");
        assert_eq!(
            body,
            r#"{"account":"40702810000000000001","amount":1000,"bik":"044525225","name":"ООО Ромашка"}"#
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_payment_status() -> Result<()> {
        let (client, recorder) = client();
        client.payment_status("o-1").await?;
        client.payment_from_unregistered_card_status("o-2").await?;

        let requests = recorder.requests.lock().unwrap();
        assert_eq!(requests[0].uri().path(), "/api/v1/payment/o-1");
        assert_eq!(
            requests[1].uri().path(),
            "/api/v1/charge/unregistered/card/o-2"
        );
        Ok(())
    }
}

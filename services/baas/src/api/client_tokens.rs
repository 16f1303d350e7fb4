use serde::Serialize;
use serde_json::Value;
use tbapi_core::Result;

use super::seg;
use crate::{Client, Payload, RequestSpec};

// Token flows carry the token issued to the end user. The charge goes
// unsigned to the host root, the others are ordinary signed calls.

#[derive(Serialize)]
struct TokenCard<'a> {
    token: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    amount: Option<u64>,
    card_info: &'a Value,
}

#[derive(Serialize)]
struct TokenRefill<'a> {
    token: &'a str,
    card_number: &'a str,
}

impl Client {
    /// Charge an unregistered card with a charge token.
    ///
    /// `POST /client/v1/charge`
    pub async fn unsigned_payment_from_unregistered_card(
        &self,
        token: &str,
        amount: u64,
        card_info: &Value,
    ) -> Result<Payload> {
        self.send_unsigned(RequestSpec::post("/client/v1/charge").json(&TokenCard {
            token,
            amount: Some(amount),
            card_info,
        })?)
        .await
    }

    /// Refill an unregistered card with a refill token.
    ///
    /// `POST client/v1/refill`
    pub async fn unsigned_payment_to_unregistered_card(
        &self,
        token: &str,
        card_number: &str,
    ) -> Result<Payload> {
        let body = TokenRefill { token, card_number };
        self.send(RequestSpec::post("client/v1/refill").json(&body)?)
            .await
    }

    /// Authorize a card with an authorization token.
    ///
    /// `POST client/v1/authorize`
    pub async fn unsigned_payment_authorization(
        &self,
        token: &str,
        card_info: &Value,
    ) -> Result<Payload> {
        self.send(RequestSpec::post("client/v1/authorize").json(&TokenCard {
            token,
            amount: None,
            card_info,
        })?)
        .await
    }

    /// Hold money with a hold token.
    ///
    /// `POST client/v1/hold`
    pub async fn unsigned_hold(&self, token: &str, card_info: &Value) -> Result<Payload> {
        self.send(RequestSpec::post("client/v1/hold").json(&TokenCard {
            token,
            amount: None,
            card_info,
        })?)
        .await
    }

    /// Status of a token flow payment.
    ///
    /// `GET client/v1/status/{hash}`
    pub async fn unsigned_payment_status_by_hash(&self, hash: &str) -> Result<Payload> {
        self.send(RequestSpec::get(format!("client/v1/status/{}", seg(hash))))
            .await
    }
}

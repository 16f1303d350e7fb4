use serde::Serialize;
use serde_json::Value;
use tbapi_core::Result;

use super::seg;
use crate::{Client, Payload, RequestSpec};

/// Parameters of [`Client::hold`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct Hold {
    /// Amount in minor units.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<u64>,
    /// Partner side order id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_slug: Option<String>,
    /// Card data, sent as is.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_info: Option<Value>,
    /// Reference to a saved card.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_ref_id: Option<String>,
    /// Where to send the user after 3DS.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
}

/// Parameters of [`Client::hold_with_form`].
#[derive(Debug, Clone, Serialize)]
pub struct HoldWithForm {
    /// Where to send the user after the form.
    pub redirect_url: String,
    /// Amount in minor units.
    pub amount: u64,
    /// Partner side order id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_slug: Option<String>,
    /// Token of a saved card.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_token: Option<String>,
}

impl HoldWithForm {
    /// Create parameters with required fields.
    pub fn new(redirect_url: impl Into<String>, amount: u64) -> Self {
        Self {
            redirect_url: redirect_url.into(),
            amount,
            order_slug: None,
            card_token: None,
        }
    }
}

#[derive(Serialize)]
struct OptionalAmount {
    #[serde(skip_serializing_if = "Option::is_none")]
    amount: Option<u64>,
}

impl Client {
    /// Hold money on a card.
    ///
    /// `POST hold`
    pub async fn hold(&self, params: &Hold) -> Result<Payload> {
        self.send(RequestSpec::post("hold").json(params)?).await
    }

    /// Hold money on a card through the payment form.
    ///
    /// `POST hold/{client_id}/with/form`
    pub async fn hold_with_form(&self, client_id: &str, params: &HoldWithForm) -> Result<Payload> {
        let path = format!("hold/{}/with/form", seg(client_id));
        self.send(RequestSpec::post(path).json(params)?).await
    }

    /// Charge held money, fully or `amount` of it.
    ///
    /// `POST hold/confirm/{order_slug}`
    pub async fn hold_confirm(&self, order_slug: &str, amount: Option<u64>) -> Result<Payload> {
        let path = format!("hold/confirm/{}", seg(order_slug));
        self.send(RequestSpec::post(path).json(&OptionalAmount { amount })?)
            .await
    }

    /// Release held money, fully or `amount` of it.
    ///
    /// `POST hold/reverse/{order_slug}`
    pub async fn hold_reverse(&self, order_slug: &str, amount: Option<u64>) -> Result<Payload> {
        let path = format!("hold/reverse/{}", seg(order_slug));
        self.send(RequestSpec::post(path).json(&OptionalAmount { amount })?)
            .await
    }
}

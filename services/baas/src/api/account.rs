use chrono::SecondsFormat;
use tbapi_core::time::DateTime;
use tbapi_core::Result;

use crate::{Client, Payload, RequestSpec};

/// Query of the transaction listing endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionsQuery {
    /// Start of the period.
    pub from: DateTime,
    /// End of the period.
    pub to: DateTime,
    /// Page number, starts at 1.
    pub page: u32,
    /// Page size.
    pub limit: u32,
}

impl TransactionsQuery {
    /// Query the first page of 1000 entries in given period.
    pub fn new(from: DateTime, to: DateTime) -> Self {
        Self {
            from,
            to,
            page: 1,
            limit: 1000,
        }
    }

    /// Set page number.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Set page size.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub(crate) fn apply(&self, req: RequestSpec) -> RequestSpec {
        req.query("fromDate", iso8601(self.from))
            .query("toDate", iso8601(self.to))
            .query("page", self.page)
            .query("limit", self.limit)
    }
}

fn iso8601(t: DateTime) -> String {
    t.to_rfc3339_opts(SecondsFormat::Secs, false)
}

impl Client {
    /// Account balance.
    ///
    /// `GET balance`
    pub async fn account_balance(&self) -> Result<Payload> {
        self.send(RequestSpec::get("balance")).await
    }

    /// Account history.
    ///
    /// `GET transactions`
    pub async fn account_transactions(&self) -> Result<Payload> {
        self.send(RequestSpec::get("transactions")).await
    }

    /// Card transactions of all clients in given period.
    ///
    /// `GET cards-transactions`
    pub async fn account_cards_transactions(&self, query: &TransactionsQuery) -> Result<Payload> {
        self.send(query.apply(RequestSpec::get("cards-transactions")))
            .await
    }
}

//! Endpoint wrappers grouped by area.
//!
//! Every wrapper is a thin method on [`Client`](crate::Client) that builds a
//! [`RequestSpec`](crate::RequestSpec) and sends it.

use percent_encoding::utf8_percent_encode;
use tbapi_core::RFC3986_ENCODE_SET;

mod account;
pub use account::TransactionsQuery;

mod cards;

mod clients;

mod client_tokens;

mod events;

mod hold;
pub use hold::Hold;
pub use hold::HoldWithForm;

mod payment;
pub use payment::AccountTransfer;
pub use payment::FormPayment;
pub use payment::UnregisteredCardCharge;

/// Percent encode one path segment.
fn seg(s: &str) -> String {
    utf8_percent_encode(s, &RFC3986_ENCODE_SET).to_string()
}

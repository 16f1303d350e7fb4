use std::collections::BTreeMap;

use bytes::Bytes;
use http::Method;
use serde::Serialize;
use serde_json::{Map, Value};
use tbapi_core::{Error, Result};

/// RequestSpec describes one API call before it is signed.
///
/// `path` is relative to the client's base uri. Query keys are kept sorted
/// and single valued. The body is always a JSON object, top-level `null`
/// values are never sent.
///
/// ```
/// use tbapi_baas::RequestSpec;
///
/// # fn main() -> tbapi_core::Result<()> {
/// let req = RequestSpec::get("cards-transactions")
///     .query("page", 1)
///     .query_opt("limit", None::<u32>);
/// assert!(req.body().is_none());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    method: Method,
    path: String,
    query: BTreeMap<String, String>,
    body: Option<Map<String, Value>>,
}

impl RequestSpec {
    /// Create a request with given method and path.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: BTreeMap::new(),
            body: None,
        }
    }

    /// Create a `GET` request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Create a `POST` request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Create a `PUT` request.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// Create a `DELETE` request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Set a query parameter, replacing the previous value of the same key.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.insert(key.into(), value.to_string());
        self
    }

    /// Set a query parameter only if the value is present.
    pub fn query_opt(self, key: impl Into<String>, value: Option<impl ToString>) -> Self {
        match value {
            Some(v) => self.query(key, v),
            None => self,
        }
    }

    /// Set the JSON body.
    ///
    /// `params` must serialize into a JSON object. `null` and empty objects
    /// result in a request without body.
    pub fn json(mut self, params: &impl Serialize) -> Result<Self> {
        self.body = match serde_json::to_value(params)? {
            Value::Null => None,
            Value::Object(mut map) => {
                map.retain(|_, v| !v.is_null());
                (!map.is_empty()).then_some(map)
            }
            v => {
                return Err(Error::encoding(format!(
                    "request body must be a JSON object, got {v}"
                )))
            }
        };
        Ok(self)
    }

    /// Http method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Path relative to the base uri.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query parameters, sorted by key.
    pub fn query_params(&self) -> &BTreeMap<String, String> {
        &self.query
    }

    /// JSON body if any.
    pub fn body(&self) -> Option<&Map<String, Value>> {
        self.body.as_ref()
    }

    /// Serialize the body into compact JSON.
    ///
    /// Returns empty bytes if there is no body.
    pub fn body_bytes(&self) -> Result<Bytes> {
        match &self.body {
            Some(map) => Ok(serde_json::to_vec(map)?.into()),
            None => Ok(Bytes::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[derive(Serialize)]
    struct Params {
        amount: u64,
        order_slug: Option<String>,
    }

    #[test]
    fn test_query_builder() {
        let req = RequestSpec::get("cards-transactions")
            .query("page", 1)
            .query("limit", 1000)
            .query_opt("toDate", None::<String>)
            .query_opt("fromDate", Some("2024-01-01"));

        assert_eq!(req.method(), Method::GET);
        assert_eq!(req.path(), "cards-transactions");
        assert_eq!(
            req.query_params().keys().collect::<Vec<_>>(),
            vec!["fromDate", "limit", "page"]
        );
    }

    #[test]
    fn test_json_body() -> Result<()> {
        let req = RequestSpec::post("hold/confirm/o-1").json(&Params {
            amount: 100,
            order_slug: None,
        })?;

        assert_eq!(req.body(), json!({"amount": 100}).as_object());
        assert_eq!(req.body_bytes()?, Bytes::from_static(br#"{"amount":100}"#));
        Ok(())
    }

    #[test]
    fn test_json_keeps_unicode_unescaped() -> Result<()> {
        let req = RequestSpec::post("clients").json(&json!({"name": "Иван"}))?;
        assert_eq!(
            String::from_utf8(req.body_bytes()?.to_vec())?,
            r#"{"name":"Иван"}"#
        );
        Ok(())
    }

    #[test]
    fn test_empty_body() -> Result<()> {
        let req = RequestSpec::post("virtual-cards").json(&json!({"reason": null}))?;
        assert!(req.body().is_none());
        assert!(req.body_bytes()?.is_empty());

        let req = RequestSpec::post("virtual-cards").json(&())?;
        assert!(req.body().is_none());
        Ok(())
    }

    #[test]
    fn test_non_object_body() {
        let err = RequestSpec::post("hold").json(&[1, 2, 3]).unwrap_err();
        assert_eq!(err.kind(), tbapi_core::ErrorKind::Encoding);
    }
}

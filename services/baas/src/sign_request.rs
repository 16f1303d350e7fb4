//! TB1-HMAC-SHA256 request signing.
use std::fmt;
use std::fmt::Write;

use async_trait::async_trait;
use http::header::{HeaderName, AUTHORIZATION, DATE};
use http::request::Parts;
use http::HeaderValue;
use log::debug;
use tbapi_core::hash::{hex_hmac_sha256, EMPTY_STRING_SHA256};
use tbapi_core::time::{format_http_date, now, DateTime};
use tbapi_core::{Context, Error, Result, SignRequest, SigningRequest};

use crate::constants::{TB1_HMAC_SHA256, TB_CONTENT_SHA256};
use crate::Credential;

/// RequestSigner that implements TB1-HMAC-SHA256 signing.
///
/// The signer reads the body hash from the `TB-Content-SHA256` header. When
/// the header is missing the request is signed as if it had an empty body and
/// the header is added with the hash of the empty string.
#[derive(Debug, Default)]
pub struct RequestSigner {
    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new signer.
    pub fn new() -> Self {
        Self { time: None }
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _: &Context,
        parts: &mut Parts,
        credential: Option<&Self::Credential>,
    ) -> Result<()> {
        let cred = credential.ok_or_else(|| Error::credential_invalid("missing credential"))?;
        let now = self.time.unwrap_or_else(now);

        let mut req = SigningRequest::build(parts)?;

        let body_hash = match req.headers.get(TB_CONTENT_SHA256) {
            Some(v) => v.to_str()?.trim().to_string(),
            None => EMPTY_STRING_SHA256.to_string(),
        };
        req.headers
            .insert(TB_CONTENT_SHA256, HeaderValue::from_str(&body_hash)?);
        req.headers
            .insert(DATE, HeaderValue::from_str(&format_http_date(now))?);

        let string_to_sign = CanonicalRequest::new(&req)?.to_string();
        debug!("calculated string to sign: {string_to_sign:?}");

        let signature = hex_hmac_sha256(cred.secret.as_bytes(), string_to_sign.as_bytes());

        let mut authorization = HeaderValue::from_str(&format!(
            "{TB1_HMAC_SHA256} {}:{signature}",
            cred.partner_id
        ))?;
        authorization.set_sensitive(true);
        req.headers.insert(AUTHORIZATION, authorization);

        req.apply(parts)
    }
}

/// Canonical form of a request, the input of the HMAC.
///
/// ```text
/// method + "\n" +
/// absolute_path + "\n" +
/// query + "\n" +
/// headers + "\n" +
/// body_hash
/// ```
///
/// where `headers` is
///
/// ```text
/// "date:" + Date + "\n" +
/// "tb-content-sha256:" + body_hash
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRequest {
    /// Upper cased http method.
    pub method: String,
    /// Path component of the full url, without scheme, host or query.
    pub absolute_path: String,
    /// Query sorted by key and RFC 3986 encoded.
    pub query: String,
    /// Signed headers sorted by name, joined by `\n`.
    pub headers: String,
    /// Lower case hex SHA256 of the JSON body.
    pub body_hash: String,
}

impl CanonicalRequest {
    /// Build the canonical form from a signing request.
    ///
    /// `date` and `tb-content-sha256` headers must be present already. No
    /// other header is signed.
    pub fn new(req: &SigningRequest) -> Result<Self> {
        let date = req.header_get_or_default(&DATE)?.trim();
        let body_hash = req
            .header_get_or_default(&HeaderName::from_static(TB_CONTENT_SHA256))?
            .trim();
        if date.is_empty() || body_hash.is_empty() {
            return Err(Error::request_invalid(
                "date and tb-content-sha256 headers are required for signing",
            ));
        }

        let headers = SigningRequest::header_to_string(
            vec![
                (TB_CONTENT_SHA256.to_string(), body_hash.to_string()),
                (DATE.as_str().to_string(), date.to_string()),
            ],
            ":",
            "\n",
        );

        Ok(Self {
            method: req.method.as_str().to_ascii_uppercase(),
            absolute_path: req.path.clone(),
            query: SigningRequest::query_to_encoded_string(req.query.clone()),
            headers,
            body_hash: body_hash.to_string(),
        })
    }
}

impl fmt::Display for CanonicalRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.method)?;
        f.write_char('\n')?;
        f.write_str(&self.absolute_path)?;
        f.write_char('\n')?;
        f.write_str(&self.query)?;
        f.write_char('\n')?;
        f.write_str(&self.headers)?;
        f.write_char('\n')?;
        f.write_str(&self.body_hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use tbapi_core::hash::hex_sha256;

    const DATE_STR: &str = "Tue, 15 Nov 1994 08:12:31 GMT";

    fn signing_time() -> DateTime {
        Utc.with_ymd_and_hms(1994, 11, 15, 8, 12, 31).unwrap()
    }

    fn credential() -> Credential {
        Credential::new("000a11b22c33d44e", "a0000000000000000000000000000001")
    }

    async fn sign(req: http::Request<()>) -> Result<Parts> {
        let (mut parts, _) = req.into_parts();
        RequestSigner::new()
            .with_time(signing_time())
            .sign_request(&Context::new(), &mut parts, Some(&credential()))
            .await?;
        Ok(parts)
    }

    fn expected_authorization(string_to_sign: &str) -> String {
        format!(
            "TB1-HMAC-SHA256 000a11b22c33d44e:{}",
            hex_hmac_sha256(
                b"a0000000000000000000000000000001",
                string_to_sign.as_bytes()
            )
        )
    }

    #[tokio::test]
    async fn test_sign_get_without_query_and_body() -> Result<()> {
        let req = http::Request::get("https://baas.example.com/api/v1/balance").body(())?;
        let parts = sign(req).await?;

        let expected = format!(
            "GET\n/api/v1/balance\n\ndate:{DATE_STR}\ntb-content-sha256:{EMPTY_STRING_SHA256}\n{EMPTY_STRING_SHA256}"
        );
        assert_eq!(parts.headers[DATE], DATE_STR);
        assert_eq!(parts.headers[TB_CONTENT_SHA256], EMPTY_STRING_SHA256);
        assert_eq!(
            parts.headers[AUTHORIZATION].to_str()?,
            expected_authorization(&expected)
        );
        assert!(parts.headers[AUTHORIZATION].is_sensitive());
        Ok(())
    }

    #[tokio::test]
    async fn test_canonical_request_for_body() -> Result<()> {
        let body = r#"{"amount":100,"order_slug":"заказ-1"}"#;
        let body_hash = hex_sha256(body.as_bytes());

        let (mut parts, _) = http::Request::post("https://baas.example.com/api/v1/hold/confirm/o-1")
            .header(TB_CONTENT_SHA256, &body_hash)
            .header(DATE, DATE_STR)
            .body(())?
            .into_parts();
        let req = SigningRequest::build(&mut parts)?;

        let creq = CanonicalRequest::new(&req)?;
        assert_eq!(creq.method, "POST");
        assert_eq!(creq.absolute_path, "/api/v1/hold/confirm/o-1");
        assert_eq!(creq.query, "");
        assert_eq!(creq.body_hash, body_hash);
        assert_eq!(
            creq.to_string(),
            format!("POST\n/api/v1/hold/confirm/o-1\n\ndate:{DATE_STR}\ntb-content-sha256:{body_hash}\n{body_hash}")
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_sign_is_independent_of_query_order() -> Result<()> {
        let a = sign(
            http::Request::get(
                "https://baas.example.com/api/v1/cards-transactions?page=1&limit=1000&fromDate=2024-01-01",
            )
            .body(())?,
        )
        .await?;
        let b = sign(
            http::Request::get(
                "https://baas.example.com/api/v1/cards-transactions?fromDate=2024-01-01&limit=1000&page=1",
            )
            .body(())?,
        )
        .await?;

        let expected = format!(
            "GET\n/api/v1/cards-transactions\nfromDate=2024-01-01&limit=1000&page=1\ndate:{DATE_STR}\ntb-content-sha256:{EMPTY_STRING_SHA256}\n{EMPTY_STRING_SHA256}"
        );
        assert_eq!(a.headers[AUTHORIZATION], b.headers[AUTHORIZATION]);
        assert_eq!(
            a.headers[AUTHORIZATION].to_str()?,
            expected_authorization(&expected)
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_sign_is_independent_of_header_order() -> Result<()> {
        let hash = hex_sha256(br#"{"amount":100}"#);

        let a = sign(
            http::Request::post("https://baas.example.com/api/v1/hold")
                .header("X-Request-Id", "1")
                .header("TB-Content-SHA256", &hash)
                .body(())?,
        )
        .await?;
        let b = sign(
            http::Request::post("https://baas.example.com/api/v1/hold")
                .header("tb-content-sha256", format!(" {hash} "))
                .header("x-request-id", "2")
                .body(())?,
        )
        .await?;

        assert_eq!(a.headers[AUTHORIZATION], b.headers[AUTHORIZATION]);
        Ok(())
    }

    #[tokio::test]
    async fn test_sign_is_deterministic() -> Result<()> {
        let build = || {
            http::Request::delete("https://baas.example.com/api/v1/event-subscriptions/42")
                .body(())
        };

        let a = sign(build()?).await?;
        let b = sign(build()?).await?;
        assert_eq!(a.headers[AUTHORIZATION], b.headers[AUTHORIZATION]);
        assert_eq!(a.uri, b.uri);
        Ok(())
    }

    #[tokio::test]
    async fn test_sign_query_uses_rfc3986() -> Result<()> {
        let parts = sign(
            http::Request::get("https://baas.example.com/api/v1/transactions?q=a%20b&date=2024-01-01T00%3A00%3A00%2B03%3A00")
                .body(())?,
        )
        .await?;

        let expected = format!(
            "GET\n/api/v1/transactions\ndate=2024-01-01T00%3A00%3A00%2B03%3A00&q=a%20b\ndate:{DATE_STR}\ntb-content-sha256:{EMPTY_STRING_SHA256}\n{EMPTY_STRING_SHA256}"
        );
        assert_eq!(
            parts.headers[AUTHORIZATION].to_str()?,
            expected_authorization(&expected)
        );
        assert_eq!(
            parts.uri.query(),
            Some("date=2024-01-01T00%3A00%3A00%2B03%3A00&q=a%20b")
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_sign_without_credential() -> Result<()> {
        let (mut parts, _) = http::Request::get("https://baas.example.com/api/v1/balance")
            .body(())?
            .into_parts();

        let err = RequestSigner::new()
            .sign_request(&Context::new(), &mut parts, None)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), tbapi_core::ErrorKind::CredentialInvalid);
        Ok(())
    }
}

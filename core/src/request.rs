use std::mem;
use std::str::FromStr;

use http::header::HeaderName;
use http::uri::Authority;
use http::uri::PathAndQuery;
use http::uri::Scheme;
use http::HeaderMap;
use http::Method;
use http::Uri;
use percent_encoding::utf8_percent_encode;
use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

use crate::{Error, Result};

/// RFC 3986 encode set: everything except unreserved characters is percent encoded.
///
/// Space becomes `%20`, never `+`.
pub static RFC3986_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Signing context for request.
#[derive(Debug)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// HTTP scheme.
    pub scheme: Scheme,
    /// HTTP authority.
    pub authority: Authority,
    /// HTTP path, as it appears on the wire.
    pub path: String,
    /// HTTP query parameters, percent decoded.
    pub query: Vec<(String, String)>,
    /// HTTP headers.
    pub headers: HeaderMap,
}

impl SigningRequest {
    /// Build a signing context from http::request::Parts.
    pub fn build(parts: &mut http::request::Parts) -> Result<Self> {
        let uri = mem::take(&mut parts.uri).into_parts();
        let paq = uri
            .path_and_query
            .unwrap_or_else(|| PathAndQuery::from_static("/"));

        Ok(SigningRequest {
            method: parts.method.clone(),
            scheme: uri.scheme.unwrap_or(Scheme::HTTPS),
            authority: uri.authority.ok_or_else(|| {
                Error::request_invalid("request without authority is invalid for signing")
            })?,
            path: paq.path().to_string(),
            query: paq
                .query()
                .map(|v| {
                    form_urlencoded::parse(v.as_bytes())
                        .map(|(k, v)| (k.into_owned(), v.into_owned()))
                        .collect()
                })
                .unwrap_or_default(),

            // Take the headers out of the request to avoid copy.
            // We will return it back when apply the context.
            headers: mem::take(&mut parts.headers),
        })
    }

    /// Apply the signing context back to http::request::Parts.
    pub fn apply(mut self, parts: &mut http::request::Parts) -> Result<()> {
        // Return headers back.
        mem::swap(&mut parts.headers, &mut self.headers);
        parts.method = self.method;
        parts.uri = {
            let mut uri_parts = mem::take(&mut parts.uri).into_parts();
            uri_parts.scheme = Some(self.scheme);
            uri_parts.authority = Some(self.authority);
            uri_parts.path_and_query = {
                let query = Self::query_to_encoded_string(self.query);
                let paq = if query.is_empty() {
                    self.path
                } else {
                    format!("{}?{}", self.path, query)
                };

                Some(PathAndQuery::from_str(&paq)?)
            };
            Uri::from_parts(uri_parts)?
        };

        Ok(())
    }

    /// Convert query to a sorted RFC 3986 encoded string.
    ///
    /// ```shell
    /// [(b, "x y"), (a, "1")] => "a=1&b=x%20y"
    /// ```
    ///
    /// Keys with an empty value keep their `=`.
    pub fn query_to_encoded_string(mut query: Vec<(String, String)>) -> String {
        let mut s = String::with_capacity(16);

        // Sort via query key.
        query.sort();

        for (idx, (k, v)) in query.into_iter().enumerate() {
            if idx != 0 {
                s.push('&');
            }

            s.extend(utf8_percent_encode(&k, &RFC3986_ENCODE_SET));
            s.push('=');
            s.extend(utf8_percent_encode(&v, &RFC3986_ENCODE_SET));
        }

        s
    }

    /// Get header value by name.
    ///
    /// Returns empty string if header not found.
    #[inline]
    pub fn header_get_or_default(&self, key: &HeaderName) -> Result<&str> {
        match self.headers.get(key) {
            Some(v) => Ok(v.to_str()?),
            None => Ok(""),
        }
    }

    /// Convert sorted headers to string.
    ///
    /// ```shell
    /// [(a, b), (c, d)] => "a:b\nc:d"
    /// ```
    pub fn header_to_string(mut headers: Vec<(String, String)>, sep: &str, join: &str) -> String {
        let mut s = String::with_capacity(16);

        // Sort via header name.
        headers.sort();

        for (idx, (k, v)) in headers.into_iter().enumerate() {
            if idx != 0 {
                s.push_str(join);
            }

            s.push_str(&k);
            s.push_str(sep);
            s.push_str(&v);
        }

        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn parts(uri: &str) -> http::request::Parts {
        http::Request::get(uri).body(()).unwrap().into_parts().0
    }

    #[test_case(vec![], ""; "empty")]
    #[test_case(vec![("page", "1")], "page=1"; "single")]
    #[test_case(vec![("toDate", "b"), ("fromDate", "a"), ("limit", "10")], "fromDate=a&limit=10&toDate=b"; "sorted")]
    #[test_case(vec![("q", "a b+c")], "q=a%20b%2Bc"; "rfc3986")]
    #[test_case(vec![("date", "2024-01-01T00:00:00+03:00")], "date=2024-01-01T00%3A00%3A00%2B03%3A00"; "reserved")]
    #[test_case(vec![("name", "Иван"), ("x", "~_.-")], "name=%D0%98%D0%B2%D0%B0%D0%BD&x=~_.-"; "unicode and unreserved")]
    #[test_case(vec![("flag", "")], "flag="; "empty value")]
    fn test_query_to_encoded_string(input: Vec<(&str, &str)>, expected: &str) {
        let query = input
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert_eq!(SigningRequest::query_to_encoded_string(query), expected);
    }

    #[test]
    fn test_header_to_string() {
        let headers = vec![
            ("tb-content-sha256".to_string(), "abc".to_string()),
            ("date".to_string(), "Tue, 15 Nov 1994 08:12:31 GMT".to_string()),
        ];
        assert_eq!(
            SigningRequest::header_to_string(headers, ":", "\n"),
            "date:Tue, 15 Nov 1994 08:12:31 GMT\ntb-content-sha256:abc"
        );
    }

    #[test]
    fn test_build_and_apply() -> Result<()> {
        let mut parts = parts("https://baas.example.com/api/v1/cards-transactions?page=2&fromDate=a%20b");
        parts.headers.insert("date", "now".parse()?);

        let req = SigningRequest::build(&mut parts)?;
        assert_eq!(req.method, Method::GET);
        assert_eq!(req.authority.as_str(), "baas.example.com");
        assert_eq!(req.path, "/api/v1/cards-transactions");
        assert_eq!(
            req.query,
            vec![
                ("page".to_string(), "2".to_string()),
                ("fromDate".to_string(), "a b".to_string()),
            ]
        );
        assert!(parts.headers.is_empty());

        req.apply(&mut parts)?;
        assert_eq!(
            parts.uri.to_string(),
            "https://baas.example.com/api/v1/cards-transactions?fromDate=a%20b&page=2"
        );
        assert_eq!(parts.headers["date"], "now");
        Ok(())
    }

    #[test]
    fn test_build_without_authority() {
        let mut parts = parts("/api/v1/balance");
        let err = SigningRequest::build(&mut parts).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::RequestInvalid);
    }
}

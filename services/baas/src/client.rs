use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;

use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::uri::PathAndQuery;
use http::{HeaderValue, Method, Uri};
use log::debug;
use tbapi_core::hash::hex_sha256;
use tbapi_core::{Context, Error, ProvideCredential, Result, Signer, SigningRequest};

use crate::constants::{CONTENT_TYPE_JSON, TB_BAAS_BASE_URI, TB_CONTENT_SHA256};
use crate::provide_credential::{DefaultCredentialProvider, StaticCredentialProvider};
use crate::{Config, Credential, Multipart, Payload, RequestSigner, RequestSpec};

/// Client sends signed requests to the BaaS API.
///
/// A client is immutable and cheap to clone. Use [`Client::with_credential`]
/// to get a client with another credential.
///
/// ```no_run
/// use tbapi_baas::{Client, Credential};
/// use tbapi_core::Context;
///
/// # async fn example(ctx: Context) -> tbapi_core::Result<()> {
/// let client = Client::new(
///     ctx,
///     "https://baas.example.com/api/v1/",
///     Credential::new("partner_id", "secret"),
/// )?;
/// let balance = client.account_balance().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Client {
    base_uri: Uri,
    signer: Signer<Credential>,
}

impl Client {
    /// Create a client with a fixed credential.
    pub fn new(ctx: Context, base_uri: &str, credential: Credential) -> Result<Self> {
        Self::with_provider(ctx, base_uri, StaticCredentialProvider::from(credential))
    }

    /// Create a client loading its credential from given provider.
    pub fn with_provider(
        ctx: Context,
        base_uri: &str,
        provider: impl ProvideCredential<Credential = Credential>,
    ) -> Result<Self> {
        let base_uri = parse_base_uri(base_uri)?;
        Ok(Self::with_signer(
            base_uri,
            Signer::new(ctx, provider, RequestSigner::new()),
        ))
    }

    /// Create a client from a prepared signer.
    pub fn with_signer(base_uri: Uri, signer: Signer<Credential>) -> Self {
        Self { base_uri, signer }
    }

    /// Create a client from config, falling back to environment variables
    /// for unset fields.
    pub fn from_config(ctx: Context, config: Config) -> Result<Self> {
        let config = config.from_env(&ctx);
        let base_uri = config.base_uri.clone().ok_or_else(|| {
            Error::config_invalid(format!("base uri is not set, configure {TB_BAAS_BASE_URI}"))
        })?;

        Self::with_provider(
            ctx,
            &base_uri,
            DefaultCredentialProvider::new(Arc::new(config)),
        )
    }

    /// Returns a new client using given credential. `self` is left untouched.
    pub fn with_credential(&self, credential: Credential) -> Self {
        Self {
            base_uri: self.base_uri.clone(),
            signer: Signer::new(
                self.signer.context().clone(),
                StaticCredentialProvider::from(credential),
                RequestSigner::new(),
            ),
        }
    }

    /// Base uri of this client.
    pub fn base_uri(&self) -> &Uri {
        &self.base_uri
    }

    /// Sign and send a JSON request.
    pub async fn send(&self, req: RequestSpec) -> Result<Payload> {
        let body = req.body_bytes()?;
        let uri = self.build_uri(req.path(), req.query_params())?;

        let mut parts = request_parts(req.method(), uri)?;
        parts
            .headers
            .insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_JSON));
        parts
            .headers
            .insert(TB_CONTENT_SHA256, HeaderValue::from_str(&hex_sha256(&body))?);
        self.signer.sign(&mut parts).await?;

        self.dispatch(http::Request::from_parts(parts, body)).await
    }

    /// Sign and send a multipart request.
    ///
    /// The multipart body is not hashed: the request is signed as if it had
    /// no body.
    pub async fn send_multipart(
        &self,
        method: Method,
        path: &str,
        form: Multipart,
    ) -> Result<Payload> {
        let uri = self.build_uri(path, &BTreeMap::new())?;

        let mut parts = request_parts(&method, uri)?;
        parts
            .headers
            .insert(CONTENT_TYPE, HeaderValue::from_str(&form.content_type())?);
        self.signer.sign(&mut parts).await?;

        self.dispatch(http::Request::from_parts(parts, form.encode()))
            .await
    }

    /// Send a JSON request without signature.
    ///
    /// The path of `req` is absolute on the host of the base uri. Only the
    /// token charge `/client/v1/charge` goes this way.
    pub async fn send_unsigned(&self, req: RequestSpec) -> Result<Payload> {
        let body = req.body_bytes()?;
        let path = format!("/{}", req.path().trim_start_matches('/'));
        let uri = self.uri_with_path(&path, req.query_params())?;

        let mut parts = request_parts(req.method(), uri)?;
        parts
            .headers
            .insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_JSON));

        self.dispatch(http::Request::from_parts(parts, body)).await
    }

    /// Join `path` onto the base uri.
    ///
    /// A leading `/` on `path` is ignored, the path is always relative to the
    /// base path.
    fn build_uri(&self, path: &str, query: &BTreeMap<String, String>) -> Result<Uri> {
        let base_path = self.base_uri.path().trim_end_matches('/');
        let path = format!("{base_path}/{}", path.trim_start_matches('/'));
        self.uri_with_path(&path, query)
    }

    fn uri_with_path(&self, path: &str, query: &BTreeMap<String, String>) -> Result<Uri> {
        let query = SigningRequest::query_to_encoded_string(
            query
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        );
        let paq = if query.is_empty() {
            path.to_string()
        } else {
            format!("{path}?{query}")
        };

        let mut parts = self.base_uri.clone().into_parts();
        parts.path_and_query = Some(PathAndQuery::from_str(&paq)?);
        Ok(Uri::from_parts(parts)?)
    }

    async fn dispatch(&self, req: http::Request<Bytes>) -> Result<Payload> {
        let method = req.method().clone();
        let uri = req.uri().clone();

        let resp = self.signer.context().http_send(req).await?;
        let (parts, body) = resp.into_parts();

        if !parts.status.is_success() {
            debug!(
                "{method} {uri} failed with status {}: {}",
                parts.status,
                String::from_utf8_lossy(&body)
            );
            return Err(Error::http_status(parts.status, body));
        }

        Payload::decode(body)
    }
}

fn parse_base_uri(base_uri: &str) -> Result<Uri> {
    let uri = Uri::from_str(base_uri).map_err(|e| {
        Error::config_invalid(format!("base uri {base_uri:?} is invalid")).with_source(e)
    })?;
    if uri.scheme().is_none() || uri.authority().is_none() {
        return Err(Error::config_invalid(format!(
            "base uri {base_uri:?} must contain scheme and host"
        )));
    }
    Ok(uri)
}

fn request_parts(method: &Method, uri: Uri) -> Result<http::request::Parts> {
    Ok(http::Request::builder()
        .method(method.clone())
        .uri(uri)
        .body(())?
        .into_parts()
        .0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn client(base_uri: &str) -> Client {
        Client::new(
            Context::new(),
            base_uri,
            Credential::new("partner", "secret"),
        )
        .unwrap()
    }

    #[test_case("https://host/api/v1/", "balance", "https://host/api/v1/balance"; "relative")]
    #[test_case("https://host/api/v1/", "/clients/1/cards/2/balance", "https://host/api/v1/clients/1/cards/2/balance"; "leading slash")]
    #[test_case("https://host/api/v1", "balance", "https://host/api/v1/balance"; "base without trailing slash")]
    #[test_case("https://host", "balance", "https://host/balance"; "base without path")]
    fn test_build_uri(base: &str, path: &str, expected: &str) {
        let uri = client(base).build_uri(path, &BTreeMap::new()).unwrap();
        assert_eq!(uri.to_string(), expected);
    }

    #[test]
    fn test_build_uri_with_query() -> Result<()> {
        let query = BTreeMap::from([
            ("toDate".to_string(), "2024-01-31T00:00:00+00:00".to_string()),
            ("fromDate".to_string(), "2024-01-01T00:00:00+00:00".to_string()),
        ]);
        let uri = client("https://host/api/v1/").build_uri("cards-transactions", &query)?;
        assert_eq!(
            uri.to_string(),
            "https://host/api/v1/cards-transactions?fromDate=2024-01-01T00%3A00%3A00%2B00%3A00&toDate=2024-01-31T00%3A00%3A00%2B00%3A00"
        );
        Ok(())
    }

    #[test_case("not a uri"; "invalid")]
    #[test_case("/api/v1/"; "without host")]
    fn test_invalid_base_uri(base: &str) {
        let err = Client::new(Context::new(), base, Credential::default()).unwrap_err();
        assert_eq!(err.kind(), tbapi_core::ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_from_config_without_base_uri() {
        let err = Client::from_config(Context::new(), Config::default()).unwrap_err();
        assert_eq!(err.kind(), tbapi_core::ErrorKind::ConfigInvalid);
    }
}

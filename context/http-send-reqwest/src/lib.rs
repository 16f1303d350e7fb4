//! [`HttpSend`] implementation backed by [`reqwest`].
//!
//! Timeouts, TLS and connection pooling are configured on the
//! [`reqwest::Client`] handed to [`ReqwestHttpSend::new`].

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::BodyExt;
use reqwest::{Client, Request};
use tbapi_core::{Error, HttpSend, Result};

/// HttpSend implementation using a [`reqwest::Client`].
#[derive(Debug, Default, Clone)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let req = Request::try_from(req).map_err(|e| {
            Error::request_invalid("failed to convert request").with_source(e)
        })?;
        let resp: http::Response<_> = self
            .client
            .execute(req)
            .await
            .map_err(|e| Error::transport("failed to send request").with_source(e))?
            .into();

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(|e| Error::transport("failed to read response body").with_source(e))?;
        Ok(http::Response::from_parts(parts, bs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tbapi_core::{Context, ErrorKind};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_http_send_keeps_error_status() -> anyhow::Result<()> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.expect("accept must succeed");
            let mut buf = [0u8; 1024];
            let _ = stream.read(&mut buf).await;
            let _ = stream
                .write_all(b"HTTP/1.1 401 Unauthorized\r\ncontent-length: 9\r\nconnection: close\r\n\r\nbad token")
                .await;
        });

        let ctx = Context::new().with_http_send(ReqwestHttpSend::default());
        let req = http::Request::get(format!("http://{addr}/api/v1/balance")).body(Bytes::new())?;
        let resp = ctx.http_send(req).await?;

        assert_eq!(resp.status(), http::StatusCode::UNAUTHORIZED);
        assert_eq!(resp.body().as_ref(), b"bad token");
        Ok(())
    }

    #[tokio::test]
    async fn test_http_send_connection_refused() -> anyhow::Result<()> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        drop(listener);

        let ctx = Context::new().with_http_send(ReqwestHttpSend::default());
        let req = http::Request::get(format!("http://{addr}/")).body(Bytes::new())?;
        let err = ctx.http_send(req).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Transport);
        Ok(())
    }
}

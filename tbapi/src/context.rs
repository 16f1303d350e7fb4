use tbapi_core::{Context, OsEnv};
use tbapi_http_send_reqwest::ReqwestHttpSend;

/// Create a context sending requests with `reqwest` and reading the process
/// environment.
pub fn default_context() -> Context {
    Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv)
}

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tbapi_core::Result;

/// Payload is the decoded body of a successful response.
///
/// Bodies starting with `{` or `[` are parsed as JSON, everything else is
/// returned unchanged. Some endpoints answer with bare values like `1500.50`,
/// others with binary documents.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// JSON object or array.
    Json(Value),
    /// Body as received, text or binary.
    Raw(Bytes),
}

impl Payload {
    /// Decode response body.
    pub fn decode(body: Bytes) -> Result<Self> {
        match body.first() {
            Some(b'{') | Some(b'[') => Ok(Payload::Json(serde_json::from_slice(&body)?)),
            _ => Ok(Payload::Raw(body)),
        }
    }

    /// Returns the JSON value if payload is JSON.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Payload::Json(v) => Some(v),
            Payload::Raw(_) => None,
        }
    }

    /// Returns the bytes if payload is raw.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Payload::Json(_) => None,
            Payload::Raw(b) => Some(b),
        }
    }

    /// Returns the text if payload is raw and valid utf-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(self.as_bytes()?).ok()
    }

    /// Convert into JSON value. Raw payloads become JSON strings and must be
    /// valid utf-8.
    pub fn into_json(self) -> Result<Value> {
        match self {
            Payload::Json(v) => Ok(v),
            Payload::Raw(b) => Ok(Value::String(String::from_utf8(b.to_vec())?)),
        }
    }

    /// Deserialize the payload into `T`.
    ///
    /// Raw payloads are parsed as JSON text, so `1500.50` deserializes into
    /// an `f64`.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        match self {
            Payload::Json(v) => Ok(serde_json::from_value(v.clone())?),
            Payload::Raw(b) => Ok(serde_json::from_slice(b)?),
        }
    }
}

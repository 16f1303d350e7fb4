use bytes::Bytes;
use http::Method;
use serde::Serialize;
use serde_json::Value;
use tbapi_core::Result;

use super::seg;
use crate::{Client, Multipart, Payload, RequestSpec};

#[derive(Serialize)]
struct ClientPerson<'a> {
    client_id: &'a str,
    person: &'a Value,
}

impl Client {
    /// Register a client.
    ///
    /// `person` is passed through as is.
    ///
    /// `POST clients`
    pub async fn client_store(&self, client_id: &str, person: &Value) -> Result<Payload> {
        self.send(RequestSpec::post("clients").json(&ClientPerson { client_id, person })?)
            .await
    }

    /// Update client data.
    ///
    /// `PUT clients/{client_id}`
    pub async fn client_edit(&self, client_id: &str, person: &Value) -> Result<Payload> {
        let path = format!("clients/{}", seg(client_id));
        self.send(RequestSpec::put(path).json(&ClientPerson { client_id, person })?)
            .await
    }

    /// Client data.
    ///
    /// `GET clients/{client_id}`
    pub async fn client_show(&self, client_id: &str) -> Result<Payload> {
        self.send(RequestSpec::get(format!("clients/{}", seg(client_id))))
            .await
    }

    /// Client questionnaire as pdf.
    ///
    /// `GET clients/{client_id}/pdf`
    pub async fn client_pdf(&self, client_id: &str) -> Result<Payload> {
        self.send(RequestSpec::get(format!("clients/{}/pdf", seg(client_id))))
            .await
    }

    /// Upload an identity document of a client.
    ///
    /// The file is sent as `multipart/form-data` with fields `type` and
    /// `file`.
    ///
    /// `POST clients/{client_id}/documents`
    pub async fn client_document_upload(
        &self,
        client_id: &str,
        document_type: &str,
        file_name: &str,
        content_type: &str,
        content: impl Into<Bytes>,
    ) -> Result<Payload> {
        let form = Multipart::new().text("type", document_type).file(
            "file",
            file_name,
            content_type,
            content,
        );
        let path = format!("clients/{}/documents", seg(client_id));
        self.send_multipart(Method::POST, &path, form).await
    }

    /// Self-employment registration status of a client.
    ///
    /// `GET selfemployments/{client_id}`
    pub async fn selfemployments_registration_status(&self, client_id: &str) -> Result<Payload> {
        self.send(RequestSpec::get(format!(
            "selfemployments/{}",
            seg(client_id)
        )))
        .await
    }
}

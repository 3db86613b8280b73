//! Typed endpoint wrappers.
//!
//! One method per REST operation, mapping the gateway's `(status, body)`
//! pairs onto domain models and error variants. Grouped the way the API is:
//! auth, units, subtopics, pdfs, images.

use crate::gateway::{ApiClient, ApiResponse, RequestPayload};
use reqwest::{
    Method, StatusCode,
    multipart::{Form, Part},
};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use studypad_core::StudypadError;
use studypad_core::model::{PdfDocument, Subtopic, Unit, UploadedImage};

fn parse<T: DeserializeOwned>(body: Option<Value>) -> Result<T, StudypadError> {
    let body =
        body.ok_or_else(|| StudypadError::serialization("JSON", "empty response body"))?;
    serde_json::from_value(body).map_err(|e| StudypadError::serialization("JSON", e.to_string()))
}

fn expect_success(response: ApiResponse, fallback: &str) -> Result<ApiResponse, StudypadError> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(response.into_error(fallback))
    }
}

impl ApiClient {
    // ---------------------------
    // AUTH
    // ---------------------------

    /// Creates a new account. Validation problems come back as field
    /// messages (`username` first, then `email`).
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), StudypadError> {
        let body = json!({ "username": username, "email": email, "password": password });
        let response = self
            .call("register/", Method::POST, RequestPayload::Json(body))
            .await?;
        expect_success(response, "Registration failed").map(|_| ())
    }

    /// Exchanges credentials for an access token.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, StudypadError> {
        let body = json!({ "username": username, "password": password });
        let response = self
            .call("login/", Method::POST, RequestPayload::Json(body))
            .await?;
        let response = expect_success(response, "Authentication failed")?;
        response
            .body
            .as_ref()
            .and_then(|b| b.get("access"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                StudypadError::api(
                    response.status.as_u16(),
                    "login response missing access token",
                )
            })
    }

    // ---------------------------
    // UNITS
    // ---------------------------

    pub async fn units(&self) -> Result<Vec<Unit>, StudypadError> {
        let response = self
            .call("units/", Method::GET, RequestPayload::Empty)
            .await?;
        parse(expect_success(response, "Failed to load units")?.body)
    }

    pub async fn create_unit(&self, name: &str) -> Result<Unit, StudypadError> {
        let response = self
            .call(
                "units/",
                Method::POST,
                RequestPayload::Json(json!({ "name": name })),
            )
            .await?;
        parse(expect_success(response, "Failed to create unit")?.body)
    }

    pub async fn rename_unit(&self, id: u64, name: &str) -> Result<Unit, StudypadError> {
        let response = self
            .call(
                &format!("units/{id}/"),
                Method::PATCH,
                RequestPayload::Json(json!({ "name": name })),
            )
            .await?;
        parse(expect_success(response, "Failed to rename unit")?.body)
    }

    pub async fn delete_unit(&self, id: u64) -> Result<(), StudypadError> {
        let response = self
            .call(&format!("units/{id}/"), Method::DELETE, RequestPayload::Empty)
            .await?;
        expect_success(response, "Failed to delete unit").map(|_| ())
    }

    // ---------------------------
    // SUBTOPICS
    // ---------------------------

    pub async fn subtopics(&self) -> Result<Vec<Subtopic>, StudypadError> {
        let response = self
            .call("subtopics/", Method::GET, RequestPayload::Empty)
            .await?;
        parse(expect_success(response, "Failed to load subtopics")?.body)
    }

    pub async fn subtopic_detail(&self, id: &str) -> Result<Subtopic, StudypadError> {
        let response = self
            .call(
                &format!("subtopics/{id}/"),
                Method::GET,
                RequestPayload::Empty,
            )
            .await?;
        parse(expect_success(response, "Could not load subtopic")?.body)
    }

    pub async fn create_subtopic(
        &self,
        unit: u64,
        title: &str,
        notes: &str,
    ) -> Result<Subtopic, StudypadError> {
        let body = json!({ "unit": unit, "title": title, "notes": notes });
        let response = self
            .call("subtopics/", Method::POST, RequestPayload::Json(body))
            .await?;
        parse(expect_success(response, "Failed to create subtopic")?.body)
    }

    /// Updates the notes field only; the title is never mutated here.
    pub async fn update_subtopic_notes(
        &self,
        id: &str,
        notes: &str,
    ) -> Result<(), StudypadError> {
        let response = self
            .call(
                &format!("subtopics/{id}/"),
                Method::PATCH,
                RequestPayload::Json(json!({ "notes": notes })),
            )
            .await?;
        expect_success(response, "Failed to save to server").map(|_| ())
    }

    pub async fn delete_subtopic(&self, id: &str) -> Result<(), StudypadError> {
        let response = self
            .call(
                &format!("subtopics/{id}/"),
                Method::DELETE,
                RequestPayload::Empty,
            )
            .await?;
        expect_success(response, "Failed to delete subtopic").map(|_| ())
    }

    // ---------------------------
    // PDFS
    // ---------------------------

    pub async fn pdfs(&self) -> Result<Vec<PdfDocument>, StudypadError> {
        let response = self
            .call("pdfs/", Method::GET, RequestPayload::Empty)
            .await?;
        parse(expect_success(response, "Failed to load attachments")?.body)
    }

    /// Uploads a binary attachment. The title defaults to the file name so
    /// the entry never shows up unnamed.
    pub async fn upload_pdf(
        &self,
        subtopic: u64,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<PdfDocument, StudypadError> {
        let form = Form::new()
            .text("subtopic", subtopic.to_string())
            .part("file", file_part(file_name, bytes)?)
            .text("title", file_name.to_string());
        let response = self
            .call("pdfs/", Method::POST, RequestPayload::Multipart(form))
            .await?;
        parse(expect_success(response, "Failed to upload attachment")?.body)
    }

    pub async fn rename_pdf(&self, id: u64, title: &str) -> Result<PdfDocument, StudypadError> {
        let response = self
            .call(
                &format!("pdfs/{id}/"),
                Method::PATCH,
                RequestPayload::Json(json!({ "title": title })),
            )
            .await?;
        parse(expect_success(response, "Failed to rename attachment")?.body)
    }

    pub async fn delete_pdf(&self, id: u64) -> Result<(), StudypadError> {
        let response = self
            .call(&format!("pdfs/{id}/"), Method::DELETE, RequestPayload::Empty)
            .await?;
        expect_success(response, "Failed to delete attachment").map(|_| ())
    }

    // ---------------------------
    // IMAGES
    // ---------------------------

    /// Uploads an inline image for the editor. Expects 201 with a `url`
    /// field; failures surface the server's `error` message when present.
    pub async fn upload_image(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadedImage, StudypadError> {
        let form = Form::new().part("image", file_part(file_name, bytes)?);
        let response = self
            .call("upload-image/", Method::POST, RequestPayload::Multipart(form))
            .await?;
        if response.status != StatusCode::CREATED {
            return Err(response.into_error("Failed to upload image"));
        }
        parse(response.body)
    }
}

fn file_part(file_name: &str, bytes: Vec<u8>) -> Result<Part, StudypadError> {
    let mime = mime_guess::from_path(file_name).first_or_octet_stream();
    Part::bytes(bytes)
        .file_name(file_name.to_string())
        .mime_str(mime.essence_str())
        .map_err(|e| StudypadError::validation(format!("unusable file type: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejects_empty_and_mismatched_bodies() {
        let err = parse::<Vec<Unit>>(None).unwrap_err();
        assert!(matches!(err, StudypadError::Serialization { .. }));

        let err = parse::<Vec<Unit>>(Some(json!({ "not": "a list" }))).unwrap_err();
        assert!(matches!(err, StudypadError::Serialization { .. }));
    }

    #[test]
    fn parse_reads_wire_models() {
        let units: Vec<Unit> =
            parse(Some(json!([{ "id": 1, "name": "Thermodynamics" }]))).unwrap();
        assert_eq!(units[0].name, "Thermodynamics");
    }

    #[test]
    fn file_part_accepts_common_types() {
        assert!(file_part("diagram.png", vec![0u8; 4]).is_ok());
        assert!(file_part("paper.pdf", vec![0u8; 4]).is_ok());
        assert!(file_part("no-extension", vec![0u8; 4]).is_ok());
    }
}

//! Stateless HTTP request builder and response parser for the Braze API.
//!
//! # Design
//! `BrazeClient` holds only its `ClientConfig` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The caller executes the actual HTTP round-trip, keeping
//! the core deterministic and free of I/O dependencies.

use serde::de::DeserializeOwned;
use serde::Serialize;
use url::form_urlencoded;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    ContentBlockInfo, CreateContentBlockRequest, CreateContentBlockResponse,
    CreateEmailTemplateRequest, CreateEmailTemplateResponse, EmailTemplateInfo,
    ListContentBlocksResponse, ListEmailTemplatesResponse, ListParams, UpdateContentBlockRequest,
    UpdateContentBlockResponse, UpdateEmailTemplateRequest, UpdateEmailTemplateResponse,
};

/// Synchronous, stateless client for the Braze content block and email
/// template endpoints.
#[derive(Debug, Clone)]
pub struct BrazeClient {
    config: ClientConfig,
}

impl BrazeClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    // -- content blocks ------------------------------------------------------

    pub fn build_list_content_blocks(&self, params: &ListParams) -> HttpRequest {
        self.get(&with_query("/content_blocks/list", &list_query(params)))
    }

    pub fn build_get_content_block(&self, content_block_id: &str) -> HttpRequest {
        self.get(&with_query(
            "/content_blocks/info",
            &[("content_block_id", content_block_id.to_string())],
        ))
    }

    pub fn build_create_content_block(
        &self,
        input: &CreateContentBlockRequest,
    ) -> Result<HttpRequest, ApiError> {
        self.post("/content_blocks/create", input)
    }

    pub fn build_update_content_block(
        &self,
        input: &UpdateContentBlockRequest,
    ) -> Result<HttpRequest, ApiError> {
        self.post("/content_blocks/update", input)
    }

    pub fn parse_list_content_blocks(
        &self,
        response: HttpResponse,
    ) -> Result<ListContentBlocksResponse, ApiError> {
        decode(&response, 200)
    }

    pub fn parse_get_content_block(&self, response: HttpResponse) -> Result<ContentBlockInfo, ApiError> {
        decode(&response, 200)
    }

    pub fn parse_create_content_block(
        &self,
        response: HttpResponse,
    ) -> Result<CreateContentBlockResponse, ApiError> {
        decode(&response, 201)
    }

    pub fn parse_update_content_block(
        &self,
        response: HttpResponse,
    ) -> Result<UpdateContentBlockResponse, ApiError> {
        decode(&response, 200)
    }

    // -- email templates -----------------------------------------------------

    pub fn build_list_email_templates(&self, params: &ListParams) -> HttpRequest {
        self.get(&with_query("/templates/email/list", &list_query(params)))
    }

    pub fn build_get_email_template(&self, email_template_id: &str) -> HttpRequest {
        self.get(&with_query(
            "/templates/email/info",
            &[("email_template_id", email_template_id.to_string())],
        ))
    }

    pub fn build_create_email_template(
        &self,
        input: &CreateEmailTemplateRequest,
    ) -> Result<HttpRequest, ApiError> {
        self.post("/templates/email/create", input)
    }

    pub fn build_update_email_template(
        &self,
        input: &UpdateEmailTemplateRequest,
    ) -> Result<HttpRequest, ApiError> {
        self.post("/templates/email/update", input)
    }

    pub fn parse_list_email_templates(
        &self,
        response: HttpResponse,
    ) -> Result<ListEmailTemplatesResponse, ApiError> {
        decode(&response, 200)
    }

    pub fn parse_get_email_template(&self, response: HttpResponse) -> Result<EmailTemplateInfo, ApiError> {
        decode(&response, 200)
    }

    pub fn parse_create_email_template(
        &self,
        response: HttpResponse,
    ) -> Result<CreateEmailTemplateResponse, ApiError> {
        decode(&response, 201)
    }

    pub fn parse_update_email_template(
        &self,
        response: HttpResponse,
    ) -> Result<UpdateEmailTemplateResponse, ApiError> {
        decode(&response, 200)
    }

    // -- plumbing ------------------------------------------------------------

    fn headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![("user-agent".to_string(), self.config.user_agent.clone())];
        if let Some(key) = &self.config.api_key {
            headers.push(("authorization".to_string(), format!("Bearer {key}")));
        }
        headers
    }

    fn get(&self, path_and_query: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}{path_and_query}", self.config.base_url),
            headers: self.headers(),
            body: None,
        }
    }

    fn post<T: Serialize>(&self, path: &str, input: &T) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        let mut headers = self.headers();
        headers.push(("content-type".to_string(), "application/json".to_string()));
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}{path}", self.config.base_url),
            headers,
            body: Some(body),
        })
    }
}

fn list_query(params: &ListParams) -> Vec<(&'static str, String)> {
    let mut query = Vec::new();
    if let Some(limit) = params.limit {
        query.push(("limit", limit.to_string()));
    }
    if let Some(offset) = params.offset {
        query.push(("offset", offset.to_string()));
    }
    query
}

fn with_query(path: &str, query: &[(&str, String)]) -> String {
    if query.is_empty() {
        return path.to_string();
    }
    let encoded = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())))
        .finish();
    format!("{path}?{encoded}")
}

fn decode<T: DeserializeOwned>(response: &HttpResponse, expected: u16) -> Result<T, ApiError> {
    check_status(response, expected)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    match response.status {
        s if s == expected => Ok(()),
        404 => Err(ApiError::NotFound),
        422 => Err(ApiError::Validation {
            body: response.body.clone(),
        }),
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}

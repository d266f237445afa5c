//! Wire DTOs for the Braze content block and email template endpoints.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! integration tests catch schema drift between the two crates. Request
//! types use `Opt`/`OptNil` so a partial update can say "leave it", "clear
//! it" and "set it" per field. Response types use plain `Option`, since a
//! missing field and an explicit null mean the same thing on the way in.

use serde::{Deserialize, Serialize};

use crate::tristate::{Opt, OptNil};

// ---------------------------------------------------------------------------
// Content blocks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateContentBlockRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "OptNil::is_absent")]
    pub description: OptNil<String>,
    pub content: String,
    #[serde(default, skip_serializing_if = "OptNil::is_absent")]
    pub tags: OptNil<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateContentBlockResponse {
    pub content_block_id: String,
    #[serde(default)]
    pub message: String,
}

/// Only the fields present in the JSON are applied; omitted fields remain
/// unchanged on the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateContentBlockRequest {
    pub content_block_id: String,
    #[serde(default, skip_serializing_if = "Opt::is_absent")]
    pub name: Opt<String>,
    #[serde(default, skip_serializing_if = "OptNil::is_absent")]
    pub description: OptNil<String>,
    #[serde(default, skip_serializing_if = "Opt::is_absent")]
    pub content: Opt<String>,
    #[serde(default, skip_serializing_if = "OptNil::is_absent")]
    pub tags: OptNil<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateContentBlockResponse {
    pub content_block_id: String,
    #[serde(default)]
    pub message: String,
}

/// Full content block as returned by `/content_blocks/info`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentBlockInfo {
    pub content_block_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub content: String,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// One entry of `/content_blocks/list`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentBlockSummary {
    pub content_block_id: String,
    pub name: String,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListContentBlocksResponse {
    pub count: usize,
    pub content_blocks: Vec<ContentBlockSummary>,
}

// ---------------------------------------------------------------------------
// Email templates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateEmailTemplateRequest {
    pub template_name: String,
    pub subject: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "OptNil::is_absent")]
    pub description: OptNil<String>,
    #[serde(default, skip_serializing_if = "OptNil::is_absent")]
    pub plaintext_body: OptNil<String>,
    #[serde(default, skip_serializing_if = "OptNil::is_absent")]
    pub preheader: OptNil<String>,
    #[serde(default, skip_serializing_if = "OptNil::is_absent")]
    pub tags: OptNil<Vec<String>>,
    #[serde(default, skip_serializing_if = "Opt::is_absent")]
    pub should_inline_css: Opt<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateEmailTemplateResponse {
    pub email_template_id: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateEmailTemplateRequest {
    pub email_template_id: String,
    #[serde(default, skip_serializing_if = "Opt::is_absent")]
    pub template_name: Opt<String>,
    #[serde(default, skip_serializing_if = "Opt::is_absent")]
    pub subject: Opt<String>,
    #[serde(default, skip_serializing_if = "Opt::is_absent")]
    pub body: Opt<String>,
    #[serde(default, skip_serializing_if = "OptNil::is_absent")]
    pub description: OptNil<String>,
    #[serde(default, skip_serializing_if = "OptNil::is_absent")]
    pub plaintext_body: OptNil<String>,
    #[serde(default, skip_serializing_if = "OptNil::is_absent")]
    pub preheader: OptNil<String>,
    #[serde(default, skip_serializing_if = "OptNil::is_absent")]
    pub tags: OptNil<Vec<String>>,
    #[serde(default, skip_serializing_if = "Opt::is_absent")]
    pub should_inline_css: Opt<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateEmailTemplateResponse {
    #[serde(default)]
    pub message: String,
}

/// Full email template as returned by `/templates/email/info`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmailTemplateInfo {
    pub email_template_id: String,
    pub template_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub preheader: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub plaintext_body: Option<String>,
    #[serde(default)]
    pub should_inline_css: Option<bool>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmailTemplateSummary {
    pub email_template_id: String,
    pub template_name: String,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListEmailTemplatesResponse {
    pub count: usize,
    pub templates: Vec<EmailTemplateSummary>,
}

/// Paging for the list endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListParams {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

//! Resource workflows on top of a host-supplied `Transport`.
//!
//! # Design
//! `BrazeClient` stays I/O-free; the workflows here drive one or more
//! build/execute/parse round-trips per operation. Create and update re-read
//! the record so the returned model reflects what the server stored.
//! Failures carry a short summary for the user plus the underlying error.
//! Listing never stops on a per-item failure: the item gets an error
//! diagnostic and the next item is processed.

use std::fmt;

use thiserror::Error;
use tracing::{info, warn};

use crate::client::BrazeClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::model::{ContentBlockModel, EmailTemplateModel};
use crate::types::ListParams;

/// Executes an `HttpRequest`. Implemented by the host.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// The request never produced a response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("transport failed: {message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum CallError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl CallError {
    pub fn status(&self) -> Option<u16> {
        match self {
            CallError::Api(e) => e.status(),
            CallError::Transport(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CallError::Api(ApiError::NotFound))
    }
}

/// A failed workflow step.
#[derive(Debug, Error)]
#[error("{summary}: {source}")]
pub struct ResourceError {
    pub summary: String,
    #[source]
    pub source: CallError,
}

impl ResourceError {
    fn new(summary: &str, source: CallError) -> Self {
        Self {
            summary: summary.to_string(),
            source,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(&self.summary, self.source.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
}

impl Diagnostic {
    pub fn error(summary: &str, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            summary: summary.to_string(),
            detail: detail.into(),
        }
    }

    pub fn warning(summary: &str, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            summary: summary.to_string(),
            detail: detail.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{level}: {}: {}", self.summary, self.detail)
    }
}

/// One entry produced by a list workflow.
#[derive(Debug, Clone, PartialEq)]
pub struct ListResult<M> {
    pub id: String,
    pub display_name: String,
    pub resource: Option<M>,
    pub diagnostics: Vec<Diagnostic>,
}

impl<M> ListResult<M> {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

fn round_trip<T: Transport + ?Sized, R>(
    transport: &T,
    request: Result<HttpRequest, ApiError>,
    parse: impl FnOnce(HttpResponse) -> Result<R, ApiError>,
) -> Result<R, CallError> {
    let request = request?;
    let response = transport.execute(&request)?;
    Ok(parse(response)?)
}

/// The re-read that follows a write.
struct Reread {
    phase: &'static str,
}

const AFTER_CREATE: Reread = Reread { phase: "creation" };
const AFTER_UPDATE: Reread = Reread { phase: "update" };

impl Reread {
    fn error(&self, kind: &str, source: CallError) -> ResourceError {
        let summary = if source.is_not_found() {
            format!("{kind} not found after {}", self.phase)
        } else {
            format!("Failed to retrieve {kind} after {}", self.phase)
        };
        ResourceError::new(&summary, source)
    }
}

// ---------------------------------------------------------------------------
// Content blocks
// ---------------------------------------------------------------------------

const CONTENT_BLOCK: &str = "Content Block";

pub struct ContentBlocks<'a, T: ?Sized> {
    client: &'a BrazeClient,
    transport: &'a T,
}

impl<'a, T: Transport + ?Sized> ContentBlocks<'a, T> {
    pub fn new(client: &'a BrazeClient, transport: &'a T) -> Self {
        Self { client, transport }
    }

    fn fetch(&self, id: &str) -> Result<ContentBlockModel, CallError> {
        let info = round_trip(
            self.transport,
            Ok(self.client.build_get_content_block(id)),
            |r| self.client.parse_get_content_block(r),
        )?;
        Ok(ContentBlockModel::from_info(&info))
    }

    pub fn create(&self, plan: &ContentBlockModel) -> Result<ContentBlockModel, ResourceError> {
        let request = plan.to_create_request();
        let created = round_trip(
            self.transport,
            self.client.build_create_content_block(&request),
            |r| self.client.parse_create_content_block(r),
        );
        info!(
            name = %request.name,
            id = created.as_ref().ok().map(|c| c.content_block_id.as_str()),
            error = created.as_ref().err().map(tracing::field::display),
            "braze_content_block.create"
        );
        let created = created.map_err(|e| ResourceError::new("Failed to create Content Block", e))?;

        let fetched = self.fetch(&created.content_block_id);
        info!(
            id = %created.content_block_id,
            status = fetched.as_ref().err().and_then(CallError::status),
            "braze_content_block.create.get"
        );
        fetched.map_err(|e| AFTER_CREATE.error(CONTENT_BLOCK, e))
    }

    /// `None` when the block no longer exists.
    pub fn read(&self, id: &str) -> Result<Option<ContentBlockModel>, ResourceError> {
        let fetched = self.fetch(id);
        info!(
            id = %id,
            status = fetched.as_ref().err().and_then(CallError::status),
            "braze_content_block.read"
        );
        match fetched {
            Ok(model) => Ok(Some(model)),
            Err(e) if e.is_not_found() => {
                warn!(id = %id, "content block not found, dropping it");
                Ok(None)
            }
            Err(e) => Err(ResourceError::new("Failed to read Content Block", e)),
        }
    }

    pub fn update(&self, plan: &ContentBlockModel) -> Result<ContentBlockModel, ResourceError> {
        let request = plan.to_update_request();
        let updated = round_trip(
            self.transport,
            self.client.build_update_content_block(&request),
            |r| self.client.parse_update_content_block(r),
        );
        info!(
            id = %request.content_block_id,
            error = updated.as_ref().err().map(tracing::field::display),
            "braze_content_block.update"
        );
        let updated = updated.map_err(|e| ResourceError::new("Failed to update Content Block", e))?;

        let fetched = self.fetch(&updated.content_block_id);
        info!(
            id = %updated.content_block_id,
            status = fetched.as_ref().err().and_then(CallError::status),
            "braze_content_block.update.get"
        );
        fetched.map_err(|e| AFTER_UPDATE.error(CONTENT_BLOCK, e))
    }

    /// The API has no delete endpoint; nothing is sent.
    pub fn delete(&self, id: &str) -> Diagnostic {
        warn!(id = %id, "braze_content_block.delete");
        Diagnostic::warning(
            "Content Block not deleted",
            "Braze does not provide a delete API for content blocks; resource removed from state only.",
        )
    }

    pub fn list(&self, params: &ListParams, include_resource: bool) -> Vec<ListResult<ContentBlockModel>> {
        let listed = round_trip(
            self.transport,
            Ok(self.client.build_list_content_blocks(params)),
            |r| self.client.parse_list_content_blocks(r),
        );
        info!(
            count = listed.as_ref().ok().map(|l| l.content_blocks.len()),
            error = listed.as_ref().err().map(tracing::field::display),
            "braze_content_block.list"
        );
        let listed = match listed {
            Ok(listed) => listed,
            Err(e) => {
                return vec![ListResult {
                    id: String::new(),
                    display_name: String::new(),
                    resource: None,
                    diagnostics: vec![Diagnostic::error("Failed to list content blocks", e.to_string())],
                }]
            }
        };

        listed
            .content_blocks
            .into_iter()
            .map(|block| {
                let mut result = ListResult {
                    id: block.content_block_id,
                    display_name: block.name,
                    resource: None,
                    diagnostics: Vec::new(),
                };
                if include_resource {
                    let fetched = self.fetch(&result.id);
                    info!(
                        id = %result.id,
                        status = fetched.as_ref().err().and_then(CallError::status),
                        "braze_content_block.list.get"
                    );
                    match fetched {
                        Ok(model) => result.resource = Some(model),
                        Err(e) => result
                            .diagnostics
                            .push(Diagnostic::error("Failed to get content block", e.to_string())),
                    }
                }
                result
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Email templates
// ---------------------------------------------------------------------------

const EMAIL_TEMPLATE: &str = "Email Template";

pub struct EmailTemplates<'a, T: ?Sized> {
    client: &'a BrazeClient,
    transport: &'a T,
}

impl<'a, T: Transport + ?Sized> EmailTemplates<'a, T> {
    pub fn new(client: &'a BrazeClient, transport: &'a T) -> Self {
        Self { client, transport }
    }

    fn fetch(&self, id: &str) -> Result<EmailTemplateModel, CallError> {
        let info = round_trip(
            self.transport,
            Ok(self.client.build_get_email_template(id)),
            |r| self.client.parse_get_email_template(r),
        )?;
        Ok(EmailTemplateModel::from_info(&info))
    }

    pub fn create(&self, plan: &EmailTemplateModel) -> Result<EmailTemplateModel, ResourceError> {
        let request = plan.to_create_request();
        let created = round_trip(
            self.transport,
            self.client.build_create_email_template(&request),
            |r| self.client.parse_create_email_template(r),
        );
        info!(
            template_name = %request.template_name,
            id = created.as_ref().ok().map(|c| c.email_template_id.as_str()),
            error = created.as_ref().err().map(tracing::field::display),
            "braze_email_template.create"
        );
        let created = created.map_err(|e| ResourceError::new("Failed to create Email Template", e))?;

        let fetched = self.fetch(&created.email_template_id);
        info!(
            id = %created.email_template_id,
            status = fetched.as_ref().err().and_then(CallError::status),
            "braze_email_template.create.get"
        );
        fetched.map_err(|e| AFTER_CREATE.error(EMAIL_TEMPLATE, e))
    }

    /// `None` when the template no longer exists.
    pub fn read(&self, id: &str) -> Result<Option<EmailTemplateModel>, ResourceError> {
        let fetched = self.fetch(id);
        info!(
            id = %id,
            status = fetched.as_ref().err().and_then(CallError::status),
            "braze_email_template.read"
        );
        match fetched {
            Ok(model) => Ok(Some(model)),
            Err(e) if e.is_not_found() => {
                warn!(id = %id, "email template not found, dropping it");
                Ok(None)
            }
            Err(e) => Err(ResourceError::new("Failed to read Email Template", e)),
        }
    }

    pub fn update(&self, plan: &EmailTemplateModel) -> Result<EmailTemplateModel, ResourceError> {
        let request = plan.to_update_request();
        let updated = round_trip(
            self.transport,
            self.client.build_update_email_template(&request),
            |r| self.client.parse_update_email_template(r),
        );
        info!(
            id = %request.email_template_id,
            error = updated.as_ref().err().map(tracing::field::display),
            "braze_email_template.update"
        );
        updated.map_err(|e| ResourceError::new("Failed to update Email Template", e))?;

        // The update response does not echo the id.
        let fetched = self.fetch(&request.email_template_id);
        info!(
            id = %request.email_template_id,
            status = fetched.as_ref().err().and_then(CallError::status),
            "braze_email_template.update.get"
        );
        fetched.map_err(|e| AFTER_UPDATE.error(EMAIL_TEMPLATE, e))
    }

    pub fn delete(&self, id: &str) -> Diagnostic {
        warn!(id = %id, "braze_email_template.delete");
        Diagnostic::warning(
            "Email Template not deleted",
            "Braze does not provide a delete API for email templates; resource removed from state only.",
        )
    }
}

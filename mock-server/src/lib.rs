//! In-memory test double for the Braze content block and email template
//! endpoints.
//!
//! All records live in one `Store` behind a single async mutex. Content
//! blocks can also be seeded as "orphaned": they show up in the list
//! endpoint but their info lookup fails with 404.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Deserializer, Serialize};
use tokio::{net::TcpListener, sync::Mutex};
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    pub content_block_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlockSummary {
    pub content_block_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailTemplate {
    pub email_template_id: String,
    pub template_name: String,
    pub description: Option<String>,
    pub subject: String,
    pub preheader: Option<String>,
    pub body: Option<String>,
    pub plaintext_body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub should_inline_css: Option<bool>,
    pub tags: Option<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailTemplateSummary {
    pub email_template_id: String,
    pub template_name: String,
    pub tags: Option<Vec<String>>,
}

/// A request field that may be missing, explicitly null, or set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field<T> {
    Missing,
    Null,
    Value(T),
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Missing
    }
}

impl<T> Field<T> {
    /// Apply to a nullable stored value; `Missing` leaves it alone.
    fn apply_to(self, target: &mut Option<T>) {
        match self {
            Field::Missing => {}
            Field::Null => *target = None,
            Field::Value(v) => *target = Some(v),
        }
    }

    fn into_option(self) -> Option<T> {
        match self {
            Field::Value(v) => Some(v),
            Field::Missing | Field::Null => None,
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Field::Value(v),
            None => Field::Null,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateContentBlock {
    pub name: String,
    #[serde(default)]
    pub description: Field<String>,
    pub content: String,
    #[serde(default)]
    pub tags: Field<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateContentBlock {
    pub content_block_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Field<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tags: Field<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct CreateEmailTemplate {
    pub template_name: String,
    pub subject: String,
    pub body: String,
    #[serde(default)]
    pub description: Field<String>,
    #[serde(default)]
    pub plaintext_body: Field<String>,
    #[serde(default)]
    pub preheader: Field<String>,
    #[serde(default)]
    pub should_inline_css: Option<bool>,
    #[serde(default)]
    pub tags: Field<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateEmailTemplate {
    pub email_template_id: String,
    #[serde(default)]
    pub template_name: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub description: Field<String>,
    #[serde(default)]
    pub plaintext_body: Field<String>,
    #[serde(default)]
    pub preheader: Field<String>,
    #[serde(default)]
    pub should_inline_css: Option<bool>,
    #[serde(default)]
    pub tags: Field<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlockQuery {
    pub content_block_id: String,
}

#[derive(Debug, Deserialize)]
pub struct EmailTemplateQuery {
    pub email_template_id: String,
}

#[derive(Debug, Default)]
struct Store {
    content_blocks: BTreeMap<String, ContentBlock>,
    orphaned_blocks: BTreeMap<String, ContentBlockSummary>,
    email_templates: BTreeMap<String, EmailTemplate>,
}

/// Shared handle to the server's records. Cloning shares the store.
#[derive(Clone, Debug, Default)]
pub struct Db(Arc<Mutex<Store>>);

impl Db {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_content_block(&self, block: ContentBlock) {
        let mut store = self.0.lock().await;
        store.content_blocks.insert(block.content_block_id.clone(), block);
    }

    /// Listed, but info lookups for it return 404.
    pub async fn set_orphaned_content_block(&self, block: ContentBlockSummary) {
        let mut store = self.0.lock().await;
        store.orphaned_blocks.insert(block.content_block_id.clone(), block);
    }

    pub async fn set_email_template(&self, template: EmailTemplate) {
        let mut store = self.0.lock().await;
        store.email_templates.insert(template.email_template_id.clone(), template);
    }

    pub async fn content_block(&self, id: &str) -> Option<ContentBlock> {
        self.0.lock().await.content_blocks.get(id).cloned()
    }

    pub async fn content_block_count(&self) -> usize {
        self.0.lock().await.content_blocks.len()
    }

    pub async fn email_template(&self, id: &str) -> Option<EmailTemplate> {
        self.0.lock().await.email_templates.get(id).cloned()
    }

    pub async fn email_template_count(&self) -> usize {
        self.0.lock().await.email_templates.len()
    }
}

#[derive(Debug, Serialize)]
pub struct Message {
    pub message: String,
}

type Rejection = (StatusCode, Json<Message>);

fn reject(status: StatusCode, message: &str) -> Rejection {
    warn!(status = status.as_u16(), reason = message, "request rejected");
    (
        status,
        Json(Message {
            message: message.to_string(),
        }),
    )
}

fn page<T>(items: Vec<T>, query: &ListQuery) -> Vec<T> {
    let offset = query.offset.unwrap_or(0);
    let limit = query.limit.unwrap_or(usize::MAX);
    items.into_iter().skip(offset).take(limit).collect()
}

pub fn app() -> Router {
    app_with_state(Db::new())
}

pub fn app_with_state(db: Db) -> Router {
    Router::new()
        .route("/content_blocks/list", get(list_content_blocks))
        .route("/content_blocks/info", get(get_content_block))
        .route("/content_blocks/create", post(create_content_block))
        .route("/content_blocks/update", post(update_content_block))
        .route("/templates/email/list", get(list_email_templates))
        .route("/templates/email/info", get(get_email_template))
        .route("/templates/email/create", post(create_email_template))
        .route("/templates/email/update", post(update_email_template))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, Db::new()).await
}

pub async fn serve(listener: TcpListener, db: Db) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_state(db)).await
}

// ---------------------------------------------------------------------------
// Content blocks
// ---------------------------------------------------------------------------

async fn list_content_blocks(
    State(db): State<Db>,
    Query(query): Query<ListQuery>,
) -> Json<serde_json::Value> {
    let store = db.0.lock().await;
    let blocks: Vec<ContentBlockSummary> = store
        .content_blocks
        .values()
        .map(|b| ContentBlockSummary {
            content_block_id: b.content_block_id.clone(),
            name: b.name.clone(),
            tags: b.tags.clone(),
        })
        .chain(store.orphaned_blocks.values().cloned())
        .collect();
    let blocks = page(blocks, &query);
    debug!(count = blocks.len(), "listed content blocks");
    Json(serde_json::json!({
        "count": blocks.len(),
        "content_blocks": blocks,
        "message": "success",
    }))
}

async fn get_content_block(
    State(db): State<Db>,
    Query(query): Query<ContentBlockQuery>,
) -> Result<Json<ContentBlock>, Rejection> {
    let store = db.0.lock().await;
    store
        .content_blocks
        .get(&query.content_block_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "content block not found"))
}

async fn create_content_block(
    State(db): State<Db>,
    Json(input): Json<CreateContentBlock>,
) -> Result<(StatusCode, Json<serde_json::Value>), Rejection> {
    if input.name.is_empty() {
        return Err(reject(StatusCode::UNPROCESSABLE_ENTITY, "name must not be empty"));
    }
    let block = ContentBlock {
        content_block_id: Uuid::new_v4().to_string(),
        name: input.name,
        description: input.description.into_option(),
        content: input.content,
        tags: input.tags.into_option(),
    };
    let id = block.content_block_id.clone();
    db.0.lock().await.content_blocks.insert(id.clone(), block);
    debug!(id = %id, "created content block");
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({"content_block_id": id, "message": "success"})),
    ))
}

async fn update_content_block(
    State(db): State<Db>,
    Json(input): Json<UpdateContentBlock>,
) -> Result<Json<serde_json::Value>, Rejection> {
    let mut store = db.0.lock().await;
    let block = store
        .content_blocks
        .get_mut(&input.content_block_id)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "content block not found"))?;
    if input.name.as_deref() == Some("") {
        return Err(reject(StatusCode::UNPROCESSABLE_ENTITY, "name must not be empty"));
    }
    if let Some(name) = input.name {
        block.name = name;
    }
    if let Some(content) = input.content {
        block.content = content;
    }
    input.description.apply_to(&mut block.description);
    input.tags.apply_to(&mut block.tags);
    debug!(id = %block.content_block_id, "updated content block");
    Ok(Json(serde_json::json!({
        "content_block_id": block.content_block_id,
        "message": "success",
    })))
}

// ---------------------------------------------------------------------------
// Email templates
// ---------------------------------------------------------------------------

async fn list_email_templates(
    State(db): State<Db>,
    Query(query): Query<ListQuery>,
) -> Json<serde_json::Value> {
    let store = db.0.lock().await;
    let templates: Vec<EmailTemplateSummary> = store
        .email_templates
        .values()
        .map(|t| EmailTemplateSummary {
            email_template_id: t.email_template_id.clone(),
            template_name: t.template_name.clone(),
            tags: t.tags.clone(),
        })
        .collect();
    let templates = page(templates, &query);
    debug!(count = templates.len(), "listed email templates");
    Json(serde_json::json!({
        "count": templates.len(),
        "templates": templates,
        "message": "success",
    }))
}

async fn get_email_template(
    State(db): State<Db>,
    Query(query): Query<EmailTemplateQuery>,
) -> Result<Json<EmailTemplate>, Rejection> {
    let store = db.0.lock().await;
    store
        .email_templates
        .get(&query.email_template_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "email template not found"))
}

async fn create_email_template(
    State(db): State<Db>,
    Json(input): Json<CreateEmailTemplate>,
) -> Result<(StatusCode, Json<serde_json::Value>), Rejection> {
    if input.template_name.is_empty() {
        return Err(reject(StatusCode::UNPROCESSABLE_ENTITY, "template_name must not be empty"));
    }
    let template = EmailTemplate {
        email_template_id: Uuid::new_v4().to_string(),
        template_name: input.template_name,
        description: input.description.into_option(),
        subject: input.subject,
        preheader: input.preheader.into_option(),
        body: Some(input.body),
        plaintext_body: input.plaintext_body.into_option(),
        should_inline_css: input.should_inline_css,
        tags: input.tags.into_option(),
    };
    let id = template.email_template_id.clone();
    db.0.lock().await.email_templates.insert(id.clone(), template);
    debug!(id = %id, "created email template");
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({"email_template_id": id, "message": "success"})),
    ))
}

async fn update_email_template(
    State(db): State<Db>,
    Json(input): Json<UpdateEmailTemplate>,
) -> Result<Json<Message>, Rejection> {
    let mut store = db.0.lock().await;
    let template = store
        .email_templates
        .get_mut(&input.email_template_id)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "email template not found"))?;
    if input.template_name.as_deref() == Some("") {
        return Err(reject(StatusCode::UNPROCESSABLE_ENTITY, "template_name must not be empty"));
    }
    if let Some(name) = input.template_name {
        template.template_name = name;
    }
    if let Some(subject) = input.subject {
        template.subject = subject;
    }
    if let Some(body) = input.body {
        template.body = Some(body);
    }
    input.description.apply_to(&mut template.description);
    input.plaintext_body.apply_to(&mut template.plaintext_body);
    input.preheader.apply_to(&mut template.preheader);
    if input.should_inline_css.is_some() {
        template.should_inline_css = input.should_inline_css;
    }
    input.tags.apply_to(&mut template.tags);
    debug!(id = %template.email_template_id, "updated email template");
    Ok(Json(Message {
        message: "success".to_string(),
    }))
}

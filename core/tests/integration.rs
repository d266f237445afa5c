//! Resource workflows against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port inside a multi-threaded tokio
//! runtime, then drives the workflows over real HTTP using a ureq-backed
//! `Transport`. Seeding goes through the shared `Db` handle.

use braze_core::{
    ApiError, BrazeClient, CallError, ClientConfig, ContentBlockModel, ContentBlocks,
    EmailTemplateModel, EmailTemplates, HttpMethod, HttpRequest, HttpResponse, ListParams,
    Severity, StringAttr, Transport, TransportError, TypedList,
};
use mock_server::{ContentBlock, ContentBlockSummary, Db};

/// Executes requests with ureq.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the core
/// client handle status interpretation.
struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, req: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let result = match (req.method, &req.body) {
            (HttpMethod::Get, _) => {
                let mut builder = self.agent.get(&req.path);
                for (name, value) in &req.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()
            }
            (HttpMethod::Post, body) => {
                let mut builder = self.agent.post(&req.path);
                for (name, value) in &req.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                match body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
        };
        let mut response = result.map_err(|e| TransportError::new(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string().unwrap_or_default();
        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body,
        })
    }
}

struct Harness {
    rt: tokio::runtime::Runtime,
    db: Db,
    client: BrazeClient,
    transport: UreqTransport,
}

impl Harness {
    fn start() -> Self {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .unwrap();
        let db = Db::new();
        let listener = rt
            .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
            .unwrap();
        let addr = listener.local_addr().unwrap();
        rt.spawn(mock_server::serve(listener, db.clone()));

        let config = ClientConfig::new(&format!("http://{addr}"), Some("test-key")).unwrap();
        Self {
            rt,
            db,
            client: BrazeClient::new(config),
            transport: UreqTransport::new(),
        }
    }

    fn seed_valid_and_orphaned(&self) {
        self.rt.block_on(async {
            self.db
                .set_content_block(ContentBlock {
                    content_block_id: "valid-id".to_string(),
                    name: "Valid Block".to_string(),
                    description: Some("A valid content block".to_string()),
                    content: "<p>valid</p>".to_string(),
                    tags: Some(vec!["tag1".to_string(), "tag2".to_string()]),
                })
                .await;
            self.db
                .set_orphaned_content_block(ContentBlockSummary {
                    content_block_id: "orphaned-id".to_string(),
                    name: "Orphaned Block".to_string(),
                    tags: None,
                })
                .await;
        });
    }

    fn content_blocks(&self) -> ContentBlocks<'_, UreqTransport> {
        ContentBlocks::new(&self.client, &self.transport)
    }

    fn email_templates(&self) -> EmailTemplates<'_, UreqTransport> {
        EmailTemplates::new(&self.client, &self.transport)
    }
}

#[test]
fn list_with_resources_reports_orphaned_block() {
    let h = Harness::start();
    h.seed_valid_and_orphaned();

    let results = h.content_blocks().list(&ListParams::default(), true);
    assert_eq!(results.len(), 2);

    let valid = results.iter().find(|r| r.id == "valid-id").unwrap();
    assert_eq!(valid.display_name, "Valid Block");
    assert!(valid.diagnostics.is_empty());
    let model = valid.resource.as_ref().unwrap();
    assert_eq!(model.description, StringAttr::from("A valid content block"));
    assert_eq!(
        model.tags.to_strings(),
        Some(vec!["tag1".to_string(), "tag2".to_string()])
    );

    let orphaned = results.iter().find(|r| r.id == "orphaned-id").unwrap();
    assert_eq!(orphaned.display_name, "Orphaned Block");
    assert!(orphaned.resource.is_none());
    assert_eq!(orphaned.diagnostics.len(), 1);
    assert_eq!(orphaned.diagnostics[0].severity, Severity::Error);
}

#[test]
fn list_without_resources_has_no_diagnostics() {
    let h = Harness::start();
    h.seed_valid_and_orphaned();

    let results = h.content_blocks().list(&ListParams::default(), false);
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.diagnostics.is_empty() && r.resource.is_none()));
}

#[test]
fn read_found_and_missing() {
    let h = Harness::start();
    h.seed_valid_and_orphaned();

    let found = h.content_blocks().read("valid-id").unwrap().unwrap();
    assert_eq!(found.name, StringAttr::from("Valid Block"));

    assert_eq!(h.content_blocks().read("orphaned-id").unwrap(), None);

    let req = h.client.build_get_content_block("orphaned-id");
    let err = h
        .client
        .parse_get_content_block(h.transport.execute(&req).unwrap())
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound));
}

#[test]
fn create_with_empty_name_fails_without_record() {
    let h = Harness::start();

    let err = h
        .content_blocks()
        .create(&ContentBlockModel::new("", "content"))
        .unwrap_err();
    assert_eq!(err.summary, "Failed to create Content Block");
    assert!(matches!(err.source, CallError::Api(ApiError::Validation { .. })));
    assert_eq!(h.rt.block_on(h.db.content_block_count()), 0);

    let req = h.client.build_list_content_blocks(&ListParams::default());
    let list = h
        .client
        .parse_list_content_blocks(h.transport.execute(&req).unwrap())
        .unwrap();
    assert_eq!(list.count, 0);
    assert!(list.content_blocks.is_empty());
    assert!(h.content_blocks().list(&ListParams::default(), true).is_empty());
}

#[test]
fn create_then_update_clears_description() {
    let h = Harness::start();

    let mut plan = ContentBlockModel::new("block", "<p>v1</p>");
    plan.description = StringAttr::from("first");
    plan.tags = TypedList::from_strings(Some(&["a".to_string()][..]));
    let created = h.content_blocks().create(&plan).unwrap();
    assert!(created.id.is_known());
    assert_eq!(created.description, StringAttr::from("first"));

    // Unknown description is left alone.
    let mut untouched = created.clone();
    untouched.description = StringAttr::unknown();
    untouched.content = StringAttr::from("<p>v2</p>");
    let updated = h.content_blocks().update(&untouched).unwrap();
    assert_eq!(updated.description, StringAttr::from("first"));
    assert_eq!(updated.content, StringAttr::from("<p>v2</p>"));

    // Null description is cleared.
    let mut cleared = updated.clone();
    cleared.description = StringAttr::null();
    let updated = h.content_blocks().update(&cleared).unwrap();
    assert!(updated.description.is_null());
    assert_eq!(updated.tags.to_strings(), Some(vec!["a".to_string()]));

    let id = updated.id.get().cloned().unwrap();
    let stored = h.rt.block_on(h.db.content_block(&id)).unwrap();
    assert_eq!(stored.description, None);
}

#[test]
fn update_with_null_tags_clears_them() {
    let h = Harness::start();

    let mut plan = ContentBlockModel::new("block", "c");
    plan.tags = TypedList::from_strings(Some(&["a".to_string()][..]));
    let created = h.content_blocks().create(&plan).unwrap();
    assert_eq!(created.tags.to_strings(), Some(vec!["a".to_string()]));

    let mut cleared = created.clone();
    cleared.tags = TypedList::null();
    let updated = h.content_blocks().update(&cleared).unwrap();
    assert!(updated.tags.is_null());

    let id = updated.id.get().cloned().unwrap();
    assert_eq!(h.content_blocks().read(&id).unwrap(), Some(updated));
    assert_eq!(h.rt.block_on(h.db.content_block(&id)).unwrap().tags, None);
}

#[test]
fn email_template_update_with_null_tags_clears_them() {
    let h = Harness::start();

    let mut plan = EmailTemplateModel::new("Welcome", "Hello", "<h1>Hello</h1>");
    plan.tags = TypedList::from_strings(Some(&["x".to_string(), "y".to_string()][..]));
    let created = h.email_templates().create(&plan).unwrap();
    assert_eq!(
        created.tags.to_strings(),
        Some(vec!["x".to_string(), "y".to_string()])
    );

    let mut cleared = created.clone();
    cleared.tags = TypedList::null();
    let updated = h.email_templates().update(&cleared).unwrap();
    assert!(updated.tags.is_null());

    let id = updated.id.get().cloned().unwrap();
    assert_eq!(h.rt.block_on(h.db.email_template(&id)).unwrap().tags, None);
}

#[test]
fn update_of_missing_block_fails() {
    let h = Harness::start();
    let mut plan = ContentBlockModel::new("block", "c");
    plan.id = StringAttr::from("missing");
    let err = h.content_blocks().update(&plan).unwrap_err();
    assert_eq!(err.summary, "Failed to update Content Block");
    assert_eq!(err.source.status(), Some(404));
}

#[test]
fn email_template_lifecycle() {
    let h = Harness::start();

    let mut plan = EmailTemplateModel::new("Welcome", "Hello", "<h1>Hello</h1>");
    plan.preheader = StringAttr::from("pre");
    let created = h.email_templates().create(&plan).unwrap();
    assert_eq!(created.template_name, StringAttr::from("Welcome"));
    assert_eq!(created.preheader, StringAttr::from("pre"));
    assert!(created.description.is_null());
    assert!(created.tags.is_null());

    let mut change = created.clone();
    change.preheader = StringAttr::null();
    change.subject = StringAttr::from("Hello again");
    let updated = h.email_templates().update(&change).unwrap();
    assert!(updated.preheader.is_null());
    assert_eq!(updated.subject, StringAttr::from("Hello again"));

    let id = updated.id.get().cloned().unwrap();
    assert_eq!(h.email_templates().read(&id).unwrap(), Some(updated));
    assert_eq!(h.email_templates().read("missing").unwrap(), None);

    let req = h.client.build_list_email_templates(&ListParams::default());
    let list = h
        .client
        .parse_list_email_templates(h.transport.execute(&req).unwrap())
        .unwrap();
    assert_eq!(list.count, 1);
}

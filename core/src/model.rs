//! Domain models for content blocks and email templates.
//!
//! Scalar fields are `Attr` values and tags are a `TypedList<StringAttr>`, so
//! a model can carry unknown and null state straight from configuration. The
//! `from_info` constructors build a model from an info response; the
//! request adapters in `request` go the other way.

use crate::attr::{Attr, BoolAttr, StringAttr};
use crate::typed_list::TypedList;
use crate::types::{ContentBlockInfo, EmailTemplateInfo};

#[derive(Debug, Clone, PartialEq)]
pub struct ContentBlockModel {
    pub id: StringAttr,
    pub name: StringAttr,
    pub description: StringAttr,
    pub content: StringAttr,
    pub tags: TypedList<StringAttr>,
}

impl ContentBlockModel {
    /// A model for a block that does not exist yet.
    pub fn new(name: &str, content: &str) -> Self {
        Self {
            id: Attr::unknown(),
            name: StringAttr::from(name),
            description: Attr::null(),
            content: StringAttr::from(content),
            tags: TypedList::known(Vec::new()),
        }
    }

    pub fn from_info(info: &ContentBlockInfo) -> Self {
        Self {
            id: Attr::known(info.content_block_id.clone()),
            name: Attr::known(info.name.clone()),
            description: Attr::from_option(info.description.clone()),
            content: Attr::known(info.content.clone()),
            tags: match &info.tags {
                Some(tags) => TypedList::from_strings(Some(tags.as_slice())),
                None => TypedList::null(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmailTemplateModel {
    pub id: StringAttr,
    pub template_name: StringAttr,
    pub description: StringAttr,
    pub subject: StringAttr,
    pub preheader: StringAttr,
    pub body: StringAttr,
    pub plaintext_body: StringAttr,
    pub should_inline_css: BoolAttr,
    pub tags: TypedList<StringAttr>,
}

impl EmailTemplateModel {
    /// A model for a template that does not exist yet, optional fields null.
    pub fn new(template_name: &str, subject: &str, body: &str) -> Self {
        Self {
            id: Attr::unknown(),
            template_name: StringAttr::from(template_name),
            description: Attr::null(),
            subject: StringAttr::from(subject),
            preheader: Attr::null(),
            body: StringAttr::from(body),
            plaintext_body: Attr::null(),
            should_inline_css: Attr::null(),
            tags: TypedList::null(),
        }
    }

    pub fn from_info(info: &EmailTemplateInfo) -> Self {
        Self {
            id: Attr::known(info.email_template_id.clone()),
            template_name: Attr::known(info.template_name.clone()),
            description: Attr::from_option(info.description.clone()),
            subject: Attr::known(info.subject.clone()),
            preheader: Attr::from_option(info.preheader.clone()),
            body: Attr::known(info.body.clone().unwrap_or_default()),
            plaintext_body: Attr::from_option(info.plaintext_body.clone()),
            should_inline_css: Attr::from_option(info.should_inline_css),
            tags: match &info.tags {
                Some(tags) => TypedList::from_strings(Some(tags.as_slice())),
                None => TypedList::null(),
            },
        }
    }
}

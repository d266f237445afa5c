//! Request adapters: domain models to outbound create and update payloads.
//!
//! Per field, an unknown attribute is left out of an update, a null one is
//! sent as an explicit `null` where the API can clear it, and a known one is
//! sent as its value. Fields the API cannot clear use `Opt` and are simply
//! left out when not known.

use crate::attr::{Attr, StringAttr};
use crate::model::{ContentBlockModel, EmailTemplateModel};
use crate::tristate::{Opt, OptNil};
use crate::typed_list::{ListState, TypedList};
use crate::types::{
    CreateContentBlockRequest, CreateEmailTemplateRequest, UpdateContentBlockRequest,
    UpdateEmailTemplateRequest,
};

/// Unknown is left alone, null clears, known sets.
fn nullable<T: Clone>(attr: &Attr<T>) -> OptNil<T> {
    if attr.is_unknown() {
        OptNil::Absent
    } else {
        OptNil::from_pointer(attr.get())
    }
}

/// Sent only when known.
fn settable<T: Clone>(attr: &Attr<T>) -> Opt<T> {
    Opt::from_pointer(attr.get())
}

/// Sent only when known, but through a nullable field.
fn provided<T: Clone>(attr: &Attr<T>) -> OptNil<T> {
    match attr.get() {
        Some(v) => OptNil::Present(v.clone()),
        None => OptNil::Absent,
    }
}

fn nullable_tags(tags: &TypedList<StringAttr>) -> OptNil<Vec<String>> {
    match tags.state() {
        ListState::Unknown => OptNil::Absent,
        ListState::Null => OptNil::Null,
        ListState::Known => tags.to_strings().map_or(OptNil::Null, OptNil::Present),
    }
}

fn required(attr: &StringAttr) -> String {
    attr.get().cloned().unwrap_or_default()
}

impl ContentBlockModel {
    pub fn to_create_request(&self) -> CreateContentBlockRequest {
        CreateContentBlockRequest {
            name: required(&self.name),
            description: nullable(&self.description),
            content: required(&self.content),
            tags: nullable_tags(&self.tags),
        }
    }

    pub fn to_update_request(&self) -> UpdateContentBlockRequest {
        UpdateContentBlockRequest {
            content_block_id: required(&self.id),
            name: settable(&self.name),
            description: nullable(&self.description),
            content: settable(&self.content),
            tags: nullable_tags(&self.tags),
        }
    }
}

impl EmailTemplateModel {
    pub fn to_create_request(&self) -> CreateEmailTemplateRequest {
        CreateEmailTemplateRequest {
            template_name: required(&self.template_name),
            subject: required(&self.subject),
            body: required(&self.body),
            description: provided(&self.description),
            plaintext_body: provided(&self.plaintext_body),
            preheader: provided(&self.preheader),
            tags: nullable_tags(&self.tags),
            should_inline_css: settable(&self.should_inline_css),
        }
    }

    pub fn to_update_request(&self) -> UpdateEmailTemplateRequest {
        UpdateEmailTemplateRequest {
            email_template_id: required(&self.id),
            template_name: settable(&self.template_name),
            subject: settable(&self.subject),
            body: settable(&self.body),
            description: nullable(&self.description),
            plaintext_body: nullable(&self.plaintext_body),
            preheader: nullable(&self.preheader),
            tags: nullable_tags(&self.tags),
            should_inline_css: settable(&self.should_inline_css),
        }
    }
}

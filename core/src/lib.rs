//! Value model and synchronous API client core for Braze content blocks and
//! email templates.
//!
//! # Overview
//! Three value shapes sit between configuration and the wire:
//! - `Attr<T>`: a single attribute that is unknown, null or known;
//! - `TypedList<E>` / `TypedListType<E>`: a list of such attributes plus
//!   its type descriptor, converted to and from `StructuralValue` trees;
//! - `Opt<T>` / `OptNil<T>`: outbound payload fields that distinguish
//!   "omit", "send null" and "send a value".
//!
//! Domain models are built from info responses and turned into create and
//! update payloads by the request adapters. `BrazeClient` builds
//! `HttpRequest` values and parses `HttpResponse` values without touching
//! the network (host-does-IO pattern); the `resource` workflows drive it
//! through a host-supplied `Transport`.

pub mod attr;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod model;
pub mod request;
pub mod resource;
pub mod structural;
pub mod tristate;
pub mod typed_list;
pub mod typed_list_type;
pub mod types;

pub use attr::{Attr, BoolAttr, ElementValue, NumberAttr, Scalar, StringAttr};
pub use client::BrazeClient;
pub use config::ClientConfig;
pub use error::{ApiError, ConfigError, ConversionError, TypeMismatch, UnsupportedSelector};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use model::{ContentBlockModel, EmailTemplateModel};
pub use resource::{
    CallError, ContentBlocks, Diagnostic, EmailTemplates, ListResult, ResourceError, Severity,
    Transport, TransportError,
};
pub use structural::{AttrPath, AttrType, PathStep, Payload, StructuralValue, ValueState};
pub use tristate::{Opt, OptNil};
pub use typed_list::{ListState, TypedList};
pub use typed_list_type::{ListTypeDescriptor, TypedListType};
pub use types::ListParams;

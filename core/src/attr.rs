//! Scalar attribute values and the element contract for typed lists.
//!
//! # Design
//! `Attr<T>` is the element-level tri-state: a scalar that may be unknown,
//! null, or known. `ElementValue` is the capability contract every
//! `TypedList` element must satisfy; it is implemented for `Attr<T>` over any
//! `Scalar`, so `TypedList<StringAttr>` and friends work out of the box.

use std::fmt;

use crate::error::TypeMismatch;
use crate::structural::{AttrType, Payload, StructuralValue, ValueState};

/// A plain value with a fixed wire type.
pub trait Scalar: Clone + PartialEq + fmt::Debug {
    fn attr_type() -> AttrType;
    fn to_payload(&self) -> Payload;
    fn from_payload(payload: &Payload) -> Option<Self>;
}

impl Scalar for String {
    fn attr_type() -> AttrType {
        AttrType::String
    }

    fn to_payload(&self) -> Payload {
        Payload::String(self.clone())
    }

    fn from_payload(payload: &Payload) -> Option<Self> {
        match payload {
            Payload::String(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl Scalar for bool {
    fn attr_type() -> AttrType {
        AttrType::Bool
    }

    fn to_payload(&self) -> Payload {
        Payload::Bool(*self)
    }

    fn from_payload(payload: &Payload) -> Option<Self> {
        match payload {
            Payload::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl Scalar for i64 {
    fn attr_type() -> AttrType {
        AttrType::Number
    }

    fn to_payload(&self) -> Payload {
        Payload::Number(*self)
    }

    fn from_payload(payload: &Payload) -> Option<Self> {
        match payload {
            Payload::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// What a `TypedList` requires of its elements.
pub trait ElementValue: Clone + PartialEq + fmt::Debug {
    /// Default wire type of the element.
    fn attr_type() -> AttrType;
    fn null() -> Self;
    fn unknown() -> Self;
    fn to_structural(&self) -> StructuralValue;
    /// Decode a node declared as `expected`.
    fn from_structural(raw: &StructuralValue, expected: &AttrType) -> Result<Self, TypeMismatch>;
}

/// A scalar attribute value: unknown, null, or known.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Attr<T> {
    Unknown,
    #[default]
    Null,
    Known(T),
}

pub type StringAttr = Attr<String>;
pub type BoolAttr = Attr<bool>;
pub type NumberAttr = Attr<i64>;

impl<T> Attr<T> {
    pub fn known(value: T) -> Self {
        Attr::Known(value)
    }

    pub fn null() -> Self {
        Attr::Null
    }

    pub fn unknown() -> Self {
        Attr::Unknown
    }

    /// `None` maps to null.
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => Attr::Known(v),
            None => Attr::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Attr::Null)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Attr::Unknown)
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Attr::Known(_))
    }

    pub fn get(&self) -> Option<&T> {
        match self {
            Attr::Known(v) => Some(v),
            Attr::Unknown | Attr::Null => None,
        }
    }
}

impl From<&str> for StringAttr {
    fn from(value: &str) -> Self {
        Attr::Known(value.to_string())
    }
}

impl From<bool> for BoolAttr {
    fn from(value: bool) -> Self {
        Attr::Known(value)
    }
}

impl<T: Scalar> ElementValue for Attr<T> {
    fn attr_type() -> AttrType {
        T::attr_type()
    }

    fn null() -> Self {
        Attr::Null
    }

    fn unknown() -> Self {
        Attr::Unknown
    }

    fn to_structural(&self) -> StructuralValue {
        match self {
            Attr::Unknown => StructuralValue::unknown(T::attr_type()),
            Attr::Null => StructuralValue::null(T::attr_type()),
            Attr::Known(v) => StructuralValue::known(T::attr_type(), v.to_payload()),
        }
    }

    fn from_structural(raw: &StructuralValue, expected: &AttrType) -> Result<Self, TypeMismatch> {
        if raw.ty() != Some(expected) {
            return Err(TypeMismatch::new(expected.clone(), raw.type_name()));
        }
        match raw.state() {
            ValueState::Null => Ok(Attr::Null),
            ValueState::Unknown => Ok(Attr::Unknown),
            ValueState::Known(payload) => T::from_payload(payload)
                .map(Attr::Known)
                .ok_or_else(|| TypeMismatch::new(expected.clone(), payload.shape())),
        }
    }
}

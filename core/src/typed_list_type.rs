//! Type descriptor paired with `TypedList`.
//!
//! # Design
//! `TypedListType<E>` is built by factory functions at the point of use
//! (`TypedListType::new`, `TypedList::type_descriptor`), never stored in a
//! static. Its effective element type is the override when one is set, and
//! `E::attr_type()` otherwise.
//!
//! Equality is decided on `ListTypeDescriptor`:
//! - both sides carry an override: equal iff the overrides are equal;
//! - neither side does: equal iff the default element types are equal;
//! - exactly one side does: never equal, even when the types coincide.

use std::fmt;
use std::marker::PhantomData;

use crate::attr::ElementValue;
use crate::error::{ConversionError, UnsupportedSelector};
use crate::structural::{AttrPath, AttrType, PathStep, StructuralValue};
use crate::typed_list::{self, TypedList};

/// The list-descriptor kind of `AttrType`.
#[derive(Debug, Clone)]
pub struct ListTypeDescriptor {
    element: Box<AttrType>,
    element_override: Option<Box<AttrType>>,
}

impl ListTypeDescriptor {
    pub fn new(element: AttrType, element_override: Option<AttrType>) -> Self {
        Self {
            element: Box::new(element),
            element_override: element_override.map(Box::new),
        }
    }

    pub fn effective_element(&self) -> &AttrType {
        self.element_override.as_deref().unwrap_or(self.element.as_ref())
    }
}

impl PartialEq for ListTypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        match (&self.element_override, &other.element_override) {
            (Some(a), Some(b)) => a == b,
            (None, None) => self.element == other.element,
            _ => false,
        }
    }
}

impl Eq for ListTypeDescriptor {}

pub struct TypedListType<E> {
    element_override: Option<AttrType>,
    _element: PhantomData<fn() -> E>,
}

impl<E: ElementValue> TypedListType<E> {
    pub fn new() -> Self {
        Self {
            element_override: None,
            _element: PhantomData,
        }
    }

    /// Replace the element's default wire type.
    pub fn with_element_type(&self, element: AttrType) -> Self {
        Self {
            element_override: Some(element),
            _element: PhantomData,
        }
    }

    pub fn element_type(&self) -> AttrType {
        self.element_override.clone().unwrap_or_else(E::attr_type)
    }

    pub fn descriptor(&self) -> AttrType {
        AttrType::TypedList(ListTypeDescriptor::new(
            E::attr_type(),
            self.element_override.clone(),
        ))
    }

    /// Type of the nodes this descriptor decodes.
    pub fn wire_type(&self) -> AttrType {
        AttrType::list_of(self.element_type())
    }

    /// False for any descriptor that is not a typed list.
    pub fn equal(&self, other: &AttrType) -> bool {
        self.descriptor() == *other
    }

    /// Materialize a `TypedList` from a structural node found at `path`.
    pub fn value_from_structural(
        &self,
        path: &AttrPath,
        raw: &StructuralValue,
    ) -> Result<TypedList<E>, ConversionError> {
        typed_list::decode(raw, &self.element_type()).map_err(|source| ConversionError {
            path: path.clone(),
            source,
        })
    }

    /// Element type reached by an index step.
    pub fn resolve_path_step(&self, step: &PathStep) -> Result<AttrType, UnsupportedSelector> {
        match step {
            PathStep::ElementKeyInt(_) => Ok(self.element_type()),
            PathStep::AttributeName(_) | PathStep::ElementKeyString(_) => Err(UnsupportedSelector {
                step: step.clone(),
                ty: self.to_string(),
            }),
        }
    }
}

impl<E: ElementValue> Default for TypedListType<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for TypedListType<E> {
    fn clone(&self) -> Self {
        Self {
            element_override: self.element_override.clone(),
            _element: PhantomData,
        }
    }
}

impl<E> fmt::Debug for TypedListType<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedListType")
            .field("element", &std::any::type_name::<E>())
            .field("element_override", &self.element_override)
            .finish()
    }
}

impl<E: ElementValue> fmt::Display for TypedListType<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypedList[{}]", self.element_type())
    }
}

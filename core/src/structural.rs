//! The structured value protocol exchanged with the configuration framework.
//!
//! # Design
//! Every node carries the type it was declared with and exactly one of three
//! states: null, unknown (not yet known at plan time), or a known payload.
//! A node may also be an untyped null, which the framework sends when it has
//! no schema information at all.
//!
//! `AttrType` doubles as the type descriptor handed around by the schema
//! layer, so it also has a `TypedList` variant for the custom list type.

use std::fmt;

use crate::typed_list_type::ListTypeDescriptor;

/// Type descriptor of a structural node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrType {
    String,
    Bool,
    Number,
    /// Plain list on the wire, ordered, homogeneous.
    List(Box<AttrType>),
    /// The custom list descriptor, see `TypedListType`.
    TypedList(ListTypeDescriptor),
}

impl AttrType {
    pub fn list_of(element: AttrType) -> Self {
        AttrType::List(Box::new(element))
    }
}

impl fmt::Display for AttrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrType::String => write!(f, "String"),
            AttrType::Bool => write!(f, "Bool"),
            AttrType::Number => write!(f, "Number"),
            AttrType::List(element) => write!(f, "List[{element}]"),
            AttrType::TypedList(descriptor) => {
                write!(f, "TypedList[{}]", descriptor.effective_element())
            }
        }
    }
}

/// Known payload of a structural node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    String(String),
    Bool(bool),
    Number(i64),
    List(Vec<StructuralValue>),
}

impl Payload {
    pub(crate) fn shape(&self) -> &'static str {
        match self {
            Payload::String(_) => "String",
            Payload::Bool(_) => "Bool",
            Payload::Number(_) => "Number",
            Payload::List(_) => "List",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueState {
    Null,
    Unknown,
    Known(Payload),
}

/// One node of the structural value tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuralValue {
    ty: Option<AttrType>,
    state: ValueState,
}

impl StructuralValue {
    pub fn new(ty: AttrType, state: ValueState) -> Self {
        Self { ty: Some(ty), state }
    }

    /// A null node without any type information.
    pub fn untyped_null() -> Self {
        Self {
            ty: None,
            state: ValueState::Null,
        }
    }

    pub fn null(ty: AttrType) -> Self {
        Self::new(ty, ValueState::Null)
    }

    pub fn unknown(ty: AttrType) -> Self {
        Self::new(ty, ValueState::Unknown)
    }

    pub fn known(ty: AttrType, payload: Payload) -> Self {
        Self::new(ty, ValueState::Known(payload))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::known(AttrType::String, Payload::String(value.into()))
    }

    pub fn bool(value: bool) -> Self {
        Self::known(AttrType::Bool, Payload::Bool(value))
    }

    pub fn number(value: i64) -> Self {
        Self::known(AttrType::Number, Payload::Number(value))
    }

    /// A known list node declared with `element` as its element type.
    pub fn list(element: AttrType, items: Vec<StructuralValue>) -> Self {
        Self::known(AttrType::list_of(element), Payload::List(items))
    }

    pub fn ty(&self) -> Option<&AttrType> {
        self.ty.as_ref()
    }

    pub fn state(&self) -> &ValueState {
        &self.state
    }

    pub fn is_null(&self) -> bool {
        matches!(self.state, ValueState::Null)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self.state, ValueState::Unknown)
    }

    pub(crate) fn type_name(&self) -> String {
        match &self.ty {
            Some(ty) => ty.to_string(),
            None => "untyped".to_string(),
        }
    }
}

/// One step of an attribute path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
    AttributeName(String),
    ElementKeyInt(i64),
    ElementKeyString(String),
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathStep::AttributeName(name) => write!(f, "{name}"),
            PathStep::ElementKeyInt(index) => write!(f, "[{index}]"),
            PathStep::ElementKeyString(key) => write!(f, "[{key:?}]"),
        }
    }
}

/// Location of a value inside a configuration, used for diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttrPath {
    steps: Vec<PathStep>,
}

impl AttrPath {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn root(name: impl Into<String>) -> Self {
        Self::empty().with_step(PathStep::AttributeName(name.into()))
    }

    pub fn with_step(mut self, step: PathStep) -> Self {
        self.steps.push(step);
        self
    }

    pub fn with_index(self, index: i64) -> Self {
        self.with_step(PathStep::ElementKeyInt(index))
    }

    pub fn join(&self, rest: &AttrPath) -> AttrPath {
        let mut steps = self.steps.clone();
        steps.extend(rest.steps.iter().cloned());
        AttrPath { steps }
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl fmt::Display for AttrPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 && matches!(step, PathStep::AttributeName(_)) {
                write!(f, ".")?;
            }
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

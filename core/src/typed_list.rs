//! An ordered list value that is unknown, null, or known.
//!
//! # Design
//! `TypedList<E>` is immutable once built. The element sequence is only
//! handed out by copy (`elements`) or by shared borrow (`iter`), so nothing
//! outside can reach the internal storage mutably. A known-but-empty list is
//! its own state and never equal to null or unknown.

use std::fmt;

use crate::attr::{ElementValue, StringAttr};
use crate::error::TypeMismatch;
use crate::structural::{AttrType, PathStep, Payload, StructuralValue, ValueState};
use crate::typed_list_type::TypedListType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListState {
    Unknown,
    Null,
    Known,
}

#[derive(Debug, Clone, PartialEq)]
enum Repr<E> {
    Unknown,
    Null,
    Known(Vec<E>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedList<E> {
    repr: Repr<E>,
}

impl<E: ElementValue> TypedList<E> {
    pub fn known(elements: Vec<E>) -> Self {
        Self {
            repr: Repr::Known(elements),
        }
    }

    pub fn null() -> Self {
        Self { repr: Repr::Null }
    }

    pub fn unknown() -> Self {
        Self {
            repr: Repr::Unknown,
        }
    }

    pub fn state(&self) -> ListState {
        match self.repr {
            Repr::Unknown => ListState::Unknown,
            Repr::Null => ListState::Null,
            Repr::Known(_) => ListState::Known,
        }
    }

    pub fn is_null(&self) -> bool {
        self.state() == ListState::Null
    }

    pub fn is_unknown(&self) -> bool {
        self.state() == ListState::Unknown
    }

    /// Copy of the elements; empty unless known.
    pub fn elements(&self) -> Vec<E> {
        self.as_slice().to_vec()
    }

    fn as_slice(&self) -> &[E] {
        match &self.repr {
            Repr::Known(elements) => elements.as_slice(),
            Repr::Unknown | Repr::Null => &[],
        }
    }

    /// Zero unless known.
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Same state, and for known lists the same elements in the same order.
    pub fn equal(&self, other: &TypedList<E>) -> bool {
        self == other
    }

    pub fn type_descriptor(&self) -> TypedListType<E> {
        TypedListType::new()
    }

    pub fn to_wire(&self) -> StructuralValue {
        let ty = AttrType::list_of(E::attr_type());
        match &self.repr {
            Repr::Unknown => StructuralValue::unknown(ty),
            Repr::Null => StructuralValue::null(ty),
            Repr::Known(elements) => StructuralValue::known(
                ty,
                Payload::List(elements.iter().map(E::to_structural).collect()),
            ),
        }
    }

    /// Inverse of `to_wire`, decoding elements with their default type.
    pub fn from_wire(raw: &StructuralValue) -> Result<Self, TypeMismatch> {
        decode(raw, &E::attr_type())
    }
}

/// Decode `raw` as a list of `element_ty`. Any mismatch fails the whole list.
pub(crate) fn decode<E: ElementValue>(
    raw: &StructuralValue,
    element_ty: &AttrType,
) -> Result<TypedList<E>, TypeMismatch> {
    let list_ty = AttrType::list_of(element_ty.clone());
    let Some(ty) = raw.ty() else {
        return match raw.state() {
            ValueState::Null => Ok(TypedList::null()),
            _ => Err(TypeMismatch::new(list_ty, raw.type_name())),
        };
    };
    if *ty != list_ty {
        return Err(TypeMismatch::new(list_ty, raw.type_name()));
    }

    match raw.state() {
        ValueState::Null => Ok(TypedList::null()),
        ValueState::Unknown => Ok(TypedList::unknown()),
        ValueState::Known(Payload::List(items)) => items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                E::from_structural(item, element_ty)
                    .map_err(|e| e.under(PathStep::ElementKeyInt(index as i64)))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(TypedList::known),
        ValueState::Known(payload) => Err(TypeMismatch::new(list_ty, payload.shape())),
    }
}

impl<E: ElementValue> fmt::Display for TypedList<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypedList[{}]", E::attr_type())
    }
}

impl TypedList<StringAttr> {
    /// Known list of known strings. `None` is treated as "no strings".
    pub fn from_strings(strings: Option<&[String]>) -> Self {
        let elements = strings
            .unwrap_or_default()
            .iter()
            .map(|s| StringAttr::known(s.clone()))
            .collect();
        TypedList::known(elements)
    }

    /// The known strings in order, skipping null and unknown elements.
    /// `None` when the list itself is null or unknown.
    pub fn to_strings(&self) -> Option<Vec<String>> {
        match &self.repr {
            Repr::Known(elements) => Some(elements.iter().filter_map(|e| e.get().cloned()).collect()),
            Repr::Unknown | Repr::Null => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr::BoolAttr;

    fn strings(values: &[&str]) -> TypedList<StringAttr> {
        TypedList::known(values.iter().map(|v| StringAttr::from(*v)).collect())
    }

    #[test]
    fn states() {
        assert_eq!(TypedList::<StringAttr>::unknown().state(), ListState::Unknown);
        assert_eq!(TypedList::<StringAttr>::null().state(), ListState::Null);
        assert_eq!(strings(&[]).state(), ListState::Known);
        assert_eq!(strings(&["a"]).state(), ListState::Known);
        assert!(TypedList::<StringAttr>::null().is_null());
        assert!(TypedList::<StringAttr>::unknown().is_unknown());
    }

    #[test]
    fn state_distinctness() {
        let null = TypedList::<StringAttr>::null();
        let unknown = TypedList::<StringAttr>::unknown();
        let empty = strings(&[]);

        assert!(null.equal(&TypedList::null()));
        assert!(unknown.equal(&TypedList::unknown()));
        assert!(empty.equal(&strings(&[])));
        assert!(!null.equal(&unknown));
        assert!(!empty.equal(&null));
        assert!(!empty.equal(&unknown));
        assert!(!null.equal(&strings(&["x"])));
    }

    #[test]
    fn known_equality_is_ordered_and_elementwise() {
        assert!(strings(&["x"]).equal(&strings(&["x"])));
        assert!(!strings(&["x"]).equal(&strings(&["y"])));
        assert!(!strings(&["x"]).equal(&strings(&["x", "y"])));
        assert!(!strings(&["a", "b"]).equal(&strings(&["b", "a"])));
    }

    #[test]
    fn element_states_take_part_in_equality() {
        let left = TypedList::known(vec![StringAttr::unknown(), StringAttr::null()]);
        let right = TypedList::known(vec![StringAttr::unknown(), StringAttr::null()]);
        assert!(left.equal(&right));

        let swapped = TypedList::known(vec![StringAttr::null(), StringAttr::unknown()]);
        assert!(!left.equal(&swapped));
    }

    #[test]
    fn elements_and_len_are_empty_unless_known() {
        for list in [TypedList::<StringAttr>::null(), TypedList::unknown(), strings(&[])] {
            assert!(list.elements().is_empty());
            assert_eq!(list.len(), 0);
            assert!(list.is_empty());
        }
        assert_eq!(strings(&["a", "b", "c"]).len(), 3);
        assert_eq!(
            strings(&["a", "b"]).elements(),
            vec![StringAttr::from("a"), StringAttr::from("b")]
        );
    }

    #[test]
    fn elements_returns_a_defensive_copy() {
        let list = strings(&["original"]);
        let mut copy = list.elements();
        copy[0] = StringAttr::from("modified");
        assert_eq!(list.elements(), vec![StringAttr::from("original")]);
    }

    #[test]
    fn to_wire_shapes() {
        let ty = AttrType::list_of(AttrType::String);
        assert_eq!(TypedList::<StringAttr>::null().to_wire(), StructuralValue::null(ty.clone()));
        assert_eq!(TypedList::<StringAttr>::unknown().to_wire(), StructuralValue::unknown(ty));

        let mixed = TypedList::known(vec![StringAttr::from("known"), StringAttr::unknown(), StringAttr::null()]);
        let wire = mixed.to_wire();
        match wire.state() {
            ValueState::Known(Payload::List(items)) => {
                assert_eq!(items.len(), 3);
                assert_eq!(items[0], StructuralValue::string("known"));
                assert!(items[1].is_unknown());
                assert!(items[2].is_null());
            }
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[test]
    fn wire_round_trip() {
        let cases = [
            TypedList::<StringAttr>::null(),
            TypedList::unknown(),
            strings(&[]),
            strings(&["one", "two", "", "one"]),
            TypedList::known(vec![StringAttr::from("a"), StringAttr::unknown(), StringAttr::null()]),
        ];
        for list in cases {
            let back = TypedList::<StringAttr>::from_wire(&list.to_wire()).unwrap();
            assert!(back.equal(&list), "round trip of {list:?}");
        }
    }

    #[test]
    fn from_wire_preserves_order() {
        let raw = StructuralValue::list(
            AttrType::String,
            vec![
                StructuralValue::string("c"),
                StructuralValue::string("a"),
                StructuralValue::string("b"),
            ],
        );
        let list = TypedList::<StringAttr>::from_wire(&raw).unwrap();
        assert_eq!(list.to_strings(), Some(vec!["c".into(), "a".into(), "b".into()]));
    }

    #[test]
    fn from_wire_untyped_null_is_null() {
        let list = TypedList::<StringAttr>::from_wire(&StructuralValue::untyped_null()).unwrap();
        assert!(list.is_null());
    }

    #[test]
    fn from_wire_rejects_non_list() {
        let err = TypedList::<StringAttr>::from_wire(&StructuralValue::string("s")).unwrap_err();
        assert_eq!(err.expected, AttrType::list_of(AttrType::String));
        assert_eq!(err.found, "String");
    }

    #[test]
    fn from_wire_rejects_other_element_type() {
        let raw = StructuralValue::list(AttrType::Number, vec![]);
        assert!(TypedList::<StringAttr>::from_wire(&raw).is_err());
    }

    #[test]
    fn from_wire_aborts_on_bad_element() {
        let raw = StructuralValue::list(
            AttrType::String,
            vec![StructuralValue::string("ok"), StructuralValue::number(7)],
        );
        let err = TypedList::<StringAttr>::from_wire(&raw).unwrap_err();
        assert_eq!(err.at.to_string(), "[1]");
    }

    #[test]
    fn bool_lists_work_too() {
        let list = TypedList::known(vec![BoolAttr::from(true), BoolAttr::null()]);
        let back = TypedList::<BoolAttr>::from_wire(&list.to_wire()).unwrap();
        assert!(back.equal(&list));
    }

    #[test]
    fn display_names_element_type() {
        assert_eq!(TypedList::<StringAttr>::null().to_string(), "TypedList[String]");
        assert_eq!(strings(&["x"]).to_string(), "TypedList[String]");
    }

    #[test]
    fn from_strings() {
        assert!(TypedList::from_strings(None).equal(&strings(&[])));
        assert!(TypedList::from_strings(Some(&[] as &[String])).equal(&strings(&[])));
        let input = vec!["hello world".to_string(), "".to_string(), "path/to/file".to_string()];
        assert!(TypedList::from_strings(Some(input.as_slice())).equal(&strings(&["hello world", "", "path/to/file"])));
    }

    #[test]
    fn to_strings_filters_null_and_unknown() {
        let list = TypedList::known(vec![
            StringAttr::from("value1"),
            StringAttr::unknown(),
            StringAttr::null(),
            StringAttr::from(""),
            StringAttr::from("value2"),
        ]);
        assert_eq!(
            list.to_strings(),
            Some(vec!["value1".to_string(), String::new(), "value2".to_string()])
        );
        assert_eq!(TypedList::known(vec![StringAttr::null()]).to_strings(), Some(vec![]));
        assert_eq!(TypedList::<StringAttr>::null().to_strings(), None);
        assert_eq!(TypedList::<StringAttr>::unknown().to_strings(), None);
    }

    #[test]
    fn string_conversion_round_trip() {
        for input in [vec![], vec!["test"], vec!["a", "b", "c"], vec!["", "value", ""]] {
            let owned: Vec<String> = input.iter().map(|s| s.to_string()).collect();
            let list = TypedList::from_strings(Some(owned.as_slice()));
            assert_eq!(list.to_strings(), Some(owned));
        }
    }
}

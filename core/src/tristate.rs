//! Optional fields for outbound partial-update payloads.
//!
//! # Design
//! A partial update has three instructions per field: leave it alone, clear
//! it, or set it. `OptNil<T>` carries all three (`Absent`, `Null`,
//! `Present`). `Opt<T>` is for fields the API cannot clear and has no `Null`.
//!
//! Both serialize so that a struct field declared as
//!
//! ```ignore
//! #[serde(default, skip_serializing_if = "OptNil::is_absent")]
//! description: OptNil<String>,
//! ```
//!
//! is omitted when `Absent`, written as `null` when `Null`, and written as
//! the value when `Present`. Deserialization is the inverse. Serializing an
//! `Opt::Absent` without the skip attribute is an error, so a non-nullable
//! field never goes out as `null`.

use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A field that is either absent or present. Never null.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Opt<T> {
    #[default]
    Absent,
    Present(T),
}

impl<T> Opt<T> {
    pub fn absent() -> Self {
        Opt::Absent
    }

    pub fn present(value: T) -> Self {
        Opt::Present(value)
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Opt::Present(_))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Opt::Absent)
    }

    /// Always false, `Opt` has no null state.
    pub fn is_null(&self) -> bool {
        false
    }

    pub fn get(&self) -> Option<&T> {
        match self {
            Opt::Present(v) => Some(v),
            Opt::Absent => None,
        }
    }
}

impl<T: Clone> Opt<T> {
    /// `None` maps to `Absent`.
    pub fn from_pointer(value: Option<&T>) -> Self {
        match value {
            Some(v) => Opt::Present(v.clone()),
            None => Opt::Absent,
        }
    }

    /// A copy of the present value.
    pub fn to_pointer(&self) -> Option<T> {
        self.get().cloned()
    }
}

impl<T: Serialize> Serialize for Opt<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Opt::Present(v) => v.serialize(serializer),
            Opt::Absent => Err(S::Error::custom(
                "absent field must be skipped with skip_serializing_if",
            )),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Opt<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::deserialize(deserializer).map(Opt::Present)
    }
}

/// A field that is absent, explicitly null, or present.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OptNil<T> {
    #[default]
    Absent,
    Null,
    Present(T),
}

impl<T> OptNil<T> {
    pub fn absent() -> Self {
        OptNil::Absent
    }

    pub fn null() -> Self {
        OptNil::Null
    }

    pub fn present(value: T) -> Self {
        OptNil::Present(value)
    }

    pub fn is_present(&self) -> bool {
        matches!(self, OptNil::Present(_))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, OptNil::Absent)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, OptNil::Null)
    }

    pub fn get(&self) -> Option<&T> {
        match self {
            OptNil::Present(v) => Some(v),
            OptNil::Absent | OptNil::Null => None,
        }
    }
}

impl<T: Clone> OptNil<T> {
    /// `None` maps to `Null`: the caller has no value, so the field is cleared.
    pub fn from_pointer(value: Option<&T>) -> Self {
        match value {
            Some(v) => OptNil::Present(v.clone()),
            None => OptNil::Null,
        }
    }

    /// A copy of the present value.
    pub fn to_pointer(&self) -> Option<T> {
        self.get().cloned()
    }
}

impl<T: Serialize> Serialize for OptNil<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            OptNil::Present(v) => v.serialize(serializer),
            OptNil::Absent | OptNil::Null => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for OptNil<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => OptNil::Present(v),
            None => OptNil::Null,
        })
    }
}

//! Read-only access to the fields of a data record.
//!
//! The engine never needs to know what a record really is: anything that can
//! answer "what is the value of field X" can be rendered. JSON objects and
//! string-keyed maps work out of the box; domain structs implement
//! [`Record`] by hand (or serialize themselves into a `serde_json::Value`).

use serde_json::{Map, Value};
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::sync::Arc;

pub trait Record {
    /// Looks up a top-level field. `None` means the field does not exist,
    /// which is different from a field holding `null`.
    fn field(&self, name: &str) -> Option<Cow<'_, Value>>;

    /// The whole record as a value, used by the `.` selection.
    fn as_value(&self) -> Option<Cow<'_, Value>> {
        None
    }
}

impl Record for Value {
    fn field(&self, name: &str) -> Option<Cow<'_, Value>> {
        self.as_object()?.get(name).map(Cow::Borrowed)
    }

    fn as_value(&self) -> Option<Cow<'_, Value>> {
        Some(Cow::Borrowed(self))
    }
}

impl Record for Map<String, Value> {
    fn field(&self, name: &str) -> Option<Cow<'_, Value>> {
        self.get(name).map(Cow::Borrowed)
    }

    fn as_value(&self) -> Option<Cow<'_, Value>> {
        Some(Cow::Owned(Value::Object(self.clone())))
    }
}

impl<S: BuildHasher> Record for HashMap<String, Value, S> {
    fn field(&self, name: &str) -> Option<Cow<'_, Value>> {
        self.get(name).map(Cow::Borrowed)
    }
}

impl Record for BTreeMap<String, Value> {
    fn field(&self, name: &str) -> Option<Cow<'_, Value>> {
        self.get(name).map(Cow::Borrowed)
    }

    fn as_value(&self) -> Option<Cow<'_, Value>> {
        let map: Map<String, Value> = self.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        Some(Cow::Owned(Value::Object(map)))
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, name: &str) -> Option<Cow<'_, Value>> {
        (**self).field(name)
    }

    fn as_value(&self) -> Option<Cow<'_, Value>> {
        (**self).as_value()
    }
}

impl<R: Record + ?Sized> Record for Box<R> {
    fn field(&self, name: &str) -> Option<Cow<'_, Value>> {
        (**self).field(name)
    }

    fn as_value(&self) -> Option<Cow<'_, Value>> {
        (**self).as_value()
    }
}

impl<R: Record + ?Sized> Record for Arc<R> {
    fn field(&self, name: &str) -> Option<Cow<'_, Value>> {
        (**self).field(name)
    }

    fn as_value(&self) -> Option<Cow<'_, Value>> {
        (**self).as_value()
    }
}

use std::cell::{Ref, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

/// The six structural kinds a value can fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl Kind {
    /// Name used in class labels and descriptive type text.
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Boolean => "boolean",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Object => "object",
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, Kind::Array | Kind::Object)
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value to be rendered.
///
/// Lists and mappings are shared handles: cloning a `Value::List` clones the
/// handle, not the elements, which is what allows a composite to contain
/// itself.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    List(List),
    Mapping(Mapping),
}

impl Value {
    /// A new, empty list value.
    pub fn list() -> Self {
        Value::List(List::default())
    }

    /// A new, empty mapping value.
    pub fn mapping() -> Self {
        Value::Mapping(Mapping::default())
    }

    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Boolean,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::List(_) => Kind::Array,
            Value::Mapping(_) => Kind::Object,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }
}

/// Identity of a composite allocation, stable for as long as a handle to it
/// is alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity(usize);

/// Shared, mutable ordered list.
#[derive(Clone, Default)]
pub struct List(Rc<RefCell<Vec<Value>>>);

impl List {
    pub fn push(&self, value: impl Into<Value>) {
        self.0.borrow_mut().push(value.into());
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.borrow().get(index).cloned()
    }

    pub fn items(&self) -> Ref<'_, Vec<Value>> {
        self.0.borrow()
    }

    pub fn identity(&self) -> Identity {
        Identity(Rc::as_ptr(&self.0) as *const () as usize)
    }

    pub fn ptr_eq(&self, other: &List) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Shared, mutable mapping from string keys to values.
///
/// Storage order is unspecified; consumers that need a stable order sort the
/// keys themselves.
#[derive(Clone, Default)]
pub struct Mapping(Rc<RefCell<HashMap<String, Value>>>);

impl Mapping {
    /// Insert a value, returning the previous value stored under `key`.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.borrow_mut().insert(key.into(), value.into())
    }

    pub fn remove(&self, key: &str) -> Option<Value> {
        self.0.borrow_mut().remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.0.borrow().get(key).cloned()
    }

    pub fn keys(&self) -> Vec<String> {
        self.0.borrow().keys().cloned().collect()
    }

    /// Keys in ascending order of their UTF-16 code units, the plain string
    /// comparison a default sort performs. Not locale or numeric aware.
    pub fn sorted_keys(&self) -> Vec<String> {
        let mut keys = self.keys();
        keys.sort_by(|a, b| a.encode_utf16().cmp(b.encode_utf16()));
        keys
    }

    /// Entries in `sorted_keys` order.
    pub fn sorted_entries(&self) -> Vec<(String, Value)> {
        let entries = self.0.borrow();
        let mut sorted: Vec<(String, Value)> = entries
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        sorted.sort_by(|(a, _), (b, _)| a.encode_utf16().cmp(b.encode_utf16()));
        sorted
    }

    pub fn identity(&self) -> Identity {
        Identity(Rc::as_ptr(&self.0) as *const () as usize)
    }

    pub fn ptr_eq(&self, other: &Mapping) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

// Composites may contain themselves, so Debug reports shape and identity
// rather than walking the contents.
impl std::fmt::Debug for List {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("List")
            .field("len", &self.len())
            .field("identity", &self.identity())
            .finish()
    }
}

impl std::fmt::Debug for Mapping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mapping")
            .field("keys", &self.sorted_keys())
            .field("identity", &self.identity())
            .finish()
    }
}

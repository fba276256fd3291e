//! @ai:module:intent Nested result tree built incrementally by extraction rules
//! @ai:module:layer domain
//! @ai:module:public_api Key, Value, Map, Path, Tree, path!
//! @ai:module:stateless true

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// @ai:intent Mapping key: integers for numeric identifiers (levels, EVIs), strings otherwise
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    Int(i64),
    Str(String),
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Key::Int(n) => serializer.serialize_i64(*n),
            Key::Str(s) => serializer.serialize_str(s),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(n) => write!(f, "{}", n),
            Key::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Str(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Str(s)
    }
}

impl From<&String> for Key {
    fn from(s: &String) -> Self {
        Key::Str(s.clone())
    }
}

impl From<i64> for Key {
    fn from(n: i64) -> Self {
        Key::Int(n)
    }
}

impl From<&Key> for Key {
    fn from(key: &Key) -> Self {
        key.clone()
    }
}

pub type Map = BTreeMap<Key, Value>;

/// @ai:intent A node of the result tree
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Str(String),
    List(Vec<Value>),
    Map(Map),
}

impl Value {
    /// @ai:intent Name of the value's type as used in schema violations
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Str(s) => serializer.serialize_str(s),
            Value::List(items) => items.serialize(serializer),
            Value::Map(map) => map.serialize(serializer),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Map(map)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl<T: Into<Value>> FromIterator<T> for Value {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Value::List(iter.into_iter().map(Into::into).collect())
    }
}

/// @ai:intent Location of a mapping inside the tree, as a sequence of keys from the root
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path(Vec<Key>);

impl Path {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn from_keys(keys: Vec<Key>) -> Self {
        Self(keys)
    }

    /// @ai:intent Path one level deeper
    /// @ai:effects pure
    pub fn child(&self, key: impl Into<Key>) -> Path {
        let mut keys = self.0.clone();
        keys.push(key.into());
        Path(keys)
    }

    pub fn keys(&self) -> &[Key] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "[]");
        }
        for key in &self.0 {
            write!(f, "[{}]", key)?;
        }
        Ok(())
    }
}

/// Builds a [`Path`] from keys: `path!["isis", name, "vrf", vrf]`.
#[macro_export]
macro_rules! path {
    () => {
        $crate::tree::Path::root()
    };
    ($($key:expr),+ $(,)?) => {
        $crate::tree::Path::from_keys(vec![$($crate::tree::Key::from($key)),+])
    };
}

/// @ai:intent Result tree produced by one extraction call
///
/// Every write goes through [`Tree::entry`], which creates missing
/// intermediate mappings, so rules never need to pre-build containers.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Tree {
    root: Map,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    pub fn root(&self) -> &Map {
        &self.root
    }

    /// @ai:intent Look up the value stored at a path
    /// @ai:effects pure
    pub fn get(&self, path: &Path) -> Option<&Value> {
        let (last, parents) = path.keys().split_last()?;
        let mut node = &self.root;
        for key in parents {
            node = node.get(key)?.as_map()?;
        }
        node.get(last)
    }

    /// @ai:intent Look up the mapping stored at a path; the empty path is the root
    pub fn map_at(&self, path: &Path) -> Option<&Map> {
        if path.is_root() {
            return Some(&self.root);
        }
        self.get(path)?.as_map()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.get(path).is_some()
    }

    /// @ai:intent Number of keys in the mapping at a path, 0 when absent
    pub fn len_at(&self, path: &Path) -> usize {
        self.map_at(path).map_or(0, |map| map.len())
    }

    /// @ai:intent Get the mapping at a path, creating it and every missing parent
    /// @ai:post a mapping exists at path; scalars found on the way are replaced
    pub fn entry(&mut self, path: &Path) -> &mut Map {
        let mut node = &mut self.root;
        for key in path.keys() {
            node = as_map_mut(
                node.entry(key.clone())
                    .or_insert_with(|| Value::Map(Map::new())),
            );
        }
        node
    }

    /// @ai:intent Create the mapping at a path if missing
    pub fn touch(&mut self, path: &Path) {
        self.entry(path);
    }

    /// @ai:intent Store a value under key in the mapping at path, overwriting
    pub fn set(&mut self, path: &Path, key: impl Into<Key>, value: impl Into<Value>) {
        self.entry(path).insert(key.into(), value.into());
    }

    /// @ai:intent Store a value only when the key is not present yet
    pub fn set_default(&mut self, path: &Path, key: impl Into<Key>, value: impl Into<Value>) {
        self.entry(path)
            .entry(key.into())
            .or_insert_with(|| value.into());
    }

    /// @ai:intent Append to the list under key, creating the list on first use
    /// @ai:post a scalar already stored under key becomes the first list element
    pub fn push(&mut self, path: &Path, key: impl Into<Key>, value: impl Into<Value>) {
        let slot = self
            .entry(path)
            .entry(key.into())
            .or_insert_with(|| Value::List(Vec::new()));
        if !matches!(slot, Value::List(_)) {
            let previous = std::mem::replace(slot, Value::List(Vec::new()));
            if let Value::List(items) = slot {
                items.push(previous);
            }
        }
        if let Value::List(items) = slot {
            items.push(value.into());
        }
    }

    /// @ai:intent Append several values to the list under key
    pub fn extend<I, V>(&mut self, path: &Path, key: impl Into<Key>, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let key = key.into();
        for value in values {
            self.push(path, key.clone(), value);
        }
    }

    pub fn remove(&mut self, path: &Path, key: impl Into<Key>) -> Option<Value> {
        let key = key.into();
        let mut node = &mut self.root;
        for step in path.keys() {
            node = match node.get_mut(step)? {
                Value::Map(map) => map,
                _ => return None,
            };
        }
        node.remove(&key)
    }

    /// @ai:intent Convert to a JSON value (integer keys become strings)
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

fn as_map_mut(value: &mut Value) -> &mut Map {
    if !matches!(value, Value::Map(_)) {
        *value = Value::Map(Map::new());
    }
    match value {
        Value::Map(map) => map,
        _ => unreachable!("value was replaced by a map above"),
    }
}

//! @ai:module:intent Declared shapes of command results and their validation
//! @ai:module:layer domain
//! @ai:module:public_api Shape, Field, Violation, validate, check, req, opt, any, any_opt, map, keyed, list_of
//! @ai:module:depends_on tree, error
//! @ai:module:stateless true

use crate::error::{Error, Result};
use crate::tree::{Key, Map, Path, Tree, Value};
use serde::Serialize;
use std::fmt;

/// @ai:intent Expected type of a value in the result tree
#[derive(Debug, Clone)]
pub enum Shape {
    Str,
    Int,
    Bool,
    /// List of scalars, elements unchecked.
    List,
    /// List whose every element conforms to the inner shape.
    ListOf(Box<Shape>),
    Map(Vec<Field>),
    OneOf(Vec<Shape>),
}

/// @ai:intent One key declaration inside a mapping shape
#[derive(Debug, Clone)]
pub enum Field {
    Required(&'static str, Shape),
    Optional(&'static str, Shape),
    /// Wildcard key (interface names, instance names, ids); at least one must be present.
    AnyRequired(Shape),
    /// Wildcard key that may have no entries.
    AnyOptional(Shape),
}

impl Field {
    fn fixed_key(&self) -> Option<&'static str> {
        match self {
            Field::Required(key, _) | Field::Optional(key, _) => Some(*key),
            Field::AnyRequired(_) | Field::AnyOptional(_) => None,
        }
    }

    fn shape(&self) -> &Shape {
        match self {
            Field::Required(_, shape)
            | Field::Optional(_, shape)
            | Field::AnyRequired(shape)
            | Field::AnyOptional(shape) => shape,
        }
    }
}

pub fn req(key: &'static str, shape: Shape) -> Field {
    Field::Required(key, shape)
}

pub fn opt(key: &'static str, shape: Shape) -> Field {
    Field::Optional(key, shape)
}

pub fn any(shape: Shape) -> Field {
    Field::AnyRequired(shape)
}

pub fn any_opt(shape: Shape) -> Field {
    Field::AnyOptional(shape)
}

pub fn map(fields: Vec<Field>) -> Shape {
    Shape::Map(fields)
}

/// Mapping keyed only by wildcards, with at least one entry.
pub fn keyed(shape: Shape) -> Shape {
    Shape::Map(vec![Field::AnyRequired(shape)])
}

pub fn list_of(shape: Shape) -> Shape {
    Shape::ListOf(Box::new(shape))
}

impl Shape {
    /// @ai:intent Human-readable rendering: `?` marks optional keys, `*` wildcards
    /// @ai:effects pure
    pub fn describe(&self) -> serde_json::Value {
        use serde_json::Value as Json;
        match self {
            Shape::Str => Json::from("str"),
            Shape::Int => Json::from("int"),
            Shape::Bool => Json::from("bool"),
            Shape::List => Json::from("list"),
            Shape::ListOf(inner) => Json::Array(vec![inner.describe()]),
            Shape::OneOf(options) => {
                serde_json::json!({ "one_of": options.iter().map(Shape::describe).collect::<Vec<_>>() })
            }
            Shape::Map(fields) => {
                let mut out = serde_json::Map::new();
                for field in fields {
                    let name = match field {
                        Field::Required(key, _) => key.to_string(),
                        Field::Optional(key, _) => format!("{}?", key),
                        Field::AnyRequired(_) => "*".to_string(),
                        Field::AnyOptional(_) => "*?".to_string(),
                    };
                    out.insert(name, field.shape().describe());
                }
                Json::Object(out)
            }
        }
    }
}

/// @ai:intent A single mismatch between a tree and its shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    MissingKey { path: String },
    UnexpectedKey { path: String },
    WrongType {
        path: String,
        expected: String,
        found: &'static str,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::MissingKey { path } => write!(f, "missing key {}", path),
            Violation::UnexpectedKey { path } => write!(f, "unexpected key {}", path),
            Violation::WrongType {
                path,
                expected,
                found,
            } => write!(f, "{} should be {} but is {}", path, expected, found),
        }
    }
}

/// @ai:intent Collect every violation of shape by tree
/// @ai:post same input always yields the same violations in the same order
/// @ai:effects pure
pub fn validate(tree: &Tree, shape: &Shape) -> Vec<Violation> {
    let mut violations = Vec::new();
    match shape {
        Shape::Map(fields) => check_map(tree.root(), fields, &Path::root(), &mut violations),
        other => violations.push(Violation::WrongType {
            path: Path::root().to_string(),
            expected: type_label(other),
            found: "map",
        }),
    }
    violations
}

/// @ai:intent Validate and turn violations into an error
pub fn check(command: &str, tree: &Tree, shape: &Shape) -> Result<()> {
    let violations = validate(tree, shape);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(Error::Schema {
            command: command.to_string(),
            violations,
        })
    }
}

fn check_map(map: &Map, fields: &[Field], path: &Path, out: &mut Vec<Violation>) {
    for field in fields {
        let Some(key) = field.fixed_key() else { continue };
        match map.get(&Key::from(key)) {
            Some(value) => check_value(value, field.shape(), &path.child(key), out),
            None if matches!(field, Field::Required(..)) => out.push(Violation::MissingKey {
                path: path.child(key).to_string(),
            }),
            None => {}
        }
    }

    let wildcard = fields.iter().find(|f| f.fixed_key().is_none());
    let mut wildcard_keys = 0;
    for (key, value) in map {
        let is_fixed = match key {
            Key::Str(name) => fields.iter().any(|f| f.fixed_key() == Some(name.as_str())),
            Key::Int(_) => false,
        };
        if is_fixed {
            continue;
        }
        match wildcard {
            Some(field) => {
                wildcard_keys += 1;
                check_value(value, field.shape(), &path.child(key), out);
            }
            None => out.push(Violation::UnexpectedKey {
                path: path.child(key).to_string(),
            }),
        }
    }

    if matches!(wildcard, Some(Field::AnyRequired(_))) && wildcard_keys == 0 {
        out.push(Violation::MissingKey {
            path: path.child("*").to_string(),
        });
    }
}

fn check_value(value: &Value, shape: &Shape, path: &Path, out: &mut Vec<Violation>) {
    match (shape, value) {
        (Shape::Str, Value::Str(_))
        | (Shape::Int, Value::Int(_))
        | (Shape::Bool, Value::Bool(_))
        | (Shape::List, Value::List(_)) => {}
        (Shape::ListOf(inner), Value::List(items)) => {
            for (idx, item) in items.iter().enumerate() {
                check_value(item, inner, &path.child(idx as i64), out);
            }
        }
        (Shape::Map(fields), Value::Map(map)) => check_map(map, fields, path, out),
        (Shape::OneOf(options), _) => {
            let fits = options.iter().any(|option| {
                let mut scratch = Vec::new();
                check_value(value, option, path, &mut scratch);
                scratch.is_empty()
            });
            if !fits {
                out.push(Violation::WrongType {
                    path: path.to_string(),
                    expected: type_label(shape),
                    found: value.type_name(),
                });
            }
        }
        _ => out.push(Violation::WrongType {
            path: path.to_string(),
            expected: type_label(shape),
            found: value.type_name(),
        }),
    }
}

fn type_label(shape: &Shape) -> String {
    match shape {
        Shape::Str => "str".to_string(),
        Shape::Int => "int".to_string(),
        Shape::Bool => "bool".to_string(),
        Shape::List | Shape::ListOf(_) => "list".to_string(),
        Shape::Map(_) => "map".to_string(),
        Shape::OneOf(options) => options.iter().map(type_label).collect::<Vec<_>>().join(" | "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path;

    fn adjacency_shape() -> Shape {
        map(vec![req(
            "level",
            map(vec![any(map(vec![
                opt("total_adjacency_count", Shape::Int),
                any_opt(map(vec![req("state", Shape::Str)])),
            ]))]),
        )])
    }

    #[test]
    fn test_valid_tree_has_no_violations() {
        let mut tree = Tree::new();
        tree.set(&path!["level", "Level-1"], "total_adjacency_count", 2i64);
        tree.set(&path!["level", "Level-1", "Gi0/0/0/0"], "state", "Up");

        assert!(validate(&tree, &adjacency_shape()).is_empty());
        assert!(check("show isis adjacency", &tree, &adjacency_shape()).is_ok());
    }

    #[test]
    fn test_missing_required_key() {
        let tree = Tree::new();
        assert_eq!(
            validate(&tree, &adjacency_shape()),
            vec![Violation::MissingKey {
                path: "[level]".to_string()
            }]
        );
    }

    #[test]
    fn test_required_wildcard_needs_an_entry() {
        let mut tree = Tree::new();
        tree.touch(&path!["level"]);
        assert_eq!(
            validate(&tree, &adjacency_shape()),
            vec![Violation::MissingKey {
                path: "[level][*]".to_string()
            }]
        );
    }

    #[test]
    fn test_unexpected_key_and_wrong_type() {
        let mut tree = Tree::new();
        tree.set(&path!["level", "Level-2"], "total_adjacency_count", "1");
        tree.set(&Path::root(), "extra", true);

        let violations = validate(&tree, &adjacency_shape());
        assert_eq!(violations.len(), 2);
        assert!(violations.contains(&Violation::UnexpectedKey {
            path: "[extra]".to_string()
        }));
        assert!(violations.contains(&Violation::WrongType {
            path: "[level][Level-2][total_adjacency_count]".to_string(),
            expected: "int".to_string(),
            found: "str",
        }));
    }

    #[test]
    fn test_revalidation_is_idempotent() {
        let mut tree = Tree::new();
        tree.set(&Path::root(), "level", 1i64);
        let first = validate(&tree, &adjacency_shape());
        let second = validate(&tree, &adjacency_shape());
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[test]
    fn test_list_of_and_one_of() {
        let shape = map(vec![
            req("topologies", list_of(map(vec![req("topo_id", Shape::Int)]))),
            opt("label", Shape::OneOf(vec![Shape::Int, Shape::Str])),
        ]);
        let mut entry = Map::new();
        entry.insert(Key::from("topo_id"), Value::from("x"));
        let mut tree = Tree::new();
        tree.push(&Path::root(), "topologies", Value::Map(entry));
        tree.set(&Path::root(), "label", "none");

        assert_eq!(
            validate(&tree, &shape),
            vec![Violation::WrongType {
                path: "[topologies][0][topo_id]".to_string(),
                expected: "int".to_string(),
                found: "str",
            }]
        );
    }

    #[test]
    fn test_check_error_carries_violations() {
        let err = check("show isis adjacency", &Tree::new(), &adjacency_shape()).unwrap_err();
        match err {
            Error::Schema { command, violations } => {
                assert_eq!(command, "show isis adjacency");
                assert_eq!(violations.len(), 1);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_describe_marks_optional_and_wildcards() {
        let described = adjacency_shape().describe();
        assert_eq!(
            described,
            serde_json::json!({"level": {"*": {"total_adjacency_count?": "int", "*?": {"state": "str"}}}})
        );
    }
}

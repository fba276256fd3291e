//! @ai:module:intent Pattern rules: an anchored regex paired with an assignment into the tree
//! @ai:module:layer domain
//! @ai:module:public_api Rule, RuleSet, Fields, Action, Assign, Transform
//! @ai:module:depends_on context, tree, error
//! @ai:module:stateless true

use crate::context::Context;
use crate::error::{Error, Result};
use crate::tree::{Tree, Value};
use regex::{Captures, Regex};

/// Custom assignment: reads captured fields, may update the context and the tree.
pub type Action = fn(&Fields<'_>, &mut Context, &mut Tree) -> Result<()>;

/// @ai:intent Conversion applied to a captured field before it is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// Text as captured.
    Text,
    /// Text with surrounding whitespace removed.
    Trim,
    /// Decimal integer.
    Int,
    /// yes/true/enabled/up or no/false/disabled/down.
    Bool,
    /// Lowercased text.
    Lower,
    /// Whitespace-separated words as a list.
    Words,
    /// Comma-separated items as a list.
    Csv,
}

impl Transform {
    /// @ai:intent Convert captured text into a tree value
    /// @ai:effects pure
    pub fn apply(self, field: &'static str, text: &str) -> Result<Value> {
        Ok(match self {
            Transform::Text => Value::from(text),
            Transform::Trim => Value::from(text.trim()),
            Transform::Int => Value::Int(parse_int(field, text)?),
            Transform::Bool => Value::Bool(parse_bool(field, text)?),
            Transform::Lower => Value::from(text.to_lowercase()),
            Transform::Words => text.split_whitespace().collect(),
            Transform::Csv => text
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect(),
        })
    }
}

fn parse_int(field: &'static str, text: &str) -> Result<i64> {
    text.trim().parse::<i64>().map_err(|_| Error::InvalidNumber {
        field,
        text: text.to_string(),
    })
}

fn parse_bool(field: &'static str, text: &str) -> Result<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "yes" | "true" | "enabled" | "up" => Ok(true),
        "no" | "false" | "disabled" | "down" => Ok(false),
        _ => Err(Error::InvalidBool {
            field,
            text: text.to_string(),
        }),
    }
}

/// @ai:intent What a rule does with its match
#[derive(Clone, Copy)]
pub enum Assign {
    /// Store the `value` group under `key` in the mapping at cursor `slot`.
    Store {
        slot: &'static str,
        key: &'static str,
        transform: Transform,
    },
    /// Append the `value` group to the list under `key` at cursor `slot`.
    Push {
        slot: &'static str,
        key: &'static str,
        transform: Transform,
    },
    Custom(Action),
}

/// @ai:intent One pattern rule
pub struct Rule {
    pub name: &'static str,
    pub regex: Regex,
    pub assign: Assign,
}

impl Rule {
    /// @ai:intent Rule with a custom action; the pattern only matches at line start
    /// @ai:pre pattern is a valid regex
    pub fn new(name: &'static str, pattern: &str, action: Action) -> Self {
        Self::build(name, pattern, Assign::Custom(action))
    }

    /// @ai:intent Declarative rule storing the `value` capture group at a cursor
    pub fn store(pattern: &str, slot: &'static str, key: &'static str, transform: Transform) -> Self {
        Self::build(
            key,
            pattern,
            Assign::Store {
                slot,
                key,
                transform,
            },
        )
    }

    /// @ai:intent Declarative rule appending the `value` capture group to a list at a cursor
    pub fn push(pattern: &str, slot: &'static str, key: &'static str, transform: Transform) -> Self {
        Self::build(
            key,
            pattern,
            Assign::Push {
                slot,
                key,
                transform,
            },
        )
    }

    fn build(name: &'static str, pattern: &str, assign: Assign) -> Self {
        let regex = Regex::new(&format!("^(?:{})", pattern)).expect("Invalid regex");
        Self {
            name,
            regex,
            assign,
        }
    }

    /// @ai:intent Run the assignment for a matched line
    pub fn apply(&self, fields: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
        match self.assign {
            Assign::Store {
                slot,
                key,
                transform,
            } => {
                let value = transform.apply(key, fields.str("value")?)?;
                tree.set(ctx.cursor(slot)?, key, value);
                Ok(())
            }
            Assign::Push {
                slot,
                key,
                transform,
            } => {
                let value = transform.apply(key, fields.str("value")?)?;
                tree.push(ctx.cursor(slot)?, key, value);
                Ok(())
            }
            Assign::Custom(action) => action(fields, ctx, tree),
        }
    }
}

/// @ai:intent Ordered rules of one command; the first match wins
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// @ai:intent First rule matching the trimmed line, with its captures
    /// @ai:effects pure
    pub fn find<'t>(&self, line: &'t str) -> Option<(&Rule, Captures<'t>)> {
        self.rules
            .iter()
            .find_map(|rule| rule.regex.captures(line).map(|caps| (rule, caps)))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }
}

/// @ai:intent Captured fields of a matched line
pub struct Fields<'t> {
    captures: Captures<'t>,
    raw: &'t str,
    line_number: usize,
}

impl<'t> Fields<'t> {
    /// `raw` is the untrimmed line; `captures` come from matching its trimmed form.
    pub fn new(captures: Captures<'t>, raw: &'t str, line_number: usize) -> Self {
        Self {
            captures,
            raw,
            line_number,
        }
    }

    /// @ai:intent Group text when the group took part in the match (possibly empty)
    pub fn get(&self, name: &str) -> Option<&'t str> {
        self.captures.name(name).map(|m| m.as_str())
    }

    /// @ai:intent Group text when it matched something other than whitespace, trimmed
    pub fn present(&self, name: &str) -> Option<&'t str> {
        self.get(name).map(str::trim).filter(|s| !s.is_empty())
    }

    /// @ai:intent Group text that the pattern guarantees
    pub fn str(&self, name: &'static str) -> Result<&'t str> {
        self.get(name).ok_or(Error::MissingField(name))
    }

    pub fn trimmed(&self, name: &'static str) -> Result<&'t str> {
        self.str(name).map(str::trim)
    }

    pub fn int(&self, name: &'static str) -> Result<i64> {
        parse_int(name, self.str(name)?)
    }

    /// @ai:intent Integer from a group that may be absent
    pub fn opt_int(&self, name: &'static str) -> Result<Option<i64>> {
        self.present(name).map(|text| parse_int(name, text)).transpose()
    }

    pub fn lower(&self, name: &'static str) -> Result<String> {
        self.str(name).map(str::to_lowercase)
    }

    /// The whole trimmed line.
    pub fn line(&self) -> &'t str {
        self.captures
            .get(0)
            .map_or("", |m| m.as_str())
    }

    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// @ai:intent Column of a group in the untrimmed line, used for column-aligned tables
    pub fn column(&self, name: &str) -> Option<usize> {
        let indent = self.raw.len() - self.raw.trim_start().len();
        self.captures.name(name).map(|m| indent + m.start())
    }

    /// @ai:intent Column of an arbitrary word in the untrimmed line
    pub fn column_of(&self, word: &str) -> Option<usize> {
        self.raw.find(word)
    }
}

//! @ai:module:intent Per-call extraction state: cursors into the tree, variables, counters
//! @ai:module:layer domain
//! @ai:module:public_api Context, Params
//! @ai:module:depends_on tree, error

use crate::error::{Error, Result};
use crate::tree::{Path, Value};
use std::collections::{BTreeMap, HashMap};

/// Command parameters, e.g. `instance`, `vrf`, `esi`.
pub type Params = BTreeMap<String, String>;

/// @ai:intent Mutable state carried from one line to the next within one extraction
///
/// Cursors remember where in the tree later lines attach ("current
/// interface", "current level"). Variables hold scalars remembered from
/// earlier lines, counters hand out 1-based indexes.
#[derive(Debug, Clone, Default)]
pub struct Context {
    params: Params,
    cursors: HashMap<&'static str, Path>,
    vars: HashMap<&'static str, Value>,
    counters: HashMap<&'static str, i64>,
}

impl Context {
    pub fn new(params: Params) -> Self {
        Self {
            params,
            ..Default::default()
        }
    }

    /// @ai:intent Command parameter or parser default
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn set_cursor(&mut self, slot: &'static str, path: Path) {
        self.cursors.insert(slot, path);
    }

    /// @ai:intent Current path for a cursor slot
    /// @ai:post Err(MissingContext) when no earlier line established the slot
    pub fn cursor(&self, slot: &'static str) -> Result<&Path> {
        self.cursors.get(slot).ok_or(Error::MissingContext { slot })
    }

    pub fn has_cursor(&self, slot: &'static str) -> bool {
        self.cursors.contains_key(slot)
    }

    pub fn clear_cursor(&mut self, slot: &'static str) {
        self.cursors.remove(slot);
    }

    pub fn set_var(&mut self, name: &'static str, value: impl Into<Value>) {
        self.vars.insert(name, value.into());
    }

    pub fn clear_var(&mut self, name: &'static str) {
        self.vars.remove(name);
    }

    pub fn var(&self, name: &'static str) -> Option<&Value> {
        self.vars.get(name)
    }

    pub fn var_str(&self, name: &'static str) -> Option<&str> {
        self.vars.get(name).and_then(Value::as_str)
    }

    /// @ai:intent String variable that an earlier line must have set
    pub fn require_str(&self, name: &'static str) -> Result<&str> {
        self.var_str(name)
            .ok_or(Error::MissingContext { slot: name })
    }

    pub fn var_int(&self, name: &'static str) -> Option<i64> {
        self.vars.get(name).and_then(Value::as_int)
    }

    /// @ai:intent Boolean variable, false when unset
    pub fn flag(&self, name: &'static str) -> bool {
        matches!(self.vars.get(name), Some(Value::Bool(true)))
    }

    pub fn set_flag(&mut self, name: &'static str, on: bool) {
        self.vars.insert(name, Value::Bool(on));
    }

    /// @ai:intent Next value of a 1-based counter
    pub fn next_index(&mut self, name: &'static str) -> i64 {
        let counter = self.counters.entry(name).or_insert(0);
        *counter += 1;
        *counter
    }

    pub fn reset_counter(&mut self, name: &'static str) {
        self.counters.remove(name);
    }
}

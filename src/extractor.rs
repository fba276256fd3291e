//! @ai:module:intent Line-by-line dispatch of raw command output through an ordered rule set
//! @ai:module:layer application
//! @ai:module:public_api extract, ExtractOptions, RuleErrorPolicy
//! @ai:module:depends_on rule, context, tree, error
//! @ai:module:stateless true

use crate::context::Context;
use crate::error::{Error, Result};
use crate::rule::{Fields, RuleSet};
use crate::tree::Tree;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// @ai:intent What to do when a matched rule cannot assign its fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleErrorPolicy {
    /// Log a warning and continue with the next line.
    #[default]
    Skip,
    /// Abort extraction with [`Error::Rule`].
    Fail,
}

/// @ai:intent Options for one extraction run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractOptions {
    #[serde(default)]
    pub on_rule_error: RuleErrorPolicy,
}

impl ExtractOptions {
    pub fn strict() -> Self {
        Self {
            on_rule_error: RuleErrorPolicy::Fail,
        }
    }
}

/// @ai:intent Build a result tree from raw output
/// @ai:pre ctx is fresh for this call
/// @ai:post unmatched lines leave the tree untouched
/// @ai:effects pure
pub fn extract(output: &str, rules: &RuleSet, mut ctx: Context, options: &ExtractOptions) -> Result<Tree> {
    let mut tree = Tree::new();

    for (idx, raw) in output.lines().enumerate() {
        let line_number = idx + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let Some((rule, captures)) = rules.find(line) else {
            trace!(line_number, line, "no rule matched");
            continue;
        };

        debug!(rule = rule.name, line_number, "matched");
        let fields = Fields::new(captures, raw, line_number);
        if let Err(source) = rule.apply(&fields, &mut ctx, &mut tree) {
            match options.on_rule_error {
                RuleErrorPolicy::Skip => {
                    warn!(rule = rule.name, line_number, error = %source, "skipping line");
                }
                RuleErrorPolicy::Fail => {
                    return Err(Error::Rule {
                        rule: rule.name,
                        line: line_number,
                        source: Box::new(source),
                    });
                }
            }
        }
    }

    Ok(tree)
}

//! @ai:module:intent Per-command parser definitions: command templates, rules and result shape
//! @ai:module:layer application
//! @ai:module:public_api Parser, placeholders
//! @ai:module:depends_on extractor, schema, device, context, error
//! @ai:module:stateless true

use crate::context::{Context, Params};
use crate::device::Device;
use crate::error::{Error, Result};
use crate::extractor::{extract, ExtractOptions};
use crate::rule::RuleSet;
use crate::schema::{self, Shape};
use crate::tree::Tree;
use regex::Regex;
use std::sync::LazyLock;
use tracing::info;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(\w+)\}").expect("Invalid regex"));

/// @ai:intent Declarative definition of one show-command parser
///
/// A parser owns no logic of its own: it is the command it answers to,
/// the ordered rules fed to [`extract`], and the shape the result must
/// have.
pub struct Parser {
    /// Base command, used as the parser's name.
    pub name: &'static str,
    pub description: &'static str,
    /// Command templates with `{param}` placeholders, most specific first.
    pub commands: &'static [&'static str],
    /// Context parameters used when the caller supplies none.
    pub defaults: &'static [(&'static str, &'static str)],
    pub rules: &'static LazyLock<RuleSet>,
    pub shape: &'static LazyLock<Shape>,
}

/// @ai:intent Placeholder names in a command template, in order
/// @ai:effects pure
pub fn placeholders(template: &str) -> impl Iterator<Item = &str> {
    PLACEHOLDER
        .captures_iter(template)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
}

impl Parser {
    /// @ai:intent Command string for the given parameters
    /// @ai:post uses the first template whose placeholders are all supplied
    /// @ai:effects pure
    pub fn render_command(&self, params: &Params) -> Result<String> {
        for template in self.commands {
            if placeholders(template).all(|name| params.contains_key(name)) {
                let rendered = PLACEHOLDER.replace_all(template, |caps: &regex::Captures<'_>| {
                    params.get(&caps[1]).cloned().unwrap_or_default()
                });
                return Ok(rendered.into_owned());
            }
        }

        let missing = self
            .commands
            .last()
            .and_then(|template| placeholders(template).find(|name| !params.contains_key(*name)))
            .unwrap_or_default();
        Err(Error::MissingParameter {
            command: self.name.to_string(),
            parameter: missing.to_string(),
        })
    }

    /// @ai:intent Recognize a typed command line and recover its parameters
    /// @ai:example ("show isis instance core hostname") -> Some({instance: core})
    /// @ai:effects pure
    pub fn match_command(&self, text: &str) -> Option<Params> {
        let words: Vec<&str> = text.split_whitespace().collect();
        let text = words.join(" ");

        for template in self.commands {
            let pattern = template
                .split_whitespace()
                .map(|token| match PLACEHOLDER.captures(token) {
                    Some(caps) if caps[0].len() == token.len() => format!(r"(?P<{}>\S+)", &caps[1]),
                    _ => regex::escape(token),
                })
                .collect::<Vec<_>>()
                .join(" ");
            let Ok(re) = Regex::new(&format!("^{}$", pattern)) else {
                continue;
            };
            if let Some(caps) = re.captures(&text) {
                let params = placeholders(template)
                    .filter_map(|name| caps.name(name).map(|m| (name.to_string(), m.as_str().to_string())))
                    .collect();
                return Some(params);
            }
        }

        None
    }

    /// @ai:intent Fresh extraction context: defaults overlaid by call parameters
    pub fn context(&self, params: &Params) -> Context {
        let mut merged: Params = self
            .defaults
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        merged.extend(params.iter().map(|(k, v)| (k.clone(), v.clone())));
        Context::new(merged)
    }

    /// @ai:intent Extract and validate already captured output
    /// @ai:post Err(EmptyOutput) is raised before any schema check
    pub fn parse_output(&self, output: &str, params: &Params, options: &ExtractOptions) -> Result<Tree> {
        let tree = extract(output, self.rules, self.context(params), options)?;

        if tree.is_empty() {
            return Err(Error::EmptyOutput {
                command: self.name.to_string(),
            });
        }

        schema::check(self.name, &tree, self.shape)?;
        Ok(tree)
    }

    /// @ai:intent Run the command on a device and parse its output
    /// @ai:effects device:execute
    pub fn parse(&self, device: &dyn Device, params: &Params, options: &ExtractOptions) -> Result<Tree> {
        let command = self.render_command(params)?;
        info!(command = %command, "executing");
        let output = device.execute(&command)?;
        self.parse_output(&output, params, options)
    }
}

//! @ai:module:intent Line-oriented extraction of network show-command output into validated trees
//! @ai:module:layer infrastructure
//! @ai:module:public_api tree, rule, context, extractor, schema, parser, parsers, registry, device, batch, config, output, error
//! @ai:module:stateless true
//!
//! # showparse
//!
//! Each supported command is a [`Parser`]: command templates, an ordered
//! list of pattern rules and the declared shape of its result. Output is
//! matched line by line; the first rule whose pattern matches a line
//! writes into the result tree, which is then validated against the shape.
//!
//! ## Example
//!
//! ```rust,no_run
//! use showparse::{registry, ExtractOptions, ReplayDevice};
//!
//! let (parser, params) = registry::resolve("show evpn evi").unwrap();
//! let device = ReplayDevice::new("captures");
//! let tree = parser.parse(&device, &params, &ExtractOptions::default()).unwrap();
//! println!("{}", tree.to_json());
//! ```

pub mod batch;
pub mod config;
pub mod context;
pub mod device;
pub mod error;
pub mod extractor;
pub mod interface;
pub mod output;
pub mod parser;
pub mod parsers;
pub mod registry;
pub mod rule;
pub mod schema;
pub mod tree;

pub use batch::{check_capture, check_directory, BatchResult, CaptureReport, CaptureStatus};
pub use config::Config;
pub use context::{Context, Params};
pub use device::{Device, DeviceError, ReplayDevice, StaticDevice};
pub use error::{Error, Result};
pub use extractor::{extract, ExtractOptions, RuleErrorPolicy};
pub use output::OutputFormat;
pub use parser::Parser;
pub use schema::{validate, Shape, Violation};
pub use tree::{Key, Path, Tree, Value};

//! @ai:module:intent Parser definitions grouped by protocol
//! @ai:module:layer application
//! @ai:module:public_api isis, evpn, l2vpn, static_routing, l2route
//! @ai:module:depends_on parser
//! @ai:module:stateless true

pub mod evpn;
pub mod isis;
pub mod l2route;
pub mod l2vpn;
pub mod static_routing;

use crate::error::Error;

/// @ai:intent Error for a context variable an earlier line should have set
pub(crate) fn missing_var(slot: &'static str) -> Error {
    Error::MissingContext { slot }
}

/// @ai:intent Split `address/length`
/// @ai:example ("10.1.1.0/24") -> ("10.1.1.0", Some("24"))
/// @ai:example ("10.1.1.1") -> ("10.1.1.1", None)
/// @ai:effects pure
pub(crate) fn split_prefix(text: &str) -> (&str, Option<&str>) {
    match text.split_once('/') {
        Some((address, length)) => (address, Some(length)),
        None => (text, None),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::context::Params;
    use crate::extractor::ExtractOptions;
    use crate::parser::Parser;

    /// Parse with no parameters and the default policy, as JSON.
    pub(crate) fn golden(parser: &Parser, output: &str) -> serde_json::Value {
        match parser.parse_output(output, &Params::new(), &ExtractOptions::default()) {
            Ok(tree) => tree.to_json(),
            Err(err) => panic!("{} failed: {}", parser.name, err),
        }
    }

    #[test]
    fn test_split_prefix() {
        assert_eq!(split_prefix("10.1.1.0/24"), ("10.1.1.0", Some("24")));
        assert_eq!(split_prefix("2001:db8::/32"), ("2001:db8::", Some("32")));
        assert_eq!(split_prefix("10.1.1.1"), ("10.1.1.1", None));
    }

    #[test]
    fn test_missing_var() {
        assert!(matches!(missing_var("level"), Error::MissingContext { slot: "level" }));
    }
}

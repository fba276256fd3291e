//! @ai:module:intent Catalog of every shipped parser and lookup by name or typed command
//! @ai:module:layer application
//! @ai:module:public_api parsers, find, resolve, detect_command
//! @ai:module:depends_on parser, parsers
//! @ai:module:stateless true

use crate::context::Params;
use crate::error::{Error, Result};
use crate::parser::Parser;
use crate::parsers::{evpn, isis, l2route, l2vpn, static_routing};
use std::path::Path;

static PARSERS: [&Parser; 25] = [
    &isis::ADJACENCY,
    &isis::NEIGHBORS,
    &isis::SEGMENT_ROUTING_LABEL_TABLE,
    &isis::ISIS,
    &isis::PROTOCOL,
    &isis::HOSTNAME,
    &isis::STATISTICS,
    &isis::SPF_LOG,
    &isis::SPF_LOG_DETAIL,
    &isis::LSP_LOG,
    &isis::INTERFACE,
    &isis::DATABASE_DETAIL,
    &evpn::EVI,
    &evpn::EVI_DETAIL,
    &evpn::EVI_MAC,
    &evpn::EVI_MAC_PRIVATE,
    &evpn::ETHERNET_SEGMENT,
    &evpn::ETHERNET_SEGMENT_DETAIL,
    &evpn::ETHERNET_SEGMENT_PRIVATE,
    &evpn::INTERNAL_LABEL,
    &l2vpn::XCONNECT,
    &l2vpn::XCONNECT_DETAIL,
    &static_routing::TOPOLOGY_DETAIL,
    &l2route::TOPOLOGY,
    &l2route::EVPN_MAC,
];

/// @ai:intent Every parser, in catalog order
pub fn parsers() -> &'static [&'static Parser] {
    &PARSERS
}

/// @ai:intent Parser by its name, ignoring case and repeated spaces
/// @ai:example ("show  ISIS adjacency") -> Some(ADJACENCY)
/// @ai:effects pure
pub fn find(name: &str) -> Option<&'static Parser> {
    let wanted = squash(name).to_lowercase();
    PARSERS.iter().copied().find(|parser| parser.name == wanted)
}

/// @ai:intent Parser and parameters for a full command line as typed on the device
/// @ai:post Err(UnknownCommand) when no template of any parser matches
/// @ai:example ("show evpn evi vpn-id 7 mac") -> (EVI_MAC, {vpn_id: 7})
pub fn resolve(command_line: &str) -> Result<(&'static Parser, Params)> {
    PARSERS
        .iter()
        .find_map(|parser| parser.match_command(command_line).map(|params| (*parser, params)))
        .ok_or_else(|| Error::UnknownCommand(squash(command_line)))
}

/// @ai:intent Work out which command produced a capture
/// @ai:post the echoed prompt line wins over the file name
/// @ai:example ("RP/0/RSP0/CPU0:R1#show evpn evi\n...", _) -> (EVI, {})
/// @ai:example ("...", "show_isis_hostname.txt") -> (HOSTNAME, {})
pub fn detect_command(text: &str, file: &Path) -> Option<(&'static Parser, Params)> {
    let echoed = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(3)
        .find_map(|line| {
            let command = match line.split_once('#') {
                Some((_, command)) => command.trim(),
                None => line,
            };
            command.starts_with("show ").then_some(command)
        });
    if let Some(found) = echoed.and_then(|command| resolve(command).ok()) {
        return Some(found);
    }

    let stem = file.file_stem()?.to_str()?;
    resolve(&stem.replace('_', " ")).ok()
}

fn squash(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

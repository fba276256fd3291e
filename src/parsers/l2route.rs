//! @ai:module:intent L2 route table parsers producing flat entry lists
//! @ai:module:layer application
//! @ai:module:public_api TOPOLOGY, EVPN_MAC
//! @ai:module:depends_on parser, rule, schema, tree

use crate::context::Context;
use crate::error::Result;
use crate::parser::Parser;
use crate::rule::{Fields, Rule, RuleSet};
use crate::schema::{list_of, map, opt, req, Shape};
use crate::tree::{Key, Map, Path, Tree, Value};
use std::sync::LazyLock;

fn topology_row(f: &Fields<'_>, _ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let mut entry = Map::new();
    entry.insert(Key::from("topo_id"), Value::from(f.int("topo_id")?));
    entry.insert(Key::from("name"), Value::from(f.str("name")?));
    if let Some(kind) = f.present("type") {
        entry.insert(Key::from("type"), Value::from(kind));
    }
    tree.push(&Path::root(), "topologies", entry);
    Ok(())
}

fn mac_row(f: &Fields<'_>, _ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let mut entry = Map::new();
    entry.insert(Key::from("topo_id"), Value::from(f.int("topo_id")?));
    entry.insert(Key::from("mac"), Value::from(f.lower("mac")?));
    entry.insert(Key::from("producer"), Value::from(f.str("producer")?));
    if let Some(next_hop) = f.present("next_hop") {
        entry.insert(Key::from("next_hop"), Value::from(next_hop));
    }
    tree.push(&Path::root(), "entries", entry);
    Ok(())
}

static TOPOLOGY_RULES: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new(vec![Rule::new(
        "topology",
        r"(?P<topo_id>\d+)\s+(?P<name>\S+)\s+(?:N/A|(?P<type>\S+))$",
        topology_row,
    )])
});

static TOPOLOGY_SHAPE: LazyLock<Shape> = LazyLock::new(|| {
    map(vec![req(
        "topologies",
        list_of(map(vec![
            req("topo_id", Shape::Int),
            req("name", Shape::Str),
            opt("type", Shape::Str),
        ])),
    )])
});

pub static TOPOLOGY: Parser = Parser {
    name: "show l2route topology",
    description: "L2 route topologies",
    commands: &["show l2route topology"],
    defaults: &[],
    rules: &TOPOLOGY_RULES,
    shape: &TOPOLOGY_SHAPE,
};

static EVPN_MAC_RULES: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new(vec![Rule::new(
        "mac",
        r"(?P<topo_id>\d+)\s+(?P<mac>[\da-fA-F]{4}\.[\da-fA-F]{4}\.[\da-fA-F]{4})\s+(?P<producer>\S+)\s+(?:none|(?P<next_hop>\S+))$",
        mac_row,
    )])
});

static EVPN_MAC_SHAPE: LazyLock<Shape> = LazyLock::new(|| {
    map(vec![req(
        "entries",
        list_of(map(vec![
            req("topo_id", Shape::Int),
            req("mac", Shape::Str),
            req("producer", Shape::Str),
            opt("next_hop", Shape::Str),
        ])),
    )])
});

pub static EVPN_MAC: Parser = Parser {
    name: "show l2route evpn mac all",
    description: "EVPN MAC routes known to the L2 route table",
    commands: &["show l2route evpn mac all"],
    defaults: &[],
    rules: &EVPN_MAC_RULES,
    shape: &EVPN_MAC_SHAPE,
};

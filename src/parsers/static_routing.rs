//! @ai:module:intent Static route topology parser
//! @ai:module:layer application
//! @ai:module:public_api TOPOLOGY_DETAIL
//! @ai:module:depends_on parser, rule, schema, context, tree
//! @ai:module:stateless true

use crate::context::Context;
use crate::error::Result;
use crate::parser::Parser;
use crate::path;
use crate::rule::{Fields, Rule, RuleSet, Transform};
use crate::schema::{keyed, map, opt, Field, Shape};
use crate::tree::Tree;
use std::sync::LazyLock;

/// `None` in a column means the column does not apply to the path.
fn given<'t>(f: &Fields<'t>, name: &str) -> Option<&'t str> {
    f.present(name).filter(|text| !text.eq_ignore_ascii_case("none"))
}

fn vrf_header(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let af = path![
        "vrfs",
        f.str("vrf")?,
        "address_family",
        f.lower("af")?
    ];
    tree.set(&af, "safi", f.lower("safi")?);
    tree.set(&af, "table_id", f.str("table_id")?);
    ctx.set_cursor("af", af);
    ctx.clear_cursor("route");
    Ok(())
}

/// A path row. The prefix is printed on the first path of a route only;
/// paths with a next hop are numbered per route, the others are keyed by
/// their outgoing interface.
fn path_row(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    if let Some(route) = f.present("route") {
        let entry = ctx.cursor("af")?.child("routes").child(route);
        tree.set(&entry, "route", route);
        ctx.set_cursor("route", entry);
        ctx.reset_counter("next_hop");
    }
    let index = ctx.next_index("next_hop");
    if let Some(interface) = given(f, "interface") {
        ctx.set_var("interface", interface);
    }

    let next_hop = ctx.cursor("route")?.child("next_hop");
    let path = match given(f, "next_hop") {
        Some(address) => {
            let path = next_hop.child("next_hop_list").child(index);
            tree.set(&path, "index", index);
            tree.set(&path, "next_hop", address);
            if let Some(interface) = given(f, "interface") {
                tree.set(&path, "outgoing_interface", interface);
            }
            path
        }
        None => {
            let interface = ctx.require_str("interface")?;
            let path = next_hop.child("outgoing_interface").child(interface);
            tree.set(&path, "outgoing_interface", interface);
            path
        }
    };

    tree.set(&path, "metrics", f.str("metrics")?);
    for key in ["object", "explicit_path"] {
        if let Some(value) = given(f, key) {
            tree.set(&path, key, value);
        }
    }
    ctx.set_cursor("path", path);
    Ok(())
}

fn installed(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let path = ctx.cursor("path")?;
    tree.set(path, "active", true);
    tree.set(path, "install_date", f.trimmed("date")?);
    Ok(())
}

fn configured(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let path = ctx.cursor("path")?;
    tree.set(path, "active", false);
    tree.set(path, "configure_date", f.trimmed("date")?);
    Ok(())
}

fn path_version(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let path = ctx.cursor("path")?;
    tree.set(path, "path_version", f.int("version")?);
    tree.set(path, "path_status", f.str("status")?);
    Ok(())
}

static RULES: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new(vec![
        Rule::new(
            "vrf",
            r"VRF:\s+(?P<vrf>\w+)\s+Table\s+Id:\s+(?P<table_id>\w+)\s+AFI:\s+(?P<af>\w+)\s+SAFI:\s+(?P<safi>\w+)$",
            vrf_header,
        ),
        Rule::new(
            "path",
            r"(?:(?P<route>[\da-fA-F:.]+/\d+)\s+)?(?P<interface>[a-zA-Z][\w/.]+)\s+(?P<next_hop>[\w/.:]+)\s+(?P<object>\w+)\s+(?P<explicit_path>\w+)\s+(?P<metrics>[\w/\[\]]+)$",
            path_row,
        ),
        Rule::new(
            "installed",
            r"Path\s+is\s+installed\s+into\s+RIB\s+at\s+(?P<date>[\w\s:.]+)$",
            installed,
        ),
        Rule::new("configured", r"Path\s+is\s+configured\s+at\s+(?P<date>[\w\s:.]+)$", configured),
        Rule::new(
            "path_version",
            r"Path\s+version:\s+(?P<version>\d+),\s+Path\s+status:\s+(?P<status>\w+)$",
            path_version,
        ),
        Rule::store(r"Path\s+has\s+best\s+tag:\s+(?P<value>\d+)$", "path", "tag", Transform::Int),
    ])
});

fn path_fields() -> Vec<Field> {
    vec![
        opt("outgoing_interface", Shape::Str),
        opt("active", Shape::Bool),
        opt("install_date", Shape::Str),
        opt("configure_date", Shape::Str),
        opt("tag", Shape::Int),
        opt("path_version", Shape::Int),
        opt("path_status", Shape::Str),
        opt("metrics", Shape::Str),
        opt("object", Shape::Str),
        opt("explicit_path", Shape::Str),
    ]
}

static SHAPE: LazyLock<Shape> = LazyLock::new(|| {
    let mut listed = path_fields();
    listed.extend([opt("index", Shape::Int), opt("next_hop", Shape::Str)]);

    let route = map(vec![
        opt("route", Shape::Str),
        opt(
            "next_hop",
            map(vec![
                opt("outgoing_interface", keyed(map(path_fields()))),
                opt("next_hop_list", keyed(map(listed))),
            ]),
        ),
    ]);
    let af = map(vec![
        opt("table_id", Shape::Str),
        opt("safi", Shape::Str),
        opt("routes", keyed(route)),
    ]);
    map(vec![opt(
        "vrfs",
        keyed(map(vec![opt("address_family", keyed(af))])),
    )])
});

pub static TOPOLOGY_DETAIL: Parser = Parser {
    name: "show static topology detail",
    description: "Static routes per VRF and address family with their paths",
    commands: &[
        "show static vrf {vrf} {af} topology detail",
        "show static vrf {vrf} topology detail",
        "show static {af} topology detail",
        "show static topology detail",
    ],
    defaults: &[],
    rules: &RULES,
    shape: &SHAPE,
};

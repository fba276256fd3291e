//! @ai:module:intent IS-IS show-command parsers
//! @ai:module:layer application
//! @ai:module:public_api ADJACENCY, NEIGHBORS, SEGMENT_ROUTING_LABEL_TABLE, ISIS, PROTOCOL, HOSTNAME, STATISTICS, SPF_LOG, SPF_LOG_DETAIL, LSP_LOG, INTERFACE, DATABASE_DETAIL
//! @ai:module:depends_on parser, rule, schema, context, tree, interface
//! @ai:module:stateless true

use super::{missing_var, split_prefix};
use crate::context::Context;
use crate::error::{Error, Result};
use crate::interface::normalize;
use crate::parser::Parser;
use crate::path;
use crate::rule::{Fields, Rule, RuleSet, Transform};
use crate::schema::{keyed, map, opt, req, Field, Shape};
use crate::tree::{Path, Tree};
use std::sync::LazyLock;

// ---------------------------------------------------------------------------
// show isis adjacency
// ---------------------------------------------------------------------------

fn adjacency_level(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let level = path![
        "isis",
        f.str("name")?,
        "vrf",
        ctx.param("vrf").unwrap_or("default"),
        "level",
        f.str("level")?
    ];
    tree.touch(&level);
    ctx.set_cursor("level", level);
    Ok(())
}

/// One adjacency row, keyed by the interface as printed; the stored
/// `interface` field carries the canonical name.
fn adjacency_row(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let interface = f.str("interface")?;
    let system = ctx
        .cursor("level")?
        .child("interfaces")
        .child(interface)
        .child("system_id")
        .child(f.str("system_id")?);

    tree.set(&system, "interface", normalize(interface));
    for key in ["snpa", "state", "hold", "changed", "nsf"] {
        tree.set(&system, key, f.str(key)?);
    }
    for key in ["bfd", "ipv4_bfd", "ipv6_bfd"] {
        if let Some(bfd) = f.present(key) {
            tree.set(&system, key, bfd);
        }
    }
    Ok(())
}

static ADJACENCY_RULES: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new(vec![
        Rule::new(
            "adjacency_level",
            r"IS-IS +(?P<name>\w+) +(?P<level>\S+) adjacencies:$",
            adjacency_level,
        ),
        Rule::new(
            "adjacency",
            r"(?P<system_id>\S+) +(?P<interface>\S+) +(?P<snpa>\S+) +(?P<state>Up|Down|None) +(?P<hold>\S+) +(?P<changed>\S+) +(?P<nsf>\S+) +(?P<bfd>Up|Down|None|Init)$",
            adjacency_row,
        ),
        Rule::store(
            r"Total +adjacency +count: +(?P<value>\d+)$",
            "level",
            "total_adjacency_count",
            Transform::Int,
        ),
        Rule::new(
            "adjacency_dual_bfd",
            r"(?P<system_id>\S+) +(?P<interface>\S+) +(?P<snpa>\S+) +(?P<state>Up|Down|None) +(?P<hold>\S+) +(?P<changed>\S+) +(?P<nsf>\S+) +(?P<ipv4_bfd>\S+) +(?P<ipv6_bfd>\S+)$",
            adjacency_row,
        ),
    ])
});

static ADJACENCY_SHAPE: LazyLock<Shape> = LazyLock::new(|| {
    let system = map(vec![
        req("interface", Shape::Str),
        req("snpa", Shape::Str),
        req("state", Shape::Str),
        req("hold", Shape::Str),
        req("changed", Shape::Str),
        opt("nsf", Shape::Str),
        opt("bfd", Shape::Str),
        opt("ipv4_bfd", Shape::Str),
        opt("ipv6_bfd", Shape::Str),
    ]);
    let level = map(vec![
        opt("total_adjacency_count", Shape::Int),
        opt("interfaces", keyed(map(vec![req("system_id", keyed(system))]))),
    ]);
    map(vec![req(
        "isis",
        keyed(map(vec![req("vrf", keyed(map(vec![req("level", keyed(level))])))])),
    )])
});

pub static ADJACENCY: Parser = Parser {
    name: "show isis adjacency",
    description: "IS-IS adjacencies per level with BFD state",
    commands: &["show isis adjacency"],
    defaults: &[("vrf", "default")],
    rules: &ADJACENCY_RULES,
    shape: &ADJACENCY_SHAPE,
};

// ---------------------------------------------------------------------------
// show isis neighbors
// ---------------------------------------------------------------------------

fn neighbors_instance(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let vrf = path!["isis", f.str("name")?, "vrf", ctx.param("vrf").unwrap_or("default")];
    tree.touch(&vrf);
    ctx.set_cursor("vrf", vrf);
    Ok(())
}

fn neighbor_row(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let neighbor = ctx
        .cursor("vrf")?
        .child("interfaces")
        .child(normalize(f.str("interface")?))
        .child("neighbors")
        .child(f.str("system_id")?);
    for key in ["snpa", "state", "holdtime", "type", "ietf_nsf"] {
        tree.set(&neighbor, key, f.str(key)?);
    }
    Ok(())
}

static NEIGHBORS_RULES: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new(vec![
        Rule::new("neighbors_instance", r"IS-IS\s+(?P<name>\S+)\s*neighbors:$", neighbors_instance),
        Rule::new(
            "neighbor",
            r"(?P<system_id>\S+) +(?P<interface>\S+) +(?P<snpa>\S+) +(?P<state>(?:Up|Down|None)+) +(?P<holdtime>\S+) +(?P<type>\S+) +(?P<ietf_nsf>\S+)$",
            neighbor_row,
        ),
        Rule::store(
            r"Total\s+neighbor\s+count:\s+(?P<value>\d+)$",
            "vrf",
            "total_neighbor_count",
            Transform::Int,
        ),
    ])
});

static NEIGHBORS_SHAPE: LazyLock<Shape> = LazyLock::new(|| {
    let neighbor = map(vec![
        req("snpa", Shape::Str),
        req("state", Shape::Str),
        req("holdtime", Shape::Str),
        req("type", Shape::Str),
        opt("ietf_nsf", Shape::Str),
    ]);
    let vrf = map(vec![
        opt("total_neighbor_count", Shape::Int),
        opt("interfaces", keyed(map(vec![req("neighbors", keyed(neighbor))]))),
    ]);
    map(vec![req("isis", keyed(map(vec![req("vrf", keyed(vrf))])))])
});

pub static NEIGHBORS: Parser = Parser {
    name: "show isis neighbors",
    description: "IS-IS neighbors per interface",
    commands: &["show isis neighbors"],
    defaults: &[("vrf", "default")],
    rules: &NEIGHBORS_RULES,
    shape: &NEIGHBORS_SHAPE,
};

// ---------------------------------------------------------------------------
// show isis segment-routing label table
// ---------------------------------------------------------------------------

fn label_table_instance(f: &Fields<'_>, ctx: &mut Context, _tree: &mut Tree) -> Result<()> {
    ctx.set_cursor("instance", path!["instance", f.str("instance")?]);
    Ok(())
}

fn label_row(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let label = ctx.cursor("instance")?.child("label").child(f.int("label")?);
    tree.set(&label, "prefix_interface", f.str("prefix_interface")?);
    Ok(())
}

static LABEL_TABLE_RULES: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new(vec![
        Rule::new(
            "label_table_instance",
            r"IS-IS\s+(?P<instance>\S+)\s+IS\s+Label\s+Table$",
            label_table_instance,
        ),
        Rule::new("label", r"(?P<label>\d+)\s+(?P<prefix_interface>\S+)$", label_row),
    ])
});

static LABEL_TABLE_SHAPE: LazyLock<Shape> = LazyLock::new(|| {
    map(vec![req(
        "instance",
        keyed(map(vec![req(
            "label",
            keyed(map(vec![req("prefix_interface", Shape::Str)])),
        )])),
    )])
});

pub static SEGMENT_ROUTING_LABEL_TABLE: Parser = Parser {
    name: "show isis segment-routing label table",
    description: "Segment-routing labels allocated by IS-IS",
    commands: &["show isis segment-routing label table"],
    defaults: &[],
    rules: &LABEL_TABLE_RULES,
    shape: &LABEL_TABLE_SHAPE,
};

// ---------------------------------------------------------------------------
// show isis / show isis protocol
// ---------------------------------------------------------------------------

fn isis_router(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let router = f.str("router")?;
    let instance = path!["instance", router];
    tree.set(&instance, "process_id", router);
    ctx.set_cursor("instance", instance);
    Ok(())
}

/// `Instance Id` closes the header: the VRF and system id seen so far are
/// written once the VRF mapping is known.
fn isis_instance_id(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let instance = ctx.cursor("instance")?.clone();
    tree.set(&instance, "instance", f.str("id")?);

    let vrf = instance
        .child("vrf")
        .child(ctx.var_str("vrf").unwrap_or("default"));
    if let Some(system_id) = ctx.var_str("system_id") {
        tree.set(&vrf, "system_id", system_id);
    }
    ctx.set_cursor("vrf", vrf);
    ctx.clear_var("vrf");
    Ok(())
}

fn isis_vrf_context(f: &Fields<'_>, ctx: &mut Context, _tree: &mut Tree) -> Result<()> {
    ctx.set_var("vrf", f.trimmed("vrf")?);
    Ok(())
}

fn isis_system_id(f: &Fields<'_>, ctx: &mut Context, _tree: &mut Tree) -> Result<()> {
    ctx.set_var("system_id", f.str("system_id")?);
    Ok(())
}

fn manual_area_header(_: &Fields<'_>, ctx: &mut Context, _tree: &mut Tree) -> Result<()> {
    ctx.set_var("area_field", "manual_area_address");
    Ok(())
}

fn routing_area_header(_: &Fields<'_>, ctx: &mut Context, _tree: &mut Tree) -> Result<()> {
    ctx.set_var("area_field", "routing_area_address");
    Ok(())
}

fn area_address(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let field = ctx.require_str("area_field")?;
    tree.push(ctx.cursor("vrf")?, field, f.str("area")?);
    Ok(())
}

fn topologies_header(_: &Fields<'_>, ctx: &mut Context, _tree: &mut Tree) -> Result<()> {
    let topology = ctx.cursor("vrf")?.child("topology");
    ctx.set_cursor("topology", topology);
    Ok(())
}

fn no_topologies(_: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    tree.remove(ctx.cursor("vrf")?, "topology");
    ctx.clear_cursor("topology");
    Ok(())
}

fn isis_topology(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let af = ctx
        .cursor("topology")?
        .child(f.str("topology")?)
        .child("vrf")
        .child(f.present("topology_vrf").unwrap_or("default"));
    tree.touch(&af);
    ctx.set_cursor("af", af);
    Ok(())
}

fn isis_topology_level(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let level = ctx.cursor("af")?.child("level").child(f.int("level")?);
    tree.touch(&level);
    ctx.set_cursor("level", level);
    Ok(())
}

fn metric_style(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let level = ctx.cursor("level")?;
    tree.set(level, "generate_style", f.str("generate")?);
    tree.set(level, "accept_style", f.str("accept")?);
    Ok(())
}

fn no_redistribution(_: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    tree.set(ctx.cursor("af")?, "protocols_redistributed", false);
    Ok(())
}

fn redistributed_protocol(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let af = ctx.cursor("af")?;
    tree.push(af, "redistributing", f.line());
    tree.set(af, "protocols_redistributed", true);
    Ok(())
}

fn adv_passive_only(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    tree.set(ctx.cursor("af")?, "adv_passive_only", f.str("value")? != "No");
    Ok(())
}

fn label_block(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let block = ctx.cursor("vrf")?.child(f.lower("block")?);
    tree.set(&block, "start", f.int("start")?);
    tree.set(&block, "end", f.int("end")?);
    Ok(())
}

fn isis_interface_state(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let interface = ctx.cursor("vrf")?.child("interfaces").child(f.str("interface")?);
    tree.set(&interface, "running_state", f.trimmed("running")?);
    tree.set(&interface, "configuration_state", f.trimmed("configuration")?);
    Ok(())
}

static ISIS_RULES: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new(vec![
        Rule::new("isis_router", r"IS-IS\s+Router\s*:\s*(?P<router>\S+)", isis_router),
        Rule::new("vrf_context", r"VRF\s+context\s*:\s*(?P<vrf>.+)$", isis_vrf_context),
        Rule::new("system_id", r"System\s+Id\s*:\s*(?P<system_id>\S+)", isis_system_id),
        Rule::new("instance_id", r"Instance\s+Id\s*:\s*(?P<id>\S+)", isis_instance_id),
        Rule::store(
            r"IS\s+Levels\s*:\s*(?P<value>level-1-2|level-[12]-only)",
            "vrf",
            "is_levels",
            Transform::Text,
        ),
        Rule::new("manual_area", r"Manual\s+area\s+address\(es\):", manual_area_header),
        Rule::new("routing_area", r"Routing\s+for\s+area\s+address\(es\):", routing_area_header),
        Rule::new("area_address", r"(?P<area>\d+\.\d+)$", area_address),
        Rule::store(
            r"Non-stop\s+forwarding\s*:\s*(?P<value>\w+)",
            "vrf",
            "non_stop_forwarding",
            Transform::Text,
        ),
        Rule::store(
            r"Most\s+recent\s+startup\s+mode\s*:\s*(?P<value>.+)$",
            "vrf",
            "most_recent_startup_mode",
            Transform::Trim,
        ),
        Rule::store(
            r"TE\s+connection\s+status\s*:\s*(?P<value>.+)$",
            "vrf",
            "te_connection_status",
            Transform::Trim,
        ),
        Rule::new("topologies", r"Topologies\s+supported\s+by\s+IS-IS:", topologies_header),
        Rule::new("no_topologies", r"none$", no_topologies),
        Rule::new(
            "topology",
            r"(?P<topology>(?:IPv6|IPv4)\s+Unicast)(?:\s*VRF\s*(?P<topology_vrf>\S+))?",
            isis_topology,
        ),
        Rule::new("topology_level", r"Level-(?P<level>\d+)$", isis_topology_level),
        Rule::new(
            "metric_style",
            r"Metric\s+style\s*\(generate/accept\)\s*:\s*(?P<generate>\w+)/(?P<accept>\w+)",
            metric_style,
        ),
        Rule::store(r"Metric\s*:\s*(?P<value>\d+)", "level", "metric", Transform::Int),
        Rule::store(r"ISPF\s+status\s*:\s*(?P<value>\w+)", "level", "ispf_status", Transform::Text),
        Rule::new("no_redistribution", r"No\s+protocols\s+redistributed", no_redistribution),
        Rule::store(r"Distance\s*:\s*(?P<value>\d+)", "af", "distance", Transform::Int),
        Rule::new(
            "adv_passive_only",
            r"Advertise\s+Passive\s+Interface\s+Prefixes\s+Only\s*:\s*(?P<value>\S+)",
            adv_passive_only,
        ),
        Rule::new(
            "label_block",
            r"(?P<block>SRLB|SRGB)\s+allocated\s*:\s*(?P<start>\d+)\s*-\s*(?P<end>\d+)",
            label_block,
        ),
        Rule::new(
            "interface_state",
            r"(?P<interface>\S+)\s+is\s+(?P<running>[\s\w]+?)\s+\((?P<configuration>[\w\s]+)\)",
            isis_interface_state,
        ),
        Rule::new(
            "redistributed",
            r"(?:\S+ process +\d+|Connected|Static)$",
            redistributed_protocol,
        ),
    ])
});

static ISIS_SHAPE: LazyLock<Shape> = LazyLock::new(|| {
    let block = || map(vec![req("start", Shape::Int), req("end", Shape::Int)]);
    let level = map(vec![
        opt("generate_style", Shape::Str),
        opt("accept_style", Shape::Str),
        req("metric", Shape::Int),
        opt("ispf_status", Shape::Str),
    ]);
    let topology_vrf = map(vec![
        req("distance", Shape::Int),
        req("adv_passive_only", Shape::Bool),
        req("protocols_redistributed", Shape::Bool),
        req("level", keyed(level)),
        opt("redistributing", Shape::List),
    ]);
    let vrf = map(vec![
        req("system_id", Shape::Str),
        req("is_levels", Shape::Str),
        opt("manual_area_address", Shape::List),
        opt("routing_area_address", Shape::List),
        req("non_stop_forwarding", Shape::Str),
        req("most_recent_startup_mode", Shape::Str),
        req("te_connection_status", Shape::Str),
        opt("srlb", block()),
        opt("srgb", block()),
        opt(
            "interfaces",
            keyed(map(vec![
                req("running_state", Shape::Str),
                req("configuration_state", Shape::Str),
            ])),
        ),
        opt("topology", keyed(map(vec![req("vrf", keyed(topology_vrf))]))),
    ]);
    map(vec![req(
        "instance",
        keyed(map(vec![
            req("process_id", Shape::Str),
            req("instance", Shape::Str),
            req("vrf", keyed(vrf)),
        ])),
    )])
});

pub static ISIS: Parser = Parser {
    name: "show isis",
    description: "IS-IS process summary: areas, topologies, label blocks, interfaces",
    commands: &["show isis"],
    defaults: &[],
    rules: &ISIS_RULES,
    shape: &ISIS_SHAPE,
};

pub static PROTOCOL: Parser = Parser {
    name: "show isis protocol",
    description: "Same report as `show isis`",
    commands: &["show isis protocol"],
    defaults: &[],
    rules: &ISIS_RULES,
    shape: &ISIS_SHAPE,
};

// ---------------------------------------------------------------------------
// show isis hostname
// ---------------------------------------------------------------------------

fn hostname_instance(f: &Fields<'_>, ctx: &mut Context, _tree: &mut Tree) -> Result<()> {
    let vrf = path!["isis", f.trimmed("isis")?, "vrf", ctx.param("vrf").unwrap_or("default")];
    ctx.set_cursor("vrf", vrf);
    Ok(())
}

/// A row listed under `1,2` is recorded once per level.
fn hostname_row(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let vrf = ctx.cursor("vrf")?;
    let local = f.present("local_router").is_some();

    for level in f.str("level")?.split(',').filter(|l| !l.is_empty()) {
        let level: i64 = level.parse().map_err(|_| Error::InvalidNumber {
            field: "level",
            text: level.to_string(),
        })?;
        let system = vrf
            .child("level")
            .child(level)
            .child("system_id")
            .child(f.str("system_id")?);
        tree.set(&system, "dynamic_hostname", f.str("dynamic_hostname")?);
        if local {
            tree.set(&system, "local_router", true);
        }
    }
    Ok(())
}

static HOSTNAME_RULES: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new(vec![
        Rule::new("hostname_instance", r"IS-IS\s(?P<isis>.+)\s+hostnames", hostname_instance),
        Rule::new(
            "hostname",
            r"(?P<level>[\d,]+)\s+(?:(?P<local_router>\*)\s+)?(?P<system_id>\S+)\s+(?P<dynamic_hostname>\S+)",
            hostname_row,
        ),
    ])
});

static HOSTNAME_SHAPE: LazyLock<Shape> = LazyLock::new(|| {
    let system = map(vec![
        req("dynamic_hostname", Shape::Str),
        opt("local_router", Shape::Bool),
    ]);
    map(vec![req(
        "isis",
        keyed(map(vec![req(
            "vrf",
            keyed(map(vec![req(
                "level",
                keyed(map(vec![req("system_id", keyed(system))])),
            )])),
        )])),
    )])
});

pub static HOSTNAME: Parser = Parser {
    name: "show isis hostname",
    description: "Dynamic hostnames learned per level",
    commands: &["show isis instance {instance} hostname", "show isis hostname"],
    defaults: &[("vrf", "default")],
    rules: &HOSTNAME_RULES,
    shape: &HOSTNAME_SHAPE,
};

// ---------------------------------------------------------------------------
// show isis statistics
// ---------------------------------------------------------------------------

fn statistics_instance(f: &Fields<'_>, ctx: &mut Context, _tree: &mut Tree) -> Result<()> {
    let isis = path!["isis", f.trimmed("isis")?];
    for slot in ["csnp_cache", "lsp", "snp", "upd"] {
        ctx.set_cursor(slot, isis.child(slot));
    }
    ctx.set_cursor("isis", isis);
    Ok(())
}

fn snp_cache(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let cache = ctx
        .cursor("isis")?
        .child(format!("{}_cache", f.lower("kind")?));
    tree.set(&cache, "hits", f.int("hits")?);
    tree.set(&cache, "tries", f.int("tries")?);
    Ok(())
}

fn timing_header(f: &Fields<'_>, ctx: &mut Context, _tree: &mut Tree) -> Result<()> {
    let kind = f.str("kind")?;
    let timing = ctx.cursor("isis")?.child(format!("{}_time", kind));
    ctx.set_cursor("timing", timing);
    ctx.set_var("timing_kind", kind);
    Ok(())
}

fn packet_timing(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let kind = ctx.require_str("timing_kind")?;
    let packet = ctx.cursor("timing")?.child(f.lower("packet")?);
    tree.set(&packet, "rate_per_sec", f.int("rate")?);
    tree.set(&packet, format!("average_{}_time_sec", kind), f.int("sec")?);
    tree.set(&packet, format!("average_{}_time_nsec", kind), f.int("nsec")?);
    Ok(())
}

fn statistics_level(f: &Fields<'_>, ctx: &mut Context, _tree: &mut Tree) -> Result<()> {
    let level = ctx.cursor("isis")?.child("level").child(f.int("level")?);
    ctx.set_cursor("level", level);
    Ok(())
}

fn lsps_sourced(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let lsp = ctx.cursor("level")?.child("lsp");
    tree.set(&lsp, "new", f.int("new")?);
    tree.set(&lsp, "refresh", f.int("refresh")?);
    Ok(())
}

fn statistics_af(f: &Fields<'_>, ctx: &mut Context, _tree: &mut Tree) -> Result<()> {
    let af = ctx.cursor("level")?.child("address_family").child(f.str("af")?);
    ctx.set_cursor("af", af);
    Ok(())
}

fn statistics_interface(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let interface = ctx.cursor("isis")?.child("interface").child(f.str("interface")?);
    tree.touch(&interface);
    ctx.set_cursor("interface", interface);
    Ok(())
}

fn interface_level(f: &Fields<'_>, ctx: &Context) -> Result<Path> {
    Ok(ctx.cursor("interface")?.child("level").child(f.int("level")?))
}

fn sent_received(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let key = match f.str("kind")? {
        "LSPs" => "lsps_sourced",
        "CSNPs" => "csnp",
        "PSNPs" => "psnp",
        _ => "hello",
    };
    let counters = interface_level(f, ctx)?.child(key);
    tree.set(&counters, "sent", f.int("sent")?);
    tree.set(&counters, "received", f.int("received")?);
    Ok(())
}

fn flooding_duplicates(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let lsps = interface_level(f, ctx)?.child("lsps_sourced");
    tree.set(&lsps, "flooding_duplicates", f.int("value")?);
    Ok(())
}

fn arrival_time_throttled(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let lsps = interface_level(f, ctx)?.child("lsps_sourced");
    tree.set(&lsps, "arrival_time_throttled", f.int("value")?);
    Ok(())
}

fn dr_elections(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let dr = interface_level(f, ctx)?.child("dr");
    tree.set(&dr, "elections", f.int("value")?);
    Ok(())
}

static STATISTICS_RULES: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new(vec![
        Rule::new("statistics_instance", r"IS-IS\s+(?P<isis>.+)\s+statistics:", statistics_instance),
        Rule::new(
            "snp_cache",
            r"Fast\s+(?P<kind>PSNP|CSNP)\s+cache\s*\(hits/tries\):\s*(?P<hits>\d+)/(?P<tries>\d+)",
            snp_cache,
        ),
        Rule::store(
            r"Fast\s+CSNP\s+cache\s+updates\s*:\s*(?P<value>\d+)",
            "csnp_cache",
            "updates",
            Transform::Int,
        ),
        Rule::store(
            r"LSP\s+checksum\s+errors\s+received\s*:\s*(?P<value>\d+)",
            "lsp",
            "checksum_errors_received",
            Transform::Int,
        ),
        Rule::store(r"LSP\s+Dropped\s*:\s*(?P<value>\d+)", "lsp", "dropped", Transform::Int),
        Rule::store(r"SNP\s+Dropped\s*:\s*(?P<value>\d+)", "snp", "dropped", Transform::Int),
        Rule::store(
            r"UPD\s+Max\s+Queue\s+size\s*:\s*(?P<value>\d+)",
            "upd",
            "max_queue_size",
            Transform::Int,
        ),
        Rule::store(r"UPD\s+Queue\s+size\s*:\s*(?P<value>\d+)", "upd", "queue_size", Transform::Int),
        Rule::new(
            "timing_header",
            r"Average\s+(?P<kind>transmit|process)\s+times\s+and\s+rate\s*:",
            timing_header,
        ),
        Rule::new(
            "packet_timing",
            r"(?P<packet>Hello|CSNP|PSNP|LSP)\s*:\s+(?P<sec>\d+)\s*\w+,\s+(?P<nsec>\d+)\s*\w+,\s+(?P<rate>\d+)/\w+",
            packet_timing,
        ),
        Rule::new("statistics_level", r"Level-(?P<level>\d+):", statistics_level),
        Rule::new(
            "lsps_sourced",
            r"LSPs\s+sourced\s*\(new/refresh\)\s*:\s*(?P<new>\d+)/(?P<refresh>\d+)",
            lsps_sourced,
        ),
        Rule::new("statistics_af", r"(?P<af>(?:IPv4|IPv6) Unicast)", statistics_af),
        Rule::store(
            r"Total\s+SPF\s+calculations\s*:\s*(?P<value>\d+)",
            "af",
            "total_spf_calculation",
            Transform::Int,
        ),
        Rule::store(
            r"Full\s+SPF\s+calculations\s*:\s*(?P<value>\d+)",
            "af",
            "full_spf_calculation",
            Transform::Int,
        ),
        Rule::store(
            r"ISPF\s+calculations\s*:\s*(?P<value>\d+)",
            "af",
            "ispf_calculation",
            Transform::Int,
        ),
        Rule::store(
            r"Next\s+Hop\s+Calculations\s*:\s*(?P<value>\d+)",
            "af",
            "next_hop_calculation",
            Transform::Int,
        ),
        Rule::store(
            r"Partial\s+Route\s+Calculations\s*:\s*(?P<value>\d+)",
            "af",
            "partial_route_calculation",
            Transform::Int,
        ),
        Rule::store(
            r"Periodic\s+SPF\s+calculations\s*:\s*(?P<value>\d+)",
            "af",
            "periodic_spf_calculation",
            Transform::Int,
        ),
        Rule::new("statistics_interface", r"Interface\s+(?P<interface>\S+):", statistics_interface),
        Rule::new(
            "sent_received",
            r"Level-(?P<level>\d+)\s+(?P<kind>LSPs|CSNPs|PSNPs|Hellos)\s+\(sent/rcvd\)\s*:\s*(?P<sent>\d+)/(?P<received>\d+)",
            sent_received,
        ),
        Rule::new(
            "flooding_duplicates",
            r"Level-(?P<level>\d+)\s+LSP\s+Flooding\s+Duplicates\s*:\s*(?P<value>\d+)",
            flooding_duplicates,
        ),
        Rule::new(
            "arrival_time_throttled",
            r"Level-(?P<level>\d+)\s+LSPs\s+Arrival\s+Time\s+Throttled\s*:\s*(?P<value>\d+)",
            arrival_time_throttled,
        ),
        Rule::new(
            "dr_elections",
            r"Level-(?P<level>\d+)\s+DR\s+Elections\s*:\s*(?P<value>\d+)",
            dr_elections,
        ),
    ])
});

fn timing_shape(kind: &str) -> Shape {
    let (sec, nsec) = match kind {
        "transmit" => ("average_transmit_time_sec", "average_transmit_time_nsec"),
        _ => ("average_process_time_sec", "average_process_time_nsec"),
    };
    let packet = || {
        map(vec![
            req("rate_per_sec", Shape::Int),
            req(sec, Shape::Int),
            req(nsec, Shape::Int),
        ])
    };
    map(vec![
        req("hello", packet()),
        req("csnp", packet()),
        req("psnp", packet()),
        req("lsp", packet()),
    ])
}

static STATISTICS_SHAPE: LazyLock<Shape> = LazyLock::new(|| {
    let sent_received = || map(vec![req("sent", Shape::Int), req("received", Shape::Int)]);
    let spf = map(vec![
        req("total_spf_calculation", Shape::Int),
        req("full_spf_calculation", Shape::Int),
        req("ispf_calculation", Shape::Int),
        req("next_hop_calculation", Shape::Int),
        req("partial_route_calculation", Shape::Int),
        req("periodic_spf_calculation", Shape::Int),
    ]);
    let level = map(vec![
        req("lsp", map(vec![req("new", Shape::Int), req("refresh", Shape::Int)])),
        req("address_family", keyed(spf)),
    ]);
    let interface_level = map(vec![
        opt(
            "lsps_sourced",
            map(vec![
                req("sent", Shape::Int),
                req("received", Shape::Int),
                req("arrival_time_throttled", Shape::Int),
                req("flooding_duplicates", Shape::Int),
            ]),
        ),
        opt("csnp", sent_received()),
        opt("psnp", sent_received()),
        opt("dr", map(vec![req("elections", Shape::Int)])),
        opt("hello", sent_received()),
    ]);
    let isis = map(vec![
        req("psnp_cache", map(vec![req("hits", Shape::Int), req("tries", Shape::Int)])),
        req(
            "csnp_cache",
            map(vec![
                req("hits", Shape::Int),
                req("tries", Shape::Int),
                req("updates", Shape::Int),
            ]),
        ),
        req(
            "lsp",
            map(vec![
                req("checksum_errors_received", Shape::Int),
                req("dropped", Shape::Int),
            ]),
        ),
        req(
            "upd",
            map(vec![req("max_queue_size", Shape::Int), req("queue_size", Shape::Int)]),
        ),
        req("snp", map(vec![req("dropped", Shape::Int)])),
        req("transmit_time", timing_shape("transmit")),
        req("process_time", timing_shape("process")),
        req("level", keyed(level)),
        req("interface", keyed(map(vec![opt("level", keyed(interface_level))]))),
    ]);
    map(vec![req("isis", keyed(isis))])
});

pub static STATISTICS: Parser = Parser {
    name: "show isis statistics",
    description: "IS-IS packet, SPF and per-interface counters",
    commands: &["show isis statistics"],
    defaults: &[],
    rules: &STATISTICS_RULES,
    shape: &STATISTICS_SHAPE,
};

// ---------------------------------------------------------------------------
// show isis spf-log / show isis spf-log detail
// ---------------------------------------------------------------------------

fn route_calculation_log(f: &Fields<'_>, ctx: &mut Context, _tree: &mut Tree) -> Result<()> {
    let af = path![
        "instance",
        f.str("instance")?,
        "address_family",
        f.trimmed("af")?
    ];
    ctx.set_cursor("af", af);
    ctx.set_var("level", f.int("level")?);
    Ok(())
}

fn log_date(f: &Fields<'_>, ctx: &mut Context, _tree: &mut Tree) -> Result<()> {
    ctx.set_var("date", f.trimmed("date")?);
    Ok(())
}

fn start_timestamp(ctx: &Context, time: &str) -> String {
    format!("{} {}", ctx.var_str("date").unwrap_or(""), time)
        .trim()
        .to_string()
}

/// Log rows are numbered across every address family of the output.
fn spf_log_row(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let level = ctx.var_int("level").ok_or_else(|| missing_var("level"))?;
    let index = ctx.next_index("spf_log");
    let entry = ctx.cursor("af")?.child("spf_log").child(index);

    tree.set(&entry, "start_timestamp", start_timestamp(ctx, f.str("timestamp")?));
    tree.set(&entry, "level", level);
    tree.set(&entry, "type", f.str("type")?);
    tree.set(&entry, "time_ms", f.int("time_ms")?);
    tree.set(&entry, "total_nodes", f.int("total_nodes")?);
    tree.set(&entry, "trigger_count", f.int("trigger_count")?);
    if let Some(lsp) = f.present("first_trigger_lsp") {
        tree.set(&entry, "first_trigger_lsp", lsp);
    }
    tree.set(&entry, "triggers", f.trimmed("triggers")?);
    ctx.set_cursor("entry", entry);
    Ok(())
}

fn route_calculation_rule() -> Rule {
    Rule::new(
        "route_calculation_log",
        r"IS-*IS\s+(?P<instance>\S+)\s+Level\s+(?P<level>\d+)\s+(?P<af>.+?)\s+Route\s+Calculation\s+Log",
        route_calculation_log,
    )
}

fn spf_row_rule() -> Rule {
    Rule::new(
        "spf_log",
        r"(?P<timestamp>[0-9:.]+)\s+(?P<type>\S+)\s+(?P<time_ms>\d+)\s+(?P<total_nodes>\d+)\s+(?P<trigger_count>\d+)\s+(?:(?P<first_trigger_lsp>\S+\.\S+)\s+)?(?P<triggers>[\w\s]+)$",
        spf_log_row,
    )
}

static SPF_LOG_RULES: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new(vec![
        route_calculation_rule(),
        Rule::new("log_date", r"---\s+(?P<date>[\s\w]+?)\s+---", log_date),
        spf_row_rule(),
    ])
});

fn spf_entry_fields() -> Vec<Field> {
    vec![
        req("type", Shape::Str),
        req("start_timestamp", Shape::Str),
        req("time_ms", Shape::Int),
        req("level", Shape::Int),
        req("total_nodes", Shape::Int),
        req("trigger_count", Shape::Int),
        opt("first_trigger_lsp", Shape::Str),
        req("triggers", Shape::Str),
    ]
}

fn spf_log_shape(entry: Shape) -> Shape {
    map(vec![req(
        "instance",
        keyed(map(vec![req(
            "address_family",
            keyed(map(vec![req("spf_log", keyed(entry))])),
        )])),
    )])
}

static SPF_LOG_SHAPE: LazyLock<Shape> = LazyLock::new(|| spf_log_shape(map(spf_entry_fields())));

pub static SPF_LOG: Parser = Parser {
    name: "show isis spf-log",
    description: "Route calculation log",
    commands: &["show isis spf-log"],
    defaults: &[],
    rules: &SPF_LOG_RULES,
    shape: &SPF_LOG_SHAPE,
};

fn delay(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let entry = ctx.cursor("entry")?;
    tree.set(entry, "delay_ms", f.int("delay")?);
    tree.set(entry, "delay_info", f.trimmed("info")?);
    Ok(())
}

fn spt_calculation(_: &Fields<'_>, ctx: &mut Context, _tree: &mut Tree) -> Result<()> {
    let timing = ctx.cursor("entry")?.child("spt_calculation");
    ctx.set_cursor("timing", timing);
    Ok(())
}

fn prefix_update(_: &Fields<'_>, ctx: &mut Context, _tree: &mut Tree) -> Result<()> {
    let timing = ctx.cursor("entry")?.child("prefix_update");
    ctx.set_cursor("timing", timing);
    Ok(())
}

fn results(_: &Fields<'_>, ctx: &mut Context, _tree: &mut Tree) -> Result<()> {
    let results = ctx.cursor("entry")?.child("results");
    ctx.set_cursor("results", results);
    Ok(())
}

/// `-` in a reach/unreach/total column means the count is not reported.
fn reach_counts(f: &Fields<'_>, tree: &mut Tree, at: &Path) -> Result<()> {
    for key in ["reach", "unreach", "total"] {
        if let Some(count) = f.present(key).filter(|c| *c != "-") {
            tree.set(at, key, Transform::Int.apply(key, count)?);
        }
    }
    Ok(())
}

fn nodes(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let nodes = ctx.cursor("results")?.child("nodes");
    reach_counts(f, tree, &nodes)
}

fn prefixes(f: &Fields<'_>, ctx: &mut Context, _tree: &mut Tree) -> Result<()> {
    let prefixes = ctx.cursor("results")?.child("prefixes").child(f.lower("kind")?);
    ctx.set_cursor("prefixes", prefixes);
    Ok(())
}

fn priority(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let priority = ctx
        .cursor("prefixes")?
        .child(format!("{}_priority", f.lower("priority")?));
    reach_counts(f, tree, &priority)
}

static SPF_LOG_DETAIL_RULES: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new(vec![
        route_calculation_rule(),
        spf_row_rule(),
        Rule::new("delay", r"Delay\s*:\s*(?P<delay>\d+)ms\s+\((?P<info>[\w\s]+)\)", delay),
        Rule::new("spt_calculation", r"SPT\s+Calculation", spt_calculation),
        Rule::new("prefix_update", r"Prefix\s+Updates", prefix_update),
        Rule::store(r"CPU\s+Time\s*:\s*(?P<value>\d+)\w+", "timing", "cpu_time_ms", Transform::Int),
        Rule::store(r"Real\s+Time\s*:\s*(?P<value>\d+)\w+", "timing", "real_time_ms", Transform::Int),
        Rule::store(
            r"New\s+LSP\s+Arrivals\s*:\s*(?P<value>\d+)",
            "entry",
            "new_lsp_arrivals",
            Transform::Int,
        ),
        Rule::store(
            r"Next\s+Wait\s+Interval\s*:\s*(?P<value>\d+)\w+",
            "entry",
            "next_wait_interval_ms",
            Transform::Int,
        ),
        Rule::new("results", r"Results$", results),
        Rule::new(
            "nodes",
            r"Nodes\s*:\s*(?P<reach>\d+)\s+(?P<unreach>\d+|-)\s+(?P<total>\d+)",
            nodes,
        ),
        Rule::new("prefixes", r"Prefixes\s*\((?P<kind>\w+)\)", prefixes),
        Rule::new(
            "priority",
            r"(?P<priority>\w+)\s+Priorit(?:y|ies)\s*:*\s+(?P<reach>\d+)\s+(?P<unreach>\d+|-)\s+(?P<total>\d+)",
            priority,
        ),
        Rule::new(
            "log_date",
            r"(?:-+\s+)?(?P<date>(?:Mon|Tue|Wed|Thu|Fri|Sat|Sun)\s+\w+\s+\d+\s+\d{4})(?:\s+-+)?$",
            log_date,
        ),
    ])
});

static SPF_LOG_DETAIL_SHAPE: LazyLock<Shape> = LazyLock::new(|| {
    let timing = || map(vec![req("cpu_time_ms", Shape::Int), req("real_time_ms", Shape::Int)]);
    let counts = || {
        map(vec![
            req("reach", Shape::Int),
            opt("unreach", Shape::Int),
            req("total", Shape::Int),
        ])
    };
    let priorities = || {
        map(vec![
            req("critical_priority", counts()),
            req("high_priority", counts()),
            req("medium_priority", counts()),
            req("low_priority", counts()),
            req("all_priority", counts()),
        ])
    };
    let results = map(vec![
        req(
            "nodes",
            map(vec![
                req("reach", Shape::Int),
                req("unreach", Shape::Int),
                req("total", Shape::Int),
            ]),
        ),
        req(
            "prefixes",
            map(vec![req("items", priorities()), req("routes", priorities())]),
        ),
    ]);

    let mut fields = spf_entry_fields();
    fields.extend([
        req("delay_ms", Shape::Int),
        req("delay_info", Shape::Str),
        req("spt_calculation", timing()),
        req("prefix_update", timing()),
        req("new_lsp_arrivals", Shape::Int),
        req("next_wait_interval_ms", Shape::Int),
        req("results", results),
    ]);
    spf_log_shape(map(fields))
});

pub static SPF_LOG_DETAIL: Parser = Parser {
    name: "show isis spf-log detail",
    description: "Route calculation log with per-run timings and results",
    commands: &["show isis spf-log detail"],
    defaults: &[],
    rules: &SPF_LOG_DETAIL_RULES,
    shape: &SPF_LOG_DETAIL_SHAPE,
};

// ---------------------------------------------------------------------------
// show isis lsp-log
// ---------------------------------------------------------------------------

fn lsp_log_header(f: &Fields<'_>, ctx: &mut Context, _tree: &mut Tree) -> Result<()> {
    ctx.set_cursor("instance", path!["instance", f.present("instance").unwrap_or("")]);
    ctx.set_var("level", f.int("level")?);
    Ok(())
}

fn lsp_log_row(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let level = ctx.var_int("level").ok_or_else(|| missing_var("level"))?;
    let index = ctx.next_index("lsp_log");
    let entry = ctx.cursor("instance")?.child("lsp_log").child(index);

    tree.set(&entry, "count", f.int("count")?);
    tree.set(&entry, "level", level);
    if let Some(interface) = f.present("interface") {
        tree.set(&entry, "interface", normalize(interface));
    }
    if let Some(triggers) = f.present("triggers") {
        tree.set(&entry, "triggers", triggers);
    }
    tree.set(&entry, "received_timestamp", start_timestamp(ctx, f.str("timestamp")?));
    Ok(())
}

static LSP_LOG_RULES: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new(vec![
        Rule::new(
            "lsp_log_header",
            r"(?:IS-*IS\s+(?P<instance>.+?)\s+)?Level\s+(?P<level>\d+)\s+LSP\s+log",
            lsp_log_header,
        ),
        Rule::new("log_date", r"---\s+(?P<date>[\w\s]+?)\s+---", log_date),
        Rule::new(
            "lsp_log",
            r"(?P<timestamp>[0-9:.]+)\s+(?P<count>\d+)\s*(?P<interface>[A-Z]+[a-z]*[/*\d.]+)?\s*(?P<triggers>[\w*\s]*)",
            lsp_log_row,
        ),
    ])
});

static LSP_LOG_SHAPE: LazyLock<Shape> = LazyLock::new(|| {
    let entry = map(vec![
        req("level", Shape::Int),
        req("received_timestamp", Shape::Str),
        req("count", Shape::Int),
        opt("interface", Shape::Str),
        opt("triggers", Shape::Str),
    ]);
    map(vec![req("instance", keyed(map(vec![req("lsp_log", keyed(entry))])))])
});

pub static LSP_LOG: Parser = Parser {
    name: "show isis lsp-log",
    description: "LSP generation log",
    commands: &["show isis lsp-log"],
    defaults: &[],
    rules: &LSP_LOG_RULES,
    shape: &LSP_LOG_SHAPE,
};

// ---------------------------------------------------------------------------
// show isis interface
// ---------------------------------------------------------------------------

fn interfaces_header(f: &Fields<'_>, ctx: &mut Context, _tree: &mut Tree) -> Result<()> {
    ctx.set_cursor("instance", path!["instance", f.trimmed("instance")?]);
    Ok(())
}

/// Opens an interface block; the flags decide where the shared
/// `Adjacency Formation` / `Prefix Advertisement` / `Protocol State` lines go.
fn interface_block(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let interface = ctx.cursor("instance")?.child("interface").child(f.str("interface")?);
    tree.set(&interface, "state", f.str("state")?);
    ctx.set_cursor("lsp", interface.child("lsp"));
    ctx.set_cursor("interface", interface);
    ctx.set_flag("in_interface", true);
    ctx.set_flag("clns", false);
    Ok(())
}

fn interface_or_topology(ctx: &Context) -> Result<&Path> {
    if ctx.flag("in_interface") {
        ctx.cursor("interface")
    } else {
        ctx.cursor("topology")
    }
}

fn adjacency_formation(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    tree.set(interface_or_topology(ctx)?, "adjacency_formation", f.str("value")?);
    Ok(())
}

fn prefix_advertisement(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    tree.set(interface_or_topology(ctx)?, "prefix_advertisement", f.trimmed("value")?);
    Ok(())
}

fn interface_bfd(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let enabled = f.str("state")?.eq_ignore_ascii_case("enabled");
    tree.set(ctx.cursor("interface")?, format!("{}_bfd", f.lower("af")?), enabled);
    Ok(())
}

fn interface_level_block(f: &Fields<'_>, ctx: &mut Context, _tree: &mut Tree) -> Result<()> {
    let level = ctx.cursor("interface")?.child("level").child(f.int("level")?);
    ctx.set_cursor("level", level);
    Ok(())
}

fn clns_block(_: &Fields<'_>, ctx: &mut Context, _tree: &mut Tree) -> Result<()> {
    let clns = ctx.cursor("interface")?.child("clns_io");
    ctx.set_cursor("clns", clns);
    ctx.set_flag("clns", true);
    Ok(())
}

fn protocol_state(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let at = if ctx.flag("clns") {
        ctx.cursor("clns")?
    } else {
        ctx.cursor("af")?
    };
    tree.set(at, "protocol_state", f.str("state")?);
    Ok(())
}

fn interface_topology(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let topology = ctx
        .cursor("interface")?
        .child("topology")
        .child(f.lower("topology")?);
    tree.set(&topology, "state", f.str("state")?);
    ctx.set_cursor("topology", topology);
    ctx.set_flag("in_interface", false);
    ctx.set_flag("clns", false);
    Ok(())
}

/// `Metric (L1/L2): 10/10` becomes `metric.level.{1,2}`.
fn level_pair(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let levels = ctx
        .cursor("topology")?
        .child(f.lower("kind")?)
        .child("level");
    tree.set(&levels, f.int("l1")?, f.int("v1")?);
    tree.set(&levels, f.int("l2")?, f.int("v2")?);
    Ok(())
}

fn max_label_stack(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let mpls = ctx.cursor("topology")?.child("mpls");
    tree.set(&mpls, "mpls_max_label_stack", f.trimmed("value")?);
    Ok(())
}

fn ldp_sync(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let levels = ctx
        .cursor("topology")?
        .child("mpls")
        .child("ldp_sync")
        .child("level");
    tree.set(&levels, f.int("l1")?, f.str("v1")?);
    tree.set(&levels, f.int("l2")?, f.str("v2")?);
    Ok(())
}

fn frr_state(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let (l1, l2) = (f.int("l1")?, f.int("l2")?);
    let levels = ctx.cursor("topology")?.child("frr").child("level");
    tree.set_default(&levels.child(l1), "state", f.trimmed("s1")?);
    tree.set_default(&levels.child(l2), "state", f.trimmed("s2")?);
    ctx.set_var("frr_l1", l1);
    ctx.set_var("frr_l2", l2);
    Ok(())
}

fn frr_type(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let l1 = ctx.var_int("frr_l1").ok_or_else(|| missing_var("frr_l1"))?;
    let l2 = ctx.var_int("frr_l2").ok_or_else(|| missing_var("frr_l2"))?;
    let levels = ctx.cursor("topology")?.child("frr").child("level");
    tree.set_default(&levels.child(l1), "type", f.str("t1")?);
    tree.set_default(&levels.child(l2), "type", f.str("t2")?);
    Ok(())
}

fn interface_address_family(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let af = ctx.cursor("interface")?.child("address_family").child(f.str("af")?);
    tree.set(&af, "state", f.str("state")?);
    ctx.set_cursor("af", af);
    ctx.set_flag("clns", false);
    Ok(())
}

fn back_to_back(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let lsp = ctx.cursor("lsp")?;
    tree.set(lsp, "lsp_transmit_back_to_back_limit", f.int("count")?);
    tree.set(lsp, "lsp_transmit_back_to_back_limit_window_msec", f.int("window")?);
    Ok(())
}

fn dis_priority(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let priority = ctx.cursor("level")?.child("priority");
    tree.set(&priority, "local", f.str("local")?);
    tree.set(&priority, "dis", f.trimmed("dis")?);
    Ok(())
}

fn mcast_membership(_: &Fields<'_>, ctx: &mut Context, _tree: &mut Tree) -> Result<()> {
    let mcast = ctx.cursor("clns")?.child("layer2_mcast_groups_membership");
    ctx.set_cursor("mcast", mcast);
    Ok(())
}

fn all_level_iss(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let key = format!("all_level_{}_iss", f.int("level")?);
    tree.set(ctx.cursor("mcast")?, key, f.str("state")?);
    Ok(())
}

fn all_iss(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let mcast = ctx.cursor("mcast")?;
    tree.set(mcast, "all_level_1_iss", f.str("state")?);
    tree.set(mcast, "all_level_2_iss", f.str("state")?);
    Ok(())
}

static INTERFACE_RULES: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new(vec![
        Rule::new("interfaces_header", r"IS-IS\s+(?P<instance>.+?)\s+Interfaces", interfaces_header),
        Rule::new(
            "interface",
            r"(?P<interface>[A-Za-z][\w-]*\d[\w/.:-]*)\s+(?P<state>\w+)$",
            interface_block,
        ),
        Rule::new("adjacency_formation", r"Adjacency\s+Formation\s*:\s*(?P<value>\w+)", adjacency_formation),
        Rule::new("prefix_advertisement", r"Prefix\s+Advertisement\s*:\s*(?P<value>.+)$", prefix_advertisement),
        Rule::new("bfd", r"(?P<af>IPv4|IPv6)\s+BFD\s*:\s*(?P<state>\w+)", interface_bfd),
        Rule::store(
            r"BFD\s+Min\s+Interval\s*:\s*(?P<value>\d+)",
            "interface",
            "bfd_min_interval",
            Transform::Int,
        ),
        Rule::store(
            r"BFD\s+Multiplier\s*:\s*(?P<value>\d+)",
            "interface",
            "bfd_multiplier",
            Transform::Int,
        ),
        Rule::store(r"Bandwidth\s*:\s*(?P<value>\d+)", "interface", "bandwidth", Transform::Int),
        Rule::store(r"Circuit\s+Type\s*:\s*(?P<value>\S+)", "interface", "circuit_type", Transform::Text),
        Rule::store(r"Media\s+Type\s*:\s*(?P<value>\S+)", "interface", "media_type", Transform::Text),
        Rule::store(
            r"Circuit\s+Number\s*:\s*(?P<value>\d+)",
            "interface",
            "circuit_number",
            Transform::Int,
        ),
        Rule::new("level", r"Level-(?P<level>\d+)$", interface_level_block),
        Rule::store(
            r"Adjacency\s+Count\s*:\s*(?P<value>\d+)",
            "level",
            "adjacency_count",
            Transform::Int,
        ),
        Rule::store(
            r"LSP\s+Pacing\s+Interval\s*:\s*(?P<value>\d+)\s+ms",
            "level",
            "lsp_pacing_interval_ms",
            Transform::Int,
        ),
        Rule::store(
            r"PSNP\s+Entry\s+Queue\s+Size\s*:\s*(?P<value>\d+)",
            "level",
            "psnp_entry_queue_size",
            Transform::Int,
        ),
        Rule::store(
            r"Hello\s+Interval\s*:\s*(?P<value>\d+)\s*s",
            "level",
            "hello_interval_sec",
            Transform::Int,
        ),
        Rule::store(
            r"Hello\s+Multiplier\s*:\s*(?P<value>\d+)",
            "level",
            "hello_multiplier",
            Transform::Int,
        ),
        Rule::new("clns", r"CLNS\s+I/O", clns_block),
        Rule::new("protocol_state", r"Protocol\s+State\s*:\s*(?P<state>\w+)", protocol_state),
        Rule::store(r"MTU\s*:\s*(?P<value>\d+)", "clns", "mtu", Transform::Int),
        Rule::new(
            "topology",
            r"(?P<topology>(?:IPv4|IPv6)[\s\w]+?)\s+Topology\s*:\s*(?P<state>\w+)",
            interface_topology,
        ),
        Rule::new(
            "level_pair",
            r"(?P<kind>Metric|Weight)\s+\(L(?P<l1>\d+)/L(?P<l2>\d+)\)\s*:\s*(?P<v1>\d+)/(?P<v2>\d+)",
            level_pair,
        ),
        Rule::new("max_label_stack", r"MPLS\s+Max\s+Label\s+Stack\s*:\s*(?P<value>.+)$", max_label_stack),
        Rule::new(
            "ldp_sync",
            r"MPLS\s+LDP\s+Sync\s+\(L(?P<l1>\d+)/L(?P<l2>\d+)\)\s*:\s*(?P<v1>\w+)/(?P<v2>\w+)",
            ldp_sync,
        ),
        Rule::new(
            "frr",
            r"FRR\s+\(L\d+/L\d+\)\s*:\s*L(?P<l1>\d+)\s+(?P<s1>[\w\s]+?)\s+L(?P<l2>\d+)\s+(?P<s2>[\w\s]+)",
            frr_state,
        ),
        Rule::new("frr_type", r"FRR\s+Type\s*:\s*(?P<t1>\S+)\s+(?P<t2>\S+)", frr_type),
        Rule::new(
            "address_family",
            r"(?P<af>IPv4|IPv6)\s+Address\s+Family\s*:\s*(?P<state>\w+)",
            interface_address_family,
        ),
        Rule::push(
            r"Forwarding\s+Address\(es\)\s*:\s*(?P<value>\S+)",
            "af",
            "forwarding_address",
            Transform::Text,
        ),
        Rule::push(
            r"Global\s+Prefix\(es\)\s*:\s*(?P<value>.+)$",
            "af",
            "global_prefix",
            Transform::Trim,
        ),
        Rule::store(
            r"LSP\s+transmit\s+timer\s+expires\s+in\s+(?P<value>\d+)\s+ms",
            "lsp",
            "transmit_timer_expires_ms",
            Transform::Int,
        ),
        Rule::store(
            r"LSP\s+transmission\s+is\s+(?P<value>\w+)",
            "lsp",
            "transmission_state",
            Transform::Text,
        ),
        Rule::new(
            "back_to_back",
            r"Can\s+send\s+up\s+to\s+(?P<count>\d+)\s+back-to-back\s+LSPs\s+in\s+the\s+next\s+(?P<window>\d+)\s+ms",
            back_to_back,
        ),
        Rule::store(r"LAN\s+ID\s*:\s*(?P<value>\S+)", "level", "lan_id", Transform::Text),
        Rule::new(
            "dis_priority",
            r"Priority\s*\(Local/DIS\)\s*:\s*(?P<local>\S+)/(?P<dis>.+)$",
            dis_priority,
        ),
        Rule::store(
            r"Next\s+LAN\s+IIH\s+in\s*:\s*(?P<value>\d+)\s*s",
            "level",
            "next_lan_iih_sec",
            Transform::Int,
        ),
        Rule::store(r"SNPA\s*:\s*(?P<value>\S+)", "clns", "snpa", Transform::Text),
        Rule::new(
            "mcast_membership",
            r"Layer-(?P<layer>\d+)\s*MCast\s+Groups\s+Membership:",
            mcast_membership,
        ),
        Rule::new("all_level_iss", r"All\s+Level-(?P<level>\d+)\s+ISs\s*:\s*(?P<state>\S+)", all_level_iss),
        Rule::new("all_iss", r"All\s+ISs\s*:\s*(?P<state>Yes|No)", all_iss),
    ])
});

static INTERFACE_SHAPE: LazyLock<Shape> = LazyLock::new(|| {
    let int_per_level = || map(vec![req("level", keyed(Shape::Int))]);
    let level = map(vec![
        req("adjacency_count", Shape::Int),
        opt("lsp_pacing_interval_ms", Shape::Int),
        req("psnp_entry_queue_size", Shape::Int),
        opt("next_lan_iih_sec", Shape::Int),
        opt("lan_id", Shape::Str),
        opt("hello_interval_sec", Shape::Int),
        req("hello_multiplier", Shape::Int),
        opt("priority", map(vec![req("local", Shape::Str), req("dis", Shape::Str)])),
    ]);
    let clns = map(vec![
        req("protocol_state", Shape::Str),
        req("mtu", Shape::Int),
        opt("snpa", Shape::Str),
        opt(
            "layer2_mcast_groups_membership",
            map(vec![
                req("all_level_1_iss", Shape::Str),
                req("all_level_2_iss", Shape::Str),
            ]),
        ),
    ]);
    let topology = map(vec![
        req("adjacency_formation", Shape::Str),
        req("state", Shape::Str),
        req("prefix_advertisement", Shape::Str),
        req("metric", int_per_level()),
        req("weight", int_per_level()),
        req(
            "mpls",
            map(vec![
                req("mpls_max_label_stack", Shape::Str),
                req("ldp_sync", map(vec![req("level", keyed(Shape::Str))])),
            ]),
        ),
        req(
            "frr",
            map(vec![req(
                "level",
                keyed(map(vec![req("state", Shape::Str), req("type", Shape::Str)])),
            )]),
        ),
    ]);
    let address_family = map(vec![
        req("state", Shape::Str),
        opt("protocol_state", Shape::Str),
        req("forwarding_address", Shape::List),
        req("global_prefix", Shape::List),
    ]);
    let interface = map(vec![
        req("state", Shape::Str),
        req("adjacency_formation", Shape::Str),
        req("prefix_advertisement", Shape::Str),
        req("ipv6_bfd", Shape::Bool),
        req("ipv4_bfd", Shape::Bool),
        req("bfd_min_interval", Shape::Int),
        req("bfd_multiplier", Shape::Int),
        req("bandwidth", Shape::Int),
        req("circuit_type", Shape::Str),
        req("media_type", Shape::Str),
        req("circuit_number", Shape::Int),
        req(
            "lsp",
            map(vec![
                req("transmit_timer_expires_ms", Shape::Int),
                req("transmission_state", Shape::Str),
                req("lsp_transmit_back_to_back_limit", Shape::Int),
                req("lsp_transmit_back_to_back_limit_window_msec", Shape::Int),
            ]),
        ),
        req("level", keyed(level)),
        req("clns_io", clns),
        req("topology", keyed(topology)),
        req("address_family", keyed(address_family)),
    ]);
    map(vec![req("instance", keyed(map(vec![req("interface", keyed(interface))])))])
});

pub static INTERFACE: Parser = Parser {
    name: "show isis interface",
    description: "IS-IS interface configuration and per-topology state",
    commands: &["show isis interface {interface}", "show isis interface"],
    defaults: &[],
    rules: &INTERFACE_RULES,
    shape: &INTERFACE_SHAPE,
};

// ---------------------------------------------------------------------------
// show isis database detail
// ---------------------------------------------------------------------------

fn database_level(f: &Fields<'_>, ctx: &mut Context, _tree: &mut Tree) -> Result<()> {
    let level = path![
        "instance",
        f.present("instance").unwrap_or(""),
        "level",
        f.int("level")?
    ];
    ctx.set_cursor("level", level);
    Ok(())
}

fn lsp_header(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let lspid = ctx.cursor("level")?.child("lspid").child(f.str("lspid")?);
    let lsp = lspid.child("lsp");

    tree.set(&lsp, "seq_num", f.str("seq_num")?);
    tree.set(&lsp, "checksum", f.str("checksum")?);
    tree.set(&lsp, "local_router", f.present("local_router").is_some());
    // `*` marks a timer that is not running
    for key in ["holdtime", "received"] {
        if let Some(value) = f.present(key).filter(|v| *v != "*") {
            tree.set(&lsp, key, Transform::Int.apply(key, value)?);
        }
    }
    tree.set(&lsp, "attach_bit", f.int("attach_bit")?);
    tree.set(&lsp, "p_bit", f.int("p_bit")?);
    tree.set(&lsp, "overload_bit", f.int("overload_bit")?);
    ctx.set_cursor("lspid", lspid);
    Ok(())
}

fn nlpid(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    tree.extend(ctx.cursor("lspid")?, "nlpid", f.str("value")?.split_whitespace());
    Ok(())
}

/// Store `ip_prefix` / `prefix_length` / `metric` for a prefix under `table`.
fn prefix_entry(f: &Fields<'_>, ctx: &Context, tree: &mut Tree, table: String) -> Result<()> {
    let prefix = f.str("prefix")?;
    let entry = ctx.cursor("lspid")?.child(table).child(prefix);
    let (address, length) = split_prefix(prefix);
    tree.set(&entry, "ip_prefix", address);
    if let Some(length) = length {
        tree.set(&entry, "prefix_length", length);
    }
    tree.set(&entry, "metric", f.int("metric")?);
    Ok(())
}

fn extended_ipv4(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    prefix_entry(f, ctx, tree, "extended_ipv4_reachability".to_string())
}

fn mt_reachability(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    prefix_entry(f, ctx, tree, format!("mt_{}_reachability", f.lower("version")?))
}

fn reachability(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    prefix_entry(f, ctx, tree, format!("{}_reachability", f.lower("version")?))
}

fn ip_neighbor(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    prefix_entry(f, ctx, tree, "ip_neighbor".to_string())
}

fn mt_entry(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let entry = ctx.cursor("lspid")?.child("mt_entries").child(f.str("mt")?);
    tree.touch(&entry);
    for key in ["attach_bit", "p_bit", "overload_bit"] {
        if let Some(bit) = f.opt_int(key)? {
            tree.set(&entry, key, bit);
        }
    }
    Ok(())
}

fn neighbor_metric(f: &Fields<'_>, ctx: &Context, tree: &mut Tree, table: &'static str) -> Result<Path> {
    let neighbor = ctx.cursor("lspid")?.child(table).child(f.str("neighbor")?);
    tree.set(&neighbor, "metric", f.int("metric")?);
    Ok(neighbor)
}

fn extended_is(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    neighbor_metric(f, ctx, tree, "extended_is_neighbor").map(|_| ())
}

fn mt_is(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let neighbor = neighbor_metric(f, ctx, tree, "mt_is_neighbor")?;
    tree.set(&neighbor, "mt_id", f.trimmed("mt_id")?);
    Ok(())
}

fn is_neighbor(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    neighbor_metric(f, ctx, tree, "is_neighbor").map(|_| ())
}

fn es_neighbor(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    neighbor_metric(f, ctx, tree, "es_neighbor").map(|_| ())
}

/// Inter-area prefixes are keyed by their own prefix, per address family.
fn interarea(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let af = f.present("af").unwrap_or("ipv4 unicast").to_lowercase();
    let entry = ctx
        .cursor("lspid")?
        .child("ip_interarea")
        .child(f.str("prefix")?)
        .child("address_family")
        .child(af);
    tree.set(&entry, "metric", f.int("metric")?);
    Ok(())
}

fn topology_ids(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let lspid = ctx.cursor("lspid")?;
    tree.push(lspid, "topology", f.str("t1")?);
    if let Some(second) = f.present("t2") {
        tree.push(lspid, "topology", second);
    }
    Ok(())
}

fn lsp_counts(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let level = ctx.cursor("level")?;
    tree.set(level, "total_lsp_count", f.int("total")?);
    tree.set(level, "local_lsp_count", f.int("local")?);
    Ok(())
}

/// Combined count line: the local count is the sum of local L1 and L2.
fn lsp_counts_combined(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let level = ctx.cursor("level")?;
    tree.set(level, "total_lsp_count", f.int("total")?);
    tree.set(level, "local_lsp_count", f.int("local_l1")? + f.int("local_l2")?);
    Ok(())
}

static DATABASE_DETAIL_RULES: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new(vec![
        Rule::new(
            "database_level",
            r"IS-IS\s+(?:(?P<instance>\S+)\s+)?\(?Level-(?P<level>\d+)\)?\s+Link\s+State\s+Database",
            database_level,
        ),
        Rule::new(
            "lsp",
            r"(?P<lspid>[\w\-.]+)\s*(?P<local_router>\*?)\s+(?P<seq_num>0x[0-9a-fA-F]+)\s+(?P<checksum>0x[0-9a-fA-F]+)\s+(?P<holdtime>\d+|\*)\s*(?:/\s*(?P<received>\d+|\*))?\s+(?P<attach_bit>\d+)/(?P<p_bit>\d+)/(?P<overload_bit>\d+)",
            lsp_header,
        ),
        Rule::store(r"Area\s+Address\s*:\s*(?P<value>\S+)", "lspid", "area_address", Transform::Text),
        Rule::new("nlpid", r"NLPID\s*:\s*(?P<value>[\w\s]+)", nlpid),
        Rule::store(r"IP\s*Address\s*:\s*(?P<value>\S+)", "lspid", "ip_address", Transform::Text),
        Rule::new(
            "extended_ipv4",
            r"Metric\s*:\s*(?P<metric>\d+)\s+IP-Extended\s+(?P<prefix>[\d.]+/\d+)",
            extended_ipv4,
        ),
        Rule::store(r"Hostname\s*:\s+(?P<value>\S+)", "lspid", "hostname", Transform::Text),
        Rule::store(r"IPv6\s+Address\s*:\s*(?P<value>\S+)", "lspid", "ipv6_address", Transform::Text),
        Rule::new(
            "mt_reachability",
            r"Metric\s*:\s*(?P<metric>\d+)\s+MT\s*\(IPv[46]\s+\w+\)\s*(?P<version>IPv[46])\s+(?P<prefix>\S+)",
            mt_reachability,
        ),
        Rule::new(
            "reachability",
            r"Metric\s*:\s*(?P<metric>\d+)\s+(?P<version>IPv[46])\s+(?:\(MT-IPv6\)\s*)?(?P<prefix>[\w:/.]+)",
            reachability,
        ),
        Rule::new(
            "mt_standard",
            r"MT\s*:\s*(?P<mt>\w+\s+\(IPv[46]\s*\w+\))\s*(?:(?P<attach_bit>\d+)/(?P<p_bit>\d+)/(?P<overload_bit>\d+))?",
            mt_entry,
        ),
        Rule::new(
            "mt",
            r"MT\s*:\s*(?P<mt>IPv[46]\s+\w+)\s+(?P<attach_bit>\d+)/(?P<p_bit>\d+)/(?P<overload_bit>\d+)",
            mt_entry,
        ),
        Rule::new(
            "extended_is",
            r"Metric\s*:\s*(?P<metric>\d+)\s+IS-Extended\s+(?P<neighbor>\S+)",
            extended_is,
        ),
        Rule::new(
            "mt_is",
            r"Metric\s*:\s*(?P<metric>\d+)\s+(?P<mt_id>[\w()\s]+?)\s+IS-Extended\s+(?P<neighbor>\S+)",
            mt_is,
        ),
        Rule::store(r"Router\s+ID\s*:\s*(?P<value>\S+)", "lspid", "router_id", Transform::Text),
        Rule::new(
            "ipv4_interarea",
            r"Metric\s*:\s*(?P<metric>\d+)\s+IP-Extended-Interarea\s+(?P<prefix>\S+)",
            interarea,
        ),
        Rule::new(
            "ipv6_interarea",
            r"Metric\s*:\s*(?P<metric>\d+)\s+MT\s+\((?P<af>.+)\)\s+IPv6-Interarea\s+(?P<prefix>\S+)",
            interarea,
        ),
        Rule::new(
            "lsp_counts",
            r"Total\s+Level-\d+\s+LSP\s+count\s*:\s*(?P<total>\d+)\s+Local\s*Level-\d+\s+LSP\s+count\s*:\s*(?P<local>\d+)",
            lsp_counts,
        ),
        Rule::new(
            "lsp_counts_combined",
            r"Total\s*LSP\s+count\s*:\s*(?P<total>\d+)\s*\(L1\s*:\s*\d+\s*,\s*L2\s*:?\s*\d+\s*,\s*local\s*L1\s*:\s*(?P<local_l1>\d+)\s*,\s*local\s*L2\s*:?\s*(?P<local_l2>\d+)\)",
            lsp_counts_combined,
        ),
        Rule::new("is_neighbor", r"Metric\s*:\s*(?P<metric>\d+)\s+IS\s+(?P<neighbor>[\w.\-]+)", is_neighbor),
        Rule::new("es_neighbor", r"Metric\s*:\s*(?P<metric>\d+)\s+ES\s+(?P<neighbor>[\w.]+)", es_neighbor),
        Rule::new(
            "topology",
            r"Topology\s*:\s*(?P<t1>IPv[46]\s+\(0x0\))\s*(?P<t2>IPv[46]\s+\(0x2\))?",
            topology_ids,
        ),
        Rule::new(
            "mt_is_neighbor",
            r"Metric\s*:\s*(?P<metric>\d+)\s*IS\s+\(MT-IPv[46]\)\s+(?P<neighbor>[\w.]+)",
            is_neighbor,
        ),
        Rule::new("ip_neighbor", r"Metric\s*:\s*(?P<metric>\d+)\s+IP\s+(?P<prefix>[\d.]+/\d+)", ip_neighbor),
    ])
});

static DATABASE_DETAIL_SHAPE: LazyLock<Shape> = LazyLock::new(|| {
    let metric_only = || keyed(map(vec![req("metric", Shape::Int)]));
    let prefix = |length_required: bool| {
        let length = if length_required {
            req("prefix_length", Shape::Str)
        } else {
            opt("prefix_length", Shape::Str)
        };
        keyed(map(vec![req("ip_prefix", Shape::Str), length, req("metric", Shape::Int)]))
    };
    let lsp = map(vec![
        req("seq_num", Shape::Str),
        opt("local_router", Shape::Bool),
        req("checksum", Shape::Str),
        opt("holdtime", Shape::Int),
        opt("received", Shape::Int),
        req("attach_bit", Shape::Int),
        req("p_bit", Shape::Int),
        req("overload_bit", Shape::Int),
    ]);
    let lspid = map(vec![
        req("lsp", lsp),
        opt("router_id", Shape::Str),
        opt("area_address", Shape::Str),
        opt("nlpid", Shape::List),
        opt("ip_address", Shape::Str),
        opt("ipv6_address", Shape::Str),
        opt("hostname", Shape::Str),
        opt("topology", Shape::List),
        opt("extended_ipv4_reachability", prefix(true)),
        opt(
            "ip_interarea",
            keyed(map(vec![req(
                "address_family",
                keyed(map(vec![req("metric", Shape::Int)])),
            )])),
        ),
        opt(
            "mt_is_neighbor",
            keyed(map(vec![req("mt_id", Shape::Str), req("metric", Shape::Int)])),
        ),
        opt("is_neighbor", metric_only()),
        opt("ip_neighbor", prefix(true)),
        opt("es_neighbor", metric_only()),
        opt("extended_is_neighbor", metric_only()),
        opt("mt_ipv4_reachability", prefix(false)),
        opt("ipv4_reachability", prefix(false)),
        opt("mt_ipv6_reachability", prefix(false)),
        opt("ipv6_reachability", prefix(false)),
        opt(
            "mt_entries",
            keyed(map(vec![
                opt("attach_bit", Shape::Int),
                opt("p_bit", Shape::Int),
                opt("overload_bit", Shape::Int),
            ])),
        ),
    ]);
    let level = map(vec![
        req("lspid", keyed(lspid)),
        opt("total_lsp_count", Shape::Int),
        opt("local_lsp_count", Shape::Int),
    ]);
    map(vec![req("instance", keyed(map(vec![req("level", keyed(level))])))])
});

pub static DATABASE_DETAIL: Parser = Parser {
    name: "show isis database detail",
    description: "Link-state database with per-LSP TLVs",
    commands: &["show isis database detail"],
    defaults: &[],
    rules: &DATABASE_DETAIL_RULES,
    shape: &DATABASE_DETAIL_SHAPE,
};

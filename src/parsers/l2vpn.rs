//! @ai:module:intent L2VPN cross-connect parsers
//! @ai:module:layer application
//! @ai:module:public_api XCONNECT, XCONNECT_DETAIL
//! @ai:module:depends_on parser, rule, schema, context, tree, interface
//! @ai:module:stateless true

use super::missing_var;
use crate::context::Context;
use crate::error::Result;
use crate::interface::normalize;
use crate::parser::Parser;
use crate::path;
use crate::rule::{Fields, Rule, RuleSet, Transform};
use crate::schema::{keyed, map, opt, req, Shape};
use crate::tree::Tree;
use std::sync::LazyLock;

// ---------------------------------------------------------------------------
// show l2vpn xconnect
// ---------------------------------------------------------------------------

/// A token alone on its line is the group, or the xconnect name when the
/// name does not fit on the row.
fn lone_token(f: &Fields<'_>, ctx: &mut Context, _tree: &mut Tree) -> Result<()> {
    let token = f.str("token")?;
    if ctx.var_str("group").is_some() {
        ctx.set_var("name", token);
    } else {
        ctx.set_var("group", token);
    }
    Ok(())
}

fn divider(_: &Fields<'_>, ctx: &mut Context, _tree: &mut Tree) -> Result<()> {
    ctx.clear_var("group");
    ctx.clear_var("name");
    Ok(())
}

fn xconnect_row(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let group = ctx.var_str("group").ok_or_else(|| missing_var("group"))?;
    let name = match f.get("name") {
        Some(name) => name,
        None => ctx.var_str("name").ok_or_else(|| missing_var("name"))?,
    };

    let xc = path!["groups", group, "name", name];
    tree.set(&xc, "status", f.str("status")?);

    let segment1 = xc.child("segment1").child(normalize(f.str("segment1")?));
    tree.set(&segment1, "status", f.str("segment1_status")?);

    let segment2 = segment1.child("segment2").child(f.str("segment2")?);
    tree.set(&segment2, "status", f.str("segment2_status")?);
    Ok(())
}

const SEGMENTS: &str = r"(?P<status>[A-Z]{2})\s+(?P<segment1>\S+)\s+(?P<segment1_status>[A-Z]{2})\s+(?P<segment2>.+?)\s+(?P<segment2_status>[A-Z]{2})$";

static XCONNECT_RULES: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new(vec![
        Rule::new("divider", r"-+(?:\s+-+)*$", divider),
        Rule::new("row", &format!(r"(?P<name>\S+)\s+{}", SEGMENTS), xconnect_row),
        Rule::new("row_without_name", SEGMENTS, xconnect_row),
        Rule::new("lone_token", r"(?P<token>\S+)$", lone_token),
    ])
});

static XCONNECT_SHAPE: LazyLock<Shape> = LazyLock::new(|| {
    let segment2 = keyed(map(vec![req("status", Shape::Str)]));
    let segment1 = keyed(map(vec![req("status", Shape::Str), req("segment2", segment2)]));
    map(vec![req(
        "groups",
        keyed(map(vec![req(
            "name",
            keyed(map(vec![req("status", Shape::Str), req("segment1", segment1)])),
        )])),
    )])
});

pub static XCONNECT: Parser = Parser {
    name: "show l2vpn xconnect",
    description: "Cross-connects per group with segment states",
    commands: &["show l2vpn xconnect"],
    defaults: &[],
    rules: &XCONNECT_RULES,
    shape: &XCONNECT_SHAPE,
};

// ---------------------------------------------------------------------------
// show l2vpn xconnect detail
// ---------------------------------------------------------------------------

fn xc_header(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let xc = path!["group", f.trimmed("group")?, "xc", f.trimmed("xc")?];
    tree.set(&xc, "state", f.trimmed("state")?);
    tree.set(&xc, "interworking", f.str("interworking")?);

    ctx.set_cursor("xc", xc);
    ctx.clear_cursor("pw");
    ctx.clear_cursor("mpls_row");
    ctx.set_flag("backup", false);
    Ok(())
}

fn monitor_session(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let session = ctx
        .cursor("xc")?
        .child("monitor_session")
        .child(f.trimmed("name")?);
    tree.set(&session, "state", f.str("state")?);
    Ok(())
}

fn attachment_circuit(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let ac = ctx.cursor("xc")?.child("ac").child(f.trimmed("ac")?);
    tree.set(&ac, "state", f.str("state")?);
    ctx.set_cursor("ac", ac.clone());
    ctx.set_cursor("statistics", ac);
    Ok(())
}

fn ac_params(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let ac = ctx.cursor("ac")?;
    tree.set(ac, "mtu", f.int("mtu")?);
    tree.set(ac, "xc_id", f.str("xc_id")?);
    tree.set(ac, "interworking", f.trimmed("interworking")?);
    tree.set(ac, "msti", f.int("msti")?);
    Ok(())
}

fn totals(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let totals = ctx
        .cursor("statistics")?
        .child("statistics")
        .child(format!("{}_totals", f.str("kind")?));
    tree.set(&totals, f.str("direction")?, f.int("count")?);
    Ok(())
}

fn backup_section(_: &Fields<'_>, ctx: &mut Context, _tree: &mut Tree) -> Result<()> {
    ctx.set_flag("backup", true);
    Ok(())
}

/// Pseudowires after a `Backup PW:` line belong under `backup_pw`.
fn pseudowire(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let section = if ctx.flag("backup") { "backup_pw" } else { "pw" };
    let pw = ctx
        .cursor("xc")?
        .child(section)
        .child("neighbor")
        .child(f.str("neighbor")?);
    tree.set(&pw, "id", f.int("id")?);
    tree.set(&pw, "state", f.trimmed("state")?);

    ctx.set_cursor("pw", pw.clone());
    ctx.set_cursor("statistics", pw);
    ctx.clear_cursor("mpls_row");
    Ok(())
}

fn pw_class(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let pw = ctx.cursor("pw")?;
    tree.set(pw, "pw_class", f.trimmed("class")?);
    tree.set(pw, "xc_id", f.str("xc_id")?);
    Ok(())
}

fn encapsulation(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let pw = ctx.cursor("pw")?;
    tree.set(pw, "encapsulation", f.str("encapsulation")?);
    tree.set(pw, "protocol", f.str("protocol")?);
    Ok(())
}

fn pw_type(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let pw = ctx.cursor("pw")?;
    tree.set(pw, "type", f.trimmed("type")?);
    tree.set(pw, "control_word", f.trimmed("control_word")?);
    tree.set(pw, "interworking", f.str("interworking")?);
    Ok(())
}

/// Remembers where the Local and Remote columns split, for the annotation lines.
fn mpls_header(f: &Fields<'_>, ctx: &mut Context, _tree: &mut Tree) -> Result<()> {
    let local = f.column_of("Local").ok_or_else(|| missing_var("local_column"))?;
    let remote = f.column_of("Remote").ok_or_else(|| missing_var("remote_column"))?;
    ctx.set_var("column_split", ((local + remote) / 2) as i64);
    Ok(())
}

fn mpls_row(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let key = match f.str("field")? {
        "Label" => "label",
        "Group ID" => "group_id",
        "Interface" => "interface",
        "MTU" => "mtu",
        "Control word" => "control_word",
        "PW type" => "pw_type",
        "VCCV CV type" => "vccv_cv_type",
        _ => "vccv_cc_type",
    };
    let mut row = ctx.cursor("pw")?.child("mpls").child(key);
    // A second Interface row names the monitored interfaces.
    if key == "interface" && tree.contains(&row.child("local")) {
        row = row.child("monitor_interface");
    }

    tree.set(&row, "local", f.str("local")?);
    tree.set(&row, "remote", f.str("remote")?);
    ctx.set_cursor("mpls_row", row);
    Ok(())
}

/// Parenthesized type names under a VCCV row; the column decides the side.
fn mpls_annotation(f: &Fields<'_>, ctx: &mut Context, tree: &mut Tree) -> Result<()> {
    let row = ctx.cursor("mpls_row")?.clone();
    let split = ctx
        .var_int("column_split")
        .ok_or_else(|| missing_var("column_split"))?;

    let first = f.trimmed("first")?;
    let column = f.column("first").unwrap_or_default() as i64;
    let side = if column < split { "local_type" } else { "remote_type" };
    tree.push(&row, side, first);

    if let Some(second) = f.present("second") {
        tree.push(&row, "remote_type", second);
    }
    Ok(())
}

fn pw_store(pattern: &str, key: &'static str, transform: Transform) -> Rule {
    Rule::store(pattern, "pw", key, transform)
}

static XCONNECT_DETAIL_RULES: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new(vec![
        Rule::new(
            "xc",
            r"Group\s+(?P<group>[^,]+),\s+XC\s+(?P<xc>[^,]+),\s+state\s+is\s+(?P<state>[^;]+);\s+Interworking\s+(?P<interworking>\S+)",
            xc_header,
        ),
        Rule::new(
            "monitor_session",
            r"Monitor-Session:\s+(?P<name>[^,]+),\s+state\s+is\s+(?P<state>\S+)",
            monitor_session,
        ),
        Rule::new(
            "ac",
            r"AC:\s+(?P<ac>[^,]+),\s+state\s+is\s+(?P<state>\S+)",
            attachment_circuit,
        ),
        Rule::store(r"Type\s+(?P<value>\S+)$", "ac", "type", Transform::Text),
        Rule::new(
            "ac_params",
            r"MTU\s+(?P<mtu>\d+);\s+XC\s+ID\s+(?P<xc_id>\S+);\s+interworking\s+(?P<interworking>[^;]+);\s+MSTi\s+(?P<msti>\d+)",
            ac_params,
        ),
        Rule::new(
            "totals",
            r"(?P<kind>packet|byte)\s+totals:\s+(?P<direction>send|receive)\s+(?P<count>\d+)",
            totals,
        ),
        Rule::new("backup_pw", r"Backup\s+PW:$", backup_section),
        Rule::new(
            "pw",
            r"PW:\s+neighbor\s+(?P<neighbor>[\d.]+),\s+PW\s+ID\s+(?P<id>\d+),\s+state\s+is\s+(?P<state>.+)$",
            pseudowire,
        ),
        Rule::new(
            "pw_class",
            r"PW\s+class\s+(?P<class>.+?),\s+XC\s+ID\s+(?P<xc_id>\S+)$",
            pw_class,
        ),
        Rule::new(
            "encapsulation",
            r"Encapsulation\s+(?P<encapsulation>\S+),\s+protocol\s+(?P<protocol>\S+)$",
            encapsulation,
        ),
        Rule::new(
            "pw_type",
            r"PW\s+type\s+(?P<type>[^,]+),\s+control\s+word\s+(?P<control_word>[^,]+),\s+interworking\s+(?P<interworking>\S+)$",
            pw_type,
        ),
        pw_store(
            r"PW\s+backup\s+disable\s+delay\s+(?P<value>\d+)\s+sec",
            "backup_disable_delay",
            Transform::Int,
        ),
        pw_store(r"Sequencing\s+(?P<value>.+)$", "sequencing", Transform::Trim),
        Rule::new("mpls_header", r"MPLS\s+Local\s+Remote$", mpls_header),
        Rule::new(
            "mpls_row",
            r"(?P<field>Label|Group ID|Interface|MTU|Control word|PW type|VCCV CV type|VCCV CC type)\s+(?P<local>\S+)\s+(?P<remote>\S+)$",
            mpls_row,
        ),
        Rule::new(
            "mpls_annotation",
            r"\((?P<first>[^)]+)\)(?:\s+\((?P<second>[^)]+)\))?$",
            mpls_annotation,
        ),
        pw_store(r"Create\s+time:\s+(?P<value>.+)$", "create_time", Transform::Trim),
        pw_store(
            r"Last\s+time\s+status\s+changed:\s+(?P<value>.+)$",
            "last_time_status_changed",
            Transform::Trim,
        ),
    ])
});

fn statistics_shape() -> Shape {
    let directions = || map(vec![opt("send", Shape::Int), opt("receive", Shape::Int)]);
    map(vec![opt("packet_totals", directions()), opt("byte_totals", directions())])
}

fn mpls_row_shape() -> Shape {
    map(vec![
        req("local", Shape::Str),
        req("remote", Shape::Str),
        opt("local_type", Shape::List),
        opt("remote_type", Shape::List),
        opt(
            "monitor_interface",
            map(vec![req("local", Shape::Str), req("remote", Shape::Str)]),
        ),
    ])
}

fn pseudowire_shape() -> Shape {
    let mpls = map(
        [
            "label",
            "group_id",
            "interface",
            "mtu",
            "control_word",
            "pw_type",
            "vccv_cv_type",
            "vccv_cc_type",
        ]
        .into_iter()
        .map(|key| opt(key, mpls_row_shape()))
        .collect(),
    );
    let neighbor = map(vec![
        req("id", Shape::Int),
        req("state", Shape::Str),
        opt("pw_class", Shape::Str),
        opt("xc_id", Shape::Str),
        opt("encapsulation", Shape::Str),
        opt("protocol", Shape::Str),
        opt("type", Shape::Str),
        opt("control_word", Shape::Str),
        opt("interworking", Shape::Str),
        opt("backup_disable_delay", Shape::Int),
        opt("sequencing", Shape::Str),
        opt("mpls", mpls),
        opt("create_time", Shape::Str),
        opt("last_time_status_changed", Shape::Str),
        opt("statistics", statistics_shape()),
    ]);
    map(vec![req("neighbor", keyed(neighbor))])
}

static XCONNECT_DETAIL_SHAPE: LazyLock<Shape> = LazyLock::new(|| {
    let ac = map(vec![
        req("state", Shape::Str),
        opt("type", Shape::Str),
        opt("mtu", Shape::Int),
        opt("xc_id", Shape::Str),
        opt("interworking", Shape::Str),
        opt("msti", Shape::Int),
        opt("statistics", statistics_shape()),
    ]);
    let xc = map(vec![
        req("state", Shape::Str),
        req("interworking", Shape::Str),
        opt("monitor_session", keyed(map(vec![req("state", Shape::Str)]))),
        opt("ac", keyed(ac)),
        opt("pw", pseudowire_shape()),
        opt("backup_pw", pseudowire_shape()),
    ]);
    map(vec![req(
        "group",
        keyed(map(vec![req("xc", keyed(xc))])),
    )])
});

pub static XCONNECT_DETAIL: Parser = Parser {
    name: "show l2vpn xconnect detail",
    description: "Cross-connect attachment circuits, pseudowires and MPLS parameters",
    commands: &["show l2vpn xconnect detail"],
    defaults: &[],
    rules: &XCONNECT_DETAIL_RULES,
    shape: &XCONNECT_DETAIL_SHAPE,
};

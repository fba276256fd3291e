//! @ai:module:intent Expand abbreviated interface names to their canonical form
//! @ai:module:layer domain
//! @ai:module:public_api InterfaceKind, normalize, detect_kind
//! @ai:module:stateless true

/// @ai:intent Interface families the device abbreviates in tabular output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterfaceKind {
    GigabitEthernet,
    TenGigE,
    TwentyFiveGigE,
    FortyGigE,
    HundredGigE,
    FourHundredGigE,
    BundleEther,
    Bvi,
    Loopback,
    Pos,
    MgmtEth,
    Nv,
    TunnelTe,
    TunnelIp,
    Null,
}

const ALL_KINDS: [InterfaceKind; 15] = [
    InterfaceKind::GigabitEthernet,
    InterfaceKind::TenGigE,
    InterfaceKind::TwentyFiveGigE,
    InterfaceKind::FortyGigE,
    InterfaceKind::HundredGigE,
    InterfaceKind::FourHundredGigE,
    InterfaceKind::BundleEther,
    InterfaceKind::Bvi,
    InterfaceKind::Loopback,
    InterfaceKind::Pos,
    InterfaceKind::MgmtEth,
    InterfaceKind::Nv,
    InterfaceKind::TunnelTe,
    InterfaceKind::TunnelIp,
    InterfaceKind::Null,
];

impl InterfaceKind {
    /// @ai:intent Canonical name prefix
    /// @ai:effects pure
    pub fn name(&self) -> &'static str {
        match self {
            InterfaceKind::GigabitEthernet => "GigabitEthernet",
            InterfaceKind::TenGigE => "TenGigE",
            InterfaceKind::TwentyFiveGigE => "TwentyFiveGigE",
            InterfaceKind::FortyGigE => "FortyGigE",
            InterfaceKind::HundredGigE => "HundredGigE",
            InterfaceKind::FourHundredGigE => "FourHundredGigE",
            InterfaceKind::BundleEther => "Bundle-Ether",
            InterfaceKind::Bvi => "BVI",
            InterfaceKind::Loopback => "Loopback",
            InterfaceKind::Pos => "POS",
            InterfaceKind::MgmtEth => "MgmtEth",
            InterfaceKind::Nv => "Nv",
            InterfaceKind::TunnelTe => "tunnel-te",
            InterfaceKind::TunnelIp => "tunnel-ip",
            InterfaceKind::Null => "Null",
        }
    }

    /// @ai:intent Lowercase abbreviations the device prints for this family
    /// @ai:effects pure
    pub fn abbreviations(&self) -> &[&'static str] {
        match self {
            InterfaceKind::GigabitEthernet => &["gi", "gige"],
            InterfaceKind::TenGigE => &["te", "tengig"],
            InterfaceKind::TwentyFiveGigE => &["tf", "twentyfivegig"],
            InterfaceKind::FortyGigE => &["fo", "fortygig"],
            InterfaceKind::HundredGigE => &["hu", "hundredgig"],
            InterfaceKind::FourHundredGigE => &["fh"],
            InterfaceKind::BundleEther => &["be", "bundle-e"],
            InterfaceKind::Bvi => &["bv"],
            InterfaceKind::Loopback => &["lo", "lp"],
            InterfaceKind::Pos => &["po"],
            InterfaceKind::MgmtEth => &["mg", "mgmt"],
            InterfaceKind::Nv => &[],
            InterfaceKind::TunnelTe => &["tt"],
            InterfaceKind::TunnelIp => &["ti"],
            InterfaceKind::Null => &["nu"],
        }
    }
}

/// @ai:intent Find the family whose name or abbreviation equals prefix, ignoring case
/// @ai:example ("Gi") -> Some(GigabitEthernet)
/// @ai:example ("bundle-ether") -> Some(BundleEther)
/// @ai:example ("PW") -> None
/// @ai:effects pure
pub fn detect_kind(prefix: &str) -> Option<InterfaceKind> {
    let lower = prefix.to_ascii_lowercase();

    for kind in ALL_KINDS {
        if kind.name().to_ascii_lowercase() == lower || kind.abbreviations().contains(&lower.as_str()) {
            return Some(kind);
        }
    }

    None
}

/// @ai:intent Canonical interface name for a possibly abbreviated one
/// @ai:post names that are not `<letters><digit>...` or have an unknown prefix are returned unchanged
/// @ai:example ("Gi0/0/0/5.1000") -> "GigabitEthernet0/0/0/5.1000"
/// @ai:example ("BE1") -> "Bundle-Ether1"
/// @ai:example ("PW:40.40.40.40,10001") -> "PW:40.40.40.40,10001"
/// @ai:effects pure
pub fn normalize(name: &str) -> String {
    let split = name
        .find(|c: char| !(c.is_ascii_alphabetic() || c == '-'))
        .unwrap_or(name.len());
    let (prefix, rest) = name.split_at(split);

    if prefix.is_empty() || !rest.starts_with(|c: char| c.is_ascii_digit()) {
        return name.to_string();
    }

    match detect_kind(prefix) {
        Some(kind) => format!("{}{}", kind.name(), rest),
        None => name.to_string(),
    }
}

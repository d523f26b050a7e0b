use std::collections::HashMap;

use anyhow::Context;
use serde::Deserialize;

/// Crates the domain must never depend on, directly or through a workspace member.
const DOMAIN_FORBIDDEN: &[&str] = &[
    "countrylist-app",
    "tokio",
    "reqwest",
    "async-trait",
    "directories",
    "tracing",
    "chrono",
];

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("arch-check") => arch_check(),
        Some(cmd) => anyhow::bail!("Unknown xtask command: {cmd}"),
        None => anyhow::bail!("Usage: cargo xtask <command>\n\nCommands:\n  arch-check"),
    }
}

#[derive(Debug, Deserialize)]
struct Metadata {
    packages: Vec<Package>,
}

#[derive(Debug, Deserialize)]
struct Package {
    name: String,
    dependencies: Vec<Dependency>,
}

#[derive(Debug, Deserialize)]
struct Dependency {
    name: String,
    kind: Option<String>,
}

fn arch_check() -> anyhow::Result<()> {
    let output = std::process::Command::new("cargo")
        .args(["metadata", "--format-version", "1", "--no-deps"])
        .output()
        .context("running cargo metadata")?;

    if !output.status.success() {
        anyhow::bail!("cargo metadata failed")
    }

    let metadata: Metadata =
        serde_json::from_slice(&output.stdout).context("parsing cargo metadata")?;

    let violations = domain_violations(&metadata);
    if !violations.is_empty() {
        for v in &violations {
            eprintln!("arch-check: {v}");
        }
        anyhow::bail!("{} architecture violation(s)", violations.len());
    }

    println!("arch-check: ok ({} packages)", metadata.packages.len());
    Ok(())
}

/// Normal (non-dev) dependencies of `countrylist-domain` that are on the deny list.
fn domain_violations(metadata: &Metadata) -> Vec<String> {
    let by_name: HashMap<&str, &Package> = metadata
        .packages
        .iter()
        .map(|p| (p.name.as_str(), p))
        .collect();

    let Some(domain) = by_name.get("countrylist-domain") else {
        return vec!["countrylist-domain is missing from the workspace".to_string()];
    };

    domain
        .dependencies
        .iter()
        .filter(|d| d.kind.is_none())
        .filter(|d| DOMAIN_FORBIDDEN.contains(&d.name.as_str()))
        .map(|d| format!("countrylist-domain must not depend on {}", d.name))
        .collect()
}

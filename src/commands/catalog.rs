use std::path::Path;

use anyhow::Result;
use tracing::info;

use crate::fabric::{fabric_library, load_library, Fabric};
use crate::techpack::{list_templates, Template};

/// Built-in fabric library, or the JSON library at `path`.
pub fn resolve_library(path: Option<&Path>) -> Result<Vec<Fabric>> {
    match path {
        Some(path) => load_library(path),
        None => Ok(fabric_library()),
    }
}

pub fn show_templates() -> Result<()> {
    let templates = list_templates();
    info!("Listing {} templates", templates.len());
    print!("{}", render_templates(&templates));
    Ok(())
}

pub fn show_fabrics(library: Option<&Path>) -> Result<()> {
    let fabrics = resolve_library(library)?;
    info!("Listing {} fabrics", fabrics.len());
    print!("{}", render_fabrics(&fabrics));
    Ok(())
}

fn render_templates(templates: &[Template]) -> String {
    let mut out = String::new();
    for t in templates {
        out.push_str(&format!(
            "{:<10} {:<24} {:<6} {}\n",
            t.id,
            t.name,
            t.category.as_str(),
            t.description
        ));
    }
    out
}

fn render_fabrics(fabrics: &[Fabric]) -> String {
    let mut out = format!(
        "{:<18} {:<22} {:<6} {:>5} {:>6} {:>8} {:>7} {:>7}\n",
        "ID", "NAME", "TYPE", "GSM", "WIDTH", "STRETCH", "SHRINK", "$/M"
    );
    for f in fabrics {
        out.push_str(&format!(
            "{:<18} {:<22} {:<6} {:>5} {:>6} {:>7}% {:>6}% {:>7.2}\n",
            f.fabric_id,
            f.name,
            f.fabric_type.as_str(),
            f.gsm,
            f.width_inches,
            f.stretch_percent,
            f.shrinkage_percent,
            f.cost_per_meter
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_templates_lists_each_id() {
        let out = render_templates(&list_templates());
        assert_eq!(out.lines().count(), 2);
        assert!(out.starts_with("tp-cargo"));
        assert!(out.contains("Women's Active Hoodie"));
    }

    #[test]
    fn test_render_fabrics_has_header_and_rows() {
        let out = render_fabrics(&fabric_library());
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("ID"));
        assert!(out.contains("FAB-KNIT-JSY-160"));
        assert!(out.contains("3.20"));
    }

    #[test]
    fn test_resolve_library_defaults_to_builtin() {
        assert_eq!(resolve_library(None).unwrap(), fabric_library());
    }
}

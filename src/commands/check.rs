//! `check` and `matrix` commands.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::checker::{
    load_config, validate, Costing, FeasibilityConfig, ReadinessReport, ReadinessStatus,
    ValidationOutcome,
};
use crate::config::AppConfig;
use crate::explain::{explain_findings, ExplainedFinding, ProviderExplainer};
use crate::fabric::{find_in, Fabric};
use crate::techpack::{
    list_templates, load_tech_pack, parse_document, template_tech_pack, TechPack,
};
use crate::workflow::{Workflow, WorkflowEvent};

use super::catalog::resolve_library;

/// Where the tech pack for a check comes from.
#[derive(Debug, Clone)]
pub enum TechPackSource {
    Template(String),
    /// Structured tech pack JSON
    File(PathBuf),
    /// Uploaded document run through ingestion
    Document(PathBuf),
}

#[derive(Debug, Clone)]
pub struct CheckOptions {
    pub source: TechPackSource,
    pub fabric_id: String,
    pub library: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub json: bool,
    pub explain: bool,
}

/// Serialized form of a single check.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckReport {
    pub generated_at: DateTime<Utc>,
    pub tech_pack_id: String,
    pub style_code: String,
    pub garment_type: String,
    pub fabric_id: String,
    pub fabric_name: String,
    pub results: Vec<ExplainedFinding>,
    pub costing: Costing,
    pub readiness: ReadinessReport,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixRow {
    pub template_id: String,
    pub fabric_id: String,
    pub score: i32,
    pub status: ReadinessStatus,
    pub findings: Vec<String>,
}

/// Command-line `--config` wins over the preferences file.
fn resolve_feasibility(path: Option<&Path>, prefs: &AppConfig) -> Result<FeasibilityConfig> {
    match path {
        Some(path) => load_config(path),
        None => prefs.feasibility(),
    }
}

async fn load_event(source: &TechPackSource) -> Result<WorkflowEvent> {
    let event = match source {
        TechPackSource::Template(id) => WorkflowEvent::TemplateSelected(id.clone()),
        TechPackSource::File(path) => WorkflowEvent::DocumentParsed(load_tech_pack(path)?),
        TechPackSource::Document(path) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("Failed to read document {}", path.display()))?;
            WorkflowEvent::DocumentParsed(parse_document(&bytes).await?)
        }
    };
    Ok(event)
}

pub async fn run_check(options: CheckOptions, prefs: &AppConfig) -> Result<()> {
    let config = resolve_feasibility(options.config.as_deref(), prefs)?;
    let library = resolve_library(options.library.as_deref())?;
    let fabric = find_in(&library, &options.fabric_id)?;

    let mut workflow = Workflow::new(config);
    workflow.handle(load_event(&options.source).await?)?;
    workflow.handle(WorkflowEvent::AnalysisConfirmed)?;
    workflow.handle(WorkflowEvent::FabricSelected(fabric))?;

    let (Some(tech_pack), Some(fabric), Some(outcome)) =
        (workflow.tech_pack(), workflow.fabric(), workflow.outcome())
    else {
        anyhow::bail!("Workflow finished without a validation outcome");
    };

    let findings = if options.explain {
        let timeout = prefs.explain_timeout();
        let explainer =
            ProviderExplainer::from_credentials(prefs.provider()?, prefs.model()?, timeout)?;
        info!("Explaining findings with {}", explainer.provider());
        explain_findings(&explainer, outcome, tech_pack, fabric, timeout).await
    } else {
        unexplained(outcome)
    };

    let report = build_report(tech_pack, fabric, outcome, findings);
    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&report));
    }
    Ok(())
}

fn unexplained(outcome: &ValidationOutcome) -> Vec<ExplainedFinding> {
    outcome
        .results
        .iter()
        .map(|finding| ExplainedFinding {
            finding: finding.clone(),
            ai_explanation: None,
        })
        .collect()
}

pub fn build_report(
    tech_pack: &TechPack,
    fabric: &Fabric,
    outcome: &ValidationOutcome,
    results: Vec<ExplainedFinding>,
) -> CheckReport {
    CheckReport {
        generated_at: Utc::now(),
        tech_pack_id: tech_pack.tech_pack_id.clone(),
        style_code: tech_pack.style_code.clone(),
        garment_type: tech_pack.garment_type.clone(),
        fabric_id: fabric.fabric_id.clone(),
        fabric_name: fabric.name.clone(),
        results,
        costing: outcome.costing,
        readiness: outcome.readiness,
    }
}

/// Human-readable report. Money and margin are shown to two decimals.
pub fn render_report(report: &CheckReport) -> String {
    let mut out = format!(
        "{} {} ({}) on {} {}\n\n",
        report.tech_pack_id,
        report.style_code,
        report.garment_type,
        report.fabric_id,
        report.fabric_name
    );

    if report.results.is_empty() {
        out.push_str("No findings.\n");
    } else {
        out.push_str("Findings:\n");
        for item in &report.results {
            let f = &item.finding;
            out.push_str(&format!(
                "  [{}] {} {}: {}\n",
                f.severity, f.rule_id, f.category, f.message
            ));
            if let Some(explanation) = &item.ai_explanation {
                out.push_str(&format!("      {}\n", explanation));
            }
        }
    }

    let c = &report.costing;
    out.push_str("\nCosting (per piece):\n");
    for (label, value) in [
        ("Fabric", c.fabric_cost),
        ("Trims", c.trim_cost),
        ("CM", c.cm_cost),
        ("Washing", c.washing_cost),
        ("Overhead", c.overhead_cost),
        ("Total", c.total_cost_per_piece),
        ("Buyer price", c.buyer_price),
    ] {
        out.push_str(&format!("  {:<12} ${:.2}\n", label, value));
    }
    out.push_str(&format!("  {:<12} {:.2}%\n", "Margin", c.margin_percent));

    let r = &report.readiness;
    out.push_str(&format!(
        "\nReadiness: {}/100 {} ({} failed, {} warnings)\n",
        r.score, r.status, r.fail_count, r.warning_count
    ));
    out
}

/// Validate every tech pack against every fabric, tech packs outermost.
pub fn build_matrix(
    tech_packs: &[(String, TechPack)],
    fabrics: &[Fabric],
    config: &FeasibilityConfig,
) -> Vec<MatrixRow> {
    let mut rows = Vec::with_capacity(tech_packs.len() * fabrics.len());
    for (template_id, tech_pack) in tech_packs {
        for fabric in fabrics {
            let outcome = validate(tech_pack, fabric, config);
            rows.push(MatrixRow {
                template_id: template_id.clone(),
                fabric_id: fabric.fabric_id.clone(),
                score: outcome.readiness.score,
                status: outcome.readiness.status,
                findings: outcome.results.into_iter().map(|r| r.rule_id).collect(),
            });
        }
    }
    rows
}

pub fn run_matrix(
    template: Option<&str>,
    library: Option<&Path>,
    config: Option<&Path>,
    json: bool,
    prefs: &AppConfig,
) -> Result<()> {
    let config = resolve_feasibility(config, prefs)?;
    let fabrics = resolve_library(library)?;

    let ids: Vec<String> = match template {
        Some(id) => vec![id.to_string()],
        None => list_templates().into_iter().map(|t| t.id).collect(),
    };
    let mut tech_packs = Vec::with_capacity(ids.len());
    for id in ids {
        let tech_pack = template_tech_pack(&id)?;
        tech_packs.push((id, tech_pack));
    }

    let rows = build_matrix(&tech_packs, &fabrics, &config);
    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!(
        "{:<10} {:<18} {:>5}  {:<20} FINDINGS",
        "TEMPLATE", "FABRIC", "SCORE", "STATUS"
    );
    for row in &rows {
        println!(
            "{:<10} {:<18} {:>5}  {:<20} {}",
            row.template_id,
            row.fabric_id,
            row.score,
            row.status.as_str(),
            row.findings.join(", ")
        );
    }
    Ok(())
}

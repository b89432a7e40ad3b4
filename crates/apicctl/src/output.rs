//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders a `TaskOutcome` in the format selected by `--output`. Table is
//! built with `tabled`; structured formats serialize the full outcome so
//! `current`/`previous`/`proposed`/`sent` appear exactly as on the wire;
//! plain emits one DN per line for scripting.

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use apic_api::models::ManagedObject;
use apic_core::TaskOutcome;

use crate::cli::OutputFormat;

// ── Table row ────────────────────────────────────────────────────────

#[derive(Tabled)]
struct TermRow {
    #[tabled(rename = "Tenant")]
    tenant: String,
    #[tabled(rename = "Match Rule")]
    match_rule: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Regex")]
    regex: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&ManagedObject> for TermRow {
    fn from(mo: &ManagedObject) -> Self {
        let (tenant, match_rule) = split_dn(mo.dn().unwrap_or_default());
        Self {
            tenant,
            match_rule,
            name: mo.name().unwrap_or_default().to_owned(),
            regex: mo.attribute("regex").unwrap_or_default().to_owned(),
            description: mo.attribute("descr").unwrap_or_default().to_owned(),
        }
    }
}

/// Pull tenant and match-rule names out of a term DN,
/// e.g. `uni/tn-prod/subj-rules/aspathrxtrm-t1` -> ("prod", "rules").
fn split_dn(dn: &str) -> (String, String) {
    let mut tenant = String::new();
    let mut match_rule = String::new();
    for fragment in dn.split('/') {
        if let Some(name) = fragment.strip_prefix("tn-") {
            tenant = name.to_owned();
        } else if let Some(name) = fragment.strip_prefix("subj-") {
            match_rule = name.to_owned();
        }
    }
    (tenant, match_rule)
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a reconciliation outcome in the chosen format.
pub fn render_outcome(format: &OutputFormat, outcome: &TaskOutcome) -> String {
    match format {
        OutputFormat::Table => render_table(outcome),
        OutputFormat::Json => render_json(outcome, false),
        OutputFormat::JsonCompact => render_json(outcome, true),
        OutputFormat::Yaml => render_yaml(outcome),
        OutputFormat::Plain => outcome
            .current
            .iter()
            .filter_map(ManagedObject::dn)
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn render_table(outcome: &TaskOutcome) -> String {
    let status = if outcome.changed {
        format!("{}", "changed".yellow())
    } else {
        format!("{}", "unchanged".green())
    };

    if outcome.current.is_empty() && outcome.proposed.is_none() {
        return format!("Status: {status}\n(no matching objects)");
    }

    let rows: Vec<TermRow> = outcome.current.iter().map(TermRow::from).collect();
    if rows.is_empty() {
        return format!("Status: {status}");
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("Status: {status}\n{table}")
}

fn render_json(outcome: &TaskOutcome, compact: bool) -> String {
    let result = if compact {
        serde_json::to_string(outcome)
    } else {
        serde_json::to_string_pretty(outcome)
    };
    result.unwrap_or_else(|e| format!("{{\"error\": \"serialization failed: {e}\"}}"))
}

fn render_yaml(outcome: &TaskOutcome) -> String {
    serde_yaml::to_string(outcome).unwrap_or_else(|e| format!("error: serialization failed: {e}"))
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    println!("{output}");
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use apic_api::models::Attributes;

    use super::*;

    fn term(dn: &str, name: &str, regex: &str) -> ManagedObject {
        let mut attributes = Attributes::new();
        attributes.insert("dn".to_owned(), dn.to_owned());
        attributes.insert("name".to_owned(), name.to_owned());
        attributes.insert("regex".to_owned(), regex.to_owned());
        ManagedObject::new("rtctrlMatchAsPathRegexTerm", attributes)
    }

    #[test]
    fn split_dn_extracts_hierarchy_names() {
        let (tenant, rule) = split_dn("uni/tn-prod/subj-rules/aspathrxtrm-t1");
        assert_eq!(tenant, "prod");
        assert_eq!(rule, "rules");
    }

    #[test]
    fn plain_output_emits_one_dn_per_line() {
        let outcome = TaskOutcome::queried(vec![
            term("uni/tn-a/subj-r/aspathrxtrm-t1", "t1", ".*"),
            term("uni/tn-b/subj-r/aspathrxtrm-t2", "t2", ".*"),
        ]);
        let rendered = render_outcome(&OutputFormat::Plain, &outcome);
        assert_eq!(
            rendered,
            "uni/tn-a/subj-r/aspathrxtrm-t1\nuni/tn-b/subj-r/aspathrxtrm-t2"
        );
    }

    #[test]
    fn json_output_uses_wire_record_shape() {
        let outcome = TaskOutcome::queried(vec![term("uni/tn-a/subj-r/aspathrxtrm-t1", "t1", ".*")]);
        let rendered = render_outcome(&OutputFormat::JsonCompact, &outcome);
        assert!(rendered.contains("\"rtctrlMatchAsPathRegexTerm\":{\"attributes\""));
        assert!(rendered.contains("\"changed\":false"));
    }
}

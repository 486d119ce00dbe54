//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use kinship_domain::{FamilyEdge, Member, MemberId};
use kinship_inference::InferenceReport;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format members output.
    pub fn format_members(&self, members: &[Member]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json: Vec<serde_json::Value> = members.iter().map(member_json).collect();
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Table => Ok(self.format_members_table(members)),
            OutputFormat::Quiet => {
                let ids: Vec<String> = members.iter().map(|m| m.id.to_string()).collect();
                Ok(ids.join("\n"))
            }
        }
    }

    /// Format a single member.
    pub fn format_member(&self, member: &Member) -> Result<String> {
        self.format_members(std::slice::from_ref(member))
    }

    fn format_members_table(&self, members: &[Member]) -> String {
        if members.is_empty() {
            return self.colorize("No members found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Name", "Sex"]);
        for member in members {
            builder.push_record([
                member.id.to_string(),
                member.name.clone(),
                member.sex.map(|s| s.as_str()).unwrap_or("-").to_string(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Format a member's family edges.
    pub fn format_edges(&self, edges: &[FamilyEdge]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json: Vec<serde_json::Value> = edges
                    .iter()
                    .map(|e| {
                        serde_json::json!({
                            "subject_id": e.subject_id.to_string(),
                            "relation": e.label.as_str(),
                            "related_name": e.related_name,
                            "linked_member_id": e.linked_member_id.map(|id| id.to_string()),
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Table => Ok(self.format_edges_table(edges)),
            OutputFormat::Quiet => {
                let ids: Vec<String> = edges
                    .iter()
                    .filter_map(|e| e.linked_member_id)
                    .map(|id| id.to_string())
                    .collect();
                Ok(ids.join("\n"))
            }
        }
    }

    fn format_edges_table(&self, edges: &[FamilyEdge]) -> String {
        if edges.is_empty() {
            return self.colorize("No family edges found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Relation", "Name", "Member"]);
        for edge in edges {
            let linked = match edge.linked_member_id {
                Some(id) => id.to_string(),
                None => "-".to_string(),
            };
            builder.push_record([edge.label.as_str().to_string(), edge.related_name.clone(), linked]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Format an inference report.
    pub fn format_report(&self, report: &InferenceReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let created: serde_json::Map<String, serde_json::Value> = report
                    .created
                    .iter()
                    .map(|(rule, count)| (rule.as_str().to_string(), serde_json::json!(count)))
                    .collect();
                let json = serde_json::json!({
                    "subject": report.subject.to_string(),
                    "created": created,
                    "total_created": report.total_created(),
                    "already_linked": report.already_linked,
                    "missing_member": report.missing_member,
                    "self_links": report.self_links,
                });
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Table => {
                if report.is_noop() {
                    Ok(self.info("No new relations inferred"))
                } else {
                    Ok(format!(
                        "{}\n{}",
                        self.success(&format!("Inferred {} relation(s)", report.total_created())),
                        report.summary()
                    ))
                }
            }
            OutputFormat::Quiet => Ok(report.total_created().to_string()),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Format member creation result.
    pub fn member_added(&self, id: &MemberId) -> String {
        match self.format {
            OutputFormat::Quiet => id.to_string(),
            _ => self.success(&format!("Member added: {}", id)),
        }
    }

    /// Format bulk operation result.
    pub fn bulk_result(&self, operation: &str, count: usize) -> String {
        self.success(&format!("{} {} edge(s)", operation, count))
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn member_json(member: &Member) -> serde_json::Value {
    serde_json::json!({
        "id": member.id.to_string(),
        "name": member.name,
        "sex": member.sex.map(|s| s.as_str()),
    })
}

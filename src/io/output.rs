use crate::core::{Element, ElementId, ElementIndex};
use crate::corridor::Corridor;
use crate::pipeline::{AggregationResult, AggregationSummary, ExcludedElement};
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Terminal,
}

pub trait OutputWriter {
    fn write_results(&mut self, result: &AggregationResult, elements: &[Element])
        -> anyhow::Result<()>;
}

pub fn create_writer<'w, W: Write + 'w>(
    format: OutputFormat,
    writer: W,
) -> Box<dyn OutputWriter + 'w> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
    }
}

/// JSON document for one run, with element indices resolved to ids.
#[derive(Debug, Serialize)]
pub struct AggregationReport<'a> {
    pub summary: AggregationSummary,
    pub corridors: &'a [Corridor],
    pub orphan_ids: Vec<&'a ElementId>,
    pub excluded: &'a [ExcludedElement],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_ids: Option<Vec<&'a ElementId>>,
    pub resolved_threshold: Option<f64>,
    pub params: &'a crate::pipeline::AggregationParams,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl<'a> AggregationReport<'a> {
    pub fn new(result: &'a AggregationResult, elements: &'a [Element]) -> Self {
        Self {
            summary: result.summary(),
            corridors: &result.corridors,
            orphan_ids: ids_of(elements, &result.orphans),
            excluded: &result.excluded,
            point_ids: result
                .all_points
                .as_deref()
                .map(|points| ids_of(elements, points)),
            resolved_threshold: result.resolved_threshold,
            params: &result.params,
            created_at: result.created_at,
        }
    }
}

fn ids_of<'a>(elements: &'a [Element], indices: &[ElementIndex]) -> Vec<&'a ElementId> {
    indices.iter().map(|&i| &elements[i].id).collect()
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_results(
        &mut self,
        result: &AggregationResult,
        elements: &[Element],
    ) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(&AggregationReport::new(result, elements))?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_header(&mut self, result: &AggregationResult) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "═══════════════════════════════════════════".cyan())?;
        writeln!(self.writer, "{}", "        CORRIDOR AGGREGATION REPORT".bold().cyan())?;
        writeln!(self.writer, "{}", "═══════════════════════════════════════════".cyan())?;
        writeln!(
            self.writer,
            "Generated: {}",
            result.created_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary(&mut self, summary: &AggregationSummary) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "Summary".bold())?;
        writeln!(self.writer, "───────────────────────────────────────────")?;
        writeln!(self.writer, "Corridors:        {}", summary.corridor_count)?;
        writeln!(
            self.writer,
            "Total length:     {:.0} m",
            summary.total_length_m
        )?;
        writeln!(
            self.writer,
            "Mean priority:    {}",
            format_optional(summary.mean_priority)
        )?;
        writeln!(
            self.writer,
            "Eligible:         {} ({} orphaned)",
            summary.eligible_count, summary.orphan_count
        )?;
        for (severity, count) in &summary.by_severity {
            writeln!(self.writer, "  {:<10} {}", colorize_severity(severity), count)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_corridors(&mut self, corridors: &[Corridor]) -> anyhow::Result<()> {
        if corridors.is_empty() {
            writeln!(self.writer, "{}", "No corridors met the floor.".yellow())?;
            return Ok(());
        }

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                "Corridor", "Members", "Length (m)", "Priority", "Type", "Severity",
            ]);

        for corridor in corridors {
            let (primary, severity) = corridor
                .classification
                .map(|c| (c.primary.as_str(), c.severity.as_str()))
                .unwrap_or(("-", "-"));
            table.add_row(vec![
                Cell::new(corridor.corridor_id.as_str()),
                Cell::new(corridor.member_count),
                Cell::new(format!("{:.1}", corridor.length_m)),
                Cell::new(format_optional(corridor.mean_priority())),
                Cell::new(primary),
                Cell::new(severity),
            ]);
        }
        writeln!(self.writer, "{table}")?;

        if let Some(plan) = corridors.first().and_then(|c| c.interventions.as_ref()) {
            writeln!(self.writer)?;
            writeln!(self.writer, "{}", "Top corridor interventions".bold())?;
            for intervention in &plan.interventions {
                writeln!(self.writer, "  • {}", intervention)?;
            }
            writeln!(self.writer, "  {}", plan.rationale.dimmed())?;
        }
        Ok(())
    }

    fn write_exclusions(
        &mut self,
        result: &AggregationResult,
        elements: &[Element],
    ) -> anyhow::Result<()> {
        if result.excluded.is_empty() {
            return Ok(());
        }
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "{} {} eligible elements had unusable geometry:",
            "warning:".yellow().bold(),
            result.excluded.len()
        )?;
        for excluded in &result.excluded {
            writeln!(
                self.writer,
                "  {} ({})",
                elements[excluded.index].id, excluded.reason
            )?;
        }
        Ok(())
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_results(
        &mut self,
        result: &AggregationResult,
        elements: &[Element],
    ) -> anyhow::Result<()> {
        self.write_header(result)?;
        self.write_summary(&result.summary())?;
        self.write_corridors(&result.corridors)?;
        self.write_exclusions(result, elements)?;
        Ok(())
    }
}

fn format_optional(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.3}", v))
}

fn colorize_severity(severity: &str) -> ColoredString {
    match severity {
        "critical" => severity.red().bold(),
        "high" => severity.yellow(),
        _ => severity.normal(),
    }
}

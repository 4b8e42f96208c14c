//! Output formatting for human and JSON modes
//!
//! Every CLI result can be rendered either as human-readable text or as
//! machine-parseable JSON. JSON output is the same data the HTTP API
//! returns.

use colored::Colorize;
use serde::Serialize;

use crate::api::{
    BatchDetailData, BatchesData, EventRecordedData, HerbsData, MapData, QrData, ReportData,
    RolesData, StatusData, TimelineData, VerifyData,
};
use crate::core::services::Verification;

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// A result that knows how to print itself for people
pub trait HumanRender {
    /// Format for a terminal
    fn to_human(&self) -> String;
}

/// Render a result based on output mode
pub fn render<T: Serialize + HumanRender>(value: &T, mode: OutputMode) {
    match mode {
        OutputMode::Human => print!("{}", value.to_human()),
        OutputMode::Json => {
            println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
        },
    }
}

fn verdict(v: &Verification) -> String {
    if v.valid {
        "VALID".green().bold().to_string()
    } else {
        "INVALID".red().bold().to_string()
    }
}

fn score(v: &Verification) -> String {
    let text = format!("{}/100", v.compliance_score);
    match v.compliance_score {
        90..=100 => text.green().to_string(),
        80..=89 => text.yellow().to_string(),
        _ => text.red().to_string(),
    }
}

const fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

impl HumanRender for StatusData {
    fn to_human(&self) -> String {
        let b = &self.batches;
        let mut out = format!("Batches: {} ({} active)\n", b.total, b.active());
        out.push_str(&format!(
            "  harvested {}  processing {}  tested {}  manufactured {}  packaged {}  distributed {}\n",
            b.harvested, b.processing, b.tested, b.manufactured, b.packaged, b.distributed
        ));
        out.push_str(&format!("Verified: {}\n", self.verified));
        out.push_str(&format!("Approved zones: {}\n", self.zones));
        out
    }
}

impl HumanRender for BatchesData {
    fn to_human(&self) -> String {
        if self.batches.is_empty() {
            return "No batches found.\n".to_string();
        }

        let mut out = String::from("Batches:\n\n");
        for b in &self.batches {
            let name = b.common_name.as_deref().unwrap_or(&b.species);
            out.push_str(&format!("  [{}] {}\n", b.status.to_string().to_uppercase(), b.id));
            out.push_str(&format!(
                "  {name}, {} {} harvested {}\n",
                b.total_quantity, b.unit, b.harvest_date
            ));
            out.push_str(&format!(
                "  {} event(s), score {}/100{}\n\n",
                b.events,
                b.compliance_score,
                if b.valid { "" } else { " (violations)" }
            ));
        }
        out
    }
}

impl HumanRender for BatchDetailData {
    fn to_human(&self) -> String {
        let b = &self.batch;
        let mut out = format!("Batch {}\n", b.id.bold());
        out.push_str(&format!("  Species:  {}\n", b.species));
        if let Some(herb) = &self.herb {
            out.push_str(&format!("  Family:   {}\n", herb.family));
        }
        out.push_str(&format!("  Harvest:  {}\n", b.harvest_date));
        out.push_str(&format!("  Quantity: {} {}\n", b.total_quantity, b.unit));
        out.push_str(&format!("  Status:   {}\n", b.status));
        out.push_str(&format!("  QR:       {}\n", b.qr_code));
        out.push_str(&format!("  Events:   {}\n", b.events.len()));
        out.push_str(&format!(
            "  Verdict:  {} ({})\n",
            verdict(&self.verification),
            score(&self.verification)
        ));
        for v in &self.verification.violations {
            out.push_str(&format!("    - {v}\n"));
        }
        out
    }
}

impl HumanRender for EventRecordedData {
    fn to_human(&self) -> String {
        format!(
            "Recorded {} event {} on {}\nStatus: {}\n",
            self.kind, self.event_id, self.batch_id, self.status
        )
    }
}

impl HumanRender for VerifyData {
    fn to_human(&self) -> String {
        let mut out = format!("Batch:  {}\n", self.batch_id);
        if let (Some(species), Some(status)) = (&self.species, self.status) {
            out.push_str(&format!("Herb:   {species}\nStatus: {status}\n"));
        }
        out.push_str(&format!("Result: {}\n", verdict(&self.verification)));
        out.push_str(&format!("Score:  {}\n", score(&self.verification)));
        if !self.verification.violations.is_empty() {
            out.push_str("\nViolations:\n");
            for v in &self.verification.violations {
                out.push_str(&format!("  - {v}\n"));
            }
        }
        out
    }
}

impl HumanRender for ReportData {
    fn to_human(&self) -> String {
        let r = &self.report;
        let mut out = format!("Compliance report for {}\n", r.batch_id);
        out.push_str(&format!("  Generated:         {} by {}\n", r.generated_at.to_rfc3339(), r.generated_by));
        out.push_str(&format!("  AYUSH compliant:   {}\n", yes_no(r.ayush_compliance)));
        out.push_str(&format!("  Organic certified: {}\n", yes_no(r.organic_certified)));
        out.push_str(&format!("  Fair trade:        {}\n", yes_no(r.fair_trade)));
        out.push_str(&format!("  Sustainability:    {}/100\n", r.sustainability_score));
        if !r.violations.is_empty() {
            out.push_str("  Violations:\n");
            for v in &r.violations {
                out.push_str(&format!("    - {v}\n"));
            }
        }
        out
    }
}

impl HumanRender for TimelineData {
    fn to_human(&self) -> String {
        if self.entries.is_empty() {
            return format!("No events recorded for {}.\n", self.batch_id);
        }

        let mut out = format!("Provenance of {}\n\n", self.batch_id);
        for e in &self.entries {
            out.push_str(&format!("  {}  {}\n", e.timestamp.format("%Y-%m-%d %H:%M"), e.title.bold()));
            for line in &e.details {
                out.push_str(&format!("                    {line}\n"));
            }
            out.push('\n');
        }
        out
    }
}

impl HumanRender for MapData {
    fn to_human(&self) -> String {
        let mut out = format!("Harvest locations for {}\n", self.batch_id);
        out.push_str(&format!("  Center: {}\n", self.map.center));
        if self.map.points.is_empty() {
            out.push_str("  No collection events.\n");
        }
        for p in &self.map.points {
            out.push_str(&format!("  - {} ({}) by {}\n", p.location_name, p.point, p.collector_name));
            if let (Some(zone), Some(meters)) = (&p.nearest_zone, p.zone_distance_m) {
                let placement = if p.inside_zone { "inside".green() } else { "outside".red() };
                out.push_str(&format!("    {placement} {zone} ({:.1} km from center)\n", meters / 1000.0));
            }
        }
        out
    }
}

impl HumanRender for QrData {
    fn to_human(&self) -> String {
        format!("{}\n", self.payload)
    }
}

impl HumanRender for HerbsData {
    fn to_human(&self) -> String {
        let mut out = String::new();
        for h in &self.herbs {
            out.push_str(&format!("{} ({})\n", h.common_name.bold(), h.scientific_name));
            out.push_str(&format!("  Family: {}\n", h.family));
            out.push_str(&format!("  {}\n", h.description));
            out.push_str(&format!("  Dosage: {}\n\n", h.dosage));
        }
        out
    }
}

impl HumanRender for RolesData {
    fn to_human(&self) -> String {
        let mut out = String::new();
        for r in &self.roles {
            out.push_str(&format!("{} ({})\n", r.title.bold(), r.role));
            if r.read_only {
                out.push_str("  read-only\n");
            } else {
                out.push_str(&format!("  records: {}\n", r.records.join(", ")));
            }
            if r.can_create_batch {
                out.push_str("  may create batches\n");
            }
        }
        out
    }
}

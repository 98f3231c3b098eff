//! CLI presentation: text and JSON renderers for listings, traversal
//! reports, and generation summaries. The engines only surface node kinds;
//! label text lives here.

use crate::generate::GenerationSpec;
use crate::store::{Node, NodeKind};
use crate::traverse::{ListEntry, TraverseReport};
use serde::Serialize;
use std::path::Path;
use std::time::Duration;

fn kind_label(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Container => "Container",
        NodeKind::Stream => "Stream",
        NodeKind::Lockbytes => "Lockbytes",
        NodeKind::Property => "Property",
    }
}

fn indent(levels: usize) -> String {
    "    ".repeat(levels)
}

/// Render a one-level listing as indented text.
pub fn format_listing(
    path: &Path,
    open_time: Duration,
    root: &Node,
    entries: &[ListEntry],
) -> String {
    let mut lines = Vec::with_capacity(entries.len() + 2);
    lines.push(format!(
        "Opened \"{}\" in {:.3}s",
        path.display(),
        open_time.as_secs_f64()
    ));
    lines.push(format!(
        "{} \"{}\" has {} elements",
        kind_label(root.kind),
        root.name,
        entries.len()
    ));

    for entry in entries {
        let pad = indent(entry.indent);
        match entry.node.kind {
            NodeKind::Container => match entry.child_count {
                Some(count) => lines.push(format!(
                    "{}{} {} has {} elements",
                    pad,
                    kind_label(entry.node.kind),
                    entry.node.name,
                    count
                )),
                None => lines.push(format!(
                    "{}{} {} has [unknown] elements",
                    pad,
                    kind_label(entry.node.kind),
                    entry.node.name
                )),
            },
            NodeKind::Stream => lines.push(format!(
                "{}{} {} size: {}",
                pad,
                kind_label(entry.node.kind),
                entry.node.name,
                entry.node.size
            )),
            _ => lines.push(format!(
                "{}{} {}",
                pad,
                kind_label(entry.node.kind),
                entry.node.name
            )),
        }
    }
    lines.join("\n")
}

#[derive(Serialize)]
struct ChildView {
    name: String,
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    elements: Option<u64>,
}

#[derive(Serialize)]
struct ListingView {
    path: String,
    open_seconds: f64,
    root: ChildView,
    children: Vec<ChildView>,
}

/// Render a one-level listing as JSON.
pub fn format_listing_json(
    path: &Path,
    open_time: Duration,
    root: &Node,
    entries: &[ListEntry],
) -> String {
    let view = ListingView {
        path: path.display().to_string(),
        open_seconds: open_time.as_secs_f64(),
        root: ChildView {
            name: root.name.clone(),
            kind: kind_label(root.kind),
            size: None,
            elements: Some(entries.len() as u64),
        },
        children: entries
            .iter()
            .map(|entry| ChildView {
                name: entry.node.name.clone(),
                kind: kind_label(entry.node.kind),
                size: match entry.node.kind {
                    NodeKind::Stream => Some(entry.node.size),
                    _ => None,
                },
                elements: entry.child_count,
            })
            .collect(),
    };
    serde_json::to_string_pretty(&view).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

/// Render a traversal report in the summary-block form.
pub fn format_report(path: &Path, report: &TraverseReport) -> String {
    let status = match &report.failure {
        None => "SUCCESS".to_string(),
        Some(e) => format!("FAILED - {}", e),
    };
    [
        format!("Traverse status for {}  {}", path.display(), status),
        "Total counts".to_string(),
        format!("Containers:   {}", report.containers),
        format!("Streams:      {}", report.streams),
        format!("Stream bytes: {}", report.stream_bytes),
        format!("Lockbytes:    {}", report.lockbytes),
        format!("Properties:   {}", report.properties),
    ]
    .join("\n")
}

#[derive(Serialize)]
struct ReportView {
    path: String,
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    containers: u64,
    streams: u64,
    stream_bytes: u64,
    lockbytes: u64,
    properties: u64,
}

/// Render a traversal report as JSON.
pub fn format_report_json(path: &Path, report: &TraverseReport) -> String {
    let view = ReportView {
        path: path.display().to_string(),
        success: report.succeeded(),
        error: report.failure.as_ref().map(|e| e.to_string()),
        containers: report.containers,
        streams: report.streams,
        stream_bytes: report.stream_bytes,
        lockbytes: report.lockbytes,
        properties: report.properties,
    };
    serde_json::to_string_pretty(&view).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

/// One-line summary of a completed generation run.
pub fn format_generation_summary(path: &Path, spec: &GenerationSpec) -> String {
    format!(
        "Generated {}: {} parts, {} containers, {} streams, {} stream bytes",
        path.display(),
        spec.part_count,
        spec.expected_containers(),
        spec.expected_streams(),
        spec.expected_stream_bytes()
    )
}

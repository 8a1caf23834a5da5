// src/graph/normalize.rs
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use tracing::{debug, instrument, trace};

use super::{
    classify::{classify, columns, BenefitRow, Entity, LineRow, StationRow},
    diagnostics::{Diagnostic, Diagnostics},
    model::{Benefit, Graph, Line, Station, StationSize},
};
use crate::tabular::FlatRecord;

static COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#(?:[0-9A-Fa-f]{3}|[0-9A-Fa-f]{6})$").expect("valid color regex"));

/// Build the graph from flat records. Anomalies are absorbed into the
/// output; see [`normalize_with_diagnostics`] to observe them.
pub fn normalize(records: &[FlatRecord]) -> Graph {
    normalize_with_diagnostics(records).0
}

/// Build the graph and report every anomaly absorbed along the way.
#[instrument(level = "debug", skip(records), fields(record_count = records.len()))]
pub fn normalize_with_diagnostics(records: &[FlatRecord]) -> (Graph, Diagnostics) {
    let mut diagnostics = Diagnostics::default();

    let mut line_rows = Vec::new();
    let mut station_rows = Vec::new();
    let mut benefit_rows = Vec::new();
    for record in records {
        match classify(record) {
            Some(Entity::Line(row)) => line_rows.push(row),
            Some(Entity::Station(row)) => station_rows.push(row),
            Some(Entity::Benefit(row)) => benefit_rows.push(row),
            None => {
                trace!(line = record.line(), "unclassified row");
                diagnostics.push(Diagnostic::Unclassified {
                    line: record.line(),
                });
            }
        }
    }
    debug!(
        lines = line_rows.len(),
        stations = station_rows.len(),
        benefits = benefit_rows.len(),
        "classified records"
    );

    // (a) lines, one-to-one
    let lines = build_lines(&line_rows, &mut diagnostics);
    let line_ids: HashSet<&str> = line_rows.iter().map(|r| r.id).collect();

    // (b) station id → benefits, insertion order kept per key
    let mut by_station: HashMap<&str, Vec<Benefit>> = HashMap::new();
    for row in &benefit_rows {
        let benefit = build_benefit(row, &mut diagnostics);
        by_station.entry(row.station_id).or_default().push(benefit);
    }

    // (c) stations, with their benefits attached
    let mut station_counts: HashMap<&str, usize> = HashMap::new();
    for row in &station_rows {
        *station_counts.entry(row.id).or_default() += 1;
    }

    let mut seen = HashSet::new();
    let mut stations = Vec::with_capacity(station_rows.len());
    for row in &station_rows {
        if !seen.insert(row.id) {
            diagnostics.push(Diagnostic::DuplicateStation {
                line: row.line,
                station_id: row.id.to_string(),
            });
        }
        let benefits = by_station.get(row.id).cloned().unwrap_or_default();
        stations.push(build_station(row, benefits, &line_ids, &mut diagnostics));
    }

    for row in &benefit_rows {
        match station_counts.get(row.station_id).copied().unwrap_or(0) {
            0 => diagnostics.push(Diagnostic::DanglingBenefit {
                line: row.line,
                benefit_id: row.id.to_string(),
                station_id: row.station_id.to_string(),
            }),
            1 => {}
            matches => diagnostics.push(Diagnostic::AmbiguousBenefit {
                line: row.line,
                benefit_id: row.id.to_string(),
                station_id: row.station_id.to_string(),
                matches,
            }),
        }
    }

    diagnostics.sort_by_line();
    let graph = Graph { lines, stations };
    debug!(
        lines = graph.lines.len(),
        stations = graph.stations.len(),
        benefits = graph.benefit_count(),
        diagnostics = diagnostics.len(),
        "normalized"
    );
    (graph, diagnostics)
}

fn build_lines(rows: &[LineRow<'_>], diagnostics: &mut Diagnostics) -> Vec<Line> {
    let mut seen = HashSet::new();
    rows.iter()
        .map(|row| {
            if !seen.insert(row.id) {
                diagnostics.push(Diagnostic::DuplicateLine {
                    line: row.line,
                    line_id: row.id.to_string(),
                });
            }
            let color = row.color.unwrap_or_default();
            if !COLOR.is_match(color.trim()) {
                diagnostics.push(Diagnostic::InvalidColor {
                    line: row.line,
                    line_id: row.id.to_string(),
                    color: color.to_string(),
                });
            }
            Line {
                id: row.id.to_string(),
                name: row.name.to_string(),
                color: color.to_string(),
            }
        })
        .collect()
}

fn build_benefit(row: &BenefitRow<'_>, diagnostics: &mut Diagnostics) -> Benefit {
    Benefit {
        id: row.id.to_string(),
        name: row.name.unwrap_or_default().to_string(),
        impact: parse_int(row.line, columns::IMPACT, row.impact, diagnostics),
    }
}

fn build_station(
    row: &StationRow<'_>,
    benefits: Vec<Benefit>,
    line_ids: &HashSet<&str>,
    diagnostics: &mut Diagnostics,
) -> Station {
    let line_id = row.line_id.unwrap_or_default();
    if !line_ids.contains(line_id) {
        diagnostics.push(Diagnostic::UnknownLine {
            line: row.line,
            station_id: row.id.to_string(),
            line_id: line_id.to_string(),
        });
    }

    Station {
        id: row.id.to_string(),
        name: row.name.to_string(),
        line_id: line_id.to_string(),
        x: parse_int(row.line, columns::X, row.x, diagnostics),
        y: parse_int(row.line, columns::Y, row.y, diagnostics),
        size: row.size.map(StationSize::from_wire).unwrap_or_default(),
        is_milestone: row.milestone == Some("TRUE"),
        benefits,
    }
}

/// Integer field, or `None` plus a diagnostic when missing or malformed.
fn parse_int(
    line: usize,
    column: &str,
    value: Option<&str>,
    diagnostics: &mut Diagnostics,
) -> Option<i64> {
    let raw = value.unwrap_or_default();
    match raw.trim().parse::<i64>() {
        Ok(n) => Some(n),
        Err(_) => {
            trace!(line, column, value = raw, "not an integer");
            diagnostics.push(Diagnostic::InvalidNumber {
                line,
                column: column.to_string(),
                value: raw.to_string(),
            });
            None
        }
    }
}

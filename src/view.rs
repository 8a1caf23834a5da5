// src/view.rs
//! Renderer-facing shapes derived from a [`Graph`]. Nothing here draws; these
//! are the values a path/node renderer and a bubble chart consume.

use serde::Serialize;

use crate::graph::{Benefit, Graph, Station};

/// d3 `schemeCategory10`.
pub const PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

const LARGE_RADIUS: u32 = 15;
const DEFAULT_RADIUS: u32 = 10;
const RING_GAP: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinePath {
    pub line_id: String,
    pub color: String,
    /// Station coordinates in station order.
    pub points: Vec<(i64, i64)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StationMarker {
    pub radius: u32,
    /// Outer milestone ring, if any.
    pub ring_radius: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BubbleNode {
    pub id: String,
    pub name: String,
    pub value: Option<i64>,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BubbleChart {
    pub title: String,
    pub nodes: Vec<BubbleNode>,
}

/// One path per line, in line order. Stations without a usable position
/// are left out of the path.
pub fn line_paths(graph: &Graph) -> Vec<LinePath> {
    graph
        .lines
        .iter()
        .map(|line| LinePath {
            line_id: line.id.clone(),
            color: line.color.clone(),
            points: graph
                .stations_on_line(&line.id)
                .filter_map(Station::position)
                .collect(),
        })
        .collect()
}

pub fn station_marker(station: &Station) -> StationMarker {
    let radius = if station.size.is_large() {
        LARGE_RADIUS
    } else {
        DEFAULT_RADIUS
    };
    StationMarker {
        radius,
        ring_radius: station.is_milestone.then_some(radius + RING_GAP),
    }
}

/// Bubble chart for the selected station, or `None` if the id is unknown.
pub fn benefit_bubbles(graph: &Graph, station_id: &str) -> Option<BubbleChart> {
    let station = graph.station(station_id)?;
    Some(BubbleChart {
        title: format!("{} Benefits", station.name),
        nodes: station
            .benefits
            .iter()
            .enumerate()
            .map(|(i, b)| BubbleNode {
                id: b.id.clone(),
                name: b.name.clone(),
                value: b.impact,
                color: PALETTE[i % PALETTE.len()],
            })
            .collect(),
    })
}

/// What to show for a selected station: its benefit list, or its bubble
/// chart. An unknown station selects an empty list either way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Selection<'a> {
    Benefits(&'a [Benefit]),
    Bubbles(BubbleChart),
}

pub fn select<'a>(graph: &'a Graph, station_id: &str, bubbles: bool) -> Selection<'a> {
    match benefit_bubbles(graph, station_id) {
        Some(chart) if bubbles => Selection::Bubbles(chart),
        _ => Selection::Benefits(graph.benefits_for(station_id)),
    }
}

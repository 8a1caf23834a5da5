// src/graph/classify.rs
//! Decide once, per flat record, which entity it describes.

use crate::tabular::FlatRecord;

/// Exact column names of the three tables.
pub mod columns {
    pub const LINE_ID: &str = "Line ID";
    pub const LINE_NAME: &str = "Line Name";
    pub const LINE_COLOR: &str = "Line Color";

    pub const STATION_ID: &str = "Station ID";
    pub const STATION_NAME: &str = "Station Name";
    pub const X: &str = "X";
    pub const Y: &str = "Y";
    pub const SIZE: &str = "Size";
    pub const MILESTONE: &str = "Milestone";

    pub const BENEFIT_ID: &str = "Benefit ID";
    pub const BENEFIT_NAME: &str = "Benefit Name";
    pub const IMPACT: &str = "Impact";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRow<'a> {
    pub line: usize,
    pub id: &'a str,
    pub name: &'a str,
    pub color: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StationRow<'a> {
    pub line: usize,
    pub id: &'a str,
    pub name: &'a str,
    pub line_id: Option<&'a str>,
    pub x: Option<&'a str>,
    pub y: Option<&'a str>,
    pub size: Option<&'a str>,
    pub milestone: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenefitRow<'a> {
    pub line: usize,
    pub id: &'a str,
    pub station_id: &'a str,
    pub name: Option<&'a str>,
    pub impact: Option<&'a str>,
}

/// A flat record tagged with the entity it represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity<'a> {
    Line(LineRow<'a>),
    Station(StationRow<'a>),
    Benefit(BenefitRow<'a>),
}

/// Classify `record`, checking Benefit, then Station, then Line; first
/// match wins. A benefit row also carries `Station ID`, so it has to be
/// tested before the station predicate.
pub fn classify(record: &FlatRecord) -> Option<Entity<'_>> {
    use columns::*;
    let line = record.line();

    if let (Some(id), Some(station_id)) = (
        record.get_non_empty(BENEFIT_ID),
        record.get_non_empty(STATION_ID),
    ) {
        return Some(Entity::Benefit(BenefitRow {
            line,
            id,
            station_id,
            name: record.get(BENEFIT_NAME),
            impact: record.get(IMPACT),
        }));
    }

    if let (Some(id), Some(name)) = (
        record.get_non_empty(STATION_ID),
        record.get_non_empty(STATION_NAME),
    ) {
        return Some(Entity::Station(StationRow {
            line,
            id,
            name,
            line_id: record.get(LINE_ID),
            x: record.get(X),
            y: record.get(Y),
            size: record.get(SIZE),
            milestone: record.get(MILESTONE),
        }));
    }

    if let (Some(id), Some(name)) = (
        record.get_non_empty(LINE_ID),
        record.get_non_empty(LINE_NAME),
    ) {
        return Some(Entity::Line(LineRow {
            line,
            id,
            name,
            color: record.get(LINE_COLOR),
        }));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn benefit_wins_over_station() {
        let record = FlatRecord::from_pairs(
            4,
            [
                ("Benefit ID", "b1"),
                ("Station ID", "ms"),
                ("Station Name", "stray"),
                ("Benefit Name", "Scale"),
                ("Impact", "80"),
            ],
        );
        match classify(&record) {
            Some(Entity::Benefit(row)) => {
                assert_eq!(row.line, 4);
                assert_eq!(row.station_id, "ms");
                assert_eq!(row.impact, Some("80"));
            }
            other => panic!("expected benefit, got {:?}", other),
        }
    }

    #[test]
    fn station_row_is_not_a_line() {
        let record = FlatRecord::from_pairs(
            1,
            [
                ("Station ID", "ms"),
                ("Station Name", "Microservices"),
                ("Line ID", "app-mod"),
            ],
        );
        assert!(matches!(
            classify(&record),
            Some(Entity::Station(StationRow {
                line_id: Some("app-mod"),
                ..
            }))
        ));
    }

    #[test]
    fn line_row() {
        let record = FlatRecord::from_pairs(
            2,
            [("Line ID", "data"), ("Line Name", "Data"), ("Line Color", "#45B7D1")],
        );
        assert_eq!(
            classify(&record),
            Some(Entity::Line(LineRow {
                line: 2,
                id: "data",
                name: "Data",
                color: Some("#45B7D1"),
            }))
        );
    }

    #[test]
    fn empty_key_values_do_not_classify() {
        let record = FlatRecord::from_pairs(
            9,
            [("Benefit ID", ""), ("Station ID", "ms"), ("Station Name", "")],
        );
        assert_eq!(classify(&record), None);

        let record = FlatRecord::from_pairs(9, [("Lnie ID", "typo"), ("Line Name", "x")]);
        assert_eq!(classify(&record), None);
    }
}

// src/pipeline.rs
use anyhow::{bail, Context, Result};
use tracing::{info, instrument, warn};

use crate::{
    config::Config,
    graph::{normalize_with_diagnostics, Diagnostics, Graph},
    tabular::parse,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Fail the load if normalization reports anything.
    pub strict: bool,
}

impl From<&Config> for LoadOptions {
    fn from(config: &Config) -> Self {
        Self {
            strict: config.strict,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loaded {
    pub graph: Graph,
    pub diagnostics: Diagnostics,
}

/// Raw text → flat records → graph, in one pass.
///
/// Parse errors always abort. Normalization anomalies are logged and
/// returned alongside the graph, unless `strict` is set.
#[instrument(level = "info", skip(text, options), fields(text_len = text.len(), strict = options.strict))]
pub fn load(text: &str, options: &LoadOptions) -> Result<Loaded> {
    let records = parse(text).context("parsing tabular input")?;
    let (graph, diagnostics) = normalize_with_diagnostics(&records);

    for d in &diagnostics {
        warn!("{}", d);
    }

    if options.strict && !diagnostics.is_empty() {
        let listed: Vec<String> = diagnostics.iter().map(ToString::to_string).collect();
        bail!(
            "{} problem(s) in input:\n  {}",
            listed.len(),
            listed.join("\n  ")
        );
    }

    info!(
        lines = graph.lines.len(),
        stations = graph.stations.len(),
        benefits = graph.benefit_count(),
        "loaded graph"
    );
    Ok(Loaded { graph, diagnostics })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{fixture::SAMPLE_CSV, graph::StationSize, tabular::ParseError};

    fn load_sample() -> Result<Loaded> {
        load(SAMPLE_CSV, &LoadOptions::default())
    }

    #[test]
    fn sample_has_expected_shape() -> Result<()> {
        let Loaded { graph, diagnostics } = load_sample()?;
        assert!(diagnostics.is_empty(), "{:?}", diagnostics);

        let lines: Vec<&str> = graph.lines.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(lines, vec!["app-mod", "platform", "data"]);

        let counts: Vec<(&str, usize)> = graph
            .stations
            .iter()
            .map(|s| (s.id.as_str(), s.benefits.len()))
            .collect();
        assert_eq!(
            counts,
            vec![("ms", 2), ("12f", 1), ("k8s", 2), ("sm", 1), ("kafka", 2)]
        );
        assert_eq!(graph.benefit_count(), 8);
        Ok(())
    }

    #[test]
    fn sample_station_attributes() -> Result<()> {
        let graph = load_sample()?.graph;

        let ms = graph.station("ms").context("ms")?;
        assert!(ms.is_milestone);
        assert_eq!(ms.size, StationSize::Large);
        assert_eq!(ms.position(), Some((100, 100)));
        assert_eq!(ms.line_id, "app-mod");

        let twelve = graph.station("12f").context("12f")?;
        assert!(!twelve.is_milestone);
        assert_eq!(twelve.size, StationSize::Medium);

        let impacts: Vec<Option<i64>> = graph.benefits_for("kafka").iter().map(|b| b.impact).collect();
        assert_eq!(impacts, vec![Some(85), Some(70)]);
        Ok(())
    }

    #[test]
    fn interleaved_sections_keep_counts_and_order() -> Result<()> {
        let text = "\
Station ID,Station Name,Line ID,X,Y,Size,Milestone
s-a,Alpha,red,10,10,small,TRUE
s-b,Beta,blue,20,20,large,FALSE

Benefit ID,Station ID,Benefit Name,Impact
b-3,s-b,Three,3
b-1,s-a,One,1
b-4,s-c,Four,4
b-2,s-a,Two,2

Line ID,Line Name,Line Color
red,Red,#f00
blue,Blue,#00f

Station ID,Station Name,Line ID,X,Y,Size,Milestone
s-c,Gamma,red,30,30,medium,FALSE
s-d,Delta,blue,40,40,medium,FALSE

Benefit ID,Station ID,Benefit Name,Impact
b-5,s-a,Five,5
b-6,s-c,Six,6
b-7,s-b,Seven,7
";
        let Loaded { graph, diagnostics } = load(text, &LoadOptions { strict: true })?;
        assert!(diagnostics.is_empty(), "{:?}", diagnostics);

        assert_eq!(graph.lines.len(), 2);
        assert_eq!(graph.stations.len(), 4);
        assert_eq!(graph.benefit_count(), 7);

        let layout: Vec<(&str, Vec<&str>)> = graph
            .stations
            .iter()
            .map(|s| (s.id.as_str(), s.benefits.iter().map(|b| b.id.as_str()).collect()))
            .collect();
        assert_eq!(
            layout,
            vec![
                ("s-a", vec!["b-1", "b-2", "b-5"]),
                ("s-b", vec!["b-3", "b-7"]),
                ("s-c", vec!["b-4", "b-6"]),
                ("s-d", vec![]),
            ]
        );
        let on_blue: Vec<&str> = graph.stations_on_line("blue").map(|s| s.id.as_str()).collect();
        assert_eq!(on_blue, vec!["s-b", "s-d"]);
        Ok(())
    }

    #[test]
    fn crlf_diagnostics_point_at_source_lines() -> Result<()> {
        let text = SAMPLE_CSV
            .replace("sm,Service Mesh,platform,250,", "sm,Service Mesh,platform,abc,")
            .replace('\n', "\r\n");
        let diagnostics = load(&text, &LoadOptions::default())?.diagnostics;
        let lines: Vec<usize> = diagnostics.iter().map(|d| d.line()).collect();
        assert_eq!(lines, vec![10]);
        Ok(())
    }

    #[test]
    fn loading_twice_is_structurally_equal() -> Result<()> {
        assert_eq!(load_sample()?, load_sample()?);
        Ok(())
    }

    #[test]
    fn header_only_input_is_empty_graph() -> Result<()> {
        let loaded = load(
            "Station ID,Station Name,Line ID,X,Y,Size,Milestone\n",
            &LoadOptions::default(),
        )?;
        assert_eq!(loaded.graph, Graph::default());
        Ok(())
    }

    #[test]
    fn dangling_benefit_does_not_abort() -> Result<()> {
        let text = format!("{}b9,ghost,Haunting,1\n", SAMPLE_CSV);
        let loaded = load(&text, &LoadOptions::default())?;
        assert_eq!(loaded.graph.benefit_count(), 8);
        assert_eq!(loaded.diagnostics.len(), 1);
        Ok(())
    }

    #[test]
    fn bad_coordinate_keeps_station() -> Result<()> {
        let text = SAMPLE_CSV.replace("sm,Service Mesh,platform,250,", "sm,Service Mesh,platform,abc,");
        let graph = load(&text, &LoadOptions::default())?.graph;
        assert_eq!(graph.stations.len(), 5);
        let sm = graph.station("sm").context("sm")?;
        assert_eq!(sm.x, None);
        assert_eq!(sm.y, Some(200));
        assert_eq!(sm.benefits.len(), 1);
        Ok(())
    }

    #[test]
    fn strict_mode_rejects_anomalies() {
        let text = SAMPLE_CSV.replace("kafka,Kafka,data,", "kafka,Kafka,dta,");
        assert!(load(&text, &LoadOptions::default()).is_ok());

        let err = load(&text, &LoadOptions { strict: true }).unwrap_err();
        assert!(err.to_string().contains("unknown line `dta`"), "{}", err);
    }

    #[test]
    fn parse_error_surfaces_line_number() {
        let text = SAMPLE_CSV.replace("b4,k8s,Efficient", "b4,k8s,Eff\"icient");
        let err = load(&text, &LoadOptions::default()).unwrap_err();
        let parse_err = err.downcast_ref::<ParseError>().expect("parse error");
        assert_eq!(parse_err.line(), 17);
    }
}

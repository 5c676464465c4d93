//! Flattens the scanned history into chartable rows.

use std::collections::BTreeMap;

use itertools::Itertools;
use serde::Serialize;

use crate::prelude::*;
use crate::progression::scanner::{Observation, Progression};
use crate::progression::team::TeamKey;

/// How a point is drawn: record breaks get the special glyph.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Marker {
    Record,
    Regular,
}

/// One chartable value with its marker.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub time: f64,
    pub marker: Marker,
}

/// Row values in the two presentation modes. In the multi-team shape every
/// known team has an entry and all but the owning team's are explicit nulls,
/// so each team renders as its own line with gaps instead of interpolating
/// across unrelated teams' points.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum RowValues {
    WrOnly { run: Point },
    MultiTeam { teams: BTreeMap<TeamKey, Option<Point>> },
}

/// One materialized chart row — one (team, observation) pair.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Row {
    pub date: DateTime,
    pub team: TeamKey,

    #[serde(flatten)]
    pub values: RowValues,
}

/// Materializes the history into date-ordered rows, stable on equal dates.
/// Every observation yields exactly one row; nothing is merged or dropped.
pub fn materialize(progression: &Progression, wr_runs_only: bool) -> Vec<Row> {
    let known_teams = progression.history.keys().cloned().collect_vec();
    let mut observations = progression
        .history
        .iter()
        .flat_map(|(team, observations)| {
            observations.iter().map(move |observation| (team, observation))
        })
        .collect_vec();
    observations.sort_by_key(|(_, observation)| observation.date);

    observations
        .into_iter()
        .map(|(team, observation)| {
            let point = Point {
                time: observation.time,
                marker: marker(progression, team, observation),
            };
            let values = if wr_runs_only {
                RowValues::WrOnly { run: point }
            } else {
                RowValues::MultiTeam {
                    teams: known_teams
                        .iter()
                        .map(|key| (key.clone(), (key == team).then_some(point)))
                        .collect(),
                }
            };
            Row { date: observation.date, team: team.clone(), values }
        })
        .collect()
}

fn marker(progression: &Progression, team: &TeamKey, observation: &Observation) -> Marker {
    let is_break = progression
        .wr_breaks
        .get(team)
        .map_or(false, |dates| dates.contains(&observation.date));
    if is_break {
        Marker::Record
    } else {
        Marker::Regular
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn date(value: &str) -> DateTime {
        value.parse().unwrap()
    }

    fn observation(time: f64, value: &str) -> Observation {
        Observation { time, date: date(value) }
    }

    /// Two teams; `a` broke the record once, then stuck around as a
    /// near-record observation when `b` took over.
    fn fixture() -> Progression {
        Progression {
            history: BTreeMap::from([
                (
                    "a".to_string(),
                    vec![
                        observation(100.0, "2020-01-01T00:00:00Z"),
                        observation(100.0, "2020-02-01T00:00:00Z"),
                    ],
                ),
                ("b".to_string(), vec![observation(90.0, "2020-02-01T00:00:00Z")]),
            ]),
            wr_breaks: BTreeMap::from([
                ("a".to_string(), BTreeSet::from([date("2020-01-01T00:00:00Z")])),
                ("b".to_string(), BTreeSet::from([date("2020-02-01T00:00:00Z")])),
            ]),
        }
    }

    #[test]
    fn row_count_equals_observation_count_ok() {
        let progression = fixture();
        let rows = materialize(&progression, false);
        assert_eq!(rows.len(), progression.observation_count());
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn rows_are_date_ordered_and_stable_ok() {
        let rows = materialize(&fixture(), false);
        assert_eq!(rows[0].date, date("2020-01-01T00:00:00Z"));
        assert_eq!(rows[1].date, date("2020-02-01T00:00:00Z"));
        assert_eq!(rows[2].date, date("2020-02-01T00:00:00Z"));
        // Equal dates keep the history's key order: a before b.
        assert_eq!(rows[1].team, "a");
        assert_eq!(rows[2].team, "b");
    }

    #[test]
    fn multi_team_rows_have_exactly_one_value_ok() {
        let rows = materialize(&fixture(), false);
        for row in &rows {
            match &row.values {
                RowValues::MultiTeam { teams } => {
                    assert_eq!(teams.len(), 2, "every known team gets a field");
                    let filled =
                        teams.values().filter(|point| point.is_some()).count();
                    assert_eq!(filled, 1);
                    assert!(teams[&row.team].is_some());
                }
                RowValues::WrOnly { .. } => panic!("expected multi-team rows"),
            }
        }
    }

    #[test]
    fn markers_distinguish_breaks_ok() {
        let rows = materialize(&fixture(), false);
        let marker_of = |index: usize| match &rows[index].values {
            RowValues::MultiTeam { teams } => teams[&rows[index].team].unwrap().marker,
            RowValues::WrOnly { run } => run.marker,
        };
        // a's record-setting run, a's later near-record appearance, b's break.
        assert_eq!(marker_of(0), Marker::Record);
        assert_eq!(marker_of(1), Marker::Regular);
        assert_eq!(marker_of(2), Marker::Record);
    }

    #[test]
    fn wr_only_rows_ok() {
        let progression = Progression {
            history: BTreeMap::from([(
                "a".to_string(),
                vec![observation(100.0, "2020-01-01T00:00:00Z")],
            )]),
            wr_breaks: BTreeMap::from([(
                "a".to_string(),
                BTreeSet::from([date("2020-01-01T00:00:00Z")]),
            )]),
        };
        let rows = materialize(&progression, true);
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0].values,
            RowValues::WrOnly { run: Point { time: 100.0, marker: Marker::Record } },
        );
    }

    #[test]
    fn rows_serialize_with_explicit_nulls_ok() -> Result {
        let rows = materialize(&fixture(), false);
        let value = serde_json::to_value(&rows[0])?;
        assert_eq!(value["kind"], "multi-team");
        assert_eq!(value["team"], "a");
        assert_eq!(value["teams"]["a"]["time"], 100.0);
        assert_eq!(value["teams"]["a"]["marker"], "record");
        // The other team's field is present and explicitly null.
        assert!(value["teams"].as_object().context("expected a map")?.contains_key("b"));
        assert!(value["teams"]["b"].is_null());
        Ok(())
    }
}

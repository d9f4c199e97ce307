//! Partition raw rows into per-mass evolutionary tracks.

use std::collections::BTreeMap;

use crate::domain::{EvolutionaryTrack, Mass, RawSample, TrackSample};
use crate::error::GridError;

/// Tracks keyed by exact mass, iterated in ascending mass order.
#[derive(Debug, Clone)]
pub struct GroupedTracks {
    pub tracks: BTreeMap<Mass, EvolutionaryTrack>,
    /// Rows discarded for a zero or non-finite age (or non-finite L/Teff).
    pub dropped_rows: usize,
}

impl GroupedTracks {
    pub fn masses(&self) -> Vec<f64> {
        self.tracks.keys().map(|m| m.value()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EvolutionaryTrack> {
        self.tracks.values()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

/// Group rows by mass, drop inapplicable rows, and sort each group by age.
///
/// A zero `log(t)` is the source format's marker for an inapplicable entry.
pub fn group_tracks(rows: &[RawSample]) -> Result<GroupedTracks, GridError> {
    let mut groups: BTreeMap<Mass, Vec<TrackSample>> = BTreeMap::new();
    let mut dropped_rows = 0usize;

    for row in rows {
        let samples = groups.entry(Mass(row.mass)).or_default();
        if !is_usable(row) {
            dropped_rows += 1;
            continue;
        }
        samples.push(TrackSample {
            log_age: row.log_age,
            log_luminosity: row.log_luminosity,
            log_teff: row.log_teff,
        });
    }

    if dropped_rows > 0 {
        tracing::warn!(dropped_rows, "dropped rows with zero or invalid age");
    }

    let mut tracks = BTreeMap::new();
    for (mass, mut samples) in groups {
        if samples.is_empty() {
            return Err(GridError::EmptyTrack { mass: mass.value() });
        }
        samples.sort_by(|a, b| a.log_age.total_cmp(&b.log_age));
        let track = EvolutionaryTrack::new(mass.value(), samples)?;
        tracing::debug!(mass = track.mass(), samples = track.len(), "grouped track");
        tracks.insert(mass, track);
    }

    Ok(GroupedTracks { tracks, dropped_rows })
}

fn is_usable(row: &RawSample) -> bool {
    row.log_age != 0.0 && row.log_age.is_finite() && row.log_luminosity.is_finite() && row.log_teff.is_finite()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(log_age: f64, mass: f64) -> RawSample {
        RawSample {
            log_age,
            mass,
            log_teff: 4.0 - 0.1 * log_age,
            log_luminosity: -0.5 * log_age,
        }
    }

    #[test]
    fn groups_by_mass_in_ascending_order_with_sorted_ages() {
        let rows = vec![
            row(7.5, 1.1),
            row(6.5, 0.87),
            row(6.5, 1.1),
            row(7.0, 0.87),
            row(6.0, 1.1),
        ];
        let grouped = group_tracks(&rows).unwrap();

        assert_eq!(grouped.masses(), vec![0.87, 1.1]);
        let ages: Vec<Vec<f64>> = grouped
            .iter()
            .map(|t| t.samples().iter().map(|s| s.log_age).collect())
            .collect();
        assert_eq!(ages, vec![vec![6.5, 7.0], vec![6.0, 6.5, 7.5]]);
        assert_eq!(grouped.dropped_rows, 0);
    }

    #[test]
    fn zero_age_rows_are_dropped() {
        let rows = vec![row(0.0, 1.0), row(6.2, 1.0), row(f64::NAN, 1.0), row(6.4, 1.0)];
        let grouped = group_tracks(&rows).unwrap();
        assert_eq!(grouped.dropped_rows, 2);
        assert_eq!(grouped.tracks[&Mass(1.0)].len(), 2);
    }

    #[test]
    fn group_with_only_zero_ages_is_empty_track() {
        let rows = vec![row(6.2, 1.0), row(0.0, 0.87), row(0.0, 0.87)];
        let err = group_tracks(&rows).unwrap_err();
        assert!(matches!(err, GridError::EmptyTrack { mass } if mass == 0.87));
    }

    #[test]
    fn duplicate_ages_are_reported_not_repaired() {
        let rows = vec![row(6.2, 1.0), row(6.2, 1.0)];
        let err = group_tracks(&rows).unwrap_err();
        assert!(matches!(err, GridError::NonMonotonicAge { mass, .. } if mass == 1.0));
    }
}

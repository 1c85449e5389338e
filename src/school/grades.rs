//! Grade statistics for a list of notes.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::types::{Note, NoteKind};

/// Coefficient-weighted mean of the note values.
///
/// Returns `0.0` when there are no notes or the coefficients sum to zero.
pub fn weighted_average(notes: &[Note]) -> f64 {
    let total_coefficients: f64 = notes.iter().map(|n| n.coefficient).sum();
    if total_coefficients <= 0.0 {
        return 0.0;
    }

    let total_points: f64 = notes.iter().map(|n| n.value * n.coefficient).sum();
    total_points / total_coefficients
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq)]
pub struct NoteStats {
    pub average: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

/// Average, lowest and highest value. All zero for an empty list.
pub fn note_stats(notes: &[Note]) -> NoteStats {
    if notes.is_empty() {
        return NoteStats {
            average: 0.0,
            min: 0.0,
            max: 0.0,
            count: 0,
        };
    }

    let values = notes.iter().map(|n| n.value);
    NoteStats {
        average: weighted_average(notes),
        min: values.clone().fold(f64::INFINITY, f64::min),
        max: values.fold(f64::NEG_INFINITY, f64::max),
        count: notes.len(),
    }
}

/// Notes of one kind, or all of them.
pub fn filter_notes(notes: &[Note], kind: Option<NoteKind>) -> Vec<Note> {
    notes
        .iter()
        .filter(|n| kind.is_none_or(|k| n.kind == k))
        .cloned()
        .collect()
}

/// Band a value out of 20 falls into.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GradeBand {
    Excellent,
    Good,
    Fair,
    Weak,
}

impl GradeBand {
    pub fn for_value(value: f64) -> Self {
        if value >= 16.0 {
            GradeBand::Excellent
        } else if value >= 14.0 {
            GradeBand::Good
        } else if value >= 12.0 {
            GradeBand::Fair
        } else {
            GradeBand::Weak
        }
    }
}

/// `15.5/20` style rendering, one decimal.
pub fn format_grade(value: f64) -> String {
    format!("{:.1}/20", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::fixtures;

    #[test]
    fn test_weighted_average_of_demo_notes() {
        let notes = fixtures::notes("1");
        let average = weighted_average(&notes);

        assert!((average - 217.0 / 14.0).abs() < 1e-9);
        assert_eq!(format_grade(average), "15.5/20");
    }

    #[test]
    fn test_weighted_average_degenerate_inputs() {
        assert_eq!(weighted_average(&[]), 0.0);

        let mut notes = fixtures::notes("1");
        for note in &mut notes {
            note.coefficient = 0.0;
        }
        assert_eq!(weighted_average(&notes), 0.0);
    }

    #[test]
    fn test_note_stats() {
        let stats = note_stats(&fixtures::notes("1"));

        assert_eq!(stats.min, 12.0);
        assert_eq!(stats.max, 18.0);
        assert_eq!(stats.count, 5);
        assert_eq!(note_stats(&[]).average, 0.0);
    }

    #[test]
    fn test_filter_notes_by_kind() {
        let notes = fixtures::notes("1");

        assert_eq!(filter_notes(&notes, None).len(), 5);
        assert_eq!(filter_notes(&notes, Some(NoteKind::Examen)).len(), 2);
        assert_eq!(filter_notes(&notes, Some(NoteKind::Tp)).len(), 1);
    }

    #[test]
    fn test_grade_bands() {
        assert_eq!(GradeBand::for_value(16.0), GradeBand::Excellent);
        assert_eq!(GradeBand::for_value(15.9), GradeBand::Good);
        assert_eq!(GradeBand::for_value(12.0), GradeBand::Fair);
        assert_eq!(GradeBand::for_value(11.99), GradeBand::Weak);
    }
}

//! The codename grid - five codenames, five weapons, five positions.
//!
//! The player works the clues out on their own and submits a full grid. The
//! verifier only compares the submission against the fixed solution; it never
//! evaluates clues and never reports which cells are wrong.

mod confirmation;

pub use confirmation::*;

use serde::{Deserialize, Serialize};

/// Number of positions (and of codenames and weapons).
pub const GRID_SIZE: usize = 5;

/// One row of the grid: the codename and weapon chosen for a position.
///
/// Either field may be left unselected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    pub label: Option<String>,
    pub item: Option<String>,
}

impl Assignment {
    /// A fully selected row.
    pub fn new(label: impl Into<String>, item: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            item: Some(item.into()),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.label.is_some() && self.item.is_some()
    }
}

/// A submitted grid, positions 1 through [`GRID_SIZE`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    rows: [Assignment; GRID_SIZE],
}

impl Candidate {
    /// An empty grid with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a candidate from rows in position order.
    pub fn from_rows(rows: [Assignment; GRID_SIZE]) -> Self {
        Self { rows }
    }

    /// Row at a one-based position.
    pub fn get(&self, position: usize) -> Option<&Assignment> {
        position.checked_sub(1).and_then(|i| self.rows.get(i))
    }

    /// Replace the row at a one-based position. Out-of-range positions are ignored.
    pub fn set(&mut self, position: usize, assignment: Assignment) {
        if let Some(row) = position.checked_sub(1).and_then(|i| self.rows.get_mut(i)) {
            *row = assignment;
        }
    }

    /// Rows in position order.
    pub fn rows(&self) -> &[Assignment] {
        &self.rows
    }

    /// Whether every row has both a codename and a weapon.
    pub fn is_filled(&self) -> bool {
        self.rows.iter().all(Assignment::is_complete)
    }
}

/// A solution row: which codename holds which weapon.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SolutionRow {
    pub label: String,
    pub item: String,
}

/// The hidden answer to the codename grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSolution {
    rows: Vec<SolutionRow>,
}

impl GridSolution {
    /// Create a solution from rows in position order.
    pub fn new(rows: Vec<SolutionRow>) -> Self {
        Self { rows }
    }

    /// Check a candidate grid.
    ///
    /// True only when every position matches the solution exactly on both
    /// the codename and the weapon. Values come from a closed vocabulary, so
    /// the comparison is literal.
    pub fn verify(&self, candidate: &Candidate) -> bool {
        self.rows.len() == GRID_SIZE
            && self
                .rows
                .iter()
                .zip(candidate.rows())
                .all(|(expected, given)| {
                    given.label.as_deref() == Some(expected.label.as_str())
                        && given.item.as_deref() == Some(expected.item.as_str())
                })
    }

    /// The solution itself as a candidate.
    pub fn as_candidate(&self) -> Candidate {
        let mut candidate = Candidate::new();
        for (i, row) in self.rows.iter().enumerate() {
            candidate.set(i + 1, Assignment::new(&row.label, &row.item));
        }
        candidate
    }

    /// Weapon held by `label`, if the label is part of the solution.
    pub fn item_of(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|row| row.label == label)
            .map(|row| row.item.as_str())
    }

    pub fn rows(&self) -> &[SolutionRow] {
        &self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solution() -> GridSolution {
        GridSolution::new(
            [
                ("Sombra", "Besta"),
                ("Corvo", "ChaveDeFenda"),
                ("Silencioso", "FioDeNylon"),
                ("Fantasma", "MartelodeBorracha"),
                ("Colecionador", "SeringaComPotassio"),
            ]
            .into_iter()
            .map(|(label, item)| SolutionRow {
                label: label.to_string(),
                item: item.to_string(),
            })
            .collect(),
        )
    }

    #[test]
    fn test_exact_solution_verifies() {
        let solution = solution();
        assert!(solution.verify(&solution.as_candidate()));
    }

    #[test]
    fn test_single_field_deviation_fails() {
        let solution = solution();
        for position in 1..=GRID_SIZE {
            let row = solution.as_candidate().get(position).cloned().unwrap();
            let deviations = [
                Assignment {
                    label: Some("Outro".into()),
                    ..row.clone()
                },
                Assignment {
                    label: None,
                    ..row.clone()
                },
                Assignment {
                    item: Some("Outra".into()),
                    ..row.clone()
                },
                Assignment {
                    item: None,
                    ..row.clone()
                },
            ];
            for deviation in deviations {
                let mut candidate = solution.as_candidate();
                candidate.set(position, deviation.clone());
                assert!(!solution.verify(&candidate), "{position}: {deviation:?}");
            }
        }
    }

    #[test]
    fn test_swapped_rows_fail() {
        let solution = solution();
        let mut candidate = solution.as_candidate();
        let first = candidate.get(1).cloned().unwrap();
        let second = candidate.get(2).cloned().unwrap();
        candidate.set(1, second);
        candidate.set(2, first);
        assert!(!solution.verify(&candidate));
    }

    #[test]
    fn test_labels_are_compared_literally() {
        let solution = solution();
        let mut candidate = solution.as_candidate();
        candidate.set(1, Assignment::new("sombra", "Besta"));
        assert!(!solution.verify(&candidate));
    }

    #[test]
    fn test_empty_candidate() {
        let candidate = Candidate::new();
        assert!(!candidate.is_filled());
        assert!(!solution().verify(&candidate));
        assert!(candidate.get(0).is_none());
        assert!(candidate.get(6).is_none());
    }

    #[test]
    fn test_item_of() {
        assert_eq!(solution().item_of("Colecionador"), Some("SeringaComPotassio"));
        assert_eq!(solution().item_of("Ninguém"), None);
    }
}

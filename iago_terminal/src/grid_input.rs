//! Text entry for the codename grid.
//!
//! A grid is typed as two groups of five symbols, codenames first, then
//! weapons, one symbol per room from left to right. Each symbol is the
//! 1-based number of a vocabulary entry, or `-` to leave the cell empty:
//!
//! ```text
//! 12345 15342
//! ```

use puzzle_rules::{Assignment, Candidate, VocabEntry, GRID_SIZE};
use thiserror::Error;

/// Symbol for an unselected cell.
pub const EMPTY_CELL: char = '-';

/// Why a typed grid could not be read.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridInputError {
    #[error("expected 2 groups (codenames and weapons), found {0}")]
    GroupCount(usize),

    #[error("group {group} must have 5 symbols, found {found}")]
    GroupLength { group: usize, found: usize },

    #[error("{0:?} is not a valid choice; use 1 to 5 or '-'")]
    Symbol(char),
}

/// Read a typed grid against the displayed codenames and weapons.
pub fn parse_grid(
    line: &str,
    labels: &[VocabEntry],
    items: &[VocabEntry],
) -> Result<Candidate, GridInputError> {
    let groups: Vec<&str> = line.split_whitespace().collect();
    let [label_group, item_group] = groups.as_slice() else {
        return Err(GridInputError::GroupCount(groups.len()));
    };

    let label_ids = parse_group(1, label_group, labels)?;
    let item_ids = parse_group(2, item_group, items)?;

    let mut candidate = Candidate::new();
    for (index, (label, item)) in label_ids.into_iter().zip(item_ids).enumerate() {
        candidate.set(index + 1, Assignment { label, item });
    }
    Ok(candidate)
}

fn parse_group(
    group: usize,
    symbols: &str,
    vocabulary: &[VocabEntry],
) -> Result<Vec<Option<String>>, GridInputError> {
    let found = symbols.chars().count();
    if found != GRID_SIZE {
        return Err(GridInputError::GroupLength { group, found });
    }

    symbols
        .chars()
        .map(|symbol| {
            if symbol == EMPTY_CELL {
                return Ok(None);
            }
            symbol
                .to_digit(10)
                .and_then(|n| (n as usize).checked_sub(1))
                .and_then(|i| vocabulary.get(i))
                .map(|entry| Some(entry.id.clone()))
                .ok_or(GridInputError::Symbol(symbol))
        })
        .collect()
}

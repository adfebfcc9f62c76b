use serde::{Deserialize, Serialize};

use crate::ids::ItemId;

/// Dense 0-based index of an entry within one snapshot of the selection.
///
/// Positions are only meaningful for the snapshot they were read from and
/// must be recomputed after every add/remove.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Position(usize);

impl Position {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for Position {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Position {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<usize>().map(Self)
    }
}

/// One purchase line of the selection. Duplicate item ids are legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectionEntry {
    pub item_id: ItemId,
    pub position: Position,
}

impl SelectionEntry {
    pub fn new(item_id: ItemId, position: Position) -> Self {
        Self { item_id, position }
    }

    /// Materializes entries with dense positions from an ordered id list.
    pub fn index_all<I>(ids: I) -> Vec<SelectionEntry>
    where
        I: IntoIterator<Item = ItemId>,
    {
        ids.into_iter()
            .enumerate()
            .map(|(index, item_id)| SelectionEntry::new(item_id, Position::new(index)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_all_assigns_dense_positions_and_keeps_duplicates() {
        let entries = SelectionEntry::index_all([3, 5, 3].map(ItemId::new));
        let positions: Vec<_> = entries.iter().map(|e| e.position.index()).collect();
        let ids: Vec<_> = entries.iter().map(|e| e.item_id.inner()).collect();
        assert_eq!(positions, vec![0, 1, 2]);
        assert_eq!(ids, vec![3, 5, 3]);
    }
}

use crate::Position;

/// A saved cursor for backtracking.
///
/// Restoring a checkpoint is the only way combinators undo work, so it must
/// stay as cheap as copying two integers and a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    index: usize,
    position: Position,
}

impl Checkpoint {
    pub fn new(index: usize, position: Position) -> Self {
        Self { index, position }
    }

    /// The token index (or byte offset, for the lexer cursor) at this checkpoint.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn position(&self) -> Position {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkpoint_round_trips_fields() {
        let cp = Checkpoint::new(3, Position::at(1, 4, 3));
        assert_eq!(cp.index(), 3);
        assert_eq!(cp.position(), Position::at(1, 4, 3));
    }
}

use crate::{Cell, Error, PlaneViewMut};

/// Write journal over a label plane. Each write records the previous value;
/// rollback replays the records in reverse, restoring the plane to its state
/// before the first journaled write.
#[derive(Debug, Default)]
pub struct LabelJournal {
    entries: Vec<(Cell, i32)>,
}

impl LabelJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write `value` at `cell`, journaling the previous label.
    pub fn set(
        &mut self,
        labels: &mut PlaneViewMut<'_, i32>,
        cell: Cell,
        value: i32,
    ) -> Result<(), Error> {
        let previous = labels.set(cell, value)?;
        self.entries.push((cell, previous));
        Ok(())
    }

    /// Undo every journaled write, most recent first.
    pub fn rollback(self, labels: &mut PlaneViewMut<'_, i32>) {
        for (cell, previous) in self.entries.into_iter().rev() {
            if let Some(slot) = labels.get_mut(cell) {
                *slot = previous;
            }
        }
    }

    /// Keep the journaled writes.
    pub fn commit(self) {}
}

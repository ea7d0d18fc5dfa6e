use crate::errors::StateError;
use crate::models::DocumentRow;

/// Ordered in-memory copy of the remote document rows.
///
/// Every operation is a synchronous transformation of the collection.
/// Callers apply them only after the matching remote call has succeeded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableState {
    rows: Vec<DocumentRow>,
}

impl TableState {
    /// Replace the whole collection, e.g. after a fresh load.
    pub fn replace_all(&mut self, rows: Vec<DocumentRow>) {
        self.rows = rows;
    }

    /// Append a row. A row whose id is already present is refused.
    pub fn insert(&mut self, row: DocumentRow) -> Result<(), StateError> {
        if self.contains(&row.id) {
            return Err(StateError::DuplicateId(row.id));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn remove(&mut self, id: &str) {
        self.rows.retain(|row| row.id != id);
    }

    /// Replace the row with the same id, keeping its position.
    pub fn replace_one(&mut self, row: DocumentRow) {
        if let Some(slot) = self.rows.iter_mut().find(|r| r.id == row.id) {
            *slot = row;
        }
    }

    pub fn get(&self, id: &str) -> Option<&DocumentRow> {
        self.rows.iter().find(|row| row.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn rows(&self) -> &[DocumentRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RowField;

    fn row(id: &str, name: &str) -> DocumentRow {
        let mut r = DocumentRow::empty(id);
        r.set(RowField::DocumentName, name.to_string());
        r
    }

    fn ids(state: &TableState) -> Vec<&str> {
        state.rows().iter().map(|r| r.id.as_str()).collect()
    }

    fn seeded() -> TableState {
        let mut state = TableState::default();
        state.replace_all(vec![row("a", "A"), row("b", "B"), row("c", "C")]);
        state
    }

    #[test]
    fn insert_appends_to_end() {
        let mut state = seeded();
        state.insert(row("d", "D")).unwrap();
        assert_eq!(ids(&state), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn insert_refuses_duplicate_id() {
        let mut state = seeded();
        let err = state.insert(row("b", "other")).unwrap_err();
        assert_eq!(err, StateError::DuplicateId("b".into()));
        assert_eq!(state.len(), 3);
        assert_eq!(state.get("b").unwrap().document_name, "B");
    }

    #[test]
    fn remove_drops_exactly_the_matching_row() {
        let mut state = seeded();
        state.remove("b");
        assert_eq!(ids(&state), vec!["a", "c"]);
        assert!(!state.contains("b"));
    }

    #[test]
    fn remove_unknown_id_is_a_no_op() {
        let mut state = seeded();
        state.remove("zzz");
        assert_eq!(state, seeded());
    }

    #[test]
    fn replace_one_keeps_position_and_neighbours() {
        let mut state = seeded();
        state.replace_one(row("b", "B2"));
        assert_eq!(ids(&state), vec!["a", "b", "c"]);
        assert_eq!(state.get("b").unwrap().document_name, "B2");
        assert_eq!(state.get("a").unwrap().document_name, "A");
        assert_eq!(state.get("c").unwrap().document_name, "C");
    }

    #[test]
    fn replace_all_discards_previous_order() {
        let mut state = seeded();
        state.replace_all(vec![row("z", "Z")]);
        assert_eq!(ids(&state), vec!["z"]);
    }
}

use crate::model::Record;

/// Append-only list of the injuries submitted this session.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    pub fn append(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Records in the order they were submitted.
    pub fn all(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

use ledgerize_core::TransactionRecord;

/// The unified ledger: records in file-visit order, then parser order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerTable {
    records: Vec<TransactionRecord>,
}

impl LedgerTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, records: impl IntoIterator<Item = TransactionRecord>) {
        self.records.extend(records);
    }

    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

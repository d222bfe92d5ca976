use std::collections::HashMap;

use serde::Serialize;

use super::transaction_record::TransactionRecord;

/// Currently active transactions of a receipt, keyed by `transaction_id`.
///
/// Holds at most one record per transaction id. Iteration follows insertion
/// order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EntitlementSet {
    records: Vec<TransactionRecord>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl EntitlementSet {
    /// Merges the two transaction lists of a verifyReceipt response.
    ///
    /// Every active record of `subscriptions` (auto-renewable data from
    /// `latest_receipt_info`) is taken first, then active records of
    /// `purchases` (`in_app`) whose id has not been seen yet. A later
    /// subscription record with an already seen id replaces the earlier one
    /// but keeps its position.
    pub fn merge<'a>(
        subscriptions: impl IntoIterator<Item = &'a TransactionRecord>,
        purchases: impl IntoIterator<Item = &'a TransactionRecord>,
        now_ms: i64,
    ) -> Self {
        let mut set = Self::default();
        for record in subscriptions {
            if record.is_active_at(now_ms) {
                set.upsert(record.clone());
            }
        }
        for record in purchases {
            if record.is_active_at(now_ms) {
                set.insert_if_absent(record.clone());
            }
        }
        set
    }

    /// Inserts `record`, or replaces the record with the same transaction id
    /// in place. Returns the replaced record.
    pub fn upsert(&mut self, record: TransactionRecord) -> Option<TransactionRecord> {
        match self.index.get(&record.transaction_id) {
            Some(&i) => Some(std::mem::replace(&mut self.records[i], record)),
            None => {
                self.index
                    .insert(record.transaction_id.clone(), self.records.len());
                self.records.push(record);
                None
            }
        }
    }

    /// Inserts `record` unless a record with the same transaction id is
    /// already present. Returns whether it was inserted.
    pub fn insert_if_absent(&mut self, record: TransactionRecord) -> bool {
        if self.index.contains_key(&record.transaction_id) {
            return false;
        }
        self.index
            .insert(record.transaction_id.clone(), self.records.len());
        self.records.push(record);
        true
    }

    pub fn get(&self, transaction_id: &str) -> Option<&TransactionRecord> {
        self.index.get(transaction_id).map(|&i| &self.records[i])
    }

    pub fn contains(&self, transaction_id: &str) -> bool {
        self.index.contains_key(transaction_id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TransactionRecord> {
        self.records.iter()
    }

    pub fn transaction_ids(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.transaction_id.as_str())
    }

    /// Active records for a given product, in insertion order.
    pub fn for_product<'a>(
        &'a self,
        product_id: &'a str,
    ) -> impl Iterator<Item = &'a TransactionRecord> + 'a {
        self.records.iter().filter(move |r| r.product_id == product_id)
    }

    pub fn into_records(self) -> Vec<TransactionRecord> {
        self.records
    }
}

impl<'a> IntoIterator for &'a EntitlementSet {
    type Item = &'a TransactionRecord;
    type IntoIter = std::slice::Iter<'a, TransactionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

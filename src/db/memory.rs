use anyhow::Result;
use std::collections::HashMap;

use super::{decode_expenses, encode_expenses, ExpenseStore, EXPENSES_KEY};
use crate::models::ExpenseRecord;

/// In-process key/value store with the same encoding as `Database`.
#[derive(Debug, Default)]
pub(crate) struct MemoryStore {
    values: HashMap<String, String>,
    fail_writes: bool,
    pub(crate) saves: usize,
}

impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `save` fail, as a full or unavailable disk would.
    pub(crate) fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    pub(crate) fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub(crate) fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }
}

impl ExpenseStore for MemoryStore {
    fn load(&self) -> Result<Vec<ExpenseRecord>> {
        match self.get(EXPENSES_KEY) {
            Some(raw) => decode_expenses(raw),
            None => Ok(Vec::new()),
        }
    }

    fn save(&mut self, records: &[ExpenseRecord]) -> Result<()> {
        if self.fail_writes {
            anyhow::bail!("storage unavailable");
        }
        let raw = encode_expenses(records)?;
        self.set(EXPENSES_KEY, raw);
        self.saves += 1;
        Ok(())
    }
}

use crate::actions::{self, Action, Outcome};
use crate::db::ExpenseStore;
use crate::ledger::{Ledger, LedgerError};

/// The running application's ledger together with the store it is saved to.
pub(crate) struct Session {
    ledger: Ledger,
    store: Box<dyn ExpenseStore>,
}

impl Session {
    /// Load the ledger from `store`. Unreadable data is logged and the
    /// session starts empty.
    pub(crate) fn load(store: Box<dyn ExpenseStore>) -> Self {
        let ledger = match store.load() {
            Ok(records) => {
                let ledger = Ledger::from_records(records);
                log::info!("Loaded {} expenses", ledger.len());
                ledger
            }
            Err(e) => {
                log::error!("Could not load saved expenses, starting empty: {e:#}");
                Ledger::new()
            }
        };
        Self { ledger, store }
    }

    pub(crate) fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub(crate) fn dispatch(&mut self, action: Action) -> Result<Outcome, LedgerError> {
        actions::apply(action, &mut self.ledger, self.store.as_mut())
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;

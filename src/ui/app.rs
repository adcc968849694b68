use crate::ledger::Ledger;
use crate::models::{ExpenseRecord, Month};
use crate::projection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Expenses,
    Chart,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Expenses, Self::Chart]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expenses => write!(f, "Expenses"),
            Self::Chart => write!(f, "Chart"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PendingAction {
    DeleteExpense { id: i64 },
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    // Expenses, in display order: grouped by month, insertion order within.
    pub(crate) rows: Vec<i64>,
    pub(crate) expense_index: usize,
    pub(crate) expense_scroll: usize,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new() -> Self {
        Self {
            running: true,
            screen: Screen::Expenses,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,

            rows: Vec::new(),
            expense_index: 0,
            expense_scroll: 0,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    /// Rebuild the row order from the ledger and keep the cursor in range.
    pub(crate) fn refresh(&mut self, ledger: &Ledger) {
        self.rows = projection::group_by_month(ledger.records())
            .iter()
            .flat_map(|g| g.records.iter().map(|r| r.id))
            .collect();
        if self.expense_index >= self.rows.len() {
            self.expense_index = self.rows.len().saturating_sub(1);
        }
        if self.expense_scroll > self.expense_index {
            self.expense_scroll = self.expense_index;
        }
    }

    /// Move the cursor onto `id` if it is listed.
    pub(crate) fn select(&mut self, id: i64) {
        if let Some(pos) = self.rows.iter().position(|r| *r == id) {
            self.expense_index = pos;
            let page = self.visible_rows.max(1);
            if pos < self.expense_scroll {
                self.expense_scroll = pos;
            } else if pos >= self.expense_scroll + page {
                self.expense_scroll = pos + 1 - page;
            }
        }
    }

    pub(crate) fn selected_id(&self) -> Option<i64> {
        self.rows.get(self.expense_index).copied()
    }

    pub(crate) fn selected<'a>(&self, ledger: &'a Ledger) -> Option<&'a ExpenseRecord> {
        self.selected_id().and_then(|id| ledger.get(id))
    }

    pub(crate) fn selected_month(&self, ledger: &Ledger) -> Option<Month> {
        self.selected(ledger).and_then(|r| r.month())
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}

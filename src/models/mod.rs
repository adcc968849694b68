mod expense;
mod month;

pub(crate) use expense::ExpenseRecord;
pub(crate) use month::Month;

//! Storage layer: repository traits plus the SQLite implementation.

pub mod sqlite;
pub mod traits;

pub use traits::{
    BudgetStore, CategoryStore, Connection, GoalStore, TransactionFilter, TransactionStore,
    UserStore,
};

pub mod file;
pub mod memory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use file::FileHistoryStore;
pub use memory::MemoryHistoryStore;

#[cfg(feature = "sqlite")]
pub use sqlite::SQLiteHistoryStore;

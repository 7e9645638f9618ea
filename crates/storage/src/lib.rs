#![forbid(unsafe_code)]

pub mod record;
pub mod repository;
pub mod sqlite;

pub use record::{DecodedUser, RecordStatus};
pub use repository::{InMemoryRepository, ProgressRepository, Storage, StorageError, USER_RECORD_KEY};

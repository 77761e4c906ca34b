//! Test helpers for crates that depend on `pushup-storage`.

mod mock_storage;

pub use mock_storage::MockStorage;

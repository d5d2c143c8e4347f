//! Car persistence: models, the storage abstraction and the record store.
//!
//! Layout:
//! - `models.rs`: serde types for persisted cars and request payloads
//! - `storage.rs`: `CarStorage`, whole-document load/save
//! - `json_file.rs`: file-backed storage (production)
//! - `memory.rs`: in-memory storage (tests)
//! - `store.rs`: `RecordStore`, list/insert/delete/update over a `CarStorage`

pub mod json_file;
pub mod memory;
pub mod models;
pub mod storage;
pub mod store;

pub use json_file::JsonFileStorage;
pub use memory::MemoryStorage;
pub use models::{Car, CarPatch, NewCar};
pub use storage::CarStorage;
pub use store::RecordStore;

pub mod gateway;
pub mod snapshot;
pub mod sync;

pub use gateway::{AccountGateway, HttpAccountGateway};
pub use snapshot::SnapshotStore;
pub use sync::{AccountRefresh, AccountSyncCoordinator};

pub mod games;
pub mod snapshot_cache;

pub use games::GameService;
pub use snapshot_cache::SnapshotCache;

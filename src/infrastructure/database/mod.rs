pub mod cache;
pub mod cache_store;
pub mod connection_pool;
pub mod synchronizer;

pub use cache_store::CacheStore;
pub use connection_pool::ConnectionPool;
pub use synchronizer::CacheSynchronizer;

pub mod backoff;
pub mod mutex_map;

pub use mutex_map::MutexMap;

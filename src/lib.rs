//! Ordered in-memory sets backed by a skiplist.
//!
//! This crate ties together the engine (`skiplist`), its settings (`config`) and the logger used
//! to trace structural changes (`logger`).
//!
//! ```
//! use skipset::{Config, MaxLevel, SkipList};
//!
//! let config = Config { max_level: MaxLevel::Fixed(3), ..Config::mock(7) };
//! let mut set = SkipList::with_config(&config).unwrap();
//! for v in [5, 1, 9, 3].iter() {
//!     set.insert(*v).unwrap();
//! }
//! assert!(set.present(&3));
//! assert_eq!(set.iter().cloned().collect::<Vec<_>>(), vec![1, 3, 5, 9]);
//! ```

pub use config;
pub use logger;
pub use skiplist;

pub use config::{Config, ConfigError, MaxLevel};
pub use logger::{log, Level, Logger};
pub use skiplist::{
    tree_levels, GeometricalLevelGenerator, Iter, Lanes, LevelGenerator, SkipList, SkipListError,
};

/// Reads the settings in `path` and creates an empty list from them.
///
/// Every key missing from the file keeps its default value.
pub fn open<T>(path: &str) -> Result<SkipList<T>, SkipListError>
where
    T: PartialOrd,
{
    let mut config = Config::new();
    config.parsefile(path)?;
    SkipList::with_config(&config)
}

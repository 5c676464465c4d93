pub use std::time::{Duration as StdDuration, Instant};

pub use anyhow::{anyhow, Context};
pub use chrono::{Datelike, Utc};

pub type AHashMap<K, V> = std::collections::HashMap<K, V, ahash::RandomState>;

pub type DateTime = chrono::DateTime<chrono::Utc>;
pub type Result<T = (), E = anyhow::Error> = std::result::Result<T, E>;

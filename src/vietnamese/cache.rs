//! Process-wide memo of [`solar_to_lunar`](super::solar_to_lunar).
//!
//! A month view converts 28 to 42 consecutive days, each needing a few new
//! moon and solar longitude series evaluations. Results only depend on the
//! `(date, time zone)` pair, so entries never go stale and are never evicted.

use std::collections::HashMap;
use std::sync::{LazyLock, RwLock};

use super::LunarDate;
use crate::astro::TimeZone;
use crate::date::Date;

static CACHE: LazyLock<RwLock<HashMap<(Date, TimeZone), LunarDate>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// Same as [`super::solar_to_lunar`], reading through the cache.
///
/// A poisoned lock only disables caching.
pub fn solar_to_lunar(date: Date, tz: TimeZone) -> LunarDate {
    let key = (date, tz);
    if let Some(hit) = CACHE.read().ok().and_then(|map| map.get(&key).copied()) {
        return hit;
    }
    let lunar = super::solar_to_lunar(date, tz);
    if let Ok(mut map) = CACHE.write() {
        map.insert(key, lunar);
    }
    lunar
}

/// Number of cached conversions.
#[cfg(test)]
fn len() -> usize {
    CACHE.read().map_or(0, |map| map.len())
}

/// Drops every cached conversion.
#[cfg(test)]
fn clear() {
    if let Ok(mut map) = CACHE.write() {
        map.clear();
    }
}

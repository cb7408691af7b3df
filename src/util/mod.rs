use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use time::OffsetDateTime;

pub mod assets;
pub mod format;
pub mod persistence;
pub mod transfer;
pub mod version;

static ID_COUNTER: AtomicUsize = AtomicUsize::new(1);
static LAST_TIMESTAMP_ID: AtomicU64 = AtomicU64::new(0);

pub fn generate_id(prefix: &str) -> String {
    let value = ID_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{value}")
}

/// Millisecond timestamp id. Strictly increasing within the process, so two
/// records created in the same millisecond still get distinct ids.
pub fn timestamp_id() -> String {
    let now_ms = u64::try_from(OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000).unwrap_or(0);
    let previous = LAST_TIMESTAMP_ID
        .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |last| {
            Some(now_ms.max(last + 1))
        })
        .unwrap_or(now_ms);
    now_ms.max(previous + 1).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_ids_are_unique_and_increasing() {
        let ids: Vec<u64> = (0..1_000)
            .map(|_| timestamp_id().parse().unwrap())
            .collect();
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn prefixed_ids_differ() {
        assert_ne!(generate_id("toast"), generate_id("toast"));
    }
}

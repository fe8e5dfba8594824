//! Soft disk quota for the repository tree.

use std::sync::atomic::{AtomicU64, Ordering};

/// Tracks bytes consumed by successful deploys against a configured ceiling.
///
/// This is a soft quota: [`has_usable_space`](DiskQuota::has_usable_space)
/// is checked before a write, and [`allocate`](DiskQuota::allocate) is
/// unclamped, so a single deploy may overshoot the ceiling — the next one
/// is the one that gets rejected. The counter is not reconciled against
/// true disk usage mid-flight; concurrent overwrites of one path can
/// overcount.
pub struct DiskQuota {
    allocated: AtomicU64,
    max_size: Option<u64>,
}

impl DiskQuota {
    /// Quota with a ceiling, starting from the given consumption (typically
    /// recomputed from the repository tree at startup).
    pub fn limited(allocated: u64, max_size: u64) -> Self {
        Self {
            allocated: AtomicU64::new(allocated),
            max_size: Some(max_size),
        }
    }

    /// No ceiling — every space check passes.
    pub fn unlimited() -> Self {
        Self {
            allocated: AtomicU64::new(0),
            max_size: None,
        }
    }

    /// Parse a quota from a size string like `"10GB"`, `"512MB"` or a raw
    /// byte count. Returns `None` for anything unparseable.
    pub fn of(value: &str) -> Option<Self> {
        let value = value.trim();
        let (number, multiplier) = match value.to_ascii_uppercase() {
            v if v.ends_with("GB") => (value[..value.len() - 2].trim().to_string(), 1 << 30),
            v if v.ends_with("MB") => (value[..value.len() - 2].trim().to_string(), 1 << 20),
            v if v.ends_with("KB") => (value[..value.len() - 2].trim().to_string(), 1 << 10),
            _ => (value.to_string(), 1),
        };

        let number: u64 = number.parse().ok()?;
        let max_size = number.checked_mul(multiplier)?;
        Some(Self::limited(0, max_size))
    }

    /// Fast pre-write check. Unlimited quotas always pass.
    pub fn has_usable_space(&self) -> bool {
        match self.max_size {
            Some(max) => self.allocated.load(Ordering::Relaxed) < max,
            None => true,
        }
    }

    /// Record bytes consumed by a completed write. Deliberately unclamped.
    pub fn allocate(&self, bytes: u64) {
        self.allocated.fetch_add(bytes, Ordering::Relaxed);
    }

    /// Bytes recorded as consumed so far.
    pub fn allocated(&self) -> u64 {
        self.allocated.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlimited_always_has_space() {
        let quota = DiskQuota::unlimited();
        quota.allocate(u64::MAX / 2);
        assert!(quota.has_usable_space());
    }

    #[test]
    fn test_exhaustion_at_ceiling() {
        let quota = DiskQuota::limited(0, 100);
        assert!(quota.has_usable_space());

        quota.allocate(99);
        assert!(quota.has_usable_space());

        quota.allocate(1);
        assert!(!quota.has_usable_space());
    }

    #[test]
    fn test_allocate_may_overshoot() {
        let quota = DiskQuota::limited(90, 100);
        assert!(quota.has_usable_space());

        // The pre-write check passed, the write was bigger than the gap.
        quota.allocate(500);
        assert_eq!(quota.allocated(), 590);
        assert!(!quota.has_usable_space());
    }

    #[test]
    fn test_of_size_strings() {
        assert_eq!(DiskQuota::of("10GB").unwrap().max_size, Some(10 << 30));
        assert_eq!(DiskQuota::of("512MB").unwrap().max_size, Some(512 << 20));
        assert_eq!(DiskQuota::of("8kb").unwrap().max_size, Some(8 << 10));
        assert_eq!(DiskQuota::of("4096").unwrap().max_size, Some(4096));
        assert!(DiskQuota::of("ten gigabytes").is_none());
    }
}

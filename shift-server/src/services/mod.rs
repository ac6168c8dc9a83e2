//! Service layer - scheduling engines and identity operations
//!
//! - [`IdentityService`] - organizations, managers, employees, tokens
//! - [`ScheduleService`] - recurring schedule templates
//! - [`ShiftService`] - dated shifts, rosters, time-window queries
//! - [`CheckInService`] - check-in state tracking
//!
//! Every operation takes the caller's organization id and never reads or
//! writes rows of another organization.

pub mod check_in;
pub mod identity;
pub mod schedule;
pub mod shift;

pub use check_in::CheckInService;
pub use identity::IdentityService;
pub use schedule::ScheduleService;
pub use shift::{ShiftChanges, ShiftService};

/// Sorted, deduplicated copy of the requested ids
pub(crate) fn normalize_ids(ids: &[i64]) -> Vec<i64> {
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    ids
}

#[cfg(test)]
mod tests {
    use super::normalize_ids;

    #[test]
    fn test_normalize_ids() {
        assert_eq!(normalize_ids(&[3, 1, 3, 2]), vec![1, 2, 3]);
        assert!(normalize_ids(&[]).is_empty());
    }
}

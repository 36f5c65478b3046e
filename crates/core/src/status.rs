//! Subscription lifecycle status and aggregate counts.

use serde::Serialize;

/// Lifecycle status of a subscription, derived from the workflow tables.
///
/// Priority order: a Pending approval wins over a draft, a draft wins over
/// nothing. `Overdue` is a reserved bucket exposed in the counts API but
/// never produced by the status computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionStatus {
    /// A cost-center change is awaiting approval.
    Check,
    /// A draft has been saved but not yet fully committed.
    InProgress,
    /// No change in flight.
    UpToDate,
    /// Reserved; no code path produces this yet.
    Overdue,
}

impl SubscriptionStatus {
    /// Display label, as surfaced in API responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Check => "Check",
            SubscriptionStatus::InProgress => "In-Progress",
            SubscriptionStatus::UpToDate => "Up to date",
            SubscriptionStatus::Overdue => "Overdue",
        }
    }
}

impl Serialize for SubscriptionStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Status tallies for a set of subscriptions (one platform's listing).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub total: usize,
    pub up_to_date: usize,
    pub overdue: usize,
    pub in_progress: usize,
    pub check: usize,
}

impl StatusCounts {
    /// Tally statuses for a listing.
    pub fn tally<I: IntoIterator<Item = SubscriptionStatus>>(statuses: I) -> Self {
        let mut counts = StatusCounts::default();
        for status in statuses {
            counts.total += 1;
            match status {
                SubscriptionStatus::Check => counts.check += 1,
                SubscriptionStatus::InProgress => counts.in_progress += 1,
                SubscriptionStatus::UpToDate => counts.up_to_date += 1,
                SubscriptionStatus::Overdue => counts.overdue += 1,
            }
        }
        counts
    }
}

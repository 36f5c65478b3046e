//! Approval ticket states and resolution actions.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::CoreError;

/// Lifecycle state of a cost-center approval ticket.
///
/// `Pending` is the only live state; `Approved` and `Rejected` are terminal.
/// A resolved ticket is never reopened -- a later cost-center change creates
/// a fresh Pending row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    /// Status label as stored in the `cost_center_approvals.status` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "Pending",
            ApprovalStatus::Approved => "Approved",
            ApprovalStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ApprovalStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Action a responsible party takes on a Pending ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveAction {
    Approve,
    Reject,
}

impl ResolveAction {
    /// The terminal status this action transitions the ticket to.
    pub fn resulting_status(&self) -> ApprovalStatus {
        match self {
            ResolveAction::Approve => ApprovalStatus::Approved,
            ResolveAction::Reject => ApprovalStatus::Rejected,
        }
    }
}

impl FromStr for ResolveAction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approve" => Ok(ResolveAction::Approve),
            "reject" => Ok(ResolveAction::Reject),
            other => Err(CoreError::Validation(format!(
                "Invalid action '{other}'. Must be one of: approve, reject"
            ))),
        }
    }
}

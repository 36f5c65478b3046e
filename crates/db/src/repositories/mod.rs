//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept any `PgExecutor` as the first argument, so the same method runs
//! against the pool or inside a transaction.

pub mod approval_repo;
pub mod it_owner_reference_repo;
pub mod proposal_repo;
pub mod status_repo;
pub mod subscription_repo;

pub use approval_repo::ApprovalRepo;
pub use it_owner_reference_repo::ItOwnerReferenceRepo;
pub use proposal_repo::ProposalRepo;
pub use status_repo::SubscriptionStatusRepo;
pub use subscription_repo::SubscriptionRepo;

//! Vote commit - eligibility gate plus a three-step saga over a store without transactions.
//!
//! A vote touches three records that the ledger cannot update atomically:
//!
//! 1. the vote itself, under `vote_<voterId>_<projectId>` (and the Votes index),
//! 2. the project's vote list, under `projectvote_<projectId>`,
//! 3. the project's `costCovered` total.
//!
//! Nothing is written until the vote has decoded, the project exists and the
//! eligibility rule admits the voter. The steps then run in order; each is
//! durable on its own and none is undone if a later one fails. Under the
//! default [`DuplicateVotePolicy::Reject`](crate::DuplicateVotePolicy) every
//! step checks whether its effect is already present, so resubmitting the
//! same vote after a partial failure finishes the commit instead of counting
//! twice.
//!
//! Between steps a reader can see the vote without its effect on the project.

mod coordinator;
mod saga;

pub use coordinator::VoteCoordinator;
pub use saga::{CommitStep, StepOutcome, VoteReceipt, VoteState};

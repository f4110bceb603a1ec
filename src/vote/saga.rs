use std::fmt;

use crate::entities::Vote;

/// Where a vote submission stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteState {
    Received,
    Validated,
    Committed,
    Rejected,
}

impl fmt::Display for VoteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VoteState::Received => "received",
            VoteState::Validated => "validated",
            VoteState::Committed => "committed",
            VoteState::Rejected => "rejected",
        };
        f.write_str(name)
    }
}

/// The ordered writes of a vote commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommitStep {
    RecordVote,
    AppendProjectVote,
    AccumulateCost,
}

impl CommitStep {
    pub const ORDER: [CommitStep; 3] = [
        CommitStep::RecordVote,
        CommitStep::AppendProjectVote,
        CommitStep::AccumulateCost,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommitStep::RecordVote => "record-vote",
            CommitStep::AppendProjectVote => "append-project-vote",
            CommitStep::AccumulateCost => "accumulate-cost",
        }
    }
}

impl fmt::Display for CommitStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a step did on this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Applied,
    /// Its effect was already in the store.
    Skipped,
}

/// Result of a committed vote: the vote and what each step did.
#[derive(Debug, Clone, PartialEq)]
pub struct VoteReceipt {
    pub vote: Vote,
    pub state: VoteState,
    pub steps: Vec<(CommitStep, StepOutcome)>,
}

impl VoteReceipt {
    pub(crate) fn new(vote: Vote) -> Self {
        Self {
            vote,
            state: VoteState::Validated,
            steps: Vec::with_capacity(CommitStep::ORDER.len()),
        }
    }

    pub fn outcome(&self, step: CommitStep) -> Option<StepOutcome> {
        self.steps
            .iter()
            .find(|(s, _)| *s == step)
            .map(|(_, outcome)| *outcome)
    }

    /// True when every step found its effect already present.
    pub fn is_replay(&self) -> bool {
        self.steps
            .iter()
            .all(|(_, outcome)| *outcome == StepOutcome::Skipped)
    }
}

use tracing::{debug, info, warn};

use super::saga::{CommitStep, StepOutcome, VoteReceipt, VoteState};
use crate::codec;
use crate::config::DuplicateVotePolicy;
use crate::eligibility::EligibilityRule;
use crate::entities::{Project, Vote, Voter};
use crate::error::LedgerError;
use crate::index::IndexName;
use crate::record::Record;
use crate::repository::Ledger;
use crate::store::StateStore;

/// Accepted `votePercent` values.
const VOTE_PERCENT_RANGE: std::ops::RangeInclusive<f64> = 0.0..=100.0;

/// Validates and commits votes against a [`Ledger`].
pub struct VoteCoordinator<'a, S, E: ?Sized> {
    ledger: &'a Ledger<S>,
    rule: &'a E,
}

impl<'a, S: StateStore, E: EligibilityRule + ?Sized> VoteCoordinator<'a, S, E> {
    pub fn new(ledger: &'a Ledger<S>, rule: &'a E) -> Self {
        Self { ledger, rule }
    }

    /// Decode a vote payload and commit it.
    pub fn submit(&self, vote_json: &str) -> Result<VoteReceipt, LedgerError> {
        let vote: Vote = codec::decode_str(Vote::KIND, vote_json)
            .inspect_err(|err| warn!(state = %VoteState::Rejected, error = %err, "vote payload rejected"))?;
        self.commit(vote)
    }

    /// Validate `vote`, then run the commit steps in order.
    pub fn commit(&self, vote: Vote) -> Result<VoteReceipt, LedgerError> {
        debug!(
            state = %VoteState::Received,
            voter_id = %vote.voter_id,
            project_id = %vote.project_id,
            "vote received"
        );

        let existing = self.validate(&vote).inspect_err(|err| {
            warn!(
                state = %VoteState::Rejected,
                voter_id = %vote.voter_id,
                project_id = %vote.project_id,
                error = %err,
                "vote rejected"
            );
        })?;

        let policy = self.ledger.config().duplicate_votes;
        let mut receipt = VoteReceipt::new(vote);
        for step in CommitStep::ORDER {
            let outcome = self
                .run_step(step, &receipt.vote, existing.as_ref(), policy)
                .map_err(|source| {
                    warn!(
                        %step,
                        voter_id = %receipt.vote.voter_id,
                        project_id = %receipt.vote.project_id,
                        error = %source,
                        "vote partially committed"
                    );
                    LedgerError::CommitFailed {
                        step,
                        source: Box::new(source),
                    }
                })?;
            debug!(%step, ?outcome, "vote commit step done");
            receipt.steps.push((step, outcome));
        }

        receipt.state = VoteState::Committed;
        info!(
            voter_id = %receipt.vote.voter_id,
            project_id = %receipt.vote.project_id,
            vote_percent = receipt.vote.vote_percent,
            replay = receipt.is_replay(),
            "vote committed"
        );
        Ok(receipt)
    }

    /// Gate checks; nothing is written here. Returns the vote already stored
    /// for this (voter, project) pair, if any.
    fn validate(&self, vote: &Vote) -> Result<Option<Vote>, LedgerError> {
        if !VOTE_PERCENT_RANGE.contains(&vote.vote_percent) {
            return Err(LedgerError::decode(
                Vote::KIND,
                format!("votePercent must be between 0 and 100, got {}", vote.vote_percent),
            ));
        }

        let project: Project = self.ledger.records::<Project>().require(&[vote.project_id.as_str()])?;
        let voter: Option<Voter> = self.ledger.records::<Voter>().get_by_id(&[vote.voter_id.as_str()])?;
        let eligible = voter
            .as_ref()
            .is_some_and(|voter| self.rule.is_eligible(voter, &project));
        if !eligible {
            return Err(LedgerError::Ineligible {
                voter_id: vote.voter_id.clone(),
                project_id: vote.project_id.clone(),
            });
        }

        let existing = self.ledger.records::<Vote>().get(&vote.key())?;
        if self.ledger.config().duplicate_votes == DuplicateVotePolicy::Reject {
            if let Some(previous) = &existing {
                if previous.vote_percent != vote.vote_percent {
                    return Err(LedgerError::DuplicateVote {
                        voter_id: vote.voter_id.clone(),
                        project_id: vote.project_id.clone(),
                    });
                }
            }
        }

        debug!(state = %VoteState::Validated, voter_id = %vote.voter_id, "vote validated");
        Ok(existing)
    }

    fn run_step(
        &self,
        step: CommitStep,
        vote: &Vote,
        existing: Option<&Vote>,
        policy: DuplicateVotePolicy,
    ) -> Result<StepOutcome, LedgerError> {
        let idempotent = policy == DuplicateVotePolicy::Reject;
        match step {
            CommitStep::RecordVote => {
                if idempotent && existing.is_some() {
                    // The put landed earlier; the index append may not have.
                    let key = vote.key();
                    let indexes = self.ledger.indexes();
                    if indexes.list(IndexName::Votes)?.contains(&key) {
                        return Ok(StepOutcome::Skipped);
                    }
                    indexes.append(IndexName::Votes, &key)?;
                    return Ok(StepOutcome::Applied);
                }
                self.ledger.records::<Vote>().store(vote)?;
                Ok(StepOutcome::Applied)
            }
            CommitStep::AppendProjectVote => {
                let mut votes = self.ledger.get_votes_by_project_id(&vote.project_id)?;
                if idempotent && votes.iter().any(|v| v.voter_id == vote.voter_id) {
                    return Ok(StepOutcome::Skipped);
                }
                votes.push(vote.clone());
                self.ledger.put_project_votes(&vote.project_id, &votes)?;
                Ok(StepOutcome::Applied)
            }
            CommitStep::AccumulateCost => {
                // Re-read: the copy validated against may be stale by now.
                let mut project = self.ledger.get_project(&vote.project_id)?;
                let tallied = project.tallied_voters.contains(&vote.voter_id);
                if idempotent && tallied {
                    return Ok(StepOutcome::Skipped);
                }
                project.cost_covered = covered_total(&project, vote.vote_percent)?;
                if !tallied {
                    project.tallied_voters.push(vote.voter_id.clone());
                }
                self.ledger.records::<Project>().update(&project)?;
                Ok(StepOutcome::Applied)
            }
        }
    }
}

/// `costCovered` after adding `percent`. A total that no longer fits a JSON
/// number is refused before anything is written.
fn covered_total(project: &Project, percent: f64) -> Result<f64, LedgerError> {
    let total = project.cost_covered + percent;
    if !total.is_finite() {
        return Err(LedgerError::decode(
            Project::KIND,
            format!("costCovered of {} would overflow", project.project_id),
        ));
    }
    Ok(total)
}

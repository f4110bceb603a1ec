//! Vote commit integration tests: eligibility gate, accumulation, and the
//! partial-failure windows between the three writes.

mod support;

use budget_ledger::{
    AllowListRule, CommitStep, DuplicateVotePolicy, IndexName, Ledger, LedgerConfig, LedgerError,
    StateStore, StepOutcome, VoteCoordinator,
};
use support::{init_tracing, seed, seeded_ledger, vote_json, FaultyStore};

#[test]
fn two_votes_accumulate_cost_covered() {
    init_tracing();
    let ledger = seeded_ledger(LedgerConfig::default());
    let votes = VoteCoordinator::new(&ledger, &AllowListRule);

    votes.submit(&vote_json("v1", "p1", 30)).unwrap();
    votes.submit(&vote_json("v2", "p1", 25)).unwrap();

    let project = ledger.get_project("p1").unwrap();
    assert_eq!(project.cost_covered, 55.0);
    assert_eq!(project.budget, 12000.0);

    let list = ledger.get_votes_by_project_id("p1").unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].voter_id, "v1");
    assert_eq!(list[1].voter_id, "v2");

    assert_eq!(
        ledger.indexes().list(IndexName::Votes).unwrap(),
        vec!["vote_v1_p1", "vote_v2_p1"]
    );
}

#[test]
fn accumulate_policy_matches_same_voter_votes_too() {
    let config = LedgerConfig::default().with_duplicate_votes(DuplicateVotePolicy::Accumulate);
    let ledger = seeded_ledger(config);
    let votes = VoteCoordinator::new(&ledger, &AllowListRule);

    votes.submit(&vote_json("v1", "p1", 30)).unwrap();
    votes.submit(&vote_json("v1", "p1", 25)).unwrap();

    assert_eq!(ledger.get_project("p1").unwrap().cost_covered, 55.0);
    assert_eq!(ledger.get_votes_by_project_id("p1").unwrap().len(), 2);
}

#[test]
fn ineligible_vote_changes_nothing() {
    let ledger = seeded_ledger(LedgerConfig::default());
    let votes = VoteCoordinator::new(&ledger, &AllowListRule);
    votes.submit(&vote_json("v1", "p1", 10)).unwrap();

    let before_index = ledger.indexes().list(IndexName::Votes).unwrap();
    let before_list = ledger.get_votes_by_project_id("p1").unwrap();
    let before_cost = ledger.get_project("p1").unwrap().cost_covered;

    // v3 may only vote on p2.
    let err = votes.submit(&vote_json("v3", "p1", 40)).unwrap_err();
    assert!(matches!(err, LedgerError::Ineligible { .. }));
    assert_eq!(err.status_code(), 403);

    assert_eq!(ledger.indexes().list(IndexName::Votes).unwrap(), before_index);
    assert_eq!(ledger.get_votes_by_project_id("p1").unwrap(), before_list);
    assert_eq!(ledger.get_project("p1").unwrap().cost_covered, before_cost);
    assert!(ledger.get_vote_for_project_by_voter("p1", "v3").is_err());
}

#[test]
fn eligible_by_project_allow_list() {
    let ledger = seeded_ledger(LedgerConfig::default());
    let receipt = VoteCoordinator::new(&ledger, &AllowListRule)
        .submit(&vote_json("v3", "p2", 15))
        .unwrap();
    assert_eq!(receipt.outcome(CommitStep::AccumulateCost), Some(StepOutcome::Applied));
    assert_eq!(ledger.get_project("p2").unwrap().cost_covered, 15.0);
}

#[test]
fn failure_at_vote_list_leaves_vote_and_resumes_on_retry() {
    init_tracing();
    let ledger = Ledger::new(FaultyStore::new());
    seed(&ledger);
    let votes = VoteCoordinator::new(&ledger, &AllowListRule);

    ledger.store().fail_puts_to("projectvote_p1");
    let err = votes.submit(&vote_json("v1", "p1", 30)).unwrap_err();
    match &err {
        LedgerError::CommitFailed { step, source } => {
            assert_eq!(*step, CommitStep::AppendProjectVote);
            assert!(matches!(**source, LedgerError::Store(_)));
        }
        other => panic!("expected commit failure, got {other:?}"),
    }

    // Step one is durable, steps two and three never happened.
    assert_eq!(ledger.get_vote_for_project_by_voter("p1", "v1").unwrap().vote_percent, 30.0);
    assert!(ledger.get_votes_by_project_id("p1").unwrap().is_empty());
    assert_eq!(ledger.get_project("p1").unwrap().cost_covered, 0.0);

    ledger.store().heal();
    let receipt = votes.submit(&vote_json("v1", "p1", 30)).unwrap();
    assert_eq!(receipt.outcome(CommitStep::RecordVote), Some(StepOutcome::Skipped));
    assert_eq!(receipt.outcome(CommitStep::AppendProjectVote), Some(StepOutcome::Applied));
    assert_eq!(receipt.outcome(CommitStep::AccumulateCost), Some(StepOutcome::Applied));

    assert_eq!(ledger.get_votes_by_project_id("p1").unwrap().len(), 1);
    assert_eq!(ledger.get_project("p1").unwrap().cost_covered, 30.0);
    assert_eq!(ledger.indexes().list(IndexName::Votes).unwrap(), vec!["vote_v1_p1"]);
}

#[test]
fn failure_at_cost_update_is_finished_by_retry_without_double_count() {
    let ledger = Ledger::new(FaultyStore::new());
    seed(&ledger);
    let votes = VoteCoordinator::new(&ledger, &AllowListRule);

    ledger.store().fail_puts_to("p1");
    let err = votes.submit(&vote_json("v2", "p1", 25)).unwrap_err();
    assert!(matches!(
        err,
        LedgerError::CommitFailed { step: CommitStep::AccumulateCost, .. }
    ));
    // Visible intermediate state: vote listed, total not yet updated.
    assert_eq!(ledger.get_votes_by_project_id("p1").unwrap().len(), 1);
    assert_eq!(ledger.get_project("p1").unwrap().cost_covered, 0.0);

    ledger.store().heal();
    let receipt = votes.submit(&vote_json("v2", "p1", 25)).unwrap();
    assert_eq!(receipt.outcome(CommitStep::AppendProjectVote), Some(StepOutcome::Skipped));
    assert_eq!(receipt.outcome(CommitStep::AccumulateCost), Some(StepOutcome::Applied));

    // A further identical submission is a pure replay.
    assert!(votes.submit(&vote_json("v2", "p1", 25)).unwrap().is_replay());
    assert_eq!(ledger.get_project("p1").unwrap().cost_covered, 25.0);
    assert_eq!(ledger.get_votes_by_project_id("p1").unwrap().len(), 1);
}

#[test]
fn failed_index_append_is_repaired_by_retry() {
    let ledger = Ledger::new(FaultyStore::new());
    seed(&ledger);
    let votes = VoteCoordinator::new(&ledger, &AllowListRule);

    ledger.store().fail_puts_to("_index_votes");
    let err = votes.submit(&vote_json("v1", "p1", 30)).unwrap_err();
    assert!(matches!(
        err,
        LedgerError::CommitFailed { step: CommitStep::RecordVote, .. }
    ));
    assert!(ledger.get_vote_for_project_by_voter("p1", "v1").is_ok());
    assert!(ledger.indexes().list(IndexName::Votes).unwrap().is_empty());

    ledger.store().heal();
    let receipt = votes.submit(&vote_json("v1", "p1", 30)).unwrap();
    assert_eq!(receipt.outcome(CommitStep::RecordVote), Some(StepOutcome::Applied));
    assert_eq!(ledger.indexes().list(IndexName::Votes).unwrap(), vec!["vote_v1_p1"]);
    assert_eq!(ledger.get_project("p1").unwrap().cost_covered, 30.0);

    // Once repaired, a further retry touches nothing.
    assert!(votes.submit(&vote_json("v1", "p1", 30)).unwrap().is_replay());
    assert_eq!(ledger.indexes().list(IndexName::Votes).unwrap(), vec!["vote_v1_p1"]);
}

#[test]
fn oversized_percent_never_reaches_the_project() {
    let ledger = seeded_ledger(LedgerConfig::default());
    let votes = VoteCoordinator::new(&ledger, &AllowListRule);

    for voter in ["v1", "v2"] {
        let payload = format!(r#"{{"voterId":"{voter}","projectId":"p1","votePercent":1e308}}"#);
        assert!(matches!(votes.submit(&payload), Err(LedgerError::Decode { .. })));
    }
    assert!(matches!(
        votes.submit(&vote_json("v1", "p1", 150)),
        Err(LedgerError::Decode { .. })
    ));

    assert_eq!(ledger.get_project("p1").unwrap().cost_covered, 0.0);
    assert_eq!(ledger.get_projects_for_voter("v1", &AllowListRule).unwrap().len(), 1);
}

#[test]
fn malformed_and_dangling_votes_are_rejected() {
    let ledger = seeded_ledger(LedgerConfig::default());
    let votes = VoteCoordinator::new(&ledger, &AllowListRule);

    let err = votes.submit(r#"{"voterId":"v1","votePercent":"lots"}"#).unwrap_err();
    assert!(matches!(err, LedgerError::Decode { .. }));

    let err = votes.submit(&vote_json("v1", "p-missing", 30)).unwrap_err();
    assert!(matches!(err, LedgerError::NotFound { .. }));

    assert!(ledger.indexes().list(IndexName::Votes).unwrap().is_empty());
}

#[test]
fn corrupt_project_record_is_a_decode_rejection() {
    let ledger = seeded_ledger(LedgerConfig::default());
    ledger.store().put("p1", b"<project/>".to_vec()).unwrap();

    let err = VoteCoordinator::new(&ledger, &AllowListRule)
        .submit(&vote_json("v1", "p1", 30))
        .unwrap_err();
    assert!(matches!(err, LedgerError::Decode { .. }));
    assert!(ledger.get_votes_by_project_id("p1").unwrap().is_empty());
}

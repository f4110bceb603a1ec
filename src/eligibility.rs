//! Eligibility rule - who may vote on what.

use crate::entities::{Project, Voter};

/// Decides whether a voter may cast a vote on a project.
///
/// Consulted before any vote is written and by `getProjectsForVoter`, so the
/// two always agree.
pub trait EligibilityRule: Send + Sync {
    fn is_eligible(&self, voter: &Voter, project: &Project) -> bool;
}

impl<F> EligibilityRule for F
where
    F: Fn(&Voter, &Project) -> bool + Send + Sync,
{
    fn is_eligible(&self, voter: &Voter, project: &Project) -> bool {
        self(voter, project)
    }
}

/// The voter's record lists the project, or the project's category.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowListRule;

impl EligibilityRule for AllowListRule {
    fn is_eligible(&self, voter: &Voter, project: &Project) -> bool {
        if voter.allowed_projects.iter().any(|id| *id == project.project_id) {
            return true;
        }
        match &project.category {
            Some(category) => voter.allowed_categories.iter().any(|c| c == category),
            None => false,
        }
    }
}

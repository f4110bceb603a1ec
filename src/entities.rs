//! The participatory-budgeting entities and their wire shape (schema v1).

use serde::{Deserialize, Serialize};

use crate::Record;

/// A registered user. Owns zero or more [`Thing`]s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
#[serde(rename_all = "camelCase")]
#[record(index = "Users")]
pub struct User {
    /// Minted by `addUser`; supplied by the caller for bulk-loaded users.
    #[record(key)]
    #[serde(default)]
    pub user_id: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub first_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,
    pub hash: String,
}

/// An item owned by a user. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
#[serde(rename_all = "camelCase")]
#[record(index = "Things")]
pub struct Thing {
    #[record(key)]
    pub thing_id: String,
    pub user_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// A project voters can fund with percentage-weighted votes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
#[serde(rename_all = "camelCase")]
#[record(index = "Projects")]
pub struct Project {
    #[record(key)]
    pub project_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub budget: f64,
    /// Running total of the vote percentages tallied into this project.
    #[serde(default)]
    pub cost_covered: f64,
    /// Voters whose vote is already part of `cost_covered`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tallied_voters: Vec<String>,
}

impl Project {
    pub fn new(project_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            title: title.into(),
            description: String::new(),
            category: None,
            budget: 0.0,
            cost_covered: 0.0,
            tallied_voters: Vec::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// A person allowed to vote, with the projects and categories open to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
#[serde(rename_all = "camelCase")]
#[record(index = "Voters", prefix = "voter_")]
pub struct Voter {
    #[record(key)]
    pub voter_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default)]
    pub allowed_projects: Vec<String>,
    #[serde(default)]
    pub allowed_categories: Vec<String>,
}

impl Voter {
    pub fn new(voter_id: impl Into<String>) -> Self {
        Self {
            voter_id: voter_id.into(),
            name: String::new(),
            allowed_projects: Vec::new(),
            allowed_categories: Vec::new(),
        }
    }

    pub fn allow_project(mut self, project_id: impl Into<String>) -> Self {
        self.allowed_projects.push(project_id.into());
        self
    }

    pub fn allow_category(mut self, category: impl Into<String>) -> Self {
        self.allowed_categories.push(category.into());
        self
    }
}

/// One voter's weighted vote on one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
#[serde(rename_all = "camelCase")]
#[record(index = "Votes", prefix = "vote_")]
pub struct Vote {
    #[record(key)]
    pub voter_id: String,
    #[record(key)]
    pub project_id: String,
    pub vote_percent: f64,
}

impl Vote {
    pub fn new(voter_id: impl Into<String>, project_id: impl Into<String>, vote_percent: f64) -> Self {
        Self {
            voter_id: voter_id.into(),
            project_id: project_id.into(),
            vote_percent,
        }
    }
}

/// Bulk payload for `addTestdata`: users and things. Voters and projects
/// travel as separate arguments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestData {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub things: Vec<Thing>,
}

/// Outcome of `authenticateAsUser`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAuthenticationResult {
    pub authenticated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

//! Ledger - the store plus its configuration, with the domain lookups on top.

use tracing::{debug, info, warn};

use super::records::RecordRepository;
use crate::codec;
use crate::config::LedgerConfig;
use crate::eligibility::EligibilityRule;
use crate::entities::{
    Project, TestData, Thing, User, UserAuthenticationResult, Vote, Voter,
};
use crate::error::LedgerError;
use crate::index::{IndexManager, IndexName};
use crate::record::Record;
use crate::sequence::IdAllocator;
use crate::store::StateStore;

const PROJECT_VOTES: &str = "project votes";

/// Entry point to ledger state.
///
/// Holds no state of its own: indexes, counters and entities all live in
/// the store, so two `Ledger`s over the same store see the same data.
pub struct Ledger<S> {
    store: S,
    config: LedgerConfig,
}

impl<S: StateStore> Ledger<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, LedgerConfig::default())
    }

    pub fn with_config(store: S, config: LedgerConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn indexes(&self) -> IndexManager<'_, S> {
        IndexManager::new(&self.store, &self.config)
    }

    pub fn ids(&self) -> IdAllocator<'_, S> {
        IdAllocator::new(&self.store, &self.config)
    }

    /// Typed repository for one entity kind.
    pub fn records<R: Record>(&self) -> RecordRepository<'_, S, R> {
        RecordRepository::new(&self.store, &self.config)
    }

    /// Write pre-serialized bytes under `key` and append `key` to `index`.
    pub fn store_object(&self, key: &str, index: IndexName, bytes: Vec<u8>) -> Result<(), LedgerError> {
        if self.config.is_reserved_key(key) {
            return Err(LedgerError::decode(
                index.to_string(),
                format!("key {key} is reserved for ledger bookkeeping"),
            ));
        }
        self.store.put(key, bytes)?;
        self.indexes().append(index, key)?;
        Ok(())
    }

    /// Clear every index. Entities stay readable by key.
    pub fn reset_indexes(&self) -> Result<(), LedgerError> {
        self.indexes().reset_all()?;
        info!("all indexes reset");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Writes
    // ------------------------------------------------------------------

    /// Register a user under a freshly minted id and return that id.
    ///
    /// `label` only names the request in logs and errors.
    pub fn add_user(&self, label: &str, user_json: &str) -> Result<String, LedgerError> {
        let mut user: User = codec::decode_str(User::KIND, user_json)?;
        let id = self.mint_user_id().inspect_err(|err| {
            warn!(label, error = %err, "could not mint user id");
        })?;
        user.user_id = id.clone();
        self.records::<User>().store(&user)?;
        info!(label, user_id = %id, "user added");
        Ok(id)
    }

    /// Next counter value whose key is not already held by a bulk-loaded user.
    fn mint_user_id(&self) -> Result<String, LedgerError> {
        let users = self.records::<User>();
        loop {
            let id = self.ids().next_id(IndexName::Users)?;
            if users.get_by_id(&[id.as_str()])?.is_none() {
                return Ok(id);
            }
            debug!(user_id = %id, "minted id already taken, skipping");
        }
    }

    pub fn create_thing(&self, thing_json: &str) -> Result<(), LedgerError> {
        let thing: Thing = codec::decode_str(Thing::KIND, thing_json)?;
        self.records::<Thing>().store(&thing)?;
        Ok(())
    }

    pub fn add_project(&self, project_json: &str) -> Result<(), LedgerError> {
        let project: Project = codec::decode_str(Project::KIND, project_json)?;
        self.store_project(&project)
    }

    pub fn add_voter(&self, voter_json: &str) -> Result<(), LedgerError> {
        let voter: Voter = codec::decode_str(Voter::KIND, voter_json)?;
        self.records::<Voter>().store(&voter)?;
        Ok(())
    }

    /// Bulk load users and things, then voters, then projects.
    ///
    /// Each payload is decoded before its group is written, but groups are
    /// written one after another: a bad projects payload leaves the users,
    /// things and voters already loaded.
    pub fn add_test_data(
        &self,
        test_data_json: &str,
        voters_json: &str,
        projects_json: &str,
    ) -> Result<(), LedgerError> {
        let test_data: TestData = codec::decode_str("test data", test_data_json)?;
        for user in &test_data.users {
            self.records::<User>().store(user)?;
        }
        for thing in &test_data.things {
            self.records::<Thing>().store(thing)?;
        }

        let voters: Vec<Voter> = codec::decode_str("test voters", voters_json)?;
        for voter in &voters {
            self.records::<Voter>().store(voter)?;
        }

        let projects: Vec<Project> = codec::decode_str("test projects", projects_json)?;
        for project in &projects {
            self.store_project(project)?;
        }

        info!(
            users = test_data.users.len(),
            things = test_data.things.len(),
            voters = voters.len(),
            projects = projects.len(),
            "test data loaded"
        );
        Ok(())
    }

    fn store_project(&self, project: &Project) -> Result<(), LedgerError> {
        self.records::<Project>().store(project)?;
        self.put_project_votes(&project.project_id, &[])
    }

    pub(crate) fn put_project_votes(&self, project_id: &str, votes: &[Vote]) -> Result<(), LedgerError> {
        let bytes = codec::encode(PROJECT_VOTES, votes)?;
        self.store.put(&self.config.project_vote_key(project_id), bytes)?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub fn get_user(&self, user_id: &str) -> Result<User, LedgerError> {
        self.records::<User>().require(&[user_id])
    }

    /// Compare the stored hash with `password_hash`. An unknown user is a
    /// failed authentication, not an error.
    pub fn authenticate_as_user(
        &self,
        user_id: &str,
        password_hash: &str,
    ) -> Result<UserAuthenticationResult, LedgerError> {
        let Some(user) = self.records::<User>().get_by_id(&[user_id])? else {
            warn!(user_id, "authentication failed: unknown user");
            return Ok(UserAuthenticationResult {
                authenticated: false,
                user: None,
            });
        };

        let authenticated = user.hash == password_hash;
        if !authenticated {
            warn!(user_id, "authentication failed: hash mismatch");
        }
        Ok(UserAuthenticationResult {
            authenticated,
            user: authenticated.then_some(user),
        })
    }

    pub fn get_things_by_user_id(&self, user_id: &str) -> Result<Vec<Thing>, LedgerError> {
        self.records::<Thing>()
            .list_by_owner(|thing| thing.user_id.as_str(), user_id)
    }

    pub fn get_project(&self, project_id: &str) -> Result<Project, LedgerError> {
        self.records::<Project>().require(&[project_id])
    }

    pub fn get_voter(&self, voter_id: &str) -> Result<Voter, LedgerError> {
        self.records::<Voter>().require(&[voter_id])
    }

    /// Projects `rule` admits for the voter, in Projects-index order.
    pub fn get_projects_for_voter<E: EligibilityRule + ?Sized>(
        &self,
        voter_id: &str,
        rule: &E,
    ) -> Result<Vec<Project>, LedgerError> {
        let voter = self.get_voter(voter_id)?;
        self.records::<Project>()
            .find(&|project| rule.is_eligible(&voter, project))
    }

    pub fn get_vote_for_project_by_voter(
        &self,
        project_id: &str,
        voter_id: &str,
    ) -> Result<Vote, LedgerError> {
        self.records::<Vote>().require(&[voter_id, project_id])
    }

    /// The project's vote list; empty if it was never initialized.
    pub fn get_votes_by_project_id(&self, project_id: &str) -> Result<Vec<Vote>, LedgerError> {
        match self.store.get(&self.config.project_vote_key(project_id))? {
            Some(bytes) => codec::decode(PROJECT_VOTES, &bytes),
            None => Ok(Vec::new()),
        }
    }
}

//! In-memory collaborators
//!
//! Stand-ins for PostgreSQL and Discord that record how they were called.
//! Compiled for this crate's tests and, with the `testing` feature, for
//! downstream test crates.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use appeal_core::{
    AccessGrant, Appeal, AppealConfig, AppealConfigRepository, AppealQuestion, AppealRepository,
    AppealStatus, BanRecord, DomainError, Identity, IdentityProvider, OAuthClient, RepoResult,
    Snowflake,
};
use async_trait::async_trait;
use chrono::Utc;

use crate::services::ServiceContext;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// Appeal storage
// ============================================================================

/// Appeals keyed by user id; `create` is check-and-insert under one lock
#[derive(Default)]
pub struct InMemoryAppealRepository {
    appeals: Mutex<HashMap<Snowflake, Appeal>>,
    fail: AtomicBool,
    lookups: AtomicUsize,
    writes: AtomicUsize,
}

impl InMemoryAppealRepository {
    /// Store an appeal directly, bypassing the conditional write
    pub fn insert(&self, appeal: Appeal) {
        lock(&self.appeals).insert(appeal.user_id, appeal);
    }

    /// Move an appeal to another status, as the reviewer would
    pub fn set_status(&self, user_id: Snowflake, status: AppealStatus) {
        if let Some(appeal) = lock(&self.appeals).get_mut(&user_id) {
            appeal.status = status;
        }
    }

    pub fn get(&self, user_id: Snowflake) -> Option<Appeal> {
        lock(&self.appeals).get(&user_id).cloned()
    }

    pub fn len(&self) -> usize {
        lock(&self.appeals).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Make every call fail with a database error
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Number of `find_by_user` calls
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    /// Number of successful writes
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn check(&self) -> RepoResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl AppealRepository for InMemoryAppealRepository {
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Option<Appeal>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.get(user_id))
    }

    async fn create(&self, appeal: &Appeal) -> RepoResult<()> {
        self.check()?;
        let mut appeals = lock(&self.appeals);
        if appeals.contains_key(&appeal.user_id) {
            return Err(DomainError::AppealAlreadyExists(appeal.user_id));
        }
        appeals.insert(appeal.user_id, appeal.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn ping(&self) -> RepoResult<()> {
        self.check()
    }
}

/// Questionnaire config held in memory
#[derive(Default)]
pub struct InMemoryConfigRepository {
    config: Mutex<Option<AppealConfig>>,
}

impl InMemoryConfigRepository {
    pub fn set_questions(&self, questions: Vec<String>) {
        *lock(&self.config) = Some(AppealConfig::new(questions));
    }
}

#[async_trait]
impl AppealConfigRepository for InMemoryConfigRepository {
    async fn get(&self) -> RepoResult<Option<AppealConfig>> {
        Ok(lock(&self.config).clone())
    }
}

// ============================================================================
// Identity provider
// ============================================================================

/// Scripted Discord: known tokens, known bans, and call counters
#[derive(Default)]
pub struct FakeIdentityProvider {
    users: Mutex<HashMap<String, Identity>>,
    bans: Mutex<HashMap<(Snowflake, Snowflake), BanRecord>>,
    codes: Mutex<HashMap<String, AccessGrant>>,
    ban_lookup_fails: AtomicBool,
    user_calls: AtomicUsize,
    ban_calls: AtomicUsize,
}

impl FakeIdentityProvider {
    /// Make `token` resolve to `identity`
    pub fn add_user(&self, token: &str, identity: Identity) {
        lock(&self.users).insert(token.to_string(), identity);
    }

    pub fn ban(&self, guild_id: Snowflake, user_id: Snowflake) {
        lock(&self.bans).insert(
            (guild_id, user_id),
            BanRecord {
                user_id,
                reason: Some("rule violation".to_string()),
            },
        );
    }

    /// Make `code` exchangeable for `access_token`
    pub fn add_code(&self, code: &str, access_token: &str, expires_in: i64) {
        lock(&self.codes).insert(
            code.to_string(),
            AccessGrant {
                access_token: access_token.to_string(),
                expires_in,
            },
        );
    }

    /// Make the guild ban lookup fail
    pub fn set_ban_lookup_failing(&self, fail: bool) {
        self.ban_lookup_fails.store(fail, Ordering::SeqCst);
    }

    /// Number of `current_user` calls
    pub fn user_calls(&self) -> usize {
        self.user_calls.load(Ordering::SeqCst)
    }

    /// Number of `guild_ban` calls
    pub fn ban_calls(&self) -> usize {
        self.ban_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentityProvider {
    async fn current_user(&self, bearer_token: &str) -> Result<Identity, DomainError> {
        self.user_calls.fetch_add(1, Ordering::SeqCst);
        lock(&self.users)
            .get(bearer_token)
            .cloned()
            .ok_or(DomainError::TokenRejected)
    }

    async fn guild_ban(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
    ) -> Result<Option<BanRecord>, DomainError> {
        self.ban_calls.fetch_add(1, Ordering::SeqCst);
        if self.ban_lookup_fails.load(Ordering::SeqCst) {
            return Err(DomainError::ProviderError("502 Bad Gateway".to_string()));
        }
        Ok(lock(&self.bans).get(&(guild_id, user_id)).cloned())
    }
}

/// OAuth side of the fake, sharing the provider's code table
pub struct FakeOAuthClient {
    provider: Arc<FakeIdentityProvider>,
}

impl FakeOAuthClient {
    pub const AUTHORIZE_URL: &'static str =
        "https://discord.test/oauth2/authorize?client_id=test&response_type=code&scope=identify";

    pub fn new(provider: Arc<FakeIdentityProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl OAuthClient for FakeOAuthClient {
    fn authorize_url(&self) -> String {
        Self::AUTHORIZE_URL.to_string()
    }

    async fn exchange_code(&self, code: &str) -> Result<AccessGrant, DomainError> {
        lock(&self.provider.codes)
            .get(code)
            .cloned()
            .ok_or_else(|| DomainError::CodeExchangeFailed("invalid_grant".to_string()))
    }
}

// ============================================================================
// Harness
// ============================================================================

/// All fakes wired into one context
#[derive(Clone)]
pub struct TestHarness {
    pub appeals: Arc<InMemoryAppealRepository>,
    pub config: Arc<InMemoryConfigRepository>,
    pub provider: Arc<FakeIdentityProvider>,
}

impl TestHarness {
    pub const GUILD_ID: Snowflake = Snowflake::new(81_384_788_765_712_384);

    pub fn new() -> Self {
        Self {
            appeals: Arc::new(InMemoryAppealRepository::default()),
            config: Arc::new(InMemoryConfigRepository::default()),
            provider: Arc::new(FakeIdentityProvider::default()),
        }
    }

    pub fn context(&self) -> ServiceContext {
        ServiceContext::new(
            self.appeals.clone(),
            self.config.clone(),
            self.provider.clone(),
            Arc::new(FakeOAuthClient::new(self.provider.clone())),
            Self::GUILD_ID,
        )
    }

    /// A logged-in user who is not banned
    pub fn user(&self, token: &str, id: i64, username: &str) -> Identity {
        let identity = Identity::new(Snowflake::new(id), username, "0001");
        self.provider.add_user(token, identity.clone());
        identity
    }

    /// A logged-in user banned from the guild
    pub fn banned_user(&self, token: &str, id: i64, username: &str) -> Identity {
        let identity = self.user(token, id, username);
        self.provider.ban(Self::GUILD_ID, identity.id);
        identity
    }

    /// Put an existing appeal on file
    pub fn seed_appeal(&self, user_id: Snowflake, status: AppealStatus) {
        self.appeals.insert(Appeal {
            user_id,
            status,
            questions: vec![AppealQuestion::new(
                "Are you sorry?",
                "Yes, I am sorry for what I did.",
            )],
            created_at: Utc::now(),
        });
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

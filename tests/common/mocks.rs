use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use template_market::domain::{Account, NewAccount, Session};
use template_market::error::{AppError, AppResult};
use template_market::infrastructure::repositories::{AccountRepository, SessionRepository};

#[derive(Default)]
pub struct MockAccountRepository {
    accounts: Mutex<Vec<Account>>,
    next_id: AtomicI64,
}

impl MockAccountRepository {
    pub fn all(&self) -> Vec<Account> {
        self.accounts.lock().expect("accounts mutex poisoned").clone()
    }

    pub fn count(&self) -> usize {
        self.accounts.lock().expect("accounts mutex poisoned").len()
    }

    pub fn by_email(&self, email: &str) -> Option<Account> {
        self.all().into_iter().find(|account| account.email == email)
    }
}

#[async_trait]
impl AccountRepository for MockAccountRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Account>> {
        Ok(self.all().into_iter().find(|account| account.id == id))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        Ok(self.by_email(email))
    }

    async fn create(&self, account: &NewAccount) -> AppResult<Account> {
        account.ensure_auth_method()?;

        let mut accounts = self.accounts.lock().expect("accounts mutex poisoned");
        if accounts.iter().any(|existing| existing.email == account.email) {
            return Err(AppError::field_error("email", "unique", "Email already exists"));
        }

        let now = Utc::now();
        let created = Account {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            username: account.username.clone(),
            storename: None,
            email: account.email.clone(),
            password_hash: account.password_hash.clone(),
            avatar: account.avatar.clone(),
            role: account.role,
            google_id: account.google_id.clone(),
            facebook_id: account.facebook_id.clone(),
            created_at: now,
            updated_at: now,
        };
        accounts.push(created.clone());
        Ok(created)
    }

    async fn update_profile(
        &self,
        id: i64,
        username: Option<&str>,
        avatar: Option<&str>,
    ) -> AppResult<Account> {
        let mut accounts = self.accounts.lock().expect("accounts mutex poisoned");
        let account = accounts
            .iter_mut()
            .find(|account| account.id == id)
            .ok_or_else(|| AppError::NotFound("Account not found".to_string()))?;
        if let Some(username) = username {
            account.username = Some(username.to_string());
        }
        if let Some(avatar) = avatar {
            account.avatar = Some(avatar.to_string());
        }
        account.updated_at = Utc::now();
        Ok(account.clone())
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        self.accounts
            .lock()
            .expect("accounts mutex poisoned")
            .retain(|account| account.id != id);
        Ok(())
    }
}

#[derive(Default)]
pub struct MockSessionRepository {
    sessions: Mutex<Vec<Session>>,
    fail_create: AtomicBool,
    fail_delete: AtomicBool,
}

impl MockSessionRepository {
    pub fn fail_next_creates(&self, fail: bool) {
        self.fail_create.store(fail, Ordering::SeqCst);
    }

    pub fn fail_next_deletes(&self, fail: bool) {
        self.fail_delete.store(fail, Ordering::SeqCst);
    }

    pub fn push(&self, session: Session) {
        self.sessions
            .lock()
            .expect("sessions mutex poisoned")
            .push(session);
    }

    pub fn all(&self) -> Vec<Session> {
        self.sessions.lock().expect("sessions mutex poisoned").clone()
    }

    pub fn count(&self) -> usize {
        self.sessions.lock().expect("sessions mutex poisoned").len()
    }

    pub fn contains(&self, refresh_token: &str) -> bool {
        self.all()
            .iter()
            .any(|session| session.refresh_token == refresh_token)
    }
}

#[async_trait]
impl SessionRepository for MockSessionRepository {
    async fn create(&self, session: &Session) -> AppResult<Session> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(AppError::ServiceUnavailable {
                service: "database".to_string(),
                message: "Service temporarily unavailable. Please try again later.".to_string(),
            });
        }

        let mut sessions = self.sessions.lock().expect("sessions mutex poisoned");
        if sessions
            .iter()
            .any(|existing| existing.refresh_token == session.refresh_token)
        {
            return Err(AppError::Conflict("session already exists".to_string()));
        }
        sessions.push(session.clone());
        Ok(session.clone())
    }

    async fn find_by_token(&self, refresh_token: &str) -> AppResult<Option<Session>> {
        Ok(self
            .all()
            .into_iter()
            .find(|session| session.refresh_token == refresh_token))
    }

    async fn delete_by_token(&self, refresh_token: &str) -> AppResult<bool> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(AppError::ServiceUnavailable {
                service: "database".to_string(),
                message: "Service temporarily unavailable. Please try again later.".to_string(),
            });
        }

        let mut sessions = self.sessions.lock().expect("sessions mutex poisoned");
        let before = sessions.len();
        sessions.retain(|session| session.refresh_token != refresh_token);
        Ok(sessions.len() != before)
    }

    async fn count_for_account(&self, account_id: i64) -> AppResult<i64> {
        Ok(self
            .all()
            .iter()
            .filter(|session| session.account_id == account_id)
            .count() as i64)
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let mut sessions = self.sessions.lock().expect("sessions mutex poisoned");
        let before = sessions.len();
        sessions.retain(|session| session.is_live(now));
        Ok((before - sessions.len()) as u64)
    }
}

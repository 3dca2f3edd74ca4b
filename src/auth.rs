use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::AdminCredentials;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub email: String,
    pub name: String,
}

/// Decides whether a login attempt is an administrator. The ledger never
/// calls this; the API checks it before any write reaches the ledger.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, email: &str, password: &str) -> Option<AdminUser>;
}

/// A single administrator account taken from configuration.
pub struct StaticCredentials {
    credentials: AdminCredentials,
}

impl StaticCredentials {
    pub fn new(credentials: AdminCredentials) -> Self {
        Self { credentials }
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, email: &str, password: &str) -> Option<AdminUser> {
        let c = &self.credentials;
        (email.trim().eq_ignore_ascii_case(&c.email) && password == c.password).then(|| AdminUser {
            email: c.email.clone(),
            name: c.name.clone(),
        })
    }
}

/// Bearer tokens issued at login. Sessions live until logout or restart.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, AdminUser>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn open(&self, user: AdminUser) -> Uuid {
        let token = Uuid::new_v4();
        self.sessions.write().await.insert(token, user);
        token
    }

    pub async fn get(&self, token: &Uuid) -> Option<AdminUser> {
        self.sessions.read().await.get(token).cloned()
    }

    pub async fn close(&self, token: &Uuid) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verifier() -> StaticCredentials {
        StaticCredentials::new(AdminCredentials {
            email: "maria@example.com".into(),
            password: "secreto".into(),
            name: "María".into(),
        })
    }

    #[test]
    fn test_verify_accepts_configured_admin() {
        let user = verifier().verify(" Maria@Example.com", "secreto").unwrap();
        assert_eq!(user.name, "María");
        assert_eq!(user.email, "maria@example.com");
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        assert!(verifier().verify("maria@example.com", "Secreto").is_none());
        assert!(verifier().verify("otro@example.com", "secreto").is_none());
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let sessions = SessionStore::new();
        let user = AdminUser { email: "a@b.c".into(), name: "A".into() };
        let token = sessions.open(user.clone()).await;

        assert_eq!(sessions.get(&token).await, Some(user));
        assert!(sessions.close(&token).await);
        assert!(sessions.get(&token).await.is_none());
        assert!(!sessions.close(&token).await);
    }
}

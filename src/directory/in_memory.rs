use crate::directory::{Membership, UserDirectory};
use crate::error::LedgerError;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

/// In-memory group/user registry for wiring and tests.
pub struct InMemoryDirectory {
    groups: Mutex<HashMap<Uuid, Vec<Uuid>>>, // group_id -> member ids
    names: Mutex<HashMap<Uuid, String>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        InMemoryDirectory {
            groups: Mutex::new(HashMap::new()),
            names: Mutex::new(HashMap::new()),
        }
    }

    pub async fn add_user(&self, user_id: Uuid, name: &str) {
        self.names.lock().await.insert(user_id, name.to_string());
    }

    pub async fn add_group(&self, group_id: Uuid, members: Vec<Uuid>) {
        self.groups.lock().await.insert(group_id, members);
    }
}

impl Default for InMemoryDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Membership for InMemoryDirectory {
    async fn group_exists(&self, group_id: Uuid) -> Result<bool, LedgerError> {
        Ok(self.groups.lock().await.contains_key(&group_id))
    }

    async fn is_member(&self, group_id: Uuid, user_id: Uuid) -> Result<bool, LedgerError> {
        Ok(self
            .groups
            .lock()
            .await
            .get(&group_id)
            .is_some_and(|members| members.contains(&user_id)))
    }

    async fn members(&self, group_id: Uuid) -> Result<Vec<Uuid>, LedgerError> {
        self.groups
            .lock()
            .await
            .get(&group_id)
            .cloned()
            .ok_or(LedgerError::GroupNotFound(group_id))
    }

    async fn groups_of(&self, user_id: Uuid) -> Result<Vec<Uuid>, LedgerError> {
        let groups = self.groups.lock().await;
        let mut ids: Vec<Uuid> = groups
            .iter()
            .filter(|(_, members)| members.contains(&user_id))
            .map(|(group_id, _)| *group_id)
            .collect();
        ids.sort();
        Ok(ids)
    }
}

#[async_trait]
impl UserDirectory for InMemoryDirectory {
    async fn name_of(&self, user_id: Uuid) -> Result<String, LedgerError> {
        Ok(self
            .names
            .lock()
            .await
            .get(&user_id)
            .cloned()
            .unwrap_or_else(|| user_id.to_string()))
    }
}

//! In-memory user store.
//!
//! All state sits behind one `RwLock`, so every operation is applied as a
//! single step and ids come from a counter that only the writer holding the
//! lock can advance.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, instrument, trace, warn};

use crate::error::{ModelError, Result};
use crate::user::{NewUser, User, UserPatch};

#[derive(Debug)]
struct Inner {
    users: BTreeMap<i32, User>,
    /// username -> id, kept in lockstep with `users`
    usernames: HashMap<String, i32>,
    /// Last id handed out. Ids are never reused.
    last_id: i32,
}

/// Authoritative collection of users, shared by cloning the handle.
#[derive(Clone, Debug)]
pub struct UserStore {
    inner: Arc<RwLock<Inner>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                users: BTreeMap::new(),
                usernames: HashMap::new(),
                last_id: 0,
            })),
        }
    }

    /// Inserts a new user under the next unused id.
    ///
    /// Fails with [`ModelError::Conflict`] if the username is taken, in which
    /// case nothing is inserted and no id is consumed.
    #[instrument(skip(self, new_user), fields(username = %new_user.username))]
    pub async fn create(&self, new_user: NewUser) -> Result<User> {
        trace!("Entering UserStore::create");
        let mut inner = self.inner.write().await;

        if inner.usernames.contains_key(&new_user.username) {
            warn!("Username '{}' already exists", new_user.username);
            return Err(ModelError::Conflict(new_user.username));
        }

        inner.last_id += 1;
        let id = inner.last_id;
        let user = User::from_new(id, new_user);
        inner.usernames.insert(user.username.clone(), id);
        inner.users.insert(id, user.clone());

        info!("User created with ID: {}, username: {}", id, user.username);
        Ok(user)
    }

    /// Snapshot of every stored user, ascending by id.
    #[instrument(skip(self))]
    pub async fn get_many(&self) -> Vec<User> {
        let inner = self.inner.read().await;
        let users: Vec<User> = inner.users.values().cloned().collect();
        debug!("Retrieved {} users", users.len());
        users
    }

    #[instrument(skip(self))]
    pub async fn get_one(&self, id: i32) -> Result<User> {
        let inner = self.inner.read().await;
        match inner.users.get(&id) {
            Some(user) => Ok(user.clone()),
            None => {
                warn!("User with ID {} not found", id);
                Err(ModelError::NotFound(id))
            }
        }
    }

    /// Replaces the fields present in `patch`.
    ///
    /// Renaming onto a username owned by a different user is a
    /// [`ModelError::Conflict`]; the stored record is left untouched.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: i32, patch: UserPatch) -> Result<User> {
        trace!("Entering UserStore::update for user_id: {}", id);
        let mut inner = self.inner.write().await;

        let Some(current) = inner.users.get(&id) else {
            warn!("User with ID {} not found for update", id);
            return Err(ModelError::NotFound(id));
        };

        if let Some(username) = &patch.username {
            if let Some(&owner) = inner.usernames.get(username) {
                if owner != id {
                    warn!("Cannot rename user {} to '{}': username taken by {}", id, username, owner);
                    return Err(ModelError::Conflict(username.clone()));
                }
            }
        }

        if patch.is_empty() {
            debug!("No fields to update for user ID: {}", id);
        }

        let updated = patch.apply_to(current);
        let previous_username = current.username.clone();
        if previous_username != updated.username {
            inner.usernames.remove(&previous_username);
            inner.usernames.insert(updated.username.clone(), id);
        }
        inner.users.insert(id, updated.clone());

        info!("User with ID {} updated successfully", id);
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<()> {
        let mut inner = self.inner.write().await;
        match inner.users.remove(&id) {
            Some(user) => {
                inner.usernames.remove(&user.username);
                info!("User with ID {} deleted successfully", id);
                Ok(())
            }
            None => {
                warn!("User with ID {} not found for deletion", id);
                Err(ModelError::NotFound(id))
            }
        }
    }

    /// The user whose username and password both match, if any.
    #[instrument(skip(self, password))]
    pub async fn find_by_credentials(&self, username: &str, password: &str) -> Option<User> {
        let inner = self.inner.read().await;
        inner
            .usernames
            .get(username)
            .and_then(|id| inner.users.get(id))
            .filter(|user| user.password == password)
            .cloned()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

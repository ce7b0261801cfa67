use serde::{Deserialize, Serialize};

/// A registered account.
///
/// `id` is assigned by [`crate::store::UserStore`] and never changes afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    /// Stored as given.
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Fields supplied when creating a user; the store picks the id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Partial replacement of a user's mutable fields. `None` keeps the current value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    pub username: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.password.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
    }

    /// Returns a copy of `user` with every provided field replaced.
    pub(crate) fn apply_to(self, user: &User) -> User {
        User {
            id: user.id,
            username: self.username.unwrap_or_else(|| user.username.clone()),
            password: self.password.unwrap_or_else(|| user.password.clone()),
            first_name: self.first_name.unwrap_or_else(|| user.first_name.clone()),
            last_name: self.last_name.unwrap_or_else(|| user.last_name.clone()),
        }
    }
}

impl User {
    pub(crate) fn from_new(id: i32, new_user: NewUser) -> Self {
        Self {
            id,
            username: new_user.username,
            password: new_user.password,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
        }
    }
}

/// Username and password pair presented at login.
#[derive(Clone, Deserialize, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

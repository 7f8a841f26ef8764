//! In-memory user fixture served by the demo routes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub friends: Vec<User>,
}

impl User {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            friends: Vec::new(),
        }
    }
}

/// Read-only users and friend lists keyed by id.
#[derive(Debug, Clone, Default)]
pub struct UserStore {
    users: HashMap<u32, User>,
    friends: HashMap<u32, Vec<User>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Two users; user 1 has user 2 as a friend.
    pub fn seeded() -> Self {
        let mut store = Self::new();
        store.insert_user(1, User::new("Joe", "Smith"));
        store.insert_user(2, User::new("Heather", "Erica"));
        store.insert_friends(1, vec![User::new("Heather", "Erica")]);
        store
    }

    pub fn insert_user(&mut self, id: u32, user: User) {
        self.users.insert(id, user);
    }

    pub fn insert_friends(&mut self, id: u32, friends: Vec<User>) {
        self.friends.insert(id, friends);
    }

    pub fn user(&self, id: u32) -> Option<User> {
        self.users.get(&id).cloned()
    }

    /// Friends of `id`; empty when none are recorded.
    pub fn friends(&self, id: u32) -> Vec<User> {
        self.friends.get(&id).cloned().unwrap_or_default()
    }
}

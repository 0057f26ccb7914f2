//! Users alerts can be assigned to

use serde::{Deserialize, Serialize};

/// Known-user list backing the assignment picker
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRoster {
    users: Vec<String>,
}

impl UserRoster {
    /// Build a roster, dropping blanks and duplicates but keeping order
    pub fn new<I, S>(users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut roster = Self::default();
        for user in users {
            let user = user.into().trim().to_string();
            if !user.is_empty() && !roster.contains(&user) {
                roster.users.push(user);
            }
        }
        roster
    }

    pub fn contains(&self, user: &str) -> bool {
        self.users.iter().any(|u| u == user)
    }

    /// Case-insensitive lookup returning the roster spelling
    pub fn resolve(&self, name: &str) -> Option<&str> {
        let name = name.trim();
        self.users
            .iter()
            .find(|u| u.eq_ignore_ascii_case(name))
            .map(String::as_str)
    }

    pub fn users(&self) -> &[String] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

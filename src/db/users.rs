use anyhow::{anyhow, Context, Result};
use rusqlite::params;

use super::Store;
use crate::models::User;

impl Store {
    /// Insert a user and return the new id.
    pub fn add_user(&self, name: &str, dietary_pref: &str) -> Result<i64> {
        if name.trim().is_empty() {
            return Err(anyhow!("User name is required."));
        }
        self.conn
            .execute(
                "INSERT INTO users (name, dietary_pref) VALUES (?1, ?2)",
                params![name, dietary_pref],
            )
            .context("failed to insert user")?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Every user in signup order. The review form cycles through this list.
    pub fn list_users(&self) -> Result<Vec<User>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, dietary_pref FROM users ORDER BY id")
            .context("failed to prepare user query")?;

        let users = stmt
            .query_map([], |row| {
                Ok(User {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    dietary_pref: row.get(2)?,
                })
            })
            .context("failed to iterate users")?
            .collect::<Result<Vec<_>, _>>()
            .context("failed to collect users")?;

        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn users_come_back_in_signup_order() {
        let store = Store::open_in_memory().unwrap();
        let alice = store.add_user("Alice", "Vegetarian").unwrap();
        let bob = store.add_user("Bob", "Vegan").unwrap();

        let users = store.list_users().unwrap();

        assert_eq!(
            users,
            vec![
                User {
                    id: alice,
                    name: "Alice".into(),
                    dietary_pref: "Vegetarian".into(),
                },
                User {
                    id: bob,
                    name: "Bob".into(),
                    dietary_pref: "Vegan".into(),
                },
            ]
        );
    }

    #[test]
    fn blank_user_name_is_rejected() {
        let store = Store::open_in_memory().unwrap();
        assert!(store.add_user("", "Vegan").is_err());
    }
}

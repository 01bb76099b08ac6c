//! Accessors for the session user record.
//!
//! The `user` key holds a single JSON object (or nothing), not an array:
//! there is exactly one signed-in user per store.

use atelier_shared::constants::KEY_USER;

use crate::error::Result;
use crate::models::User;
use crate::store::Store;

impl Store {
    /// The persisted session user, if someone is signed in.
    pub fn session_user(&self) -> Result<Option<User>> {
        self.read_single(KEY_USER)
    }

    /// Persist `user` as the current session.
    pub fn save_session(&self, user: &User) -> Result<()> {
        tracing::info!(user = %user.id, "saving session");
        self.write_single(KEY_USER, user)
    }

    /// Drop the session record.  Other collections are left untouched, so
    /// a later sign-in sees the same marketplace data.
    pub fn clear_session(&self) -> Result<()> {
        self.delete_key(KEY_USER)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use atelier_shared::types::{Role, UserId};
    use chrono::Utc;

    use super::*;
    use crate::database::Database;

    fn open_temp() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open_at(&dir.path().join("test.db")).expect("should open");
        (dir, Store::open(db))
    }

    fn user(name: &str) -> User {
        User {
            id: UserId::new(),
            name: name.to_string(),
            email: format!("{name}@example.com"),
            avatar: format!("https://ui-avatars.com/api/?name={name}"),
            role: Role::Both,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn session_lifecycle() {
        let (_dir, store) = open_temp();
        assert!(store.session_user().unwrap().is_none());

        let me = user("ana");
        store.save_session(&me).unwrap();
        assert_eq!(store.session_user().unwrap(), Some(me));

        store.clear_session().unwrap();
        assert!(store.session_user().unwrap().is_none());
    }

    #[test]
    fn sign_out_keeps_other_collections() {
        let (_dir, store) = open_temp();
        let me = user("ana");
        store.save_session(&me).unwrap();
        store
            .update("reviews", |mut v: Vec<String>| {
                v.push("kept".to_string());
                v
            })
            .unwrap();

        store.clear_session().unwrap();

        let reviews: Vec<String> = store.read("reviews").unwrap();
        assert_eq!(reviews, vec!["kept"]);
    }
}

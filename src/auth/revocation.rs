use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use tracing::debug;
use uuid::Uuid;

/// In-process denylist of revoked token IDs.
///
/// Each entry remembers the `exp` of the token it revokes; once that moment
/// passes the signature check rejects the token anyway, so the entry is
/// dropped on the next prune.
#[derive(Clone, Default)]
pub struct Denylist {
    inner: Arc<Mutex<HashMap<Uuid, usize>>>,
}

impl Denylist {
    /// `true` when this call added the entry; `false` when `jti` was already
    /// revoked or the token has already expired.
    pub fn revoke(&self, jti: Uuid, exp: usize, now: usize) -> bool {
        let mut entries = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        entries.retain(|_, e| *e > now);
        if exp <= now {
            return false;
        }
        let added = entries.insert(jti, exp).is_none();
        debug!(%jti, added, entries = entries.len(), "token revoked");
        added
    }

    pub fn is_revoked(&self, jti: &Uuid) -> bool {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(jti)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(list: &Denylist) -> usize {
        list.inner.lock().unwrap().len()
    }

    #[test]
    fn revoked_ids_are_reported() {
        let list = Denylist::default();
        let jti = Uuid::new_v4();
        assert!(!list.is_revoked(&jti));
        assert!(list.revoke(jti, 2_000, 1_000));
        assert!(list.is_revoked(&jti));
        assert!(!list.is_revoked(&Uuid::new_v4()));
    }

    #[test]
    fn expired_entries_are_pruned_on_revoke() {
        let list = Denylist::default();
        let old = Uuid::new_v4();
        list.revoke(old, 1_500, 1_000);
        list.revoke(Uuid::new_v4(), 5_000, 2_000);
        assert!(!list.is_revoked(&old));
        assert_eq!(entries(&list), 1);
    }

    #[test]
    fn already_expired_token_is_not_stored() {
        let list = Denylist::default();
        assert!(!list.revoke(Uuid::new_v4(), 900, 1_000));
        assert_eq!(entries(&list), 0);
    }

    #[test]
    fn second_revoke_of_same_id_reports_false() {
        let list = Denylist::default();
        let jti = Uuid::new_v4();
        assert!(list.revoke(jti, 2_000, 1_000));
        assert!(!list.revoke(jti, 2_000, 1_001));
        assert!(list.is_revoked(&jti));
    }

    #[test]
    fn clones_share_entries() {
        let list = Denylist::default();
        let other = list.clone();
        let jti = Uuid::new_v4();
        other.revoke(jti, 2_000, 1_000);
        assert!(list.is_revoked(&jti));
    }
}

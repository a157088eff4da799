//! In-memory session store.
//!
//! Sessions live in an arena-style table indexed by their id; ids are
//! dense, zero-based, assigned at creation, and never reused. The table
//! is constructed once at process start and lives until the process
//! exits. A future implementation can swap in a real key-value store
//! without changing the service's contract.

use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::entities::{GameId, GameSession};
use super::errors::GameError;

#[derive(Debug)]
struct Slot {
    session: GameSession,
    /// Serializes read-modify-write cycles on this session. See
    /// [`SessionStore::mutation_guard`].
    guard: Arc<Mutex<()>>,
}

/// The table of every session, keyed by id.
#[derive(Debug, Default)]
pub struct SessionStore {
    slots: RwLock<Vec<Slot>>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a new session, assigning the next sequential id. Slots are
    /// append-only, so no two sessions ever receive the same id.
    pub fn create(&self, mut session: GameSession) -> GameSession {
        let mut slots = self.write_slots();
        session.id = slots.len();
        slots.push(Slot {
            session: session.clone(),
            guard: Arc::new(Mutex::new(())),
        });
        session
    }

    /// Looks up a session by id, returning an owned copy.
    pub fn get(&self, id: GameId) -> Result<GameSession, GameError> {
        let slots = self.read_slots();
        slots
            .get(id)
            .map(|slot| slot.session.clone())
            .ok_or(GameError::NotFound(id))
    }

    /// Overwrites the slot at `session.id` with the updated session.
    ///
    /// Fails with `NotFound` when the id names no existing slot. Callers
    /// are expected to hold an id obtained from a prior `create` or
    /// `get`, so a miss here means the caller fabricated an id.
    pub fn replace(&self, session: GameSession) -> Result<GameSession, GameError> {
        let mut slots = self.write_slots();
        let id = session.id;
        let slot = slots.get_mut(id).ok_or(GameError::NotFound(id))?;
        slot.session = session.clone();
        Ok(session)
    }

    /// Number of sessions created so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read_slots().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read_slots().is_empty()
    }

    /// The per-session mutex. Holding it across a get/replace pair keeps
    /// concurrent operations on the same session from interleaving.
    pub fn mutation_guard(&self, id: GameId) -> Result<Arc<Mutex<()>>, GameError> {
        let slots = self.read_slots();
        slots
            .get(id)
            .map(|slot| Arc::clone(&slot.guard))
            .ok_or(GameError::NotFound(id))
    }

    // Sessions are only ever written as whole snapshots, so a poisoned
    // lock still guards consistent data; recover instead of propagating.
    fn read_slots(&self) -> RwLockReadGuard<'_, Vec<Slot>> {
        self.slots.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_slots(&self) -> RwLockWriteGuard<'_, Vec<Slot>> {
        self.slots.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::deck;
    use crate::game::entities::Stage;

    fn new_session() -> GameSession {
        GameSession::new(deck::shuffled_deck())
    }

    #[test]
    fn test_create_assigns_dense_zero_based_ids() {
        let store = SessionStore::new();
        assert!(store.is_empty());
        for expected in 0..3 {
            let session = store.create(new_session());
            assert_eq!(session.id, expected);
        }
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_get_returns_the_stored_session() {
        let store = SessionStore::new();
        let created = store.create(new_session());
        let fetched = store.get(created.id).unwrap();
        assert_eq!(fetched, created);
    }

    #[test]
    fn test_get_out_of_range_is_not_found() {
        let store = SessionStore::new();
        assert_eq!(store.get(0), Err(GameError::NotFound(0)));
        store.create(new_session());
        assert_eq!(store.get(1), Err(GameError::NotFound(1)));
    }

    #[test]
    fn test_replace_overwrites_the_slot() {
        let store = SessionStore::new();
        let mut session = store.create(new_session());
        session.stage = Stage::Flop;
        store.replace(session.clone()).unwrap();
        assert_eq!(store.get(session.id).unwrap().stage, Stage::Flop);
    }

    #[test]
    fn test_replace_with_fabricated_id_is_not_found() {
        let store = SessionStore::new();
        let mut session = new_session();
        session.id = 7;
        assert_eq!(store.replace(session), Err(GameError::NotFound(7)));
    }

    #[test]
    fn test_mutation_guard_requires_an_existing_session() {
        let store = SessionStore::new();
        assert!(store.mutation_guard(0).is_err());
        let session = store.create(new_session());
        assert!(store.mutation_guard(session.id).is_ok());
    }
}

//! The session state machine.
//!
//! Validates which operations are legal at each stage, moves cards
//! between the session's partitions, persists every successful
//! transition back to the store, and returns the external projection.

use std::sync::{Arc, PoisonError};

use log::{debug, info};

use super::constants::{CARDS_PER_HAND, FLOP_SIZE, MAX_PLAYERS, MIN_PLAYERS};
use super::deck;
use super::entities::{Card, GameId, GameSession, GameView, Player, Stage};
use super::errors::GameError;
use super::store::SessionStore;

/// Executes game operations against sessions held in a [`SessionStore`].
///
/// Mutating operations serialize per session: the store's mutation guard
/// is held for the entire read-validate-write cycle, so two concurrent
/// calls on the same id cannot interleave and corrupt the player list or
/// the card partitions. A rejected operation never reaches the store;
/// the stored session stays exactly as it was.
#[derive(Debug)]
pub struct GameService {
    store: Arc<SessionStore>,
}

impl GameService {
    #[must_use]
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }

    /// Creates a session with a freshly shuffled deck, no players, and an
    /// empty board, waiting at the deal stage.
    pub fn create_game(&self) -> GameView {
        let session = self.store.create(GameSession::new(deck::shuffled_deck()));
        info!("created game {}", session.id);
        session.into()
    }

    /// The projection of the session with the given id.
    pub fn get_game(&self, id: GameId) -> Result<GameView, GameError> {
        Ok(self.store.get(id)?.into())
    }

    /// Seats a new player. Only legal before the cards are dealt.
    pub fn add_player(&self, id: GameId, name: &str) -> Result<GameView, GameError> {
        let view = self.mutate(id, |session| {
            expect_stage(session, Stage::Deal)?;
            if session.players.len() >= MAX_PLAYERS {
                return Err(GameError::GameFull);
            }
            // Player ids concatenate the game id with the join index, so
            // they are unique within a game and stable for its lifetime.
            let player_id = format!("{}{}", session.id, session.players.len());
            session.players.push(Player::new(player_id, name));
            Ok(())
        })?;
        info!("game {id}: seated player {name}");
        Ok(view)
    }

    /// Deals two hole cards to every seated player, in join order, and
    /// advances to the flop. Requires at least two players; a successful
    /// deal can never be repeated.
    pub fn deal_cards(&self, id: GameId) -> Result<GameView, GameError> {
        let view = self.mutate(id, |session| {
            expect_stage(session, Stage::Deal)?;
            if session.players.len() < MIN_PLAYERS {
                return Err(GameError::NotEnoughPlayers {
                    have: session.players.len(),
                });
            }
            let GameSession {
                undealt_deck,
                players,
                ..
            } = session;
            for player in players.iter_mut() {
                player.hand = draw(undealt_deck, CARDS_PER_HAND);
            }
            session.stage = Stage::Flop;
            Ok(())
        })?;
        info!("game {id}: dealt hole cards to {} players", view.players.len());
        Ok(view)
    }

    /// Reveals the flop: three community cards.
    pub fn do_flop(&self, id: GameId) -> Result<GameView, GameError> {
        self.reveal(id, Stage::Flop, FLOP_SIZE)
    }

    /// Reveals the turn card.
    pub fn do_turn(&self, id: GameId) -> Result<GameView, GameError> {
        self.reveal(id, Stage::Turn, 1)
    }

    /// Reveals the river card, moving the game to showdown.
    pub fn do_river(&self, id: GameId) -> Result<GameView, GameError> {
        self.reveal(id, Stage::River, 1)
    }

    /// Number of sessions created since startup.
    #[must_use]
    pub fn game_count(&self) -> usize {
        self.store.len()
    }

    /// Moves `count` cards from the front of the undealt deck onto the
    /// board and advances past `expected`.
    fn reveal(&self, id: GameId, expected: Stage, count: usize) -> Result<GameView, GameError> {
        let view = self.mutate(id, |session| {
            expect_stage(session, expected)?;
            let cards = draw(&mut session.undealt_deck, count);
            session.community_cards.extend(cards);
            // Every stage up to the river has a successor.
            if let Some(next) = expected.next() {
                session.stage = next;
            }
            Ok(())
        })?;
        info!(
            "game {id}: {expected} revealed, board at {} cards",
            view.community_cards.len()
        );
        Ok(view)
    }

    /// Runs `op` on an owned copy of the session and persists the result,
    /// holding the session's mutation guard for the whole cycle.
    fn mutate<F>(&self, id: GameId, op: F) -> Result<GameView, GameError>
    where
        F: FnOnce(&mut GameSession) -> Result<(), GameError>,
    {
        let guard = self.store.mutation_guard(id)?;
        let _locked = guard.lock().unwrap_or_else(PoisonError::into_inner);
        let mut session = self.store.get(id)?;
        if let Err(err) = op(&mut session) {
            debug!("game {id}: rejected operation: {err}");
            return Err(err);
        }
        let session = self.store.replace(session)?;
        Ok(session.into())
    }
}

fn expect_stage(session: &GameSession, expected: Stage) -> Result<(), GameError> {
    if session.stage == expected {
        Ok(())
    } else {
        Err(GameError::WrongStage {
            expected,
            actual: session.stage,
        })
    }
}

/// Removes the next `n` cards from the front of the deck. The shuffle
/// fixed the order at creation; no further randomization happens here.
fn draw(deck: &mut Vec<Card>, n: usize) -> Vec<Card> {
    deck.drain(..n).collect()
}

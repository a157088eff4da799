//! # Poker App
//!
//! The server-side core of a multiplayer Texas hold'em session tracker:
//! session creation, player enrollment, card dealing, and the sequential
//! community-card reveals through showdown.
//!
//! The core is a synchronous state machine over an in-memory session
//! store. A session only ever moves forward along
//! deal -> flop -> turn -> river -> showdown, and after every transition
//! the undealt deck, the board, and the player hands still partition the
//! same 52 cards.
//!
//! Transport adapters (see the `pa_server` crate) call into
//! [`GameService`] and serialize the [`GameView`] it returns; the
//! undealt deck never crosses that boundary.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use poker_app::{GameService, SessionStore};
//!
//! let service = GameService::new(Arc::new(SessionStore::new()));
//! let game = service.create_game();
//! let game = service.add_player(game.id, "alice").unwrap();
//! assert_eq!(game.players[0].name, "alice");
//! ```

/// Core game logic, entities, and the session state machine.
pub mod game;
pub use game::{
    entities::{Card, GameId, GameSession, GameView, Player, Rank, Stage, Suit},
    errors::{GameError, GameErrorKind},
    service::GameService,
    store::SessionStore,
};

//! Sizing rules for a game session.

/// Seats at a full-ring table. Ten players consume at most 25 of the 52
/// cards through the river, so the undealt deck can never run dry.
pub const MAX_PLAYERS: usize = 10;

/// Minimum number of seated players before the cards can be dealt.
pub const MIN_PLAYERS: usize = 2;

/// Hole cards dealt to each player.
pub const CARDS_PER_HAND: usize = 2;

/// Community cards revealed at the flop. The turn and the river reveal
/// one card each.
pub const FLOP_SIZE: usize = 3;

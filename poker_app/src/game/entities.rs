use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, Visitor},
};
use std::fmt;

/// Type alias for session identifiers. Ids are dense, zero-based, and
/// assigned by the store at creation time.
pub type GameId = usize;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Hearts,
    Diamonds,
    Spades,
    Clubs,
}

impl Suit {
    pub const ALL: [Self; 4] = [Self::Hearts, Self::Diamonds, Self::Spades, Self::Clubs];
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Hearts => "♥",
            Self::Diamonds => "♦",
            Self::Spades => "♠",
            Self::Clubs => "♣",
        };
        write!(f, "{repr}")
    }
}

/// Card ranks in ascending order. Aces rank high.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Self; 13] = [
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
        Self::Ten,
        Self::Jack,
        Self::Queen,
        Self::King,
        Self::Ace,
    ];

    /// Numeric rank value (2..=14, ace high).
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
            Self::Five => 5,
            Self::Six => 6,
            Self::Seven => 7,
            Self::Eight => 8,
            Self::Nine => 9,
            Self::Ten => 10,
            Self::Jack => 11,
            Self::Queen => 12,
            Self::King => 13,
            Self::Ace => 14,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Jack => write!(f, "J"),
            Self::Queen => write!(f, "Q"),
            Self::King => write!(f, "K"),
            Self::Ace => write!(f, "A"),
            numeric => write!(f, "{}", numeric.value()),
        }
    }
}

// Numeric ranks cross the wire as JSON numbers and faces as strings,
// the payload shape clients already consume.
impl Serialize for Rank {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Jack => serializer.serialize_str("J"),
            Self::Queen => serializer.serialize_str("Q"),
            Self::King => serializer.serialize_str("K"),
            Self::Ace => serializer.serialize_str("A"),
            numeric => serializer.serialize_u8(numeric.value()),
        }
    }
}

impl<'de> Deserialize<'de> for Rank {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RankVisitor;

        impl Visitor<'_> for RankVisitor {
            type Value = Rank;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a number in 2..=10 or one of \"J\", \"Q\", \"K\", \"A\"")
            }

            fn visit_u64<E>(self, v: u64) -> Result<Rank, E>
            where
                E: de::Error,
            {
                match v {
                    2 => Ok(Rank::Two),
                    3 => Ok(Rank::Three),
                    4 => Ok(Rank::Four),
                    5 => Ok(Rank::Five),
                    6 => Ok(Rank::Six),
                    7 => Ok(Rank::Seven),
                    8 => Ok(Rank::Eight),
                    9 => Ok(Rank::Nine),
                    10 => Ok(Rank::Ten),
                    _ => Err(E::invalid_value(de::Unexpected::Unsigned(v), &self)),
                }
            }

            fn visit_i64<E>(self, v: i64) -> Result<Rank, E>
            where
                E: de::Error,
            {
                match u64::try_from(v) {
                    Ok(v) => self.visit_u64(v),
                    Err(_) => Err(E::invalid_value(de::Unexpected::Signed(v), &self)),
                }
            }

            fn visit_str<E>(self, v: &str) -> Result<Rank, E>
            where
                E: de::Error,
            {
                match v {
                    "J" => Ok(Rank::Jack),
                    "Q" => Ok(Rank::Queen),
                    "K" => Ok(Rank::King),
                    "A" => Ok(Rank::Ace),
                    _ => Err(E::invalid_value(de::Unexpected::Str(v), &self)),
                }
            }
        }

        deserializer.deserialize_any(RankVisitor)
    }
}

/// A playing card. Exactly 52 distinct values exist; the deck module
/// owns the catalog.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    #[must_use]
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

/// The points of a session's lifecycle. Stages only ever advance in
/// declaration order; there is no way back.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Deal,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Stage {
    /// The stage a successful transition out of `self` lands on. Showdown
    /// is terminal.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Deal => Some(Self::Flop),
            Self::Flop => Some(Self::Turn),
            Self::Turn => Some(Self::River),
            Self::River => Some(Self::Showdown),
            Self::Showdown => None,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Deal => "deal",
            Self::Flop => "flop",
            Self::Turn => "turn",
            Self::River => "river",
            Self::Showdown => "showdown",
        };
        write!(f, "{repr}")
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub hand: Vec<Card>,
}

impl Player {
    /// A freshly seated player. Hands stay empty until the deal.
    #[must_use]
    pub fn new(id: String, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            hand: Vec::new(),
        }
    }
}

/// One playthrough's full server-side state, undealt deck included.
///
/// Only the store and the game service ever see this type whole;
/// everything external gets a [`GameView`].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct GameSession {
    /// Placeholder until the store assigns the real id at creation.
    pub id: GameId,
    pub undealt_deck: Vec<Card>,
    /// Insertion order is join order.
    pub players: Vec<Player>,
    pub stage: Stage,
    pub community_cards: Vec<Card>,
}

impl GameSession {
    #[must_use]
    pub fn new(undealt_deck: Vec<Card>) -> Self {
        Self {
            id: 0,
            undealt_deck,
            players: Vec::new(),
            stage: Stage::Deal,
            community_cards: Vec::new(),
        }
    }

    /// Every card the session currently accounts for: the undealt deck,
    /// the board, and all player hands.
    pub fn all_cards(&self) -> impl Iterator<Item = &Card> {
        self.undealt_deck
            .iter()
            .chain(self.community_cards.iter())
            .chain(self.players.iter().flat_map(|player| player.hand.iter()))
    }
}

/// The externally visible view of a session. The undealt deck never
/// leaves the core.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameView {
    pub id: GameId,
    pub players: Vec<Player>,
    pub stage: Stage,
    pub community_cards: Vec<Card>,
}

impl From<GameSession> for GameView {
    fn from(session: GameSession) -> Self {
        Self {
            id: session.id,
            players: session.players,
            stage: session.stage,
            community_cards: session.community_cards,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_suit_wire_format() {
        assert_eq!(serde_json::to_value(Suit::Hearts).unwrap(), json!("hearts"));
        assert_eq!(serde_json::to_value(Suit::Clubs).unwrap(), json!("clubs"));
        let suit: Suit = serde_json::from_value(json!("diamonds")).unwrap();
        assert_eq!(suit, Suit::Diamonds);
    }

    #[test]
    fn test_rank_wire_format() {
        // Numeric ranks are numbers, faces are strings.
        assert_eq!(serde_json::to_value(Rank::Two).unwrap(), json!(2));
        assert_eq!(serde_json::to_value(Rank::Ten).unwrap(), json!(10));
        assert_eq!(serde_json::to_value(Rank::Jack).unwrap(), json!("J"));
        assert_eq!(serde_json::to_value(Rank::Ace).unwrap(), json!("A"));

        let rank: Rank = serde_json::from_value(json!(7)).unwrap();
        assert_eq!(rank, Rank::Seven);
        let rank: Rank = serde_json::from_value(json!("Q")).unwrap();
        assert_eq!(rank, Rank::Queen);

        assert!(serde_json::from_value::<Rank>(json!(11)).is_err());
        assert!(serde_json::from_value::<Rank>(json!("X")).is_err());
        assert!(serde_json::from_value::<Rank>(json!(-3)).is_err());
    }

    #[test]
    fn test_card_wire_format() {
        let card = Card::new(Suit::Spades, Rank::Ace);
        assert_eq!(
            serde_json::to_value(card).unwrap(),
            json!({"suit": "spades", "rank": "A"})
        );
        let card: Card = serde_json::from_value(json!({"suit": "hearts", "rank": 2})).unwrap();
        assert_eq!(card, Card::new(Suit::Hearts, Rank::Two));
    }

    #[test]
    fn test_stage_wire_format_and_order() {
        assert_eq!(serde_json::to_value(Stage::Deal).unwrap(), json!("deal"));
        assert_eq!(
            serde_json::to_value(Stage::Showdown).unwrap(),
            json!("showdown")
        );
        assert!(Stage::Deal < Stage::Flop);
        assert!(Stage::River < Stage::Showdown);
    }

    #[test]
    fn test_stage_progression() {
        assert_eq!(Stage::Deal.next(), Some(Stage::Flop));
        assert_eq!(Stage::Flop.next(), Some(Stage::Turn));
        assert_eq!(Stage::Turn.next(), Some(Stage::River));
        assert_eq!(Stage::River.next(), Some(Stage::Showdown));
        assert_eq!(Stage::Showdown.next(), None);
    }

    #[test]
    fn test_view_omits_undealt_deck() {
        let mut session = GameSession::new(vec![Card::new(Suit::Hearts, Rank::Two)]);
        session.id = 3;
        session.players.push(Player::new("30".to_string(), "alice"));

        let view = GameView::from(session);
        let value = serde_json::to_value(&view).unwrap();

        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["communityCards", "id", "players", "stage"]);
        assert_eq!(value["players"][0]["name"], "alice");
        assert_eq!(value["stage"], "deal");
    }

    #[test]
    fn test_card_display() {
        assert_eq!(Card::new(Suit::Spades, Rank::Ace).to_string(), "A♠");
        assert_eq!(Card::new(Suit::Hearts, Rank::Ten).to_string(), "10♥");
    }
}

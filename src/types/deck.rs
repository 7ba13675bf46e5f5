// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::error::Fallible;
use crate::error::fail;
use crate::types::card::Card;
use crate::types::miss_counts::MissCounts;
use crate::types::timestamp::Timestamp;
use crate::types::trophy::Trophies;

/// The name given to decks created without one.
pub const UNTITLED: &str = "Untitled deck";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub id: String,
    pub name: String,
    pub cards: Vec<Card>,
    #[serde(default)]
    pub trophies: Trophies,
    /// Lifetime miss count per card index.
    #[serde(default)]
    pub card_stats: MissCounts,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    /// Fields written by other clients. Kept as-is so rewriting the deck
    /// list never loses them.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Deck {
    /// Builds a new deck. Blank cards are discarded, and at least one card
    /// must remain.
    pub fn new(id: String, name: &str, cards: Vec<Card>, created_at: Timestamp) -> Fallible<Self> {
        let cards: Vec<Card> = cards.into_iter().filter(|card| !card.is_blank()).collect();
        if cards.is_empty() {
            return fail("deck has no cards.");
        }
        let name = match name.trim() {
            "" => UNTITLED.to_string(),
            name => name.to_string(),
        };
        Ok(Self {
            id,
            name,
            cards,
            trophies: Trophies::default(),
            card_stats: MissCounts::new(),
            is_new: true,
            created_at: Some(created_at),
            extra: Map::new(),
        })
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }
}

/// Picks an id for a deck created at `now`: the creation time in epoch
/// milliseconds, bumped until it doesn't collide with an existing deck.
pub fn fresh_id(existing: &[Deck], now: Timestamp) -> String {
    let mut millis = now.millis();
    loop {
        let id = millis.to_string();
        if !existing.iter().any(|deck| deck.id == id) {
            return id;
        }
        millis += 1;
    }
}

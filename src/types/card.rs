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

/// The maximum length of either side of a card, in characters.
pub const MAX_FIELD_LEN: usize = 1000;

/// A question/answer pair. A card's identity within a deck is its position
/// in the deck's card list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    front: String,
    back: String,
}

impl Card {
    /// Creates a card, truncating each side to [`MAX_FIELD_LEN`] characters.
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: truncate(front.into()),
            back: truncate(back.into()),
        }
    }

    pub fn front(&self) -> &str {
        &self.front
    }

    pub fn back(&self) -> &str {
        &self.back
    }

    /// True if both sides are empty or whitespace.
    pub fn is_blank(&self) -> bool {
        self.front.trim().is_empty() && self.back.trim().is_empty()
    }
}

fn truncate(mut s: String) -> String {
    if let Some((byte_idx, _)) = s.char_indices().nth(MAX_FIELD_LEN) {
        s.truncate(byte_idx);
    }
    s
}

/// A card annotated with its position in the deck. Only lives for the
/// duration of a learn session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CirculationEntry {
    pub card: Card,
    pub index: usize,
}

impl CirculationEntry {
    /// Tags every card with its position.
    pub fn tag_all(cards: &[Card]) -> Vec<CirculationEntry> {
        cards
            .iter()
            .cloned()
            .enumerate()
            .map(|(index, card)| CirculationEntry { card, index })
            .collect()
    }
}

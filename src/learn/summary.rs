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

use serde::Serialize;

use crate::learn::progress::SessionResults;
use crate::types::card::Card;
use crate::types::deck::Deck;
use crate::types::miss_counts::MissCounts;
use crate::types::trophy::Tier;

/// The end-of-session payload.
#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    pub deck: Deck,
    pub new_trophy: Option<Tier>,
    pub card_stats: MissCounts,
}

/// A card worth studying, with how often it was missed.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyItem {
    pub index: usize,
    pub front: String,
    pub back: String,
    pub misses: u32,
}

impl Summary {
    pub fn new(deck: Deck, results: SessionResults) -> Self {
        Self {
            deck,
            new_trophy: results.new_trophy,
            card_stats: results.card_stats,
        }
    }

    pub fn study_list(&self) -> Vec<StudyItem> {
        study_list(&self.deck.cards, &self.card_stats)
    }
}

/// The cards that were ever missed, most-missed first. Cards with the same
/// count keep their deck order.
pub fn study_list(cards: &[Card], stats: &MissCounts) -> Vec<StudyItem> {
    let mut items: Vec<StudyItem> = cards
        .iter()
        .enumerate()
        .filter_map(|(index, card)| {
            let misses = stats.get(index);
            (misses > 0).then(|| StudyItem {
                index,
                front: card.front().to_string(),
                back: card.back().to_string(),
                misses,
            })
        })
        .collect();
    items.sort_by(|a, b| b.misses.cmp(&a.misses));
    items
}

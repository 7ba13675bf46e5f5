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

pub mod order;
pub mod progress;
pub mod session;
pub mod summary;

use crate::learn::progress::apply_results;
use crate::learn::session::SessionOutcome;
use crate::learn::summary::Summary;
use crate::store::DeckStore;
use crate::store::KeyValueStore;
use crate::types::deck::Deck;
use crate::types::trophy::Trophies;

/// Persist a completed session, then build its summary from the deck as
/// stored afterwards. The write is finished before the summary exists, so the
/// summary only reports trophies that were actually saved. If the deck is
/// gone, the session's own snapshot is used.
pub fn finish_session<S: KeyValueStore>(
    decks: &DeckStore<S>,
    deck: Deck,
    outcome: &SessionOutcome,
) -> Summary {
    let results = apply_results(decks, &deck.id, outcome);
    let deck = match decks.find(&deck.id) {
        Ok(Some(updated)) => updated,
        Ok(None) => deck,
        Err(e) => {
            log::warn!("Could not reload deck {}: {e}", deck.id);
            deck
        }
    };
    Summary::new(deck, results)
}

/// The trophies currently stored for a deck. Read failures count as none.
pub fn stored_trophies<S: KeyValueStore>(decks: &DeckStore<S>, deck_id: &str) -> Trophies {
    match decks.find(deck_id) {
        Ok(Some(deck)) => deck.trophies,
        Ok(None) => Trophies::default(),
        Err(e) => {
            log::warn!("Could not load trophies for deck {deck_id}: {e}");
            Trophies::default()
        }
    }
}

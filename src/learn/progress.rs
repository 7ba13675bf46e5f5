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

use crate::error::Fallible;
use crate::learn::session::SessionOutcome;
use crate::store::DeckStore;
use crate::store::KeyValueStore;
use crate::types::miss_counts::MissCounts;
use crate::types::trophy::Tier;

/// What a completed session changed in the deck's record.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionResults {
    /// The tier earned by this session, if any.
    pub new_trophy: Option<Tier>,
    /// The deck's lifetime miss counts, including this session.
    pub card_stats: MissCounts,
}

/// Save a completed session into the deck's record: merge its misses into
/// the lifetime stats and climb the trophy ladder.
///
/// This is best-effort. If the store can't be read or written, or the deck
/// is gone, the failure is logged and the session counts as having earned
/// nothing.
pub fn apply_results<S: KeyValueStore>(
    decks: &DeckStore<S>,
    deck_id: &str,
    outcome: &SessionOutcome,
) -> SessionResults {
    match try_apply_results(decks, deck_id, outcome) {
        Ok(Some(results)) => results,
        Ok(None) => {
            log::warn!("Deck {deck_id} not found, session results were not saved.");
            SessionResults::default()
        }
        Err(e) => {
            log::warn!("Could not save session results for deck {deck_id}: {e}");
            SessionResults::default()
        }
    }
}

fn try_apply_results<S: KeyValueStore>(
    decks: &DeckStore<S>,
    deck_id: &str,
    outcome: &SessionOutcome,
) -> Fallible<Option<SessionResults>> {
    let mut all = decks.load()?;
    let Some(deck) = all.iter_mut().find(|deck| deck.id == deck_id) else {
        return Ok(None);
    };
    let card_count = deck.card_count();
    deck.card_stats.merge(&outcome.miss_counts, card_count);
    let new_trophy = deck.trophies.award(outcome.perfect_session);
    let card_stats = deck.card_stats.clone();
    decks.save(&all)?;
    log::debug!(
        "Saved session for deck {deck_id}: {} cards learned, perfect={}, new trophy={:?}.",
        outcome.got_it_count,
        outcome.perfect_session,
        new_trophy
    );
    Ok(Some(SessionResults {
        new_trophy,
        card_stats,
    }))
}

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

use std::collections::BTreeSet;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::Fallible;
use crate::error::fail;
use crate::learn::order::build_order;
use crate::types::card::CirculationEntry;
use crate::types::deck::Deck;
use crate::types::miss_counts::MissCounts;

/// Which side of the current card is showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Face {
    Presenting,
    Revealed,
}

/// What a finished session hands to progress persistence.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionOutcome {
    pub got_it_count: usize,
    /// True if no card was ever marked as missed.
    pub perfect_session: bool,
    /// Every miss this session, repeats included.
    pub miss_counts: MissCounts,
}

/// The result of a transition.
#[derive(Debug, PartialEq)]
pub enum Step {
    /// Another card is being presented.
    Continue,
    /// The last card was mastered. The outcome must be persisted.
    Complete(SessionOutcome),
    /// The action doesn't apply in the current state. Nothing changed.
    Ignored,
}

/// A learn session over one deck: cards keep coming back, lap after lap,
/// until each one has been answered "got it".
pub struct Session<R: Rng = StdRng> {
    deck: Deck,
    rng: R,
    /// Cards still needing a correct answer, in presentation order.
    circulation: Vec<CirculationEntry>,
    queue_pos: usize,
    face: Face,
    /// Indices of cards missed at least once and still in circulation.
    wrong_set: BTreeSet<usize>,
    got_it_count: usize,
    has_missed: bool,
    miss_counts: MissCounts,
}

impl Session<StdRng> {
    pub fn new(deck: Deck) -> Fallible<Self> {
        Self::with_rng(deck, StdRng::from_os_rng())
    }
}

impl<R: Rng> Session<R> {
    pub fn with_rng(deck: Deck, mut rng: R) -> Fallible<Self> {
        if deck.cards.is_empty() {
            return fail("deck has no cards.");
        }
        let circulation = build_order(CirculationEntry::tag_all(&deck.cards), None, &mut rng);
        log::debug!(
            "Starting learn session on deck {} ({} cards).",
            deck.id,
            circulation.len()
        );
        Ok(Self {
            deck,
            rng,
            circulation,
            queue_pos: 0,
            face: Face::Presenting,
            wrong_set: BTreeSet::new(),
            got_it_count: 0,
            has_missed: false,
            miss_counts: MissCounts::new(),
        })
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn face(&self) -> Face {
        self.face
    }

    /// The card being shown, or `None` once the session is complete.
    pub fn current(&self) -> Option<&CirculationEntry> {
        self.circulation.get(self.queue_pos)
    }

    pub fn circulation(&self) -> &[CirculationEntry] {
        &self.circulation
    }

    pub fn is_complete(&self) -> bool {
        self.circulation.is_empty()
    }

    pub fn total(&self) -> usize {
        self.deck.cards.len()
    }

    pub fn remaining(&self) -> usize {
        self.circulation.len()
    }

    pub fn did_get(&self) -> usize {
        self.got_it_count
    }

    /// Cards currently marked wrong. A card missed several times counts once.
    pub fn didnt_get(&self) -> usize {
        self.wrong_set.len()
    }

    /// Rounded, but never 100 while a card is still in circulation.
    pub fn learned_pct(&self) -> u8 {
        let pct = 100.0 * self.got_it_count as f64 / self.total() as f64;
        let pct = pct.round() as u8;
        if self.is_complete() {
            pct
        } else {
            pct.min(99)
        }
    }

    pub fn has_missed(&self) -> bool {
        self.has_missed
    }

    pub fn miss_counts(&self) -> &MissCounts {
        &self.miss_counts
    }

    pub fn is_wrong(&self, index: usize) -> bool {
        self.wrong_set.contains(&index)
    }

    /// Flip the current card to its answer.
    pub fn reveal(&mut self) {
        if self.is_complete() {
            log::warn!("Revealing a card after the session completed.");
            return;
        }
        self.face = Face::Revealed;
    }

    /// The current card was answered correctly: it leaves circulation for
    /// good.
    pub fn got_it(&mut self) -> Step {
        if !self.answerable() {
            return Step::Ignored;
        }
        let current = self.circulation.remove(self.queue_pos);
        self.got_it_count += 1;
        self.wrong_set.remove(&current.index);
        if self.circulation.is_empty() {
            log::debug!("Learn session completed.");
            self.face = Face::Presenting;
            return Step::Complete(self.outcome());
        }
        self.advance(Some(current.index));
        Step::Continue
    }

    /// The current card was missed: it stays in circulation for a later lap.
    pub fn didnt_get_it(&mut self) -> Step {
        if !self.answerable() {
            return Step::Ignored;
        }
        let index = self.circulation[self.queue_pos].index;
        self.miss_counts.record(index);
        if self.wrong_set.insert(index) {
            self.has_missed = true;
        }
        self.advance(None);
        Step::Continue
    }

    /// Move past the current card without answering it.
    pub fn skip(&mut self) -> Step {
        if self.is_complete() || self.face != Face::Presenting {
            log::warn!("Skipping is only possible before the card is revealed.");
            return Step::Ignored;
        }
        self.advance(None);
        Step::Continue
    }

    fn answerable(&self) -> bool {
        if self.is_complete() {
            log::warn!("Answering a card after the session completed.");
            return false;
        }
        if self.face != Face::Revealed {
            log::warn!("Answering a card that is not revealed.");
            return false;
        }
        true
    }

    fn advance(&mut self, removed: Option<usize>) {
        self.face = Face::Presenting;
        if self.circulation.is_empty() {
            return;
        }
        let next = self.queue_pos + 1;
        if next >= self.circulation.len() {
            // The lap is over: reshuffle whatever is left.
            let last_shown = removed.or_else(|| self.current().map(|entry| entry.index));
            let remaining = std::mem::take(&mut self.circulation);
            self.circulation = build_order(remaining, last_shown, &mut self.rng);
            self.queue_pos = 0;
        } else {
            self.queue_pos = next;
        }
    }

    fn outcome(&self) -> SessionOutcome {
        SessionOutcome {
            got_it_count: self.got_it_count,
            perfect_session: !self.has_missed,
            miss_counts: self.miss_counts.clone(),
        }
    }
}

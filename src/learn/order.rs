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

use rand::Rng;

use crate::types::card::CirculationEntry;

/// Fisher-Yates shuffle.
fn shuffle<T, R: Rng>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// Build a random traversal order over `cards` that never starts with the
/// card at `last_shown`, unless it's the only card left.
pub fn build_order<R: Rng>(
    mut cards: Vec<CirculationEntry>,
    last_shown: Option<usize>,
    rng: &mut R,
) -> Vec<CirculationEntry> {
    shuffle(&mut cards, rng);
    if cards.len() > 1 && Some(cards[0].index) == last_shown {
        cards.swap(0, 1);
    }
    cards
}

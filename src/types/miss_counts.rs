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

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

/// A map from card index to the number of times the card was missed.
///
/// Used both for the misses of a single session and for a deck's lifetime
/// `cardStats`. In JSON the indices are written as strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MissCounts(BTreeMap<usize, u32>);

impl MissCounts {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Counts one more miss of the card at `index`.
    pub fn record(&mut self, index: usize) {
        *self.0.entry(index).or_insert(0) += 1;
    }

    pub fn get(&self, index: usize) -> u32 {
        self.0.get(&index).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.0.iter().map(|(index, count)| (*index, *count))
    }

    /// Adds every positive count in `other` to this map. Indices outside a
    /// deck of `card_count` cards are dropped.
    pub fn merge(&mut self, other: &MissCounts, card_count: usize) {
        for (index, count) in other.iter() {
            if count == 0 {
                continue;
            }
            if index >= card_count {
                log::warn!("Dropping miss count for out-of-range card index {index}.");
                continue;
            }
            *self.0.entry(index).or_insert(0) += count;
        }
    }
}

#[cfg(test)]
impl MissCounts {
    pub fn from_pairs(pairs: &[(usize, u32)]) -> Self {
        Self(pairs.iter().copied().collect())
    }
}

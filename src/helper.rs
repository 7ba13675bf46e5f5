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

//! Fixtures shared by the unit tests.

use std::fs::write;
use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tempfile::TempDir;
use tempfile::tempdir;

use crate::error::Fallible;
use crate::learn::session::Session;
use crate::types::card::Card;
use crate::types::deck::Deck;
use crate::types::timestamp::Timestamp;

/// A deck with id `1` and `n` cards `q0/a0`, `q1/a1`, ...
pub fn sample_deck(n: usize) -> Deck {
    let cards: Vec<Card> = (0..n)
        .map(|i| Card::new(format!("q{i}"), format!("a{i}")))
        .collect();
    let created_at = Timestamp::from_millis(1_700_000_000_000).unwrap();
    let mut deck = Deck::new("1".to_string(), "Sample", vec![Card::new("q", "a")], created_at)
        .expect("sample deck");
    deck.cards = cards;
    deck
}

pub fn seeded_session(deck: Deck, seed: u64) -> Fallible<Session<StdRng>> {
    Session::with_rng(deck, StdRng::seed_from_u64(seed))
}

/// Write `contents` to a file called `name` in a fresh temporary directory.
/// The directory is deleted when the returned guard is dropped.
pub fn write_tmp_file(name: &str, contents: &str) -> Fallible<(TempDir, PathBuf)> {
    let dir = tempdir()?;
    let path = dir.path().join(name);
    write(&path, contents)?;
    Ok((dir, path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_deck() {
        let deck = sample_deck(3);
        assert_eq!(deck.id, "1");
        assert_eq!(deck.card_count(), 3);
        assert_eq!(deck.cards[2].front(), "q2");
    }

    #[test]
    fn test_write_tmp_file() -> Fallible<()> {
        let (_dir, path) = write_tmp_file("cards.csv", "a,b\n")?;
        assert!(path.exists());
        Ok(())
    }
}

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

use std::fmt::Display;
use std::fmt::Formatter;
use std::io::Write;

use clap::ValueEnum;
use serde::Serialize;

use crate::error::Fallible;
use crate::learn::summary::StudyItem;
use crate::learn::summary::study_list;
use crate::store::DeckStore;
use crate::store::KeyValueStore;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
pub enum ListFormat {
    /// Plain text output.
    Text,
    /// JSON output.
    Json,
}

impl Display for ListFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ListFormat::Text => write!(f, "text"),
            ListFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StudyListExport<'a> {
    deck_id: &'a str,
    deck_name: &'a str,
    cards: &'a [StudyItem],
}

/// Print the cards of a deck that were ever missed, most-missed first.
pub fn print_study_list<S: KeyValueStore, W: Write>(
    decks: &DeckStore<S>,
    id: &str,
    format: ListFormat,
    out: &mut W,
) -> Fallible<()> {
    let deck = decks.get(id)?;
    let items = study_list(&deck.cards, &deck.card_stats);
    match format {
        ListFormat::Text => write_study_list(out, &items)?,
        ListFormat::Json => {
            let export = StudyListExport {
                deck_id: &deck.id,
                deck_name: &deck.name,
                cards: &items,
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&export)?)?;
        }
    }
    Ok(())
}

pub fn write_study_list<W: Write>(out: &mut W, items: &[StudyItem]) -> Fallible<()> {
    if items.is_empty() {
        writeln!(out, "No missed cards yet.")?;
        return Ok(());
    }
    for item in items {
        writeln!(out, "{:>4}x  {}  =>  {}", item.misses, item.front, item.back)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::helper::sample_deck;
    use crate::store::MemoryStore;
    use crate::types::miss_counts::MissCounts;

    fn store() -> Fallible<DeckStore<MemoryStore>> {
        let decks = DeckStore::new(MemoryStore::new());
        let mut deck = sample_deck(3);
        deck.card_stats = MissCounts::from_pairs(&[(0, 1), (2, 5)]);
        decks.save(&[deck])?;
        Ok(decks)
    }

    #[test]
    fn test_text() -> Fallible<()> {
        let decks = store()?;
        let mut out = Vec::new();
        print_study_list(&decks, "1", ListFormat::Text, &mut out)?;
        let text = String::from_utf8_lossy(&out);
        assert_eq!(text, "   5x  q2  =>  a2\n   1x  q0  =>  a0\n");
        Ok(())
    }

    #[test]
    fn test_json() -> Fallible<()> {
        let decks = store()?;
        let mut out = Vec::new();
        print_study_list(&decks, "1", ListFormat::Json, &mut out)?;
        let value: Value = serde_json::from_slice(&out)?;
        assert_eq!(value["deckId"], "1");
        assert_eq!(value["cards"][0]["index"], 2);
        assert_eq!(value["cards"][0]["misses"], 5);
        assert_eq!(value["cards"].as_array().map(|a| a.len()), Some(2));
        Ok(())
    }

    #[test]
    fn test_nothing_missed() -> Fallible<()> {
        let decks = DeckStore::new(MemoryStore::new());
        decks.save(&[sample_deck(2)])?;
        let mut out = Vec::new();
        print_study_list(&decks, "1", ListFormat::Text, &mut out)?;
        assert_eq!(String::from_utf8_lossy(&out), "No missed cards yet.\n");
        Ok(())
    }

    #[test]
    fn test_unknown_deck() {
        let decks = DeckStore::new(MemoryStore::new());
        let mut out = Vec::new();
        assert!(print_study_list(&decks, "9", ListFormat::Json, &mut out).is_err());
    }
}

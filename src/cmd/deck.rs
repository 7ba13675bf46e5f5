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

use std::path::Path;

use crate::error::Fallible;
use crate::error::fail;
use crate::import::deck_name_from_path;
use crate::import::read_cards;
use crate::store::DeckStore;
use crate::store::KeyValueStore;
use crate::types::card::Card;
use crate::types::deck::Deck;

/// Separates the two sides of a card given on the command line.
const SIDE_SEPARATOR: &str = "::";

pub fn create_deck<S: KeyValueStore>(
    decks: &DeckStore<S>,
    name: &str,
    specs: &[String],
) -> Fallible<Deck> {
    let cards: Vec<Card> = specs
        .iter()
        .map(|arg| parse_card(arg))
        .collect::<Fallible<_>>()?;
    let deck = decks.create(name, cards)?;
    println!("Created deck {} ({} cards).", deck.id, deck.card_count());
    Ok(deck)
}

fn parse_card(arg: &str) -> Fallible<Card> {
    match arg.split_once(SIDE_SEPARATOR) {
        Some((front, back)) => Ok(Card::new(front.trim(), back.trim())),
        None => fail(format!("invalid card {arg:?}: expected FRONT{SIDE_SEPARATOR}BACK.")),
    }
}

pub fn import_deck<S: KeyValueStore>(
    decks: &DeckStore<S>,
    file: &Path,
    name: Option<String>,
) -> Fallible<Deck> {
    let cards = read_cards(file)?;
    let name = name.unwrap_or_else(|| deck_name_from_path(file));
    let deck = decks.create(&name, cards)?;
    println!(
        "Imported {} cards into deck {} ({}).",
        deck.card_count(),
        deck.id,
        deck.name
    );
    Ok(deck)
}

pub fn delete_deck<S: KeyValueStore>(decks: &DeckStore<S>, id: &str) -> Fallible<()> {
    let deck = decks.delete(id)?;
    println!("Deleted deck {} ({}).", deck.id, deck.name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::write_tmp_file;
    use crate::store::MemoryStore;

    #[test]
    fn test_create() -> Fallible<()> {
        let decks = DeckStore::new(MemoryStore::new());
        let specs = vec!["hola :: hello".to_string(), "a::b::c".to_string()];
        let deck = create_deck(&decks, "Spanish", &specs)?;
        assert_eq!(deck.cards, vec![Card::new("hola", "hello"), Card::new("a", "b::c")]);
        assert_eq!(decks.load()?.len(), 1);
        Ok(())
    }

    #[test]
    fn test_create_invalid_card() -> Fallible<()> {
        let decks = DeckStore::new(MemoryStore::new());
        let result = create_deck(&decks, "Spanish", &["no separator".to_string()]);
        assert!(result.is_err());
        assert!(decks.load()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_import_names_deck_after_file() -> Fallible<()> {
        let decks = DeckStore::new(MemoryStore::new());
        let (_dir, path) = write_tmp_file("Capitals.csv", "France,Paris\nItaly,Rome\n")?;
        let deck = import_deck(&decks, &path, None)?;
        assert_eq!(deck.name, "Capitals");
        assert_eq!(deck.card_count(), 2);
        assert!(deck.is_new);
        let deck = import_deck(&decks, &path, Some("Europe".to_string()))?;
        assert_eq!(deck.name, "Europe");
        assert_eq!(decks.load()?.len(), 2);
        Ok(())
    }

    #[test]
    fn test_delete() -> Fallible<()> {
        let decks = DeckStore::new(MemoryStore::new());
        let deck = create_deck(&decks, "A", &["q::a".to_string()])?;
        delete_deck(&decks, &deck.id)?;
        assert!(decks.load()?.is_empty());
        assert!(delete_deck(&decks, &deck.id).is_err());
        Ok(())
    }
}

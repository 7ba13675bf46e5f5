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

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::Fallible;
use crate::error::fail;
use crate::types::card::Card;
use crate::types::deck::Deck;
use crate::types::deck::fresh_id;
use crate::types::timestamp::Timestamp;

/// The key under which the deck list is stored.
const DECKS_KEY: &str = "decks";

/// An opaque string store.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Fallible<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> Fallible<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get_item(&self, key: &str) -> Fallible<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Fallible<()> {
        (**self).set_item(key, value)
    }
}

/// A store that lives only as long as the process.
#[derive(Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Fallible<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Fallible<()> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Persists the ordered deck list as a single JSON blob. Every write
/// rewrites the whole list.
pub struct DeckStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> DeckStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load every deck. A store that was never written to holds no decks.
    pub fn load(&self) -> Fallible<Vec<Deck>> {
        match self.store.get_item(DECKS_KEY)? {
            Some(blob) => Ok(serde_json::from_str(&blob)?),
            None => Ok(Vec::new()),
        }
    }

    pub fn save(&self, decks: &[Deck]) -> Fallible<()> {
        let blob = serde_json::to_string(decks)?;
        self.store.set_item(DECKS_KEY, &blob)?;
        log::debug!("Saved {} decks.", decks.len());
        Ok(())
    }

    /// Return a copy of the deck with the given id, if any.
    pub fn find(&self, id: &str) -> Fallible<Option<Deck>> {
        let decks = self.load()?;
        Ok(decks.into_iter().find(|deck| deck.id == id))
    }

    /// Like [`DeckStore::find`], but a missing deck is an error.
    pub fn get(&self, id: &str) -> Fallible<Deck> {
        match self.find(id)? {
            Some(deck) => Ok(deck),
            None => fail(format!("no deck with id {id}.")),
        }
    }

    /// Create a deck from the given cards and append it to the list.
    pub fn create(&self, name: &str, cards: Vec<Card>) -> Fallible<Deck> {
        let mut decks = self.load()?;
        let now = Timestamp::now();
        let id = fresh_id(&decks, now);
        let deck = Deck::new(id, name, cards, now)?;
        log::debug!("Creating deck {} with {} cards.", deck.id, deck.card_count());
        decks.push(deck.clone());
        self.save(&decks)?;
        Ok(deck)
    }

    /// Remove the deck with the given id, returning it.
    pub fn delete(&self, id: &str) -> Fallible<Deck> {
        let mut decks = self.load()?;
        let Some(pos) = decks.iter().position(|deck| deck.id == id) else {
            return fail(format!("no deck with id {id}."));
        };
        let deck = decks.remove(pos);
        self.save(&decks)?;
        Ok(deck)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards(n: usize) -> Vec<Card> {
        (0..n)
            .map(|i| Card::new(format!("q{i}"), format!("a{i}")))
            .collect()
    }

    #[test]
    fn test_empty_store_has_no_decks() -> Fallible<()> {
        let decks = DeckStore::new(MemoryStore::new());
        assert!(decks.load()?.is_empty());
        assert_eq!(decks.find("1")?, None);
        Ok(())
    }

    #[test]
    fn test_create_and_find() -> Fallible<()> {
        let decks = DeckStore::new(MemoryStore::new());
        let a = decks.create("A", cards(2))?;
        let b = decks.create("B", cards(3))?;
        assert_ne!(a.id, b.id);
        let all = decks.load()?;
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "A");
        assert_eq!(all[1].name, "B");
        assert_eq!(decks.get(&b.id)?.card_count(), 3);
        Ok(())
    }

    #[test]
    fn test_create_rejects_empty_deck() -> Fallible<()> {
        let decks = DeckStore::new(MemoryStore::new());
        assert!(decks.create("A", Vec::new()).is_err());
        assert!(decks.load()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_delete() -> Fallible<()> {
        let decks = DeckStore::new(MemoryStore::new());
        let a = decks.create("A", cards(1))?;
        let b = decks.create("B", cards(1))?;
        let removed = decks.delete(&a.id)?;
        assert_eq!(removed.name, "A");
        let all = decks.load()?;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, b.id);
        assert!(decks.delete(&a.id).is_err());
        Ok(())
    }

    #[test]
    fn test_corrupt_blob() -> Fallible<()> {
        let decks = DeckStore::new(MemoryStore::new());
        decks.store().set_item(DECKS_KEY, "not json")?;
        assert!(decks.load().is_err());
        Ok(())
    }

    #[test]
    fn test_get_missing() {
        let decks = DeckStore::new(MemoryStore::new());
        let err = decks.get("42").unwrap_err();
        assert_eq!(err.to_string(), "error: no deck with id 42.");
    }
}

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

use std::io::Write;

use crate::error::Fallible;
use crate::store::DeckStore;
use crate::store::KeyValueStore;
use crate::types::trophy::Tier;
use crate::types::trophy::Trophies;

pub fn list_decks<S: KeyValueStore, W: Write>(decks: &DeckStore<S>, out: &mut W) -> Fallible<()> {
    let all = decks.load()?;
    if all.is_empty() {
        writeln!(out, "No decks yet.")?;
        return Ok(());
    }
    for deck in all {
        let badge = if deck.is_new { "  [new]" } else { "" };
        let created = deck
            .created_at
            .map(|ts| format!("  created {}", ts.local_date_string()))
            .unwrap_or_default();
        writeln!(
            out,
            "{}  {}  ({} cards)  {}{}{}",
            deck.id,
            deck.name,
            deck.card_count(),
            trophy_row(&deck.trophies),
            created,
            badge
        )?;
    }
    Ok(())
}

/// Renders the trophies as `[bronze silver -]`.
pub fn trophy_row(trophies: &Trophies) -> String {
    let slots: Vec<&str> = [Tier::Bronze, Tier::Silver, Tier::Gold]
        .iter()
        .map(|tier| if trophies.has(*tier) { tier.as_str() } else { "-" })
        .collect();
    format!("[{}]", slots.join(" "))
}

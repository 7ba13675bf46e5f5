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

use serde::Deserialize;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Bronze,
    Silver,
    Gold,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Bronze => "bronze",
            Tier::Silver => "silver",
            Tier::Gold => "gold",
        }
    }
}

impl Display for Tier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One step of the trophy ladder.
struct Rung {
    tier: Tier,
    /// Whether the session must have had no misses.
    needs_perfect_session: bool,
}

/// The ladder is climbed in order: a tier can only be earned once every tier
/// above it in this list is held.
const LADDER: [Rung; 3] = [
    Rung {
        tier: Tier::Bronze,
        needs_perfect_session: false,
    },
    Rung {
        tier: Tier::Silver,
        needs_perfect_session: true,
    },
    Rung {
        tier: Tier::Gold,
        needs_perfect_session: true,
    },
];

/// The trophies earned on a deck. Flags only ever go from false to true.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trophies {
    #[serde(default)]
    bronze: bool,
    #[serde(default)]
    silver: bool,
    #[serde(default)]
    gold: bool,
}

impl Trophies {
    pub fn has(&self, tier: Tier) -> bool {
        match tier {
            Tier::Bronze => self.bronze,
            Tier::Silver => self.silver,
            Tier::Gold => self.gold,
        }
    }

    fn set(&mut self, tier: Tier) {
        match tier {
            Tier::Bronze => self.bronze = true,
            Tier::Silver => self.silver = true,
            Tier::Gold => self.gold = true,
        }
    }

    /// Awards at most one new tier for a completed session: the first tier
    /// on the ladder not yet held, provided the session qualifies for it.
    pub fn award(&mut self, perfect_session: bool) -> Option<Tier> {
        let rung = LADDER.iter().find(|rung| !self.has(rung.tier))?;
        if rung.needs_perfect_session && !perfect_session {
            return None;
        }
        self.set(rung.tier);
        Some(rung.tier)
    }

    /// The tiers held, in ladder order.
    pub fn earned(&self) -> Vec<Tier> {
        LADDER
            .iter()
            .map(|rung| rung.tier)
            .filter(|tier| self.has(*tier))
            .collect()
    }
}

#[cfg(test)]
impl Trophies {
    pub fn with(tiers: &[Tier]) -> Self {
        let mut trophies = Trophies::default();
        for tier in tiers {
            trophies.set(*tier);
        }
        trophies
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;

    #[test]
    fn test_first_completion_earns_bronze_even_with_misses() {
        let mut trophies = Trophies::default();
        assert_eq!(trophies.award(false), Some(Tier::Bronze));
        assert_eq!(trophies, Trophies::with(&[Tier::Bronze]));
    }

    #[test]
    fn test_perfect_session_after_bronze_earns_silver() {
        let mut trophies = Trophies::with(&[Tier::Bronze]);
        assert_eq!(trophies.award(true), Some(Tier::Silver));
    }

    #[test]
    fn test_imperfect_session_after_bronze_earns_nothing() {
        let mut trophies = Trophies::with(&[Tier::Bronze]);
        assert_eq!(trophies.award(false), None);
        assert_eq!(trophies, Trophies::with(&[Tier::Bronze]));
    }

    #[test]
    fn test_gold_needs_a_second_perfect_session() {
        let mut trophies = Trophies::with(&[Tier::Bronze, Tier::Silver]);
        assert_eq!(trophies.award(false), None);
        assert_eq!(trophies.award(true), Some(Tier::Gold));
        assert_eq!(trophies.award(true), None);
    }

    #[test]
    fn test_first_perfect_session_only_earns_bronze() {
        let mut trophies = Trophies::default();
        assert_eq!(trophies.award(true), Some(Tier::Bronze));
        assert!(!trophies.has(Tier::Silver));
    }

    #[test]
    fn test_monotonic() {
        let mut trophies = Trophies::default();
        let mut previous = trophies.earned();
        for perfect in [false, true, false, true, true, false] {
            trophies.award(perfect);
            let current = trophies.earned();
            for tier in &previous {
                assert!(current.contains(tier));
            }
            previous = current;
        }
        assert_eq!(previous, vec![Tier::Bronze, Tier::Silver, Tier::Gold]);
    }

    #[test]
    fn test_missing_fields_default_to_false() -> Fallible<()> {
        let trophies: Trophies = serde_json::from_str(r#"{"bronze": true}"#)?;
        assert_eq!(trophies.earned(), vec![Tier::Bronze]);
        Ok(())
    }

    #[test]
    fn test_tier_serializes_lowercase() -> Fallible<()> {
        assert_eq!(serde_json::to_string(&Tier::Silver)?, r#""silver""#);
        Ok(())
    }
}

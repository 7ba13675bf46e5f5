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

use std::io::BufRead;
use std::io::Write;
use std::io::stdin;
use std::io::stdout;

use rand::Rng;

use crate::cmd::list::trophy_row;
use crate::cmd::study_list::write_study_list;
use crate::error::Fallible;
use crate::learn::finish_session;
use crate::learn::session::Face;
use crate::learn::session::Session;
use crate::learn::session::Step;
use crate::learn::stored_trophies;
use crate::learn::summary::Summary;
use crate::store::DeckStore;
use crate::store::KeyValueStore;
use crate::types::trophy::Trophies;

/// Run an interactive learn session on the terminal.
pub fn learn_deck<S: KeyValueStore>(decks: &DeckStore<S>, id: &str) -> Fallible<()> {
    let deck = decks.get(id)?;
    let session = Session::new(deck)?;
    let mut input = stdin().lock();
    let mut out = stdout().lock();
    run_session(decks, session, &mut input, &mut out)?;
    Ok(())
}

/// A key press, as read from one line of input.
#[derive(Debug, PartialEq)]
enum Key {
    Flip,
    Skip,
    GotIt,
    DidntGetIt,
    Quit,
    Other,
}

impl Key {
    fn parse(line: &str) -> Self {
        match line.trim().to_lowercase().as_str() {
            "" | "f" => Key::Flip,
            "s" => Key::Skip,
            "y" => Key::GotIt,
            "n" => Key::DidntGetIt,
            "q" => Key::Quit,
            _ => Key::Other,
        }
    }
}

/// Drive `session` from `input` until it completes or the user quits.
/// Returns the summary if the session was completed. Quitting, or running
/// out of input, abandons the session without saving anything.
pub fn run_session<S, R, I, W>(
    decks: &DeckStore<S>,
    mut session: Session<R>,
    input: &mut I,
    out: &mut W,
) -> Fallible<Option<Summary>>
where
    S: KeyValueStore,
    R: Rng,
    I: BufRead,
    W: Write,
{
    let trophies = stored_trophies(decks, &session.deck().id);
    loop {
        write_header(out, &session, &trophies)?;
        write_card(out, &session)?;
        let Some(key) = read_key(input)? else {
            writeln!(out, "Session abandoned.")?;
            return Ok(None);
        };
        let step = match (session.face(), key) {
            (_, Key::Quit) => {
                writeln!(out, "Session abandoned.")?;
                return Ok(None);
            }
            (Face::Presenting, Key::Flip) => {
                session.reveal();
                continue;
            }
            (Face::Presenting, Key::Skip) => session.skip(),
            (Face::Revealed, Key::GotIt) => session.got_it(),
            (Face::Revealed, Key::DidntGetIt) => session.didnt_get_it(),
            _ => Step::Ignored,
        };
        match step {
            Step::Continue => {}
            Step::Ignored => writeln!(out, "Invalid input.")?,
            Step::Complete(outcome) => {
                let missed = outcome.miss_counts.iter().count();
                let summary = finish_session(decks, session.deck().clone(), &outcome);
                write_summary(out, &summary, missed)?;
                return Ok(Some(summary));
            }
        }
    }
}

fn read_key<I: BufRead>(input: &mut I) -> Fallible<Option<Key>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(Key::parse(&line)))
}

fn write_header<R: Rng, W: Write>(
    out: &mut W,
    session: &Session<R>,
    trophies: &Trophies,
) -> Fallible<()> {
    writeln!(out)?;
    writeln!(
        out,
        "{}  ({} cards)  {}",
        session.deck().name,
        session.total(),
        trophy_row(trophies)
    )?;
    writeln!(
        out,
        "I didn't get: {}   learned: {}%   I did get: {}   ({} in rotation)",
        session.didnt_get(),
        session.learned_pct(),
        session.did_get(),
        session.remaining()
    )?;
    Ok(())
}

fn write_card<R: Rng, W: Write>(out: &mut W, session: &Session<R>) -> Fallible<()> {
    let Some(entry) = session.current() else {
        return Ok(());
    };
    writeln!(out, "Q: {}", entry.card.front())?;
    match session.face() {
        Face::Presenting => {
            writeln!(out, "Think. If you know the answer, say it out loud.")?;
            writeln!(out, "[enter] flip  [s] skip  [q] quit")?;
        }
        Face::Revealed => {
            writeln!(out, "A: {}", entry.card.back())?;
            writeln!(out, "Did you get it? [y] I got it  [n] I didn't get it  [q] quit")?;
        }
    }
    Ok(())
}

fn write_summary<W: Write>(out: &mut W, summary: &Summary, missed: usize) -> Fallible<()> {
    writeln!(out)?;
    writeln!(out, "100%  You got them all!")?;
    writeln!(
        out,
        "{}: {} cards, {} missed along the way.",
        summary.deck.name,
        summary.deck.card_count(),
        missed
    )?;
    if let Some(tier) = summary.new_trophy {
        writeln!(out, "New trophy: {tier}!")?;
    }
    let items = summary.study_list();
    if !items.is_empty() {
        writeln!(out, "Cards to study:")?;
        write_study_list(out, &items)?;
    }
    Ok(())
}

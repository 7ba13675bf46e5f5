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

use std::env::current_dir;
use std::io::stdout;
use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

use crate::cmd::deck::create_deck;
use crate::cmd::deck::delete_deck;
use crate::cmd::deck::import_deck;
use crate::cmd::learn::learn_deck;
use crate::cmd::list::list_decks;
use crate::cmd::study_list::ListFormat;
use crate::cmd::study_list::print_study_list;
use crate::config::Config;
use crate::db::Database;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::store::DeckStore;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the deck database. Overrides `flashdeck.toml`.
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a deck from cards given on the command line.
    Create {
        /// The deck's name.
        name: String,
        /// A card, written as FRONT::BACK. Repeat for more cards.
        #[arg(long = "card", value_name = "FRONT::BACK")]
        cards: Vec<String>,
    },
    /// Create a deck from a two-column CSV or TSV file.
    Import {
        /// Path to the file.
        file: PathBuf,
        /// The deck's name. Defaults to the file name.
        #[arg(long)]
        name: Option<String>,
    },
    /// List all decks.
    List,
    /// Delete a deck.
    Delete {
        /// The deck's id.
        id: String,
    },
    /// Learn a deck until every card is mastered.
    Learn {
        /// The deck's id.
        id: String,
    },
    /// Print the cards of a deck that were missed, most-missed first.
    StudyList {
        /// The deck's id.
        id: String,
        /// Output format.
        #[arg(long, default_value_t = ListFormat::Text)]
        format: ListFormat,
    },
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Cli = Cli::parse();
    let config = Config::load(&current_dir()?)?;
    let db_path: PathBuf = config.database_path(cli.db);
    let db_path: &str = db_path
        .to_str()
        .ok_or_else(|| ErrorReport::new("invalid path"))?;
    let decks = DeckStore::new(Database::new(db_path)?);
    match cli.command {
        Command::Create { name, cards } => {
            create_deck(&decks, &name, &cards)?;
        }
        Command::Import { file, name } => {
            import_deck(&decks, &file, name)?;
        }
        Command::List => list_decks(&decks, &mut stdout().lock())?,
        Command::Delete { id } => delete_deck(&decks, &id)?,
        Command::Learn { id } => learn_deck(&decks, &id)?,
        Command::StudyList { id, format } => {
            print_study_list(&decks, &id, format, &mut stdout().lock())?
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_create() {
        let cli = Cli::parse_from([
            "flashdeck",
            "create",
            "Spanish",
            "--card",
            "hola::hello",
            "--card",
            "adiós::bye",
        ]);
        match cli.command {
            Command::Create { name, cards } => {
                assert_eq!(name, "Spanish");
                assert_eq!(cards, vec!["hola::hello", "adiós::bye"]);
            }
            _ => panic!("expected create"),
        }
    }

    #[test]
    fn test_parse_study_list() {
        let cli = Cli::parse_from([
            "flashdeck",
            "--db",
            "x.db",
            "study-list",
            "7",
            "--format",
            "json",
        ]);
        assert_eq!(cli.db, Some(PathBuf::from("x.db")));
        match cli.command {
            Command::StudyList { id, format } => {
                assert_eq!(id, "7");
                assert_eq!(format, ListFormat::Json);
            }
            _ => panic!("expected study-list"),
        }
    }
}

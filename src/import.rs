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

use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;

use crate::error::Fallible;
use crate::error::fail;
use crate::types::card::Card;

/// Read cards from a two-column spreadsheet: the first column is the front,
/// the second is the back. Tab-separated files are recognized by extension.
pub fn read_cards(path: &Path) -> Fallible<Vec<Card>> {
    if !path.exists() {
        return fail("file does not exist.");
    }
    let delimiter = match path.extension().and_then(|ext| ext.to_str()) {
        Some("tsv") | Some("tab") => b'\t',
        _ => b',',
    };
    let file = std::fs::File::open(path)?;
    let cards = parse_cards(file, delimiter)?;
    log::debug!("Read {} cards from {}.", cards.len(), path.display());
    Ok(cards)
}

/// Parse rows into cards. Extra columns are ignored, missing ones are empty,
/// and rows with nothing on either side are dropped.
pub fn parse_cards<R: Read>(reader: R, delimiter: u8) -> Fallible<Vec<Card>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(reader);
    let mut cards = Vec::new();
    for record in reader.records() {
        let record = record?;
        let front = record.get(0).unwrap_or("");
        let back = record.get(1).unwrap_or("");
        if front.is_empty() && back.is_empty() {
            continue;
        }
        cards.push(Card::new(front, back));
    }
    if cards.is_empty() {
        return fail("no cards found: the file needs two columns, front and back.");
    }
    Ok(cards)
}

/// The deck name for an imported file: its file name without the extension.
pub fn deck_name_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::helper::write_tmp_file;
    use crate::types::card::MAX_FIELD_LEN;

    #[test]
    fn test_two_columns() -> Fallible<()> {
        let cards = parse_cards("hola,hello\n\"adiós, amigo\",bye\n".as_bytes(), b',')?;
        assert_eq!(
            cards,
            vec![Card::new("hola", "hello"), Card::new("adiós, amigo", "bye")]
        );
        Ok(())
    }

    #[test]
    fn test_ragged_rows() -> Fallible<()> {
        let cards = parse_cards("only front\n,only back\na,b,c\n,\n".as_bytes(), b',')?;
        assert_eq!(
            cards,
            vec![
                Card::new("only front", ""),
                Card::new("", "only back"),
                Card::new("a", "b"),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_skips_empty_lines() -> Fallible<()> {
        let cards = parse_cards("a,b\n\n\nc,d\n".as_bytes(), b',')?;
        assert_eq!(cards.len(), 2);
        Ok(())
    }

    #[test]
    fn test_truncates_long_fields() -> Fallible<()> {
        let input = format!("{},b\n", "x".repeat(MAX_FIELD_LEN * 2));
        let cards = parse_cards(input.as_bytes(), b',')?;
        assert_eq!(cards[0].front().len(), MAX_FIELD_LEN);
        Ok(())
    }

    #[test]
    fn test_no_cards() {
        let result = parse_cards(",\n,\n".as_bytes(), b',');
        assert!(result.is_err());
    }

    #[test]
    fn test_tsv_file() -> Fallible<()> {
        let (_dir, path) = write_tmp_file("Verbs.tsv", "ser\tto be\nir\tto go\n")?;
        let cards = read_cards(&path)?;
        assert_eq!(cards[1], Card::new("ir", "to go"));
        Ok(())
    }

    #[test]
    fn test_missing_file() {
        let result = read_cards(&PathBuf::from("./derpherp.csv"));
        assert!(result.is_err());
    }

    #[test]
    fn test_deck_name_from_path() {
        assert_eq!(deck_name_from_path(Path::new("/tmp/Spanish Verbs.csv")), "Spanish Verbs");
        assert_eq!(deck_name_from_path(Path::new("cards.backup.csv")), "cards.backup");
    }
}

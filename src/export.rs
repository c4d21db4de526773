use std::path::Path;

use csv::{Reader, Writer};

use crate::types::ShipRecord;

// The CSV schema comes straight from the serde renames on ShipRecord:
//   Year, Rank, Ship Name, Characters, Fandom, Fandom Category,
//   Post Change, Change Direction
// The file written here is also the hand-off point to the stats and
// plot steps, which reload it rather than re-parsing the raw text.

pub fn write_corpus(path: &Path, records: &[ShipRecord]) -> Result<usize, csv::Error> {
    let mut writer = Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(records.len())
}

pub fn load_corpus(path: &Path) -> Result<Vec<ShipRecord>, csv::Error> {
    let mut reader = Reader::from_path(path)?;
    reader.deserialize().collect()
}

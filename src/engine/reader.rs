use std::fs::File;
use std::io::{BufReader, Read};

use csv::{DeserializeRecordsIntoIter, ReaderBuilder, Trim};

use crate::engine::LoadError;
use crate::models::{Transaction, TransactionRow};

/// Streams validated transactions out of a portfolio CSV.
///
/// Yields one item per data row. The caller decides what to do with the first
/// error; the engine stops there.
pub struct TransactionReader<R: Read> {
    rows: DeserializeRecordsIntoIter<R, TransactionRow>,
    row: usize
}

impl TransactionReader<BufReader<File>> {
    pub fn from_path(path: &str) -> Result<Self, LoadError> {
        let file = File::open(path).map_err(|source| LoadError::Open {
            path: path.to_string(),
            source
        })?;

        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: Read> TransactionReader<R> {
    pub fn from_reader(reader: R) -> Self {
        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        Self {
            rows: reader.into_deserialize(),
            row: 0
        }
    }
}

impl<R: Read> Iterator for TransactionReader<R> {
    type Item = Result<Transaction, LoadError>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.rows.next()?;
        self.row += 1;

        Some(result
            .map_err(LoadError::from)
            .and_then(|row| row.validate(self.row).map_err(LoadError::from)))
    }
}

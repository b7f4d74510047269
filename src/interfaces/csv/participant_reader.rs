use super::reader_from;
use crate::domain::participant::Participant;
use crate::error::{Result, WarikanError};
use std::io::Read;

/// Reads `id,name` participant rows from a CSV source.
pub struct ParticipantReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ParticipantReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            reader: reader_from(source),
        }
    }

    /// Lazily deserializes one participant per row.
    pub fn participants(self) -> impl Iterator<Item = Result<Participant>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(WarikanError::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_valid_stream() {
        let data = "id, name\na, Alice\nb,  Bob ";
        let reader = ParticipantReader::new(data.as_bytes());
        let results: Vec<Result<Participant>> = reader.participants().collect();

        assert_eq!(results.len(), 2);
        assert_eq!(results[1].as_ref().unwrap(), &Participant::new("b", "Bob"));
    }

    #[test]
    fn test_reader_missing_name() {
        let data = "id, name\na";
        let reader = ParticipantReader::new(data.as_bytes());
        let results: Vec<Result<Participant>> = reader.participants().collect();

        assert!(results[0].is_err());
    }
}

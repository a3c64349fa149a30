//! CSV table encoding: headerless `key,value` rows.
//!
//! Useful for tables maintained in spreadsheets. Values containing commas or
//! newlines follow standard CSV quoting.

use std::io::{BufRead, Write};

use crate::{error::Error, traits::TableCodec, types::TextRecord};

/// Codec for two-column CSV tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvTableCodec;

impl TableCodec for CsvTableCodec {
    fn native_extension(&self) -> &'static str {
        "csv"
    }

    fn sniff<R: BufRead>(&self, reader: R) -> bool {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(reader);
        match rdr.records().next() {
            Some(Ok(record)) => record.len() == 2,
            _ => false,
        }
    }

    fn parse<R: BufRead>(&self, reader: R) -> Result<Vec<TextRecord>, Error> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(reader);
        let mut records = Vec::new();
        for result in rdr.deserialize() {
            records.push(result?);
        }
        Ok(records)
    }

    fn serialize<W: Write>(&self, records: &[TextRecord], writer: W) -> Result<(), Error> {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        for record in records {
            wtr.serialize(record)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_csv() {
        let content = "hello,Hello\nbye,Goodbye\n";
        let records = CsvTableCodec.parse(content.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], TextRecord::new("hello", "Hello"));
        assert_eq!(records[1], TextRecord::new("bye", "Goodbye"));
    }

    #[test]
    fn test_parse_empty_value() {
        let content = "empty,\n";
        let records = CsvTableCodec.parse(content.as_bytes()).unwrap();
        assert_eq!(records[0], TextRecord::new("empty", ""));
    }

    #[test]
    fn test_parse_rejects_wrong_column_count() {
        let content = "a,b,c\n";
        assert!(matches!(
            CsvTableCodec.parse(content.as_bytes()),
            Err(Error::CsvParse(_))
        ));
    }

    #[test]
    fn test_round_trip_with_quoting() {
        let records = vec![
            TextRecord::new("list", "one, two, three"),
            TextRecord::new("quoted", "say \"hi\""),
        ];
        let mut buffer = Vec::new();
        CsvTableCodec.serialize(&records, &mut buffer).unwrap();
        let parsed = CsvTableCodec.parse(buffer.as_slice()).unwrap();
        assert_eq!(parsed, records);
    }

    #[test]
    fn test_sniff() {
        assert!(CsvTableCodec.sniff("key,value\n".as_bytes()));
        assert!(!CsvTableCodec.sniff("a,b,c\n".as_bytes()));
        assert!(!CsvTableCodec.sniff("".as_bytes()));
    }

    #[test]
    fn test_extensions() {
        assert_eq!(CsvTableCodec.native_extension(), "csv");
        assert_eq!(CsvTableCodec.translation_extension(), "tsd");
    }
}

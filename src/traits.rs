//! The codec contract between tables and on-disk encodings.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use crate::error::Error;
use crate::types::TextRecord;

/// Parses and serializes one table encoding.
///
/// The rest of the crate is agnostic to the encoding: it only requires a
/// stable round trip for key/value records and a cheap way to sniff whether
/// a blob looks like a native table at all.
///
/// # Example
///
/// ```rust,no_run
/// use langswitch::{TableCodec, XmlTableCodec};
///
/// let records = XmlTableCodec.read_records("localization/app.xml")?;
/// XmlTableCodec.write_records(&records, "app_copy.xml")?;
/// # Ok::<(), langswitch::Error>(())
/// ```
pub trait TableCodec {
    /// File extension of native tables in this encoding.
    fn native_extension(&self) -> &'static str;

    /// File extension of translated tables.
    ///
    /// All shipped encodings share `tsd` (translated string dictionary), so
    /// translation directories look uniform regardless of the native format.
    fn translation_extension(&self) -> &'static str {
        "tsd"
    }

    /// Checks whether the stream's first structural marker matches this
    /// encoding, without a full parse. Never fails; malformed input is
    /// simply not a match.
    fn sniff<R: BufRead>(&self, reader: R) -> bool;

    /// Parses all records from the stream, preserving their order.
    fn parse<R: BufRead>(&self, reader: R) -> Result<Vec<TextRecord>, Error>;

    /// Writes all records to the stream.
    fn serialize<W: Write>(&self, records: &[TextRecord], writer: W) -> Result<(), Error>;

    /// Reads records from a file, decoding a BOM if one is present.
    fn read_records<P: AsRef<Path>>(&self, path: P) -> Result<Vec<TextRecord>, Error> {
        let file = File::open(path)?;
        let decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .bom_override(true)
            .build(file);
        self.parse(BufReader::new(decoder))
    }

    /// Writes records to a file, replacing any existing content.
    fn write_records<P: AsRef<Path>>(&self, records: &[TextRecord], path: P) -> Result<(), Error> {
        let file = File::create(path)?;
        self.serialize(records, BufWriter::new(file))
    }
}

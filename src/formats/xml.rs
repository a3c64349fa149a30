//! The default XML table encoding.
//!
//! Documents are shaped:
//!
//! ```xml
//! <StringTable>
//!     <String Key="greeting" Value="Hello"/>
//! </StringTable>
//! ```
//!
//! Both native tables and translation overlays use this shape; they differ
//! only by file extension.

use std::io::{BufRead, Write};

use quick_xml::{
    Reader, Writer,
    events::{BytesEnd, BytesStart, Event},
};

use crate::{error::Error, traits::TableCodec, types::TextRecord};

/// Name of the document element every table file must open with.
pub const ROOT_ELEMENT: &str = "StringTable";

const RECORD_ELEMENT: &[u8] = b"String";

/// Codec for `<StringTable>` XML documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlTableCodec;

impl TableCodec for XmlTableCodec {
    fn native_extension(&self) -> &'static str {
        "xml"
    }

    fn sniff<R: BufRead>(&self, reader: R) -> bool {
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                    return e
                        .name()
                        .as_ref()
                        .eq_ignore_ascii_case(ROOT_ELEMENT.as_bytes());
                }
                Ok(Event::Eof) => return false,
                Ok(_) => {}
                Err(_) => return false,
            }
            buf.clear();
        }
    }

    fn parse<R: BufRead>(&self, reader: R) -> Result<Vec<TextRecord>, Error> {
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut records = Vec::new();
        let mut saw_root = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                    if !saw_root {
                        if !e.name().as_ref().eq_ignore_ascii_case(ROOT_ELEMENT.as_bytes()) {
                            return Err(Error::DataMismatch(format!(
                                "expected a <{}> document element",
                                ROOT_ELEMENT
                            )));
                        }
                        saw_root = true;
                    } else if e.name().as_ref() == RECORD_ELEMENT {
                        records.push(parse_record(e)?);
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => return Err(Error::XmlParse(e)),
            }
            buf.clear();
        }

        if !saw_root {
            return Err(Error::DataMismatch(format!(
                "document contains no <{}> element",
                ROOT_ELEMENT
            )));
        }

        Ok(records)
    }

    fn serialize<W: Write>(&self, records: &[TextRecord], mut writer: W) -> Result<(), Error> {
        let mut xml_writer = Writer::new_with_indent(&mut writer, b' ', 4);

        xml_writer.write_event(Event::Start(BytesStart::new(ROOT_ELEMENT)))?;
        for record in records {
            let mut elem = BytesStart::new("String");
            elem.push_attribute(("Key", record.key.as_str()));
            elem.push_attribute(("Value", record.value.as_str()));
            xml_writer.write_event(Event::Empty(elem))?;
        }
        xml_writer.write_event(Event::End(BytesEnd::new(ROOT_ELEMENT)))?;

        Ok(())
    }
}

fn parse_record(e: &BytesStart) -> Result<TextRecord, Error> {
    let mut key = None;
    let mut value = None;

    for attr in e.attributes().with_checks(false) {
        let attr = attr.map_err(|e| Error::DataMismatch(e.to_string()))?;
        match attr.key.as_ref() {
            b"Key" => key = Some(attr.unescape_value()?.to_string()),
            b"Value" => value = Some(attr.unescape_value()?.to_string()),
            _ => {}
        }
    }

    let key = key.ok_or_else(|| {
        Error::DataMismatch("String element is missing the Key attribute".to_string())
    })?;

    Ok(TextRecord {
        key,
        value: value.unwrap_or_default(),
    })
}

//! Shipped table encodings.
//!
//! Every encoding implements [`TableCodec`](crate::traits::TableCodec); the
//! rest of the crate never assumes a specific one.

pub mod csv;
pub mod xml;

pub use csv::CsvTableCodec;
pub use xml::XmlTableCodec;

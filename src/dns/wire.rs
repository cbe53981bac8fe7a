//! CAA answers decoded from raw DNS responses.
//!
//! hickory's CAA rdata keeps only the issuer-critical bit of the flags octet,
//! so CAA answers are read from the wire bytes of the response: hickory parses
//! the header, question and owner names, and the rdata goes through
//! [`CaaRecord::from_wire`].

use hickory_resolver::proto::error::ProtoError;
use hickory_resolver::proto::op::{Header, Query};
use hickory_resolver::proto::rr::{Name, RecordType};
use hickory_resolver::proto::serialize::binary::{BinDecodable, BinDecoder};

use super::records::CaaRecord;

/// Extracts every CAA record from the answer section of a response message.
///
/// Answers of other types (e.g. a CNAME chain in front of the CAA set) are
/// skipped. Malformed CAA rdata is skipped with a warning.
///
/// # Errors
///
/// Returns a `ProtoError` if the message framing cannot be decoded.
pub fn caa_records_from_message(name: &str, message: &[u8]) -> Result<Vec<CaaRecord>, ProtoError> {
    let mut decoder = BinDecoder::new(message);
    let header = Header::read(&mut decoder)?;
    for _ in 0..header.query_count() {
        Query::read(&mut decoder)?;
    }

    let mut records = Vec::new();
    for _ in 0..header.answer_count() {
        let owner = Name::read(&mut decoder)?;
        let record_type = RecordType::from(decoder.read_u16()?.unverified());
        let _class = decoder.read_u16()?;
        let _ttl = decoder.read_u32()?;
        let length = decoder.read_u16()?.unverified();
        let rdata = decoder.read_slice(usize::from(length))?.unverified();

        if record_type != RecordType::CAA {
            continue;
        }
        match CaaRecord::from_wire(name, rdata) {
            Some(record) => records.push(record),
            None => log::warn!("Skipping malformed CAA rdata at {owner}"),
        }
    }
    Ok(records)
}

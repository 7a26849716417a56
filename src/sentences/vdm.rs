use alloc::{string::String, vec::Vec};

use crate::{FieldParser, NmeaSentence, ParseError, SentenceType};

/// VDM/VDO - AIS VHF data-link message, received (`VDM`) or own vessel (`VDO`)
///
/// <https://gpsd.gitlab.io/gpsd/AIVDM.html#_aivdmaivdo_sentence_layer>
///
/// ```text
///        1 2 3 4 5    6
///        | | | | |    |
/// !--VDM,x,x,x,a,s--s,x*hh<CR><LF>
/// ```
///
/// 1. Number of fragments
/// 2. Fragment number, starting at 1
/// 3. Sequential message id for multi-sentence messages, may be empty
/// 4. Radio channel, `A` or `B`
/// 5. Six-bit armored payload
/// 6. Number of fill bits, 0 to 5
///
/// The message content is not decoded, [`VdmVdoData::payload`] keeps the
/// raw bits, one element per bit.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VdmVdoData {
    pub num_fragments: i64,
    pub fragment_number: i64,
    pub message_id: i64,
    pub channel: String,
    pub payload: Vec<u8>,
}

impl VdmVdoData {
    /// The AIS message type, the first six bits of the payload.
    pub fn message_type(&self) -> Option<u8> {
        let bits = self.payload.get(..6)?;
        Some(bits.iter().fold(0, |acc, bit| (acc << 1) | bit))
    }
}

/// # Parse VDM or VDO message
pub fn parse_vdm_vdo(sentence: &NmeaSentence) -> Result<VdmVdoData, ParseError> {
    let mut p = FieldParser::new(sentence);
    if sentence.sentence_type != SentenceType::VDO.as_str() {
        p.assert_type(SentenceType::VDM.as_str());
    }
    let num_fragments = p.int64(0, "number of fragments");
    let fragment_number = p.int64(1, "fragment number");
    let message_id = p.int64(2, "sequence number");
    let channel = p.string(3, "channel ID");
    let fill_bits = p.int64(5, "number of padding bits");
    let data = VdmVdoData {
        num_fragments,
        fragment_number,
        message_id,
        channel,
        payload: p.six_bit_ascii_armour(4, fill_bits, "payload"),
    };
    p.finish(data)
}

//! Payload encoding for label-printer control languages.
//!
//! Label printers speaking EPL-style control languages expect single-byte
//! ISO-8859-1 text, and a trailing blank line makes the printer execute
//! the buffered commands. The dispatch core never inspects the payload
//! beyond this conversion.

use crate::DispatchError;

/// Terminator appended to every encoded payload: the blank line that
/// flushes the preceding control-language commands.
pub const PAYLOAD_TERMINATOR: &[u8] = b"\n\n";

/// Encode a payload as strict ISO-8859-1 and append [`PAYLOAD_TERMINATOR`].
///
/// Every Unicode scalar value up to U+00FF maps to its identical byte;
/// anything above is an error, never a silent substitution. The mapping
/// is written out directly because `encoding_rs` has no true ISO-8859-1
/// encoder — its "latin1" label is WHATWG windows-1252, which rejects
/// valid C1 bytes and accepts characters like `€` that the printer's
/// charset does not have.
///
/// # Errors
///
/// [`DispatchError::Unencodable`] for the first character outside the
/// single-byte repertoire.
pub fn encode_payload(text: &str) -> Result<Vec<u8>, DispatchError> {
    let mut bytes = Vec::with_capacity(text.len() + PAYLOAD_TERMINATOR.len());
    for (index, ch) in text.char_indices() {
        let byte = u8::try_from(u32::from(ch))
            .map_err(|_| DispatchError::Unencodable { ch, index })?;
        bytes.push(byte);
    }
    bytes.extend_from_slice(PAYLOAD_TERMINATOR);
    Ok(bytes)
}

//! Stream filter codecs.
//!
//! Only the general-purpose filters are decoded here:
//! - FlateDecode (zlib/deflate, via flate2)
//! - ASCIIHexDecode
//!
//! Image-specific filters (DCTDecode, JBIG2Decode, ...) are left encoded;
//! asking for their decoded bytes is an `UnsupportedFilter` error.

use crate::error::{Error, Result};
use crate::object::{Dictionary, Object};
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::{Read, Write};

/// How far to decode stream data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeLevel {
    /// Raw bytes exactly as stored
    None,
    /// Undo general-purpose filters
    #[default]
    Generalized,
}

/// Trait for PDF stream decoders.
pub trait StreamDecoder {
    /// Decode the input data.
    fn decode(&self, input: &[u8]) -> Result<Vec<u8>>;

    /// Filter name as it appears in /Filter.
    fn name(&self) -> &str;
}

/// FlateDecode filter implementation.
pub struct FlateDecoder;

impl StreamDecoder for FlateDecoder {
    fn decode(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut decoder = ZlibDecoder::new(input);
        let mut output = Vec::new();
        match decoder.read_to_end(&mut output) {
            Ok(_) => Ok(output),
            Err(e) if !output.is_empty() => {
                log::warn!(
                    "FlateDecode partial recovery: extracted {} bytes before corruption: {}",
                    output.len(),
                    e
                );
                Ok(output)
            },
            Err(e) => Err(Error::Decode(format!("FlateDecode: {}", e))),
        }
    }

    fn name(&self) -> &str {
        "FlateDecode"
    }
}

impl FlateDecoder {
    /// Compress data with zlib at the default level.
    pub fn encode(input: &[u8]) -> Result<Vec<u8>> {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder
            .write_all(input)
            .map_err(|e| Error::Decode(format!("FlateDecode encode: {}", e)))?;
        encoder
            .finish()
            .map_err(|e| Error::Decode(format!("FlateDecode encode: {}", e)))
    }
}

/// ASCIIHexDecode filter implementation.
pub struct AsciiHexDecoder;

impl StreamDecoder for AsciiHexDecoder {
    fn decode(&self, input: &[u8]) -> Result<Vec<u8>> {
        let digits: Vec<u8> = input
            .iter()
            .copied()
            .take_while(|&c| c != b'>')
            .filter(|c| !c.is_ascii_whitespace())
            .collect();

        digits
            .chunks(2)
            .map(|pair| {
                let high = hex_value(pair[0])?;
                // Odd length: implicit trailing '0'
                let low = pair.get(1).map_or(Some(0), |&c| hex_value(c))?;
                Some((high << 4) | low)
            })
            .collect::<Option<Vec<u8>>>()
            .ok_or_else(|| Error::Decode("ASCIIHexDecode: invalid hex digit".to_string()))
    }

    fn name(&self) -> &str {
        "ASCIIHexDecode"
    }
}

fn hex_value(digit: u8) -> Option<u8> {
    (digit as char).to_digit(16).map(|v| v as u8)
}

fn decoder_for(name: &str) -> Result<Box<dyn StreamDecoder>> {
    match name {
        "FlateDecode" | "Fl" => Ok(Box::new(FlateDecoder)),
        "ASCIIHexDecode" | "AHx" => Ok(Box::new(AsciiHexDecoder)),
        other => Err(Error::UnsupportedFilter(other.to_string())),
    }
}

/// Extract filter names from a /Filter entry (a single name or an array).
pub fn filter_names(dict: &Dictionary) -> Vec<String> {
    match dict.get("Filter") {
        Some(Object::Name(name)) => vec![name.clone()],
        Some(Object::Array(arr)) => arr
            .iter()
            .filter_map(|obj| obj.as_name().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

/// Decode stream data through its filter pipeline.
pub fn decode_stream(dict: &Dictionary, data: &[u8], level: DecodeLevel) -> Result<Vec<u8>> {
    if level == DecodeLevel::None {
        return Ok(data.to_vec());
    }
    let mut current = data.to_vec();
    for name in filter_names(dict) {
        let decoder = decoder_for(&name)?;
        log::debug!("Applying {} to {} bytes", decoder.name(), current.len());
        current = decoder.decode(&current)?;
    }
    Ok(current)
}

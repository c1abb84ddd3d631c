//! PDF text-string encoding.
//!
//! PDF strings carry no declared encoding. A *text string* is either UTF-16BE
//! with a byte-order mark, UTF-8 with a byte-order mark (PDF 2.0), or
//! PDFDocEncoding (ISO 32000-1:2008, Annex D.2).

const UTF16BE_BOM: [u8; 2] = [0xFE, 0xFF];
const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Look up a character in PDFDocEncoding.
///
/// Codes 0-127 are identical to ASCII, 128-159 hold typographic symbols and
/// 160-255 follow ISO Latin-1. Returns `None` for undefined codes.
pub fn pdfdoc_encoding_lookup(code: u8) -> Option<char> {
    match code {
        0x00..=0x7F => Some(code as char),
        0x80 => Some('\u{2022}'), // bullet
        0x81 => Some('\u{2020}'), // dagger
        0x82 => Some('\u{2021}'), // daggerdbl
        0x83 => Some('\u{2026}'), // ellipsis
        0x84 => Some('\u{2014}'), // emdash
        0x85 => Some('\u{2013}'), // endash
        0x86 => Some('\u{0192}'), // florin
        0x87 => Some('\u{2044}'), // fraction
        0x88 => Some('\u{2039}'), // guilsinglleft
        0x89 => Some('\u{203A}'), // guilsinglright
        0x8A => Some('\u{2212}'), // minus
        0x8B => Some('\u{2030}'), // perthousand
        0x8C => Some('\u{201E}'), // quotedblbase
        0x8D => Some('\u{201C}'), // quotedblleft
        0x8E => Some('\u{201D}'), // quotedblright
        0x8F => Some('\u{2018}'), // quoteleft
        0x90 => Some('\u{2019}'), // quoteright
        0x91 => Some('\u{201A}'), // quotesinglbase
        0x92 => Some('\u{2122}'), // trademark
        0x93 => Some('\u{FB01}'), // fi
        0x94 => Some('\u{FB02}'), // fl
        0x95 => Some('\u{0141}'), // Lslash
        0x96 => Some('\u{0152}'), // OE
        0x97 => Some('\u{0160}'), // Scaron
        0x98 => Some('\u{0178}'), // Ydieresis
        0x99 => Some('\u{017D}'), // Zcaron
        0x9A => Some('\u{0131}'), // dotlessi
        0x9B => Some('\u{0142}'), // lslash
        0x9C => Some('\u{0153}'), // oe
        0x9D => Some('\u{0161}'), // scaron
        0x9E => Some('\u{017E}'), // zcaron
        0x9F => None,
        0xA0 => Some('\u{20AC}'), // Euro
        0xAD => None,
        0xA1..=0xFF => Some(code as char),
    }
}

/// Reverse PDFDocEncoding lookup.
fn pdfdoc_encoding_reverse(ch: char) -> Option<u8> {
    let cp = ch as u32;
    if cp < 0x80 {
        return Some(cp as u8);
    }
    (0x80u8..=0xFF).find(|&code| pdfdoc_encoding_lookup(code) == Some(ch))
}

/// Decode a PDF text string.
///
/// Returns `None` when the bytes are not a valid text string in any of the
/// three encodings (bad UTF-16 surrogates, invalid UTF-8 after a BOM, or an
/// undefined PDFDocEncoding code).
pub fn decode_text_string(bytes: &[u8]) -> Option<String> {
    if let Some(utf16_bytes) = bytes.strip_prefix(&UTF16BE_BOM) {
        if utf16_bytes.len() % 2 != 0 {
            return None;
        }
        let units: Vec<u16> = utf16_bytes
            .chunks_exact(2)
            .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]))
            .collect();
        return String::from_utf16(&units).ok();
    }
    if let Some(utf8_bytes) = bytes.strip_prefix(&UTF8_BOM) {
        return std::str::from_utf8(utf8_bytes).ok().map(str::to_string);
    }
    bytes.iter().map(|&b| pdfdoc_encoding_lookup(b)).collect()
}

/// Encode text as a PDF text string.
///
/// PDFDocEncoding is used when every character is representable; otherwise
/// the text is written as UTF-16BE with a byte-order mark.
pub fn encode_text_string(text: &str) -> Vec<u8> {
    let narrow: Option<Vec<u8>> = text.chars().map(pdfdoc_encoding_reverse).collect();
    match narrow {
        Some(bytes) => bytes,
        None => encode_utf16be(text),
    }
}

/// Encode text as UTF-16BE with a byte-order mark.
pub fn encode_utf16be(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(2 + text.len() * 2);
    out.extend_from_slice(&UTF16BE_BOM);
    for unit in text.encode_utf16() {
        out.extend_from_slice(&unit.to_be_bytes());
    }
    out
}

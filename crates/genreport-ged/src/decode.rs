//! Byte-level decoding of GED files of unknown encoding.
//!
//! Preference order: UTF-16 with BOM, UTF-8 (BOM optional), UTF-8 with a
//! negligible number of replacement characters, and finally Latin-1.

use crate::types::GedError;

/// Share of U+FFFD tolerated before a lossy UTF-8 decode is rejected.
const MAX_REPLACEMENT_RATIO: f64 = 0.0005;

pub fn decode_bytes(raw: &[u8]) -> Result<String, GedError> {
    let text = if let Some(rest) = raw.strip_prefix(&[0xFF, 0xFE]) {
        decode_utf16(rest, u16::from_le_bytes)?
    } else if let Some(rest) = raw.strip_prefix(&[0xFE, 0xFF]) {
        decode_utf16(rest, u16::from_be_bytes)?
    } else if let Some(rest) = raw.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        String::from_utf8(rest.to_vec()).map_err(|e| GedError::Decode(e.to_string()))?
    } else {
        match std::str::from_utf8(raw) {
            Ok(s) => s.to_string(),
            Err(_) => lossy_or_latin1(raw),
        }
    };
    Ok(text.replace('\0', ""))
}

fn decode_utf16(raw: &[u8], word: fn([u8; 2]) -> u16) -> Result<String, GedError> {
    if raw.len() % 2 != 0 {
        return Err(GedError::Decode("odd byte count in UTF-16 input".into()));
    }
    let units: Vec<u16> = raw.chunks_exact(2).map(|c| word([c[0], c[1]])).collect();
    String::from_utf16(&units).map_err(|e| GedError::Decode(e.to_string()))
}

fn lossy_or_latin1(raw: &[u8]) -> String {
    let lossy = String::from_utf8_lossy(raw);
    let total = lossy.chars().count().max(1);
    let replaced = lossy.chars().filter(|&c| c == char::REPLACEMENT_CHARACTER).count();
    if (replaced as f64) / (total as f64) < MAX_REPLACEMENT_RATIO {
        tracing::debug!(replaced, "decoded GED input as lossy UTF-8");
        return lossy.into_owned();
    }
    tracing::debug!("decoded GED input as Latin-1");
    raw.iter().map(|&b| b as char).collect()
}

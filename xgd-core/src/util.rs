use crate::XgdError;

/// Read a 24-bit big-endian integer starting at `offset`.
///
/// Panics if fewer than three bytes remain; callers index fixed-size buffers.
pub fn read_be24(buf: &[u8], offset: usize) -> u32 {
    u32::from(buf[offset]) << 16 | u32::from(buf[offset + 1]) << 8 | u32::from(buf[offset + 2])
}

/// Read a 32-bit big-endian integer starting at `offset`, if the buffer is long enough.
pub fn read_be32(buf: &[u8], offset: usize) -> Option<u32> {
    let bytes = buf.get(offset..offset + 4)?;
    Some(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Decode a hex string (no separators, even length) into bytes.
pub fn parse_hex(text: &str) -> Result<Vec<u8>, XgdError> {
    if text.len() % 2 != 0 {
        return Err(XgdError::parse(format!(
            "hex field '{}' has odd length",
            text
        )));
    }
    text.as_bytes()
        .chunks(2)
        .map(|pair| {
            // from_str_radix tolerates a leading '+', so check digits first
            if !pair.iter().all(u8::is_ascii_hexdigit) {
                return Err(XgdError::parse(format!("invalid hex field '{}'", text)));
            }
            let hi = (pair[0] as char).to_digit(16).unwrap_or(0) as u8;
            let lo = (pair[1] as char).to_digit(16).unwrap_or(0) as u8;
            Ok(hi << 4 | lo)
        })
        .collect()
}

/// Format a byte slice as upper-case hex without separators.
pub fn hex_string(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02X}", b)).collect()
}

/// Read a null-terminated ASCII string from a byte slice.
///
/// Stops at the first null byte and drops non-printable characters.
pub fn read_ascii(buf: &[u8]) -> String {
    buf.iter()
        .take_while(|&&b| b != 0)
        .filter(|&&b| (0x20..0x7F).contains(&b))
        .map(|&b| b as char)
        .collect()
}

/// Format a byte count with fractional KB/MB (e.g., "1.5 KB", "2.3 MB").
pub fn format_bytes_approx(bytes: u64) -> String {
    if bytes >= 1024 * 1024 * 1024 {
        format!("{:.1} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    } else if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}

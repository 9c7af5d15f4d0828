//! CRC-16/CCITT-FALSE checksum
//!
//! Polynomial `0x1021`, initial register `0xFFFF`, most significant bit
//! first, no reflection and no final XOR. Scanners reject any payload whose
//! trailing checksum was computed with different parameters.

/// Generator polynomial
pub const POLYNOMIAL: u16 = 0x1021;

/// Initial register value
pub const INITIAL: u16 = 0xFFFF;

/// Compute the raw 16-bit CRC over `data`
pub fn crc16(data: &[u8]) -> u16 {
    let mut crc = INITIAL;

    for &byte in data {
        crc ^= (byte as u16) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ POLYNOMIAL
            } else {
                crc << 1
            };
        }
    }

    crc
}

/// Checksum of `text` as four uppercase hexadecimal digits
///
/// ```
/// use depix_bridge::core::crc::checksum;
///
/// assert_eq!(checksum("123456789"), "29B1");
/// ```
pub fn checksum(text: &str) -> String {
    format!("{:04X}", crc16(text.as_bytes()))
}

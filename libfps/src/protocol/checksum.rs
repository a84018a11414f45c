// libfps/src/protocol/checksum.rs

//! 16-bit additive checksum shared by all frame kinds.

/// Compute the frame checksum: low 16 bits of the byte sum.
pub fn checksum(bytes: &[u8]) -> u16 {
    update(0, bytes)
}

/// Continue a running checksum over more bytes. Data frames are summed in
/// pieces (header, then payload) as they come off the wire.
pub fn update(acc: u16, bytes: &[u8]) -> u16 {
    bytes
        .iter()
        .fold(acc, |acc, &b| acc.wrapping_add(b as u16))
}

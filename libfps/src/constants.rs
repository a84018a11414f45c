// libfps/src/constants.rs
//! Common protocol constants used across the crate

/// Start bytes of command and response packets
pub const COMMAND_START: [u8; 2] = [0x55, 0xAA];

/// Start bytes of data packets
pub const DATA_START: [u8; 2] = [0x5A, 0xA5];

/// Device id carried by every frame. The sensor only answers to 0x0001.
pub const DEVICE_ID: u16 = 0x0001;

/// Command and response packets are always 12 bytes on the wire
pub const PACKET_LEN: usize = 12;

/// Data packet header: start bytes + device id
pub const DATA_HEADER_LEN: usize = 4;

/// Trailing checksum of every frame
pub const CHECKSUM_LEN: usize = 2;

/// Response code of an accepted command
pub const RESPONSE_ACK: u16 = 0x30;
/// Response code of a refused command
pub const RESPONSE_NACK: u16 = 0x31;

/// Fingerprint template payload size in bytes
pub const TEMPLATE_SIZE: usize = 506;

/// Full-resolution image returned by GetImage
pub const IMAGE_WIDTH: usize = 240;
#[allow(missing_docs)]
pub const IMAGE_HEIGHT: usize = 216;
#[allow(missing_docs)]
pub const IMAGE_SIZE: usize = IMAGE_WIDTH * IMAGE_HEIGHT;

/// Subsampled preview returned by GetRawImage
pub const RAW_IMAGE_WIDTH: usize = 160;
#[allow(missing_docs)]
pub const RAW_IMAGE_HEIGHT: usize = 120;
#[allow(missing_docs)]
pub const RAW_IMAGE_SIZE: usize = RAW_IMAGE_WIDTH * RAW_IMAGE_HEIGHT;

/// Device info block returned by Open when requested
pub const DEVICE_INFO_SIZE: usize = 24;

/// Number of template slots in the sensor database
pub const DEFAULT_CAPACITY: u16 = 200;

/// Baud rate the sensor boots with
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// Rates accepted by ChangeBaudrate
pub const SUPPORTED_BAUD_RATES: [u32; 5] = [9600, 19200, 38400, 57600, 115200];

/// Probe order for auto-negotiation: factory default first, then descending
pub const BAUD_PROBE_ORDER: [u32; 5] = [9600, 115200, 57600, 38400, 19200];

/// NACK parameters below this value are template ids, not error codes
pub const ERROR_CODE_BASE: u32 = 0x1000;

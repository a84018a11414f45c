// libfps/src/types.rs

//! Domain types: finger ids, templates, images and the device info block.

use crate::Error;
use crate::constants::{
    DEVICE_INFO_SIZE, IMAGE_HEIGHT, IMAGE_WIDTH, RAW_IMAGE_HEIGHT, RAW_IMAGE_WIDTH, TEMPLATE_SIZE,
};
use derive_more::{Display, From};
use std::convert::TryFrom;

/// Template slot in the sensor database - Newtype Pattern
#[derive(Debug, Display, From, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FingerId(u16);

impl FingerId {
    /// Id of slot `id`
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Raw slot number
    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// Command parameter encoding of the id
    pub fn as_param(&self) -> u32 {
        self.0 as u32
    }
}

impl TryFrom<u32> for FingerId {
    type Error = Error;

    fn try_from(param: u32) -> Result<Self, Self::Error> {
        u16::try_from(param)
            .map(Self)
            .map_err(|_| Error::UnexpectedParameter(param))
    }
}

/// Fingerprint template (506 bytes)
#[derive(Clone, PartialEq, Eq)]
pub struct Template([u8; TEMPLATE_SIZE]);

impl Template {
    /// Wrap raw template bytes
    pub fn from_bytes(bytes: [u8; TEMPLATE_SIZE]) -> Self {
        Self(bytes)
    }

    /// Raw template bytes
    pub fn as_bytes(&self) -> &[u8; TEMPLATE_SIZE] {
        &self.0
    }
}

impl TryFrom<&[u8]> for Template {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; TEMPLATE_SIZE] = bytes.try_into().map_err(|_| Error::InvalidLength {
            expected: TEMPLATE_SIZE,
            actual: bytes.len(),
        })?;
        Ok(Self(arr))
    }
}

impl std::fmt::Debug for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Template({}.., {} bytes)",
            crate::utils::bytes_to_hex(&self.0[..8]),
            TEMPLATE_SIZE
        )
    }
}

/// 8-bit grayscale image, row-major
#[derive(Clone, PartialEq, Eq)]
pub struct Image {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Image {
    /// Full-resolution image as delivered by GetImage
    pub fn full(pixels: Vec<u8>) -> crate::Result<Self> {
        Self::with_dimensions(IMAGE_WIDTH, IMAGE_HEIGHT, pixels)
    }

    /// Subsampled preview as delivered by GetRawImage
    pub fn raw(pixels: Vec<u8>) -> crate::Result<Self> {
        Self::with_dimensions(RAW_IMAGE_WIDTH, RAW_IMAGE_HEIGHT, pixels)
    }

    fn with_dimensions(width: usize, height: usize, pixels: Vec<u8>) -> crate::Result<Self> {
        if pixels.len() != width * height {
            return Err(Error::InvalidLength {
                expected: width * height,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Columns
    pub fn width(&self) -> usize {
        self.width
    }

    /// Rows
    pub fn height(&self) -> usize {
        self.height
    }

    /// Gray level at column `x`, row `y`, or `None` outside the image
    pub fn pixel(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y * self.width + x).copied()
    }

    /// Row-major pixels
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Take the pixel buffer
    pub fn into_bytes(self) -> Vec<u8> {
        self.pixels
    }
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// Device information returned by Open when requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceInfo {
    /// Firmware build, as reported
    pub firmware_version: u32,
    /// Largest ISO template the sensor can produce
    pub iso_area_max_size: u32,
    /// Unique device serial number
    pub serial_number: [u8; 16],
}

impl DeviceInfo {
    /// Serial number as lowercase hex
    pub fn serial_hex(&self) -> String {
        crate::utils::bytes_to_hex(&self.serial_number)
    }
}

impl TryFrom<&[u8]> for DeviceInfo {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        use crate::protocol::parser::{le_u32_at, slice_at};

        if bytes.len() != DEVICE_INFO_SIZE {
            return Err(Error::InvalidLength {
                expected: DEVICE_INFO_SIZE,
                actual: bytes.len(),
            });
        }
        let mut serial_number = [0u8; 16];
        serial_number.copy_from_slice(slice_at(bytes, 8, 16)?);
        Ok(Self {
            firmware_version: le_u32_at(bytes, 0)?,
            iso_area_max_size: le_u32_at(bytes, 4)?,
            serial_number,
        })
    }
}

/// CaptureFinger quality. Best is slower and meant for enrollment.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureQuality {
    /// Quicker capture, for identification
    #[default]
    Fast = 0,
    /// Slower, better image, for enrollment
    Best = 1,
}

//! Volume wire format
//!
//! Header, big-endian, 40B total:
//! 1. resolution -- 3x u32 (width, height, depth)
//! 2. data type -- u32, only `1` (float32) is defined
//! 3. reserved -- 24B, ignored, must be present
//!
//! Payload follows the header: width * height * depth f32 samples, x fastest, then y, then z.
//! Header is always big-endian, payload byte order is a parameter and defaults to little-endian,
//! which is what producers on common hosts emit.

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use nalgebra::{vector, Vector3};
use nom::{bytes::complete::take, number::complete::be_u32, sequence::tuple, IResult};

use super::{scalar_volume::voxel_count, ScalarVolume};
use crate::error::{Result, VolumeError};

pub const HEADER_LEN: usize = 40;
pub const RESERVED_LEN: usize = 24;
pub const DATA_TYPE_F32: u32 = 1;

const SAMPLE_LEN: usize = 4;

/// Byte order of payload samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endianness {
    Big,
    #[default]
    Little,
}

/// Parsed 40B header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeHeader {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub data_type: u32,
}

impl VolumeHeader {
    pub fn for_volume(volume: &ScalarVolume) -> Result<VolumeHeader> {
        let dim = |d: usize| {
            u32::try_from(d).map_err(|_| VolumeError::DimensionMismatch {
                expected: u32::MAX as usize,
                actual: d,
            })
        };
        Ok(VolumeHeader {
            width: dim(volume.width())?,
            height: dim(volume.height())?,
            depth: dim(volume.depth())?,
            data_type: DATA_TYPE_F32,
        })
    }

    pub fn size(&self) -> Vector3<usize> {
        vector![
            self.width as usize,
            self.height as usize,
            self.depth as usize
        ]
    }

    /// Header + payload length, `None` if it does not fit in memory
    pub fn total_len(&self) -> Option<usize> {
        voxel_count(self.size())?
            .checked_mul(SAMPLE_LEN)?
            .checked_add(HEADER_LEN)
    }

    fn write(&self, slice: &mut [u8]) {
        BigEndian::write_u32(&mut slice[0..4], self.width);
        BigEndian::write_u32(&mut slice[4..8], self.height);
        BigEndian::write_u32(&mut slice[8..12], self.depth);
        BigEndian::write_u32(&mut slice[12..16], self.data_type);
        slice[16..HEADER_LEN].fill(0);
    }
}

fn header_inner(s: &[u8]) -> IResult<&[u8], VolumeHeader> {
    let mut header = tuple((be_u32, be_u32, be_u32, be_u32, take(RESERVED_LEN)));

    let (s, (width, height, depth, data_type, _reserved)) = header(s)?;

    Ok((
        s,
        VolumeHeader {
            width,
            height,
            depth,
            data_type,
        },
    ))
}

/// Parse header only.
/// Fails with `TruncatedPayload` if fewer than 40 bytes are available.
pub fn parse_header(bytes: &[u8]) -> Result<VolumeHeader> {
    match header_inner(bytes) {
        Ok((_rest, header)) => Ok(header),
        Err(_) => Err(VolumeError::TruncatedPayload {
            expected: HEADER_LEN,
            actual: bytes.len(),
        }),
    }
}

/// Decode volume with little-endian payload.
pub fn decode(bytes: &[u8]) -> Result<ScalarVolume> {
    decode_with(bytes, Endianness::Little)
}

/// Decode volume, payload samples in `payload_order`.
///
/// Values are not range checked.
pub fn decode_with(bytes: &[u8], payload_order: Endianness) -> Result<ScalarVolume> {
    let header = parse_header(bytes)?;

    if header.data_type != DATA_TYPE_F32 {
        return Err(VolumeError::UnsupportedFormat {
            data_type: header.data_type,
        });
    }

    let expected = header.total_len().unwrap_or(usize::MAX);
    if bytes.len() < expected {
        return Err(VolumeError::TruncatedPayload {
            expected,
            actual: bytes.len(),
        });
    }

    if bytes.len() > expected {
        log::debug!("Ignoring {} trailing bytes", bytes.len() - expected);
    }

    let payload = &bytes[HEADER_LEN..expected];
    let mut voxels = vec![0.0; payload.len() / SAMPLE_LEN];
    match payload_order {
        Endianness::Little => LittleEndian::read_f32_into(payload, &mut voxels),
        Endianness::Big => BigEndian::read_f32_into(payload, &mut voxels),
    }

    log::debug!(
        "Decoded volume {}x{}x{} ({} voxels)",
        header.width,
        header.height,
        header.depth,
        voxels.len()
    );

    ScalarVolume::new(header.size(), voxels)
}

/// Encode volume with little-endian payload.
pub fn encode(volume: &ScalarVolume) -> Result<Vec<u8>> {
    encode_with(volume, Endianness::Little)
}

/// Encode volume, header big-endian, payload in `payload_order`.
pub fn encode_with(volume: &ScalarVolume, payload_order: Endianness) -> Result<Vec<u8>> {
    let header = VolumeHeader::for_volume(volume)?;
    let voxels = volume.voxels();

    let mut vec = vec![0; HEADER_LEN + voxels.len() * SAMPLE_LEN];
    let (head, payload) = vec.split_at_mut(HEADER_LEN);

    header.write(head);
    match payload_order {
        Endianness::Little => LittleEndian::write_f32_into(voxels, payload),
        Endianness::Big => BigEndian::write_f32_into(voxels, payload),
    }

    Ok(vec)
}

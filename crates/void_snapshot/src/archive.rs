//! Name-keyed tagged binary codec for opaque actor and component state
//!
//! Each field is written as `name | tag | payload-length | payload`, so the
//! decoder can skip fields the target no longer declares and payloads whose
//! tag it does not know. Fields missing from the stream leave the target at
//! its constructed defaults. This is what keeps saves from older and newer
//! builds loadable against the current field layout.

use crate::error::CodecError;
use glam::{Quat, Vec3};
use log::debug;

const TAG_BOOL: u8 = 0;
const TAG_I32: u8 = 1;
const TAG_I64: u8 = 2;
const TAG_F32: u8 = 3;
const TAG_F64: u8 = 4;
const TAG_VEC3: u8 = 5;
const TAG_QUAT: u8 = 6;
const TAG_STR: u8 = 7;
const TAG_BYTES: u8 = 8;

/// A single tagged field value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Bool(bool),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Vec3(Vec3),
    Quat(Quat),
    Str(String),
    Bytes(Vec<u8>),
}

impl FieldValue {
    fn tag(&self) -> u8 {
        match self {
            Self::Bool(_) => TAG_BOOL,
            Self::I32(_) => TAG_I32,
            Self::I64(_) => TAG_I64,
            Self::F32(_) => TAG_F32,
            Self::F64(_) => TAG_F64,
            Self::Vec3(_) => TAG_VEC3,
            Self::Quat(_) => TAG_QUAT,
            Self::Str(_) => TAG_STR,
            Self::Bytes(_) => TAG_BYTES,
        }
    }

    fn write_payload(&self, buf: &mut Vec<u8>) {
        match self {
            Self::Bool(v) => buf.push(*v as u8),
            Self::I32(v) => buf.extend_from_slice(&v.to_le_bytes()),
            Self::I64(v) => buf.extend_from_slice(&v.to_le_bytes()),
            Self::F32(v) => buf.extend_from_slice(&v.to_le_bytes()),
            Self::F64(v) => buf.extend_from_slice(&v.to_le_bytes()),
            Self::Vec3(v) => {
                for component in v.to_array() {
                    buf.extend_from_slice(&component.to_le_bytes());
                }
            }
            Self::Quat(v) => {
                for component in v.to_array() {
                    buf.extend_from_slice(&component.to_le_bytes());
                }
            }
            Self::Str(v) => buf.extend_from_slice(v.as_bytes()),
            Self::Bytes(v) => buf.extend_from_slice(v),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        Self::I32(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        Self::I64(v)
    }
}

impl From<f32> for FieldValue {
    fn from(v: f32) -> Self {
        Self::F32(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        Self::F64(v)
    }
}

impl From<Vec3> for FieldValue {
    fn from(v: Vec3) -> Self {
        Self::Vec3(v)
    }
}

impl From<Quat> for FieldValue {
    fn from(v: Quat) -> Self {
        Self::Quat(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<Vec<u8>> for FieldValue {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

/// Host-side reflection capability
///
/// Implementations expose save-relevant fields by name. Transient,
/// render-only and replication-only state must not be written.
pub trait Persist {
    /// Write every save-relevant field
    fn write_fields(&self, writer: &mut FieldWriter);

    /// Apply one decoded field; return `false` if the field is not declared
    fn read_field(&mut self, name: &str, value: &FieldValue) -> bool;
}

/// Accumulates tagged fields into the wire format during capture
#[derive(Debug, Default)]
pub struct FieldWriter {
    buf: Vec<u8>,
}

impl FieldWriter {
    /// Create an empty writer
    pub fn new() -> Self {
        Self::default()
    }

    /// Write one named field
    pub fn field(&mut self, name: &str, value: impl Into<FieldValue>) {
        let value = value.into();
        debug_assert!(name.len() <= u16::MAX as usize);

        self.buf
            .extend_from_slice(&(name.len() as u16).to_le_bytes());
        self.buf.extend_from_slice(name.as_bytes());
        self.buf.push(value.tag());

        let mut payload = Vec::new();
        value.write_payload(&mut payload);
        self.buf
            .extend_from_slice(&(payload.len() as u32).to_le_bytes());
        self.buf.extend_from_slice(&payload);
    }

    /// Consume the writer, returning the encoded byte buffer
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

/// Encode an object's save-relevant fields to a byte buffer
pub fn encode<T: Persist + ?Sized>(object: &T) -> Vec<u8> {
    let mut writer = FieldWriter::new();
    object.write_fields(&mut writer);
    writer.finish()
}

/// Apply an encoded byte buffer onto a target object, field by field
///
/// Fields the target does not declare and payloads with unknown tags are
/// skipped; fields absent from the stream keep the target's constructed
/// defaults.
pub fn decode<T: Persist + ?Sized>(bytes: &[u8], target: &mut T) -> Result<(), CodecError> {
    let mut reader = FieldReader::new(bytes);
    while let Some((name, value)) = reader.next_field()? {
        match value {
            Some(value) => {
                if !target.read_field(&name, &value) {
                    debug!("field '{}' not declared on target, skipped", name);
                }
            }
            None => debug!("field '{}' has an unknown tag, skipped", name),
        }
    }
    Ok(())
}

/// Cursor over the encoded field stream
struct FieldReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> FieldReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], CodecError> {
        if self.bytes.len() - self.pos < len {
            return Err(CodecError::UnexpectedEof);
        }
        let slice = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    fn read_u16(&mut self) -> Result<u16, CodecError> {
        let bytes = self.take(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    fn read_u32(&mut self) -> Result<u32, CodecError> {
        let bytes = self.take(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read the next field, or `None` at end of stream
    ///
    /// The inner `Option` is `None` for payloads with an unknown tag.
    fn next_field(&mut self) -> Result<Option<(String, Option<FieldValue>)>, CodecError> {
        if self.pos == self.bytes.len() {
            return Ok(None);
        }

        let name_len = self.read_u16()? as usize;
        let name = std::str::from_utf8(self.take(name_len)?)
            .map_err(|_| CodecError::InvalidName)?
            .to_owned();
        let tag = self.take(1)?[0];
        let payload_len = self.read_u32()? as usize;
        let payload = self.take(payload_len)?;

        let value = decode_value(tag, payload, &name)?;
        Ok(Some((name, value)))
    }
}

fn decode_value(tag: u8, payload: &[u8], name: &str) -> Result<Option<FieldValue>, CodecError> {
    let malformed = || CodecError::MalformedPayload(name.to_owned());
    let value = match tag {
        TAG_BOOL => match payload {
            [0] => FieldValue::Bool(false),
            [1] => FieldValue::Bool(true),
            _ => return Err(malformed()),
        },
        TAG_I32 => FieldValue::I32(i32::from_le_bytes(
            payload.try_into().map_err(|_| malformed())?,
        )),
        TAG_I64 => FieldValue::I64(i64::from_le_bytes(
            payload.try_into().map_err(|_| malformed())?,
        )),
        TAG_F32 => FieldValue::F32(f32::from_le_bytes(
            payload.try_into().map_err(|_| malformed())?,
        )),
        TAG_F64 => FieldValue::F64(f64::from_le_bytes(
            payload.try_into().map_err(|_| malformed())?,
        )),
        TAG_VEC3 => {
            let floats = read_f32s::<3>(payload).ok_or_else(malformed)?;
            FieldValue::Vec3(Vec3::from_array(floats))
        }
        TAG_QUAT => {
            let floats = read_f32s::<4>(payload).ok_or_else(malformed)?;
            FieldValue::Quat(Quat::from_array(floats))
        }
        TAG_STR => FieldValue::Str(
            std::str::from_utf8(payload)
                .map_err(|_| malformed())?
                .to_owned(),
        ),
        TAG_BYTES => FieldValue::Bytes(payload.to_vec()),
        _ => return Ok(None),
    };
    Ok(Some(value))
}

fn read_f32s<const N: usize>(payload: &[u8]) -> Option<[f32; N]> {
    if payload.len() != N * 4 {
        return None;
    }
    let mut floats = [0.0f32; N];
    for (i, chunk) in payload.chunks_exact(4).enumerate() {
        floats[i] = f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    Some(floats)
}

//! Value types copied out of foreign memory.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::memory::layout::{object, transform};
use crate::memory::{Address, ByteBuffer};

/// FVector
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const ZERO: Vector3 = Vector3::new(0.0, 0.0, 0.0);
    pub const SIZE: usize = 12;

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn from_buffer(buf: &ByteBuffer<'_>, offset: usize) -> Result<Self> {
        Ok(Self {
            x: buf.read_f32(offset)?,
            y: buf.read_f32(offset + 4)?,
            z: buf.read_f32(offset + 8)?,
        })
    }

    pub fn length_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X={}, Y={}, Z={}", self.x, self.y, self.z)
    }
}

/// Rotation quaternion as stored in FTransform
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quaternion {
    pub fn from_buffer(buf: &ByteBuffer<'_>, offset: usize) -> Result<Self> {
        Ok(Self {
            x: buf.read_f32(offset)?,
            y: buf.read_f32(offset + 4)?,
            z: buf.read_f32(offset + 8)?,
            w: buf.read_f32(offset + 12)?,
        })
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X={}, Y={}, Z={}, W={}", self.x, self.y, self.z, self.w)
    }
}

/// FRotator, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rotator {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl Rotator {
    pub const SIZE: usize = 12;

    pub fn from_buffer(buf: &ByteBuffer<'_>, offset: usize) -> Result<Self> {
        Ok(Self {
            pitch: buf.read_f32(offset)?,
            yaw: buf.read_f32(offset + 4)?,
            roll: buf.read_f32(offset + 8)?,
        })
    }
}

impl fmt::Display for Rotator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pitch={}, Yaw={}, Roll={}", self.pitch, self.yaw, self.roll)
    }
}

/// FTransform
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Transform {
    pub rotation: Quaternion,
    pub translation: Vector3,
    pub scale: Vector3,
}

impl Transform {
    pub const SIZE: usize = transform::SIZE;

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let buf = ByteBuffer::new(bytes);
        Ok(Self {
            rotation: Quaternion::from_buffer(&buf, transform::ROTATION)?,
            translation: Vector3::from_buffer(&buf, transform::TRANSLATION)?,
            scale: Vector3::from_buffer(&buf, transform::SCALE)?,
        })
    }
}

/// FName reference into the name table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FName {
    pub comparison_index: i32,
    pub number: i32,
}

impl FName {
    pub const SIZE: usize = 8;

    pub fn from_buffer(buf: &ByteBuffer<'_>, offset: usize) -> Result<Self> {
        Ok(Self {
            comparison_index: buf.read_i32(offset)?,
            number: buf.read_i32(offset + 4)?,
        })
    }
}

/// Leading fields shared by every UObject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ObjectHeader {
    pub vtable: Address,
    pub flags: i32,
    pub internal_index: u64,
    pub class: Address,
    pub name: FName,
    pub outer: Address,
}

impl ObjectHeader {
    pub const SIZE: usize = object::SIZE;

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let buf = ByteBuffer::new(bytes);
        Ok(Self {
            vtable: Address::new(buf.read_u64(object::VTABLE)?),
            flags: buf.read_i32(object::FLAGS)?,
            internal_index: buf.read_u64(object::INTERNAL_INDEX)?,
            class: Address::new(buf.read_u64(object::CLASS)?),
            name: FName::from_buffer(&buf, object::NAME)?,
            outer: Address::new(buf.read_u64(object::OUTER)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f32_bytes(values: &[f32]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    #[test]
    fn test_vector_length() {
        let v = Vector3::new(3.0, 4.0, 0.0);
        assert_eq!(v.length_squared(), 25.0);
        assert_eq!(v.length(), 5.0);
        assert_eq!(Vector3::ZERO.length(), 0.0);
    }

    #[test]
    fn test_transform_from_bytes() {
        let bytes = f32_bytes(&[0.0, 0.0, 0.7, 0.7, 100.0, -200.0, 50.5, 1.0, 1.0, 2.0]);
        assert_eq!(bytes.len(), Transform::SIZE);

        let t = Transform::from_bytes(&bytes).unwrap();
        assert_eq!(t.rotation.z, 0.7);
        assert_eq!(t.rotation.w, 0.7);
        assert_eq!(t.translation, Vector3::new(100.0, -200.0, 50.5));
        assert_eq!(t.scale, Vector3::new(1.0, 1.0, 2.0));
    }

    #[test]
    fn test_transform_short_buffer() {
        assert!(Transform::from_bytes(&[0u8; 20]).is_err());
    }

    #[test]
    fn test_object_header_from_bytes() {
        let mut bytes = vec![0u8; ObjectHeader::SIZE];
        bytes[0..8].copy_from_slice(&0x7FF6_0000_1000u64.to_le_bytes());
        bytes[8..12].copy_from_slice(&0x41i32.to_le_bytes());
        bytes[0x10..0x18].copy_from_slice(&12u64.to_le_bytes());
        bytes[0x18..0x20].copy_from_slice(&0x2_0000_0000u64.to_le_bytes());
        bytes[0x20..0x24].copy_from_slice(&345i32.to_le_bytes());
        bytes[0x24..0x28].copy_from_slice(&1i32.to_le_bytes());
        bytes[0x28..0x30].copy_from_slice(&0x3_0000_0000u64.to_le_bytes());

        let header = ObjectHeader::from_bytes(&bytes).unwrap();
        assert_eq!(header.vtable, Address::new(0x7FF6_0000_1000));
        assert_eq!(header.flags, 0x41);
        assert_eq!(header.internal_index, 12);
        assert_eq!(header.class, Address::new(0x2_0000_0000));
        assert_eq!(
            header.name,
            FName {
                comparison_index: 345,
                number: 1
            }
        );
        assert_eq!(header.outer, Address::new(0x3_0000_0000));
    }

    #[test]
    fn test_display() {
        assert_eq!(Vector3::new(1.0, 2.5, -3.0).to_string(), "X=1, Y=2.5, Z=-3");
        let r = Rotator {
            pitch: 10.0,
            yaw: 90.0,
            roll: 0.0,
        };
        assert_eq!(r.to_string(), "Pitch=10, Yaw=90, Roll=0");
    }
}

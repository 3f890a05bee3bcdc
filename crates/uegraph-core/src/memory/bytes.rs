use crate::error::{Error, Result};

/// Bounds-checked little-endian view over bytes copied out of foreign memory.
///
/// Every accessor returns an error instead of panicking when the requested
/// field runs past the end of the buffer.
#[derive(Debug, Clone, Copy)]
pub struct ByteBuffer<'a> {
    data: &'a [u8],
}

impl<'a> ByteBuffer<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &'a [u8] {
        self.data
    }

    /// Borrow `len` bytes starting at `offset`.
    pub fn slice(&self, offset: usize, len: usize) -> Result<&'a [u8]> {
        offset
            .checked_add(len)
            .and_then(|end| self.data.get(offset..end))
            .ok_or(Error::BufferTooShort {
                offset,
                needed: len,
                available: self.data.len(),
            })
    }

    fn array<const N: usize>(&self, offset: usize) -> Result<[u8; N]> {
        let bytes = self.slice(offset, N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    pub fn read_u16(&self, offset: usize) -> Result<u16> {
        Ok(u16::from_le_bytes(self.array(offset)?))
    }

    pub fn read_i32(&self, offset: usize) -> Result<i32> {
        Ok(i32::from_le_bytes(self.array(offset)?))
    }

    pub fn read_u32(&self, offset: usize) -> Result<u32> {
        Ok(u32::from_le_bytes(self.array(offset)?))
    }

    pub fn read_u64(&self, offset: usize) -> Result<u64> {
        Ok(u64::from_le_bytes(self.array(offset)?))
    }

    pub fn read_f32(&self, offset: usize) -> Result<f32> {
        Ok(f32::from_le_bytes(self.array(offset)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_scalars() {
        let mut data = Vec::new();
        data.extend_from_slice(&0xBEEFu16.to_le_bytes());
        data.extend_from_slice(&(-2i32).to_le_bytes());
        data.extend_from_slice(&0xDEAD_BEEF_u32.to_le_bytes());
        data.extend_from_slice(&0x7FF6_1234_5678_u64.to_le_bytes());
        data.extend_from_slice(&2.25f32.to_le_bytes());

        let buf = ByteBuffer::new(&data);
        assert_eq!(buf.read_u16(0).unwrap(), 0xBEEF);
        assert_eq!(buf.read_i32(2).unwrap(), -2);
        assert_eq!(buf.read_u32(6).unwrap(), 0xDEAD_BEEF);
        assert_eq!(buf.read_u64(10).unwrap(), 0x7FF6_1234_5678);
        assert_eq!(buf.read_f32(18).unwrap(), 2.25);
    }

    #[test]
    fn test_out_of_bounds_is_error() {
        let data = [0u8; 6];
        let buf = ByteBuffer::new(&data);
        assert!(buf.read_u64(0).is_err());
        assert!(buf.read_i32(4).is_err());
        assert!(buf.slice(usize::MAX, 2).is_err());
        assert!(matches!(
            buf.read_u32(3),
            Err(Error::BufferTooShort {
                offset: 3,
                needed: 4,
                available: 6
            })
        ));
    }
}

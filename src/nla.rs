// SPDX-License-Identifier: MIT

use crate::{DecodeError, Field};

pub const NLA_F_NESTED: u16 = 0x8000;
pub const NLA_F_NET_BYTEORDER: u16 = 0x4000;
pub const NLA_TYPE_MASK: u16 = !(NLA_F_NET_BYTEORDER | NLA_F_NESTED);
pub const NLA_ALIGNTO: usize = 4;
pub const NLA_HEADER_SIZE: usize = 4;

const LENGTH: Field = 0..2;
const TYPE: Field = 2..4;
#[allow(non_snake_case)]
fn VALUE(length: usize) -> Field {
    TYPE.end..TYPE.end + length
}

/// Round `len` up to the attribute alignment boundary.
#[inline]
pub const fn nla_align(len: usize) -> usize {
    (len + NLA_ALIGNTO - 1) & !(NLA_ALIGNTO - 1)
}

buffer!(NlaBuffer {
    length: (u16, LENGTH),
    type_raw: (u16, TYPE),
});

impl<T: AsRef<[u8]>> NlaBuffer<T> {
    pub fn new_checked(buffer: T) -> Result<NlaBuffer<T>, DecodeError> {
        let buffer = Self::new(buffer);
        buffer.check_buffer_length()?;
        Ok(buffer)
    }

    pub fn check_buffer_length(&self) -> Result<(), DecodeError> {
        let len = self.buffer.as_ref().len();
        if len < TYPE.end {
            Err(DecodeError::nla_buffer_too_small(len, TYPE.end))
        } else if len < self.length() as usize {
            Err(DecodeError::nla_length_mismatch(len, self.length() as usize))
        } else if (self.length() as usize) < TYPE.end {
            Err(DecodeError::nla_invalid_length(len, self.length() as usize))
        } else {
            Ok(())
        }
    }

    /// Attribute code with the `NLA_F_NESTED` and `NLA_F_NET_BYTEORDER`
    /// flags masked out.
    pub fn kind(&self) -> u16 {
        self.type_raw() & NLA_TYPE_MASK
    }

    pub fn nested_flag(&self) -> bool {
        (self.type_raw() & NLA_F_NESTED) != 0
    }

    /// Length of the value part of the buffer
    pub fn value_length(&self) -> usize {
        self.length() as usize - TYPE.end
    }

    /// Bytes occupied by this record, padding included. Padding is not
    /// part of the declared length.
    pub fn aligned_length(&self) -> usize {
        nla_align(self.length() as usize)
    }
}

impl<'buffer, T: AsRef<[u8]> + ?Sized> NlaBuffer<&'buffer T> {
    /// Return the `value` field
    pub fn value(&self) -> &'buffer [u8] {
        &self.buffer.as_ref()[VALUE(self.value_length())]
    }
}

/// Walks the records of an attribute stream. Yields an error and stops
/// at the first malformed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NlasIterator<T> {
    position: usize,
    buffer: T,
}

impl<T> NlasIterator<T> {
    pub fn new(buffer: T) -> Self {
        NlasIterator {
            position: 0,
            buffer,
        }
    }

    /// Offset of the next record, relative to the start of the stream.
    /// Once the stream is exhausted this is the total walked length,
    /// padding of the last record included.
    pub fn position(&self) -> usize {
        self.position
    }
}

impl<'buffer, T: AsRef<[u8]> + ?Sized + 'buffer> Iterator
    for NlasIterator<&'buffer T>
{
    type Item = Result<NlaBuffer<&'buffer [u8]>, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.position >= self.buffer.as_ref().len() {
            return None;
        }

        match NlaBuffer::new_checked(&self.buffer.as_ref()[self.position..]) {
            Ok(nla_buffer) => {
                self.position += nla_buffer.aligned_length();
                Some(Ok(nla_buffer))
            }
            Err(e) => {
                // Make sure next time we call `next()`, we return None. We
                // don't try to continue iterating after we failed to
                // return a buffer.
                self.position = self.buffer.as_ref().len();
                Some(Err(e))
            }
        }
    }
}

/// Walk `buffer` using only the record length fields and return the
/// number of bytes the records span. Fails unless the walk lands exactly
/// on the end of the buffer.
pub fn walk_lengths(buffer: &[u8]) -> Result<usize, DecodeError> {
    let mut nlas = NlasIterator::new(buffer);
    loop {
        let offset = nlas.position();
        match nlas.next() {
            Some(Ok(_)) => {}
            Some(Err(e)) => return Err(e.at(offset)),
            None => break,
        }
    }
    if nlas.position() != buffer.len() {
        return Err(DecodeError::stream_length_mismatch(
            buffer.len(),
            nlas.position(),
        ));
    }
    Ok(nlas.position())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn record(kind: u16, value: &[u8], padded: bool) -> Vec<u8> {
        let length = (NLA_HEADER_SIZE + value.len()) as u16;
        let mut buf = Vec::new();
        buf.extend_from_slice(&length.to_ne_bytes());
        buf.extend_from_slice(&kind.to_ne_bytes());
        buf.extend_from_slice(value);
        if padded {
            buf.resize(nla_align(buf.len()), 0);
        }
        buf
    }

    #[test]
    fn align() {
        assert_eq!(nla_align(0), 0);
        assert_eq!(nla_align(5), 8);
        assert_eq!(nla_align(8), 8);
        assert_eq!(nla_align(9), 12);
    }

    #[test]
    fn flags_are_masked() {
        let buf = record(26 | NLA_F_NESTED, &[], true);
        let nla = NlaBuffer::new_checked(&buf[..]).unwrap();
        assert_eq!(nla.kind(), 26);
        assert!(nla.nested_flag());

        let buf = record(4 | NLA_F_NET_BYTEORDER, &[0; 4], true);
        let nla = NlaBuffer::new_checked(&buf[..]).unwrap();
        assert_eq!(nla.kind(), 4);
        assert!(!nla.nested_flag());
    }

    #[test]
    fn next_record_starts_after_padding() {
        // "eth0\0" is 5 bytes: record length 9, 3 bytes of padding
        let mut buf = record(3, b"eth0\0", true);
        buf.extend(record(4, &1500u32.to_ne_bytes(), true));
        assert_eq!(buf.len(), 20);

        let mut nlas = NlasIterator::new(&buf[..]);
        let first = nlas.next().unwrap().unwrap();
        assert_eq!(first.length(), 9);
        assert_eq!(first.value(), b"eth0\0");
        assert_eq!(first.aligned_length(), 12);
        assert_eq!(nlas.position(), 12);

        let second = nlas.next().unwrap().unwrap();
        assert_eq!(second.kind(), 4);
        assert_eq!(second.value(), &1500u32.to_ne_bytes());
        assert!(nlas.next().is_none());
        assert_eq!(walk_lengths(&buf).unwrap(), 20);
    }

    #[test]
    fn record_longer_than_buffer() {
        let mut buf = record(4, &1500u32.to_ne_bytes(), true);
        buf.truncate(6);
        let err = walk_lengths(&buf).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TruncatedAttribute);
        assert_eq!(err.offset(), Some(0));
    }

    #[test]
    fn length_shorter_than_header() {
        let mut buf = record(4, &1500u32.to_ne_bytes(), true);
        buf[..2].copy_from_slice(&2u16.to_ne_bytes());
        let err = NlaBuffer::new_checked(&buf[..]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TruncatedAttribute);
    }

    #[test]
    fn trailing_bytes_are_an_error() {
        let mut buf = record(4, &1500u32.to_ne_bytes(), true);
        buf.extend_from_slice(&[0, 0]);
        let err = walk_lengths(&buf).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TruncatedAttribute);
        assert_eq!(err.offset(), Some(8));
    }

    #[test]
    fn missing_padding_on_last_record_overshoots() {
        let buf = record(3, b"lo\0", false);
        let err = walk_lengths(&buf).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LengthMismatch);
    }
}

// SPDX-License-Identifier: MIT

use log::{debug, trace};

use crate::{
    layout::StructLayout, parse_hex, parse_link_address, parse_string,
    parse_u32, parse_u8, AttributeKey, Attributes, DecodeError, DecodeOptions,
    ErrorContext, NlaBuffer, NlasIterator, OperState, UnknownAttributes,
    Value,
};

/// Payload decoders that need nothing but the payload itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leaf {
    /// Ignore the payload.
    None,
    U8,
    U32,
    /// NUL terminated string, tolerant of a missing terminator.
    String,
    /// The whole payload, kept as opaque bytes.
    Hex,
    LinkAddress,
    /// One byte mapped through [`OperState`].
    OperState,
}

/// One region of a [`Decoder::Sequence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// A region of known size whose layout is not interpreted.
    Opaque(&'static str, usize),
    Struct(&'static str, &'static StructLayout),
    /// Whatever is left of the payload, kept as opaque bytes. Its size is
    /// the payload length minus the bytes consumed by the previous
    /// segments, so it absorbs anything a newer kernel appends.
    Remainder(&'static str),
}

/// How the payload of one attribute code is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoder {
    Leaf(Leaf),
    Struct(&'static StructLayout),
    /// The payload is an attribute stream of its own, decoded with
    /// another table.
    Nested(&'static AttributeTable),
    /// The payload is a concatenation of regions read back to back.
    Sequence(&'static [Segment]),
}

/// Maps attribute codes of one parsing context to their decoder and
/// display name.
#[derive(Debug, PartialEq, Eq)]
pub struct AttributeTable {
    pub name: &'static str,
    pub entries: &'static [(u16, Decoder, &'static str)],
}

impl AttributeTable {
    pub fn lookup(&self, code: u16) -> Option<(Decoder, &'static str)> {
        self.entries
            .iter()
            .find(|(c, _, _)| *c == code)
            .map(|&(_, decoder, name)| (decoder, name))
    }

    /// Decode the attribute stream held in the first `declared_len` bytes
    /// of `buf`.
    ///
    /// `base` is the offset of `buf` within the whole message, used to
    /// report absolute offsets in errors. The records must end exactly on
    /// `declared_len`, padding of the last record included.
    pub fn decode(
        &self,
        buf: &[u8],
        declared_len: usize,
        base: usize,
        options: &DecodeOptions,
    ) -> Result<Attributes, DecodeError> {
        self.decode_stream(buf, declared_len, base, options)
            .map(|(attrs, _)| attrs)
    }

    /// Same as [`decode`](Self::decode), also returning the number of
    /// bytes the walk went through.
    pub fn decode_stream(
        &self,
        buf: &[u8],
        declared_len: usize,
        base: usize,
        options: &DecodeOptions,
    ) -> Result<(Attributes, usize), DecodeError> {
        if declared_len > buf.len() {
            return Err(DecodeError::declared_length_exceeds_buffer(
                declared_len,
                buf.len(),
            )
            .at(base)
            .context(self.name));
        }
        let buf = &buf[..declared_len];

        let mut attrs = Attributes::new();
        let mut nlas = NlasIterator::new(buf);
        loop {
            let offset = base + nlas.position();
            let nla = match nlas.next() {
                Some(nla) => nla.map_err(|e| e.at(offset).context(self.name))?,
                None => break,
            };
            self.decode_record(&nla, offset, options, &mut attrs)?;
        }

        let consumed = nlas.position();
        if consumed != declared_len {
            return Err(DecodeError::stream_length_mismatch(
                declared_len,
                consumed,
            )
            .at(base)
            .context(self.name));
        }
        Ok((attrs, consumed))
    }

    fn decode_record(
        &self,
        nla: &NlaBuffer<&[u8]>,
        offset: usize,
        options: &DecodeOptions,
        attrs: &mut Attributes,
    ) -> Result<(), DecodeError> {
        let code = nla.kind();
        trace!(
            "{}: attribute {code} at offset {offset}, length {}",
            self.name,
            nla.length()
        );

        let Some((decoder, name)) = self.lookup(code) else {
            match options.unknown_attributes {
                UnknownAttributes::Drop => {
                    debug!(
                        "{}: dropping unknown attribute {code} ({} bytes)",
                        self.name,
                        nla.value_length()
                    );
                }
                UnknownAttributes::Retain => {
                    attrs.insert(
                        AttributeKey::Code(code),
                        Value::Opaque(nla.value().to_vec()),
                    );
                }
            }
            return Ok(());
        };

        if nla.nested_flag() && !matches!(decoder, Decoder::Nested(_)) {
            debug!(
                "{}: attribute {code} ({name}) is flagged nested but is not \
                 an attribute stream",
                self.name
            );
        }

        let value = decoder
            .decode(nla.value(), offset + crate::NLA_HEADER_SIZE, options)
            .map_err(|e| {
                e.at(offset).context(format!(
                    "{}: failed to decode attribute {code} ({name})",
                    self.name
                ))
            })?;
        attrs.insert(name, value);
        Ok(())
    }
}

impl Decoder {
    /// Decode `payload`, which starts at absolute offset `base`.
    pub fn decode(
        &self,
        payload: &[u8],
        base: usize,
        options: &DecodeOptions,
    ) -> Result<Value, DecodeError> {
        match self {
            Self::Leaf(leaf) => leaf.decode(payload, options),
            Self::Struct(layout) => decode_struct(layout, payload),
            Self::Nested(table) => table
                .decode(payload, payload.len(), base, options)
                .map(Value::Attributes),
            Self::Sequence(segments) => {
                decode_sequence(segments, payload).map(Value::Attributes)
            }
        }
    }
}

impl Leaf {
    pub fn decode(
        &self,
        payload: &[u8],
        options: &DecodeOptions,
    ) -> Result<Value, DecodeError> {
        Ok(match self {
            Self::None => Value::None,
            Self::U8 => Value::U8(parse_u8(payload)?),
            Self::U32 => Value::U32(parse_u32(payload)?),
            Self::String => Value::String(parse_string(payload)?),
            Self::Hex => Value::Opaque(parse_hex(payload, payload.len())?),
            Self::LinkAddress => {
                Value::LinkAddress(parse_link_address(payload)?)
            }
            Self::OperState => {
                let raw = parse_u8(payload)?;
                match OperState::try_from(raw) {
                    Ok(state) => Value::State(state),
                    Err(e) => options.degrade_enum(e, Value::U8(raw))?,
                }
            }
        })
    }
}

fn decode_struct(
    layout: &StructLayout,
    payload: &[u8],
) -> Result<Value, DecodeError> {
    let mut attrs = layout.decode(payload)?;
    let extra = &payload[layout.size()..];
    if !extra.is_empty() {
        match layout.tail {
            Some(name) => attrs.insert(name, Value::Opaque(extra.to_vec())),
            None => debug!(
                "{}: ignoring {} bytes past the known fields",
                layout.name,
                extra.len()
            ),
        }
    }
    Ok(Value::Attributes(attrs))
}

fn decode_sequence(
    segments: &[Segment],
    payload: &[u8],
) -> Result<Attributes, DecodeError> {
    let mut attrs = Attributes::new();
    let mut consumed = 0;
    for segment in segments {
        let rest = &payload[consumed..];
        match *segment {
            Segment::Opaque(name, size) => {
                attrs.insert(name, Value::Opaque(parse_hex(rest, size)?));
                consumed += size;
            }
            Segment::Struct(name, layout) => {
                attrs.insert(name, Value::Attributes(layout.decode(rest)?));
                consumed += layout.size();
            }
            Segment::Remainder(name) => {
                let size = payload.len() - consumed;
                attrs.insert(name, Value::Opaque(parse_hex(rest, size)?));
                consumed += size;
            }
        }
    }
    Ok(attrs)
}

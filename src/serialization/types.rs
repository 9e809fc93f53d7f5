use crate::error::{PbtxError, Result};

pub fn write_varint64(buf: &mut Vec<u8>, mut val: u64) {
    while val >= 0x80 {
        buf.push(((val & 0x7F) as u8) | 0x80);
        val >>= 7;
    }
    buf.push(val as u8);
}

pub fn write_varint32(buf: &mut Vec<u8>, val: u32) {
    write_varint64(buf, u64::from(val));
}

pub fn write_string(buf: &mut Vec<u8>, val: &str) -> Result<()> {
    write_variable_binary(buf, val.as_bytes())
}

pub fn write_variable_binary(buf: &mut Vec<u8>, data: &[u8]) -> Result<()> {
    let len = u32::try_from(data.len()).map_err(|_| {
        PbtxError::Serialization(format!("{} bytes exceed the u32 length prefix", data.len()))
    })?;
    write_varint32(buf, len);
    buf.extend_from_slice(data);
    Ok(())
}

pub fn write_array<T, F>(buf: &mut Vec<u8>, items: &[T], mut serialize: F) -> Result<()>
where
    F: FnMut(&mut Vec<u8>, &T) -> Result<()>,
{
    let len = u32::try_from(items.len()).map_err(|_| {
        PbtxError::Serialization(format!("{} items exceed the u32 count prefix", items.len()))
    })?;
    write_varint32(buf, len);
    for item in items {
        serialize(buf, item)?;
    }
    Ok(())
}

/// Reads a minimally encoded LEB128 varint of at most ten bytes.
pub fn read_varint64(cursor: &mut &[u8]) -> Result<u64> {
    let mut value = 0_u64;
    let mut shift = 0_u32;
    let mut index = 0_usize;

    while index < cursor.len() {
        let byte = cursor[index];
        index += 1;
        if shift == 63 && byte > 1 {
            return Err(PbtxError::MalformedInput(
                "varint64 value is too large".to_string(),
            ));
        }
        value |= u64::from(byte & 0x7F) << shift;
        if byte & 0x80 == 0 {
            if byte == 0 && index > 1 {
                return Err(PbtxError::MalformedInput(
                    "varint is not minimally encoded".to_string(),
                ));
            }
            *cursor = &cursor[index..];
            return Ok(value);
        }
        shift += 7;
    }

    Err(PbtxError::MalformedInput(
        "unexpected EOF while parsing varint".to_string(),
    ))
}

pub fn read_varint32(cursor: &mut &[u8]) -> Result<u32> {
    let mut probe = *cursor;
    let value = read_varint64(&mut probe)?;
    let value = u32::try_from(value).map_err(|_| {
        PbtxError::MalformedInput(format!("varint32 value {value} is out of range"))
    })?;
    *cursor = probe;
    Ok(value)
}

/// Reads a length-prefixed byte string, rejecting prefixes above `max_len`.
pub fn read_variable_binary<'a>(cursor: &mut &'a [u8], max_len: usize) -> Result<&'a [u8]> {
    let mut probe = *cursor;
    let len = read_varint32(&mut probe)? as usize;
    if len > max_len {
        return Err(PbtxError::MalformedInput(format!(
            "length prefix {len} exceeds limit {max_len}"
        )));
    }
    if probe.len() < len {
        return Err(PbtxError::MalformedInput(format!(
            "length prefix {len} exceeds remaining {} bytes",
            probe.len()
        )));
    }
    let (value, rest) = probe.split_at(len);
    *cursor = rest;
    Ok(value)
}

pub fn read_string(cursor: &mut &[u8], max_len: usize) -> Result<String> {
    let mut probe = *cursor;
    let bytes = read_variable_binary(&mut probe, max_len)?;
    let value = std::str::from_utf8(bytes)
        .map_err(|err| PbtxError::MalformedInput(format!("invalid UTF-8 string: {err}")))?
        .to_string();
    *cursor = probe;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use crate::error::PbtxError;
    use crate::serialization::types::{
        read_string, read_varint32, read_varint64, write_string, write_varint32, write_varint64,
    };

    #[test]
    fn varint_matches_known_vectors() {
        let cases: [(u64, &str); 5] = [
            (0, "00"),
            (127, "7f"),
            (128, "8001"),
            (300, "ac02"),
            (u64::MAX, "ffffffffffffffffff01"),
        ];
        for (value, expected) in cases {
            let mut buf = Vec::new();
            write_varint64(&mut buf, value);
            assert_eq!(hex::encode(&buf), expected);

            let mut slice = buf.as_slice();
            assert_eq!(read_varint64(&mut slice).expect("varint should decode"), value);
            assert!(slice.is_empty());
        }
    }

    #[test]
    fn varint32_round_trip_at_bounds() {
        for value in [0_u32, 1, u16::MAX as u32, u32::MAX] {
            let mut buf = Vec::new();
            write_varint32(&mut buf, value);
            let mut slice = buf.as_slice();
            assert_eq!(read_varint32(&mut slice).expect("varint32 should decode"), value);
            assert!(slice.is_empty());
        }
    }

    #[test]
    fn rejects_varint32_overflow_without_consuming() {
        let mut buf = Vec::new();
        write_varint64(&mut buf, u64::from(u32::MAX) + 1);
        let mut slice = buf.as_slice();
        assert!(matches!(
            read_varint32(&mut slice),
            Err(PbtxError::MalformedInput(_))
        ));
        assert_eq!(slice.len(), buf.len());
    }

    #[test]
    fn rejects_bad_varints() {
        let cases: [&[u8]; 4] = [
            &[],
            &[0x80],
            &[0x80, 0x00],
            &[0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x02],
        ];
        for bytes in cases {
            let mut slice = bytes;
            assert!(matches!(
                read_varint64(&mut slice),
                Err(PbtxError::MalformedInput(_))
            ));
        }
    }

    #[test]
    fn string_round_trip() {
        let mut buf = Vec::new();
        write_string(&mut buf, "Hellooo fröm Swäden!").expect("string should serialize");
        assert_eq!(
            hex::encode(&buf),
            "1648656c6c6f6f6f206672c3b66d205377c3a464656e21"
        );

        let mut slice = buf.as_slice();
        let decoded = read_string(&mut slice, 64).expect("string should deserialize");
        assert_eq!(decoded, "Hellooo fröm Swäden!");
        assert!(slice.is_empty());
    }

    #[test]
    fn rejects_over_long_and_invalid_strings() {
        let mut buf = Vec::new();
        write_string(&mut buf, "abcdef").expect("string should serialize");
        let mut slice = buf.as_slice();
        assert!(matches!(
            read_string(&mut slice, 5),
            Err(PbtxError::MalformedInput(_))
        ));

        let mut short = &buf[..4];
        assert!(matches!(
            read_string(&mut short, 64),
            Err(PbtxError::MalformedInput(_))
        ));

        let mut invalid: &[u8] = &[0x02, 0xc3, 0x28];
        assert!(matches!(
            read_string(&mut invalid, 64),
            Err(PbtxError::MalformedInput(_))
        ));
    }
}

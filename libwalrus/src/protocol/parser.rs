// libwalrus/src/protocol/parser.rs

use num_bigint::BigUint;

use crate::{Error, Result};

/// Ensure the slice has at least `min` bytes.
pub fn ensure_len(data: &[u8], min: usize) -> Result<()> {
    if data.len() < min {
        return Err(Error::InvalidLength {
            expected: min,
            actual: data.len(),
        });
    }
    Ok(())
}

/// Read a little-endian u16 at given index, with bounds checking.
pub fn le_u16_at(data: &[u8], idx: usize) -> Result<u16> {
    ensure_len(data, idx + 2)?;
    Ok(u16::from_le_bytes([data[idx], data[idx + 1]]))
}

/// Return a subslice with bounds checking.
pub fn slice_at(data: &[u8], idx: usize, len: usize) -> Result<&[u8]> {
    ensure_len(data, idx + len)?;
    Ok(&data[idx..idx + len])
}

/// Read a single byte at `idx` with bounds checking.
pub fn byte_at(data: &[u8], idx: usize) -> Result<u8> {
    ensure_len(data, idx + 1)?;
    Ok(data[idx])
}

/// Split a `key:value` line. Both halves are trimmed.
pub fn split_field(line: &str) -> Result<(&str, &str)> {
    line.split_once(':')
        .map(|(name, value)| (name.trim(), value.trim()))
        .ok_or_else(|| Error::MalformedField(line.to_string()))
}

/// Name half of a `key:value` line, if the line has one.
pub fn field_name(line: &str) -> Option<&str> {
    split_field(line).ok().map(|(name, _)| name)
}

/// Parse the hex value of a `key:value` line. Spaces between digit
/// groups (`04 00`) are ignored.
pub fn hex_value(line: &str) -> Result<BigUint> {
    let (name, value) = split_field(line)?;
    let digits: Vec<u8> = value
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    BigUint::parse_bytes(&digits, 16)
        .ok_or_else(|| Error::MalformedField(format!("{} value {:?} is not hex", name, value)))
}

/// Like [`hex_value`] but the value must fit the target integer type.
pub fn hex_value_as<T>(line: &str) -> Result<T>
where
    T: TryFrom<BigUint>,
{
    let value = hex_value(line)?;
    T::try_from(value).map_err(|_| Error::MalformedField(format!("{:?} value out of range", line)))
}

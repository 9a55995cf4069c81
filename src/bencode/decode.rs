use std::collections::BTreeMap;

use log::trace;

use super::error::BencodeError;
use crate::bencode::bvalue::BValue;

/// How many lists/dictionaries may be nested inside each other before the
/// decoder gives up.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Decodes one value from the front of `input`, returning it together with
/// the bytes that follow it.
///
/// ```
/// use bencode_info::bencode::{decode_bencode, BValue};
///
/// let (value, rest) = decode_bencode(b"5:hellotail").unwrap();
/// assert_eq!(value, BValue::string("hello"));
/// assert_eq!(rest, b"tail");
/// ```
pub fn decode_bencode(input: &[u8]) -> Result<(BValue, &[u8]), BencodeError> {
	decode_bencode_with_depth(input, DEFAULT_MAX_DEPTH)
}

/// Same as [`decode_bencode`] with a caller supplied nesting limit.
pub fn decode_bencode_with_depth(
	input: &[u8],
	max_depth: usize,
) -> Result<(BValue, &[u8]), BencodeError> {
	decode_value(input, 0, max_depth)
}

fn decode_value(
	input: &[u8],
	depth: usize,
	max_depth: usize,
) -> Result<(BValue, &[u8]), BencodeError> {
	match input.first() {
		Some(b'i') => decode_integer(input),
		Some(b'l') => decode_list(input, depth, max_depth),
		Some(b'd') => decode_dict(input, depth, max_depth),
		Some(c) if c.is_ascii_digit() => decode_string(input),
		Some(c) => Err(BencodeError::UnsupportedTag(format!(
			"unexpected byte 0x{:02x}",
			c
		))),
		None => Err(BencodeError::UnsupportedTag("empty input".to_string())),
	}
}

/// Decodes a Bencoded integer of the form `i<digits>e`.
fn decode_integer(input: &[u8]) -> Result<(BValue, &[u8]), BencodeError> {
	let body = &input[1..]; // skip 'i'
	let end_pos = body
		.iter()
		.position(|&b| b == b'e')
		.ok_or_else(|| BencodeError::MalformedInteger("missing 'e'".to_string()))?;

	let span = &body[..end_pos];
	let digits = span.strip_prefix(b"-").unwrap_or(span);

	if digits.is_empty() {
		return Err(BencodeError::MalformedInteger("no digits".to_string()));
	}
	if !digits.iter().all(u8::is_ascii_digit) {
		return Err(BencodeError::MalformedInteger(format!(
			"non-numeric '{}'",
			String::from_utf8_lossy(span)
		)));
	}
	// Leading zeros not allowed, and neither is "-0"
	if digits[0] == b'0' && (digits.len() > 1 || digits.len() != span.len()) {
		return Err(BencodeError::MalformedInteger(format!(
			"non-canonical '{}'",
			String::from_utf8_lossy(span)
		)));
	}

	// span is pure ASCII at this point
	let num_str = String::from_utf8_lossy(span);
	let parsed = num_str.parse::<i64>().map_err(|e| {
		BencodeError::MalformedInteger(format!("'{}': {}", num_str, e))
	})?;

	// add 1 to account for 'e'
	Ok((BValue::Integer(parsed), &body[end_pos + 1..]))
}

/// Decodes a Bencoded string of the form `<length>:<bytes>`.
fn decode_string(input: &[u8]) -> Result<(BValue, &[u8]), BencodeError> {
	let colon_index = input
		.iter()
		.position(|b| !b.is_ascii_digit())
		.ok_or_else(|| BencodeError::MalformedLength("missing ':'".to_string()))?;

	if input[colon_index] != b':' {
		return Err(BencodeError::MalformedLength(format!(
			"unexpected byte 0x{:02x} before ':'",
			input[colon_index]
		)));
	}

	// "0:" is fine, "05:" is not canonical
	if colon_index > 1 && input[0] == b'0' {
		return Err(BencodeError::MalformedLength(format!(
			"leading zero in '{}'",
			String::from_utf8_lossy(&input[..colon_index])
		)));
	}

	let len_str = String::from_utf8_lossy(&input[..colon_index]);
	let length = len_str.parse::<usize>().map_err(|e| {
		BencodeError::MalformedLength(format!("'{}': {}", len_str, e))
	})?;

	let data = &input[colon_index + 1..];
	if data.len() < length {
		return Err(BencodeError::TruncatedInput {
			needed: length,
			available: data.len(),
		});
	}

	let (bytes, rest) = data.split_at(length);
	Ok((BValue::ByteString(bytes.to_vec()), rest))
}

/// Decodes a Bencoded list of the form `l<items>e`.
fn decode_list(
	input: &[u8],
	depth: usize,
	max_depth: usize,
) -> Result<(BValue, &[u8]), BencodeError> {
	enter_container(depth, max_depth)?;
	trace!("decoding list at depth {}", depth);

	let mut rest = &input[1..]; // skip 'l'
	let mut items = Vec::new();

	loop {
		match rest.first() {
			Some(b'e') => break,
			Some(_) => {
				let (val, tail) = decode_value(rest, depth + 1, max_depth)?;
				items.push(val);
				rest = tail;
			}
			None => return Err(unclosed()),
		}
	}

	Ok((BValue::List(items), &rest[1..]))
}

/// Decodes a Bencoded dictionary of the form `d<key><value>...e`.
fn decode_dict(
	input: &[u8],
	depth: usize,
	max_depth: usize,
) -> Result<(BValue, &[u8]), BencodeError> {
	enter_container(depth, max_depth)?;
	trace!("decoding dictionary at depth {}", depth);

	let mut rest = &input[1..]; // skip 'd'
	let mut map = BTreeMap::new();

	loop {
		match rest.first() {
			Some(b'e') => break,
			Some(_) => {
				let (key, tail) = decode_value(rest, depth + 1, max_depth)?;
				let key = match key {
					BValue::ByteString(bytes) => bytes,
					other => return Err(BencodeError::InvalidKeyType(other.kind())),
				};

				let (value, tail) = decode_value(tail, depth + 1, max_depth)?;
				// duplicate keys: last one wins
				map.insert(key, value);
				rest = tail;
			}
			None => return Err(unclosed()),
		}
	}

	Ok((BValue::Dict(map), &rest[1..]))
}

fn enter_container(depth: usize, max_depth: usize) -> Result<(), BencodeError> {
	if depth >= max_depth {
		return Err(BencodeError::NestingTooDeep(max_depth));
	}
	Ok(())
}

// The input ran out where at least a closing 'e' was expected.
fn unclosed() -> BencodeError {
	BencodeError::TruncatedInput {
		needed: 1,
		available: 0,
	}
}

use std::collections::BTreeMap;

use super::error::BencodeError;

/// A decoded bencode value.
///
/// Dictionary keys are raw bytes kept in a `BTreeMap`, so iteration order is
/// always the canonical (byte-wise sorted) order no matter how the input was
/// laid out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BValue {
	ByteString(Vec<u8>), // raw bytes for any string
	Integer(i64),
	List(Vec<BValue>),
	Dict(BTreeMap<Vec<u8>, BValue>),
}

impl BValue {
	/// Builds a byte string from UTF-8 text.
	pub fn string(s: &str) -> Self {
		BValue::ByteString(s.as_bytes().to_vec())
	}

	/// Human readable name of the variant, used in error messages.
	pub fn kind(&self) -> &'static str {
		match self {
			BValue::ByteString(_) => "byte string",
			BValue::Integer(_) => "integer",
			BValue::List(_) => "list",
			BValue::Dict(_) => "dictionary",
		}
	}

	pub fn as_bytes(&self) -> Result<&[u8], BencodeError> {
		match self {
			BValue::ByteString(b) => Ok(b),
			other => Err(other.mismatch("byte string")),
		}
	}

	pub fn as_integer(&self) -> Result<i64, BencodeError> {
		match self {
			BValue::Integer(i) => Ok(*i),
			other => Err(other.mismatch("integer")),
		}
	}

	pub fn as_list(&self) -> Result<&[BValue], BencodeError> {
		match self {
			BValue::List(items) => Ok(items),
			other => Err(other.mismatch("list")),
		}
	}

	pub fn as_dict(&self) -> Result<&BTreeMap<Vec<u8>, BValue>, BencodeError> {
		match self {
			BValue::Dict(map) => Ok(map),
			other => Err(other.mismatch("dictionary")),
		}
	}

	/// Looks up `key` in a dictionary.
	///
	/// A missing key gives `KeyNotFound`, which callers can tell apart from
	/// the `TypeMismatch` returned when `self` is not a dictionary at all.
	pub fn get(&self, key: &[u8]) -> Result<&BValue, BencodeError> {
		self.as_dict()?
			.get(key)
			.ok_or_else(|| BencodeError::KeyNotFound(String::from_utf8_lossy(key).into_owned()))
	}

	fn mismatch(&self, expected: &'static str) -> BencodeError {
		BencodeError::TypeMismatch {
			expected,
			found: self.kind(),
		}
	}
}

impl From<i64> for BValue {
	fn from(i: i64) -> Self {
		BValue::Integer(i)
	}
}

impl From<&str> for BValue {
	fn from(s: &str) -> Self {
		BValue::string(s)
	}
}

impl From<Vec<u8>> for BValue {
	fn from(bytes: Vec<u8>) -> Self {
		BValue::ByteString(bytes)
	}
}

impl From<Vec<BValue>> for BValue {
	fn from(items: Vec<BValue>) -> Self {
		BValue::List(items)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample_dict() -> BValue {
		let mut map = BTreeMap::new();
		map.insert(b"name".to_vec(), BValue::string("ubuntu.iso"));
		map.insert(b"length".to_vec(), BValue::Integer(1024));
		BValue::Dict(map)
	}

	#[test]
	fn test_accessors_match_variant() {
		assert_eq!(BValue::string("abc").as_bytes().unwrap(), b"abc");
		assert_eq!(BValue::Integer(-7).as_integer().unwrap(), -7);
		let list = BValue::from(vec![BValue::Integer(1)]);
		assert_eq!(list.as_list().unwrap(), &[BValue::Integer(1)]);
		assert_eq!(sample_dict().as_dict().unwrap().len(), 2);
	}

	#[test]
	fn test_accessor_type_mismatch() {
		let err = BValue::Integer(3).as_bytes().unwrap_err();
		assert_eq!(
			err,
			BencodeError::TypeMismatch {
				expected: "byte string",
				found: "integer"
			}
		);
		assert!(matches!(
			BValue::string("x").as_dict(),
			Err(BencodeError::TypeMismatch { found: "byte string", .. })
		));
	}

	#[test]
	fn test_get_existing_key() {
		let dict = sample_dict();
		assert_eq!(dict.get(b"length").unwrap(), &BValue::Integer(1024));
	}

	#[test]
	fn test_get_missing_key_is_distinct_from_mismatch() {
		let dict = sample_dict();
		assert_eq!(
			dict.get(b"announce").unwrap_err(),
			BencodeError::KeyNotFound("announce".to_string())
		);
		assert!(matches!(
			BValue::List(vec![]).get(b"announce"),
			Err(BencodeError::TypeMismatch { expected: "dictionary", .. })
		));
	}

	#[test]
	fn test_dict_iterates_sorted() {
		let mut map = BTreeMap::new();
		for key in ["b", "a", "c"] {
			map.insert(key.as_bytes().to_vec(), BValue::Integer(0));
		}
		let keys: Vec<&[u8]> = map.keys().map(|k| k.as_slice()).collect();
		assert_eq!(keys, vec![b"a".as_slice(), b"b".as_slice(), b"c".as_slice()]);
	}
}

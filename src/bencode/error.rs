use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BencodeError {
	#[error("Malformed string length: {0}")]
	MalformedLength(String),

	#[error("Truncated input: needed {needed} more bytes, {available} available")]
	TruncatedInput { needed: usize, available: usize },

	#[error("Malformed integer: {0}")]
	MalformedInteger(String),

	#[error("Dictionary key must be a byte string, found {0}")]
	InvalidKeyType(&'static str),

	#[error("Unsupported tag: {0}")]
	UnsupportedTag(String),

	#[error("Nesting deeper than {0} levels")]
	NestingTooDeep(usize),

	#[error("Expected {expected}, found {found}")]
	TypeMismatch {
		expected: &'static str,
		found: &'static str,
	},

	#[error("Key not found: '{0}'")]
	KeyNotFound(String),
}

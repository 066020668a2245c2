//! The interaction-state codec.
//!
//! A token looks like `schema_name:field1:field2:...`. Each field is
//! base64-encoded on its own, so field values may contain the delimiter.
//! The schema name is left in plain text and doubles as the dispatch tag.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::{TokenError, TokenResult};

/// Separates the schema name and the encoded fields.
pub const DELIMITER: char = ':';

/// The encode/decode contract and dispatch tag of one token shape.
pub trait TokenSchema {
    /// The structured value carried by the token.
    type Value;

    /// Unique schema name, used as the token's first segment.
    const NAME: &'static str;

    /// Project the value onto its string fields. Always at least one
    /// field: a token with none is rejected on decode.
    fn encode(value: &Self::Value) -> Vec<String>;

    /// Rebuild the value from its decoded string fields.
    fn decode(fields: &[String]) -> TokenResult<Self::Value>;
}

/// Encode a value into a token.
pub fn encode_token<S: TokenSchema>(value: &S::Value) -> String {
    let mut token = String::from(S::NAME);
    for field in S::encode(value) {
        token.push(DELIMITER);
        token.push_str(&STANDARD.encode(field.as_bytes()));
    }
    token
}

/// Decode a token produced by [`encode_token`] for the same schema.
pub fn decode_token<S: TokenSchema>(token: &str) -> TokenResult<S::Value> {
    let mut segments = token.split(DELIMITER);
    let name = segments.next().unwrap_or_default();
    if name != S::NAME {
        return Err(TokenError::WrongSchema {
            expected: S::NAME,
            found: name.to_string(),
        });
    }

    let fields = segments
        .enumerate()
        .map(|(index, segment)| {
            let bytes = STANDARD
                .decode(segment)
                .map_err(|_| TokenError::InvalidEncoding { index })?;
            String::from_utf8(bytes).map_err(|_| TokenError::InvalidEncoding { index })
        })
        .collect::<TokenResult<Vec<String>>>()?;
    if fields.is_empty() {
        return Err(TokenError::MissingData(S::NAME));
    }

    S::decode(&fields)
}

/// Returns true if the token's schema name is exactly `S::NAME`.
pub fn matches_token<S: TokenSchema>(token: &str) -> bool {
    schema_name(token) == S::NAME
}

/// The plain-text schema name of a token.
pub fn schema_name(token: &str) -> &str {
    token.split(DELIMITER).next().unwrap_or_default()
}

/// Check a token against the transport's length limit.
pub fn ensure_fits(token: &str, limit: usize) -> TokenResult<()> {
    let len = token.chars().count();
    if len > limit {
        return Err(TokenError::TooLong { len, limit });
    }
    Ok(())
}

/// Length of `bytes` bytes once base64-encoded.
pub fn encoded_len(bytes: usize) -> usize {
    bytes.div_ceil(3) * 4
}

/// The longest prefix of `value`, cut on a char boundary, whose base64
/// form fits in `budget` characters.
pub fn truncate_to_budget(value: &str, budget: usize) -> &str {
    let max_bytes = budget / 4 * 3;
    if value.len() <= max_bytes {
        return value;
    }
    let mut end = max_bytes;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    &value[..end]
}

// ---------------------------------------------------------------------------
// Field helpers for schema implementations
// ---------------------------------------------------------------------------

/// Check the number of decoded fields.
pub fn expect_fields(schema: &'static str, fields: &[String], expected: usize) -> TokenResult<()> {
    if fields.len() != expected {
        return Err(TokenError::FieldCount {
            schema,
            expected,
            found: fields.len(),
        });
    }
    Ok(())
}

/// Parse a decoded field.
pub fn parse_field<T: std::str::FromStr>(field: &'static str, value: &str) -> TokenResult<T> {
    value.parse().map_err(|_| TokenError::InvalidField {
        field,
        value: value.to_string(),
    })
}

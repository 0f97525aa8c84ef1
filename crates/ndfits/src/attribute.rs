//! Array metadata attributes and their FITS header-card encoding.

use log::debug;

use crate::error::{Error, Result};
use crate::header::{encode_keyword, Card};
use crate::value::Value;

/// Maximum length of a string attribute value, matching the FITS card value
/// capacity. Longer strings are silently truncated.
pub const MAX_STRING_LEN: usize = 80;

/// A typed attribute value.
///
/// `Undefined` attributes are skipped during serialization; 64-bit integer
/// values exist in the source type space but have no card encoding here.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Int8(i8),
    UInt8(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    Str(String),
    Undefined,
}

impl AttrValue {
    fn type_name(&self) -> &'static str {
        match self {
            AttrValue::Int8(_) => "int8",
            AttrValue::UInt8(_) => "uint8",
            AttrValue::Int16(_) => "int16",
            AttrValue::UInt16(_) => "uint16",
            AttrValue::Int32(_) => "int32",
            AttrValue::UInt32(_) => "uint32",
            AttrValue::Int64(_) => "int64",
            AttrValue::UInt64(_) => "uint64",
            AttrValue::Float32(_) => "float32",
            AttrValue::Float64(_) => "float64",
            AttrValue::Str(_) => "string",
            AttrValue::Undefined => "undefined",
        }
    }
}

/// One named metadata entry attached to a pixel buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeEntry {
    pub name: String,
    pub description: Option<String>,
    pub value: AttrValue,
}

impl AttributeEntry {
    pub fn new(name: impl Into<String>, value: AttrValue) -> Self {
        AttributeEntry {
            name: name.into(),
            description: None,
            value,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Map an attribute value to its header-card value.
///
/// Returns `Ok(None)` for `Undefined` (the entry is skipped, not an error).
/// Strings are truncated to [`MAX_STRING_LEN`] characters. 64-bit integers
/// fail with [`Error::UnsupportedAttributeType`].
fn card_value(value: &AttrValue) -> Result<Option<Value>> {
    let mapped = match value {
        AttrValue::Int8(v) => Value::Integer(i64::from(*v)),
        AttrValue::UInt8(v) => Value::Integer(i64::from(*v)),
        AttrValue::Int16(v) => Value::Integer(i64::from(*v)),
        AttrValue::UInt16(v) => Value::Integer(i64::from(*v)),
        AttrValue::Int32(v) => Value::Integer(i64::from(*v)),
        AttrValue::UInt32(v) => Value::Integer(i64::from(*v)),
        AttrValue::Float32(v) => Value::Float(f64::from(*v)),
        AttrValue::Float64(v) => Value::Float(*v),
        AttrValue::Str(s) => Value::String(s.chars().take(MAX_STRING_LEN).collect()),
        AttrValue::Undefined => return Ok(None),
        AttrValue::Int64(_) | AttrValue::UInt64(_) => {
            return Err(Error::UnsupportedAttributeType(value.type_name()))
        }
    };
    Ok(Some(mapped))
}

/// Serialize an ordered attribute collection into header cards, one per
/// entry, preserving collection order.
///
/// `Undefined` entries emit no card. The first failing entry aborts the
/// remainder of the pass. Duplicate names are passed through unchanged.
pub fn serialize_attributes(entries: &[AttributeEntry]) -> Result<Vec<Card>> {
    let mut cards = Vec::with_capacity(entries.len());

    for entry in entries {
        let value = match card_value(&entry.value)? {
            Some(value) => value,
            None => {
                debug!("skipping undefined attribute {:?}", entry.name);
                continue;
            }
        };
        let keyword = encode_keyword(&entry.name)?;
        debug!("attribute {:?} -> {:?}", entry.name, value);
        cards.push(Card {
            keyword,
            value: Some(value),
            comment: entry.description.clone(),
        });
    }

    Ok(cards)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_kinds_map_to_integer_values() {
        let cases: [(AttrValue, i64); 6] = [
            (AttrValue::Int8(-5), -5),
            (AttrValue::UInt8(200), 200),
            (AttrValue::Int16(-30000), -30000),
            (AttrValue::UInt16(60000), 60000),
            (AttrValue::Int32(-2000000), -2000000),
            (AttrValue::UInt32(4000000000), 4000000000),
        ];
        for (value, expected) in cases {
            assert_eq!(card_value(&value).unwrap(), Some(Value::Integer(expected)));
        }
    }

    #[test]
    fn float_kinds_map_bit_exactly() {
        assert_eq!(
            card_value(&AttrValue::Float32(1.5)).unwrap(),
            Some(Value::Float(1.5))
        );
        assert_eq!(
            card_value(&AttrValue::Float64(9.80665)).unwrap(),
            Some(Value::Float(9.80665))
        );
    }

    #[test]
    fn string_truncated_at_limit() {
        let long = "Y".repeat(MAX_STRING_LEN + 20);
        let mapped = card_value(&AttrValue::Str(long)).unwrap();
        match mapped {
            Some(Value::String(s)) => assert_eq!(s.len(), MAX_STRING_LEN),
            other => panic!("expected string value, got {:?}", other),
        }
    }

    #[test]
    fn undefined_is_skipped_not_an_error() {
        assert_eq!(card_value(&AttrValue::Undefined).unwrap(), None);
    }

    #[test]
    fn sixty_four_bit_integers_rejected() {
        assert!(matches!(
            card_value(&AttrValue::Int64(1)),
            Err(Error::UnsupportedAttributeType("int64"))
        ));
        assert!(matches!(
            card_value(&AttrValue::UInt64(1)),
            Err(Error::UnsupportedAttributeType("uint64"))
        ));
    }

    #[test]
    fn serialize_preserves_order_and_skips_undefined() {
        let entries = vec![
            AttributeEntry::new("EXPTIME", AttrValue::Float64(1.5)),
            AttributeEntry::new("UNSET", AttrValue::Undefined),
            AttributeEntry::new("GAIN", AttrValue::Int32(4)),
        ];
        let cards = serialize_attributes(&entries).unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].keyword_str(), "EXPTIME");
        assert_eq!(cards[1].keyword_str(), "GAIN");
    }

    #[test]
    fn serialize_carries_description_as_comment() {
        let entries = vec![
            AttributeEntry::new("EXPTIME", AttrValue::Float64(0.25))
                .with_description("exposure time in seconds"),
        ];
        let cards = serialize_attributes(&entries).unwrap();
        assert_eq!(
            cards[0].comment.as_deref(),
            Some("exposure time in seconds")
        );
    }

    #[test]
    fn serialize_aborts_on_first_failure() {
        let entries = vec![
            AttributeEntry::new("OK1", AttrValue::Int16(1)),
            AttributeEntry::new("BAD", AttrValue::UInt64(2)),
            AttributeEntry::new("OK2", AttrValue::Int16(3)),
        ];
        assert!(matches!(
            serialize_attributes(&entries),
            Err(Error::UnsupportedAttributeType("uint64"))
        ));
    }

    #[test]
    fn serialize_rejects_unencodable_name() {
        let entries = vec![AttributeEntry::new("exposure", AttrValue::Int16(1))];
        assert!(matches!(
            serialize_attributes(&entries),
            Err(Error::InvalidKeyword(_))
        ));
    }

    #[test]
    fn serialize_passes_duplicates_through() {
        let entries = vec![
            AttributeEntry::new("TWICE", AttrValue::Int16(1)),
            AttributeEntry::new("TWICE", AttrValue::Int16(2)),
        ];
        let cards = serialize_attributes(&entries).unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].keyword, cards[1].keyword);
    }
}

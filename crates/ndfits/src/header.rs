//! FITS header card construction and serialization.

use crate::block::{BLOCK_SIZE, CARDS_PER_BLOCK, CARD_SIZE, HEADER_PAD_BYTE};
use crate::error::{Error, Result};
use crate::value::{format_value, Value};

/// A FITS header card (one 80-byte keyword record).
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    /// The 8-byte keyword name, ASCII, left-justified, space-padded.
    pub keyword: [u8; 8],
    /// The value, if this card carries a value indicator (`= ` in bytes 8..10).
    pub value: Option<Value>,
    /// An optional comment string.
    pub comment: Option<String>,
}

impl Card {
    /// Return the keyword as a trimmed UTF-8 string.
    pub fn keyword_str(&self) -> &str {
        let end = self
            .keyword
            .iter()
            .rposition(|&b| b != b' ')
            .map(|i| i + 1)
            .unwrap_or(0);
        core::str::from_utf8(&self.keyword[..end]).unwrap_or("")
    }
}

/// Pad a short keyword name to 8 bytes with trailing ASCII spaces.
pub(crate) const fn kw(name: &[u8]) -> [u8; 8] {
    let mut buf = [b' '; 8];
    let mut i = 0;
    while i < name.len() && i < 8 {
        buf[i] = name[i];
        i += 1;
    }
    buf
}

/// Encode a caller-supplied name as a FITS keyword.
///
/// Names longer than the 8-byte keyword field or containing characters
/// outside the FITS keyword set (uppercase letters, digits, `-`, `_`) cannot
/// be represented and are rejected.
pub fn encode_keyword(name: &str) -> Result<[u8; 8]> {
    let bytes = name.as_bytes();
    if bytes.is_empty() || bytes.len() > 8 {
        return Err(Error::InvalidKeyword(String::from(name)));
    }
    for &b in bytes {
        match b {
            b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_' => {}
            _ => return Err(Error::InvalidKeyword(String::from(name))),
        }
    }
    Ok(kw(bytes))
}

fn naxis_keyword(n: usize) -> [u8; 8] {
    let s = format!("NAXIS{n}");
    kw(s.as_bytes())
}

// ── Card formatting ──

/// Serialize a [`Card`] into an 80-byte FITS card image.
pub fn format_card(card: &Card) -> [u8; CARD_SIZE] {
    let mut buf = [b' '; CARD_SIZE];
    buf[..8].copy_from_slice(&card.keyword);

    if let Some(ref value) = card.value {
        buf[8] = b'=';
        buf[9] = b' ';

        let mut field = format_value(value);
        if let Some(ref comment) = card.comment {
            append_comment(&mut field, comment);
        }
        buf[10..80].copy_from_slice(&field);
    } else if let Some(ref comment) = card.comment {
        let bytes = comment.as_bytes();
        let len = bytes.len().min(72);
        buf[8..8 + len].copy_from_slice(&bytes[..len]);
    }

    buf
}

/// Append a ` / comment` separator and text after the value content of a
/// 70-byte field, truncating the comment to the remaining space.
fn append_comment(field: &mut [u8; 70], comment: &str) {
    let content_end = value_content_end(field);

    let sep_start = content_end + 1;
    if sep_start + 3 >= 70 {
        return;
    }
    field[sep_start] = b'/';
    field[sep_start + 1] = b' ';

    let comment_start = sep_start + 2;
    let bytes = comment.as_bytes();
    let len = bytes.len().min(70 - comment_start);
    field[comment_start..comment_start + len].copy_from_slice(&bytes[..len]);
}

/// Index one past the last byte of the value content in a formatted field.
///
/// For strings this scans to the closing quote (doubled quotes are literal);
/// for everything else the content ends at the last non-space byte, but never
/// before the fixed-format boundary at index 20.
fn value_content_end(field: &[u8; 70]) -> usize {
    if field[0] == b'\'' {
        let mut i = 1;
        while i < 70 {
            if field[i] == b'\'' {
                if i + 1 < 70 && field[i + 1] == b'\'' {
                    i += 2;
                } else {
                    return i + 1;
                }
            } else {
                i += 1;
            }
        }
        i
    } else {
        let last = field.iter().rposition(|&b| b != b' ').map_or(0, |i| i + 1);
        last.max(20)
    }
}

/// Create the standard FITS END card.
pub fn format_end_card() -> [u8; CARD_SIZE] {
    let mut buf = [b' '; CARD_SIZE];
    buf[..3].copy_from_slice(b"END");
    buf
}

/// Serialize a sequence of header cards into complete FITS header blocks.
///
/// Appends the END card and pads the final block with blank cards. The
/// returned length is always a multiple of [`BLOCK_SIZE`].
pub fn serialize_header(cards: &[Card]) -> Vec<u8> {
    let total_cards = cards.len() + 1; // +1 for END
    let total_blocks = total_cards.div_ceil(CARDS_PER_BLOCK);
    let mut buf = vec![HEADER_PAD_BYTE; total_blocks * BLOCK_SIZE];

    for (i, card) in cards.iter().enumerate() {
        let offset = i * CARD_SIZE;
        buf[offset..offset + CARD_SIZE].copy_from_slice(&format_card(card));
    }

    let end_offset = cards.len() * CARD_SIZE;
    buf[end_offset..end_offset + CARD_SIZE].copy_from_slice(&format_end_card());

    buf
}

// ── Primary header construction ──

/// Build the mandatory cards for a primary image HDU: SIMPLE, BITPIX, NAXIS,
/// one NAXISn per axis, and the BSCALE/BZERO pair when the pixel encoding
/// carries a zero point.
pub fn build_image_header(bitpix: i64, naxes: &[usize], bzero: Option<i64>) -> Vec<Card> {
    let mut cards = Vec::with_capacity(naxes.len() + 5);

    cards.push(Card {
        keyword: kw(b"SIMPLE"),
        value: Some(Value::Logical(true)),
        comment: Some(String::from("conforms to FITS standard")),
    });
    cards.push(Card {
        keyword: kw(b"BITPIX"),
        value: Some(Value::Integer(bitpix)),
        comment: Some(String::from("bits per data value")),
    });
    cards.push(Card {
        keyword: kw(b"NAXIS"),
        value: Some(Value::Integer(naxes.len() as i64)),
        comment: Some(String::from("number of axes")),
    });
    for (i, &dim) in naxes.iter().enumerate() {
        cards.push(Card {
            keyword: naxis_keyword(i + 1),
            value: Some(Value::Integer(dim as i64)),
            comment: None,
        });
    }
    if let Some(zero) = bzero {
        cards.push(Card {
            keyword: kw(b"BSCALE"),
            value: Some(Value::Integer(1)),
            comment: Some(String::from("physical = BZERO + BSCALE * stored")),
        });
        cards.push(Card {
            keyword: kw(b"BZERO"),
            value: Some(Value::Integer(zero)),
            comment: Some(String::from("zero point of the stored range")),
        });
    }

    cards
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_keyword_valid() {
        assert_eq!(&encode_keyword("EXPTIME").unwrap(), b"EXPTIME ");
        assert_eq!(&encode_keyword("DATE-OBS").unwrap(), b"DATE-OBS");
        assert_eq!(&encode_keyword("KEY_1").unwrap(), b"KEY_1   ");
    }

    #[test]
    fn encode_keyword_rejects_lowercase() {
        assert!(matches!(
            encode_keyword("exptime"),
            Err(Error::InvalidKeyword(_))
        ));
    }

    #[test]
    fn encode_keyword_rejects_too_long() {
        assert!(matches!(
            encode_keyword("EXPOSURETIME"),
            Err(Error::InvalidKeyword(_))
        ));
    }

    #[test]
    fn encode_keyword_rejects_empty_and_space() {
        assert!(encode_keyword("").is_err());
        assert!(encode_keyword("A B").is_err());
    }

    #[test]
    fn format_card_is_80_bytes_with_indicator() {
        let card = Card {
            keyword: kw(b"BITPIX"),
            value: Some(Value::Integer(16)),
            comment: None,
        };
        let buf = format_card(&card);
        assert_eq!(buf.len(), 80);
        assert_eq!(&buf[0..8], b"BITPIX  ");
        assert_eq!(&buf[8..10], b"= ");
    }

    #[test]
    fn format_card_with_comment() {
        let card = Card {
            keyword: kw(b"NAXIS"),
            value: Some(Value::Integer(2)),
            comment: Some(String::from("number of axes")),
        };
        let buf = format_card(&card);
        let s = core::str::from_utf8(&buf).unwrap();
        assert!(s.contains("/ number of axes"));
    }

    #[test]
    fn format_card_string_value_with_comment() {
        let card = Card {
            keyword: kw(b"DETECTOR"),
            value: Some(Value::String(String::from("CCD-47"))),
            comment: Some(String::from("camera head")),
        };
        let buf = format_card(&card);
        let s = core::str::from_utf8(&buf).unwrap();
        assert!(s.contains("'CCD-47  '"));
        assert!(s.contains("/ camera head"));
    }

    #[test]
    fn format_card_comment_only() {
        let card = Card {
            keyword: kw(b"COMMENT"),
            value: None,
            comment: Some(String::from("free-form text")),
        };
        let buf = format_card(&card);
        let s = core::str::from_utf8(&buf).unwrap();
        assert!(s.starts_with("COMMENT free-form text"));
    }

    #[test]
    fn end_card_format() {
        let buf = format_end_card();
        assert_eq!(&buf[0..3], b"END");
        for &b in &buf[3..] {
            assert_eq!(b, b' ');
        }
    }

    #[test]
    fn serialize_header_block_aligned_with_end() {
        let cards = build_image_header(8, &[4], None);
        let header = serialize_header(&cards);
        assert_eq!(header.len(), BLOCK_SIZE);
        let end_offset = cards.len() * CARD_SIZE;
        assert_eq!(&header[end_offset..end_offset + 3], b"END");
    }

    #[test]
    fn serialize_header_padding_is_spaces() {
        let header = serialize_header(&build_image_header(8, &[4], None));
        let used = (build_image_header(8, &[4], None).len() + 1) * CARD_SIZE;
        for &b in &header[used..] {
            assert_eq!(b, HEADER_PAD_BYTE);
        }
    }

    #[test]
    fn serialize_header_spills_to_two_blocks() {
        let cards: Vec<Card> = (0..36)
            .map(|i| Card {
                keyword: kw(format!("KEY{i:05}").as_bytes()),
                value: Some(Value::Integer(i as i64)),
                comment: None,
            })
            .collect();
        assert_eq!(serialize_header(&cards).len(), 2 * BLOCK_SIZE);
    }

    #[test]
    fn image_header_card_order() {
        let cards = build_image_header(16, &[100, 200], None);
        let keywords: Vec<&str> = cards.iter().map(|c| c.keyword_str()).collect();
        assert_eq!(keywords, ["SIMPLE", "BITPIX", "NAXIS", "NAXIS1", "NAXIS2"]);
        assert_eq!(cards[3].value, Some(Value::Integer(100)));
        assert_eq!(cards[4].value, Some(Value::Integer(200)));
    }

    #[test]
    fn image_header_with_zero_point() {
        let cards = build_image_header(16, &[8], Some(32768));
        let keywords: Vec<&str> = cards.iter().map(|c| c.keyword_str()).collect();
        assert_eq!(
            keywords,
            ["SIMPLE", "BITPIX", "NAXIS", "NAXIS1", "BSCALE", "BZERO"]
        );
        assert_eq!(cards[4].value, Some(Value::Integer(1)));
        assert_eq!(cards[5].value, Some(Value::Integer(32768)));
    }

    #[test]
    fn image_header_three_axes() {
        let cards = build_image_header(-32, &[2, 3, 4], None);
        assert_eq!(cards[2].value, Some(Value::Integer(3)));
        assert_eq!(cards[5].keyword_str(), "NAXIS3");
        assert_eq!(cards[5].value, Some(Value::Integer(4)));
    }
}

//! FITS header-card value formatting.

/// A FITS header value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// FITS logical value (`T` or `F`).
    Logical(bool),
    /// FITS integer value.
    Integer(i64),
    /// FITS floating-point value.
    Float(f64),
    /// FITS character string (content between single quotes).
    String(String),
}

/// Serialize a [`Value`] into a 70-byte field suitable for bytes 10..80 of an
/// 80-byte FITS card.
///
/// Numeric and logical values are right-justified in the first 20 bytes
/// (columns 11-30 of the card), extending to the right in free format when a
/// float's shortest round-trip representation does not fit. String values
/// start at byte 0 with a single quote.
pub fn format_value(value: &Value) -> [u8; 70] {
    let mut buf = [b' '; 70];

    match value {
        Value::Logical(b) => {
            // Fixed format: logical value in column 30 = index 19 of the field.
            buf[19] = if *b { b'T' } else { b'F' };
        }
        Value::Integer(n) => {
            let s = format!("{n}");
            right_justify(s.as_bytes(), &mut buf[..20]);
        }
        Value::Float(f) => {
            let s = format_float(*f);
            let width = s.len().clamp(20, 70);
            right_justify(s.as_bytes(), &mut buf[..width]);
        }
        Value::String(s) => {
            write_string(s, &mut buf);
        }
    }

    buf
}

/// Right-justify `src` within `dest`, padding the left with spaces.
fn right_justify(src: &[u8], dest: &mut [u8]) {
    let len = src.len().min(dest.len());
    let start = dest.len() - len;
    dest[start..start + len].copy_from_slice(&src[..len]);
}

/// Format a float as its shortest exact round-trip representation, in FITS
/// exponent notation.
fn format_float(f: f64) -> String {
    if f == 0.0 {
        return String::from("0.0");
    }
    format!("{f:E}")
}

fn write_string(s: &str, buf: &mut [u8; 70]) {
    let mut pos = 0;
    buf[pos] = b'\'';
    pos += 1;

    for ch in s.bytes() {
        if pos >= 69 {
            break; // Leave room for the closing quote.
        }
        if ch == b'\'' {
            if pos + 1 >= 69 {
                break;
            }
            buf[pos] = b'\'';
            buf[pos + 1] = b'\'';
            pos += 2;
        } else {
            buf[pos] = ch;
            pos += 1;
        }
    }

    // Pad to minimum 8 characters between quotes (closing quote at index >= 9).
    while pos < 9 {
        buf[pos] = b' ';
        pos += 1;
    }

    if pos < 70 {
        buf[pos] = b'\'';
    }
}

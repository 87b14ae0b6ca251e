//! Flat integer encoding of coordinates at the engine boundary.
//!
//! Coordinates travel interleaved, x then y: `[x0, y0, x1, y1, ...]`. A path
//! is sent either length-prefixed, `[n, x0, y0, ..., xn-1, yn-1]`, or in the
//! legacy sentinel form `[x0, y0, ..., -1]` whose reader scans for the `-1`.
//! Prefer the length prefix; the sentinel form exists for hosts that cannot
//! be changed.

use std::fmt;

use gridstar_core::Point;

/// End-of-data marker of the sentinel encoding.
pub const SENTINEL: i32 = -1;

/// How a path is laid out in a flat buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Encoding {
    /// Point count first, then the coordinates.
    #[default]
    LengthPrefixed,
    /// Coordinates, then [`SENTINEL`].
    Sentinel,
}

/// Errors decoding a flat coordinate buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    /// An interleaved buffer has an odd number of values.
    OddCoordinateCount(usize),
    /// A sentinel-encoded buffer ends without its terminator.
    MissingTerminator,
    /// A length-prefixed buffer has no length.
    MissingLength,
    /// A length-prefixed buffer declares a negative point count.
    NegativeLength(i32),
    /// A length-prefixed buffer holds fewer points than it declares.
    Truncated { declared: usize, available: usize },
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OddCoordinateCount(n) => write!(f, "odd coordinate count {n}"),
            Self::MissingTerminator => write!(f, "missing {SENTINEL} terminator"),
            Self::MissingLength => write!(f, "missing length prefix"),
            Self::NegativeLength(n) => write!(f, "negative length prefix {n}"),
            Self::Truncated {
                declared,
                available,
            } => write!(f, "declared {declared} points, found {available}"),
        }
    }
}

impl std::error::Error for WireError {}

/// Interleave points as `[x0, y0, x1, y1, ...]`.
pub fn flatten(points: &[Point]) -> Vec<i32> {
    let mut out = Vec::with_capacity(points.len() * 2);
    for p in points {
        out.push(p.x);
        out.push(p.y);
    }
    out
}

/// Inverse of [`flatten`].
pub fn unflatten(flat: &[i32]) -> Result<Vec<Point>, WireError> {
    if flat.len() % 2 != 0 {
        return Err(WireError::OddCoordinateCount(flat.len()));
    }
    Ok(flat
        .chunks_exact(2)
        .map(|c| Point::new(c[0], c[1]))
        .collect())
}

/// Encode `points` in the given layout. An empty path encodes as `[0]` or
/// `[-1]`.
pub fn encode(points: &[Point], encoding: Encoding) -> Vec<i32> {
    let mut out = Vec::with_capacity(points.len() * 2 + 1);
    match encoding {
        Encoding::LengthPrefixed => {
            out.push(points.len() as i32);
            out.extend(flatten(points));
        }
        Encoding::Sentinel => {
            out.extend(flatten(points));
            out.push(SENTINEL);
        }
    }
    out
}

/// Decode a buffer written by [`encode`].
pub fn decode(buf: &[i32], encoding: Encoding) -> Result<Vec<Point>, WireError> {
    match encoding {
        Encoding::LengthPrefixed => decode_length_prefixed(buf),
        Encoding::Sentinel => decode_sentinel(buf),
    }
}

/// Decode `[n, x0, y0, ...]`. Values after the `n` declared points are
/// ignored.
pub fn decode_length_prefixed(buf: &[i32]) -> Result<Vec<Point>, WireError> {
    let (&n, rest) = buf.split_first().ok_or(WireError::MissingLength)?;
    let declared = usize::try_from(n).map_err(|_| WireError::NegativeLength(n))?;
    let available = rest.len() / 2;
    if available < declared {
        return Err(WireError::Truncated {
            declared,
            available,
        });
    }
    unflatten(&rest[..declared * 2])
}

/// Decode `[x0, y0, ..., -1]`.
///
/// The terminator is a lone `-1` in x position, so a `(-1, -1)` pair also
/// ends the data. A `-1` in y position is malformed. Never reads past `buf`.
pub fn decode_sentinel(buf: &[i32]) -> Result<Vec<Point>, WireError> {
    let mut points = Vec::new();
    let mut i = 0;
    loop {
        let Some(&x) = buf.get(i) else {
            return Err(WireError::MissingTerminator);
        };
        if x == SENTINEL {
            return Ok(points);
        }
        match buf.get(i + 1) {
            None => return Err(WireError::MissingTerminator),
            Some(&SENTINEL) => return Err(WireError::OddCoordinateCount(i + 1)),
            Some(&y) => points.push(Point::new(x, y)),
        }
        i += 2;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts() -> Vec<Point> {
        vec![Point::new(0, 2), Point::new(1, 3), Point::new(2, 4)]
    }

    #[test]
    fn flatten_interleaves_x_then_y() {
        assert_eq!(flatten(&pts()), vec![0, 2, 1, 3, 2, 4]);
        assert_eq!(unflatten(&[5, 6, 7, 8]).unwrap(), vec![Point::new(5, 6), Point::new(7, 8)]);
        assert_eq!(unflatten(&[1, 2, 3]), Err(WireError::OddCoordinateCount(3)));
    }

    #[test]
    fn length_prefixed_layout() {
        let buf = encode(&pts(), Encoding::LengthPrefixed);
        assert_eq!(buf, vec![3, 0, 2, 1, 3, 2, 4]);
        assert_eq!(decode(&buf, Encoding::LengthPrefixed).unwrap(), pts());
        assert_eq!(encode(&[], Encoding::LengthPrefixed), vec![0]);
    }

    #[test]
    fn length_prefixed_errors() {
        assert_eq!(decode_length_prefixed(&[]), Err(WireError::MissingLength));
        assert_eq!(decode_length_prefixed(&[-2, 1, 1]), Err(WireError::NegativeLength(-2)));
        assert_eq!(
            decode_length_prefixed(&[3, 0, 0, 1, 1, 2]),
            Err(WireError::Truncated {
                declared: 3,
                available: 2
            })
        );
        // trailing data is not part of the path
        assert_eq!(
            decode_length_prefixed(&[1, 4, 5, 99, 99]).unwrap(),
            vec![Point::new(4, 5)]
        );
    }

    #[test]
    fn sentinel_layout() {
        let buf = encode(&pts(), Encoding::Sentinel);
        assert_eq!(buf, vec![0, 2, 1, 3, 2, 4, -1]);
        assert_eq!(decode(&buf, Encoding::Sentinel).unwrap(), pts());
        assert!(decode_sentinel(&[-1]).unwrap().is_empty());
    }

    #[test]
    fn sentinel_accepts_pair_terminator() {
        assert_eq!(
            decode_sentinel(&[3, 4, -1, -1, 7, 7]).unwrap(),
            vec![Point::new(3, 4)]
        );
    }

    #[test]
    fn sentinel_never_reads_past_buffer() {
        assert_eq!(decode_sentinel(&[1, 2, 3, 4]), Err(WireError::MissingTerminator));
        assert_eq!(decode_sentinel(&[1, 2, 3]), Err(WireError::MissingTerminator));
        assert_eq!(decode_sentinel(&[]), Err(WireError::MissingTerminator));
        assert_eq!(decode_sentinel(&[1, -1]), Err(WireError::OddCoordinateCount(1)));
    }
}

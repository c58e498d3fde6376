//! Slice request parameters.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, GridResult};

/// A request for the 2-D (y, x) slice at one (time, z) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliceRequest {
    /// Index along the `time` dimension.
    pub time_index: usize,
    /// Index along the `z` dimension.
    pub z_index: usize,
}

impl SliceRequest {
    pub fn new(time_index: usize, z_index: usize) -> Self {
        Self {
            time_index,
            z_index,
        }
    }

    /// Parse the raw `t` and `z` query values.
    ///
    /// `t` is checked before `z`; the first missing or malformed value is
    /// reported as `InvalidParameter`.
    pub fn parse(t: Option<&str>, z: Option<&str>) -> GridResult<Self> {
        let time_index = parse_index("t", t)?;
        let z_index = parse_index("z", z)?;
        Ok(Self::new(time_index, z_index))
    }
}

/// Parse one raw index value named `param`.
pub fn parse_index(param: &str, raw: Option<&str>) -> GridResult<usize> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<usize>().ok())
        .ok_or_else(|| GridError::invalid_parameter(param))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let req = SliceRequest::parse(Some("1"), Some("0")).unwrap();
        assert_eq!(req, SliceRequest::new(1, 0));
    }

    #[test]
    fn test_parse_missing_t_reported_first() {
        let err = SliceRequest::parse(None, None).unwrap_err();
        assert!(matches!(err, GridError::InvalidParameter(ref p) if p == "t"));
    }

    #[test]
    fn test_parse_missing_z() {
        let err = SliceRequest::parse(Some("0"), None).unwrap_err();
        assert!(matches!(err, GridError::InvalidParameter(ref p) if p == "z"));
    }

    #[test]
    fn test_parse_rejects_negative_and_garbage() {
        for bad in ["-1", "abc", "1.5", "", "   "] {
            let err = SliceRequest::parse(Some(bad), Some("0")).unwrap_err();
            assert!(
                matches!(err, GridError::InvalidParameter(ref p) if p == "t"),
                "'{}' should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let req = SliceRequest::parse(Some(" 2 "), Some("3")).unwrap();
        assert_eq!(req, SliceRequest::new(2, 3));
    }
}

//! Raw device state code to semantic motion state.

use strum::Display;

/// Semantic motion state of a cover.
///
/// The firmware reports a numeric code; several of them ("manually
/// stopped", "upper limit", overload, motor failure, safety stop) all
/// display as open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum CoverMotion {
    Opening,
    Closing,
    Open,
    Closed,
    Unknown,
}

impl CoverMotion {
    /// Map a raw device state code to its semantic state.
    ///
    /// Total over the whole domain: any unrecognized or absent code is
    /// [`Unknown`](CoverMotion::Unknown), never a panic.
    pub fn from_code(code: Option<i32>) -> Self {
        match code {
            Some(0) => Self::Closing,
            Some(1) => Self::Opening,
            // 2 manually stopped, 4 upper limit, 5 overload,
            // 6 motor failure, 8 safety stop (7 unused)
            Some(2 | 4 | 5 | 6 | 8) => Self::Open,
            Some(3) => Self::Closed,
            _ => Self::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CoverMotion;

    #[test]
    fn documented_codes_map_to_semantic_states() {
        assert_eq!(CoverMotion::from_code(Some(0)), CoverMotion::Closing);
        assert_eq!(CoverMotion::from_code(Some(1)), CoverMotion::Opening);
        assert_eq!(CoverMotion::from_code(Some(3)), CoverMotion::Closed);
        for code in [2, 4, 5, 6, 8] {
            assert_eq!(CoverMotion::from_code(Some(code)), CoverMotion::Open);
        }
    }

    #[test]
    fn unrecognized_codes_are_unknown() {
        for code in [-1, 7, 9, 42, i32::MAX, i32::MIN] {
            assert_eq!(CoverMotion::from_code(Some(code)), CoverMotion::Unknown);
        }
        assert_eq!(CoverMotion::from_code(None), CoverMotion::Unknown);
    }

    #[test]
    fn displays_lowercase() {
        assert_eq!(CoverMotion::Opening.to_string(), "opening");
        assert_eq!(CoverMotion::Unknown.to_string(), "unknown");
    }
}

use std::fmt;
use std::str::FromStr;

use crate::error::CodecError;

/// What the decoder does when the bitstream stops mid-codeword.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SumCheck {
    /// Drop the dangling bits silently.
    Ignore,
    /// Drop the dangling bits and report a warning.
    Warn,
    /// Fail with `TruncatedBitstream`.
    #[default]
    Raise,
}

impl SumCheck {
    pub fn as_str(&self) -> &'static str {
        match self {
            SumCheck::Ignore => "ignore",
            SumCheck::Warn => "warn",
            SumCheck::Raise => "raise",
        }
    }
}

impl FromStr for SumCheck {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ignore" => Ok(SumCheck::Ignore),
            "warn" => Ok(SumCheck::Warn),
            "raise" => Ok(SumCheck::Raise),
            other => Err(CodecError::UnsupportedPolicy(other.to_string())),
        }
    }
}

impl fmt::Display for SumCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_policies() {
        for policy in [SumCheck::Ignore, SumCheck::Warn, SumCheck::Raise] {
            assert_eq!(policy.as_str().parse::<SumCheck>().unwrap(), policy);
        }
        assert_eq!(SumCheck::default(), SumCheck::Raise);
    }

    #[test]
    fn rejects_unknown_policy() {
        assert_eq!(
            "strict".parse::<SumCheck>(),
            Err(CodecError::UnsupportedPolicy("strict".to_string()))
        );
        // matching is exact
        assert!("Raise".parse::<SumCheck>().is_err());
    }
}

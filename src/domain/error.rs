//! Domain error types.

use super::token::Direction;

/// Top-level error type for lendsim.
#[derive(Debug, thiserror::Error)]
pub enum LendsimError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("unknown token {symbol} (supported: DAI, USDC, ETH)")]
    UnknownToken { symbol: String },

    #[error("invalid amount for {symbol}: {amount} (must be a positive number)")]
    InvalidAmount { symbol: String, amount: f64 },

    #[error("{direction} rate unavailable for {symbol}: {reason}")]
    RateUnavailable {
        symbol: String,
        direction: Direction,
        reason: String,
    },

    #[error("csv error: {reason}")]
    Csv { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<csv::Error> for LendsimError {
    fn from(err: csv::Error) -> Self {
        LendsimError::Csv {
            reason: err.to_string(),
        }
    }
}

impl From<&LendsimError> for std::process::ExitCode {
    fn from(err: &LendsimError) -> Self {
        let code: u8 = match err {
            LendsimError::Io(_) => 1,
            LendsimError::ConfigParse { .. }
            | LendsimError::ConfigInvalid { .. } => 2,
            LendsimError::UnknownToken { .. }
            | LendsimError::InvalidAmount { .. }
            | LendsimError::RateUnavailable { .. } => 3,
            LendsimError::Csv { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::ExitCode;

    // ExitCode has no PartialEq; compare the debug form.
    fn assert_exit(code: ExitCode, expected: u8) {
        assert_eq!(format!("{code:?}"), format!("{:?}", ExitCode::from(expected)));
    }

    #[test]
    fn unknown_token_message() {
        let err = LendsimError::UnknownToken {
            symbol: "WBTC".into(),
        };
        assert_eq!(
            err.to_string(),
            "unknown token WBTC (supported: DAI, USDC, ETH)"
        );
    }

    #[test]
    fn rate_unavailable_mentions_direction() {
        let err = LendsimError::RateUnavailable {
            symbol: "DAI".into(),
            direction: Direction::Borrow,
            reason: "value is \"--\"".into(),
        };
        assert!(err.to_string().starts_with("borrow rate unavailable for DAI"));
    }

    #[test]
    fn exit_codes_by_class() {
        let io = LendsimError::Io(std::io::Error::other("boom"));
        assert_exit(ExitCode::from(&io), 1);

        let cfg = LendsimError::ConfigInvalid {
            section: "prices".into(),
            key: "eth".into(),
            reason: "price must be a non-negative number".into(),
        };
        assert_exit(ExitCode::from(&cfg), 2);

        let amount = LendsimError::InvalidAmount {
            symbol: "ETH".into(),
            amount: -1.0,
        };
        assert_exit(ExitCode::from(&amount), 3);

        let csv = LendsimError::Csv {
            reason: "bad header".into(),
        };
        assert_exit(ExitCode::from(&csv), 4);
    }
}

//! Exit code constants for the udiff CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, unreadable input, invalid options)
//! - 2: Parse failure (the parser lost its file context)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, unreadable or undecodable input, invalid options.
pub const USER_ERROR: i32 = 1;

/// Parse failure: the input drove the parser into an inconsistent state.
pub const PARSE_FAILURE: i32 = 2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [SUCCESS, USER_ERROR, PARSE_FAILURE];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn success_is_zero() {
        assert_eq!(SUCCESS, 0);
    }
}

//! Load-time knobs and the grammar-mismatch policy.

use crate::error::{AssetError, GrammarError, Result};

/// What to do when a file does not fully match its grammar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ParsePolicy {
    /// Abort the load with [`AssetError::Grammar`].
    #[default]
    FailFast,
    /// Log a warning and keep what was parsed before the first bad line.
    BestEffort,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadOptions {
    pub policy: ParsePolicy,
    /// Flip decoded textures so row 0 is the bottom row.
    pub flip_textures: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            policy: ParsePolicy::FailFast,
            flip_textures: true,
        }
    }
}

/// Parser output together with the first grammar mismatch, if any.
///
/// On a mismatch `value` holds everything matched before the bad line.
#[derive(Clone, Debug, PartialEq)]
pub struct Parsed<T> {
    pub value: T,
    pub mismatch: Option<GrammarError>,
}

impl<T> Parsed<T> {
    /// `true` when the whole input was consumed.
    pub fn is_complete(&self) -> bool {
        self.mismatch.is_none()
    }

    /// Apply `policy`; `what` names the input in the warning.
    pub fn into_result(self, policy: ParsePolicy, what: &str) -> Result<T> {
        match (self.mismatch, policy) {
            (None, _) => Ok(self.value),
            (Some(err), ParsePolicy::FailFast) => Err(AssetError::Grammar(err)),
            (Some(err), ParsePolicy::BestEffort) => {
                log::warn!("{what}: keeping partial result, parsing stopped at {err}");
                Ok(self.value)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bad() -> GrammarError {
        GrammarError {
            line: 3,
            column: 1,
            text: "v".into(),
            reason: "expected vertex".into(),
        }
    }

    #[test]
    fn fail_fast_surfaces_grammar_error() {
        let parsed = Parsed {
            value: 1,
            mismatch: Some(bad()),
        };
        assert!(!parsed.is_complete());
        let err = parsed.into_result(ParsePolicy::FailFast, "x.obj").unwrap_err();
        assert!(matches!(err, AssetError::Grammar(GrammarError { line: 3, .. })));
    }

    #[test]
    fn best_effort_keeps_partial_value() {
        let parsed = Parsed {
            value: 7,
            mismatch: Some(bad()),
        };
        assert_eq!(parsed.into_result(ParsePolicy::BestEffort, "x.obj").unwrap(), 7);
    }

    #[test]
    fn default_options() {
        let opts = LoadOptions::default();
        assert_eq!(opts.policy, ParsePolicy::FailFast);
        assert!(opts.flip_textures);
    }
}

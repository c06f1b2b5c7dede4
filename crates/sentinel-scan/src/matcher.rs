use sentinel_config::{log_scan_debug, log_scan_info, DEFAULT_TARGET_ID};

/// Integer key naming a minted token.
pub type TokenId = i64;

/// Decides whether derivatives of a token were found.
///
/// Implementations must be total: every id yields an answer.
pub trait Matcher {
    /// Short label used in logs.
    fn name(&self) -> &str {
        "custom"
    }

    fn is_match(&self, token_id: TokenId) -> bool;
}

impl<F> Matcher for F
where
    F: Fn(TokenId) -> bool,
{
    fn is_match(&self, token_id: TokenId) -> bool {
        self(token_id)
    }
}

/// Stub matcher: reports a match for exactly one target id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentinelMatcher {
    target: TokenId,
}

impl SentinelMatcher {
    pub fn new(target: TokenId) -> Self {
        Self { target }
    }

    pub fn target(&self) -> TokenId {
        self.target
    }
}

impl Default for SentinelMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_ID)
    }
}

impl Matcher for SentinelMatcher {
    fn name(&self) -> &str {
        "sentinel"
    }

    fn is_match(&self, token_id: TokenId) -> bool {
        token_id == self.target
    }
}

/// Evaluate `matcher` for `token_id`, logging progress and any match.
pub fn scan(matcher: &dyn Matcher, token_id: TokenId) -> bool {
    log_scan_info!("Scanning for derivatives", token_id = token_id);
    log_scan_debug!("Using matcher", matcher = matcher.name());

    let found = matcher.is_match(token_id);
    if found {
        log_scan_info!("Match found!", token_id = token_id);
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_target_matches() {
        let matcher = SentinelMatcher::default();
        assert_eq!(matcher.target(), 2);
        assert!(scan(&matcher, 2));
    }

    #[test]
    fn test_other_ids_do_not_match() {
        let matcher = SentinelMatcher::default();
        for id in [
            TokenId::MIN,
            -2,
            -1,
            0,
            1,
            3,
            7,
            1_000_000,
            TokenId::MAX,
        ] {
            assert!(!scan(&matcher, id), "id {} should not match", id);
        }
    }

    #[test]
    fn test_custom_target() {
        let matcher = SentinelMatcher::new(7);
        assert!(matcher.is_match(7));
        assert!(!matcher.is_match(2));
    }

    #[test]
    fn test_closure_matcher() {
        let negative = |id: TokenId| id < 0;
        assert_eq!(Matcher::name(&negative), "custom");
        assert!(scan(&negative, -5));
        assert!(!scan(&negative, 5));
    }

    #[test]
    fn test_boxed_matcher() {
        let matchers: Vec<Box<dyn Matcher>> = vec![
            Box::new(SentinelMatcher::default()),
            Box::new(|id: TokenId| id > 100),
        ];
        let hits: Vec<bool> = matchers.iter().map(|m| m.is_match(2)).collect();
        assert_eq!(hits, vec![true, false]);
    }
}

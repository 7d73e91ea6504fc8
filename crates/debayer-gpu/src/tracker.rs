use crate::{ConvertError, StreamToken};

/// Sequence bookkeeping shared by the backends: hands out launch numbers
/// and checks that a waited token belongs to the latest launch.
#[derive(Debug, Default)]
pub(crate) struct LaunchTracker {
    latest: Option<u64>,
    unresolved: bool,
}

impl LaunchTracker {
    /// Number the next launch and mark it unresolved.
    pub(crate) fn launch(&mut self) -> u64 {
        let sequence = self.latest.map_or(0, |latest| latest + 1);
        self.latest = Some(sequence);
        self.unresolved = true;
        sequence
    }

    pub(crate) fn has_unresolved(&self) -> bool {
        self.unresolved
    }

    pub(crate) fn check(&self, token: &StreamToken) -> Result<(), ConvertError> {
        match self.latest {
            Some(latest) if latest == token.sequence() => Ok(()),
            expected => Err(ConvertError::StaleToken {
                expected,
                got: token.sequence(),
            }),
        }
    }

    pub(crate) fn resolve(&mut self) {
        self.unresolved = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequences_increase() {
        let mut tracker = LaunchTracker::default();
        assert!(!tracker.has_unresolved());
        assert_eq!(tracker.launch(), 0);
        assert!(tracker.has_unresolved());
        tracker.resolve();
        assert!(!tracker.has_unresolved());
        assert_eq!(tracker.launch(), 1);
        // not resolved
        assert_eq!(tracker.launch(), 2);
        assert!(tracker.has_unresolved());
    }

    #[test]
    fn test_check_latest_only() {
        let mut tracker = LaunchTracker::default();
        assert!(matches!(
            tracker.check(&StreamToken::completed(0)),
            Err(ConvertError::StaleToken { expected: None, got: 0 })
        ));

        tracker.launch();
        tracker.launch();
        assert!(tracker.check(&StreamToken::pending(1)).is_ok());
        assert!(matches!(
            tracker.check(&StreamToken::pending(0)),
            Err(ConvertError::StaleToken {
                expected: Some(1),
                got: 0
            })
        ));
    }
}

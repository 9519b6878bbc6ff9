use std::time::Duration;

use manoga_models::contact::ContactSubmission;
use manoga_shared_contracts::{
    spam::{SpamService, SpamSignal, SpamVerdict},
    time::TimeService,
};

#[derive(Debug, Clone)]
pub struct SpamServiceImpl<Time> {
    time: Time,
    config: SpamServiceConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpamServiceConfig {
    /// Submissions which arrive earlier than this after the form has been
    /// rendered are considered automated.
    pub min_fill_time: Duration,
}

impl Default for SpamServiceConfig {
    fn default() -> Self {
        Self {
            min_fill_time: Duration::from_secs(3),
        }
    }
}

impl<Time> SpamServiceImpl<Time> {
    pub fn new(time: Time, config: SpamServiceConfig) -> Self {
        Self { time, config }
    }
}

impl<Time> SpamService for SpamServiceImpl<Time>
where
    Time: TimeService,
{
    fn evaluate(&self, submission: &ContactSubmission) -> SpamVerdict {
        if submission.honeypot_filled() {
            return SpamVerdict::Suspicious(SpamSignal::Honeypot);
        }

        let Some(rendered_at) = submission.rendered_at.filter(|&x| x != 0) else {
            return SpamVerdict::Suspicious(SpamSignal::MissingTimestamp);
        };

        // i128 so that arbitrary client supplied timestamps cannot overflow
        let elapsed = i128::from(self.time.now().timestamp_millis()) - i128::from(rendered_at);
        let min_fill_time =
            i128::try_from(self.config.min_fill_time.as_millis()).unwrap_or(i128::MAX);
        if elapsed < min_fill_time {
            return SpamVerdict::Suspicious(SpamSignal::TooFast);
        }

        SpamVerdict::Legitimate
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};
    use manoga_shared_contracts::time::MockTimeService;
    use manoga_utils::assert_matches;

    use super::*;

    const NOW: i64 = 1_700_000_000_000;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp_millis(NOW).unwrap()
    }

    fn submission(rendered_at: Option<i64>) -> ContactSubmission {
        ContactSubmission {
            name: Some("Max Mustermann".into()),
            email: Some("max.mustermann@example.de".into()),
            message: Some("Hello World!".into()),
            rendered_at,
            ..Default::default()
        }
    }

    fn sut(time: MockTimeService) -> SpamServiceImpl<MockTimeService> {
        SpamServiceImpl::new(time, SpamServiceConfig::default())
    }

    #[test]
    fn legitimate() {
        // Arrange
        let sut = sut(MockTimeService::new().with_now(now()));

        // Act
        let result = sut.evaluate(&submission(Some(NOW - 60_000)));

        // Assert
        assert_matches!(result, SpamVerdict::Legitimate);
    }

    #[test]
    fn legitimate_exactly_at_threshold() {
        let sut = sut(MockTimeService::new().with_now(now()));
        let result = sut.evaluate(&submission(Some(NOW - 3000)));
        assert_matches!(result, SpamVerdict::Legitimate);
    }

    #[test]
    fn legitimate_empty_honeypot() {
        let sut = sut(MockTimeService::new().with_now(now()));
        let result = sut.evaluate(&ContactSubmission {
            website: Some(String::new()),
            ..submission(Some(NOW - 10_000))
        });
        assert_matches!(result, SpamVerdict::Legitimate);
    }

    #[test]
    fn honeypot() {
        // Arrange
        let sut = sut(MockTimeService::new());

        // Act
        let result = sut.evaluate(&ContactSubmission {
            website: Some("https://spam.example".into()),
            ..submission(Some(NOW - 60_000))
        });

        // Assert
        assert_matches!(result, SpamVerdict::Suspicious(SpamSignal::Honeypot));
    }

    #[test]
    fn missing_timestamp() {
        for rendered_at in [None, Some(0)] {
            let sut = sut(MockTimeService::new());
            let result = sut.evaluate(&submission(rendered_at));
            assert_matches!(
                result,
                SpamVerdict::Suspicious(SpamSignal::MissingTimestamp)
            );
        }
    }

    #[test]
    fn too_fast() {
        for rendered_at in [NOW, NOW - 2999, NOW + 60_000, i64::MAX] {
            // Arrange
            let sut = sut(MockTimeService::new().with_now(now()));

            // Act
            let result = sut.evaluate(&submission(Some(rendered_at)));

            // Assert
            assert_matches!(result, SpamVerdict::Suspicious(SpamSignal::TooFast));
        }
    }

    #[test]
    fn ancient_timestamp_does_not_overflow() {
        let sut = sut(MockTimeService::new().with_now(now()));
        let result = sut.evaluate(&submission(Some(i64::MIN)));
        assert_matches!(result, SpamVerdict::Legitimate);
    }

    #[test]
    fn custom_min_fill_time() {
        let sut = SpamServiceImpl::new(
            MockTimeService::new().with_now(now()),
            SpamServiceConfig {
                min_fill_time: Duration::from_secs(10),
            },
        );
        let result = sut.evaluate(&submission(Some(NOW - 5000)));
        assert_matches!(result, SpamVerdict::Suspicious(SpamSignal::TooFast));
    }
}

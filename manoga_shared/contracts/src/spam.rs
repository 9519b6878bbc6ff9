use manoga_models::contact::ContactSubmission;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait SpamService: Send + Sync + 'static {
    /// Decide whether a submission was most likely sent by a bot.
    fn evaluate(&self, submission: &ContactSubmission) -> SpamVerdict;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpamVerdict {
    Legitimate,
    Suspicious(SpamSignal),
}

/// The heuristic which flagged a submission as suspicious.
///
/// Only meant for logging, must never be reported back to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpamSignal {
    /// The hidden honeypot field has been filled in.
    Honeypot,
    /// The render timestamp is missing, zero or not a number.
    MissingTimestamp,
    /// The form was submitted faster than a human could fill it in.
    TooFast,
}

#[cfg(feature = "mock")]
impl MockSpamService {
    pub fn with_evaluate(mut self, submission: ContactSubmission, result: SpamVerdict) -> Self {
        self.expect_evaluate()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_const(result);
        self
    }
}

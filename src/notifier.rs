use std::time::Duration;

use tokio::time::Instant;

/// How long a feedback message stays visible.
pub const FEEDBACK_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub tone: Tone,
    pub text: String,
}

/// The single transient message slot of one form region.
#[derive(Debug, Clone)]
pub struct Notifier {
    shown: Option<(Feedback, Instant)>,
    ttl: Duration,
}

impl Default for Notifier {
    fn default() -> Self {
        Notifier::new(FEEDBACK_TTL)
    }
}

impl Notifier {
    pub fn new(ttl: Duration) -> Self {
        Notifier { shown: None, ttl }
    }

    /// Replaces whatever was showing.
    pub fn show(&mut self, tone: Tone, text: impl ToString) {
        let feedback = Feedback {
            tone,
            text: text.to_string(),
        };
        self.shown = Some((feedback, Instant::now()));
    }

    pub fn success(&mut self, text: impl ToString) {
        self.show(Tone::Success, text)
    }

    pub fn error(&mut self, text: impl ToString) {
        self.show(Tone::Error, text)
    }

    pub fn clear(&mut self) {
        self.shown = None;
    }

    pub fn current(&self) -> Option<&Feedback> {
        match &self.shown {
            Some((feedback, at)) if at.elapsed() < self.ttl => Some(feedback),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn replaces_then_expires() {
        let mut notifier = Notifier::default();
        assert_eq!(notifier.current(), None);

        notifier.error("first");
        tokio::time::sleep(Duration::from_secs(3)).await;
        notifier.success("second");
        assert_eq!(
            notifier.current(),
            Some(&Feedback {
                tone: Tone::Success,
                text: "second".to_owned()
            })
        );

        // the replacement gets its own full lifetime
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(notifier.current().map(|f| f.text.as_str()), Some("second"));

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(notifier.current(), None);
    }

    #[tokio::test]
    async fn clear_hides() {
        let mut notifier = Notifier::default();
        notifier.success("done");
        notifier.clear();
        assert_eq!(notifier.current(), None);
    }
}

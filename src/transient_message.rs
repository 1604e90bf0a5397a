use super::*;

/// A status line message that reverts to the previous one once it expires.
#[derive(Clone)]
pub(crate) struct TransientMessage {
  expires_at: Instant,
  previous: String,
  text: String,
}

impl TransientMessage {
  const TTL: Duration = Duration::from_secs(3);

  pub(crate) fn is_expired(&self) -> bool {
    self.is_expired_at(Instant::now())
  }

  fn is_expired_at(&self, now: Instant) -> bool {
    now >= self.expires_at
  }

  pub(crate) fn new(text: String, previous: String) -> Self {
    Self {
      expires_at: Instant::now() + Self::TTL,
      previous,
      text,
    }
  }

  pub(crate) fn previous(&self) -> &str {
    &self.previous
  }

  pub(crate) fn text(&self) -> &str {
    &self.text
  }
}

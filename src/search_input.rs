#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum InputKind {
  Filter,
  Search,
}

pub(crate) struct SearchInput {
  pub(crate) buffer: String,
  pub(crate) kind: InputKind,
  pub(crate) message_backup: String,
  pub(crate) original: String,
}

impl SearchInput {
  pub(crate) fn new(
    kind: InputKind,
    original: String,
    message_backup: String,
  ) -> Self {
    Self {
      buffer: original.clone(),
      kind,
      message_backup,
      original,
    }
  }

  pub(crate) fn prompt(&self) -> String {
    let label = match self.kind {
      InputKind::Filter => "Filter",
      InputKind::Search => "Search",
    };

    format!("{label}: {}_", self.buffer)
  }
}

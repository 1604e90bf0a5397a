use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Command {
  CancelInput,
  DismissStory,
  HideHelp,
  None,
  OpenCurrentInBrowser,
  PageDown,
  PageUp,
  Quit,
  Refresh,
  SelectFirst,
  SelectLast,
  SelectNext,
  SelectPrevious,
  ShowHelp,
  StartFilter,
  StartSearch,
  SubmitInput,
}

impl Command {
  pub(crate) fn for_list_key(key: KeyEvent) -> Self {
    let control = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
      KeyCode::Char('d') if control => Self::PageDown,
      KeyCode::Char('u') if control => Self::PageUp,
      KeyCode::Char('q' | 'Q') | KeyCode::Esc => Self::Quit,
      KeyCode::Char('?') => Self::ShowHelp,
      KeyCode::Down | KeyCode::Char('j') => Self::SelectNext,
      KeyCode::Up | KeyCode::Char('k') => Self::SelectPrevious,
      KeyCode::PageDown => Self::PageDown,
      KeyCode::PageUp => Self::PageUp,
      KeyCode::Home => Self::SelectFirst,
      KeyCode::End => Self::SelectLast,
      KeyCode::Char('/') => Self::StartSearch,
      KeyCode::Char('f') => Self::StartFilter,
      KeyCode::Char('x' | 'd') | KeyCode::Delete => Self::DismissStory,
      KeyCode::Enter | KeyCode::Char('o' | 'O') => Self::OpenCurrentInBrowser,
      KeyCode::Char('r') => Self::Refresh,
      _ => Self::None,
    }
  }
}

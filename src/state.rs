use super::*;

pub(crate) struct State {
  filter: String,
  help: HelpView,
  input: Option<SearchInput>,
  list_height: usize,
  message: String,
  next_request_id: u64,
  pending_effects: Vec<Effect>,
  pending_search: Option<PendingSearch>,
  search_term: String,
  storage: Storage,
  stories: Stories,
  transient_message: Option<TransientMessage>,
  view: ListView<Story>,
}

impl State {
  fn cancel_input(&mut self) {
    let Some(input) = self.input.take() else {
      return;
    };

    if input.kind == InputKind::Filter && self.filter != input.original {
      self.filter = input.original;
      self.reset_view();
    }

    self.message = input.message_backup;
  }

  pub(crate) fn clear_pending_effects(&mut self) {
    self.pending_effects.clear();
  }

  fn current_story(&self) -> Option<&Story> {
    self.view.selected_item()
  }

  fn dismiss_story(&mut self) {
    let Some(story) = self.current_story() else {
      return;
    };

    let (object_id, title) =
      (story.object_id.clone(), story.display_title().to_string());

    tracing::debug!(object_id, "dismissing story");

    self.stories.reduce(Action::Remove(object_id));

    self.refresh_view();

    self.set_transient_message(format!("Dismissed \"{}\"", truncate(&title, 40)));
  }

  pub(crate) fn dispatch_command(
    &mut self,
    command: Command,
  ) -> Result<CommandDispatch> {
    debug_assert!(
      self.pending_effects.is_empty(),
      "command dispatch should start without pending effects"
    );

    let mut should_exit = false;

    match command {
      Command::Quit => {
        should_exit = true;
      }
      Command::ShowHelp => self.help.show(&mut self.message),
      Command::HideHelp => self.help.hide(&mut self.message),
      Command::StartSearch => self.start_input(InputKind::Search),
      Command::StartFilter => self.start_input(InputKind::Filter),
      Command::CancelInput => self.cancel_input(),
      Command::SubmitInput => self.submit_input()?,
      Command::Refresh => self.refresh(),
      Command::SelectNext => self.select_next(),
      Command::SelectPrevious => self.select_previous(),
      Command::PageDown => self.page_down(),
      Command::PageUp => self.page_up(),
      Command::SelectFirst => self.view.set_selected(0),
      Command::SelectLast => self.select_last(),
      Command::DismissStory => self.dismiss_story(),
      Command::OpenCurrentInBrowser => self.open_current_in_browser(),
      Command::None => {}
    }

    Ok(CommandDispatch {
      effects: std::mem::take(&mut self.pending_effects),
      should_exit,
    })
  }

  pub(crate) fn filter(&self) -> &str {
    &self.filter
  }

  pub(crate) fn handle_event(&mut self, event: Event) {
    match event {
      Event::Stories { request_id, result } => {
        let Some(pending) = self.pending_search.as_ref() else {
          tracing::debug!(request_id, "discarding unexpected response");
          return;
        };

        if pending.request_id != request_id {
          tracing::debug!(
            request_id,
            pending = pending.request_id,
            "discarding stale response"
          );
          return;
        }

        let Some(pending) = self.pending_search.take() else {
          return;
        };

        match result {
          Ok(stories) => {
            self.stories.reduce(Action::FetchSuccess(stories));

            self.reset_view();

            if !self.help.is_visible() && self.input.is_none() {
              let count = self.stories.len();

              let truncated = truncate(&pending.query, 40);

              self.message = match count {
                0 => format!("No stories found for \"{truncated}\""),
                1 => format!("Found 1 story for \"{truncated}\""),
                _ => format!("Found {count} stories for \"{truncated}\""),
              };
            }
          }
          Err(error) => {
            tracing::warn!(query = pending.query, "search failed: {error:#}");

            self.stories.reduce(Action::FetchFailure);

            if !self.help.is_visible() && self.input.is_none() {
              self.set_transient_message(format!("Could not search: {error}"));
            }
          }
        }
      }
    }
  }

  fn handle_input_key(&mut self, key: KeyEvent) -> Command {
    let Some(input) = self.input.as_mut() else {
      return Command::None;
    };

    match key.code {
      KeyCode::Esc => return Command::CancelInput,
      KeyCode::Enter => return Command::SubmitInput,
      KeyCode::Backspace => {
        input.buffer.pop();
      }
      KeyCode::Char(ch) => {
        let modifiers = key.modifiers;

        if modifiers.contains(KeyModifiers::CONTROL)
          || modifiers.contains(KeyModifiers::ALT)
          || modifiers.contains(KeyModifiers::SUPER)
        {
          return Command::None;
        }

        input.buffer.push(ch);
      }
      _ => return Command::None,
    }

    self.input_changed();

    Command::None
  }

  pub(crate) fn help(&self) -> &HelpView {
    &self.help
  }

  pub(crate) fn help_is_visible(&self) -> bool {
    self.help.is_visible()
  }

  fn input_changed(&mut self) {
    if let Some(input) = &self.input
      && input.kind == InputKind::Filter
      && self.filter != input.buffer
    {
      self.filter = input.buffer.clone();
      self.reset_view();
    }

    self.update_input_message();
  }

  pub(crate) fn input_command(&mut self, key: KeyEvent) -> Option<Command> {
    if self.input.is_some() {
      Some(self.handle_input_key(key))
    } else {
      None
    }
  }

  pub(crate) fn message(&self) -> &str {
    &self.message
  }

  pub(crate) fn new(storage: Storage, search_term: String) -> Self {
    Self {
      filter: String::new(),
      help: HelpView::new(),
      input: None,
      list_height: 0,
      message: LIST_STATUS.into(),
      next_request_id: 0,
      pending_effects: Vec::new(),
      pending_search: None,
      search_term,
      storage,
      stories: Stories::default(),
      transient_message: None,
      view: ListView::default(),
    }
  }

  fn open_current_in_browser(&mut self) {
    if let Some(story) = self.current_story() {
      self.pending_effects.push(Effect::OpenUrl {
        url: story.resolved_url(),
      });
    }
  }

  fn page_down(&mut self) {
    let target = self.view.selected_raw().saturating_add(self.page_jump());

    self.view.set_selected(target);
  }

  fn page_jump(&self) -> usize {
    self.list_height.saturating_sub(1).max(1)
  }

  fn page_up(&mut self) {
    let target = self.view.selected_raw().saturating_sub(self.page_jump());

    self.view.set_selected(target);
  }

  /// Re-runs the current search term.
  fn refresh(&mut self) {
    let query = self.search_term.trim().to_string();

    if !query.is_empty() {
      self.start_fetch(query);
    }
  }

  /// Rebuilds the visible list from the stories and the filter, keeping the
  /// selection at the same position.
  fn refresh_view(&mut self) {
    let (selected, offset) = (self.view.selected_raw(), self.view.offset());

    self.view =
      ListView::new(self.stories.search(&self.filter).cloned().collect());

    self.view.set_selected(selected);
    self.view.set_offset(offset);
  }

  fn reset_view(&mut self) {
    self.view = ListView::default();
    self.refresh_view();
  }

  pub(crate) fn search_term(&self) -> &str {
    &self.search_term
  }

  fn select_last(&mut self) {
    if let Some(last) = self.view.last_index() {
      self.view.set_selected(last);
    }
  }

  fn select_next(&mut self) {
    let target = self.view.selected_raw().saturating_add(1);

    self.view.set_selected(target);
  }

  fn select_previous(&mut self) {
    let target = self.view.selected_raw().saturating_sub(1);

    self.view.set_selected(target);
  }

  pub(crate) fn set_list_height(&mut self, height: usize) {
    self.list_height = height;
  }

  pub(crate) fn set_list_offset(&mut self, offset: usize) {
    self.view.set_offset(offset);
  }

  pub(crate) fn set_transient_message(&mut self, message: String) {
    let previous = self.transient_message.as_ref().map_or_else(
      || self.message.clone(),
      |transient| transient.previous().to_string(),
    );

    self.transient_message =
      Some(TransientMessage::new(message.clone(), previous));

    self.message = message;
  }

  fn start_fetch(&mut self, query: String) {
    let request_id = self.next_request_id;

    self.next_request_id = self.next_request_id.wrapping_add(1);

    tracing::info!(query, request_id, "starting search");

    self.stories.reduce(Action::FetchInit);

    self.pending_search = Some(PendingSearch {
      query: query.clone(),
      request_id,
    });

    if !self.help.is_visible() {
      self.message = format!("Searching for \"{}\"...", truncate(&query, 40));
    }

    self
      .pending_effects
      .push(Effect::FetchStories { query, request_id });
  }

  fn start_input(&mut self, kind: InputKind) {
    if self.input.is_some() {
      return;
    }

    let original = match kind {
      InputKind::Filter => self.filter.clone(),
      InputKind::Search => self.search_term.clone(),
    };

    self.input = Some(SearchInput::new(kind, original, self.message.clone()));

    self.update_input_message();
  }

  pub(crate) fn stories(&self) -> &Stories {
    &self.stories
  }

  fn submit_input(&mut self) -> Result {
    let Some(input) = self.input.take() else {
      return Ok(());
    };

    match input.kind {
      InputKind::Filter => {
        self.message = input.message_backup;
        Ok(())
      }
      InputKind::Search => self.submit_search(input),
    }
  }

  fn submit_search(&mut self, input: SearchInput) -> Result {
    let query = input.buffer.trim().to_string();

    if query.is_empty() {
      self.message = input.message_backup;
      return Ok(());
    }

    self
      .storage
      .set_search_term(&query)
      .context("could not save search term")?;

    self.search_term.clone_from(&query);

    self.start_fetch(query);

    Ok(())
  }

  fn update_input_message(&mut self) {
    if let Some(input) = &self.input {
      self.message = truncate(&input.prompt(), 80);
    }
  }

  pub(crate) fn update_transient_message(&mut self) {
    if let Some(transient) = self.transient_message.clone() {
      if self.message != transient.text() {
        self.transient_message = None;
      } else if transient.is_expired() {
        self.message = transient.previous().to_string();
        self.transient_message = None;
      }
    }
  }

  pub(crate) fn view(&self) -> &ListView<Story> {
    &self.view
  }
}

#[cfg(test)]
mod tests {
  use {super::*, crate::storage::tests::temp_storage_path};

  fn story(object_id: &str, title: &str) -> Story {
    Story {
      author: "author".to_string(),
      num_comments: 2,
      object_id: object_id.to_string(),
      points: 5,
      title: title.to_string(),
      url: format!("https://example.com/{object_id}"),
    }
  }

  fn sample_stories() -> Vec<Story> {
    vec![
      story("0", "React"),
      story("1", "Redux"),
      story("2", "Rust in Production"),
    ]
  }

  fn new_state() -> State {
    let storage = Storage::open(temp_storage_path()).unwrap();
    let term = storage.search_term();

    State::new(storage, term)
  }

  fn loaded_state() -> State {
    let mut state = new_state();

    let dispatch = state.dispatch_command(Command::Refresh).unwrap();

    let Effect::FetchStories { request_id, .. } = dispatch.effects[0] else {
      panic!("unexpected effect variant");
    };

    state.handle_event(Event::Stories {
      request_id,
      result: Ok(sample_stories()),
    });

    state
  }

  fn type_text(state: &mut State, text: &str) {
    for ch in text.chars() {
      let command = state
        .input_command(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE))
        .expect("input is active");

      assert_eq!(command, Command::None);
    }
  }

  fn key(state: &mut State, code: KeyCode) -> Command {
    state
      .input_command(KeyEvent::new(code, KeyModifiers::NONE))
      .expect("input is active")
  }

  fn visible_ids(state: &State) -> Vec<&str> {
    state
      .view()
      .items()
      .iter()
      .map(|story| story.object_id.as_str())
      .collect()
  }

  #[test]
  fn refresh_fetches_current_term() {
    let mut state = new_state();

    let dispatch = state.dispatch_command(Command::Refresh).unwrap();

    assert!(!dispatch.should_exit);
    assert_eq!(
      dispatch.effects,
      [Effect::FetchStories {
        query: "React".to_string(),
        request_id: 0,
      }]
    );
    assert!(state.stories().is_loading());
    assert_eq!(state.message(), "Searching for \"React\"...");
  }

  #[test]
  fn successful_response_populates_view() {
    let state = loaded_state();

    assert!(!state.stories().is_loading());
    assert_eq!(visible_ids(&state), ["0", "1", "2"]);
    assert_eq!(state.view().selected_index(), Some(0));
    assert_eq!(state.stories().comment_total(), 6);
    assert_eq!(state.message(), "Found 3 stories for \"React\"");
  }

  #[test]
  fn failed_response_keeps_previous_list_and_sets_error() {
    let mut state = loaded_state();

    let dispatch = state.dispatch_command(Command::Refresh).unwrap();

    let Effect::FetchStories { request_id, .. } = dispatch.effects[0] else {
      panic!("unexpected effect variant");
    };

    state.handle_event(Event::Stories {
      request_id,
      result: Err(anyhow::anyhow!("connection refused")),
    });

    assert!(state.stories().is_error());
    assert!(!state.stories().is_loading());
    assert_eq!(visible_ids(&state), ["0", "1", "2"]);
    assert_eq!(state.message(), "Could not search: connection refused");
  }

  #[test]
  fn stale_response_is_discarded() {
    let mut state = new_state();

    state.dispatch_command(Command::Refresh).unwrap();
    state.dispatch_command(Command::Refresh).unwrap();

    state.handle_event(Event::Stories {
      request_id: 0,
      result: Ok(vec![story("9", "Old")]),
    });

    assert!(state.stories().is_loading());
    assert!(state.view().is_empty());

    state.handle_event(Event::Stories {
      request_id: 1,
      result: Ok(sample_stories()),
    });

    assert!(!state.stories().is_loading());
    assert_eq!(visible_ids(&state), ["0", "1", "2"]);
  }

  #[test]
  fn submit_search_persists_term_and_fetches() {
    let path = temp_storage_path();

    let mut state = State::new(Storage::open(path.clone()).unwrap(), "React".into());

    state.dispatch_command(Command::StartSearch).unwrap();
    assert_eq!(state.message(), "Search: React_");

    for _ in 0.."React".len() {
      key(&mut state, KeyCode::Backspace);
    }

    type_text(&mut state, "rust");
    assert_eq!(key(&mut state, KeyCode::Enter), Command::SubmitInput);

    let dispatch = state.dispatch_command(Command::SubmitInput).unwrap();

    assert_eq!(
      dispatch.effects,
      [Effect::FetchStories {
        query: "rust".to_string(),
        request_id: 0,
      }]
    );
    assert_eq!(state.search_term(), "rust");
    assert_eq!(Storage::open(path.clone()).unwrap().search_term(), "rust");

    let _ = fs::remove_file(&path);
  }

  #[test]
  fn empty_search_submission_does_nothing() {
    let mut state = loaded_state();

    let status = state.message().to_string();

    state.dispatch_command(Command::StartSearch).unwrap();

    for _ in 0.."React".len() {
      key(&mut state, KeyCode::Backspace);
    }

    type_text(&mut state, "   ");

    let dispatch = state.dispatch_command(Command::SubmitInput).unwrap();

    assert!(dispatch.effects.is_empty());
    assert_eq!(state.search_term(), "React");
    assert_eq!(state.message(), status);
    assert!(!state.stories().is_loading());
  }

  #[test]
  fn cancelled_search_keeps_term() {
    let mut state = loaded_state();

    state.dispatch_command(Command::StartSearch).unwrap();
    type_text(&mut state, "xyz");
    assert_eq!(key(&mut state, KeyCode::Esc), Command::CancelInput);

    let dispatch = state.dispatch_command(Command::CancelInput).unwrap();

    assert!(dispatch.effects.is_empty());
    assert_eq!(state.search_term(), "React");
  }

  #[test]
  fn filter_applies_while_typing_and_restores_on_cancel() {
    let mut state = loaded_state();

    state.dispatch_command(Command::StartFilter).unwrap();
    type_text(&mut state, "RE");

    assert_eq!(state.filter(), "RE");
    assert_eq!(visible_ids(&state), ["0", "1"]);

    type_text(&mut state, "d");
    assert_eq!(visible_ids(&state), ["1"]);

    state.dispatch_command(Command::CancelInput).unwrap();

    assert_eq!(state.filter(), "");
    assert_eq!(visible_ids(&state), ["0", "1", "2"]);
  }

  #[test]
  fn submitted_filter_is_kept() {
    let mut state = loaded_state();

    state.dispatch_command(Command::StartFilter).unwrap();
    type_text(&mut state, "rust");

    let dispatch = state.dispatch_command(Command::SubmitInput).unwrap();

    assert!(dispatch.effects.is_empty());
    assert_eq!(state.filter(), "rust");
    assert_eq!(visible_ids(&state), ["2"]);
  }

  #[test]
  fn dismiss_removes_selected_story_and_selects_following() {
    let mut state = loaded_state();

    state.dispatch_command(Command::SelectNext).unwrap();
    state.dispatch_command(Command::DismissStory).unwrap();

    assert_eq!(visible_ids(&state), ["0", "2"]);
    assert_eq!(
      state.view().selected_item().map(|story| story.object_id.as_str()),
      Some("2")
    );
    assert_eq!(state.stories().comment_total(), 4);
    assert_eq!(state.message(), "Dismissed \"Redux\"");
  }

  #[test]
  fn dismissed_story_stays_hidden_when_filter_changes() {
    let mut state = loaded_state();

    state.dispatch_command(Command::DismissStory).unwrap();

    state.dispatch_command(Command::StartFilter).unwrap();
    type_text(&mut state, "r");
    state.dispatch_command(Command::CancelInput).unwrap();

    assert_eq!(visible_ids(&state), ["1", "2"]);
  }

  #[test]
  fn dismiss_on_empty_list_is_a_no_op() {
    let mut state = new_state();

    let dispatch = state.dispatch_command(Command::DismissStory).unwrap();

    assert!(dispatch.effects.is_empty());
    assert_eq!(state.message(), LIST_STATUS);
  }

  #[test]
  fn open_emits_url_of_selected_story() {
    let mut state = loaded_state();

    state.dispatch_command(Command::SelectLast).unwrap();

    let dispatch = state
      .dispatch_command(Command::OpenCurrentInBrowser)
      .unwrap();

    assert_eq!(
      dispatch.effects,
      [Effect::OpenUrl {
        url: "https://example.com/2".to_string(),
      }]
    );
  }

  #[test]
  fn selection_moves_within_bounds() {
    let mut state = loaded_state();
    state.set_list_height(10);

    state.dispatch_command(Command::SelectPrevious).unwrap();
    assert_eq!(state.view().selected_index(), Some(0));

    state.dispatch_command(Command::PageDown).unwrap();
    assert_eq!(state.view().selected_index(), Some(2));

    state.dispatch_command(Command::PageUp).unwrap();
    assert_eq!(state.view().selected_index(), Some(0));

    state.dispatch_command(Command::SelectLast).unwrap();
    assert_eq!(state.view().selected_index(), Some(2));

    state.dispatch_command(Command::SelectFirst).unwrap();
    assert_eq!(state.view().selected_index(), Some(0));
  }

  #[test]
  fn quit_requests_exit() {
    let mut state = new_state();

    assert!(state.dispatch_command(Command::Quit).unwrap().should_exit);
  }

  #[test]
  fn help_round_trip_restores_status() {
    let mut state = loaded_state();

    state.dispatch_command(Command::ShowHelp).unwrap();
    assert!(state.help_is_visible());
    assert_eq!(state.message(), HELP_STATUS);

    state.dispatch_command(Command::HideHelp).unwrap();
    assert!(!state.help_is_visible());
    assert_eq!(state.message(), "Found 3 stories for \"React\"");
  }
}

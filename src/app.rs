use super::*;

pub(crate) struct App {
  client: Client,
  event_rx: UnboundedReceiver<Event>,
  event_tx: UnboundedSender<Event>,
  handle: Handle,
  state: State,
}

impl App {
  /// Applies `command` and runs its effects. Returns whether the app should
  /// exit.
  fn dispatch(&mut self, command: Command) -> bool {
    match self.state.dispatch_command(command) {
      Ok(dispatch) => {
        for effect in dispatch.effects {
          self.execute_effect(effect);
        }

        dispatch.should_exit
      }
      Err(error) => {
        tracing::error!("command {command:?} failed: {error:#}");
        self.state.clear_pending_effects();
        self.state.set_transient_message(format!("error: {error}"));
        false
      }
    }
  }

  fn draw(&mut self, frame: &mut Frame) {
    let layout = Layout::default()
      .direction(Direction::Vertical)
      .margin(1)
      .constraints([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
      ])
      .split(frame.area());

    self.state.set_list_height(layout[1].height as usize / 3);

    frame.render_widget(Paragraph::new(self.header()), layout[0]);

    let stories = self.state.stories();
    let view = self.state.view();

    let list_items: Vec<ListItem> = if view.is_empty() {
      let text = if stories.is_loading() {
        LOADING_STATUS.to_string()
      } else if stories.is_error() {
        String::new()
      } else if !stories.is_empty() && !self.state.filter().is_empty() {
        format!("No stories match \"{}\".", truncate(self.state.filter(), 40))
      } else {
        "No stories found.".to_string()
      };

      vec![ListItem::new(Line::from(vec![
        Span::raw(BASE_INDENT),
        Span::raw(text),
      ]))]
    } else {
      view
        .items()
        .iter()
        .map(|story| {
          ListItem::new(vec![
            Line::from(vec![
              Span::raw(BASE_INDENT),
              Span::styled(
                story.display_title().to_string(),
                Style::default().fg(Color::White),
              ),
            ]),
            Line::from(vec![
              Span::raw(BASE_INDENT),
              Span::styled(story.detail(), Style::default().fg(Color::DarkGray)),
            ]),
            Line::from(Span::raw(BASE_INDENT)),
          ])
        })
        .collect()
    };

    let mut list_state = ListState::default()
      .with_selected(view.selected_index())
      .with_offset(view.offset());

    let list = List::new(list_items)
      .highlight_style(
        Style::default()
          .fg(Color::Cyan)
          .add_modifier(Modifier::BOLD),
      )
      .highlight_symbol("");

    frame.render_stateful_widget(list, layout[1], &mut list_state);

    self.state.set_list_offset(list_state.offset());

    let status = Paragraph::new(self.state.message().to_string())
      .style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, layout[2]);

    self.state.help().draw(frame);
  }

  fn execute_effect(&mut self, effect: Effect) {
    tracing::debug!(?effect, "executing effect");

    match effect {
      Effect::FetchStories { query, request_id } => {
        let (client, sender) = (self.client.clone(), self.event_tx.clone());

        self.handle.spawn(async move {
          let _ = sender.send(Event::Stories {
            request_id,
            result: client.search_stories(&query).await,
          });
        });
      }
      Effect::OpenUrl { url } => match webbrowser::open(&url) {
        Ok(()) => {
          self.state.set_transient_message(format!(
            "Opened in browser: {}",
            truncate(&url, 80)
          ));
        }
        Err(error) => {
          tracing::warn!(url, "could not open link: {error}");

          self
            .state
            .set_transient_message(format!("Could not open link: {error}"));
        }
      },
    }
  }

  fn header(&self) -> Vec<Line<'static>> {
    let stories = self.state.stories();

    let mut summary = format!(
      "{} of {} • {} • search \"{}\"",
      self.state.view().len(),
      match stories.len() {
        1 => "1 story".to_string(),
        count => format!("{count} stories"),
      },
      format_comments(stories.comment_total()),
      truncate(self.state.search_term(), 30),
    );

    if !self.state.filter().is_empty() {
      summary.push_str(&format!(
        " • filter \"{}\"",
        truncate(self.state.filter(), 30)
      ));
    }

    let mut lines = vec![
      Line::from(Span::styled(
        TITLE,
        Style::default()
          .fg(Color::Cyan)
          .add_modifier(Modifier::BOLD),
      )),
      Line::from(Span::styled(summary, Style::default().fg(Color::DarkGray))),
    ];

    if stories.is_error() {
      lines.push(Line::from(Span::styled(
        ERROR_STATUS,
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
      )));
    } else if stories.is_loading() && !stories.is_empty() {
      lines.push(Line::from(Span::styled(
        LOADING_STATUS,
        Style::default().fg(Color::Yellow),
      )));
    }

    lines
  }

  pub(crate) fn new(client: Client, state: State) -> Self {
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    Self {
      client,
      event_rx,
      event_tx,
      handle: Handle::current(),
      state,
    }
  }

  fn process_pending_events(&mut self) {
    self.state.update_transient_message();

    while let Ok(event) = self.event_rx.try_recv() {
      self.state.handle_event(event);
    }
  }

  pub(crate) fn run(
    &mut self,
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
  ) -> Result {
    self.dispatch(Command::Refresh);

    loop {
      self.process_pending_events();

      terminal.draw(|frame| self.draw(frame))?;

      if !crossterm_event::poll(Duration::from_millis(200))? {
        continue;
      }

      let CrosstermEvent::Key(key) = crossterm_event::read()? else {
        continue;
      };

      if key.kind != KeyEventKind::Press {
        continue;
      }

      let command = if self.state.help_is_visible() {
        HelpView::handle_key(key)
      } else if let Some(command) = self.state.input_command(key) {
        command
      } else {
        Command::for_list_key(key)
      };

      if self.dispatch(command) {
        break;
      }
    }

    Ok(())
  }
}

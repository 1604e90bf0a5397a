use super::*;

/// The fetched story list together with its loading and error flags.
///
/// All mutations go through [`Stories::reduce`]. The comment total is derived
/// from `data` and only recomputed when `data` changes.
#[derive(Debug, Default)]
pub(crate) struct Stories {
  comment_total: u64,
  data: Vec<Story>,
  is_error: bool,
  is_loading: bool,
}

impl Stories {
  pub(crate) fn comment_total(&self) -> u64 {
    self.comment_total
  }

  #[cfg(test)]
  pub(crate) fn data(&self) -> &[Story] {
    &self.data
  }

  pub(crate) fn is_empty(&self) -> bool {
    self.data.is_empty()
  }

  pub(crate) fn is_error(&self) -> bool {
    self.is_error
  }

  pub(crate) fn is_loading(&self) -> bool {
    self.is_loading
  }

  pub(crate) fn len(&self) -> usize {
    self.data.len()
  }

  pub(crate) fn reduce(&mut self, action: Action) {
    match action {
      Action::FetchFailure => {
        self.is_loading = false;
        self.is_error = true;
      }
      Action::FetchInit => {
        self.is_loading = true;
        self.is_error = false;
      }
      Action::FetchSuccess(stories) => {
        let mut seen = HashSet::new();

        self.data = stories
          .into_iter()
          .filter(|story| seen.insert(story.object_id.clone()))
          .collect();

        self.is_loading = false;
        self.is_error = false;

        self.update_comment_total();
      }
      Action::Remove(object_id) => {
        if let Some(position) =
          self.data.iter().position(|story| story.object_id == object_id)
        {
          self.data.remove(position);
          self.update_comment_total();
        }
      }
    }
  }

  pub(crate) fn search<'a>(
    &'a self,
    term: &'a str,
  ) -> impl Iterator<Item = &'a Story> + 'a {
    self.data.iter().filter(move |story| story.matches(term))
  }

  fn update_comment_total(&mut self) {
    self.comment_total = self.data.iter().map(|story| story.num_comments).sum();
  }
}

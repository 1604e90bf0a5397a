/// Items with a selection cursor and scroll offset, both kept within bounds.
pub(crate) struct ListView<T> {
  items: Vec<T>,
  offset: usize,
  selected: usize,
}

impl<T> Default for ListView<T> {
  fn default() -> Self {
    Self::new(Vec::new())
  }
}

impl<T> ListView<T> {
  fn clamp(&self, index: usize) -> usize {
    self.last_index().map_or(0, |last| index.min(last))
  }

  pub(crate) fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub(crate) fn items(&self) -> &[T] {
    &self.items
  }

  pub(crate) fn last_index(&self) -> Option<usize> {
    self.items.len().checked_sub(1)
  }

  pub(crate) fn len(&self) -> usize {
    self.items.len()
  }

  pub(crate) fn new(items: Vec<T>) -> Self {
    Self {
      items,
      offset: 0,
      selected: 0,
    }
  }

  /// Scroll offset, never past the selected item.
  pub(crate) fn offset(&self) -> usize {
    self.offset.min(self.selected_index().unwrap_or(0))
  }

  pub(crate) fn selected_index(&self) -> Option<usize> {
    self.last_index().map(|last| self.selected.min(last))
  }

  pub(crate) fn selected_item(&self) -> Option<&T> {
    self.items.get(self.selected_index()?)
  }

  pub(crate) fn selected_raw(&self) -> usize {
    self.selected
  }

  pub(crate) fn set_offset(&mut self, offset: usize) {
    self.offset = self.clamp(offset);
  }

  pub(crate) fn set_selected(&mut self, index: usize) {
    self.selected = self.clamp(index);
  }
}

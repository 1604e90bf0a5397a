use super::*;

#[derive(Debug)]
pub(crate) enum Action {
  FetchFailure,
  FetchInit,
  FetchSuccess(Vec<Story>),
  Remove(String),
}

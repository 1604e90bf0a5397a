pub(crate) struct PendingSearch {
  pub(crate) query: String,
  pub(crate) request_id: u64,
}

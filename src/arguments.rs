use super::*;

#[derive(Debug, Parser)]
#[command(
  name = "hacker-stories",
  version,
  about = "Search and browse Hacker News stories in the terminal"
)]
pub(crate) struct Arguments {
  /// Search endpoint queried with `?query=<term>`.
  #[arg(long, env = "HACKER_STORIES_API_URL", default_value = Client::DEFAULT_API_URL)]
  pub(crate) api_url: String,
  /// Write logs to this file. Filtered by `RUST_LOG`, `info` by default.
  #[arg(long, env = "HACKER_STORIES_LOG_FILE")]
  pub(crate) log_file: Option<PathBuf>,
  /// Initial search term, instead of the last submitted one.
  #[arg(short, long)]
  pub(crate) query: Option<String>,
  /// Key/value file holding the last search term.
  #[arg(long, env = "HACKER_STORIES_STORAGE_FILE")]
  pub(crate) storage_file: Option<PathBuf>,
}

impl Arguments {
  pub(crate) fn initial_search_term(&self, storage: &Storage) -> String {
    self
      .query
      .as_deref()
      .map(str::trim)
      .filter(|query| !query.is_empty())
      .map_or_else(|| storage.search_term(), str::to_string)
  }
}

#[cfg(test)]
mod tests {
  use {super::*, crate::storage::tests::temp_storage_path};

  #[test]
  fn defaults_to_algolia_endpoint() {
    let arguments = Arguments::try_parse_from(["hacker-stories"]).unwrap();

    assert_eq!(arguments.api_url, Client::DEFAULT_API_URL);
    assert_eq!(arguments.query, None);
  }

  #[test]
  fn query_overrides_stored_term() {
    let storage = Storage::open(temp_storage_path()).unwrap();

    let arguments =
      Arguments::try_parse_from(["hacker-stories", "--query", " rust "])
        .unwrap();
    assert_eq!(arguments.initial_search_term(&storage), "rust");

    let arguments =
      Arguments::try_parse_from(["hacker-stories", "-q", "  "]).unwrap();
    assert_eq!(arguments.initial_search_term(&storage), "React");
  }

  #[test]
  fn parses_paths() {
    let arguments = Arguments::try_parse_from([
      "hacker-stories",
      "--storage-file",
      "/tmp/storage.json",
      "--log-file",
      "/tmp/hacker-stories.log",
    ])
    .unwrap();

    assert_eq!(
      arguments.storage_file,
      Some(PathBuf::from("/tmp/storage.json"))
    );
    assert_eq!(
      arguments.log_file,
      Some(PathBuf::from("/tmp/hacker-stories.log"))
    );
  }
}

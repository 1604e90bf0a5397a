use super::*;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub(crate) struct Story {
  #[serde(default, deserialize_with = "deserialize_escaped_text")]
  pub(crate) author: String,
  #[serde(default, deserialize_with = "deserialize_count")]
  pub(crate) num_comments: u64,
  #[serde(rename = "objectID", deserialize_with = "deserialize_id")]
  pub(crate) object_id: String,
  #[serde(default, deserialize_with = "deserialize_count")]
  pub(crate) points: u64,
  #[serde(default, deserialize_with = "deserialize_escaped_text")]
  pub(crate) title: String,
  #[serde(default, deserialize_with = "deserialize_text")]
  pub(crate) url: String,
}

impl Story {
  pub(crate) fn detail(&self) -> String {
    let mut parts = vec![if self.author.is_empty() {
      format_points(self.points)
    } else {
      format!("{} by {}", format_points(self.points), self.author)
    }];

    parts.push(format_comments(self.num_comments));

    if let Some(host) = host(&self.url) {
      parts.push(host);
    }

    parts.join(" • ")
  }

  pub(crate) fn display_title(&self) -> &str {
    if self.title.trim().is_empty() {
      "Untitled"
    } else {
      &self.title
    }
  }

  /// Case-insensitive substring match on the title. The empty term matches
  /// everything.
  pub(crate) fn matches(&self, term: &str) -> bool {
    self.title.to_lowercase().contains(&term.to_lowercase())
  }

  pub(crate) fn resolved_url(&self) -> String {
    if self.url.trim().is_empty() {
      format!("https://news.ycombinator.com/item?id={}", self.object_id)
    } else {
      self.url.clone()
    }
  }
}

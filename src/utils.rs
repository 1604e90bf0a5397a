use super::*;

pub(crate) fn deserialize_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
  D: Deserializer<'de>,
{
  match Option::<Value>::deserialize(deserializer)? {
    None | Some(Value::Null) => Ok(0),
    Some(Value::Number(n)) => n.as_u64().ok_or_else(|| {
      de::Error::invalid_value(
        Unexpected::Other(&n.to_string()),
        &"a non-negative integer",
      )
    }),
    Some(Value::String(s)) => s.parse::<u64>().map_err(|_| {
      de::Error::invalid_value(Unexpected::Str(&s), &"a non-negative integer")
    }),
    Some(Value::Bool(b)) => Err(de::Error::invalid_type(
      Unexpected::Bool(b),
      &"a non-negative integer",
    )),
    Some(Value::Array(_)) => Err(de::Error::invalid_type(
      Unexpected::Seq,
      &"a non-negative integer",
    )),
    Some(Value::Object(_)) => Err(de::Error::invalid_type(
      Unexpected::Map,
      &"a non-negative integer",
    )),
  }
}

pub(crate) fn deserialize_escaped_text<'de, D>(
  deserializer: D,
) -> Result<String, D::Error>
where
  D: Deserializer<'de>,
{
  deserialize_text(deserializer)
    .map(|text| html_escape::decode_html_entities(&text).into_owned())
}

pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
  D: Deserializer<'de>,
{
  deserialize_optional_string(deserializer)?
    .ok_or_else(|| de::Error::invalid_type(Unexpected::Unit, &"an identifier"))
}

pub(crate) fn deserialize_optional_string<'de, D>(
  deserializer: D,
) -> Result<Option<String>, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Option::<Value>::deserialize(deserializer)?;

  match value {
    None | Some(Value::Null) => Ok(None),
    Some(Value::String(s)) => Ok(Some(s)),
    Some(Value::Number(n)) => Ok(Some(n.to_string())),
    Some(Value::Bool(b)) => Err(de::Error::invalid_type(
      Unexpected::Bool(b),
      &"string or number",
    )),
    Some(Value::Array(_)) => Err(de::Error::invalid_type(
      Unexpected::Seq,
      &"string or number",
    )),
    Some(Value::Object(_)) => Err(de::Error::invalid_type(
      Unexpected::Map,
      &"string or number",
    )),
  }
}

pub(crate) fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
  D: Deserializer<'de>,
{
  deserialize_optional_string(deserializer).map(Option::unwrap_or_default)
}

pub(crate) fn format_comments(count: u64) -> String {
  match count {
    1 => "1 comment".to_string(),
    _ => format!("{count} comments"),
  }
}

pub(crate) fn format_points(score: u64) -> String {
  match score {
    1 => "1 point".to_string(),
    _ => format!("{score} points"),
  }
}

/// Host of `url` without a leading `www.`.
pub(crate) fn host(url: &str) -> Option<String> {
  let url = Url::parse(url).ok()?;

  let host = url.host_str()?;

  Some(host.strip_prefix("www.").unwrap_or(host).to_string())
}

pub(crate) fn truncate(text: &str, max_chars: usize) -> String {
  if text.chars().count() <= max_chars {
    return text.to_string();
  }

  let mut result = String::new();

  for (idx, ch) in text.chars().enumerate() {
    if idx >= max_chars {
      result.push_str("...");
      break;
    }

    result.push(ch);
  }

  result.trim_end().to_string()
}

use super::*;

/// String key/value store persisted as a JSON object, the terminal stand-in
/// for browser local storage.
#[derive(Debug)]
pub(crate) struct Storage {
  path: PathBuf,
  values: BTreeMap<String, String>,
}

impl Storage {
  pub(crate) const DEFAULT_SEARCH_TERM: &'static str = "React";

  const SEARCH_KEY: &'static str = "search";

  fn default_path() -> Result<PathBuf> {
    let base_dir = if let Ok(dir) = env::var("XDG_CONFIG_HOME") {
      PathBuf::from(dir)
    } else if let Ok(home) = env::var("HOME") {
      PathBuf::from(home).join(".config")
    } else {
      env::current_dir()?.join(".config")
    };

    Ok(base_dir.join("hacker-stories").join("storage.json"))
  }

  fn ensure_parent_dir(path: &Path) -> Result {
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent).with_context(|| {
        format!("could not create directory `{}`", parent.display())
      })?;
    }

    Ok(())
  }

  pub(crate) fn get(&self, key: &str) -> Option<&str> {
    self.values.get(key).map(String::as_str)
  }

  /// Loads the store at `path`, or at the default location when `None`.
  pub(crate) fn load(path: Option<PathBuf>) -> Result<Self> {
    let path = match path {
      Some(path) => path,
      None => Self::default_path()?,
    };

    Self::open(path)
  }

  pub(crate) fn open(path: PathBuf) -> Result<Self> {
    let values = if path.exists() {
      let data = fs::read(&path)
        .with_context(|| format!("could not read `{}`", path.display()))?;

      if data.is_empty() {
        BTreeMap::new()
      } else {
        serde_json::from_slice::<BTreeMap<String, String>>(&data)
          .with_context(|| format!("could not parse `{}`", path.display()))?
      }
    } else {
      BTreeMap::new()
    };

    tracing::debug!(path = %path.display(), keys = values.len(), "loaded storage");

    Ok(Self { path, values })
  }

  fn persist(&self) -> Result {
    Self::ensure_parent_dir(&self.path)?;

    let serialized = serde_json::to_vec_pretty(&self.values)?;

    fs::write(&self.path, serialized)
      .with_context(|| format!("could not write `{}`", self.path.display()))?;

    tracing::debug!(path = %self.path.display(), "persisted storage");

    Ok(())
  }

  pub(crate) fn search_term(&self) -> String {
    self
      .get(Self::SEARCH_KEY)
      .unwrap_or(Self::DEFAULT_SEARCH_TERM)
      .to_string()
  }

  pub(crate) fn set(&mut self, key: &str, value: &str) -> Result {
    if self.get(key) == Some(value) {
      return Ok(());
    }

    self.values.insert(key.to_string(), value.to_string());

    self.persist()
  }

  pub(crate) fn set_search_term(&mut self, term: &str) -> Result {
    self.set(Self::SEARCH_KEY, term)
  }
}

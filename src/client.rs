use super::*;

#[derive(Clone)]
pub(crate) struct Client {
  api_url: Url,
  client: reqwest::Client,
}

impl Client {
  pub(crate) const DEFAULT_API_URL: &'static str =
    "https://hn.algolia.com/api/v1/search";

  const TIMEOUT: Duration = Duration::from_secs(10);

  const USER_AGENT: &'static str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

  pub(crate) fn new(api_url: &str) -> Result<Self> {
    let api_url = Url::parse(api_url)
      .with_context(|| format!("invalid search api url `{api_url}`"))?;

    let client = reqwest::Client::builder()
      .timeout(Self::TIMEOUT)
      .user_agent(Self::USER_AGENT)
      .build()
      .context("could not build http client")?;

    Ok(Self { api_url, client })
  }

  pub(crate) async fn search_stories(&self, query: &str) -> Result<Vec<Story>> {
    let url = self.search_url(query);

    tracing::debug!(%url, "fetching stories");

    let response = self
      .client
      .get(url)
      .send()
      .await?
      .error_for_status()?
      .json::<SearchResponse>()
      .await?;

    tracing::info!(query, hits = response.hits.len(), "fetched stories");

    Ok(response.hits)
  }

  pub(crate) fn search_url(&self, query: &str) -> Url {
    let mut url = self.api_url.clone();

    url.query_pairs_mut().append_pair("query", query);

    url
  }
}

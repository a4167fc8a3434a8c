use serde::{Deserialize, Deserializer, Serialize};

/// Decoded article record. Unknown payload fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(
        rename = "publishedAt",
        default,
        deserialize_with = "null_as_empty"
    )]
    pub published_at: String,
}

impl Article {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        published_at: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            published_at: published_at.into(),
        }
    }

    /// Case-sensitive substring match against the title.
    pub fn mentions(&self, topic: &str) -> bool {
        self.title.contains(topic)
    }
}

/// Articles returned by a single source, in provider order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleSet(Vec<Article>);

impl ArticleSet {
    pub fn new(articles: Vec<Article>) -> Self {
        Self(articles)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Article> {
        self.0.iter()
    }

    /// The source's top-ranked article.
    pub fn lead(&self) -> Option<&Article> {
        self.0.first()
    }

    pub fn first_match(&self, topic: &str) -> Option<&Article> {
        self.0.iter().find(|article| article.mentions(topic))
    }

    /// Accepts the set when any title mentions `topic`, then surfaces the
    /// lead article rather than the one that matched.
    pub fn select(&self, topic: &str) -> Option<NewsItem> {
        self.first_match(topic)?;
        self.lead().map(NewsItem::from)
    }
}

impl From<Vec<Article>> for ArticleSet {
    fn from(articles: Vec<Article>) -> Self {
        Self(articles)
    }
}

impl<'a> IntoIterator for &'a ArticleSet {
    type Item = &'a Article;
    type IntoIter = std::slice::Iter<'a, Article>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Response document of the articles endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsPayload {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(rename = "sortBy", default)]
    pub sort_by: Option<String>,
    pub articles: ArticleSet,
}

impl NewsPayload {
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }
}

/// Normalized lookup result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub date: String,
    pub text: String,
}

impl From<&Article> for NewsItem {
    fn from(article: &Article) -> Self {
        Self {
            title: article.title.clone(),
            date: article.published_at.clone(),
            text: article.description.clone(),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

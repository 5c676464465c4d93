use serde::Deserialize;

/// Generic speedrun.com API response envelope.
#[derive(Deserialize, Debug)]
pub struct Envelope<T> {
    pub data: T,
}

/// One page of a paginated endpoint.
#[derive(Deserialize, Debug)]
pub struct Page<T> {
    pub data: Vec<T>,

    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Deserialize, Debug, Default)]
pub struct Pagination {
    #[serde(default)]
    pub links: Vec<Link>,
}

#[derive(Deserialize, Debug)]
pub struct Link {
    pub rel: Option<String>,
    pub uri: Option<String>,
}

impl Pagination {
    /// URI of the next page, if there is one.
    #[must_use]
    pub fn next_uri(&self) -> Option<&str> {
        self.links
            .iter()
            .find(|link| link.rel.as_deref() == Some("next"))
            .and_then(|link| link.uri.as_deref())
    }
}

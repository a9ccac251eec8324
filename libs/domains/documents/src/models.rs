use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use url::Url;

/// Field every stored item carries as its external identifier.
pub const ID_FIELD: &str = "Id";

/// A schema-less JSON object. Key order is kept as received.
pub type Item = serde_json::Map<String, Value>;

/// Field name to exact string value. All pairs must match.
pub type Filter = BTreeMap<String, String>;

/// First filter key that MongoDB would read as a query operator instead of
/// a field name.
pub fn operator_field(filter: &Filter) -> Option<&str> {
    filter
        .keys()
        .map(String::as_str)
        .find(|key| key.starts_with('$'))
}

/// Listing envelope returned by the index operation.
///
/// Serialized as `{"Items": [...], "NumberOfItems": n}`. The count is
/// derived from the list on construction so the two never disagree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemsHandle {
    items: Vec<Item>,
    number_of_items: usize,
}

impl ItemsHandle {
    pub fn new(items: Vec<Item>) -> Self {
        let number_of_items = items.len();
        Self {
            items,
            number_of_items,
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn number_of_items(&self) -> usize {
        self.number_of_items
    }
}

/// Where a domain's items live: one collection named after the domain,
/// inside `store_name` on `host`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreBinding {
    domain: String,
    host: String,
    store_name: String,
}

impl StoreBinding {
    pub fn new(
        domain: impl Into<String>,
        host: impl Into<String>,
        store_name: impl Into<String>,
    ) -> Self {
        Self {
            domain: domain.into(),
            host: host.into(),
            store_name: store_name.into(),
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn store_name(&self) -> &str {
        &self.store_name
    }
}

/// Upstream base URL that unhandled requests of a domain are forwarded to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyBinding {
    target: Url,
}

impl ProxyBinding {
    pub fn new(target: Url) -> Self {
        Self { target }
    }

    pub fn parse(target: &str) -> Result<Self, url::ParseError> {
        Url::parse(target).map(Self::new)
    }

    pub fn target(&self) -> &Url {
        &self.target
    }
}

/// Result of a filtered read.
///
/// `Partial` carries whatever was read before iteration failed, so callers
/// can still answer while flagging the listing as incomplete.
#[derive(Debug, Clone, PartialEq)]
pub enum FindOutcome {
    Complete(Vec<Item>),
    Partial { items: Vec<Item>, cause: String },
}

impl FindOutcome {
    pub fn items(&self) -> &[Item] {
        match self {
            FindOutcome::Complete(items) | FindOutcome::Partial { items, .. } => items,
        }
    }

    pub fn into_items(self) -> Vec<Item> {
        match self {
            FindOutcome::Complete(items) | FindOutcome::Partial { items, .. } => items,
        }
    }

    pub fn is_partial(&self) -> bool {
        matches!(self, FindOutcome::Partial { .. })
    }
}

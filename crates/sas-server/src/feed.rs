use std::collections::BTreeSet;

use serde::Serialize;
use sas_types::{ItemShape, PageWindow, StreamItem, StreamKind};

/// A link in a feed envelope.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Link {
    pub href: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FeedLinks {
    #[serde(rename = "self")]
    pub current: Link,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<Link>,
}

/// JSON collection envelope wrapping one annotated page.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Feed {
    pub display_name: String,
    pub url: String,
    pub object_types: Vec<String>,
    pub total_items: usize,
    pub items: Vec<StreamItem>,
    pub links: FeedLinks,
}

impl Feed {
    pub fn new(
        base_url: &str,
        nickname: &str,
        kind: StreamKind,
        window: PageWindow,
        total_items: usize,
        items: Vec<StreamItem>,
    ) -> Self {
        let url = format!(
            "{}/api/user/{}/{}",
            base_url.trim_end_matches('/'),
            nickname,
            kind.path()
        );
        let object_types = match kind.item_shape() {
            ItemShape::Activity => vec!["activity".to_string()],
            ItemShape::Object => items
                .iter()
                .filter_map(|item| item.annotation_target())
                .map(|object| object.object_type.clone())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect(),
        };
        let page_link = |w: PageWindow| Link {
            href: format!("{url}?offset={}&count={}", w.offset, w.count),
        };
        let links = FeedLinks {
            current: page_link(window),
            next: (window.offset + items.len() < total_items).then(|| page_link(window.next())),
        };
        Self {
            display_name: format!("{} {}", kind.title(), nickname),
            links,
            url,
            object_types,
            total_items,
            items,
        }
    }
}

//! Client-side shaping of the post list: sort key selection and title search.

use crate::model::post::Post;
use serde::{Deserialize, Serialize};

/// Column the list is ordered by. Both keys sort descending.
#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    CreatedAt,
    Upvotes,
}

impl SortKey {
    pub const ALL: [SortKey; 2] = [SortKey::CreatedAt, SortKey::Upvotes];

    #[must_use]
    pub fn column(self) -> &'static str {
        match self {
            SortKey::CreatedAt => "created_at",
            SortKey::Upvotes => "upvotes",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SortKey::CreatedAt => "Sort by Date",
            SortKey::Upvotes => "Sort by Upvotes",
        }
    }
}

#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub enum EmptyState<'a> {
    NoPosts,
    NoMatches { search: &'a str },
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct PostListing {
    pub posts: Vec<Post>,
    pub search: String,
    pub sort: SortKey,
}

impl PostListing {
    /// Posts whose title contains the search term, ignoring case, in fetch order.
    #[must_use]
    pub fn visible(&self) -> Vec<&Post> {
        filter_by_title(&self.posts, &self.search)
    }

    /// Why nothing is shown, if nothing is shown.
    #[must_use]
    pub fn empty_state(&self) -> Option<EmptyState<'_>> {
        if !self.visible().is_empty() {
            None
        } else if self.search.is_empty() {
            Some(EmptyState::NoPosts)
        } else {
            Some(EmptyState::NoMatches {
                search: &self.search,
            })
        }
    }
}

#[must_use]
pub fn filter_by_title<'a>(posts: &'a [Post], search: &str) -> Vec<&'a Post> {
    let needle = search.to_lowercase();
    posts
        .iter()
        .filter(|post| post.title.get().to_lowercase().contains(&needle))
        .collect()
}

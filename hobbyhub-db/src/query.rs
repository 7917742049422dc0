//! Table queries in the PostgREST query-string dialect.

use std::fmt::Display;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum Table {
    Posts,
    Comments,
}

impl Table {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Table::Posts => "posts",
            Table::Comments => "comments",
        }
    }
}

impl Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    fn suffix(self) -> &'static str {
        match self {
            Direction::Ascending => "asc",
            Direction::Descending => "desc",
        }
    }
}

/// Equality filters plus an optional single-column ordering.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct Query {
    filters: Vec<(&'static str, String)>,
    order: Option<(&'static str, Direction)>,
}

impl Query {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn eq(mut self, column: &'static str, value: impl Display) -> Self {
        self.filters.push((column, value.to_string()));
        self
    }

    #[must_use]
    pub fn order_by(mut self, column: &'static str, direction: Direction) -> Self {
        self.order = Some((column, direction));
        self
    }

    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.filters.is_empty()
    }

    /// Query-string pairs for a request that only filters (update, delete).
    #[must_use]
    pub fn filter_params(&self) -> Vec<(String, String)> {
        self.filters
            .iter()
            .map(|(column, value)| ((*column).to_owned(), format!("eq.{value}")))
            .collect()
    }

    /// Query-string pairs for a select returning every column.
    #[must_use]
    pub fn select_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_owned(), "*".to_owned())];
        params.extend(self.filter_params());
        if let Some((column, direction)) = self.order {
            params.push(("order".to_owned(), format!("{column}.{}", direction.suffix())));
        }
        params
    }
}

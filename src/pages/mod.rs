//! Page data loaders.
//!
//! SYSTEM CONTEXT
//! ==============
//! The routing framework matches a URL and hands the captured parameters to
//! the page's loader; the loader returns the data the view renders. Each page
//! also declares whether it may be prerendered at build time.


pub mod book;
pub mod book_settings;

use std::collections::HashMap;

use serde::Serialize;

use crate::error::PageError;
pub use book::{BookPage, BookPageData};
pub use book_settings::BookSettingsPage;

/// A page's data loader.
pub trait PageLoad {
    /// Whether the page may be rendered ahead of time.
    const PRERENDER: bool;

    type Data: Serialize;

    /// # Errors
    ///
    /// Returns an error when a required route parameter is missing.
    fn load(params: &RouteParams) -> Result<Self::Data, PageError>;
}

/// Parameters captured from the matched route (e.g. `slug`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteParams(HashMap<String, String>);

impl RouteParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Non-empty parameter value, or `MissingParam`.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` is absent or empty.
    pub fn require(&self, name: &'static str) -> Result<&str, PageError> {
        self.get(name)
            .filter(|v| !v.is_empty())
            .ok_or(PageError::MissingParam(name))
    }
}

/// Pages this client knows how to load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    /// `/book/{slug}`
    Book { slug: String },
    /// `/book/{slug}/settings`
    BookSettings { slug: String },
}

impl Route {
    /// Match a URL path against the known pages.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown paths and `MissingParam` for an empty slug.
    pub fn parse(path: &str) -> Result<Self, PageError> {
        let trimmed = path.trim().trim_matches('/');
        let segments: Vec<&str> = trimmed.split('/').collect();
        match segments.as_slice() {
            ["book", slug] => Ok(Self::Book { slug: non_empty_slug(slug)? }),
            ["book", slug, "settings"] => Ok(Self::BookSettings { slug: non_empty_slug(slug)? }),
            _ => Err(PageError::NotFound(path.to_owned())),
        }
    }

    #[must_use]
    pub fn params(&self) -> RouteParams {
        match self {
            Self::Book { slug } | Self::BookSettings { slug } => RouteParams::new().with("slug", slug.clone()),
        }
    }

    #[must_use]
    pub fn prerender(&self) -> bool {
        match self {
            Self::Book { .. } => BookPage::PRERENDER,
            Self::BookSettings { .. } => BookSettingsPage::PRERENDER,
        }
    }

    /// Run the matched page's loader and serialize its output.
    ///
    /// # Errors
    ///
    /// Propagates the loader's error, or `Encode` if its output cannot be
    /// represented as JSON.
    pub fn load(&self) -> Result<serde_json::Value, PageError> {
        let params = self.params();
        let data = match self {
            Self::Book { .. } => serde_json::to_value(BookPage::load(&params)?),
            Self::BookSettings { .. } => serde_json::to_value(BookSettingsPage::load(&params)?),
        };
        data.map_err(|e| PageError::Encode(e.to_string()))
    }
}

fn non_empty_slug(slug: &str) -> Result<String, PageError> {
    if slug.is_empty() {
        return Err(PageError::MissingParam("slug"));
    }
    Ok(slug.to_owned())
}

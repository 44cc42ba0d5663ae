//! `/book/{slug}`: the book's ledger view.

use serde::{Deserialize, Serialize};

use super::{PageLoad, RouteParams};
use crate::error::PageError;

/// Data handed to book-scoped views.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPageData {
    pub book_id: String,
}

impl BookPageData {
    pub(crate) fn from_params(params: &RouteParams) -> Result<Self, PageError> {
        Ok(Self { book_id: params.require("slug")?.to_owned() })
    }
}

pub struct BookPage;

impl PageLoad for BookPage {
    const PRERENDER: bool = true;

    type Data = BookPageData;

    fn load(params: &RouteParams) -> Result<BookPageData, PageError> {
        BookPageData::from_params(params)
    }
}

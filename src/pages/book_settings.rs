//! `/book/{slug}/settings`

use super::{BookPageData, PageLoad, RouteParams};
use crate::error::PageError;

pub struct BookSettingsPage;

impl PageLoad for BookSettingsPage {
    const PRERENDER: bool = false;

    type Data = BookPageData;

    fn load(params: &RouteParams) -> Result<BookPageData, PageError> {
        BookPageData::from_params(params)
    }
}

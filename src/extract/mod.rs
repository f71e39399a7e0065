//! Page extractors
//!
//! One pure function per page type maps a parsed page (or one row of it) into
//! a [`Record`]. Each field is looked up behind its own failure boundary
//! ([`Record::field`]): a field that cannot be found is logged and set to
//! [`NOT_AVAILABLE`] while the other fields are still extracted.

mod album;
mod artist;
mod chart;
mod discography;
pub(crate) mod dom;
mod record;
mod timeline;

pub use album::{extract_album, extract_release_details, parse_rank};
pub use artist::extract_artist;
pub use chart::{chart_rows, extract_chart_row, has_next_page};
pub use discography::{extract_discography, extract_release_lines, ReleaseLine};
pub use dom::is_advertisement;
pub use record::{FieldValue, Record, NOT_AVAILABLE};
pub use timeline::{extract_timeline_entry, timeline_lines};

use thiserror::Error;

/// Why a single field (or a whole page section) could not be extracted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("no element matches '{0}'")]
    Missing(String),

    #[error("element has no '{0}' attribute")]
    MissingAttribute(String),

    #[error("'{0}' is empty")]
    Empty(String),

    #[error("invalid selector '{0}'")]
    InvalidSelector(String),

    #[error("unexpected content: {0}")]
    Malformed(String),
}

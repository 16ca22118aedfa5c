//! Release-note view models: CMS record parsing, scope catalog, and mock content.

mod error;
pub mod mock;
pub mod parse;
pub mod release;
pub mod scope;
pub mod view;

pub use error::ParseError;
pub use mock::{mock_archive, mock_release};
pub use parse::{filter_by_scope, parse_release, parse_release_value};
pub use release::{
    ArchiveItem, Contributor, MediaKind, PeriodType, Release, ReleaseStatus, Section,
    SectionStatus, Settings,
};
pub use scope::{ALL_SCOPES, ScopeOption, list_scopes, scope_label};

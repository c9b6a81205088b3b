//! Canonical data models shared across the application

pub mod asset;
pub mod tree;

pub use asset::{
    AssetRecord, FormattedValue, Pagination, ReturnFormat, Scheme, SearchFilters, SearchQuery,
    DEFAULT_FILE_TYPES, SEARCH_PAGE_LIMIT,
};
pub use tree::{TreeNode, TreeResult};

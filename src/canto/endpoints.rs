//! Canto endpoint URL construction
//!
//! All API URLs hang off `https://{domain}.{api_host}`: JSON endpoints
//! under `/api/v1`, binary endpoints under `/api_binary/v1`.

use crate::models::{Pagination, Scheme, SearchQuery};

#[derive(Debug, Clone)]
pub struct CantoEndpoints {
    domain: String,
    api_host: String,
}

impl CantoEndpoints {
    pub fn new<D: Into<String>, H: Into<String>>(domain: D, api_host: H) -> Self {
        Self {
            domain: domain.into(),
            api_host: api_host.into(),
        }
    }

    fn api_base(&self) -> String {
        format!("https://{}.{}/api/v1", self.domain, self.api_host)
    }

    fn binary_base(&self) -> String {
        format!("https://{}.{}/api_binary/v1", self.domain, self.api_host)
    }

    pub fn search_url(&self, query: &SearchQuery) -> String {
        let file_type = query.filters.to_wire();
        let Pagination { start, limit } = query.pagination;

        if query.keyword.is_empty() {
            format!(
                "{}/search?keyword=&fileType={}&limit={}&start={}",
                self.api_base(),
                urlencoding::encode(&file_type),
                limit,
                start
            )
        } else {
            format!(
                "{}/search?keyword={}&fileType={}&operator=and&limit={}&start={}",
                self.api_base(),
                urlencoding::encode(&query.keyword),
                urlencoding::encode(&file_type),
                limit,
                start
            )
        }
    }

    /// Detail endpoint for one of the three asset shapes
    pub fn detail_url(&self, scheme: Scheme, asset_id: &str) -> String {
        format!("{}/{}/{}", self.api_base(), scheme.as_str(), asset_id)
    }

    pub fn tree_url(&self, parent_id: Option<&str>) -> String {
        match parent_id {
            Some(id) => format!(
                "{}/tree/{}?sortBy=name&sortDirection=ascending",
                self.api_base(),
                id
            ),
            None => format!(
                "{}/tree?sortBy=name&sortDirection=ascending&layer=1",
                self.api_base()
            ),
        }
    }

    pub fn album_url(&self, album_id: &str, query: &SearchQuery) -> String {
        self.container_url("album", album_id, query)
    }

    pub fn folder_url(&self, folder_id: &str, query: &SearchQuery) -> String {
        self.container_url("folder", folder_id, query)
    }

    fn container_url(&self, kind: &str, id: &str, query: &SearchQuery) -> String {
        format!(
            "{}/{}/{}?limit={}&start={}&fileType={}",
            self.api_base(),
            kind,
            id,
            query.pagination.limit,
            query.pagination.start,
            urlencoding::encode(&query.filters.to_wire())
        )
    }

    /// Search constrained to one album, the last listing variant probed
    pub fn album_search_url(&self, album_id: &str, query: &SearchQuery) -> String {
        format!(
            "{}/search?albumId={}&fileType={}&limit={}&start={}",
            self.api_base(),
            urlencoding::encode(album_id),
            urlencoding::encode(&query.filters.to_wire()),
            query.pagination.limit,
            query.pagination.start
        )
    }

    /// Authenticated binary preview, the thumbnail proxy's upstream
    pub fn preview_url(&self, scheme: Scheme, asset_id: &str) -> String {
        format!("{}/{}/{}/preview", self.binary_base(), scheme.as_str(), asset_id)
    }

    /// Download URL constructed when the API record carries none
    pub fn download_url(&self, scheme: Scheme, asset_id: &str) -> String {
        match scheme {
            Scheme::Image => format!(
                "{}/advance/image/{}/download/directuri?type=jpg&dpi=72",
                self.binary_base(),
                asset_id
            ),
            Scheme::Video | Scheme::Document => format!(
                "{}/{}/{}/download",
                self.binary_base(),
                scheme.as_str(),
                asset_id
            ),
        }
    }
}

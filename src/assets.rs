use rust_embed::RustEmbed;

/// Embedded static assets (placeholder thumbnails)
#[derive(RustEmbed)]
#[folder = "assets/"]
#[prefix = "assets/"]
pub struct StaticAssets;

impl StaticAssets {
    /// Get a static asset by path
    pub fn get_asset(path: &str) -> Option<rust_embed::EmbeddedFile> {
        Self::get(path)
    }

    /// Get the content type for a given file extension
    pub fn get_content_type(path: &str) -> &'static str {
        match path.split('.').next_back() {
            Some("svg") => "image/svg+xml; charset=utf-8",
            Some("png") => "image/png",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("gif") => "image/gif",
            Some("ico") => "image/x-icon",
            _ => "application/octet-stream",
        }
    }
}

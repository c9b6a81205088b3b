//! OpenAPI documentation

use utoipa::OpenApi;

use crate::models::{AssetRecord, ReturnFormat, Scheme, TreeNode, TreeResult};
use crate::web::handlers;
use crate::web::handlers::search::SearchRequest;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "canto-bridge API",
        description = "Asset search, resolution and browse endpoints backing the Canto form field"
    ),
    paths(
        handlers::search::search_assets,
        handlers::search::find_by_filename,
        handlers::search::format_value,
        handlers::assets::get_asset,
        handlers::assets::clear_cache,
        handlers::tree::get_tree_root,
        handlers::tree::get_tree,
        handlers::tree::get_album_assets,
    ),
    components(schemas(
        AssetRecord,
        Scheme,
        ReturnFormat,
        TreeNode,
        TreeResult,
        SearchRequest,
    )),
    tags(
        (name = "assets", description = "Asset search and resolution"),
        (name = "browse", description = "Folder tree and album navigation"),
        (name = "cache", description = "Cache administration"),
    )
)]
pub struct ApiDoc;

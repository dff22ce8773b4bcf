use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error for {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unrecognized catalog export shape in {context}: expected a product array or a products connection")]
    UnrecognizedCatalog { context: String },

    #[error("normalization error for product {product_id}: {reason}")]
    Normalization { product_id: String, reason: String },

    #[error("taxonomy dataset error in {path}: {source}")]
    Taxonomy {
        path: String,
        #[source]
        source: csv::Error,
    },
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Invalid target URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Unsupported scheme '{scheme}' in target URL '{url}'. Use http or https.")]
    UnsupportedScheme { url: String, scheme: String },
    #[error("Failed to build HTTP client: {source}")]
    BuildClientFailed {
        #[source]
        source: reqwest::Error,
    },
}

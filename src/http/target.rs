use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::error::HttpError;

/// Endpoint hit when no `--url` override is given.
pub const DEFAULT_TARGET_URL: &str = "http://payment-options-service.i.s-go-gp-eks-01-a6ff5941.gopay.sh/payment-options-service/payment-options";

const INTENT_PARAM: &str = "intent";
const INTENT_VALUE: &str = "GOPAY_WALLET_INTENT";
const USER_ID_HEADER: &str = "user-id";
const USER_ID: &str = "22102721471112340001250790";
const USER_LOCALE_HEADER: &str = "x-user-locale";
const USER_LOCALE: &str = "en_ID";

/// Fully resolved request target: the endpoint plus the fixed intent query
/// parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    url: Url,
}

impl Target {
    /// Parses an http(s) endpoint and appends the fixed query parameter.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL cannot be parsed or is not http/https.
    pub fn parse(raw: &str) -> Result<Self, HttpError> {
        let mut url = Url::parse(raw).map_err(|err| HttpError::InvalidUrl {
            url: raw.to_owned(),
            source: err,
        })?;
        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(HttpError::UnsupportedScheme {
                    url: raw.to_owned(),
                    scheme: other.to_owned(),
                });
            }
        }
        url.query_pairs_mut()
            .append_pair(INTENT_PARAM, INTENT_VALUE);
        Ok(Self { url })
    }

    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Headers sent with every request.
    #[must_use]
    pub fn headers() -> HeaderMap {
        let mut headers = HeaderMap::with_capacity(3);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            HeaderName::from_static(USER_ID_HEADER),
            HeaderValue::from_static(USER_ID),
        );
        headers.insert(
            HeaderName::from_static(USER_LOCALE_HEADER),
            HeaderValue::from_static(USER_LOCALE),
        );
        headers
    }
}

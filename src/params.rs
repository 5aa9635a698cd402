//! Share-image request parsing
//!
//! Extracts and validates the query parameters of an image request.
//! Parsing is a pure function of the raw query string; validation happens
//! once here so the renderer never sees a partial request.

use percent_encoding::percent_decode_str;
use std::borrow::Cow;

/// Query parameters that must be present and non-empty for a render
pub const REQUIRED_PARAMS: &[&str] = &["brand", "model", "price"];

/// A validated share-image request, one per HTTP request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareImageRequest {
    pub brand: String,
    pub model: String,
    /// Trim level line; empty means "omit the trim line"
    pub trim: String,
    /// Pre-formatted display price (formatting is the caller's job)
    pub price: String,
    /// Signed percentage-like string; the leading sign drives rendering
    pub change: Option<String>,
}

/// Parse and validate a raw query string.
///
/// Returns `None` when any of `brand`, `model`, `price` is missing or
/// empty. The caller must treat that as a client error, never as an
/// internal fault.
///
/// Keys are matched exactly and case-sensitively. Values are
/// percent-decoded; a literal `+` is kept as-is (it is the sign of a
/// `change` value, not a space).
pub fn parse(query: Option<&str>) -> Option<ShareImageRequest> {
    let mut brand = None;
    let mut model = None;
    let mut trim = None;
    let mut price = None;
    let mut change = None;

    for (key, value) in query_pairs(query.unwrap_or("")) {
        match key.as_ref() {
            "brand" => brand = Some(value.into_owned()),
            "model" => model = Some(value.into_owned()),
            "trim" => trim = Some(value.into_owned()),
            "price" => price = Some(value.into_owned()),
            "change" => change = Some(value.into_owned()),
            _ => {}
        }
    }

    let brand = brand.filter(|v| !v.is_empty())?;
    let model = model.filter(|v| !v.is_empty())?;
    let price = price.filter(|v| !v.is_empty())?;

    Some(ShareImageRequest {
        brand,
        model,
        trim: trim.unwrap_or_default(),
        price,
        // Present-but-empty behaves like absent
        change: change.filter(|v| !v.is_empty()),
    })
}

/// Split a query string into decoded key/value pairs.
///
/// Invalid percent sequences pass through unchanged (e.g. the `%` in
/// a bare "5.2%").
fn query_pairs(query: &str) -> impl Iterator<Item = (Cow<'_, str>, Cow<'_, str>)> {
    query.split('&').filter(|pair| !pair.is_empty()).map(|pair| {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        (
            percent_decode_str(key).decode_utf8_lossy(),
            percent_decode_str(value).decode_utf8_lossy(),
        )
    })
}

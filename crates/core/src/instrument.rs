//! Per-recipient HTML instrumentation.
//!
//! Rewrites a campaign's raw HTML into the payload actually delivered to one
//! recipient: an open-tracking beacon, click-tracking redirects on every
//! absolute http(s) link, and an unsubscribe footer. The campaign HTML itself
//! is never validated or otherwise modified.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::DbId;

/// First case-insensitive `</body>` is the insertion point for the beacon
/// and the unsubscribe footer. Any further body-close tags are left intact.
static BODY_CLOSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</body>").expect("valid regex"));

/// Absolute http(s) hrefs get the click-tracking treatment. `mailto:`,
/// fragment, and relative links do not match and pass through untouched.
static HREF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)href="(https?://[^"]+)""#).expect("valid regex"));

/// Build the instrumented HTML for one recipient.
///
/// Insertion order is fixed: the open beacon lands before the first
/// `</body>`, then every absolute link is rewritten, then the unsubscribe
/// footer is inserted before that same close tag (so it renders after the
/// beacon). Documents without a body tag get both fragments appended.
pub fn instrument_html(
    html: &str,
    campaign_id: DbId,
    email: &str,
    base_url: &str,
    unsubscribe_token: &str,
) -> String {
    // The address goes into query strings, so characters like `+` in the
    // local part must be percent-encoded or they decode back as spaces.
    let email = urlencoding::encode(email);

    let beacon = format!(
        "<img src=\"{base_url}/api/v1/t/open?campaign_id={campaign_id}&email={email}\" \
         width=\"1\" height=\"1\" style=\"display:none;\" />"
    );
    let html = insert_before_body_close(html, &beacon);

    let html = rewrite_links(&html, campaign_id, &email, base_url);

    let footer = format!(
        "<div style=\"text-align:center;margin-top:20px;padding:10px;color:#999;font-size:12px;\">\
         <a href=\"{base_url}/unsubscribe/{unsubscribe_token}?email={email}&campaign_id={campaign_id}\" \
         style=\"color:#999;\">Unsubscribe</a></div>"
    );
    insert_before_body_close(&html, &footer)
}

/// Rewrite every absolute http(s) hyperlink to the click-tracking endpoint,
/// carrying the original destination percent-encoded in the `url` parameter.
/// `email` arrives already encoded.
fn rewrite_links(html: &str, campaign_id: DbId, email: &str, base_url: &str) -> String {
    HREF_RE
        .replace_all(html, |caps: &regex::Captures<'_>| {
            let original = urlencoding::encode(&caps[1]);
            format!(
                "href=\"{base_url}/api/v1/t/click?campaign_id={campaign_id}&email={email}&url={original}\""
            )
        })
        .into_owned()
}

/// Insert `fragment` immediately before the first `</body>` (any casing).
/// Falls back to appending when the document has no body-close tag.
fn insert_before_body_close(html: &str, fragment: &str) -> String {
    match BODY_CLOSE_RE.find(html) {
        Some(m) => {
            let mut out = String::with_capacity(html.len() + fragment.len() + 1);
            out.push_str(&html[..m.start()]);
            out.push_str(fragment);
            out.push('\n');
            out.push_str(&html[m.start()..]);
            out
        }
        None => format!("{html}\n{fragment}"),
    }
}

//! Share-image SVG rendering
//!
//! Turns a validated [`ShareImageRequest`] into a complete, self-contained
//! SVG document at the standard 1200x630 social-preview size. Rendering is
//! total: any parsed request produces a document. All free text is escaped
//! before it is embedded, so the output stays well-formed for any input.

use crate::params::ShareImageRequest;

/// Canvas size, the standard Open-Graph preview aspect ratio
pub const CANVAS_WIDTH: u32 = 1200;
pub const CANVAS_HEIGHT: u32 = 630;

/// Accent color used for the top bar, logo block and price
pub const ACCENT_COLOR: &str = "#f59e0b";
/// Price went up
pub const INCREASE_COLOR: &str = "#ef4444";
/// Price went down
pub const DECREASE_COLOR: &str = "#4ade80";
/// Change present but no recognized sign
pub const NEUTRAL_COLOR: &str = "#9ca3af";

const SITE_NAME: &str = "otofiyat.com";
const FONT_STACK: &str = "Arial, Helvetica, sans-serif";

// Fixed y-coordinates. The trim line has a reserved slot whether it is
// shown or not, so its presence never shifts another element.
const HEADLINE_Y: u32 = 300;
const TRIM_Y: u32 = 356;
const PRICE_Y: u32 = 470;
const CHANGE_Y: u32 = 545;

/// Escape the five markup special characters for embedding in text content.
pub fn escape_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Color and display text for the price-change indicator.
///
/// Only the first matched sign character is stripped; the remainder
/// (including any further signs) passes through unchanged.
fn change_indicator(change: &str) -> (&'static str, String) {
    if let Some(rest) = change.strip_prefix('+') {
        (INCREASE_COLOR, format!("\u{2191} {}", escape_text(rest)))
    } else if let Some(rest) = change.strip_prefix('-') {
        (DECREASE_COLOR, format!("\u{2193} {}", escape_text(rest)))
    } else {
        (NEUTRAL_COLOR, escape_text(change))
    }
}

/// Render a share image as a complete SVG document.
pub fn render(request: &ShareImageRequest) -> String {
    let headline = escape_text(&format!("{} {}", request.brand, request.model));
    let price = escape_text(&request.price);

    let mut svg = String::with_capacity(2048);
    svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{CANVAS_WIDTH}\" height=\"{CANVAS_HEIGHT}\" viewBox=\"0 0 {CANVAS_WIDTH} {CANVAS_HEIGHT}\">\n"
    ));

    // Background: solid black with a diagonal dark gradient overlay
    svg.push_str("<defs>\n");
    svg.push_str("<linearGradient id=\"bg\" x1=\"0\" y1=\"0\" x2=\"1\" y2=\"1\">\n");
    svg.push_str("<stop offset=\"0\" stop-color=\"#1f2937\" stop-opacity=\"0.85\"/>\n");
    svg.push_str("<stop offset=\"1\" stop-color=\"#000000\" stop-opacity=\"0\"/>\n");
    svg.push_str("</linearGradient>\n");
    svg.push_str("</defs>\n");
    svg.push_str(&format!(
        "<rect width=\"{CANVAS_WIDTH}\" height=\"{CANVAS_HEIGHT}\" fill=\"#000000\"/>\n"
    ));
    svg.push_str(&format!(
        "<rect width=\"{CANVAS_WIDTH}\" height=\"{CANVAS_HEIGHT}\" fill=\"url(#bg)\"/>\n"
    ));

    // Accent bar across the top edge
    svg.push_str(&format!(
        "<rect width=\"{CANVAS_WIDTH}\" height=\"8\" fill=\"{ACCENT_COLOR}\"/>\n"
    ));

    // Logo block and site name
    svg.push_str(&format!(
        "<rect x=\"60\" y=\"56\" width=\"56\" height=\"56\" rx=\"12\" fill=\"{ACCENT_COLOR}\"/>\n"
    ));
    svg.push_str(&format!(
        "<text x=\"88\" y=\"96\" font-family=\"{FONT_STACK}\" font-size=\"36\" font-weight=\"700\" fill=\"#000000\" text-anchor=\"middle\">\u{20ba}</text>\n"
    ));
    svg.push_str(&format!(
        "<text x=\"132\" y=\"94\" font-family=\"{FONT_STACK}\" font-size=\"30\" font-weight=\"600\" fill=\"#ffffff\">{SITE_NAME}</text>\n"
    ));

    // Headline: brand and model joined with a single space
    svg.push_str(&format!(
        "<text x=\"60\" y=\"{HEADLINE_Y}\" font-family=\"{FONT_STACK}\" font-size=\"64\" font-weight=\"700\" fill=\"#ffffff\">{headline}</text>\n"
    ));

    // Trim line occupies a reserved slot; omitted entirely when empty
    if !request.trim.is_empty() {
        let trim = escape_text(&request.trim);
        svg.push_str(&format!(
            "<text x=\"60\" y=\"{TRIM_Y}\" font-family=\"{FONT_STACK}\" font-size=\"32\" fill=\"#cbd5e1\">{trim}</text>\n"
        ));
    }

    // Price is the dominant numeric element
    svg.push_str(&format!(
        "<text x=\"60\" y=\"{PRICE_Y}\" font-family=\"{FONT_STACK}\" font-size=\"88\" font-weight=\"700\" fill=\"{ACCENT_COLOR}\">{price}</text>\n"
    ));

    if let Some(change) = &request.change {
        let (color, text) = change_indicator(change);
        svg.push_str(&format!(
            "<text x=\"60\" y=\"{CHANGE_Y}\" font-family=\"{FONT_STACK}\" font-size=\"40\" font-weight=\"600\" fill=\"{color}\">{text}</text>\n"
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(trim: &str, change: Option<&str>) -> ShareImageRequest {
        ShareImageRequest {
            brand: "Volkswagen".to_string(),
            model: "Golf".to_string(),
            trim: trim.to_string(),
            price: "1.250.000\u{20ba}".to_string(),
            change: change.map(String::from),
        }
    }

    #[test]
    fn test_render_is_well_formed_document() {
        let svg = render(&request("1.5TSI", Some("+5.2%")));
        assert!(svg.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert_eq!(svg.matches("<svg ").count(), 1);
        assert_eq!(svg.matches("</svg>").count(), 1);
        assert!(svg.trim_end().ends_with("</svg>"));
        // Self-contained: no external references
        assert!(!svg.contains("href="));
        assert!(!svg.contains("url(http"));
    }

    #[test]
    fn test_render_full_example() {
        let svg = render(&request("1.5TSI", Some("+5.2%")));
        assert!(svg.contains(">Volkswagen Golf</text>"));
        assert!(svg.contains(">1.5TSI</text>"));
        assert!(svg.contains(">1.250.000\u{20ba}</text>"));
        assert!(svg.contains(">\u{2191} 5.2%</text>"));
        assert!(svg.contains(INCREASE_COLOR));
    }

    #[test]
    fn test_change_increase() {
        let (color, text) = change_indicator("+5.2%");
        assert_eq!(color, INCREASE_COLOR);
        assert_eq!(text, "\u{2191} 5.2%");
    }

    #[test]
    fn test_change_decrease() {
        let (color, text) = change_indicator("-3.1%");
        assert_eq!(color, DECREASE_COLOR);
        assert_eq!(text, "\u{2193} 3.1%");
    }

    #[test]
    fn test_change_neutral() {
        let (color, text) = change_indicator("5.2%");
        assert_eq!(color, NEUTRAL_COLOR);
        assert_eq!(text, "5.2%");
        assert!(!text.contains('\u{2191}'));
        assert!(!text.contains('\u{2193}'));
    }

    #[test]
    fn test_change_strips_first_sign_only() {
        // Residual signs beyond the first pass through unchanged
        let (color, text) = change_indicator("+-5%");
        assert_eq!(color, INCREASE_COLOR);
        assert_eq!(text, "\u{2191} -5%");
    }

    #[test]
    fn test_change_absent_emits_nothing() {
        let svg = render(&request("", None));
        assert!(!svg.contains('\u{2191}'));
        assert!(!svg.contains('\u{2193}'));
        assert!(!svg.contains(INCREASE_COLOR));
        assert!(!svg.contains(DECREASE_COLOR));
        assert!(!svg.contains(NEUTRAL_COLOR));
    }

    #[test]
    fn test_trim_presence_shifts_nothing() {
        let with_trim = render(&request("1.5TSI", Some("+5.2%")));
        let without_trim = render(&request("", Some("+5.2%")));

        let stripped: Vec<&str> = with_trim
            .lines()
            .filter(|line| !line.contains(">1.5TSI</text>"))
            .collect();
        let expected: Vec<&str> = without_trim.lines().collect();
        assert_eq!(stripped, expected);
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(
            escape_text("a&b<c>d\"e'f"),
            "a&amp;b&lt;c&gt;d&quot;e&#39;f"
        );
        assert_eq!(escape_text("1.250.000\u{20ba}"), "1.250.000\u{20ba}");
    }

    #[test]
    fn test_render_escapes_injection_attempts() {
        let req = ShareImageRequest {
            brand: "<script>alert(1)</script>".to_string(),
            model: "\"/><rect".to_string(),
            trim: "O'Neill & Sons".to_string(),
            price: "<1.000.000".to_string(),
            change: Some("+<5%".to_string()),
        };
        let svg = render(&req);
        assert!(!svg.contains("<script>"));
        assert!(!svg.contains("\"/><rect"));
        assert!(svg.contains("&lt;script&gt;"));
        assert!(svg.contains("O&#39;Neill &amp; Sons"));
        assert!(svg.contains("&lt;1.000.000"));
        assert!(svg.contains("\u{2191} &lt;5%"));
    }
}

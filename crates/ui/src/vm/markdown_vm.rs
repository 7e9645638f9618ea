use std::collections::{HashMap, HashSet};

/// Render model output as sanitized HTML.
#[must_use]
pub fn markdown_to_html(input: &str) -> String {
    let mut options = pulldown_cmark::Options::empty();
    options.insert(pulldown_cmark::Options::ENABLE_STRIKETHROUGH);
    options.insert(pulldown_cmark::Options::ENABLE_TABLES);

    let parser = pulldown_cmark::Parser::new_ext(input, options);
    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, parser);
    sanitize_html(&html)
}

#[must_use]
pub fn sanitize_html(html: &str) -> String {
    let tags: HashSet<&str> = [
        "p", "div", "span", "br", "em", "strong", "b", "i", "del", "code", "pre", "blockquote",
        "ul", "ol", "li", "a", "h1", "h2", "h3", "h4", "table", "thead", "tbody", "tr", "th", "td",
    ]
    .into_iter()
    .collect();

    let mut attributes: HashMap<&str, HashSet<&str>> = HashMap::new();
    attributes.insert("a", ["href"].into_iter().collect());

    ammonia::Builder::new()
        .tags(tags)
        .tag_attributes(attributes)
        .clean(html)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::{markdown_to_html, sanitize_html};

    #[test]
    fn renders_common_markdown() {
        let html = markdown_to_html("## Subject\n\n**Wins**\n\n- ship docs\n- fix build");
        assert!(html.contains("<h2>Subject</h2>"));
        assert!(html.contains("<strong>Wins</strong>"));
        assert!(html.contains("<li>ship docs</li>"));
    }

    #[test]
    fn strips_scripts_and_handlers() {
        let html = markdown_to_html("hi <script>alert(1)</script><img src=x onerror=alert(1)>");
        assert!(!html.contains("script"));
        assert!(!html.contains("onerror"));
        assert!(html.contains("hi"));
    }

    #[test]
    fn keeps_only_safe_link_attributes() {
        let html = sanitize_html(r#"<a href="https://example.com" onclick="x()">link</a>"#);
        assert!(html.contains(r#"href="https://example.com""#));
        assert!(!html.contains("onclick"));
    }
}

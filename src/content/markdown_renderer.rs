use std::collections::HashSet;
use std::io;
use std::io::ErrorKind;

use lazy_static::lazy_static;
use markdown::Options;
use regex::{Captures, Regex};

use crate::content::parsing_utils::remove_comments;
use crate::toc::UniqueSlugs;

lazy_static! {
    static ref HEADING_TAG_REGEX: Regex = Regex::new(r"<h([1-6])>(.*?)</h[1-6]>").unwrap();
    static ref HEADING_ID_REGEX: Regex = Regex::new(r#"<h[1-6][^>]*\sid="([^"]*)""#).unwrap();
    static ref TAG_REGEX: Regex = Regex::new(r"<[^>]+>").unwrap();
}

/// Deepest heading level that receives an id attribute.
const MAX_ANCHORED_LEVEL: u8 = 4;

/// GFM to HTML, with `id` attributes on `h1`..`h4` derived the same way the
/// table of contents derives them.
pub fn render_markdown(md_text: &str) -> io::Result<String> {
    let buf = remove_comments(md_text)?;

    let mut options = Options::gfm();
    // Articles are compiled in, inline HTML is trusted
    options.compile.allow_dangerous_html = true;

    let html = match markdown::to_html_with_options(buf.as_str(), &options) {
        Ok(x) => x,
        Err(e) => return Err(io::Error::new(ErrorKind::InvalidInput, e.reason.as_str())),
    };

    Ok(anchor_headings(&html))
}

fn anchor_headings(html: &str) -> String {
    let mut slugs = UniqueSlugs::new();
    HEADING_TAG_REGEX.replace_all(html, |cap: &Captures| {
        let level: u8 = cap[1].parse().unwrap_or(6);
        let inner = &cap[2];
        let text = heading_text(inner);
        if text.trim().is_empty() {
            return cap[0].to_string();
        }
        // h5/h6 still consume their slug so later ids line up with the outline
        let id = slugs.next_id(&text);
        if level <= MAX_ANCHORED_LEVEL {
            format!(r#"<h{level} id="{id}">{inner}</h{level}>"#)
        } else {
            cap[0].to_string()
        }
    }).into_owned()
}

/// Plain text of a rendered heading: tags stripped, basic entities decoded.
fn heading_text(inner_html: &str) -> String {
    TAG_REGEX.replace_all(inner_html, "")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Ids carried by heading elements of a rendered document.
pub fn rendered_heading_ids(html: &str) -> HashSet<String> {
    HEADING_ID_REGEX.captures_iter(html)
        .map(|cap| cap[1].to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_with_ids() -> io::Result<()> {
        let html = render_markdown("# Title\n\nSome *text*.\n\n## Why TypeScript with React?\n")?;
        assert!(html.starts_with("<h1 id=\"title\">Title</h1>\n<p>Some <em>text</em>.</p>\n"));
        assert!(html.contains("<h2 id=\"why-typescript-with-react\">Why TypeScript with React?</h2>"));
        Ok(())
    }

    #[test]
    fn test_deep_headings_have_no_id() -> io::Result<()> {
        let html = render_markdown("#### Four\n\n##### Five\n\n###### Six\n")?;
        assert!(html.contains("<h4 id=\"four\">Four</h4>"));
        assert!(html.contains("<h5>Five</h5>"));
        assert!(html.contains("<h6>Six</h6>"));
        assert_eq!(rendered_heading_ids(&html), ["four".to_string()].into_iter().collect());
        Ok(())
    }

    #[test]
    fn test_inline_markup_in_heading() -> io::Result<()> {
        let html = render_markdown("### `useState` & friends\n")?;
        assert!(html.contains("id=\"usestate-friends\""));
        Ok(())
    }

    #[test]
    fn test_code_fence_is_not_a_heading() -> io::Result<()> {
        let html = render_markdown("```bash\n# install\nnpm i\n```\n")?;
        assert!(rendered_heading_ids(&html).is_empty());
        Ok(())
    }

    #[test]
    fn test_repeated_headings() -> io::Result<()> {
        let html = render_markdown("## Notes\n\n## Notes\n")?;
        let ids = rendered_heading_ids(&html);
        assert!(ids.contains("notes"));
        assert!(ids.contains("notes-1"));
        Ok(())
    }

    #[test]
    fn test_comments_removed() -> io::Result<()> {
        let html = render_markdown("Visible<!-- hidden -->\n")?;
        assert_eq!(html.trim_end(), "<p>Visible</p>");
        Ok(())
    }

    #[test]
    fn test_empty_heading_takes_no_id() -> io::Result<()> {
        let html = render_markdown("#\n\n## Notes\n")?;
        assert!(html.contains("<h1></h1>"));
        assert_eq!(rendered_heading_ids(&html), ["notes".to_string()].into_iter().collect());
        Ok(())
    }

    #[test]
    fn test_heading_text() {
        assert_eq!(heading_text("<code>a &amp; b</code> &lt;c&gt;"), "a & b <c>");
    }
}

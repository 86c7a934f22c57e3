use std::io;

use crate::content::markdown_renderer::{render_markdown, rendered_heading_ids};
use crate::content::Post;
use crate::toc::{extract_headings, filter_rendered, HeadingEntry};

/// Article body ready for the page, with the outline restricted to the
/// headings that can actually be scrolled to.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedArticle {
    pub html: String,
    pub toc: Vec<HeadingEntry>,
}

pub fn render_article(post: &Post) -> io::Result<RenderedArticle> {
    let html = render_markdown(&post.content)?;
    let toc = filter_rendered(extract_headings(&post.content), &rendered_heading_ids(&html));
    Ok(RenderedArticle { html, toc })
}

#[cfg(test)]
mod tests {
    use crate::content::content_store::ContentStore;
    use crate::test_data::sample_post;

    use super::*;

    #[test]
    fn test_render_embedded_article() -> io::Result<()> {
        let store = ContentStore::load()?;
        let post = store.get("1").unwrap();
        let article = render_article(post)?;

        assert!(article.html.contains("<h1 id=\"getting-started-with-react-and-typescript\">"));
        let ids: Vec<&str> = article.toc.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids.first(), Some(&"getting-started-with-react-and-typescript"));
        assert!(ids.contains(&"why-typescript-with-react"));
        assert!(ids.contains(&"props-typing"));
        assert!(ids.contains(&"conclusion"));
        // shell comments in the setup snippet are not part of the outline
        assert!(!ids.contains(&"create-a-new-react-app-with-typescript"));
        assert!(!ids.contains(&"or-with-vite-faster-alternative"));
        Ok(())
    }

    #[test]
    fn test_every_outline_entry_is_rendered() -> io::Result<()> {
        let store = ContentStore::load()?;
        for post in store.posts() {
            let article = render_article(post)?;
            let rendered = rendered_heading_ids(&article.html);
            assert!(!article.toc.is_empty());
            assert!(article.toc.iter().all(|h| rendered.contains(&h.id)));
        }
        Ok(())
    }

    #[test]
    fn test_shell_comment_sharing_a_heading_slug() -> io::Result<()> {
        let mut post = sample_post("9", "Guide", &[]);
        post.content = "# Guide\n\n```bash\n# Setup\n./configure\n```\n\n## Setup\n\n## Setup\n".to_string();

        let article = render_article(&post)?;
        assert!(article.html.contains("<h2 id=\"setup\">Setup</h2>"));
        assert!(article.html.contains("<h2 id=\"setup-1\">Setup</h2>"));

        let levels: Vec<u8> = article.toc.iter().map(|h| h.level).collect();
        let ids: Vec<&str> = article.toc.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(levels, [1, 2, 2]);
        assert_eq!(ids, ["guide", "setup", "setup-1"]);
        Ok(())
    }
}

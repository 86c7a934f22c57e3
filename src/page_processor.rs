use std::io;
use std::io::ErrorKind;
use std::path::Path;

use crate::ad_slot::{embed, Placement};
use crate::comments::CommentTree;
use crate::config::Config;
use crate::content::content_store::ContentStore;
use crate::content::Post;
use crate::content_cache::ContentCache;
use crate::post_render::{render_article, RenderedArticle};
use crate::related::related_posts;
use crate::search::search;
use crate::view::home_renderer::HomeRenderer;
use crate::view::post_renderer::{ArticleView, PostRenderer};
use crate::view::search_renderer::SearchRenderer;
use crate::view::subscribe_renderer::{SubscribeRenderer, SubscribeView};

pub fn read_template(tpl_dir: &Path, file_name: &str) -> io::Result<String> {
    let full_path = tpl_dir.join(file_name);
    match std::fs::read_to_string(&full_path) {
        Ok(src) => Ok(src),
        Err(e) => Err(io::Error::new(e.kind(), format!("Error loading template {}: {}", full_path.display(), e))),
    }
}

pub fn render_home(config: &Config, store: &ContentStore) -> io::Result<String> {
    let tpl_src = read_template(&config.paths.template_dir, "index.tpl")?;
    let renderer = HomeRenderer::new(&tpl_src)?;
    let ad_slot = embed(config.ads.as_ref(), Placement::Home);

    Ok(renderer.render(&config.site, store.featured(), store.recent(), &ad_slot))
}

/// Full article page. The markdown of each post is rendered once when the
/// rendering cache is enabled.
pub fn render_post_page(config: &Config,
                        store: &ContentStore,
                        articles: &mut ContentCache<RenderedArticle>,
                        post: &Post,
                        comments: &CommentTree) -> io::Result<String> {
    let tpl_src = read_template(&config.paths.template_dir, "view.tpl")?;
    let renderer = PostRenderer::new(&tpl_src)?;

    let article = articles.get_or_try_add(&post.id.0, || render_article(post))?;
    let related = related_posts(&post.id.0, &post.tags, store.posts(), config.defaults.related_limit);
    let ad_slot = embed(config.ads.as_ref(), Placement::Article);

    let view = ArticleView {
        post,
        article: &article,
        related: &related,
        comments,
        toc_offset: config.defaults.toc_offset,
        ad_slot: &ad_slot,
    };
    Ok(renderer.render(&config.site, &view))
}

pub fn render_search(config: &Config, store: &ContentStore, query: &str) -> io::Result<String> {
    let tpl_src = read_template(&config.paths.template_dir, "search.tpl")?;
    let renderer = SearchRenderer::new(&tpl_src)?;

    let results = search(query, store.posts());
    let ad_slot = embed(config.ads.as_ref(), Placement::Search);

    Ok(renderer.render(&config.site, query, &results, &ad_slot))
}

pub fn render_subscribe(config: &Config, view: SubscribeView) -> io::Result<String> {
    let tpl_src = read_template(&config.paths.template_dir, "subscribe.tpl")?;
    let renderer = SubscribeRenderer::new(&tpl_src)?;
    Ok(renderer.render(&config.site, view))
}

/// Name shown on a comment, falling back to the configured author when the
/// form leaves it blank.
pub fn comment_author<'a>(config: &'a Config, author: Option<&'a str>) -> &'a str {
    match author.map(str::trim) {
        Some(author) if !author.is_empty() => author,
        _ => config.comments.default_author.as_str(),
    }
}

pub fn not_found(what: &str, id: &str) -> io::Error {
    io::Error::new(ErrorKind::NotFound, format!("{} {} not found", what, id))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::config::parse_config;

    use super::*;

    fn test_config() -> Config {
        let mut config = parse_config(r##"
[site]
title = "TechGlobe"
tagline = "Web development, programming tutorials and tech insights"

[paths]
template_dir = "res/template"
public_dir = "res/public"

[defaults]
rendering_cache_enabled = true

[server]
address = "127.0.0.1"
port = 8001
"##).unwrap();
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        config.paths.template_dir = root.join("res/template");
        config.paths.public_dir = root.join("res/public");
        config
    }

    #[test]
    fn test_comment_author() {
        let config = test_config();
        assert_eq!(comment_author(&config, Some(" Dana ")), "Dana");
        assert_eq!(comment_author(&config, Some("  ")), "You");
        assert_eq!(comment_author(&config, None), "You");
    }

    #[test]
    fn test_render_home() -> io::Result<()> {
        let config = test_config();
        let store = ContentStore::load()?;
        let html = render_home(&config, &store)?;
        assert!(html.contains("TechGlobe"));
        assert!(html.contains("/blog/1"));
        assert!(html.contains("/blog/3"));
        Ok(())
    }

    #[test]
    fn test_render_post_page_uses_cache() -> io::Result<()> {
        let config = test_config();
        let store = ContentStore::load()?;
        let mut articles = ContentCache::new();
        let post = store.get("2").unwrap();
        let comments = CommentTree::seed()?;

        let html = render_post_page(&config, &store, &mut articles, post, &comments)?;
        assert!(html.contains(&post.title));
        assert!(html.contains("Alex Thompson"));
        assert!(articles.get("2").is_some());
        Ok(())
    }

    #[test]
    fn test_render_search() -> io::Result<()> {
        let config = test_config();
        let store = ContentStore::load()?;
        let html = render_search(&config, &store, "css")?;
        assert!(html.contains("/blog/2"));
        assert!(!html.contains("/blog/3\""));
        Ok(())
    }

    #[test]
    fn test_missing_template() {
        let err = read_template(Path::new("/nonexistent"), "index.tpl").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}

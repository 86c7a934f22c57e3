use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::content::Post;
use crate::text_utils::format_long_date;

pub mod home_renderer;
pub mod post_renderer;
pub mod search_renderer;
pub mod subscribe_renderer;

#[derive(ramhorns::Content)]
pub struct ViewTag<'a> {
    pub tag: &'a str,
}

/// Summary of a post as shown in feeds, search results and related posts.
#[derive(ramhorns::Content)]
pub struct PostCard<'a> {
    pub link: String,
    pub title: &'a str,
    pub excerpt: &'a str,
    pub author: &'a str,
    pub date: String,
    pub read_time: String,
    pub image_url: &'a str,
    pub tags: Vec<ViewTag<'a>>,
}

impl<'a> PostCard<'a> {
    pub fn new(post: &'a Post) -> Self {
        PostCard {
            link: post_link(&post.id.0),
            title: post.title.as_str(),
            excerpt: post.excerpt.as_str(),
            author: post.author.as_str(),
            date: format_long_date(&post.published_at),
            read_time: format!("{} min read", post.read_time),
            image_url: post.image_url.as_str(),
            tags: view_tags(&post.tags),
        }
    }
}

pub fn view_tags(tags: &[String]) -> Vec<ViewTag<'_>> {
    tags.iter().map(|t| ViewTag { tag: t.as_str() }).collect()
}

pub fn post_link(id: &str) -> String {
    format!("/blog/{}", id)
}

pub(crate) fn parse_template<'a>(src: &'a str, name: &str) -> io::Result<Template<'a>> {
    match Template::new(src) {
        Ok(x) => Ok(x),
        Err(e) => Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing {} template: {}", name, e))),
    }
}

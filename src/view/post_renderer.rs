use std::io;

use chrono::{DateTime, Utc};
use ramhorns::Template;

use crate::comments::{CommentBody, CommentTree, Vote};
use crate::config::Site;
use crate::content::Post;
use crate::post_render::RenderedArticle;
use crate::text_utils::format_long_date;
use crate::view::{parse_template, view_tags, PostCard, ViewTag};

#[derive(ramhorns::Content)]
struct ViewHeading<'a> {
    id: &'a str,
    text: &'a str,
    level: String,
}

#[derive(ramhorns::Content)]
struct ViewReply<'a> {
    id: &'a str,
    post_id: &'a str,
    author: &'a str,
    initial: String,
    content: &'a str,
    timestamp: String,
    score: String,
    up_voted: bool,
    down_voted: bool,
}

#[derive(ramhorns::Content)]
struct ViewComment<'a> {
    id: &'a str,
    post_id: &'a str,
    author: &'a str,
    initial: String,
    content: &'a str,
    timestamp: String,
    score: String,
    up_voted: bool,
    down_voted: bool,
    replies: Vec<ViewReply<'a>>,
}

#[derive(ramhorns::Content)]
struct ArticlePage<'a> {
    site_title: &'a str,
    id: &'a str,
    title: &'a str,
    author: &'a str,
    date: String,
    read_time: String,
    image_url: &'a str,
    tags: Vec<ViewTag<'a>>,
    post_content: &'a str,
    has_toc: bool,
    toc: Vec<ViewHeading<'a>>,
    toc_offset: String,
    has_related: bool,
    related: Vec<PostCard<'a>>,
    comment_count: String,
    comments: Vec<ViewComment<'a>>,
    ad_slot: &'a str,
}

/// Everything shown around the article body.
pub struct ArticleView<'a> {
    pub post: &'a Post,
    pub article: &'a RenderedArticle,
    pub related: &'a [&'a Post],
    pub comments: &'a CommentTree,
    pub toc_offset: f64,
    pub ad_slot: &'a str,
}

pub struct PostRenderer<'a> {
    pub template: Template<'a>,
}

fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%b %-d, %Y at %H:%M").to_string()
}

fn initial(author: &str) -> String {
    author.chars().next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}

// Only positive scores are displayed next to the up button
fn score(votes: i64) -> String {
    if votes > 0 { votes.to_string() } else { String::new() }
}

fn view_reply<'a>(post_id: &'a str, body: &'a CommentBody) -> ViewReply<'a> {
    ViewReply {
        id: body.id.0.as_str(),
        post_id,
        author: body.author.as_str(),
        initial: initial(&body.author),
        content: body.content.as_str(),
        timestamp: format_timestamp(&body.timestamp),
        score: score(body.votes),
        up_voted: body.user_vote == Some(Vote::Up),
        down_voted: body.user_vote == Some(Vote::Down),
    }
}

impl PostRenderer<'_> {
    pub fn new(view_tpl_src: &str) -> io::Result<PostRenderer> {
        let template = parse_template(view_tpl_src, "post view")?;
        Ok(PostRenderer { template })
    }

    pub fn render(&self, site: &Site, view: &ArticleView) -> String {
        let post = view.post;
        let post_id = post.id.0.as_str();

        let toc = view.article.toc.iter()
            .map(|h| ViewHeading { id: h.id.as_str(), text: h.text.as_str(), level: h.level.to_string() })
            .collect();

        let comments = view.comments.comments().iter()
            .map(|c| {
                let ViewReply { id, author, initial, content, timestamp, score, up_voted, down_voted, .. } = view_reply(post_id, &c.body);
                ViewComment {
                    id,
                    post_id,
                    author,
                    initial,
                    content,
                    timestamp,
                    score,
                    up_voted,
                    down_voted,
                    replies: c.replies.iter().map(|r| view_reply(post_id, r)).collect(),
                }
            })
            .collect();

        self.template.render(&ArticlePage {
            site_title: site.title.as_str(),
            id: post_id,
            title: post.title.as_str(),
            author: post.author.as_str(),
            date: format_long_date(&post.published_at),
            read_time: format!("{} min read", post.read_time),
            image_url: post.image_url.as_str(),
            tags: view_tags(&post.tags),
            post_content: view.article.html.as_str(),
            has_toc: !view.article.toc.is_empty(),
            toc,
            toc_offset: view.toc_offset.to_string(),
            has_related: !view.related.is_empty(),
            related: view.related.iter().map(|p| PostCard::new(p)).collect(),
            comment_count: view.comments.len().to_string(),
            comments,
            ad_slot: view.ad_slot,
        })
    }
}

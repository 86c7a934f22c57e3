use serde::Serialize;

use crate::content::Post;
use crate::view::post_link;

/// The header suggestions start once the query is longer than this.
pub const QUICK_SEARCH_MIN_LEN: usize = 2;
pub const QUICK_SEARCH_LIMIT: usize = 5;
const QUICK_RESULT_TAGS: usize = 2;

/// Posts whose title, content, excerpt, author or one of the tags contains
/// `query`, ignoring case. A blank query matches nothing. Feed order is kept.
pub fn search<'a>(query: &str, posts: &'a [Post]) -> Vec<&'a Post> {
    if query.trim().is_empty() {
        return vec![];
    }

    let term = query.to_lowercase();
    posts.iter()
        .filter(|post| matches(post, &term))
        .collect()
}

fn matches(post: &Post, term: &str) -> bool {
    post.title.to_lowercase().contains(term)
        || post.content.to_lowercase().contains(term)
        || post.excerpt.to_lowercase().contains(term)
        || post.author.to_lowercase().contains(term)
        || post.tags.iter().any(|tag| tag.to_lowercase().contains(term))
}

/// Suggestions shown under the header search box while typing: title,
/// content or tags only, first [`QUICK_SEARCH_LIMIT`] matches in feed order.
pub fn quick_search<'a>(query: &str, posts: &'a [Post]) -> Vec<&'a Post> {
    if query.chars().count() <= QUICK_SEARCH_MIN_LEN {
        return vec![];
    }

    let term = query.to_lowercase();
    posts.iter()
        .filter(|post| {
            post.title.to_lowercase().contains(&term)
                || post.content.to_lowercase().contains(&term)
                || post.tags.iter().any(|tag| tag.to_lowercase().contains(&term))
        })
        .take(QUICK_SEARCH_LIMIT)
        .collect()
}

#[derive(Serialize, Debug, PartialEq)]
pub struct QuickResult<'a> {
    pub id: &'a str,
    pub link: String,
    pub title: &'a str,
    pub excerpt: &'a str,
    pub tags: &'a [String],
}

impl<'a> From<&'a Post> for QuickResult<'a> {
    fn from(post: &'a Post) -> Self {
        QuickResult {
            id: post.id.0.as_str(),
            link: post_link(&post.id.0),
            title: post.title.as_str(),
            excerpt: post.excerpt.as_str(),
            tags: &post.tags[..post.tags.len().min(QUICK_RESULT_TAGS)],
        }
    }
}

pub fn result_label(count: usize) -> String {
    match count {
        1 => "1 result".to_string(),
        n => format!("{} results", n),
    }
}

#[cfg(test)]
mod tests {
    use crate::test_data::sample_post;

    use super::*;

    fn ids(posts: &[&Post]) -> Vec<String> {
        posts.iter().map(|p| p.id.0.clone()).collect()
    }

    fn posts() -> Vec<Post> {
        let mut a = sample_post("1", "Getting Started with React", &["React", "TypeScript"]);
        a.author = "John Doe".to_string();
        let mut b = sample_post("2", "Modern CSS", &["CSS", "Frontend"]);
        b.author = "Jane Smith".to_string();
        b.excerpt = "Container queries and subgrid".to_string();
        let mut c = sample_post("3", "Scalable Node.js", &["Node.js", "Backend"]);
        c.author = "Mike Johnson".to_string();
        c.content = "# Scalable Node.js\n\nUse a react-like event loop.\n".to_string();
        vec![a, b, c]
    }

    #[test]
    fn test_blank_query() {
        let posts = posts();
        assert!(search("", &posts).is_empty());
        assert!(search("   \t", &posts).is_empty());
    }

    #[test]
    fn test_case_insensitive_keeps_order() {
        let posts = posts();
        // title of 1, content of 3
        assert_eq!(ids(&search("REACT", &posts)), ["1", "3"]);
    }

    #[test]
    fn test_fields() {
        let posts = posts();
        assert_eq!(ids(&search("subgrid", &posts)), ["2"]);
        assert_eq!(ids(&search("jane", &posts)), ["2"]);
        assert_eq!(ids(&search("backend", &posts)), ["3"]);
        assert_eq!(ids(&search("typescr", &posts)), ["1"]);
        assert!(search("haskell", &posts).is_empty());
    }

    #[test]
    fn test_results_are_subset() {
        let posts = posts();
        for query in ["o", "e", "Node", "css", "x"] {
            let found = search(query, &posts);
            let term = query.to_lowercase();
            for post in found {
                assert!(posts.iter().any(|p| p.id == post.id));
                assert!(matches(post, &term));
            }
        }
    }

    #[test]
    fn test_quick_search_needs_three_chars() {
        let posts = posts();
        assert!(quick_search("", &posts).is_empty());
        assert!(quick_search("re", &posts).is_empty());
        assert_eq!(ids(&quick_search("rea", &posts)), ["1", "3"]);
    }

    #[test]
    fn test_quick_search_fields() {
        let posts = posts();
        assert_eq!(ids(&quick_search("FRONTEND", &posts)), ["2"]);
        assert_eq!(ids(&quick_search("event loop", &posts)), ["3"]);
        // excerpt and author are left to the full search
        assert!(quick_search("subgrid", &posts).is_empty());
        assert!(quick_search("jane", &posts).is_empty());
        assert_eq!(ids(&search("subgrid", &posts)), ["2"]);
    }

    #[test]
    fn test_quick_search_limit() {
        let posts: Vec<Post> = (1..=8)
            .map(|i| sample_post(&i.to_string(), &format!("Rust tip {}", i), &["Rust"]))
            .collect();
        assert_eq!(ids(&quick_search("rust", &posts)), ["1", "2", "3", "4", "5"]);
        assert_eq!(search("rust", &posts).len(), 8);
    }

    #[test]
    fn test_quick_result() {
        let post = sample_post("4", "Modern CSS", &["CSS", "Frontend", "Design"]);
        let result = QuickResult::from(&post);
        assert_eq!(result.link, "/blog/4");
        assert_eq!(result.tags, ["CSS".to_string(), "Frontend".to_string()]);
        assert_eq!(serde_json::to_string(&QuickResult::from(&sample_post("5", "A", &[]))).unwrap(),
                   r#"{"id":"5","link":"/blog/5","title":"A","excerpt":"Excerpt of A","tags":[]}"#);
    }

    #[test]
    fn test_result_label() {
        assert_eq!(result_label(0), "0 results");
        assert_eq!(result_label(1), "1 result");
        assert_eq!(result_label(3), "3 results");
    }
}

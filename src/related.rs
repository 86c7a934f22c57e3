use crate::content::Post;

pub const DEFAULT_RELATED_LIMIT: usize = 3;

/// Number of the candidate's tags that also belong to `current_tags`.
pub fn tag_overlap(candidate: &Post, current_tags: &[String]) -> usize {
    candidate.tags.iter()
        .filter(|tag| current_tags.contains(tag))
        .count()
}

/// Up to `limit` other posts, most shared tags first. Ties keep feed order
/// and posts sharing no tag still fill the list.
pub fn related_posts<'a>(current_id: &str, current_tags: &[String], posts: &'a [Post], limit: usize) -> Vec<&'a Post> {
    let mut scored: Vec<(usize, &Post)> = posts.iter()
        .filter(|post| post.id.0 != current_id)
        .map(|post| (tag_overlap(post, current_tags), post))
        .collect();

    // sort_by is stable
    scored.sort_by(|(a, _), (b, _)| b.cmp(a));

    scored.into_iter()
        .take(limit)
        .map(|(_, post)| post)
        .collect()
}

use std::fmt;
use std::fmt::{Display, Formatter};
use std::io;
use std::io::ErrorKind;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const SEED_COMMENTS: &str = include_str!("../content/seed_comments.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vote {
    Up,
    Down,
}

impl Vote {
    /// Voting again in the same direction withdraws the vote, voting the
    /// other way switches it. Returns the new state and the score delta.
    pub fn toggle(current: Option<Vote>, requested: Vote) -> (Option<Vote>, i64) {
        match (current, requested) {
            (None, Vote::Up) => (Some(Vote::Up), 1),
            (None, Vote::Down) => (Some(Vote::Down), -1),
            (Some(Vote::Up), Vote::Up) => (None, -1),
            (Some(Vote::Up), Vote::Down) => (Some(Vote::Down), -2),
            (Some(Vote::Down), Vote::Down) => (None, 1),
            (Some(Vote::Down), Vote::Up) => (Some(Vote::Up), 2),
        }
    }
}

impl FromStr for Vote {
    type Err = io::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Vote::Up),
            "down" => Ok(Vote::Down),
            _ => Err(io::Error::new(ErrorKind::InvalidInput, format!("Invalid vote direction: {}", s))),
        }
    }
}

#[derive(Debug, Clone, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(pub String);

impl Display for CommentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fields shared by comments and replies. A reply is just a body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentBody {
    pub id: CommentId,
    pub author: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub votes: i64,
    pub user_vote: Option<Vote>,
}

impl CommentBody {
    fn new(id: CommentId, author: &str, content: &str, now: DateTime<Utc>) -> Self {
        CommentBody {
            id,
            author: author.to_string(),
            content: content.to_string(),
            timestamp: now,
            votes: 0,
            user_vote: None,
        }
    }

    fn apply_vote(&mut self, direction: Vote) {
        let (user_vote, delta) = Vote::toggle(self.user_vote, direction);
        self.user_vote = user_vote;
        self.votes += delta;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(flatten)]
    pub body: CommentBody,
    #[serde(default)]
    pub replies: Vec<CommentBody>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommentEvent {
    Submit { author: String, content: String },
    Reply { parent_id: CommentId, author: String, content: String },
    Vote { comment_id: CommentId, direction: Vote },
}

/// A thread of top-level comments, each with a flat list of replies.
///
/// Every operation consumes the tree and returns the next one; blank
/// submissions and unknown ids give back the tree unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentTree {
    comments: Vec<Comment>,
}

impl CommentTree {
    pub fn new(comments: Vec<Comment>) -> Self {
        CommentTree { comments }
    }

    /// The thread every article starts with.
    pub fn seed() -> io::Result<Self> {
        serde_json::from_str(SEED_COMMENTS)
            .map_err(|e| io::Error::new(ErrorKind::InvalidData, format!("Error parsing seed comments: {}", e)))
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    pub fn reduce(self, event: CommentEvent, now: DateTime<Utc>) -> Self {
        match event {
            CommentEvent::Submit { author, content } => self.submit_comment(&author, &content, now),
            CommentEvent::Reply { parent_id, author, content } => self.submit_reply(&parent_id, &author, &content, now),
            CommentEvent::Vote { comment_id, direction } => self.toggle_vote(&comment_id, direction),
        }
    }

    pub fn submit_comment(mut self, author: &str, content: &str, now: DateTime<Utc>) -> Self {
        if content.trim().is_empty() {
            return self;
        }

        let id = self.next_id(now);
        self.comments.push(Comment {
            body: CommentBody::new(id, author, content, now),
            replies: vec![],
        });
        self
    }

    pub fn submit_reply(mut self, parent_id: &CommentId, author: &str, content: &str, now: DateTime<Utc>) -> Self {
        if content.trim().is_empty() {
            return self;
        }

        let Some(index) = self.comments.iter().position(|c| &c.body.id == parent_id) else {
            return self;
        };

        let id = self.next_id(now);
        self.comments[index].replies.push(CommentBody::new(id, author, content, now));
        self
    }

    pub fn toggle_vote(mut self, comment_id: &CommentId, direction: Vote) -> Self {
        if let Some(body) = self.find_mut(comment_id) {
            body.apply_vote(direction);
        }
        self
    }

    pub fn find(&self, id: &CommentId) -> Option<&CommentBody> {
        self.comments.iter().find_map(|comment| {
            if &comment.body.id == id {
                Some(&comment.body)
            } else {
                comment.replies.iter().find(|reply| &reply.id == id)
            }
        })
    }

    fn find_mut(&mut self, id: &CommentId) -> Option<&mut CommentBody> {
        for comment in self.comments.iter_mut() {
            if &comment.body.id == id {
                return Some(&mut comment.body);
            }
            if let Some(reply) = comment.replies.iter_mut().find(|reply| &reply.id == id) {
                return Some(reply);
            }
        }
        None
    }

    /// Millisecond timestamp of the submission, bumped until unused.
    fn next_id(&self, now: DateTime<Utc>) -> CommentId {
        let mut millis = now.timestamp_millis();
        loop {
            let id = CommentId(millis.to_string());
            if self.find(&id).is_none() {
                return id;
            }
            millis += 1;
        }
    }
}

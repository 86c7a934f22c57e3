use std::time::Duration;

use serde::Deserialize;
use spdlog::info;

#[derive(Deserialize, Debug, Default)]
pub struct SubscribeForm {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, PartialEq)]
pub enum Validation {
    /// Nothing typed, the form is shown again as is.
    Blank,
    Invalid(String),
    Valid(String),
}

impl SubscribeForm {
    pub fn validate(&self) -> Validation {
        let email = self.email.trim();
        if email.is_empty() {
            return Validation::Blank;
        }

        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
                Validation::Valid(email.to_string())
            }
            _ => Validation::Invalid(format!("'{}' is not a valid e-mail address", email)),
        }
    }
}

/// There is no mailing list behind the form. The delay stands in for the
/// provider round trip.
pub async fn submit_subscription(email: &str, delay: Duration) {
    tokio::time::sleep(delay).await;
    info!("New newsletter subscription: {}", email);
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    fn form(email: &str) -> SubscribeForm {
        SubscribeForm { email: email.to_string() }
    }

    #[test]
    fn test_validate() {
        assert_eq!(form("").validate(), Validation::Blank);
        assert_eq!(form("   ").validate(), Validation::Blank);
        assert_eq!(form(" reader@example.com ").validate(), Validation::Valid("reader@example.com".to_string()));
        assert!(matches!(form("reader").validate(), Validation::Invalid(_)));
        assert!(matches!(form("@example.com").validate(), Validation::Invalid(_)));
        assert!(matches!(form("reader@").validate(), Validation::Invalid(_)));
        assert!(matches!(form("a@b@c").validate(), Validation::Invalid(_)));
    }

    #[tokio::test]
    async fn test_submit_waits() {
        let start = Instant::now();
        submit_subscription("reader@example.com", Duration::from_millis(20)).await;
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}

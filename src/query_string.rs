use std::collections::HashMap;

#[derive(PartialEq, Debug)]
pub struct QueryString {
    items: HashMap<String, String>,
}

impl QueryString {
    pub fn from(buf: &str) -> Self {
        let vs: Vec<(String, String)> = serde_urlencoded::from_str(buf).unwrap_or_else(|_| vec![]);
        let items: HashMap<String, String> = vs.into_iter().collect();

        QueryString {
            items,
        }
    }

    /// Free text of the search box, empty when absent.
    pub fn get_query(&self) -> &str {
        self.items.get("q").map(|q| q.as_str()).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_query() {
        assert_eq!(QueryString::from("q=react").get_query(), "react");
        assert_eq!(QueryString::from("q=Node.js+scaling").get_query(), "Node.js scaling");
        assert_eq!(QueryString::from("q=caf%C3%A9&page=2").get_query(), "café");
        assert_eq!(QueryString::from("page=2").get_query(), "");
        assert_eq!(QueryString::from("").get_query(), "");
    }

    #[test]
    fn test_parse_query_str() {
        let buf = "bread=baguette&cheese=comt%C3%A9";
        let meal = vec![
            ("bread".to_owned(), "baguette".to_owned()),
            ("cheese".to_owned(), "comté".to_owned()),
        ].into_iter().collect::<HashMap<_, _>>();

        assert_eq!(QueryString::from(buf), QueryString { items: meal });
    }

    #[test]
    fn test_parse_key_only_query_str() {
        let expected: HashMap<String, String> = [("q".to_string(), "".to_string())].into_iter().collect();
        assert_eq!(QueryString::from("q"), QueryString { items: expected });
    }
}

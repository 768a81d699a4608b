use serde::{Deserialize, Serialize};

/// A single instructional video, either from the search API or a placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub title: String,
    pub url: String,
}

impl Video {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// One skill paired with its videos. A response is an ordered list of these,
/// in the order the skills were extracted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub skill: String,
    pub videos: Vec<Video>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_recommendation_wire_shape() {
        let rec = Recommendation {
            skill: "Communication".to_string(),
            videos: vec![Video::new(
                "Better Communication",
                "https://www.youtube.com/watch?v=abc123",
            )],
        };
        assert_eq!(
            serde_json::to_value(&rec).unwrap(),
            json!({
                "skill": "Communication",
                "videos": [
                    {"title": "Better Communication", "url": "https://www.youtube.com/watch?v=abc123"}
                ]
            })
        );
    }
}

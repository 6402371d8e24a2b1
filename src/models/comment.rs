use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::vehicle::lenient_timestamp;

/// Comentario/valoración de un cliente
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub comment: String,
    /// 1-5 estrellas
    pub rating: u8,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub car_brand: Option<String>,
    #[serde(default)]
    pub car_model: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct CommentRequest {
    #[validate(length(min = 1, max = 2000), custom = "not_blank_comment")]
    pub comment: String,
    #[validate(range(min = 1, max = 5))]
    pub rating: u8,
}

fn not_blank_comment(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Valoración media de una lista de comentarios
pub fn average_rating(comments: &[Comment]) -> Option<f64> {
    if comments.is_empty() {
        return None;
    }
    let total: u32 = comments.iter().map(|c| u32::from(c.rating)).sum();
    Some(f64::from(total) / comments.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_request_validation() {
        let ok = CommentRequest { comment: "Ótimo atendimento".to_string(), rating: 5 };
        assert!(ok.validate().is_ok());

        let bad = CommentRequest { comment: "  ".to_string(), rating: 0 };
        let errors = bad.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("comment"));
        assert!(errors.field_errors().contains_key("rating"));
    }

    #[test]
    fn test_average_rating() {
        let make = |rating| Comment {
            id: 1,
            comment: "x".to_string(),
            rating,
            user_name: None,
            photo: None,
            car_brand: None,
            car_model: None,
            created_at: None,
        };
        assert_eq!(average_rating(&[]), None);
        assert_eq!(average_rating(&[make(4), make(5)]), Some(4.5));
    }
}

//! Author model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use validator::Validate;

/// Full author row from the database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Author {
    pub id: i64,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let birth = self
            .birth_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        let death = self
            .date_of_death
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        write!(f, "{} (Born: {}, Died: {})", self.name, birth, death)
    }
}

/// Create author request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAuthor {
    #[validate(length(min = 1, message = "Name is required."))]
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_life_dates() {
        let author = Author {
            id: 1,
            name: "Harper Lee".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1926, 4, 28),
            date_of_death: NaiveDate::from_ymd_opt(2016, 2, 19),
            created_at: Utc::now(),
        };

        assert_eq!(
            author.to_string(),
            "Harper Lee (Born: 1926-04-28, Died: 2016-02-19)"
        );
    }

    #[test]
    fn display_uses_placeholders_for_unknown_dates() {
        let author = Author {
            id: 2,
            name: "Homer".to_string(),
            birth_date: None,
            date_of_death: None,
            created_at: Utc::now(),
        };

        assert_eq!(author.to_string(), "Homer (Born: unknown, Died: -)");
    }
}

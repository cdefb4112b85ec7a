use serde::{Deserialize, Serialize};

use super::{ValidationError, bounded_field};
use crate::constants::limits::{MAX_TITLE_LEN, MAX_YEAR_LEN};
use crate::entities::movies;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub year: String,
}

impl From<movies::Model> for Movie {
    fn from(model: movies::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            year: model.year,
        }
    }
}

/// Raw create/edit form body. Fields stay optional so a missing field is a
/// validation failure rather than a rejected request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieForm {
    pub title: Option<String>,
    pub year: Option<String>,
}

/// A title/year pair that satisfies the column bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidMovie {
    title: String,
    year: String,
}

impl ValidMovie {
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn year(&self) -> &str {
        &self.year
    }
}

impl MovieForm {
    #[must_use]
    pub fn new(title: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            year: Some(year.into()),
        }
    }

    pub fn validate(self) -> Result<ValidMovie, ValidationError> {
        let title = bounded_field("title", self.title, MAX_TITLE_LEN)?;
        let year = bounded_field("year", self.year, MAX_YEAR_LEN)?;
        Ok(ValidMovie { title, year })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bounds() {
        let valid = MovieForm::new("a".repeat(60), "2016").validate().unwrap();
        assert_eq!(valid.title().len(), 60);
        assert_eq!(valid.year(), "2016");
    }

    #[test]
    fn rejects_invalid_inputs() {
        let cases = [
            MovieForm::new("", "2016"),
            MovieForm::new("Arrival", ""),
            MovieForm::new("a".repeat(61), "2016"),
            MovieForm::new("Arrival", "20160"),
            MovieForm {
                title: None,
                year: Some("2016".to_string()),
            },
            MovieForm {
                title: Some("Arrival".to_string()),
                year: None,
            },
        ];

        for form in cases {
            assert!(form.clone().validate().is_err(), "{form:?} should fail");
        }
    }

    #[test]
    fn year_is_not_checked_numerically() {
        assert!(MovieForm::new("Arrival", "abcd").validate().is_ok());
    }
}

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Job posting exactly as delivered by a `Data` event. Every field may be
/// absent on the wire; `JobRecord::from_posting` decides what is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawJobPosting {
    pub title: Option<String>,
    pub company: Option<String>,
    pub company_link: Option<String>,
    pub date: Option<String>,
    pub link: Option<String>,
    pub apply_link: Option<String>,
    pub description: Option<String>,
    pub skills: Option<Vec<String>>,
    pub place: Option<String>,
    pub location: Option<String>,
    pub query: Option<String>,
    pub insights: Option<Vec<String>>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("posting is missing required field `{0}`")]
    MissingField(&'static str),
    #[error("posting link {link:?} is not a valid url: {reason}")]
    InvalidLink { link: String, reason: String },
}

/// Flat, immutable row derived from one posting.
///
/// The description text itself is never kept; only its length in characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRecord {
    title: String,
    company: String,
    posted_date: String,
    link: String,
    description_length: usize,
    skills: Vec<String>,
    place: String,
    location: String,
    source_query: String,
}

impl JobRecord {
    pub fn from_posting(posting: RawJobPosting) -> Result<Self, RecordError> {
        let title = required(posting.title, "title")?;
        let company = required(posting.company, "company")?;
        let posted_date = required(posting.date, "date")?;
        let raw_link = required(posting.link, "link")?;
        let description = required(posting.description, "description")?;
        let place = required(posting.place, "place")?;
        let location = required(posting.location, "location")?;
        let source_query = required(posting.query, "query")?;

        let link = raw_link.trim().to_string();
        Url::parse(&link).map_err(|err| RecordError::InvalidLink {
            link: raw_link.clone(),
            reason: err.to_string(),
        })?;

        Ok(Self {
            title,
            company,
            posted_date,
            link,
            description_length: description.chars().count(),
            skills: posting.skills.unwrap_or_default(),
            place,
            location,
            source_query,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn posted_date(&self) -> &str {
        &self.posted_date
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn description_length(&self) -> usize {
        self.description_length
    }

    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    pub fn place(&self) -> &str {
        &self.place
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn source_query(&self) -> &str {
        &self.source_query
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, RecordError> {
    value.ok_or(RecordError::MissingField(field))
}

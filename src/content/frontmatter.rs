//! Front-matter parsing
//!
//! Parsing is split in two: [`FrontMatter::parse`] only deserializes the YAML
//! block into a partial record, and [`FrontMatter::into_meta`] fills in the
//! defaults and derived fields.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

use super::markdown::ReadingTime;
use super::{ContentError, PostMeta};
use crate::config::SiteConfig;

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Front-matter as written in a content file, before defaults are applied
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub author: Option<String>,
    #[serde(deserialize_with = "string_or_vec", default)]
    pub tags: Vec<String>,
    pub featured: Option<bool>,
}

/// Values used for fields a content file leaves out
#[derive(Debug, Clone)]
pub struct PostDefaults {
    pub category: String,
    pub author: String,
    pub words_per_minute: usize,
    /// Date assigned to posts without a `date` field
    pub today: NaiveDate,
}

impl PostDefaults {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            category: config.default_category.clone(),
            author: config.author.clone(),
            words_per_minute: config.words_per_minute,
            today: Local::now().date_naive(),
        }
    }
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str), ContentError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        let mut lines = content.split_inclusive('\n');
        let opening = match lines.next() {
            Some(line) if line.trim_end() == "---" => line,
            // No front-matter found
            _ => return Ok((FrontMatter::default(), content)),
        };

        let mut offset = opening.len();
        for line in lines {
            if line.trim_end() == "---" {
                let yaml = &content[opening.len()..offset];
                let body = content[offset + line.len()..].trim_start_matches(['\n', '\r']);

                if yaml.trim().is_empty() {
                    return Ok((FrontMatter::default(), body));
                }

                let fm = serde_yaml::from_str::<FrontMatter>(yaml)?;
                return Ok((fm, body));
            }
            offset += line.len();
        }

        Err(ContentError::UnclosedFrontMatter)
    }

    /// Apply defaults and derive the reading time from `body`
    pub fn into_meta(
        self,
        slug: &str,
        body: &str,
        defaults: &PostDefaults,
    ) -> Result<PostMeta, ContentError> {
        let date = match non_blank(self.date) {
            Some(raw) => parse_date_string(&raw).ok_or(ContentError::InvalidDate(raw))?,
            None => defaults.today,
        };

        let reading_time = ReadingTime::estimate(body, defaults.words_per_minute);

        Ok(PostMeta {
            slug: slug.to_string(),
            title: non_blank(self.title).unwrap_or_else(|| "Untitled".to_string()),
            description: self.description.unwrap_or_default(),
            date,
            category: non_blank(self.category).unwrap_or_else(|| defaults.category.clone()),
            image: non_blank(self.image),
            author: non_blank(self.author).unwrap_or_else(|| defaults.author.clone()),
            tags: self.tags,
            featured: self.featured.unwrap_or(false),
            reading_time: reading_time.to_string(),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Parse a date string in various formats, keeping only the calendar date
fn parse_date_string(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    // RFC 3339 / ISO 8601 with offset
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

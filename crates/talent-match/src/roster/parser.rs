use std::io::Read;

use serde::{Deserialize, Deserializer};

use super::RosterSource;
use crate::matching::{Candidate, CandidateId};

pub(super) struct ParsedRow {
    pub(super) line: u64,
    pub(super) outcome: Result<Candidate, String>,
}

pub(super) fn parse_rows<R: Read>(
    reader: R,
    source: RosterSource,
) -> Result<Vec<ParsedRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut rows = Vec::new();

    for (index, record) in csv_reader.records().enumerate() {
        let fallback_line = index as u64 + 2;
        let record = match record {
            Ok(record) => record,
            Err(err) if err.is_io_error() => return Err(err),
            Err(err) => {
                // Bad encoding or shape spoils one record; the reader moves on.
                let line = err
                    .position()
                    .map(|position| position.line())
                    .unwrap_or(fallback_line);
                rows.push(ParsedRow {
                    line,
                    outcome: Err(format!("unreadable row: {err}")),
                });
                continue;
            }
        };
        let line = record
            .position()
            .map(|position| position.line())
            .unwrap_or(fallback_line);

        let fields = match source {
            RosterSource::Standard => record
                .deserialize::<StandardRow>(Some(&headers))
                .map(RosterFields::from),
            RosterSource::Marketplace => record
                .deserialize::<MarketplaceRow>(Some(&headers))
                .map(RosterFields::from),
        };

        let outcome = fields
            .map_err(|err| format!("unreadable row: {err}"))
            .and_then(RosterFields::into_candidate);
        rows.push(ParsedRow { line, outcome });
    }

    Ok(rows)
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StandardRow {
    #[serde(deserialize_with = "empty_string_as_none")]
    id: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    username: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    name: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    job_title: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    skills: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    experience: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    rating: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    hourly_rate: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    profile_url: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    availability: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    total_sales: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MarketplaceRow {
    #[serde(deserialize_with = "empty_string_as_none")]
    freelancer_id: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    name: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    job_title: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    skills: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    years_of_experience: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    success_rate: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    hourly_rate: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    portfolio_url: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    top_rated: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    total_jobs: Option<String>,
}

/// Source-independent view of one row.
struct RosterFields {
    id: Option<String>,
    username: Option<String>,
    name: Option<String>,
    title: Option<String>,
    skills: Option<String>,
    experience: Option<String>,
    rating: Option<String>,
    rate: Option<String>,
    profile_url: Option<String>,
    available: Option<String>,
    available_by_default: bool,
    engagements: Option<String>,
}

impl From<StandardRow> for RosterFields {
    fn from(row: StandardRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            name: row.name,
            title: row.job_title,
            skills: row.skills,
            experience: row.experience,
            rating: row.rating,
            rate: row.hourly_rate,
            profile_url: row.profile_url,
            available: row.availability,
            available_by_default: true,
            engagements: row.total_sales,
        }
    }
}

impl From<MarketplaceRow> for RosterFields {
    fn from(row: MarketplaceRow) -> Self {
        Self {
            id: row.freelancer_id,
            username: row.name.clone(),
            name: row.name,
            title: row.job_title,
            skills: row.skills,
            experience: row.years_of_experience,
            rating: row.success_rate,
            rate: row.hourly_rate,
            profile_url: row.portfolio_url,
            available: row.top_rated,
            available_by_default: false,
            engagements: row.total_jobs,
        }
    }
}

impl RosterFields {
    fn into_candidate(self) -> Result<Candidate, String> {
        let id = self.id.ok_or_else(|| "missing id".to_string())?;
        let name = self.name.ok_or_else(|| "missing name".to_string())?;
        let available = match self.available.as_deref() {
            Some(value) => parse_flag("availability", value)?,
            None => self.available_by_default,
        };

        Ok(Candidate {
            id: CandidateId(id),
            username: self.username.unwrap_or_else(|| name.clone()),
            title: self.title.unwrap_or_default(),
            skills: split_skills(self.skills.as_deref().unwrap_or_default()),
            experience_years: parse_count("experience", self.experience.as_deref())?,
            rating: parse_amount("rating", self.rating.as_deref())?,
            rate: parse_amount("hourly_rate", self.rate.as_deref())?,
            profile_url: self.profile_url.unwrap_or_default(),
            available,
            completed_engagements: parse_count("engagements", self.engagements.as_deref())?,
            name,
        })
    }
}

pub(super) fn split_skills(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|skill| !skill.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_amount(field: &str, value: Option<&str>) -> Result<f64, String> {
    let Some(value) = value else {
        return Ok(0.0);
    };
    let cleaned = value.trim().trim_start_matches('$').trim_end_matches('%').trim();
    match cleaned.parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount >= 0.0 => Ok(amount),
        _ => Err(format!("invalid {field} '{value}'")),
    }
}

fn parse_count(field: &str, value: Option<&str>) -> Result<u32, String> {
    let amount = parse_amount(field, value)?;
    if amount > f64::from(u32::MAX) {
        return Err(format!("{field} out of range"));
    }
    Ok(amount.floor() as u32)
}

fn parse_flag(field: &str, value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" | "available" => Ok(true),
        "false" | "no" | "n" | "0" | "unavailable" => Ok(false),
        _ => Err(format!("invalid {field} '{value}'")),
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

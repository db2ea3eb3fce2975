use std::{collections::BTreeMap, fmt};

use serde::Serialize;
use serde_json::{Value, value::RawValue};
use utoipa::ToSchema;

use crate::{
    dao::models::RankedScoreEntity,
    dto::validation::{
        invalid_color, invalid_initials, invalid_score, parse_color, parse_score,
        validate_initials, validate_score,
    },
    error::SubmissionError,
};

/// Color stored and returned when a submission does not carry one (neutral gray).
pub const DEFAULT_COLOR: u32 = 0x80_80_80;

/// Message returned once a score has been persisted.
pub const SUBMITTED_MESSAGE: &str = "Score submitted successfully";

/// A submission that passed every validation step.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreSubmission {
    /// Uppercased initials, at most three characters.
    pub initials: String,
    /// Finite, non-negative score.
    pub score: f64,
    /// Submitted color or [`DEFAULT_COLOR`]; `None` when colors are disabled.
    pub color: Option<u32>,
}

impl ScoreSubmission {
    /// Decode and validate an `INITIALS,SCORE[,COLOR]` body.
    ///
    /// The third field is only accepted when `with_color` is set.
    pub fn from_text(body: &str, with_color: bool) -> Result<Self, SubmissionError> {
        let fields: Vec<&str> = body.trim().split(',').collect();
        let (initials, score, color) = match fields.as_slice() {
            [initials, score] => (*initials, *score, None),
            [initials, score, color] if with_color => (*initials, *score, Some(*color)),
            _ => return Err(text_format_error(with_color)),
        };

        let initials = normalize_initials(initials)?;
        let score = parse_score(score).map_err(SubmissionError::InvalidScore)?;
        let score = validate_score(score).map_err(SubmissionError::NegativeScore)?;
        let color = resolve_color(color, with_color)?;

        Ok(Self {
            initials,
            score,
            color,
        })
    }

    /// Decode and validate a `{"initials": ..., "score": ...[, "color": ...]}` body.
    ///
    /// Fields are kept raw until their own check runs, so an unrepresentable
    /// score such as `1e400` is reported as a score error rather than a format one.
    pub fn from_json(body: &str, with_color: bool) -> Result<Self, SubmissionError> {
        let Ok(payload) = serde_json::from_str::<BTreeMap<String, &RawValue>>(body) else {
            return Err(json_format_error());
        };
        let (Some(initials), Some(score)) = (payload.get("initials"), payload.get("score")) else {
            return Err(json_format_error());
        };

        let Ok(Value::String(initials)) = serde_json::from_str::<Value>(initials.get()) else {
            return Err(SubmissionError::InvalidInitials(invalid_initials(
                "initials_type",
            )));
        };
        let initials = normalize_initials(&initials)?;

        let score = serde_json::from_str::<f64>(score.get())
            .ok()
            .filter(|score| score.is_finite())
            .ok_or_else(|| SubmissionError::InvalidScore(invalid_score()))?;
        let score = validate_score(score).map_err(SubmissionError::NegativeScore)?;

        let color = match payload
            .get("color")
            .map(|raw| serde_json::from_str::<Value>(raw.get()))
        {
            None | Some(Ok(Value::Null)) => None,
            Some(Ok(Value::String(color))) if with_color => Some(color),
            Some(_) if with_color => return Err(SubmissionError::InvalidColor(invalid_color())),
            // Ignored when the deployment does not store colors.
            Some(_) => None,
        };
        let color = resolve_color(color.as_deref(), with_color)?;

        Ok(Self {
            initials,
            score,
            color,
        })
    }
}

fn normalize_initials(raw: &str) -> Result<String, SubmissionError> {
    let initials = raw.to_uppercase();
    validate_initials(&initials).map_err(SubmissionError::InvalidInitials)?;
    Ok(initials)
}

fn resolve_color(raw: Option<&str>, with_color: bool) -> Result<Option<u32>, SubmissionError> {
    if !with_color {
        return Ok(None);
    }
    match raw {
        Some(text) => parse_color(text)
            .map(Some)
            .map_err(SubmissionError::InvalidColor),
        None => Ok(Some(DEFAULT_COLOR)),
    }
}

fn text_format_error(with_color: bool) -> SubmissionError {
    let expected = if with_color {
        "INITIALS,SCORE[,COLOR]"
    } else {
        "INITIALS,SCORE"
    };
    SubmissionError::InvalidFormat(format!("Invalid format. Expected: {expected}"))
}

fn json_format_error() -> SubmissionError {
    SubmissionError::InvalidFormat(
        r#"Invalid format. Expected: {"initials": ..., "score": ...}"#.into(),
    )
}

/// Acknowledgement returned by a successful submission.
#[derive(Debug, Serialize, ToSchema)]
pub struct SubmitResponse {
    /// Always [`SUBMITTED_MESSAGE`].
    pub message: String,
}

impl SubmitResponse {
    /// Build the success acknowledgement.
    pub fn submitted() -> Self {
        Self {
            message: SUBMITTED_MESSAGE.to_string(),
        }
    }
}

/// One `initials,score[,color]` line of a ranking response.
pub struct ScoreLine<'a> {
    entity: &'a RankedScoreEntity,
    with_color: bool,
}

impl<'a> ScoreLine<'a> {
    /// Wrap a stored row for rendering.
    pub fn new(entity: &'a RankedScoreEntity, with_color: bool) -> Self {
        Self { entity, with_color }
    }
}

impl fmt::Display for ScoreLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},", self.entity.initials)?;
        write_score(f, self.entity.score)?;
        if self.with_color {
            write!(f, ",{}", self.entity.color.unwrap_or(DEFAULT_COLOR))?;
        }
        Ok(())
    }
}

/// Shortest exact form, with `.0` appended when that form has no fractional part.
fn write_score(f: &mut fmt::Formatter<'_>, score: f64) -> fmt::Result {
    let shortest = score.to_string();
    let is_decimal = shortest.contains(['.', 'e']) || !score.is_finite();
    if is_decimal {
        f.write_str(&shortest)
    } else {
        write!(f, "{shortest}.0")
    }
}

/// Join ranked rows into the newline separated response body.
pub fn render_scores(rows: &[RankedScoreEntity], with_color: bool) -> String {
    rows.iter()
        .map(|row| ScoreLine::new(row, with_color).to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

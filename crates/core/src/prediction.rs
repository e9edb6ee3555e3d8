//! Prediction result as returned by the classification service.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::constants::NOT_AVAILABLE;

/// A classification output paired with its confidence in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredField<T> {
    pub result: T,
    pub confidence: f64,
}

impl<T> ScoredField<T> {
    #[must_use]
    pub const fn new(result: T, confidence: f64) -> Self {
        Self { result, confidence }
    }

    /// Confidence as a percentage string with one decimal, e.g. `92.0%`.
    #[must_use]
    pub fn confidence_percent(&self) -> String {
        format!("{:.1}%", self.confidence * 100.0)
    }
}

/// Outcome of one `/predict/` call.
///
/// Sub-fields are optional: the client passes through exactly what the
/// service returned and rendering substitutes a placeholder per field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_id: Option<String>,
    #[serde(default)]
    pub disease: Option<ScoredField<String>>,
    #[serde(default)]
    pub variety: Option<ScoredField<String>>,
    #[serde(default)]
    pub age: Option<ScoredField<f64>>,
}

impl PredictionResult {
    /// Whether the service returned at least one classification field.
    #[must_use]
    pub const fn has_any_field(&self) -> bool {
        self.disease.is_some() || self.variety.is_some() || self.age.is_some()
    }

    /// Render the three classification lines in display order.
    #[must_use]
    pub fn render_lines(&self) -> [String; 3] {
        render_scored_lines(self.disease.as_ref(), self.variety.as_ref(), self.age.as_ref())
    }
}

/// Render a single labelled field, or the placeholder when it is absent.
#[must_use]
pub fn describe_field<T>(
    label: &str,
    field: Option<&ScoredField<T>>,
    value: impl Fn(&T) -> String,
) -> String {
    match field {
        Some(f) => format!("{label}: {} ({})", value(&f.result), f.confidence_percent()),
        None => format!("{label}: {NOT_AVAILABLE}"),
    }
}

pub(crate) fn render_scored_lines(
    disease: Option<&ScoredField<String>>,
    variety: Option<&ScoredField<String>>,
    age: Option<&ScoredField<f64>>,
) -> [String; 3] {
    [
        describe_field("Disease", disease, ToString::to_string),
        describe_field("Variety", variety, ToString::to_string),
        describe_field("Estimated Age", age, |days| format_days(days)),
    ]
}

fn format_days<T: Display>(days: &T) -> String {
    format!("{days} days")
}

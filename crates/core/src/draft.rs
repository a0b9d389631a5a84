//! AI draft statuses, generation types, and draft input validation.

use crate::error::CoreError;
use crate::macros::define_str_enum;

/// Lowest accepted human rating.
pub const MIN_RATING: i16 = 1;

/// Highest accepted human rating.
pub const MAX_RATING: i16 = 5;

/// Upper bound for a generation temperature.
pub const MAX_TEMPERATURE: f64 = 2.0;

define_str_enum! {
    /// Lifecycle of one generation attempt. At most one draft per piece is `selected`.
    DraftStatus ("draft status", VALID_DRAFT_STATUSES) {
        Candidate = "candidate",
        Selected = "selected",
        Discarded = "discarded",
    }
}

define_str_enum! {
    /// Why a draft was generated.
    GenerationType ("generation type", VALID_GENERATION_TYPES) {
        Original = "original",
        Variation = "variation",
        Improvement = "improvement",
        Translation = "translation",
        Summary = "summary",
    }
}

/// Validate a human rating.
pub fn validate_rating(rating: i16) -> Result<(), CoreError> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING}, got {rating}"
        )))
    }
}

/// Validate generation parameters reported with a draft.
pub fn validate_generation_params(
    temperature: Option<f64>,
    max_tokens: Option<i32>,
) -> Result<(), CoreError> {
    if let Some(t) = temperature {
        if !(0.0..=MAX_TEMPERATURE).contains(&t) {
            return Err(CoreError::Validation(format!(
                "temperature must be between 0.0 and {MAX_TEMPERATURE}, got {t}"
            )));
        }
    }
    if let Some(m) = max_tokens {
        if m <= 0 {
            return Err(CoreError::Validation(format!(
                "max_tokens must be positive, got {m}"
            )));
        }
    }
    Ok(())
}

/// Validate a quality score, which must lie in `[0.0, 1.0]`.
pub fn validate_quality_score(score: f64) -> Result<(), CoreError> {
    if (0.0..=1.0).contains(&score) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "quality_score must be between 0.0 and 1.0, got {score}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratings_in_range() {
        for r in MIN_RATING..=MAX_RATING {
            assert!(validate_rating(r).is_ok());
        }
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
    }

    #[test]
    fn generation_params() {
        assert!(validate_generation_params(Some(0.7), Some(512)).is_ok());
        assert!(validate_generation_params(None, None).is_ok());
        assert!(validate_generation_params(Some(-0.1), None).is_err());
        assert!(validate_generation_params(Some(2.5), None).is_err());
        assert!(validate_generation_params(None, Some(0)).is_err());
    }

    #[test]
    fn quality_score_bounds() {
        assert!(validate_quality_score(0.0).is_ok());
        assert!(validate_quality_score(1.0).is_ok());
        assert!(validate_quality_score(1.01).is_err());
        assert!(validate_quality_score(f64::NAN).is_err());
    }

    #[test]
    fn status_strings() {
        assert_eq!(DraftStatus::Selected.as_str(), "selected");
        assert_eq!(
            DraftStatus::from_str_value("discarded").unwrap(),
            DraftStatus::Discarded
        );
        assert_eq!(VALID_GENERATION_TYPES.len(), 5);
    }
}

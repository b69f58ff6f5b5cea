//! Field-level coercion rules shared by the step validators.

use crate::types::listing::Amenity;

/// Error messages shown next to fields.
pub mod messages {
    pub const SELECT_PROPERTY_TYPE: &str = "Select a property type";
    pub const SELECT_TRANSACTION_TYPE: &str = "Select a transaction type";
    pub const INVALID_NUMBER: &str = "Enter a valid number";
    pub const ASKING_PRICE_REQUIRED: &str = "Asking price is required";
    pub const AREA_REQUIRED: &str = "Square meters is required";
    pub const FULL_ADDRESS: &str = "Enter a full address";
    pub const ADD_PHOTO: &str = "Add at least one photo";
    pub const INVALID_VIDEO_LINK: &str = "Enter a valid video link";
    pub const WHOLE_NUMBER: &str = "Enter a whole number";
    pub const DESCRIPTION_TOO_LONG: &str = "Description is too long";
    pub const CONFIRM_DETAILS: &str = "Confirm the listing details";
}

/// Why a numeric field did not coerce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberError {
    /// Empty, whitespace-only or null input. Never treated as zero.
    Missing,
    /// Text that is not a finite number.
    Invalid,
}

/// Coerce user-entered text into a finite number.
pub fn coerce_number(raw: Option<&str>) -> Result<f64, NumberError> {
    let text = match raw.map(str::trim) {
        None | Some("") => return Err(NumberError::Missing),
        Some(text) => text,
    };
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(NumberError::Invalid),
    }
}

/// Coerce and require a strictly positive number.
///
/// Missing and non-positive values both fail with `required`; text that is
/// not a number fails with [`messages::INVALID_NUMBER`].
pub fn positive_number(raw: Option<&str>, required: &'static str) -> Result<f64, &'static str> {
    match coerce_number(raw) {
        Ok(value) if value > 0.0 => Ok(value),
        Ok(_) | Err(NumberError::Missing) => Err(required),
        Err(NumberError::Invalid) => Err(messages::INVALID_NUMBER),
    }
}

/// Optional non-negative integer (bedroom and bathroom counts).
pub fn optional_count(raw: Option<&str>) -> Result<Option<u32>, &'static str> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => text
            .parse::<u32>()
            .map(Some)
            .map_err(|_| messages::WHOLE_NUMBER),
    }
}

/// External video link: empty is fine, anything else must be http(s).
pub fn optional_video_link(raw: Option<&str>) -> Result<Option<String>, &'static str> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(link) => {
            let rest = link
                .strip_prefix("https://")
                .or_else(|| link.strip_prefix("http://"));
            match rest {
                Some(host) if !host.is_empty() && !host.contains(char::is_whitespace) => {
                    Ok(Some(link.to_string()))
                }
                _ => Err(messages::INVALID_VIDEO_LINK),
            }
        }
    }
}

/// Comma-separated amenity list. Reports the first unknown name.
pub fn amenity_list(raw: Option<&str>) -> Result<Vec<Amenity>, String> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| {
            name.parse::<Amenity>()
                .map_err(|_| format!("Unknown amenity: {}", name))
        })
        .collect()
}

/// Checkbox-style truthiness as submitted by a form.
pub fn is_checked(raw: Option<&str>) -> bool {
    matches!(
        raw.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("true" | "on" | "1" | "yes")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_null_are_missing_not_zero() {
        assert_eq!(coerce_number(None), Err(NumberError::Missing));
        assert_eq!(coerce_number(Some("")), Err(NumberError::Missing));
        assert_eq!(coerce_number(Some("   ")), Err(NumberError::Missing));
    }

    #[test]
    fn non_finite_and_garbage_are_invalid() {
        for text in ["abc", "inf", "-infinity", "NaN", "1,000", "12e"] {
            assert_eq!(coerce_number(Some(text)), Err(NumberError::Invalid), "{text}");
        }
    }

    #[test]
    fn zero_and_negative_fail_as_required() {
        assert_eq!(positive_number(Some("0"), "req"), Err("req"));
        assert_eq!(positive_number(Some("-3"), "req"), Err("req"));
        assert_eq!(positive_number(Some(" 42.5 "), "req"), Ok(42.5));
    }

    #[test]
    fn video_link_requires_http_scheme() {
        assert_eq!(optional_video_link(Some("")), Ok(None));
        assert_eq!(
            optional_video_link(Some("https://www.youtube.com/watch?v=abc")),
            Ok(Some("https://www.youtube.com/watch?v=abc".to_string()))
        );
        assert!(optional_video_link(Some("youtube.com/watch")).is_err());
        assert!(optional_video_link(Some("https://")).is_err());
    }

    #[test]
    fn amenities_report_unknown_names() {
        assert_eq!(
            amenity_list(Some("parking, pool,,")).unwrap(),
            vec![Amenity::Parking, Amenity::Pool]
        );
        assert_eq!(
            amenity_list(Some("parking, helipad")).unwrap_err(),
            "Unknown amenity: helipad"
        );
    }

    #[test]
    fn checkbox_values() {
        assert!(is_checked(Some("on")));
        assert!(is_checked(Some("TRUE")));
        assert!(!is_checked(Some("false")));
        assert!(!is_checked(None));
    }
}

//! Per-step validation contracts.
//!
//! [`FieldValidator::validate`] is a pure function from raw form input to a
//! typed [`StepPayload`] or an ordered list of field errors. It runs on
//! submit; [`FieldValidator::validate_field`] runs the same rules for a
//! single field when it loses focus. Neither touches the draft.

pub mod rules;

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use crate::types::config::WizardConfig;
use crate::types::draft::{StepId, StepPayload};
use crate::types::listing::{BasicInfo, Features, PhotosInfo, PropertyType, Review, TransactionType};
use crate::types::media::MediaSnapshot;
use crate::types::MIN_ADDRESS_CHARS;

use rules::messages;

/// Form field names, as the form submits them.
pub mod fields {
    pub const PROPERTY_TYPE: &str = "propertyType";
    pub const TRANSACTION_TYPE: &str = "transactionType";
    pub const ASKING_PRICE: &str = "askingPrice";
    pub const AREA_SQM: &str = "areaSqm";
    pub const ADDRESS: &str = "address";

    pub const PHOTOS: &str = "photos";
    pub const VIDEO_LINK: &str = "videoLink";

    pub const BEDROOMS: &str = "bedrooms";
    pub const BATHROOMS: &str = "bathrooms";
    pub const AMENITIES: &str = "amenities";
    pub const DESCRIPTION: &str = "description";

    pub const CONFIRMED: &str = "confirmed";
}

/// Raw form input: field name to text, where `None` is an explicit null.
#[derive(Debug, Clone, Default)]
pub struct RawInput {
    values: HashMap<String, Option<String>>,
    media: Option<MediaSnapshot>,
}

impl RawInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for a text value.
    pub fn with(mut self, field: &str, value: impl Into<String>) -> Self {
        self.values.insert(field.to_string(), Some(value.into()));
        self
    }

    /// Builder-style setter for an explicit null.
    pub fn with_null(mut self, field: &str) -> Self {
        self.values.insert(field.to_string(), None);
        self
    }

    /// Attach the gallery state the photos step validates against.
    pub fn with_media(mut self, snapshot: MediaSnapshot) -> Self {
        self.media = Some(snapshot);
        self
    }

    pub fn set(&mut self, field: &str, value: Option<String>) {
        self.values.insert(field.to_string(), value);
    }

    pub fn set_media(&mut self, snapshot: MediaSnapshot) {
        self.media = Some(snapshot);
    }

    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    /// The value as entered, or `None` when absent or null.
    pub fn raw(&self, field: &str) -> Option<&str> {
        self.values.get(field).and_then(|v| v.as_deref())
    }

    /// The trimmed value, or `None` when absent, null or blank.
    pub fn value(&self, field: &str) -> Option<&str> {
        self.raw(field).map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn media(&self) -> Option<&MediaSnapshot> {
        self.media.as_ref()
    }
}

/// A message attached to one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Field errors in field declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// First message for a field, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|e| e.field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keep only the errors for `field`.
    pub fn only(self, field: &str) -> Self {
        Self(self.0.into_iter().filter(|e| e.field == field).collect())
    }

    /// Record the outcome of one field rule, keeping the value on success.
    fn check<T, M: Into<String>>(&mut self, field: &'static str, result: Result<T, M>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(message) => {
                self.push(field, message);
                None
            }
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", e.field, e.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Declarative rule set for every wizard step.
#[derive(Debug, Clone)]
pub struct FieldValidator {
    max_description_chars: usize,
}

impl Default for FieldValidator {
    fn default() -> Self {
        Self::new(&WizardConfig::default())
    }
}

impl FieldValidator {
    pub fn new(config: &WizardConfig) -> Self {
        Self {
            max_description_chars: config.max_description_chars,
        }
    }

    /// Validate a whole step.
    pub fn validate(&self, step: StepId, raw: &RawInput) -> Result<StepPayload, FieldErrors> {
        match step {
            StepId::BasicInfo => self.basic_info(raw).map(StepPayload::BasicInfo),
            StepId::Photos => self.photos(raw).map(StepPayload::Photos),
            StepId::Features => self.features(raw).map(StepPayload::Features),
            StepId::Review => self.review(raw).map(StepPayload::Review),
        }
    }

    /// Errors for one field only, as shown when the field loses focus.
    pub fn validate_field(&self, step: StepId, field: &str, raw: &RawInput) -> FieldErrors {
        match self.validate(step, raw) {
            Ok(_) => FieldErrors::new(),
            Err(errors) => errors.only(field),
        }
    }

    fn basic_info(&self, raw: &RawInput) -> Result<BasicInfo, FieldErrors> {
        let mut errors = FieldErrors::new();

        let property_type = errors.check(
            fields::PROPERTY_TYPE,
            raw.value(fields::PROPERTY_TYPE)
                .and_then(|v| v.parse::<PropertyType>().ok())
                .ok_or(messages::SELECT_PROPERTY_TYPE),
        );

        // The toggle defaults to "sale" when the form never touched it.
        let transaction_type = errors.check(
            fields::TRANSACTION_TYPE,
            match raw.value(fields::TRANSACTION_TYPE) {
                None => Ok(TransactionType::default()),
                Some(v) => v
                    .parse::<TransactionType>()
                    .map_err(|_| messages::SELECT_TRANSACTION_TYPE),
            },
        );

        let asking_price = errors.check(
            fields::ASKING_PRICE,
            rules::positive_number(
                raw.raw(fields::ASKING_PRICE),
                messages::ASKING_PRICE_REQUIRED,
            ),
        );

        let area_sqm = errors.check(
            fields::AREA_SQM,
            rules::positive_number(raw.raw(fields::AREA_SQM), messages::AREA_REQUIRED),
        );

        let address = errors.check(
            fields::ADDRESS,
            match raw.value(fields::ADDRESS) {
                Some(a) if a.chars().count() >= MIN_ADDRESS_CHARS => Ok(a.to_string()),
                _ => Err(messages::FULL_ADDRESS),
            },
        );

        match (property_type, transaction_type, asking_price, area_sqm, address) {
            (Some(property_type), Some(transaction_type), Some(asking_price), Some(area_sqm), Some(address))
                if errors.is_empty() =>
            {
                Ok(BasicInfo {
                    property_type,
                    transaction_type,
                    asking_price,
                    area_sqm,
                    address,
                })
            }
            _ => Err(errors),
        }
    }

    fn photos(&self, raw: &RawInput) -> Result<PhotosInfo, FieldErrors> {
        let mut errors = FieldErrors::new();
        let snapshot = raw.media().cloned().unwrap_or_default();

        if snapshot.order.is_empty() {
            errors.push(fields::PHOTOS, messages::ADD_PHOTO);
        }

        let link_text = if raw.contains(fields::VIDEO_LINK) {
            raw.raw(fields::VIDEO_LINK)
        } else {
            snapshot.video_link.as_deref()
        };
        let video_link = errors.check(fields::VIDEO_LINK, rules::optional_video_link(link_text));

        match video_link {
            Some(video_link) if errors.is_empty() => Ok(PhotosInfo {
                photos: snapshot.order,
                primary: snapshot.primary,
                video_link,
            }),
            _ => Err(errors),
        }
    }

    fn features(&self, raw: &RawInput) -> Result<Features, FieldErrors> {
        let mut errors = FieldErrors::new();

        let bedrooms = errors.check(fields::BEDROOMS, rules::optional_count(raw.raw(fields::BEDROOMS)));
        let bathrooms = errors.check(fields::BATHROOMS, rules::optional_count(raw.raw(fields::BATHROOMS)));
        let amenities = errors.check(fields::AMENITIES, rules::amenity_list(raw.raw(fields::AMENITIES)));

        let description = errors.check(
            fields::DESCRIPTION,
            match raw.value(fields::DESCRIPTION) {
                Some(d) if d.chars().count() > self.max_description_chars => {
                    Err(messages::DESCRIPTION_TOO_LONG)
                }
                other => Ok(other.map(str::to_string)),
            },
        );

        match (bedrooms, bathrooms, amenities, description) {
            (Some(bedrooms), Some(bathrooms), Some(amenities), Some(description)) if errors.is_empty() => {
                Ok(Features {
                    bedrooms,
                    bathrooms,
                    amenities: amenities.into_iter().collect::<BTreeSet<_>>(),
                    description,
                })
            }
            _ => Err(errors),
        }
    }

    fn review(&self, raw: &RawInput) -> Result<Review, FieldErrors> {
        if rules::is_checked(raw.raw(fields::CONFIRMED)) {
            Ok(Review { confirmed: true })
        } else {
            let mut errors = FieldErrors::new();
            errors.push(fields::CONFIRMED, messages::CONFIRM_DETAILS);
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::listing::Amenity;
    use crate::types::media::MediaId;
    use proptest::prelude::*;

    fn valid_basic() -> RawInput {
        RawInput::new()
            .with(fields::PROPERTY_TYPE, "apartment")
            .with(fields::TRANSACTION_TYPE, "sale")
            .with(fields::ASKING_PRICE, "250000")
            .with(fields::AREA_SQM, "80")
            .with(fields::ADDRESS, "12 Main Street, Berlin")
    }

    #[test]
    fn valid_basic_info_parses() {
        let payload = FieldValidator::default()
            .validate(StepId::BasicInfo, &valid_basic())
            .unwrap();

        let StepPayload::BasicInfo(info) = payload else {
            panic!("expected basic info payload");
        };
        assert_eq!(info.property_type, PropertyType::Apartment);
        assert_eq!(info.transaction_type, TransactionType::Sale);
        assert_eq!(info.asking_price, 250000.0);
        assert_eq!(info.area_sqm, 80.0);
        assert_eq!(info.address, "12 Main Street, Berlin");
    }

    #[test]
    fn empty_price_is_required_not_invalid() {
        let raw = valid_basic().with(fields::ASKING_PRICE, "");
        let errors = FieldValidator::default()
            .validate(StepId::BasicInfo, &raw)
            .unwrap_err();
        assert_eq!(errors.get(fields::ASKING_PRICE), Some("Asking price is required"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn null_area_is_required() {
        let raw = valid_basic().with_null(fields::AREA_SQM);
        let errors = FieldValidator::default()
            .validate(StepId::BasicInfo, &raw)
            .unwrap_err();
        assert_eq!(errors.get(fields::AREA_SQM), Some("Square meters is required"));
    }

    #[test]
    fn text_price_is_invalid_number() {
        let raw = valid_basic().with(fields::ASKING_PRICE, "lots");
        let errors = FieldValidator::default()
            .validate(StepId::BasicInfo, &raw)
            .unwrap_err();
        assert_eq!(errors.get(fields::ASKING_PRICE), Some("Enter a valid number"));
    }

    #[test]
    fn errors_follow_field_order() {
        let errors = FieldValidator::default()
            .validate(StepId::BasicInfo, &RawInput::new())
            .unwrap_err();
        let order: Vec<_> = errors.fields().collect();
        assert_eq!(
            order,
            vec![
                fields::PROPERTY_TYPE,
                fields::ASKING_PRICE,
                fields::AREA_SQM,
                fields::ADDRESS
            ]
        );
        assert_eq!(errors.get(fields::PROPERTY_TYPE), Some("Select a property type"));
        assert_eq!(errors.get(fields::ADDRESS), Some("Enter a full address"));
    }

    #[test]
    fn free_text_transaction_type_is_rejected() {
        let raw = valid_basic().with(fields::TRANSACTION_TYPE, "lease");
        let errors = FieldValidator::default()
            .validate(StepId::BasicInfo, &raw)
            .unwrap_err();
        assert_eq!(
            errors.get(fields::TRANSACTION_TYPE),
            Some("Select a transaction type")
        );
    }

    #[test]
    fn short_address_is_rejected() {
        let raw = valid_basic().with(fields::ADDRESS, " Rue ");
        let errors = FieldValidator::default()
            .validate(StepId::BasicInfo, &raw)
            .unwrap_err();
        assert_eq!(errors.get(fields::ADDRESS), Some("Enter a full address"));
    }

    #[test]
    fn blur_reports_only_that_field() {
        let raw = RawInput::new().with(fields::ASKING_PRICE, "abc");
        let errors = FieldValidator::default().validate_field(StepId::BasicInfo, fields::ASKING_PRICE, &raw);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(fields::ASKING_PRICE), Some("Enter a valid number"));

        let errors = FieldValidator::default().validate_field(StepId::BasicInfo, fields::AREA_SQM, &valid_basic());
        assert!(errors.is_empty());
    }

    #[test]
    fn photos_step_needs_a_photo() {
        let errors = FieldValidator::default()
            .validate(StepId::Photos, &RawInput::new())
            .unwrap_err();
        assert_eq!(errors.get(fields::PHOTOS), Some("Add at least one photo"));
    }

    #[test]
    fn photos_step_carries_gallery_order_and_link() {
        let a = MediaId::new();
        let b = MediaId::new();
        let raw = RawInput::new()
            .with(fields::VIDEO_LINK, "https://vimeo.com/123")
            .with_media(MediaSnapshot {
                order: vec![b, a],
                primary: Some(a),
                video_link: None,
            });

        let StepPayload::Photos(photos) = FieldValidator::default().validate(StepId::Photos, &raw).unwrap() else {
            panic!("expected photos payload");
        };
        assert_eq!(photos.photos, vec![b, a]);
        assert_eq!(photos.primary, Some(a));
        assert_eq!(photos.video_link.as_deref(), Some("https://vimeo.com/123"));
    }

    #[test]
    fn features_parse_counts_and_amenities() {
        let raw = RawInput::new()
            .with(fields::BEDROOMS, "3")
            .with(fields::BATHROOMS, "")
            .with(fields::AMENITIES, "garden, parking, garden");

        let StepPayload::Features(features) = FieldValidator::default().validate(StepId::Features, &raw).unwrap() else {
            panic!("expected features payload");
        };
        assert_eq!(features.bedrooms, Some(3));
        assert_eq!(features.bathrooms, None);
        assert_eq!(
            features.amenities.into_iter().collect::<Vec<_>>(),
            vec![Amenity::Parking, Amenity::Garden]
        );
    }

    #[test]
    fn features_reject_fractional_rooms_and_long_descriptions() {
        let config = WizardConfig {
            max_description_chars: 10,
            ..WizardConfig::default()
        };
        let raw = RawInput::new()
            .with(fields::BEDROOMS, "2.5")
            .with(fields::DESCRIPTION, "a very long description");
        let errors = FieldValidator::new(&config)
            .validate(StepId::Features, &raw)
            .unwrap_err();
        assert_eq!(errors.get(fields::BEDROOMS), Some("Enter a whole number"));
        assert_eq!(errors.get(fields::DESCRIPTION), Some("Description is too long"));
    }

    #[test]
    fn review_requires_confirmation() {
        let validator = FieldValidator::default();
        assert!(validator.validate(StepId::Review, &RawInput::new()).is_err());
        assert_eq!(
            validator
                .validate(StepId::Review, &RawInput::new().with(fields::CONFIRMED, "true"))
                .unwrap(),
            StepPayload::Review(Review { confirmed: true })
        );
    }

    proptest! {
        #[test]
        fn any_positive_numbers_validate(price in 0.01f64..1e12, area in 0.01f64..1e6) {
            let raw = valid_basic()
                .with(fields::ASKING_PRICE, price.to_string())
                .with(fields::AREA_SQM, area.to_string());
            let payload = FieldValidator::default().validate(StepId::BasicInfo, &raw).unwrap();
            let StepPayload::BasicInfo(info) = payload else { unreachable!() };
            prop_assert!(info.asking_price.is_finite() && info.asking_price > 0.0);
            prop_assert!(info.area_sqm.is_finite() && info.area_sqm > 0.0);
        }

        #[test]
        fn non_positive_price_is_required(price in -1e9f64..=0.0) {
            let raw = valid_basic().with(fields::ASKING_PRICE, price.to_string());
            let errors = FieldValidator::default().validate(StepId::BasicInfo, &raw).unwrap_err();
            prop_assert_eq!(errors.get(fields::ASKING_PRICE), Some("Asking price is required"));
        }
    }
}

//! Strongly-typed step payloads for a listing draft.
//!
//! Each wizard step produces exactly one of these records once its input
//! validates. They are never built field-by-field from outside the
//! validator.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::media::MediaId;

/// Kind of property being listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Apartment,
    House,
    Villa,
    Commercial,
    Land,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "apartment",
            PropertyType::House => "house",
            PropertyType::Villa => "villa",
            PropertyType::Commercial => "commercial",
            PropertyType::Land => "land",
        }
    }

    /// English label shown in the property type select.
    pub fn label(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "Apartment",
            PropertyType::House => "Detached House",
            PropertyType::Villa => "Villa",
            PropertyType::Commercial => "Commercial Space",
            PropertyType::Land => "Land / Plot",
        }
    }

    pub fn variants() -> &'static [PropertyType] {
        &[
            PropertyType::Apartment,
            PropertyType::House,
            PropertyType::Villa,
            PropertyType::Commercial,
            PropertyType::Land,
        ]
    }
}

impl FromStr for PropertyType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::variants()
            .iter()
            .copied()
            .find(|v| v.as_str() == s)
            .ok_or(())
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the property is offered for sale or for rent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    #[default]
    Sale,
    Rent,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Sale => "sale",
            TransactionType::Rent => "rent",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::Sale => "For Sale",
            TransactionType::Rent => "For Rent",
        }
    }
}

impl FromStr for TransactionType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sale" => Ok(TransactionType::Sale),
            "rent" => Ok(TransactionType::Rent),
            _ => Err(()),
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Step 1 payload. This is the only payload persisted across restarts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicInfo {
    pub property_type: PropertyType,
    pub transaction_type: TransactionType,
    pub asking_price: f64,
    pub area_sqm: f64,
    pub address: String,
}

impl BasicInfo {
    /// Checks the invariants a validated record always satisfies.
    ///
    /// Used when restoring a persisted record, which may have been edited
    /// or written by an older build.
    pub fn is_consistent(&self) -> bool {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        positive(self.asking_price)
            && positive(self.area_sqm)
            && self.address.trim().chars().count() >= super::MIN_ADDRESS_CHARS
    }
}

/// Step 2 payload: gallery order, cover photo and optional video tour.
///
/// Holds media ids only; the binary data stays in the session's
/// `MediaCollection` and is never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotosInfo {
    pub photos: Vec<MediaId>,
    pub primary: Option<MediaId>,
    pub video_link: Option<String>,
}

/// Amenities offered by the features step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Amenity {
    Parking,
    Balcony,
    Garden,
    Elevator,
    Pool,
    Furnished,
    AirConditioning,
}

impl Amenity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Amenity::Parking => "parking",
            Amenity::Balcony => "balcony",
            Amenity::Garden => "garden",
            Amenity::Elevator => "elevator",
            Amenity::Pool => "pool",
            Amenity::Furnished => "furnished",
            Amenity::AirConditioning => "air_conditioning",
        }
    }

    pub fn variants() -> &'static [Amenity] {
        &[
            Amenity::Parking,
            Amenity::Balcony,
            Amenity::Garden,
            Amenity::Elevator,
            Amenity::Pool,
            Amenity::Furnished,
            Amenity::AirConditioning,
        ]
    }
}

impl FromStr for Amenity {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::variants()
            .iter()
            .copied()
            .find(|v| v.as_str() == s)
            .ok_or(())
    }
}

/// Step 3 payload.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Features {
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub amenities: BTreeSet<Amenity>,
    pub description: Option<String>,
}

/// Step 4 payload: the author confirmed the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub confirmed: bool,
}

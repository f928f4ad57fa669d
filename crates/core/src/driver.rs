//! Driver and violation-type records supplied by the backend.
//!
//! Wire field names follow the backend's database schema (Bosnian:
//! `vozac_id`, `ime`, `tablica`, ...); Rust field names are English.
//! Both records are immutable once received -- the client only renders
//! them and echoes ids back in decision payloads.

use serde::{Deserialize, Serialize};

use crate::types::{DriverId, ViolationTypeId};

/// A registered driver matched to a detected plate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverRecord {
    #[serde(rename = "vozac_id")]
    pub id: DriverId,
    #[serde(rename = "ime")]
    pub name: String,
    #[serde(rename = "tablica")]
    pub plate: String,
    #[serde(rename = "auto_tip")]
    pub vehicle_type: String,
    /// Holds a disabled-parking permit.
    #[serde(rename = "invalid")]
    pub disabled_permit: bool,
    /// Holds a reserved-spot entitlement.
    #[serde(rename = "rezervacija")]
    pub reservation: bool,
}

/// A violation class from the backend's offence catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationType {
    #[serde(rename = "prekrsaj_id")]
    pub id: ViolationTypeId,
    #[serde(rename = "opis")]
    pub description: String,
    /// Fine amount in convertible marks (KM).
    #[serde(rename = "kazna")]
    pub fine: i64,
}

/// Payload for registering a new driver.
#[derive(Debug, Clone, Serialize)]
pub struct NewDriver {
    #[serde(rename = "ime")]
    pub name: String,
    #[serde(rename = "tablica")]
    pub plate: String,
    #[serde(rename = "auto_tip")]
    pub vehicle_type: String,
    #[serde(rename = "invalid")]
    pub disabled_permit: bool,
    #[serde(rename = "rezervacija")]
    pub reservation: bool,
}

/// Payload for registering a new violation class.
#[derive(Debug, Clone, Serialize)]
pub struct NewViolationType {
    #[serde(rename = "opis")]
    pub description: String,
    #[serde(rename = "kazna")]
    pub fine: i64,
}

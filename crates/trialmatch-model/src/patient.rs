//! The curated patient record
//!
//! The record is an immutable snapshot assembled by the external curation
//! pipeline. Accessors never block and never panic: where the pipeline could
//! not establish a fact, the accessor returns `None` (or an empty iterator)
//! and the evaluation layer decides what insufficiency means for a given
//! criterion.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Patient gender as registered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    Male,
    Female,
}

/// Basic demographics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demographics {
    pub birth_year: i32,
    pub gender: Option<Gender>,
}

/// One laboratory measurement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabMeasurement {
    /// Measurement code from the curation pipeline's lab catalog
    pub code: String,
    pub value: Decimal,
    pub unit: String,
    pub date: NaiveDate,
}

/// Administration status of a medication entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MedicationStatus {
    Active,
    OnHold,
    Stopped,
    Unknown,
}

/// One medication entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medication {
    pub name: String,
    pub status: MedicationStatus,
    /// ATC-derived category names
    #[serde(default)]
    pub categories: BTreeSet<String>,
}

impl Medication {
    /// Whether the patient currently receives this medication
    pub fn is_active(&self) -> bool {
        self.status == MedicationStatus::Active
    }
}

/// One line of prior anti-cancer treatment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreatmentHistoryEntry {
    pub name: String,
    /// Treatment category names (e.g. "CHEMOTHERAPY", "IMMUNOTHERAPY")
    #[serde(default)]
    pub categories: BTreeSet<String>,
    pub stop_year: Option<i32>,
    /// Whether this entry counts as a systemic treatment line
    #[serde(default)]
    pub is_systemic: bool,
}

/// Tumor stage as curated from pathology reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TumorStage {
    I,
    II,
    III,
    IV,
}

impl TumorStage {
    /// Stage IV disease counts as metastatic
    pub fn is_metastatic(&self) -> bool {
        matches!(self, Self::IV)
    }
}

/// Curated tumor details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TumorDetails {
    /// Disease ontology ids of the primary tumor
    #[serde(default)]
    pub doids: BTreeSet<String>,
    pub stage: Option<TumorStage>,
    pub has_measurable_disease: Option<bool>,
    pub has_brain_lesions: Option<bool>,
}

/// Kind of molecular driver event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DriverType {
    ActivatingMutation,
    Inactivation,
    Amplification,
    Fusion,
}

/// One detected molecular driver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Driver {
    pub gene: String,
    /// Event notation, e.g. "BRAF V600E"
    pub event: String,
    pub driver_type: DriverType,
}

/// Molecular test results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MolecularRecord {
    #[serde(default)]
    pub drivers: Vec<Driver>,
    /// Microsatellite instability, when the assay reported it
    pub is_microsatellite_unstable: Option<bool>,
    /// Whether the underlying assay passed quality control
    #[serde(default)]
    pub has_reliable_quality: bool,
}

/// The immutable patient snapshot that criteria are evaluated against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub patient_id: String,
    /// Date the snapshot was curated; the reference point for age and
    /// recency computations
    pub registration_date: NaiveDate,
    pub demographics: Demographics,
    /// Latest WHO performance status (0-5), when assessed
    pub who_status: Option<u32>,
    #[serde(default)]
    pub tumor: TumorDetails,
    #[serde(default)]
    pub labs: Vec<LabMeasurement>,
    #[serde(default)]
    pub medications: Vec<Medication>,
    #[serde(default)]
    pub treatment_history: Vec<TreatmentHistoryEntry>,
    #[serde(default)]
    pub molecular: MolecularRecord,
}

impl PatientRecord {
    /// Age in whole years at the registration date, by year arithmetic.
    /// Birth dates are curated to year precision only.
    pub fn age_at_registration(&self) -> i32 {
        self.registration_date.year() - self.demographics.birth_year
    }

    /// The most recent measurement for a lab code, if any exists
    pub fn most_recent_lab(&self, code: &str) -> Option<&LabMeasurement> {
        self.labs
            .iter()
            .filter(|lab| lab.code == code)
            .max_by_key(|lab| lab.date)
    }

    /// The most recent lab measurement overall, if any exists
    pub fn most_recent_lab_overall(&self) -> Option<&LabMeasurement> {
        self.labs.iter().max_by_key(|lab| lab.date)
    }

    /// Medications the patient currently receives
    pub fn active_medications(&self) -> impl Iterator<Item = &Medication> {
        self.medications.iter().filter(|m| m.is_active())
    }

    /// Whether any prior treatment line carries the given category
    pub fn has_had_treatment_with_category(&self, category: &str) -> bool {
        self.treatment_history
            .iter()
            .any(|entry| entry.categories.contains(category))
    }

    /// Number of prior systemic treatment lines
    pub fn systemic_treatment_count(&self) -> usize {
        self.treatment_history.iter().filter(|e| e.is_systemic).count()
    }

    /// Detected drivers in the given gene
    pub fn drivers_in_gene<'a>(&'a self, gene: &'a str) -> impl Iterator<Item = &'a Driver> {
        self.molecular.drivers.iter().filter(move |d| d.gene == gene)
    }
}

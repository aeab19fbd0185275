use serde::de::{self, Deserializer};
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Column names of the registration table
// ---------------------------------------------------------------------------

pub const MODEL_YEAR: &str = "Model Year";
pub const VEHICLE_TYPE: &str = "Electric Vehicle Type";
pub const ELECTRIC_RANGE: &str = "Electric Range";
pub const BASE_MSRP: &str = "Base MSRP";

/// Columns every input file must provide.
pub const REQUIRED_COLUMNS: [&str; 4] = [MODEL_YEAR, VEHICLE_TYPE, ELECTRIC_RANGE, BASE_MSRP];

/// Cell contents treated as missing, mirroring the Pandas `read_csv` defaults.
const MISSING_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

pub fn is_missing_token(s: &str) -> bool {
    MISSING_TOKENS.contains(&s)
}

// ---------------------------------------------------------------------------
// Vehicle – one registration record
// ---------------------------------------------------------------------------

/// A single registration (one row of the source table).
///
/// Only the columns the dashboard reads are kept; everything else in the
/// file (VIN, county, make, ...) is ignored while parsing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Vehicle {
    #[serde(rename = "Model Year", default, deserialize_with = "optional_year")]
    pub model_year: Option<i64>,

    #[serde(
        rename = "Electric Vehicle Type",
        default,
        deserialize_with = "optional_text"
    )]
    pub vehicle_type: Option<String>,

    /// Miles on a full charge.
    #[serde(rename = "Electric Range", default, deserialize_with = "optional_number")]
    pub electric_range: Option<f64>,

    /// US dollars.
    #[serde(rename = "Base MSRP", default, deserialize_with = "optional_number")]
    pub base_msrp: Option<f64>,
}

// -- Lenient cell decoding shared by the CSV and JSON loaders --

/// A raw cell before missing-value handling. CSV fields arrive as inferred
/// numbers or text, JSON fields as numbers or strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum Cell {
    Number(f64),
    Text(String),
}

fn optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Cell>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Cell::Number(v)) if v.is_nan() => Ok(None),
        Some(Cell::Number(v)) => Ok(Some(v)),
        Some(Cell::Text(s)) => {
            let trimmed = s.trim();
            if is_missing_token(trimmed) {
                return Ok(None);
            }
            trimmed
                .parse::<f64>()
                .map(|v| if v.is_nan() { None } else { Some(v) })
                .map_err(|_| de::Error::custom(format!("'{s}' is not a number")))
        }
    }
}

fn optional_year<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match optional_number(deserializer)? {
        None => Ok(None),
        Some(v) => year_from_number(v).map_err(de::Error::custom),
    }
}

/// Pandas promotes a year column with gaps to float, so `2020.0` is a valid
/// year as well. NaN is missing; any other non-whole value is rejected.
pub fn year_from_number(v: f64) -> Result<Option<i64>, String> {
    if v.is_nan() {
        Ok(None)
    } else if v.is_finite() && v.fract() == 0.0 {
        Ok(Some(v as i64))
    } else {
        Err(format!("'{v}' is not a whole year"))
    }
}

fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !is_missing_token(s)))
}

// ---------------------------------------------------------------------------
// EvDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset. Built once and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct EvDataset {
    vehicles: Vec<Vehicle>,
}

impl EvDataset {
    pub fn from_vehicles(vehicles: Vec<Vehicle>) -> Self {
        EvDataset { vehicles }
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Number of registrations.
    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }
}

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use arrow::array::{Array, ArrayRef, AsArray, StringArray};
use arrow::compute::kernels::cast::{cast_with_options, CastOptions};
use arrow::datatypes::{DataType, Float64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use thiserror::Error;

use super::model::{
    is_missing_token, year_from_number, EvDataset, Vehicle, BASE_MSRP, ELECTRIC_RANGE,
    MODEL_YEAR, REQUIRED_COLUMNS, VEHICLE_TYPE,
};

/// Default dataset location, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "./Electric_Vehicle_Population_Data.csv";

/// Failures the loader recognises by name. Anything else (I/O, malformed
/// rows) surfaces as a plain [`anyhow::Error`] with context attached.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("File not found: {}. Please ensure the file is in the correct directory.", .0.display())]
    FileNotFound(PathBuf),

    #[error("Dataset is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("Unsupported file extension: .{0}")]
    UnsupportedFormat(String),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the registration table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one registration per line (default)
/// * `.json`    – `[{ "Model Year": 2020, "Electric Range": 200, ... }, ...]`
/// * `.parquet` – flat table with the same column names
///
/// The existence check runs first so a missing file never reaches a parser.
pub fn load_file(path: &Path) -> Result<EvDataset> {
    if !path.exists() {
        return Err(DatasetError::FileNotFound(path.to_path_buf()).into());
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(DatasetError::UnsupportedFormat(other.to_string()).into()),
    };

    log::info!(
        "Loaded {} registrations from {}",
        dataset.len(),
        path.display()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<EvDataset> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    read_csv(BufReader::new(file))
}

/// Parse CSV text from any reader. Columns other than the four the
/// dashboard uses are skipped.
pub fn read_csv<R: Read>(reader: R) -> Result<EvDataset> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader.headers().context("reading CSV headers")?.clone();

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(DatasetError::MissingColumn(column).into());
        }
    }
    log::debug!(
        "Ignoring {} unused CSV columns",
        headers.len().saturating_sub(REQUIRED_COLUMNS.len())
    );

    let mut vehicles = Vec::new();
    for (row_no, result) in reader.deserialize::<Vehicle>().enumerate() {
        let vehicle = result.with_context(|| format!("CSV row {}", row_no + 1))?;
        vehicles.push(vehicle);
    }

    Ok(EvDataset::from_vehicles(vehicles))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Model Year": 2020, "Electric Vehicle Type": "BEV",
///     "Electric Range": 200, "Base MSRP": 40000 },
///   ...
/// ]
/// ```
///
/// Absent keys and `null` both count as missing.
fn load_json(path: &Path) -> Result<EvDataset> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let vehicles: Vec<Vehicle> =
        serde_json::from_reader(BufReader::new(file)).context("parsing JSON records")?;
    Ok(EvDataset::from_vehicles(vehicles))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file written by Pandas (`df.to_parquet()`) or Polars.
///
/// Numeric columns may be any integer, float or string type, the vehicle
/// type any string type. Values follow the CSV rules: missing tokens and
/// NaN are missing, text that is not a number is an error, and years must
/// be whole.
fn load_parquet(path: &Path) -> Result<EvDataset> {
    let file = File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut vehicles = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        read_batch(&batch, &mut vehicles)?;
    }

    Ok(EvDataset::from_vehicles(vehicles))
}

fn read_batch(batch: &RecordBatch, out: &mut Vec<Vehicle>) -> Result<()> {
    let years = numeric_column(batch, MODEL_YEAR)?;
    let types = text_column(batch, VEHICLE_TYPE)?;
    let ranges = numeric_column(batch, ELECTRIC_RANGE)?;
    let prices = numeric_column(batch, BASE_MSRP)?;

    let years = years.as_primitive::<Float64Type>();
    let types = types.as_string::<i32>();
    let ranges = ranges.as_primitive::<Float64Type>();
    let prices = prices.as_primitive::<Float64Type>();

    // Rows from earlier batches, for 1-based row numbers in errors.
    let offset = out.len();
    for row in 0..batch.num_rows() {
        let model_year = if years.is_null(row) {
            None
        } else {
            year_from_number(years.value(row))
                .map_err(|e| anyhow!(e))
                .with_context(|| format!("Parquet row {}", offset + row + 1))?
        };

        out.push(Vehicle {
            model_year,
            vehicle_type: (!types.is_null(row)).then(|| types.value(row).to_string()),
            electric_range: non_null_f64(ranges.is_null(row), ranges.value(row)),
            base_msrp: non_null_f64(prices.is_null(row), prices.value(row)),
        });
    }
    Ok(())
}

/// A column as `Utf8` with missing tokens turned into nulls.
fn text_column(batch: &RecordBatch, name: &'static str) -> Result<ArrayRef> {
    let text = strict_cast(column(batch, name)?, &DataType::Utf8, name)?;
    let cleaned: StringArray = text
        .as_string::<i32>()
        .iter()
        .map(|v| v.filter(|s| !is_missing_token(s.trim())))
        .collect();
    Ok(Arc::new(cleaned))
}

/// A column as `Float64`. Text columns are trimmed and cleaned of missing
/// tokens first; any remaining text must parse as a number.
fn numeric_column(batch: &RecordBatch, name: &'static str) -> Result<ArrayRef> {
    let raw = column(batch, name)?;
    let source: ArrayRef = match raw.data_type() {
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => {
            let text = strict_cast(raw, &DataType::Utf8, name)?;
            let cleaned: StringArray = text
                .as_string::<i32>()
                .iter()
                .map(|v| v.map(str::trim).filter(|s| !is_missing_token(s)))
                .collect();
            Arc::new(cleaned)
        }
        _ => raw,
    };
    strict_cast(source, &DataType::Float64, name)
}

fn column(batch: &RecordBatch, name: &'static str) -> Result<ArrayRef> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| DatasetError::MissingColumn(name))?;
    Ok(batch.column(idx).clone())
}

/// Cast that fails on unconvertible values instead of nulling them.
fn strict_cast(array: ArrayRef, to: &DataType, name: &str) -> Result<ArrayRef> {
    let options = CastOptions {
        safe: false,
        ..Default::default()
    };
    cast_with_options(array.as_ref(), to, &options)
        .with_context(|| format!("converting column '{name}' to {to}"))
}

fn non_null_f64(is_null: bool, value: f64) -> Option<f64> {
    if is_null || value.is_nan() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;
    use tempfile::TempDir;

    const SCENARIO_CSV: &str = "\
Model Year,Electric Vehicle Type,Electric Range,Base MSRP
2020,BEV,200,40000
2020,PHEV,50,35000
2021,BEV,250,
";

    #[test]
    fn test_read_csv_scenario() {
        let ds = read_csv(SCENARIO_CSV.as_bytes()).unwrap();
        assert_eq!(ds.len(), 3);
        let last = &ds.vehicles()[2];
        assert_eq!(last.model_year, Some(2021));
        assert_eq!(last.electric_range, Some(250.0));
        assert_eq!(last.base_msrp, None);
    }

    #[test]
    fn test_load_file_csv_from_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Electric_Vehicle_Population_Data.csv");
        std::fs::write(&path, SCENARIO_CSV).unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn test_missing_file_is_reported_verbatim() {
        let path = Path::new("./does_not_exist/Electric_Vehicle_Population_Data.csv");
        let err = load_file(path).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<DatasetError>(),
            Some(DatasetError::FileNotFound(_))
        ));
        assert_eq!(
            err.to_string(),
            "File not found: ./does_not_exist/Electric_Vehicle_Population_Data.csv. \
             Please ensure the file is in the correct directory."
        );
    }

    #[test]
    fn test_missing_column() {
        let err = read_csv("Model Year,Electric Range,Base MSRP\n2020,1,2\n".as_bytes())
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DatasetError>(),
            Some(DatasetError::MissingColumn(VEHICLE_TYPE))
        ));
    }

    #[test]
    fn test_malformed_value_names_the_row() {
        let err = read_csv(
            "Model Year,Electric Vehicle Type,Electric Range,Base MSRP\n\
             2020,BEV,200,40000\n\
             2020,BEV,lots,40000\n"
                .as_bytes(),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "CSV row 2");
        assert!(format!("{err:#}").contains("'lots' is not a number"));
    }

    #[test]
    fn test_header_only_csv_is_empty() {
        let ds = read_csv("Model Year,Electric Vehicle Type,Electric Range,Base MSRP\n".as_bytes())
            .unwrap();
        assert!(ds.is_empty());
    }

    #[test]
    fn test_unsupported_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.xlsx");
        std::fs::write(&path, b"").unwrap();

        let err = load_file(&path).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported file extension: .xlsx");
    }

    #[test]
    fn test_load_json_records() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ev.json");
        let mut file = File::create(&path).unwrap();
        write!(
            file,
            r#"[
                {{"Model Year": 2020, "Electric Vehicle Type": "BEV", "Electric Range": 200, "Base MSRP": 40000}},
                {{"Model Year": 2021, "Electric Vehicle Type": "PHEV", "Electric Range": 50, "Base MSRP": null}}
            ]"#
        )
        .unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.vehicles()[1].vehicle_type.as_deref(), Some("PHEV"));
        assert_eq!(ds.vehicles()[1].base_msrp, None);
    }

    fn write_parquet(path: &Path, columns: Vec<(&str, ArrayRef)>) {
        let batch = RecordBatch::try_from_iter(columns).unwrap();
        let file = File::create(path).unwrap();
        let mut writer = ArrowWriter::try_new(file, batch.schema(), None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();
    }

    #[test]
    fn test_load_parquet_with_nulls() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ev.parquet");
        write_parquet(
            &path,
            vec![
                (MODEL_YEAR, Arc::new(Int64Array::from(vec![2020, 2020, 2021])) as ArrayRef),
                (
                    VEHICLE_TYPE,
                    Arc::new(StringArray::from(vec![Some("BEV"), Some("PHEV"), None])) as ArrayRef,
                ),
                (
                    ELECTRIC_RANGE,
                    Arc::new(Float64Array::from(vec![Some(200.0), Some(50.0), Some(250.0)])) as ArrayRef,
                ),
                (
                    BASE_MSRP,
                    Arc::new(Float64Array::from(vec![Some(40000.0), Some(35000.0), None])) as ArrayRef,
                ),
            ],
        );

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 3);
        let v = &ds.vehicles()[2];
        assert_eq!(v.model_year, Some(2021));
        assert_eq!(v.vehicle_type, None);
        assert_eq!(v.electric_range, Some(250.0));
        assert_eq!(v.base_msrp, None);
    }

    #[test]
    fn test_parquet_nan_year_and_text_tokens_are_missing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ev.parquet");
        write_parquet(
            &path,
            vec![
                (MODEL_YEAR, Arc::new(Float64Array::from(vec![f64::NAN, 2020.0])) as ArrayRef),
                (VEHICLE_TYPE, Arc::new(StringArray::from(vec!["NA", "BEV"])) as ArrayRef),
                (ELECTRIC_RANGE, Arc::new(StringArray::from(vec!["NA", " 200 "])) as ArrayRef),
                (BASE_MSRP, Arc::new(Float64Array::from(vec![f64::NAN, 40000.0])) as ArrayRef),
            ],
        );

        let ds = load_file(&path).unwrap();
        let first = &ds.vehicles()[0];
        assert_eq!(first.model_year, None);
        assert_eq!(first.vehicle_type, None);
        assert_eq!(first.electric_range, None);
        assert_eq!(first.base_msrp, None);

        let second = &ds.vehicles()[1];
        assert_eq!(second.model_year, Some(2020));
        assert_eq!(second.electric_range, Some(200.0));
    }

    #[test]
    fn test_parquet_fractional_year_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ev.parquet");
        write_parquet(
            &path,
            vec![
                (MODEL_YEAR, Arc::new(Float64Array::from(vec![2020.0, 2020.5])) as ArrayRef),
                (VEHICLE_TYPE, Arc::new(StringArray::from(vec!["BEV", "BEV"])) as ArrayRef),
                (ELECTRIC_RANGE, Arc::new(Float64Array::from(vec![200.0, 200.0])) as ArrayRef),
                (BASE_MSRP, Arc::new(Float64Array::from(vec![40000.0, 40000.0])) as ArrayRef),
            ],
        );

        let err = load_file(&path).unwrap_err();
        assert_eq!(err.to_string(), "Parquet row 2");
        assert!(format!("{err:#}").contains("'2020.5' is not a whole year"));
    }

    #[test]
    fn test_parquet_non_numeric_text_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ev.parquet");
        write_parquet(
            &path,
            vec![
                (MODEL_YEAR, Arc::new(Int64Array::from(vec![2020, 2021])) as ArrayRef),
                (VEHICLE_TYPE, Arc::new(StringArray::from(vec!["BEV", "BEV"])) as ArrayRef),
                (ELECTRIC_RANGE, Arc::new(StringArray::from(vec!["far", "200"])) as ArrayRef),
                (BASE_MSRP, Arc::new(Float64Array::from(vec![40000.0, 40000.0])) as ArrayRef),
            ],
        );

        let err = load_file(&path).unwrap_err();
        assert_eq!(
            err.to_string(),
            "converting column 'Electric Range' to Float64"
        );
    }
}

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::Parser;
use parquet::arrow::ArrowWriter;

const BEV: &str = "Battery Electric Vehicle (BEV)";
const PHEV: &str = "Plug-in Hybrid Electric Vehicle (PHEV)";

/// (make, model, type, first model year, typical range, typical MSRP)
const CATALOG: &[(&str, &str, &str, i64, f64, f64)] = &[
    ("TESLA", "MODEL 3", BEV, 2017, 266.0, 39990.0),
    ("TESLA", "MODEL Y", BEV, 2020, 291.0, 52990.0),
    ("TESLA", "MODEL S", BEV, 2012, 208.0, 69900.0),
    ("NISSAN", "LEAF", BEV, 2011, 150.0, 28800.0),
    ("CHEVROLET", "BOLT EV", BEV, 2017, 238.0, 36620.0),
    ("CHEVROLET", "VOLT", PHEV, 2011, 53.0, 33220.0),
    ("BMW", "I3", BEV, 2014, 153.0, 44450.0),
    ("TOYOTA", "PRIUS PRIME", PHEV, 2017, 25.0, 27600.0),
    ("FORD", "FUSION", PHEV, 2013, 21.0, 34120.0),
    ("KIA", "NIRO", PHEV, 2018, 26.0, 29590.0),
];

const COUNTIES: &[(&str, &str, u32)] = &[
    ("King", "Seattle", 98101),
    ("King", "Bellevue", 98004),
    ("Snohomish", "Everett", 98201),
    ("Pierce", "Tacoma", 98402),
    ("Clark", "Vancouver", 98660),
    ("Thurston", "Olympia", 98501),
];

/// Write a synthetic Electric_Vehicle_Population_Data file.
#[derive(Parser, Debug)]
#[command(about)]
struct Args {
    /// Output file; `.parquet` writes Parquet, anything else CSV
    #[arg(
        short,
        long,
        default_value = "Electric_Vehicle_Population_Data.csv"
    )]
    output: PathBuf,

    /// Number of registrations to generate
    #[arg(short, long, default_value = "5000")]
    rows: usize,

    /// Seed for the deterministic generator
    #[arg(long, default_value = "42")]
    seed: u64,
}

/// Deterministic SplitMix64 generator.
struct SplitMix64(u64);

impl SplitMix64 {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)`.
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

struct Row {
    vin: String,
    county: &'static str,
    city: &'static str,
    postal_code: u32,
    model_year: i64,
    make: &'static str,
    model: &'static str,
    vehicle_type: &'static str,
    electric_range: Option<f64>,
    base_msrp: Option<f64>,
}

fn generate(rows: usize, rng: &mut SplitMix64) -> Vec<Row> {
    (0..rows)
        .map(|_| {
            let (make, model, vehicle_type, first_year, range, msrp) =
                CATALOG[rng.below(CATALOG.len())];
            let (county, city, postal_code) = COUNTIES[rng.below(COUNTIES.len())];

            // Newer years are more common.
            let span = (2024 - first_year + 1) as f64;
            let model_year = first_year + (rng.next_f64().sqrt() * span) as i64;
            let model_year = model_year.min(2024);

            // Later model years of the same car go further.
            let improvement = 1.0 + 0.03 * (model_year - first_year) as f64;
            let electric_range =
                (!rng.chance(0.02)).then(|| (range * improvement).round());

            // Base MSRP is sparsely reported in the real registry.
            let base_msrp = (!rng.chance(0.35))
                .then(|| (msrp * (0.9 + 0.2 * rng.next_f64()) / 10.0).round() * 10.0);

            Row {
                vin: format!("{:010X}", rng.next_u64() >> 24),
                county,
                city,
                postal_code,
                model_year,
                make,
                model,
                vehicle_type,
                electric_range,
                base_msrp,
            }
        })
        .collect()
}

fn write_csv(path: &Path, rows: &[Row]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    writer.write_record([
        "VIN (1-10)",
        "County",
        "City",
        "State",
        "Postal Code",
        "Model Year",
        "Make",
        "Model",
        "Electric Vehicle Type",
        "Electric Range",
        "Base MSRP",
    ])?;

    let optional = |v: Option<f64>| v.map(|x| x.to_string()).unwrap_or_default();
    for row in rows {
        writer.write_record([
            row.vin.clone(),
            row.county.to_string(),
            row.city.to_string(),
            "WA".to_string(),
            row.postal_code.to_string(),
            row.model_year.to_string(),
            row.make.to_string(),
            row.model.to_string(),
            row.vehicle_type.to_string(),
            optional(row.electric_range),
            optional(row.base_msrp),
        ])?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

/// Only the four columns the dashboard reads.
fn write_parquet(path: &Path, rows: &[Row]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Model Year", DataType::Int64, false),
        Field::new("Electric Vehicle Type", DataType::Utf8, false),
        Field::new("Electric Range", DataType::Float64, true),
        Field::new("Base MSRP", DataType::Float64, true),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.model_year))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.vehicle_type))),
            Arc::new(Float64Array::from(
                rows.iter().map(|r| r.electric_range).collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(
                rows.iter().map(|r| r.base_msrp).collect::<Vec<_>>(),
            )),
        ],
    )
    .context("building record batch")?;

    let file = File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = SplitMix64(args.seed);
    let rows = generate(args.rows, &mut rng);

    let is_parquet = args
        .output
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("parquet"));

    if is_parquet {
        write_parquet(&args.output, &rows)?;
    } else {
        write_csv(&args.output, &rows)?;
    }

    println!(
        "Wrote {} registrations to {}",
        rows.len(),
        args.output.display()
    );
    Ok(())
}

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::Parser;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// Write a deterministic synthetic launch records table
#[derive(Debug, Parser)]
#[command(name = "generate_sample", version, about)]
struct Args {
    /// Output file; a .parquet or .pq extension writes Parquet, anything else CSV
    #[arg(default_value = "spacex_launch_dash.csv")]
    output: PathBuf,

    /// Number of launches to generate
    #[arg(short = 'n', long, default_value_t = 56, value_parser = clap::value_parser!(u32).range(1..))]
    count: u32,

    /// Random seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// One output row, with the dashboard's column names.
#[derive(Debug, Serialize)]
struct Launch {
    #[serde(rename = "Flight Number")]
    flight_number: i64,
    #[serde(rename = "Launch Site")]
    site: &'static str,
    #[serde(rename = "class")]
    class: i64,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass: f64,
    #[serde(rename = "Booster Version Category")]
    booster: &'static str,
}

/// Deterministic splitmix64 stream, enough for reproducible sample data.
struct SplitMix(u64);

impl SplitMix {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// (site, share of launches)
const SITES: [(&str, f64); 4] = [
    ("CCAFS LC-40", 0.46),
    ("KSC LC-39A", 0.23),
    ("VAFB SLC-4E", 0.18),
    ("CCAFS SLC-40", 0.13),
];

/// (booster category, base success rate); later boosters succeed more often.
const BOOSTERS: [(&str, f64); 5] = [
    ("v1.0", 0.2),
    ("v1.1", 0.35),
    ("FT", 0.7),
    ("B4", 0.6),
    ("B5", 0.95),
];

const MAX_PAYLOAD: f64 = 9600.0;

fn generate(n: usize, rng: &mut SplitMix) -> Vec<Launch> {
    (0..n)
        .map(|i| {
            // Booster generation advances with the flight number.
            let era = (i * BOOSTERS.len() / n).min(BOOSTERS.len() - 1);
            let (booster, base_rate) = if rng.unit() < 0.8 {
                BOOSTERS[era]
            } else {
                rng.pick(&BOOSTERS)
            };

            let mut r = rng.unit();
            let site = SITES
                .iter()
                .find(|(_, share)| {
                    r -= share;
                    r < 0.0
                })
                .map_or(SITES[0].0, |(s, _)| *s);

            // Round to 100 kg; a few launches carry no payload at all.
            let payload_mass = if rng.unit() < 0.03 {
                0.0
            } else {
                ((rng.unit() * MAX_PAYLOAD) / 100.0).round() * 100.0
            };

            // Heavy payloads are slightly riskier.
            let rate = base_rate - 0.1 * payload_mass / MAX_PAYLOAD;
            let class = i64::from(rng.unit() < rate);

            Launch {
                flight_number: i as i64 + 1,
                site,
                class,
                payload_mass,
                booster,
            }
        })
        .collect()
}

fn write_csv(path: &Path, launches: &[Launch]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for launch in launches {
        writer.serialize(launch).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(path: &Path, launches: &[Launch]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(launches.iter().map(|l| l.flight_number))),
            Arc::new(StringArray::from_iter_values(launches.iter().map(|l| l.site))),
            Arc::new(Int64Array::from_iter_values(launches.iter().map(|l| l.class))),
            Arc::new(Float64Array::from_iter_values(launches.iter().map(|l| l.payload_mass))),
            Arc::new(StringArray::from_iter_values(launches.iter().map(|l| l.booster))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let output_path = args.output;

    let mut rng = SplitMix(args.seed);
    let launches = generate(args.count as usize, &mut rng);

    match output_path.extension().and_then(|e| e.to_str()) {
        Some("parquet" | "pq") => write_parquet(&output_path, &launches)?,
        _ => write_csv(&output_path, &launches)?,
    }

    println!(
        "Wrote {} launches across {} sites to {}",
        launches.len(),
        SITES.len(),
        output_path.display()
    );
    Ok(())
}

//! Command line front end for the GDSII codec
//!
//! Usage:
//!   cargo run --release --bin gds_tool -- <command> [args] [options]
//!
//! Commands:
//!   areas <polygons.json>                  Polygon areas, same shape as the input
//!   dump <file.gds>                        One line per record
//!   skeleton <out.gds> <lib> <struct>...   Library with empty structures
//!
//! Options:
//!   --config <file.json>   Writer options (name_policy, closure_mode, area_convention)
//!   --signed               Report signed areas
//!   --closure <mode>       detect | explicit | implicit
//!   --legacy-names         Enforce the 32 character structure name limit

use std::env;

use anyhow::{bail, Context};
use serde::Deserialize;

use gdsio::record::{decode_ints, decode_reals, decode_string, decode_words, DataType};
use gdsio::{
    begin_library, begin_structure, end_library, end_structure, polygon_areas, AreaConvention,
    ClosureMode, NamePolicy, Point, PolygonBatch, RecordReader, RecordType, StreamWriter, Units,
    WriterOptions,
};

/// Either a bare list of polygons or a shaped batch
#[derive(Deserialize)]
#[serde(untagged)]
enum AreaInput {
    Shaped {
        rows: usize,
        cols: usize,
        polygons: Vec<Vec<[f64; 2]>>,
    },
    List(Vec<Vec<[f64; 2]>>),
}

fn to_points(polygons: Vec<Vec<[f64; 2]>>) -> Vec<Vec<Point>> {
    polygons
        .into_iter()
        .map(|ring| ring.into_iter().map(Point::from).collect())
        .collect()
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} <command> [args] [options]", program);
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  areas <polygons.json>                  Polygon areas, same shape as the input");
    eprintln!("  dump <file.gds>                        One line per record");
    eprintln!("  skeleton <out.gds> <lib> <struct>...   Library with empty structures");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <file.json>   Writer options");
    eprintln!("  --signed               Report signed areas");
    eprintln!("  --closure <mode>       detect | explicit | implicit");
    eprintln!("  --legacy-names         Enforce the 32 character structure name limit");
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    // Split positional arguments from options
    let mut positional: Vec<String> = Vec::new();
    let mut config_path: Option<String> = None;
    let mut signed = false;
    let mut closure: Option<ClosureMode> = None;
    let mut legacy_names = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                config_path = args.get(i).cloned();
            }
            "--signed" => signed = true,
            "--closure" => {
                i += 1;
                closure = Some(match args.get(i).map(String::as_str) {
                    Some("detect") => ClosureMode::Detect,
                    Some("explicit") => ClosureMode::Explicit,
                    Some("implicit") => ClosureMode::Implicit,
                    other => bail!("unknown closure mode {:?}", other),
                });
            }
            "--legacy-names" => legacy_names = true,
            other => positional.push(other.to_string()),
        }
        i += 1;
    }

    if positional.len() < 2 {
        print_usage(&args[0]);
        return Ok(());
    }

    let mut options = match &config_path {
        Some(path) => WriterOptions::from_json_file(path)
            .with_context(|| format!("failed to load config {}", path))?,
        None => WriterOptions::default(),
    }
    .apply_env()?;
    if signed {
        options.area_convention = AreaConvention::Signed;
    }
    if let Some(mode) = closure {
        options.closure_mode = mode;
    }
    if legacy_names {
        options.name_policy = NamePolicy::Legacy;
    }

    match positional[0].as_str() {
        "areas" => run_areas(&positional[1], &options),
        "dump" => run_dump(&positional[1]),
        "skeleton" => {
            if positional.len() < 3 {
                bail!("skeleton needs <out.gds> <lib> [struct...]");
            }
            run_skeleton(&positional[1], &positional[2], &positional[3..], &options)
        }
        other => {
            print_usage(&args[0]);
            bail!("unknown command '{}'", other)
        }
    }
}

fn run_areas(path: &str, options: &WriterOptions) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path))?;
    let input: AreaInput =
        serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path))?;

    let batch = match input {
        AreaInput::Shaped {
            rows,
            cols,
            polygons,
        } => PolygonBatch::with_shape(rows, cols, to_points(polygons))?,
        AreaInput::List(polygons) => PolygonBatch::column(to_points(polygons)),
    };

    let start = std::time::Instant::now();
    let areas = polygon_areas(&batch, options.closure_mode, options.area_convention)?;
    log::info!(
        "{} areas in {:.2}ms",
        areas.areas.len(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    println!("{}", serde_json::to_string(&areas.to_rows())?);
    Ok(())
}

fn run_dump(path: &str) -> anyhow::Result<()> {
    let mut reader = RecordReader::open(path).with_context(|| format!("failed to open {}", path))?;
    let mut count = 0usize;
    loop {
        let offset = reader.offset();
        let Some(record) = reader.next_record()? else {
            break;
        };
        count += 1;
        let name = record.kind().map_or("?", RecordType::name);
        let value = match record.data_kind() {
            Some(DataType::Ascii) => format!("'{}'", decode_string(&record.payload)),
            Some(DataType::Int16) | Some(DataType::BitArray) => {
                format!("{:?}", decode_words(&record.payload)?)
            }
            Some(DataType::Int32) => format!("{:?}", decode_ints(&record.payload)?),
            Some(DataType::Real8) => format!("{:?}", decode_reals(&record.payload)?),
            Some(DataType::NoData) => String::new(),
            _ => format!("{} bytes", record.payload.len()),
        };
        println!(
            "{:>8}  {:<8} (0x{:02X}/0x{:02X}) {:>5}  {}",
            offset,
            name,
            record.record_type,
            record.data_type,
            record.encoded_len(),
            value
        );
    }
    println!();
    println!("=== {} records ===", count);
    Ok(())
}

fn run_skeleton(
    out: &str,
    library: &str,
    structures: &[String],
    options: &WriterOptions,
) -> anyhow::Result<()> {
    let mut writer = StreamWriter::create(out).with_context(|| format!("failed to create {}", out))?;
    begin_library(&mut writer, library, Units::default(), options.name_policy)?;
    for name in structures {
        begin_structure(&mut writer, name, options.name_policy)
            .with_context(|| format!("failed to write structure '{}'", name))?;
        end_structure(&mut writer)?;
    }
    end_library(&mut writer)?;
    eprintln!("Wrote {} ({} structures, {} bytes)", out, structures.len(), writer.position());
    Ok(())
}

//! winstruct - Layout Inspector & Codec Benchmark
//!
//! Menampilkan:
//! - Katalog wire type
//! - Layout record contoh (camera driver, Win64)
//! - Latency marshal/unmarshal
//!
//! Usage:
//!   cargo run --release -- [OPTIONS]
//!   RUST_LOG=winstruct=trace cargo run -- --iterations 10

#![allow(dead_code)] // Record contoh sebagian hanya dipakai untuk layout

use std::process;
use std::time::Instant;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use winstruct::{catalog, describe, marshal, unmarshal, win_struct, Record, RecordReader};

win_struct! {
    #[derive(Debug, Default, Clone)]
    struct DeviceInfo {
        version: u32 => "DWORD",
        sensor_image_width: u32 => "DWORD",
        sensor_image_height: u32 => "DWORD",
        cropped_image_width: u32 => "DWORD",
        cropped_image_height: u32 => "DWORD",
        bayer_x_offset: u32 => "DWORD",
        bayer_y_offset: u32 => "DWORD",
        crop_mode: u32 => "DWORD",
        exposure_time_min: f64 => "double",
        exposure_time_max: f64 => "double",
        exposure_time_step: f64 => "double",
        pixel_width: f64 => "double",
        pixel_height: f64 => "double",
        bits_per_pixel: u32 => "DWORD",
        bpp_pad: u32 => "DWORD",
        manufacturer: String => "LPWSTR",
        model: String => "LPWSTR",
        serial_number: String => "LPWSTR",
        device_name: String => "LPWSTR",
        sensor_name: String => "LPWSTR",
        device_version: String => "LPWSTR",
    }
}

win_struct! {
    #[derive(Debug, Default, Clone)]
    struct PropertyValue {
        id: u32 => "DWORD",
        value: u32 => "DWORD",
        text: String => "LPWSTR",
    }
}

win_struct! {
    #[derive(Debug, Default, Clone)]
    struct ImageInfo {
        size: u32 => "DWORD",
        size_pad: u32 => "DWORD",
        data: Vec<u8> => "LPBYTE,size",
        status: u32 => "DWORD",
        image_mode: u32 => "DWORD",
        width: u32 => "DWORD",
        height: u32 => "DWORD",
        flags: u32 => "DWORD",
        meta_size: u32 => "DWORD",
        meta: Vec<u8> => "LPBYTE,meta_size",
        duration: f64 => "double",
        label: String => "-",
    }
}

/// Demo configuration
struct DemoConfig {
    iterations: usize,
    verbose: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            iterations: 1_000_000,
            verbose: false,
        }
    }
}

fn parse_args() -> DemoConfig {
    let args: Vec<String> = std::env::args().collect();
    let mut config = DemoConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--iterations" | "-n" => {
                if i + 1 < args.len() {
                    config.iterations = args[i + 1].parse().unwrap_or(1_000_000);
                    i += 1;
                }
            }
            "--verbose" | "-v" => {
                config.verbose = true;
            }
            "--help" | "-h" => {
                println!("winstruct - Native Record Codec Inspector\n");
                println!("Usage: winstruct [OPTIONS]\n");
                println!("Options:");
                println!("  -n, --iterations <N>  Benchmark iterations (default: 1000000)");
                println!("  -v, --verbose         Print every field descriptor");
                println!("  -h, --help            Show this help");
                process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    config
}

fn main() {
    let config = parse_args();

    let default_level = if config.verbose { "winstruct=debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    println!("🧩 winstruct - Native Record Codec");
    println!("==================================\n");

    print_catalog();

    let layouts = [
        print_layout::<DeviceInfo>(config.verbose),
        print_layout::<PropertyValue>(config.verbose),
        print_layout::<ImageInfo>(config.verbose),
    ];
    if let Some(Err(e)) = layouts.into_iter().find(|r| r.is_err()) {
        error!("layout error: {}", e);
        process::exit(1);
    }

    if let Err(e) = benchmark_codec(config.iterations) {
        error!("benchmark failed: {}", e);
        process::exit(1);
    }

    println!("\n✅ Done!");
}

fn print_catalog() {
    println!("📚 Wire Types");
    println!("-------------");
    for wt in catalog() {
        println!("  {:<8} {:>2} bytes  {:?}", wt.name, wt.size, wt.kind);
    }
    println!();
}

fn print_layout<R: Record>(verbose: bool) -> winstruct::Result<()> {
    let meta = describe::<R>()?;
    println!(
        "📐 {} ({} bytes, {} wire fields)",
        meta.name,
        meta.size,
        meta.fields.len()
    );

    if verbose {
        for fd in &meta.fields {
            let sizing = fd.sizing.map(|s| format!(" {:?}", s)).unwrap_or_default();
            println!(
                "  +{:<4} {:<20} {:<8}{}",
                fd.offset, fd.name, fd.wire.name, sizing
            );
        }
    }
    println!();
    Ok(())
}

fn benchmark_codec(iterations: usize) -> winstruct::Result<()> {
    println!("📊 Codec Benchmark");
    println!("------------------");

    let iterations = iterations.max(1);
    let info = DeviceInfo {
        version: 1,
        sensor_image_width: 9504,
        sensor_image_height: 6336,
        pixel_width: 3.76,
        pixel_height: 3.76,
        bits_per_pixel: 14,
        ..Default::default()
    };

    // Marshal
    let start = Instant::now();
    let mut total = 0usize;
    for _ in 0..iterations {
        total += marshal(&info)?.len();
    }
    let marshal_duration = start.elapsed();

    // Unmarshal (scalar + null pointer, tanpa dereference)
    let bytes = marshal(&info)?;
    let mut decoded = DeviceInfo::default();
    let start = Instant::now();
    for _ in 0..iterations {
        // SAFETY: semua pointer field di `bytes` null
        unsafe { unmarshal(&bytes, &mut decoded)? };
    }
    let unmarshal_duration = start.elapsed();

    // Unmarshal dengan string native
    let model: Vec<u16> = "ILCE-7RM4\0".encode_utf16().collect();
    let mut property_block = marshal(&PropertyValue {
        id: 0x5007,
        value: 400,
        ..Default::default()
    })?;
    property_block[8..16].copy_from_slice(&(model.as_ptr() as u64).to_le_bytes());
    let batch: Vec<u8> = property_block.repeat(16);

    let start = Instant::now();
    let mut records = 0usize;
    for _ in 0..(iterations / 16).max(1) {
        // SAFETY: `model` hidup dan null-terminated selama loop
        let mut reader = unsafe { RecordReader::new(&batch) };
        while let Some(property) = reader.next_record::<PropertyValue>() {
            property?;
            records += 1;
        }
    }
    let string_duration = start.elapsed();

    let marshal_ns = marshal_duration.as_nanos() as f64 / iterations as f64;
    let unmarshal_ns = unmarshal_duration.as_nanos() as f64 / iterations as f64;
    let string_ns = string_duration.as_nanos() as f64 / records as f64;

    println!("  Record size: {} bytes", bytes.len());
    println!("  Operations: {}", iterations);
    println!(
        "  Marshal latency:   {:.2} ns/op ({:.3} μs/op)",
        marshal_ns,
        marshal_ns / 1000.0
    );
    println!(
        "  Unmarshal latency: {:.2} ns/op ({:.3} μs/op)",
        unmarshal_ns,
        unmarshal_ns / 1000.0
    );
    println!(
        "  Reader + LPWSTR:   {:.2} ns/record ({} records)",
        string_ns, records
    );
    println!(
        "  Marshal throughput: {:.2} MB/sec",
        total as f64 / marshal_duration.as_secs_f64() / 1_000_000.0
    );

    info!(
        sensor_width = decoded.sensor_image_width,
        bits_per_pixel = decoded.bits_per_pixel,
        "benchmark complete"
    );
    Ok(())
}

// Backbeat Music Generator — CLI entry point.
//
// Generates one short piece (drums, chords, melody) and writes it to MIDI.
// The pipeline: metadata sampling → drum/progression/melody generation →
// track assembly → MIDI output.
//
// Usage:
//   cargo run -p backbeat_music --bin generate -- [output.mid] [--bars N] [--seed N]
//
// Without an output path, the file is named after the piece:
// `<key>_<tempo>BPM_-_<chord>-<chord>-....mid`. Without a seed, the RNG
// is seeded from the OS, so every run is a different song.

use backbeat_music::instrument::{Composition, compose};
use backbeat_music::midi::write_midi;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::Path;

fn main() {
    env_logger::init();
    let args: Vec<String> = std::env::args().collect();

    let output_path = args
        .get(1)
        .filter(|s| !s.starts_with("--"))
        .map(|s| s.as_str());
    let bars: u32 = parse_flag(&args, "--bars").unwrap_or(4);
    let seed: Option<u64> = parse_flag(&args, "--seed");

    let mut rng = if let Some(s) = seed {
        info!("seeding RNG with {s}");
        StdRng::seed_from_u64(s)
    } else {
        StdRng::from_os_rng()
    };

    let piece = match compose(bars, &mut rng) {
        Ok(piece) => piece,
        Err(e) => {
            eprintln!("generation failed: {e}");
            std::process::exit(1);
        }
    };

    println!("Key:   {}", piece.meta.key);
    println!("Tempo: {} BPM", piece.meta.tempo);
    println!(
        "Chords: {}",
        piece
            .progression
            .iter()
            .map(|e| e.degree.label())
            .collect::<Vec<_>>()
            .join("-")
    );

    let default_name;
    let output_path = match output_path {
        Some(path) => path,
        None => {
            default_name = suggested_filename(&piece);
            &default_name
        }
    };

    match write_midi(&piece.song, Path::new(output_path)) {
        Ok(()) => println!("Wrote {output_path}"),
        Err(e) => {
            eprintln!("error writing MIDI: {e}");
            std::process::exit(1);
        }
    }
}

/// File name describing the piece: key, tempo, and the chord labels.
fn suggested_filename(piece: &Composition) -> String {
    let chords = piece
        .progression
        .iter()
        .map(|e| e.degree.label())
        .collect::<Vec<_>>()
        .join("-");
    format!(
        "{}_{}BPM_-_{}.mid",
        piece.meta.key, piece.meta.tempo, chords
    )
}

fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse().ok())
}

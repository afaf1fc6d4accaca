//! Command-line driver: import a bracket JSON, run simulations, print results.
//! Run with: cargo run --bin simulate -- brackets/64_team.json --sims 100
//! Flags:
//!   --sims N       number of simulation runs (default 1)
//!   --min-rank R   disqualify runs where a round winner carries rank R
//!   --export       attach the winners-per-round artifact to qualifying runs
//!   --code CODE    decode a bracket code instead of simulating
//!   --phrase TEXT  derive a code from a phrase instead of simulating
//!   --aggregate    treat the file arguments as exported artifacts and print
//!                  the consensus bracket
//! Log verbosity via env: RUST_LOG (e.g. RUST_LOG=debug).

use bracket_sim::{
    aggregate_values, code_from_phrase, export_winners, import_from_json, load_from_tourney_code,
    run_simulations, tournament_from_import, SimulationOptions, TournamentConfig,
};
use std::env;
use std::fs;
use std::process::ExitCode;

struct CliArgs {
    files: Vec<String>,
    sims: u32,
    min_rank: Option<u32>,
    export: bool,
    code: Option<String>,
    phrase: Option<String>,
    aggregate: bool,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<CliArgs, String> {
    let mut cli = CliArgs {
        files: Vec::new(),
        sims: 1,
        min_rank: None,
        export: false,
        code: None,
        phrase: None,
        aggregate: false,
    };
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--sims" => {
                let value = args.next().ok_or("--sims requires a number")?;
                cli.sims = value.parse().map_err(|_| format!("bad --sims value: {value}"))?;
            }
            "--min-rank" => {
                let value = args.next().ok_or("--min-rank requires a number")?;
                cli.min_rank =
                    Some(value.parse().map_err(|_| format!("bad --min-rank value: {value}"))?);
            }
            "--export" => cli.export = true,
            "--aggregate" => cli.aggregate = true,
            "--code" => cli.code = Some(args.next().ok_or("--code requires a value")?),
            "--phrase" => cli.phrase = Some(args.next().ok_or("--phrase requires a value")?),
            other if other.starts_with("--") => return Err(format!("unknown flag: {other}")),
            _ => cli.files.push(arg),
        }
    }
    if cli.files.is_empty() {
        return Err("usage: simulate <import.json> [flags], or simulate --aggregate <artifact.json>...".to_string());
    }
    Ok(cli)
}

fn run() -> Result<(), String> {
    let cli = parse_args(env::args().skip(1))?;

    if cli.aggregate {
        let mut artifacts = Vec::new();
        for file in &cli.files {
            let payload =
                fs::read_to_string(file).map_err(|err| format!("cannot read {file}: {err}"))?;
            let value = serde_json::from_str(&payload)
                .map_err(|err| format!("cannot parse {file}: {err}"))?;
            artifacts.push(value);
        }
        let consensus = aggregate_values(&artifacts);
        let rendered = serde_json::to_string_pretty(&consensus).map_err(|err| err.to_string())?;
        println!("{rendered}");
        return Ok(());
    }

    let import_file = &cli.files[0];
    let payload = fs::read_to_string(import_file)
        .map_err(|err| format!("cannot read {import_file}: {err}"))?;
    let import = import_from_json(&payload).map_err(|err| err.to_string())?;
    let mut tournament =
        tournament_from_import(import, TournamentConfig::default()).map_err(|err| err.to_string())?;

    if let Some(phrase) = &cli.phrase {
        let code = code_from_phrase(&tournament, phrase).map_err(|err| err.to_string())?;
        println!("{code}");
        return Ok(());
    }

    if let Some(code) = &cli.code {
        let winner =
            load_from_tourney_code(&mut tournament, code).map_err(|err| err.to_string())?;
        log::info!("decoded winner: {winner}");
        if let Some(export) = export_winners(&tournament) {
            let rendered =
                serde_json::to_string_pretty(&export).map_err(|err| err.to_string())?;
            println!("{rendered}");
        }
        return Ok(());
    }

    let options = SimulationOptions {
        sims: cli.sims,
        min_rank: cli.min_rank,
        export: cli.export,
    };
    let mut rng = rand::thread_rng();
    let runs =
        run_simulations(&mut tournament, &options, &mut rng).map_err(|err| err.to_string())?;
    for run in &runs {
        let rendered = serde_json::to_string(run).map_err(|err| err.to_string())?;
        println!("{rendered}");
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

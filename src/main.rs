//! # Core War
//!
//! Terminal battle runner. Compiles each warrior file named on the
//! command line, loads them all into a standard 8000-cell core, and
//! steps the battle until a winner emerges, the cycle budget runs out,
//! or Ctrl-C interrupts the run.

use ansi_term::Colour::{Green, Red, Yellow};
use corewar::lang;
use corewar::mars::{Champion, CoreRandom, MarsVm};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

const CORE_SIZE: usize = 8000;
const MAX_CYCLES: usize = 80_000;

fn main() {
    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.len() < 2 {
        eprintln!("usage: corewar <warrior.red> <warrior.red>...");
        std::process::exit(64);
    }

    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = interrupted.clone();
    ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst)).ok();

    let mut vm = MarsVm::new(CORE_SIZE, Box::new(CoreRandom::new()));
    for path in &paths {
        let source = match std::fs::read_to_string(path) {
            Ok(source) => source,
            Err(error) => fail(path, &error.to_string()),
        };
        let champion = match lang::parse(&source) {
            Ok(champion) => champion,
            Err(error) => fail(path, &error.to_string()),
        };
        println!(
            "{} ({} instructions)",
            display_name(&champion, path),
            champion.len()
        );
        for cell in champion.instructions() {
            println!("    {}", cell);
        }
        if let Err(error) = vm.load_champion(champion) {
            fail(path, &error.to_string());
        }
    }

    let mut cycles = 0;
    while vm.winner().is_none() && cycles < MAX_CYCLES && !interrupted.load(Ordering::SeqCst) {
        vm.step();
        cycles += 1;
    }

    match vm.winner() {
        Some(winner) => {
            let name = winner.name().unwrap_or("champion").to_string();
            println!(
                "{} wins after {} cycles",
                Green.bold().paint(name),
                cycles
            );
        }
        None if interrupted.load(Ordering::SeqCst) => {
            println!("{}", Yellow.paint("interrupted"));
        }
        None => {
            let survivors: Vec<&str> = vm
                .champions()
                .iter()
                .filter(|champion| champion.is_alive())
                .map(|champion| champion.name().unwrap_or("champion"))
                .collect();
            println!(
                "{} after {} cycles: {}",
                Yellow.paint("stalemate"),
                cycles,
                survivors.join(", ")
            );
        }
    }
}

fn display_name(champion: &Champion, path: &str) -> String {
    match champion.name() {
        Some(name) => name.to_string(),
        None => path.to_string(),
    }
}

fn fail(path: &str, message: &str) -> ! {
    eprintln!("{} {}: {}", Red.paint("error:"), path, message);
    std::process::exit(1);
}

// Copyright (C) 2025 Holdem Table Developers
// SPDX-License-Identifier: Apache-2.0
//
// Prints the preflop chance of winning heads up for each starting hand,
// suited hands above the diagonal:
//
// ```bash
// $ cargo r --release --example chart -- --samples 50000
// ```
use clap::{Parser, value_parser};
use rand::{SeedableRng, rngs::StdRng};
use std::time::Instant;

use holdem_eval::*;

fn separator() {
    print!("|");
    for _ in 0..13 {
        print!("-----|");
    }
    println!();
}

#[derive(Debug, Parser)]
struct Cli {
    /// The number of samples for each hand.
    #[clap(long, short, default_value_t = 20_000, value_parser = value_parser!(u32).range(100..=1_000_000))]
    samples: u32,
    /// Seed for sampling.
    #[clap(long, default_value_t = 0)]
    seed: u64,
}

fn main() {
    let cli = Cli::parse();
    let mut rng = StdRng::seed_from_u64(cli.seed);
    let probability = Probability::new(&[]).with_samples(cli.samples as usize);

    separator();

    let now = Instant::now();

    for r1 in Rank::ranks().rev() {
        let mut labels = Vec::with_capacity(13);
        let mut chances = Vec::with_capacity(13);

        for r2 in Rank::ranks().rev() {
            let (c1, c2) = if r1 <= r2 {
                // Offsuit or pair
                (Card::new(r2, Suit::Hearts), Card::new(r1, Suit::Spades))
            } else {
                (Card::new(r1, Suit::Hearts), Card::new(r2, Suit::Hearts))
            };

            let label = if r1 == r2 {
                format!("{r1}{r2} ")
            } else if c1.suit() == c2.suit() {
                format!("{}{}s", c1.rank(), c2.rank())
            } else {
                format!("{}{}o", c1.rank(), c2.rank())
            };

            labels.push(label);
            chances.push(probability.chance_with_rng(&[c1, c2], &mut rng) * 100.0);
        }

        print!("|");
        for label in labels {
            print!(" {label} |");
        }
        println!();

        print!("|");
        for chance in &chances {
            print!(" {chance:2.0}% |");
        }
        println!();

        separator();
    }

    println!("Elapsed: {:.3}s", now.elapsed().as_secs_f64());
}

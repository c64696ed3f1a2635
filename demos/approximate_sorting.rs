//! Approximate sorting with a soft heap.
//!
//! Usage: `cargo run --example approximate_sorting -- [epsilon] [len]`
//!
//! Sorts random keys by draining a soft heap and reports how many output
//! positions disagree with an exact sort.

use std::env;
use std::fmt;
use std::process;
use std::str::FromStr;

use rand::Rng;
use rust_soft_heap::selection::approximate_sort;
use rust_soft_heap::HeapError;

/// Parses an optional positional argument, falling back to `default` when
/// it is absent.
fn parse_arg<T>(arg: Option<String>, name: &str, default: T) -> Result<T, String>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match arg {
        None => Ok(default),
        Some(text) => text
            .parse()
            .map_err(|err| format!("invalid {} `{}`: {}", name, text, err)),
    }
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<(f64, usize), String> {
    let epsilon = parse_arg(args.next(), "epsilon", 0.3)?;
    let len = parse_arg(args.next(), "length", 100)?;
    Ok((epsilon, len))
}

fn run(epsilon: f64, len: usize) -> Result<(), HeapError> {
    let mut rng = rand::thread_rng();
    let keys: Vec<u32> = (0..len).map(|_| rng.gen_range(0..100)).collect();
    println!("original array (epsilon {}): {:?}", epsilon, keys);

    let approx = approximate_sort(keys.clone(), epsilon)?;
    println!("(approx) sorted array: {:?}", approx);

    let mut exact = keys;
    exact.sort_unstable();
    let misplaced = approx.iter().zip(&exact).filter(|(a, b)| a != b).count();
    println!("{} of {} positions differ from an exact sort", misplaced, len);
    Ok(())
}

fn main() {
    env_logger::init();

    let (epsilon, len) = match parse_args(env::args().skip(1)) {
        Ok(values) => values,
        Err(message) => {
            eprintln!("error: {}", message);
            eprintln!("usage: approximate_sorting [epsilon] [len]");
            process::exit(2);
        }
    };

    if let Err(err) = run(epsilon, len) {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}

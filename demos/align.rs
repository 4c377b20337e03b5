//! Aligns two sequences and prints the alignment, its score, and the forward
//! position map. You can call the program like so:
//!
//! ```
//! cargo run --release --example align AUCUGGCUA AUCGUGCUA
//! ```
//!
//! Each position of the source is printed alongside the target position it
//! maps to, with `0` marking source positions that fall in a gap.

use std::env;

use rnalign::Alignment;
use rnalign::Sequence;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let source = env::args().nth(1).expect("missing source sequence");
    let target = env::args().nth(2).expect("missing target sequence");

    let source = source.parse::<Sequence>()?;
    let target = target.parse::<Sequence>()?;

    let alignment = Alignment::try_new(source, target)?;
    let (a, b) = alignment.aligned();

    println!("{a}");
    println!("{b}");
    println!();
    println!("Score: {}", alignment.score());

    let map = alignment.map();
    println!(
        "Mapped: {} of {} ({:.1}% unmapped)",
        map.mapped_count(),
        map.len(),
        map.unmapped_fraction() * 100.0
    );
    println!();

    for (s, t) in map.as_slice().iter().enumerate().skip(1) {
        println!("{s}\t{t}");
    }

    Ok(())
}

//! Fits a small sample (a sequence, a reactivity profile, and a secondary
//! structure) measured on a truncated construct onto its full-length
//! reference, then onto a mutant of that reference.
//!
//! ```
//! cargo run --release --example fit
//! ```

use rnalign::Sample;
use rnalign::Sequence;
use rnalign::alignment::Cache;
use rnalign::data::Profile;
use rnalign::data::Structure;
use rnalign::sample::Data;
use rnalign::sample::Kind;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let construct = "GGGAAACCCUUU".parse::<Sequence>()?;
    let reference = "AAGGGAAACCCUUUAA".parse::<Sequence>()?;
    let mutant = "AAGGGAAAUUUAA".parse::<Sequence>()?;

    let reactivities = vec![0.1, 0.2, 0.1, 0.9, 1.2, 0.8, 0.3, 0.2, 0.1, 0.0, 0.1, 0.4];

    let mut sample = Sample::new("construct");
    sample.insert(Kind::Sequence, construct.clone())?;
    sample.insert(Kind::Profile, Profile::try_new(construct.clone(), reactivities)?)?;
    sample.insert(
        Kind::Structure,
        Structure::try_from_pairs(construct, [(1, 12), (2, 11), (3, 10)])?,
    )?;

    let kinds = [Kind::Profile, Kind::Structure];
    let mut cache = Cache::new();

    ////////////////////////////////////////////////////////////////////////////////////
    // Onto the reference
    ////////////////////////////////////////////////////////////////////////////////////

    let fitted = sample.fit(&kinds, &reference, &mut cache)?;
    println!("Onto {}:", fitted.target());
    print(fitted.iter());

    ////////////////////////////////////////////////////////////////////////////////////
    // Through the reference onto the mutant
    ////////////////////////////////////////////////////////////////////////////////////

    let then = cache.get_or_align(&reference, &mutant)?;
    let fitted = sample.fit_through(&kinds, &reference, then.map(), &mut cache)?;
    println!("Onto {}:", fitted.target());
    print(fitted.iter());

    for (kind, warning) in fitted.warnings() {
        println!("! {kind}: {warning}");
    }

    Ok(())
}

fn print<'a>(data: impl Iterator<Item = (&'a Kind, &'a Data)>) {
    for (kind, data) in data {
        match data {
            Data::Profile(profile) => {
                let values = profile
                    .values()
                    .iter()
                    .map(|v| format!("{v:.1}"))
                    .collect::<Vec<_>>();
                println!("  {kind}: {}", values.join(" "));
            }
            Data::Structure(structure) => {
                let pairs = structure.pairs().collect::<Vec<_>>();
                println!("  {kind}: {pairs:?}");
            }
            other => println!("  {kind}: {other:?}"),
        }
    }

    println!();
}

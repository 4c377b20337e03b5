use std::env;

use rnalign::AlignmentChain;
use rnalign::Sequence;
use rnalign::alignment::Cache;
use tabled::builder::Builder;
use tabled::settings::Alignment;
use tabled::settings::Style;
use tabled::settings::object::Rows;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let sequences = env::args()
        .skip(1)
        .map(|s| {
            s.parse::<Sequence>()
                .unwrap_or_else(|e| panic!("could not parse sequence `{s}`: {e}"))
        })
        .collect::<Vec<_>>();

    if sequences.len() < 2 {
        panic!("expected at least two sequences");
    }

    let mut cache = Cache::new();
    let maps = sequences
        .windows(2)
        .map(|pair| cache.get_or_align(&pair[0], &pair[1]).map(|a| a.map().clone()))
        .collect::<Result<Vec<_>, _>>()?;

    let chain = AlignmentChain::try_from_vec(maps)?;

    let mut builder = Builder::default();
    builder.push_record(["Hop", "Source", "--", "-->", "Target", "--", "-->"]);
    builder.push_record(["", "Start", "End", "Nt", "Start", "End", "Nt"]);

    let hops = chain.maps().iter().map(|map| (Some(map), map));
    let composed = std::iter::once((None, chain.compose()));

    for (hop, (numbered, map)) in hops.chain(composed).enumerate() {
        let label = match numbered {
            Some(_) => (hop + 1).to_string(),
            None => String::from("Composed"),
        };

        for block in map.blocks() {
            let (source, target) = block.into_parts();

            builder.push_record([
                label.clone(),
                source.start().to_string(),
                source.end().to_string(),
                map.source().as_str()[source.start() - 1..*source.end()].to_string(),
                target.start().to_string(),
                target.end().to_string(),
                map.target().as_str()[target.start() - 1..*target.end()].to_string(),
            ]);
        }
    }

    let table = builder
        .build()
        .with(Style::rounded())
        .modify(Rows::new(1..), Alignment::left())
        .to_string();

    println!("{}", table);

    Ok(())
}

use rnalign::Alignment;
use rnalign::AlignmentChain;
use rnalign::AlignmentMap;
use rnalign::Sample;
use rnalign::Sequence;
use rnalign::alignment::Cache;
use rnalign::data::Dataset as _;
use rnalign::data::Interaction;
use rnalign::data::Interactions;
use rnalign::data::Profile;
use rnalign::data::Structure;
use rnalign::map::SENTINEL;
use rnalign::sample::Data;
use rnalign::sample::Kind;

const PAIRS: &[(&str, &str)] = &[
    ("AUCUGGCUA", "AUCGUGCUA"),
    ("GGGAAACCCUUU", "GGGAAAUUU"),
    ("GGGAAAUUU", "GGGAAACCCUUU"),
    ("AUCGGCUAAGC", "GGAAAAUCGGCUAAGCCCC"),
    ("ACGUACGUACGU", "UGCAUGCA"),
    ("A", "GGGGGGGG"),
    ("NNNNAUCG", "AUCGNNNN"),
    ("AU.GC", "AUCGC"),
    ("AU-GC", "AUGC"),
];

fn assert_well_formed(map: &AlignmentMap) {
    let forward = map.as_slice();

    assert_eq!(forward.len(), map.source().len() + 1);
    assert_eq!(forward[0], SENTINEL);

    let mapped = forward[1..]
        .iter()
        .copied()
        .filter(|t| *t != SENTINEL)
        .collect::<Vec<_>>();

    assert!(mapped.windows(2).all(|w| w[0] < w[1]));
    assert!(mapped.iter().all(|t| *t <= map.target().len()));
}

#[test]
fn self_alignment_is_the_identity() -> Result<(), Box<dyn std::error::Error>> {
    for (source, _) in PAIRS {
        let sequence = source.parse::<Sequence>()?;
        let alignment = Alignment::try_new(sequence.clone(), sequence.clone())?;

        assert!(alignment.map().is_identity());
        assert_eq!(alignment.map(), &AlignmentMap::identity(&sequence));
    }

    Ok(())
}

#[test]
fn every_alignment_yields_a_well_formed_map() -> Result<(), Box<dyn std::error::Error>> {
    for (source, target) in PAIRS {
        let alignment = Alignment::try_new(source.parse()?, target.parse()?)?;
        assert_well_formed(alignment.map());

        // The gapped strings describe the same map.
        let (a, b) = alignment.aligned();
        let rebuilt = AlignmentMap::from_gapped(source.parse()?, target.parse()?, &a, &b).unwrap();
        assert_eq!(&rebuilt, alignment.map());
    }

    Ok(())
}

#[test]
fn chains_compose_hop_by_hop() -> Result<(), Box<dyn std::error::Error>> {
    let sequences = ["AUCGGCUAAGC", "GGAAAAUCGGCUAAGCCCC", "GGAAAAUCGCUAAGCCCCAA", "UCGCUAAG"]
        .iter()
        .map(|s| s.parse::<Sequence>())
        .collect::<Result<Vec<_>, _>>()?;

    let mut cache = Cache::new();
    let maps = sequences
        .windows(2)
        .map(|pair| cache.get_or_align(&pair[0], &pair[1]).map(|a| a.map().clone()))
        .collect::<Result<Vec<_>, _>>()?;

    let chain = AlignmentChain::try_from_vec(maps.clone())?;
    let composed = chain.compose();

    assert_well_formed(composed);
    assert_eq!(composed.source(), &sequences[0]);
    assert_eq!(composed.target(), &sequences[3]);

    for s in 1..=composed.len() {
        let expected = maps.iter().try_fold(s, |position, map| map.get(position));
        assert_eq!(composed.get(s), expected);
    }

    Ok(())
}

#[test]
fn gapped_strings_are_walked_column_by_column() -> Result<(), Box<dyn std::error::Error>> {
    let map = AlignmentMap::from_gapped(
        "AUCUGGCUA".parse()?,
        "AUCGUGCUA".parse()?,
        "AUC-UGGCUA",
        "AUCGUG-CUA",
    )
    .unwrap();

    assert_eq!(map.as_slice(), &[0, 1, 2, 3, 5, 6, 0, 7, 8, 9]);
    assert_eq!(map.blocks().count(), 3);

    Ok(())
}

#[test]
fn pairs_with_an_unmapped_end_are_dropped() -> Result<(), Box<dyn std::error::Error>> {
    let source = "AUCGGCUAGC".parse::<Sequence>()?;
    let target = "AUCGCUAGC".parse::<Sequence>()?;
    let map = AlignmentMap::from_gapped(source.clone(), target, "AUCGGCUAGC", "AUC-GCUAGC").unwrap();

    assert_eq!(map.translate(4), 0);

    let interactions = Interactions::try_new(
        source,
        vec![Interaction::new(4, 9, 1.0), Interaction::new(1, 10, 0.5)],
    )?;

    let reprojection = interactions.get_aligned_data(&map)?;
    assert_eq!(reprojection.data().pairs().collect::<Vec<_>>(), vec![(1, 9)]);
    assert!(reprojection.warning().is_none());

    Ok(())
}

#[test]
fn a_sample_is_fitted_onto_its_reference() -> Result<(), Box<dyn std::error::Error>> {
    let construct = "AUCGGCUAAGC".parse::<Sequence>()?;
    let reference = "GGAAAAUCGGCUAAGCCCC".parse::<Sequence>()?;

    let mut sample = Sample::new("construct");
    sample.insert(
        Kind::Profile,
        Profile::try_new(construct.clone(), (1..=11).map(|v| v as f64).collect())?,
    )?;
    sample.insert(
        Kind::Structure,
        Structure::try_from_pairs(construct, [(1, 11), (2, 10)])?,
    )?;

    let mut cache = Cache::new();
    let fitted = sample.fit(&[Kind::Profile, Kind::Structure], &reference, &mut cache)?;

    assert_eq!(fitted.target(), &reference);
    assert!(fitted.warnings().is_empty());
    assert_eq!(cache.len(), 1);

    match fitted.get(Kind::Profile) {
        Some(Data::Profile(profile)) => {
            assert_eq!(profile.len(), 19);

            for position in 1..=19 {
                let value = profile.get(position).unwrap();

                if (6..=16).contains(&position) {
                    assert_eq!(value, (position - 5) as f64);
                } else {
                    assert!(value.is_nan());
                }
            }
        }
        other => panic!("expected a profile, found {other:?}"),
    }

    match fitted.get(Kind::Structure) {
        Some(Data::Structure(structure)) => {
            assert_eq!(structure.pairs().collect::<Vec<_>>(), vec![(6, 16), (7, 15)]);
        }
        other => panic!("expected a structure, found {other:?}"),
    }

    Ok(())
}

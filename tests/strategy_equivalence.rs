//! Randomized equivalence of all filter strategies against the scalar
//! reference kernel.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use scalemax::{
    filter_scale_maxima, BulkKernel, CubeCoord, ScalarKernel, ScaleMaxKernel, Strategy, Volume,
};

struct Case {
    rows: usize,
    cols: usize,
    levels: usize,
    num_candidates: usize,
    /// Number of distinct response values; small values force many ties.
    quantize: Option<u32>,
}

fn random_volume(rng: &mut StdRng, case: &Case) -> Volume {
    let len = case.rows * case.cols * case.levels;
    let data = (0..len)
        .map(|_| match case.quantize {
            Some(steps) => rng.random_range(0..=steps) as f64,
            None => rng.random::<f64>(),
        })
        .collect();
    Volume::from_vec(data, case.rows, case.cols, case.levels).unwrap()
}

fn random_candidates(rng: &mut StdRng, case: &Case) -> Vec<CubeCoord> {
    (0..case.num_candidates)
        .map(|_| {
            CubeCoord::new(
                rng.random_range(0..=case.rows - 1),
                rng.random_range(0..=case.cols - 1),
                rng.random_range(0..=case.levels - 1),
            )
        })
        .collect()
}

/// Returns true when `output` can be obtained from `input` by deleting items.
fn is_subsequence(output: &[CubeCoord], input: &[CubeCoord]) -> bool {
    let mut remaining = input.iter();
    output
        .iter()
        .all(|wanted| remaining.any(|candidate| candidate == wanted))
}

fn cases() -> Vec<Case> {
    vec![
        Case {
            rows: 20,
            cols: 20,
            levels: 10,
            num_candidates: 500,
            quantize: None,
        },
        Case {
            rows: 8,
            cols: 8,
            levels: 3,
            num_candidates: 257,
            quantize: Some(3),
        },
        Case {
            rows: 5,
            cols: 7,
            levels: 2,
            num_candidates: 99,
            quantize: Some(1),
        },
        Case {
            rows: 4,
            cols: 4,
            levels: 1,
            num_candidates: 33,
            quantize: Some(2),
        },
        Case {
            rows: 1,
            cols: 1,
            levels: 6,
            num_candidates: 6,
            quantize: None,
        },
    ]
}

#[test]
fn all_strategies_match_scalar_reference() {
    let mut rng = StdRng::seed_from_u64(0x5ca1e);
    for case in cases() {
        let volume = random_volume(&mut rng, &case);
        let candidates = random_candidates(&mut rng, &case);
        let reference = ScalarKernel::filter(volume.view(), &candidates).unwrap();

        for strategy in Strategy::all() {
            let kept = filter_scale_maxima(volume.view(), &candidates, strategy).unwrap();
            assert_eq!(
                kept, reference,
                "strategy {strategy} diverged on {}x{}x{}",
                case.rows, case.cols, case.levels
            );
        }
    }
}

#[test]
fn outputs_are_order_preserving_subsequences() {
    let mut rng = StdRng::seed_from_u64(42);
    for case in cases() {
        let volume = random_volume(&mut rng, &case);
        let candidates = random_candidates(&mut rng, &case);

        let scalar = ScalarKernel::filter(volume.view(), &candidates).unwrap();
        let bulk = BulkKernel::filter(volume.view(), &candidates).unwrap();
        assert!(scalar.len() <= candidates.len());
        assert!(is_subsequence(&scalar, &candidates));
        assert!(is_subsequence(&bulk, &candidates));
    }
}

#[test]
fn accepted_candidates_satisfy_predicate() {
    let mut rng = StdRng::seed_from_u64(7);
    for case in cases() {
        let volume = random_volume(&mut rng, &case);
        let view = volume.view();
        let candidates = random_candidates(&mut rng, &case);
        let kept = BulkKernel::filter(view, &candidates).unwrap();

        let expected: Vec<CubeCoord> = candidates
            .iter()
            .copied()
            .filter(|&coord| view.scale_neighbors(coord).unwrap().is_scale_maximum())
            .collect();
        assert_eq!(kept, expected);
    }
}

#[test]
fn single_level_volume_keeps_all_random_candidates() {
    let mut rng = StdRng::seed_from_u64(1);
    let case = Case {
        rows: 10,
        cols: 10,
        levels: 1,
        num_candidates: 200,
        quantize: None,
    };
    let volume = random_volume(&mut rng, &case);
    let candidates = random_candidates(&mut rng, &case);

    for strategy in Strategy::all() {
        let kept = filter_scale_maxima(volume.view(), &candidates, strategy).unwrap();
        assert_eq!(kept, candidates, "strategy {strategy}");
    }
}

#[test]
fn all_strategies_agree_with_nan_and_ties() {
    const VALUES: [f64; 5] = [f64::NAN, 1.0, 2.0, 3.0, 4.0];
    let mut rng = StdRng::seed_from_u64(0x7a11);
    for levels in 1..=5 {
        let (rows, cols) = (6, 5);
        let data = (0..rows * cols * levels)
            .map(|_| VALUES[rng.random_range(0..VALUES.len())])
            .collect();
        let volume = Volume::from_vec(data, rows, cols, levels).unwrap();
        // Not a multiple of the SIMD lane width, so the scalar tail runs too.
        let case = Case {
            rows,
            cols,
            levels,
            num_candidates: 1003,
            quantize: None,
        };
        let candidates = random_candidates(&mut rng, &case);
        let reference = ScalarKernel::filter(volume.view(), &candidates).unwrap();

        for strategy in Strategy::all() {
            let kept = filter_scale_maxima(volume.view(), &candidates, strategy).unwrap();
            assert_eq!(kept, reference, "strategy {strategy} diverged at {levels} levels");
        }
    }
}

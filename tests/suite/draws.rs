//! Draw generation and scoring across the core and types crates.

use crusher_core::{ThreadRandom, count_matches, generate, generate_lotto_draw, is_win};
use crusher_types::{DRAW_SIZE, Draw, DrawError, LOTTO_RANGE, NumberRange, Selection};

#[test]
fn weekly_draws_are_seven_distinct_grid_numbers() {
    let mut rng = ThreadRandom;
    for _ in 0..2_000 {
        let draw = generate_lotto_draw(&mut rng);
        assert_eq!(draw.len(), DRAW_SIZE);
        assert!(draw.iter().all(|n| LOTTO_RANGE.contains(n)));
    }
}

#[test]
fn inverted_and_undersized_ranges_are_errors() {
    assert!(matches!(
        NumberRange::new(10, 1),
        Err(DrawError::InvertedRange { low: 10, high: 1 })
    ));
    let tiny = NumberRange::new(1, 3).unwrap();
    assert!(matches!(
        generate(tiny, 4, &mut ThreadRandom),
        Err(DrawError::CountExceedsRange { count: 4, .. })
    ));
}

#[test]
fn scoring_counts_the_overlap_only() {
    let ticket = Selection::new([2, 4, 6, 8, 10, 12]).unwrap();
    let draw = Draw::try_from_numbers([1, 2, 3, 4, 5, 6, 7]).unwrap();
    let matches = count_matches(&ticket, &draw);
    assert_eq!(matches, 3);
    assert!(!is_win(&ticket, matches));
    assert!(is_win(&ticket, 6));
}

#[test]
fn every_draw_scores_within_bounds() {
    let ticket = Selection::new([5, 10, 15, 20, 25]).unwrap();
    let mut rng = ThreadRandom;
    for _ in 0..1_000 {
        let draw = generate_lotto_draw(&mut rng);
        let matches = count_matches(&ticket, &draw);
        assert!(matches <= ticket.difficulty().size());
        assert_eq!(
            matches,
            ticket.iter().filter(|&n| draw.contains(n)).count()
        );
    }
}

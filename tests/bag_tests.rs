//! Randomizer fairness and determinism.

use std::collections::HashSet;

use term_tetris::core::{PieceSupply, SevenBag};
use term_tetris::types::PieceKind;

#[test]
fn every_window_of_seven_is_a_permutation() {
    let mut bag = SevenBag::new(0xDEAD_BEEF);
    for _ in 0..50 {
        let window: HashSet<PieceKind> = (0..7).map(|_| bag.draw()).collect();
        assert_eq!(window.len(), 7);
    }
}

#[test]
fn drought_is_bounded_by_two_bags() {
    // A kind drawn first in one bag and last in the next waits at most
    // 12 draws between sightings.
    let mut bag = SevenBag::new(31);
    let mut since_last = [0usize; 7];
    for _ in 0..7 * 100 {
        let drawn = bag.draw();
        for (i, gap) in since_last.iter_mut().enumerate() {
            if i == drawn as usize {
                assert!(*gap <= 12, "{drawn:?} waited {gap} draws");
                *gap = 0;
            } else {
                *gap += 1;
            }
        }
    }
}

#[test]
fn counts_stay_exactly_balanced_at_bag_boundaries() {
    let mut bag = SevenBag::new(7);
    let mut counts = [0u32; 7];
    for _ in 0..7 * 20 {
        counts[bag.draw() as usize] += 1;
    }
    assert!(counts.iter().all(|&c| c == 20));
}

#[test]
fn same_seed_reproduces_the_sequence() {
    let mut a = SevenBag::new(12345);
    let mut b = SevenBag::new(12345);
    for _ in 0..100 {
        assert_eq!(a.draw(), b.draw());
    }
}

#[test]
fn different_seeds_diverge() {
    let mut a = SevenBag::new(1);
    let mut b = SevenBag::new(2);
    let seq_a: Vec<PieceKind> = (0..28).map(|_| a.draw()).collect();
    let seq_b: Vec<PieceKind> = (0..28).map(|_| b.draw()).collect();
    assert_ne!(seq_a, seq_b);
}

#[test]
fn supply_preserves_bag_order_through_the_queue() {
    // With and without lookahead the consumed sequence is identical.
    let mut direct = SevenBag::new(99);
    let mut supply = PieceSupply::new(99, 5);
    for _ in 0..40 {
        assert_eq!(supply.next_piece(), direct.draw());
    }
}

#[test]
fn hold_does_not_disturb_the_queue_order() {
    let mut plain = PieceSupply::new(5, 5);
    let mut holding = PieceSupply::new(5, 5);

    let first = holding.next_piece();
    assert_eq!(first, plain.next_piece());

    // Hold with an empty slot consumes exactly one queue entry.
    let swapped = holding.hold(first);
    assert_eq!(swapped, Some(plain.next_piece()));
    for _ in 0..20 {
        assert_eq!(holding.next_piece(), plain.next_piece());
    }
}

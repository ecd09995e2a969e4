//! Showdown hand ranking.
//!
//! Strengths are totally ordered: category first, then kickers high to low,
//! so `a > b` means `a` wins and equal strengths split the pot.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Suit};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

/// Field order matters: the derived `Ord` compares category before kickers.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct HandStrength {
    pub category: Category,
    // kickers: ordered high -> low for tiebreaks
    pub kickers: [u8; 5],
}

/// Ranks a seat's hole cards together with the board.
pub fn rank(hole: &[Card; 2], board: &[Card]) -> HandStrength {
    let mut cards = Vec::with_capacity(2 + board.len());
    cards.extend_from_slice(hole);
    cards.extend_from_slice(board);
    evaluate_hand(&cards)
}

pub fn compare_hands(a: &HandStrength, b: &HandStrength) -> Ordering {
    a.cmp(b)
}

/// Best five-card strength among up to seven cards.
pub fn evaluate_hand(cards: &[Card]) -> HandStrength {
    let mut rank_counts = [0u8; 15]; // 2..14 used
    let mut suit_masks = [0u16; 4];
    let mut suit_counts = [0u8; 4];
    let mut rank_mask = 0u16;
    for c in cards {
        let r = c.rank as u8;
        rank_counts[r as usize] += 1;
        rank_mask |= 1 << r;
        let s = suit_index(c.suit);
        suit_counts[s] += 1;
        suit_masks[s] |= 1 << r;
    }

    let flush_suit = suit_counts.iter().position(|&n| n >= 5);

    if let Some(s) = flush_suit {
        if let Some(high) = straight_high_from_mask(suit_masks[s]) {
            return strength(Category::StraightFlush, &[high]);
        }
    }

    let groups = rank_groups(&rank_counts);
    let of_size = |n: u8| -> Vec<u8> {
        groups
            .iter()
            .filter(|(_, count)| *count == n)
            .map(|(r, _)| *r)
            .collect()
    };
    let quads = of_size(4);
    let trips = of_size(3);
    let pairs = of_size(2);

    if let Some(&q) = quads.first() {
        return strength(Category::FourOfAKind, &[q, highest_excluding(&groups, &[q])]);
    }

    if let Some(&t) = trips.first() {
        // a second set of trips plays as the pair
        let pair = trips.get(1).copied().into_iter().chain(pairs.first().copied()).max();
        if let Some(p) = pair {
            return strength(Category::FullHouse, &[t, p]);
        }
    }

    if let Some(s) = flush_suit {
        let ranks = ranks_in_mask(suit_masks[s]);
        return strength(Category::Flush, &ranks[..5]);
    }

    if let Some(high) = straight_high_from_mask(rank_mask) {
        return strength(Category::Straight, &[high]);
    }

    if let Some(&t) = trips.first() {
        let kickers = kickers_excluding(&groups, &[t], 2);
        return strength(Category::ThreeOfAKind, &[&[t][..], &kickers[..]].concat());
    }

    if pairs.len() >= 2 {
        let (high, low) = (pairs[0], pairs[1]);
        let kicker = highest_excluding(&groups, &[high, low]);
        return strength(Category::TwoPair, &[high, low, kicker]);
    }

    if let Some(&p) = pairs.first() {
        let kickers = kickers_excluding(&groups, &[p], 3);
        return strength(Category::OnePair, &[&[p][..], &kickers[..]].concat());
    }

    let highs = kickers_excluding(&groups, &[], 5);
    strength(Category::HighCard, &highs)
}

/// Seats holding the best strength among `contenders`, in input order.
pub fn best_seats(contenders: &[(usize, HandStrength)]) -> Vec<usize> {
    let Some(best) = contenders.iter().map(|(_, s)| s).max() else {
        return Vec::new();
    };
    contenders
        .iter()
        .filter(|(_, s)| s == best)
        .map(|(seat, _)| *seat)
        .collect()
}

fn strength(category: Category, ranks: &[u8]) -> HandStrength {
    let mut kickers = [0u8; 5];
    for (slot, r) in kickers.iter_mut().zip(ranks) {
        *slot = *r;
    }
    HandStrength { category, kickers }
}

fn suit_index(s: Suit) -> usize {
    match s {
        Suit::Clubs => 0,
        Suit::Diamonds => 1,
        Suit::Hearts => 2,
        Suit::Spades => 3,
    }
}

/// (rank, count) for every rank present, high ranks first.
fn rank_groups(rank_counts: &[u8; 15]) -> Vec<(u8, u8)> {
    (2..=14u8)
        .rev()
        .filter(|&r| rank_counts[r as usize] > 0)
        .map(|r| (r, rank_counts[r as usize]))
        .collect()
}

fn kickers_excluding(groups: &[(u8, u8)], used: &[u8], n: usize) -> Vec<u8> {
    groups
        .iter()
        .map(|(r, _)| *r)
        .filter(|r| !used.contains(r))
        .take(n)
        .collect()
}

fn highest_excluding(groups: &[(u8, u8)], used: &[u8]) -> u8 {
    kickers_excluding(groups, used, 1).first().copied().unwrap_or(0)
}

fn ranks_in_mask(mask: u16) -> Vec<u8> {
    (2..=14u8).rev().filter(|r| mask & (1 << r) != 0).collect()
}

fn straight_high_from_mask(mask: u16) -> Option<u8> {
    let mut m = mask;
    // Ace also plays low
    if (m & (1 << 14)) != 0 {
        m |= 1 << 1;
    }
    (5..=14u8).rev().find(|&high| {
        let window = 0b11111u16 << (high - 4);
        m & window == window
    })
}

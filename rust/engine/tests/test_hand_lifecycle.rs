use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tablejudge_engine::moves::{Move, MoveType};
use tablejudge_engine::phase::HandPhase;
use tablejudge_engine::player::{BlindRole, PlayerState};
use tablejudge_engine::rules::LegalMoves;
use tablejudge_engine::table::{Blinds, Table};

fn passive(legal: &LegalMoves) -> Move {
    if legal.can_call() {
        Move::CALL
    } else {
        Move::CHECK
    }
}

#[test]
fn phases_reveal_three_one_one() {
    let mut t = Table::new(2, 500, Blinds::from_big(10), 99);
    t.start_hand().unwrap();
    let mut seen = vec![(t.phase(), t.board().len())];
    loop {
        while let Some(seat) = t.next_actor() {
            let legal = t.legal_moves(seat).unwrap();
            t.apply_move(seat, passive(&legal)).unwrap();
        }
        let phase = t.end_round().unwrap();
        seen.push((phase, t.board().len()));
        if phase == HandPhase::Settle {
            break;
        }
    }
    assert_eq!(
        seen,
        vec![
            (HandPhase::Preflop, 0),
            (HandPhase::Flop, 3),
            (HandPhase::Turn, 4),
            (HandPhase::River, 5),
            (HandPhase::Settle, 5),
        ]
    );
    t.settle().unwrap();
    assert_eq!(t.phase(), HandPhase::Prehand);
    assert!(t.board().is_empty());
}

#[test]
fn passive_heads_up_hand_moves_ten_chips() {
    let mut t = Table::new(2, 500, Blinds::from_big(10), 4);
    let outcome = t.play_hand_with(|_, legal| passive(legal)).unwrap();
    assert_eq!(outcome.pot, 20);
    assert!(outcome.showdown);
    let mut chips = t.chips();
    chips.sort();
    assert!(chips == vec![480, 520] || chips == vec![490, 490], "{:?}", chips);
    assert!(outcome
        .history
        .encode()
        .starts_with("0:CALL:|1:CHECK:|0:CHECK:|1:CHECK:|0:CHECK:|1:CHECK:|0:CHECK:|1:CHECK:||RESULT||"));
}

#[test]
fn busted_seats_are_skipped_for_blinds_and_deal() {
    let mut t = Table::with_stacks(vec![0, 100, 100], Blinds::from_big(10), 6);
    t.start_hand().unwrap();
    let seats = t.seats();
    assert_eq!(seats[0].state(), PlayerState::Skip);
    assert!(seats[0].hole_cards().is_none());
    assert_eq!(seats[1].blind(), BlindRole::Small);
    assert_eq!(seats[2].blind(), BlindRole::Big);
    assert_eq!(t.next_actor(), Some(1));
}

#[test]
fn short_big_blind_is_posted_all_in() {
    let mut t = Table::with_stacks(vec![500, 3], Blinds::from_big(10), 6);
    t.start_hand().unwrap();
    assert_eq!(t.seats()[1].state(), PlayerState::AllIn);
    assert_eq!(t.pot(), 8);
    assert_eq!(t.target_bet(), 5);
    // the small blind is the only seat left that could bet and owes nothing
    assert_eq!(t.next_actor(), None);
    assert_eq!(t.end_round().unwrap(), HandPhase::Settle);
    assert_eq!(t.board().len(), 5);
}

#[test]
fn small_blind_rotation_skips_busted_seats() {
    let mut t = Table::with_stacks(vec![100, 0, 100, 100], Blinds::from_big(10), 12);
    t.play_hand_with(|_, legal| legal.fallback()).unwrap();
    // fallback folds around to the big blind
    t.start_hand().unwrap();
    assert_eq!(t.small_blind_seat(), 2);
    assert_eq!(t.big_blind_seat(), 3);
}

#[test]
fn chips_are_conserved_under_random_play() {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut t = Table::new(4, 200, Blinds::from_big(10), 77);
    let mut hands = 0;
    while t.seats_with_chips() > 1 && hands < 300 {
        let outcome = t
            .play_hand_with(|_, legal| {
                let types = legal.move_types();
                match types[rng.random_range(0..types.len())] {
                    MoveType::Raise => {
                        let min = legal.min_raise().unwrap();
                        let max = legal.max_raise().unwrap();
                        // sometimes overshoot to exercise clamping
                        Move::raise(rng.random_range(min..=max + 50)).unwrap()
                    }
                    kind => Move::new(kind, None).unwrap(),
                }
            })
            .unwrap();
        assert_eq!(t.total_chips(), 800);
        assert_eq!(outcome.chips.iter().sum::<u32>(), 800);
        assert_eq!(
            outcome.payouts.iter().map(|(_, c)| c).sum::<u32>(),
            outcome.pot
        );
        hands += 1;
    }
    assert!(hands > 0);
}

#[test]
fn illegal_answers_fall_back_in_play_hand_with() {
    let mut t = Table::new(2, 500, Blinds::from_big(10), 3);
    // checking while facing the small-blind call is illegal, so it folds
    let outcome = t.play_hand_with(|_, _| Move::CHECK).unwrap();
    assert_eq!(outcome.winners, vec![1]);
    assert!(!outcome.showdown);
    assert_eq!(t.chips(), vec![495, 505]);
}

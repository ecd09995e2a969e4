//! Card, board, move and standings formatters for terminal display.
//!
//! Pure functions only. Suits render as Unicode symbols where the terminal
//! supports them and fall back to `h d c s` elsewhere.
//!
//! ## Example
//!
//! ```rust
//! use tablejudge_engine::cards::{Card, Rank, Suit};
//! use tablejudge_cli::formatters::{format_board, format_card};
//!
//! let ace_spades = Card::new(Rank::Ace, Suit::Spades);
//! assert!(format_card(&ace_spades) == "A♠" || format_card(&ace_spades) == "As");
//! assert!(format_board(&[ace_spades]).starts_with("[A"));
//! ```

use tablejudge_engine::cards::{Card, Suit};
use tablejudge_engine::game::Standings;
use tablejudge_engine::judge::HandReport;
use tablejudge_engine::moves::{Move, MoveType};

/// On Windows, checks for Windows Terminal (WT_SESSION), modern terminals
/// (TERM_PROGRAM) or VS Code (VSCODE_INJECTION). Unix-like systems are
/// assumed to support Unicode.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: Suit) -> String {
    if supports_unicode() {
        match suit {
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
            Suit::Spades => "♠",
        }
        .to_string()
    } else {
        suit.symbol().to_string()
    }
}

pub fn format_card(card: &Card) -> String {
    format!("{}{}", card.rank.symbol(), format_suit(card.suit))
}

/// `[A♠ K♥ Q♦]`, or `[]` for an empty board.
pub fn format_board(cards: &[Card]) -> String {
    let formatted: Vec<String> = cards.iter().map(format_card).collect();
    format!("[{}]", formatted.join(" "))
}

/// # Example
///
/// ```rust
/// use tablejudge_engine::moves::Move;
/// use tablejudge_cli::formatters::format_move;
///
/// assert_eq!(format_move(&Move::FOLD), "fold");
/// assert_eq!(format_move(&Move::raise(40).unwrap()), "raise to 40");
/// ```
pub fn format_move(mv: &Move) -> String {
    match (mv.kind(), mv.amount()) {
        (MoveType::Raise, Some(to)) => format!("raise to {}", to),
        (kind, _) => kind.as_str().to_ascii_lowercase(),
    }
}

/// One line per hand: number, winners, pot and board.
pub fn format_hand_report(report: &HandReport) -> String {
    let o = &report.outcome;
    let winners: Vec<String> = o.winners.iter().map(|w| format!("seat {}", w)).collect();
    let how = if o.showdown { "showdown" } else { "uncontested" };
    format!(
        "Hand {}: {} win{} {} ({}) {}",
        o.hand_number,
        winners.join(", "),
        if o.winners.len() == 1 { "s" } else { "" },
        o.pot,
        how,
        format_board(&o.board)
    )
}

/// Ranked standings table, best seat first.
pub fn format_standings(standings: &Standings) -> String {
    let name_width = standings
        .seats()
        .iter()
        .map(|s| s.agent.len())
        .max()
        .unwrap_or(0)
        .max("Agent".len());
    let mut lines = vec![format!(
        "{:<4} {:<4} {:<w$} {:>5} {:>10} {:>12} {:>8} {:>7}",
        "Rank",
        "Seat",
        "Agent",
        "Wins",
        "Chips",
        "Rewards",
        "Timeouts",
        "Invalid",
        w = name_width
    )];
    for (i, s) in standings.ranked().iter().enumerate() {
        lines.push(format!(
            "{:<4} {:<4} {:<w$} {:>5} {:>10} {:>12} {:>8} {:>7}",
            i + 1,
            s.seat,
            s.agent,
            s.wins,
            s.chips,
            s.rewards,
            s.stats.timeouts,
            s.stats.invalid + s.stats.failures,
            w = name_width
        ));
    }
    let truncated = standings.games().iter().filter(|g| g.truncated).count();
    lines.push(format!(
        "Games: {} ({} truncated at the hand limit)",
        standings.games().len(),
        truncated
    ));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablejudge_engine::cards::Rank;
    use tablejudge_engine::game::GameSummary;

    #[test]
    fn empty_board_is_brackets() {
        assert_eq!(format_board(&[]), "[]");
    }

    #[test]
    fn board_joins_cards_with_spaces() {
        let board = [
            Card::new(Rank::Ten, Suit::Clubs),
            Card::new(Rank::Two, Suit::Hearts),
        ];
        let s = format_board(&board);
        assert!(s == "[T♣ 2♥]" || s == "[Tc 2h]", "{}", s);
    }

    #[test]
    fn moves_are_lowercase() {
        assert_eq!(format_move(&Move::CHECK), "check");
        assert_eq!(format_move(&Move::CALL), "call");
    }

    #[test]
    fn standings_list_best_seat_first() {
        let mut st = Standings::new(&["call", "baseline"]);
        st.record_game(
            &GameSummary {
                game: 1,
                hands_played: 12,
                chips: vec![0, 1000],
                winner: 1,
                truncated: false,
            },
            &[3000, 9000],
        );
        let text = format_standings(&st);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("Rank"));
        assert!(lines[1].contains("baseline"));
        assert!(lines[2].contains("call"));
        assert_eq!(lines[3], "Games: 1 (0 truncated at the hand limit)");
    }
}

use serde::{Deserialize, Serialize};

use crate::cards::{format_cards, Card};
use crate::moves::Move;
use crate::phase::HandPhase;

/// One applied move in a hand's history.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub seat: usize,
    pub phase: HandPhase,
    pub mv: Move,
}

impl MoveRecord {
    /// `seat:TYPE:amount|`
    pub fn encode(&self) -> String {
        format!("{}:{}|", self.seat, self.mv)
    }
}

/// Move history of the hand in progress, plus the closing result line once
/// the hand is settled.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandHistory {
    moves: Vec<MoveRecord>,
    result: Option<String>,
}

impl HandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: MoveRecord) {
        self.moves.push(record);
    }

    pub fn moves(&self) -> &[MoveRecord] {
        &self.moves
    }

    pub fn is_closed(&self) -> bool {
        self.result.is_some()
    }

    /// Appends `|RESULT||board|pot|seat:chips,...`.
    pub fn close(&mut self, board: &[Card], pot: u32, chips: &[u32]) {
        let stacks = chips
            .iter()
            .enumerate()
            .map(|(seat, c)| format!("{}:{}", seat, c))
            .collect::<Vec<_>>()
            .join(",");
        self.result = Some(format!(
            "|RESULT||{}|{}|{}",
            format_cards(board),
            pot,
            stacks
        ));
    }

    pub fn encode(&self) -> String {
        let mut s: String = self.moves.iter().map(MoveRecord::encode).collect();
        if let Some(r) = &self.result {
            s.push_str(r);
        }
        s
    }
}

/// Complete record of a settled hand, serialized one per line to JSONL.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    /// Unique identifier for this hand (format: YYYYMMDD-NNNNNN)
    pub hand_id: String,
    /// Game number within the tournament, starting at 1
    pub game: u32,
    /// Seed of the table's deck RNG
    pub seed: u64,
    pub moves: Vec<MoveRecord>,
    pub board: Vec<Card>,
    pub pot: u32,
    pub winners: Vec<usize>,
    pub showdown: bool,
    /// Stacks after the payout, by seat
    pub chips: Vec<u32>,
    /// Compact history line as produced by [`HandHistory::encode`]
    pub history: String,
    /// Timestamp when the hand was written (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
}

pub fn format_hand_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Appends [`HandRecord`]s to a JSONL file.
pub struct HandLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl HandLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

    /// A logger that hands out ids but writes nothing.
    pub fn disabled(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_hand_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &HandRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(seat: usize, mv: Move) -> MoveRecord {
        MoveRecord {
            seat,
            phase: HandPhase::Preflop,
            mv,
        }
    }

    #[test]
    fn history_encodes_moves_then_result() {
        let mut h = HandHistory::new();
        h.push(record(0, Move::CALL));
        h.push(record(1, Move::raise(30).unwrap()));
        h.push(record(0, Move::FOLD));
        assert_eq!(h.encode(), "0:CALL:|1:RAISE:30|0:FOLD:|");

        let board: Vec<Card> = ["Ah", "Kd", "2c"].iter().map(|c| c.parse().unwrap()).collect();
        h.close(&board, 40, &[470, 530]);
        assert!(h.is_closed());
        assert_eq!(
            h.encode(),
            "0:CALL:|1:RAISE:30|0:FOLD:||RESULT||AhKd2c|40|0:470,1:530"
        );
    }

    #[test]
    fn hand_ids_are_sequential() {
        let mut logger = HandLogger::disabled("20260101");
        assert_eq!(logger.next_id(), "20260101-000001");
        assert_eq!(logger.next_id(), "20260101-000002");
    }

    #[test]
    fn writes_one_json_line_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/hands.jsonl");
        let mut logger = HandLogger::create(&path).unwrap();
        let rec = HandRecord {
            hand_id: logger.next_id(),
            game: 1,
            seed: 9,
            moves: vec![record(0, Move::FOLD)],
            board: vec![],
            pot: 15,
            winners: vec![1],
            showdown: false,
            chips: vec![495, 505],
            history: "0:FOLD:|".to_string(),
            ts: None,
        };
        logger.write(&rec).unwrap();
        logger.write(&rec).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        let parsed: HandRecord = serde_json::from_str(lines[0]).unwrap();
        assert!(parsed.ts.is_some());
        assert_eq!(parsed.winners, vec![1]);
    }
}

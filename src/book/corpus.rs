//! Mining frequent opening prefixes from game transcripts.
//!
//! A transcript holds one game per line as concatenated two-character moves
//! (`f5d6c3...`). Optional `+`/`-` color markers and whitespace between moves
//! are ignored, and parsing of a line stops at the first character that does
//! not start a move (trailing scores, comments).

use crate::board::Move;
use std::collections::HashMap;

pub const DEFAULT_PREFIX_LEN: usize = 10;
pub const DEFAULT_TOP_N: usize = 70;

/// Parses the moves of one transcript line.
pub fn parse_line(line: &str) -> Vec<Move> {
    let bytes = line.as_bytes();
    let mut moves = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b == b'+' || b == b'-' || b.is_ascii_whitespace() {
            i += 1;
            continue;
        }
        if i + 1 >= bytes.len() { break; }
        match std::str::from_utf8(&bytes[i..i + 2]).ok().and_then(|s| Move::from_algebraic(s).ok()) {
            Some(mv) => moves.push(mv),
            None => break,
        }
        i += 2;
    }
    moves
}

/// The `top_n` most frequent `prefix_len`-move openings, most frequent first.
///
/// Equal counts keep the order in which the prefix first appeared.
pub fn mine_lines(corpus: &str, prefix_len: usize, top_n: usize) -> Vec<Vec<Move>> {
    let mut counts: HashMap<Vec<Move>, usize> = HashMap::new();
    let mut order: Vec<Vec<Move>> = Vec::new();
    for line in corpus.lines() {
        let mut moves = parse_line(line);
        if moves.is_empty() { continue; }
        moves.truncate(prefix_len);
        let n = counts.entry(moves.clone()).or_insert(0);
        if *n == 0 { order.push(moves); }
        *n += 1;
    }
    // Stable sort keeps first-appearance order among equal counts.
    order.sort_by_key(|line| std::cmp::Reverse(counts[line]));
    order.truncate(top_n);
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn mv(s: &str) -> Move { Move::from_algebraic(s).unwrap() }

    #[test]
    fn parses_plain_and_marked_transcripts() {
        assert_eq!(parse_line("f5d6c3"), vec![mv("f5"), mv("d6"), mv("c3")]);
        assert_eq!(parse_line("+f5-d6+c3"), vec![mv("f5"), mv("d6"), mv("c3")]);
        assert_eq!(parse_line("+f5-d6 : +12"), vec![mv("f5"), mv("d6")]);
        assert!(parse_line("").is_empty());
    }

    #[test]
    fn mining_orders_by_frequency_then_first_seen() {
        let corpus = "f5d6c3\nf5f6e6\nf5d6c3\nf5f4e3\nf5f6e6\nf5d6c3\n";
        let lines = mine_lines(corpus, 2, 10);
        assert_eq!(lines, vec![vec![mv("f5"), mv("d6")], vec![mv("f5"), mv("f6")], vec![mv("f5"), mv("f4")]]);
        assert_eq!(mine_lines(corpus, 3, 1), vec![vec![mv("f5"), mv("d6"), mv("c3")]]);
    }
}

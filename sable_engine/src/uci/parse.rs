//! Parsing of UCI input: the `go` time parameters and the `position`
//! command.

use sable::Board;

use crate::time::uci_timer::{PreLimits, UCITimer};

fn is_keyword(arg: &str) -> bool {
    matches!(
        arg,
        "searchmoves"
            | "ponder"
            | "wtime"
            | "btime"
            | "winc"
            | "binc"
            | "movestogo"
            | "depth"
            | "nodes"
            | "mate"
            | "movetime"
            | "infinite"
    )
}

/// Parses everything after `go`:
///
/// ```md,ignore
/// go [searchmoves <move>+] [ponder] [wtime n] [btime n] [winc n] [binc n]
///    [movestogo n] [depth n] [nodes n] [mate n] [movetime n] [infinite]
/// ```
///
/// Malformed numbers are skipped; their clause is ignored.
pub fn parse_time(args: &[&str]) -> PreLimits {
    let mut token_idx: usize = 0;
    let mut limit = PreLimits::blank();
    let mut timer = UCITimer::blank();
    while let Some(token) = args.get(token_idx) {
        match *token {
            "infinite" => {
                limit.infinite = true;
            }
            "ponder" => {
                limit.ponder = true;
            }
            "wtime" => {
                if let Some(s) = args.get(token_idx + 1) {
                    if let Ok(wtime) = s.parse::<i64>() {
                        timer.time_msec[0] = wtime;
                    }
                    token_idx += 1;
                }
            }
            "btime" => {
                if let Some(s) = args.get(token_idx + 1) {
                    if let Ok(btime) = s.parse::<i64>() {
                        timer.time_msec[1] = btime;
                    }
                    token_idx += 1;
                }
            }
            "winc" => {
                if let Some(s) = args.get(token_idx + 1) {
                    if let Ok(winc) = s.parse::<i64>() {
                        timer.inc_msec[0] = winc;
                    }
                    token_idx += 1;
                }
            }
            "binc" => {
                if let Some(s) = args.get(token_idx + 1) {
                    if let Ok(binc) = s.parse::<i64>() {
                        timer.inc_msec[1] = binc;
                    }
                    token_idx += 1;
                }
            }
            "movestogo" => {
                if let Some(s) = args.get(token_idx + 1) {
                    if let Ok(movestogo) = s.parse::<u32>() {
                        timer.moves_to_go = movestogo;
                    }
                    token_idx += 1;
                }
            }
            "depth" => {
                if let Some(s) = args.get(token_idx + 1) {
                    if let Ok(depth) = s.parse::<u16>() {
                        limit.depth = Some(depth);
                    }
                    token_idx += 1;
                }
            }
            "nodes" => {
                if let Some(s) = args.get(token_idx + 1) {
                    if let Ok(nodes) = s.parse::<u64>() {
                        limit.nodes = Some(nodes);
                    }
                    token_idx += 1;
                }
            }
            "mate" => {
                if let Some(s) = args.get(token_idx + 1) {
                    if let Ok(mate) = s.parse::<u16>() {
                        limit.mate = Some(mate);
                    }
                    token_idx += 1;
                }
            }
            "movetime" => {
                if let Some(s) = args.get(token_idx + 1) {
                    if let Ok(movetime) = s.parse::<u64>() {
                        limit.move_time = Some(movetime);
                    }
                    token_idx += 1;
                }
            }
            "searchmoves" => 'searchmoves: loop {
                if let Some(mov) = args.get(token_idx + 1) {
                    if !is_keyword(mov) {
                        limit.search_moves.push((*mov).to_string());
                        token_idx += 1;
                    } else {
                        break 'searchmoves;
                    }
                } else {
                    break 'searchmoves;
                }
            },
            _ => {}
        }
        token_idx += 1;
    }
    if !timer.is_blank() {
        limit.time = Some(timer);
    }
    limit
}

/// Parses a `position` command body: `startpos | fen <fen>` followed by an
/// optional `moves <move>+` tail.
pub fn position_parse_board(args: &[&str], chess960: bool) -> Option<Board> {
    if args.is_empty() {
        return None;
    }
    let start: &str = args[0];
    let mut board = if start == "startpos" {
        Some(Board::start_pos())
    } else if start == "fen" {
        let fen_string: String = args[1..]
            .iter()
            .take_while(|p: &&&str| **p != "moves")
            .map(|p| (*p).to_string())
            .collect::<Vec<String>>()
            .join(" ");
        match Board::from_fen(&fen_string) {
            Ok(b) => Some(b),
            Err(e) => {
                println!("info string invalid fen: {}", e);
                None
            }
        }
    } else {
        None
    };

    if let Some(ref mut b) = board {
        b.set_chess960(chess960);
    }

    let moves_start = args.iter().position(|p| *p == "moves");

    if let Some(start_idx) = moves_start {
        if let Some(ref mut op_board) = board {
            let mut index = start_idx + 1;
            while index < args.len() {
                if !op_board.apply_uci_move(args[index]) {
                    println!("info string illegal move ignored: {}", args[index]);
                    break;
                }
                index += 1;
            }
        }
    }
    board
}

#[cfg(test)]
mod tests {
    use super::*;
    use sable::Player;

    #[test]
    fn board_parse() {
        let b_str = "position startpos moves e2e4 e7e5";
        let args: Vec<&str> = b_str.split_whitespace().collect();
        let board = position_parse_board(&args[1..], false).unwrap();
        assert_eq!(board.moves_played(), 2);
        assert_eq!(board.turn(), Player::White);

        let b_str = "position startpos";
        let args: Vec<&str> = b_str.split_whitespace().collect();
        let board = position_parse_board(&args[1..], false).unwrap();
        assert_eq!(board.moves_played(), 0);
    }

    #[test]
    fn fen_parse_with_moves() {
        let b_str = "position fen r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1 moves e1g1";
        let args: Vec<&str> = b_str.split_whitespace().collect();
        let board = position_parse_board(&args[1..], false).unwrap();
        assert_eq!(board.turn(), Player::Black);
    }

    #[test]
    fn time_parse() {
        let t_str = "go infinite searchmoves e2e4 d2d4";
        let args: Vec<&str> = t_str.split_whitespace().collect();
        let time = parse_time(&args[1..]);
        assert_eq!(time.search_moves.len(), 2);
        assert!(time.infinite);
    }

    #[test]
    fn clock_parse() {
        let t_str = "go wtime 60000 btime 59000 winc 1000 binc 900 movestogo 12";
        let args: Vec<&str> = t_str.split_whitespace().collect();
        let time = parse_time(&args[1..]);
        let timer = time.time.unwrap();
        assert_eq!(timer.time_msec, [60_000, 59_000]);
        assert_eq!(timer.inc_msec, [1000, 900]);
        assert_eq!(timer.moves_to_go, 12);
    }
}

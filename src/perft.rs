use crate::board::Position;

/// Leaf count of the move tree `depth` plies deep, using make/unmake.
///
/// A forced pass counts as a ply; a finished game is a single leaf.
pub fn perft(pos: &mut Position, depth: u32) -> u64 {
    if depth == 0 { return 1; }
    let moves = pos.possible_moves();
    if moves.is_empty() {
        if pos.is_game_over() { return 1; }
        pos.pass();
        let nodes = perft(pos, depth - 1);
        pos.pass();
        return nodes;
    }
    let mut nodes = 0u64;
    for mv in moves {
        let Ok(undo) = pos.perform_move(mv) else { continue };
        nodes += perft(pos, depth - 1);
        pos.undo_move(undo);
    }
    nodes
}

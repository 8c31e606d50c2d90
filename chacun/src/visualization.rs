use std::collections::BTreeSet;

use crate::{Board, BoundingBox, Pos};

/// Draws the board as a grid of tile ids, with `··` marking the cells where
/// the next tile could go.
pub fn visualize_board(board: &Board) -> String {
    let frontier: BTreeSet<Pos> = board.insertion_positions().into_iter().collect();
    let cells = board
        .placed_tiles()
        .map(|tile| (tile.pos.x, tile.pos.y))
        .chain(frontier.iter().map(|pos| (pos.x, pos.y)));
    let Some(bbox) = BoundingBox::from_coordinates_iter(cells) else {
        return String::from("(empty board)");
    };

    // Draw the top of the box
    let mut result = String::from("     ");
    for x in bbox.x_min..=bbox.x_max {
        result += &format!("{:>3}", x);
    }
    result += "\n    ╭";
    for _ in bbox.x_min..=bbox.x_max {
        result += "───";
    }
    result += "─╮\n";

    for y in bbox.y_min..=bbox.y_max {
        result += &format!("{:>3} │", y);
        for x in bbox.x_min..=bbox.x_max {
            let pos = Pos::new(x, y);
            if let Some(tile) = board.tile_at(pos) {
                result += &format!("{:>3}", tile.id());
            } else if frontier.contains(&pos) {
                result += " ··";
            } else {
                result += "   ";
            }
        }
        result += " │\n";
    }

    // Draw the bottom of the box
    result += "    ╰";
    for _ in bbox.x_min..=bbox.x_max {
        result += "───";
    }
    result += "─╯";
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{catalog, PlacedTile, PlayerColor, Rotation};

    #[test]
    fn draws_tiles_and_frontier() {
        let board = Board::new()
            .with_new_tile(PlacedTile::new(
                catalog::start_tile(),
                None,
                Rotation::Zero,
                Pos::ORIGIN,
            ))
            .unwrap();
        let expected = [
            "      -1  0  1",
            "    ╭──────────╮",
            " -1 │    ··    │",
            "  0 │ ·· 56 ·· │",
            "  1 │    ··    │",
            "    ╰──────────╯",
        ]
        .join("\n");
        assert_eq!(visualize_board(&board), expected);

        let board = board
            .with_new_tile(PlacedTile::new(
                catalog::tile(42).unwrap(),
                Some(PlayerColor::Red),
                Rotation::Zero,
                Pos::new(0, -1),
            ))
            .unwrap();
        let drawing = visualize_board(&board);
        assert!(drawing.contains(" -2 │    ··    │"));
        assert!(drawing.contains(" -1 │ ·· 42 ·· │"));
    }

    #[test]
    fn empty_board() {
        assert_eq!(visualize_board(&Board::new()), "(empty board)");
    }
}

use quickcheck::{Arbitrary, Gen};

use crate::{catalog, Board, Occupant, PlacedTile, PlayerColor, Pos, Rotation, Tile};

/// A board grown from the start tile by legal placements of catalog tiles,
/// some of them occupied.
#[derive(Clone, Debug)]
pub struct GrownBoard {
    pub board: Board,
    // The catalog tiles that are not on the board
    pub remaining: Vec<Tile>,
}

impl Arbitrary for GrownBoard {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut deck: Vec<Tile> = catalog::tiles()
            .into_iter()
            .filter(|tile| tile.id != catalog::START_TILE_ID)
            .collect();
        for i in (1..deck.len()).rev() {
            let j = usize::arbitrary(g) % (i + 1);
            deck.swap(i, j);
        }
        let num_tiles = usize::arbitrary(g) % (deck.len() + 1);
        let mut remaining = deck.split_off(num_tiles);

        let start = PlacedTile::new(catalog::start_tile(), None, Rotation::Zero, Pos::ORIGIN);
        let mut board = Board::new().with_new_tile(start).unwrap();
        for tile in deck {
            let placements: Vec<(Pos, Rotation)> = board
                .insertion_positions()
                .into_iter()
                .flat_map(|pos| Rotation::ALL.map(|rotation| (pos, rotation)))
                .filter(|&(pos, rotation)| {
                    board.can_add_tile(&PlacedTile::new(tile.clone(), None, rotation, pos))
                })
                .collect();
            let Some(&(pos, rotation)) = g.choose(&placements) else {
                remaining.push(tile);
                continue;
            };
            let placer = *g.choose(&PlayerColor::ALL).unwrap();
            board = board
                .with_new_tile(PlacedTile::new(tile, Some(placer), rotation, pos))
                .unwrap();

            if bool::arbitrary(g) {
                let occupants: Vec<Occupant> = board
                    .last_placed_tile()
                    .unwrap()
                    .potential_occupants()
                    .into_iter()
                    .collect();
                // The area may already be taken
                if let Some(&occupant) = g.choose(&occupants) {
                    if let Ok(occupied) = board.with_occupant(occupant) {
                        board = occupied;
                    }
                }
            }
        }
        GrownBoard { board, remaining }
    }
}

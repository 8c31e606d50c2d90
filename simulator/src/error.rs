#[derive(Debug, PartialEq, Eq)]
/// Error type for loading a deck of tiles.
pub enum DeckError {
    MissingStartTile,
    SeveralStartTiles { tile_ids: Vec<u32> },
    DuplicateTileId { tile_id: u32 },
}

impl std::error::Error for DeckError {}

impl std::fmt::Display for DeckError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeckError::MissingStartTile => write!(f, "The deck has no start tile"),
            DeckError::SeveralStartTiles { tile_ids } => {
                write!(f, "The deck has several start tiles: {:?}", tile_ids)
            }
            DeckError::DuplicateTileId { tile_id } => {
                write!(f, "Tile {} appears more than once in the deck", tile_id)
            }
        }
    }
}

use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chacun::{catalog, Tile, TileKind};
use tracing::debug;

use crate::error::DeckError;

/// The tiles of one game: the start tile and the pile to draw from.
#[derive(Clone, Debug, PartialEq)]
pub struct Deck {
    pub start: Tile,
    pub tiles: Vec<Tile>,
}

impl Deck {
    pub fn new(tiles: Vec<Tile>) -> Result<Self, DeckError> {
        let mut ids = BTreeSet::new();
        for tile in &tiles {
            if !ids.insert(tile.id) {
                return Err(DeckError::DuplicateTileId { tile_id: tile.id });
            }
        }
        let (mut starts, tiles): (Vec<Tile>, Vec<Tile>) = tiles
            .into_iter()
            .partition(|tile| tile.kind == TileKind::Start);
        let start = match starts.len() {
            0 => return Err(DeckError::MissingStartTile),
            1 => starts.remove(0),
            _ => {
                return Err(DeckError::SeveralStartTiles {
                    tile_ids: starts.iter().map(|tile| tile.id).collect(),
                })
            }
        };
        Ok(Self { start, tiles })
    }

    /// The tile set shipped with the rules engine.
    pub fn builtin() -> Result<Self, DeckError> {
        Self::new(catalog::tiles())
    }

    /// Reads a JSON array of tiles.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let tiles: Vec<Tile> = serde_json::from_reader(reader)?;
        debug!(num_tiles = tiles.len(), path = %path.display(), "Loaded tiles");
        Ok(Self::new(tiles)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_deck_splits_off_the_start_tile() {
        let deck = Deck::builtin().unwrap();
        assert_eq!(deck.start.id, catalog::START_TILE_ID);
        assert_eq!(deck.tiles.len(), catalog::tiles().len() - 1);
        assert!(deck.tiles.iter().all(|tile| tile.kind != TileKind::Start));
    }

    #[test]
    fn invalid_decks_are_rejected() {
        let mut tiles = catalog::tiles();
        tiles.retain(|tile| tile.kind != TileKind::Start);
        assert_eq!(Deck::new(tiles.clone()), Err(DeckError::MissingStartTile));

        tiles.push(catalog::start_tile());
        tiles.push(tiles[0].clone());
        assert_eq!(
            Deck::new(tiles),
            Err(DeckError::DuplicateTileId { tile_id: 10 })
        );

        let mut other_start = catalog::start_tile();
        other_start.id = 57;
        let tiles = vec![catalog::start_tile(), other_start];
        assert_eq!(
            Deck::new(tiles),
            Err(DeckError::SeveralStartTiles {
                tile_ids: vec![56, 57]
            })
        );
    }

    #[test]
    fn load_from_json() {
        let path = std::env::temp_dir().join(format!("chacun-deck-{}.json", std::process::id()));
        std::fs::write(&path, serde_json::to_string(&catalog::tiles()).unwrap()).unwrap();
        let deck = Deck::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(deck, Deck::builtin().unwrap());
    }
}

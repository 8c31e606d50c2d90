use std::ops::AddAssign;

use chacun::{Board, Occupant, PlacedTile, PlayerColor, Pos, Rotation, Tile};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use crate::deck::Deck;
use crate::recording::{Recorder, TurnRecord};
use crate::Config;

/// What happened during one or more games.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GameStats {
    pub tiles_placed: usize,
    pub tiles_discarded: usize,
    pub occupants_placed: usize,
    pub closed_forests: usize,
    pub closed_rivers: usize,
}

impl AddAssign for GameStats {
    fn add_assign(&mut self, other: GameStats) {
        self.tiles_placed += other.tiles_placed;
        self.tiles_discarded += other.tiles_discarded;
        self.occupants_placed += other.occupants_placed;
        self.closed_forests += other.closed_forests;
        self.closed_rivers += other.closed_rivers;
    }
}

pub struct GameOutcome {
    pub board: Board,
    pub stats: GameStats,
}

/// Every position and rotation where the tile could be placed.
pub fn legal_placements(board: &Board, tile: &Tile) -> Vec<(Pos, Rotation)> {
    let mut placements = Vec::new();
    for pos in board.insertion_positions() {
        for rotation in Rotation::ALL {
            if board.can_add_tile(&PlacedTile::new(tile.clone(), None, rotation, pos)) {
                placements.push((pos, rotation));
            }
        }
    }
    placements
}

// The occupants the player could put on the last placed tile: supply left
// and the area not taken yet.
fn possible_occupants(board: &Board, player: PlayerColor) -> Vec<Occupant> {
    let Some(tile) = board.last_placed_tile() else {
        return Vec::new();
    };
    tile.potential_occupants()
        .into_iter()
        .filter(|occupant| {
            (board.occupant_count(player, occupant.kind) as u32) < occupant.kind.occupants_count()
        })
        .filter(|&occupant| board.with_occupant(occupant).is_ok())
        .collect()
}

/// Plays one game where every player places tiles and occupants at random.
///
/// Returns an error only when the deck or the recording is broken, the
/// players themselves never make illegal moves.
pub fn play_game(
    rng: &mut StdRng,
    players: &[PlayerColor],
    deck: &Deck,
    recorder: &mut Option<Recorder>,
) -> anyhow::Result<GameOutcome> {
    if players.is_empty() {
        anyhow::bail!("A game needs at least one player");
    }
    let start = PlacedTile::new(deck.start.clone(), None, Rotation::Zero, Pos::ORIGIN);
    let mut board = Board::new().with_new_tile(start)?;
    let mut pile = deck.tiles.clone();
    pile.shuffle(rng);

    let mut stats = GameStats::default();
    let mut current_player_idx = 0;
    for tile in pile {
        let tile_id = tile.id;
        if !board.could_place_tile(&tile) {
            debug!(tile_id, "Discarded tile");
            stats.tiles_discarded += 1;
            if let Some(rec) = recorder.as_mut() {
                rec.store_turn(TurnRecord::Discarded { tile_id });
            }
            continue;
        }
        let placements = legal_placements(&board, &tile);
        let Some(&(pos, rotation)) = placements.choose(rng) else {
            anyhow::bail!("Tile {} fits the board, but no placement was found", tile_id);
        };

        let player = players[current_player_idx];
        current_player_idx = (current_player_idx + 1) % players.len();
        board = board.with_new_tile(PlacedTile::new(tile, Some(player), rotation, pos))?;
        stats.tiles_placed += 1;

        let mut occupant = None;
        if rng.gen::<bool>() {
            if let Some(&chosen) = possible_occupants(&board, player).choose(rng) {
                board = board.with_occupant(chosen)?;
                occupant = Some(chosen);
                stats.occupants_placed += 1;
            }
        }

        let forests = board.forests_closed_by_last_tile();
        let rivers = board.rivers_closed_by_last_tile();
        stats.closed_forests += forests.len();
        stats.closed_rivers += rivers.len();
        let occupants_before = board.occupants().len();
        board = board.without_gatherers_or_fishers_in(&forests, &rivers)?;
        let returned_pawns = occupants_before - board.occupants().len();

        if let Some(rec) = recorder.as_mut() {
            rec.store_turn(TurnRecord::Placed {
                player,
                tile_id,
                pos,
                rotation,
                occupant,
                returned_pawns,
            });
        }
    }

    if let Some(rec) = recorder {
        rec.write_game_recording(players)?;
    }
    Ok(GameOutcome { board, stats })
}

/// Plays several games in a row and sums up their statistics.
pub fn play_games(config: &mut Config, num_games: usize) -> anyhow::Result<GameStats> {
    let mut total = GameStats::default();
    for game_idx in 0..num_games {
        let outcome = play_game(
            &mut config.rng,
            &config.players,
            &config.deck,
            &mut config.recorder,
        )?;
        let stats = outcome.stats;
        info!(
            game_idx,
            tiles_placed = stats.tiles_placed,
            tiles_discarded = stats.tiles_discarded,
            closed_forests = stats.closed_forests,
            closed_rivers = stats.closed_rivers,
            "Game finished"
        );
        debug!("\n{}", chacun::visualize_board(&outcome.board));
        total += stats;
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use chacun::OccupantKind;
    use rand::SeedableRng;

    use super::*;
    use crate::recording::GameRecording;

    fn two_players() -> Vec<PlayerColor> {
        vec![PlayerColor::Red, PlayerColor::Blue]
    }

    #[test]
    fn every_tile_is_placed_or_discarded() {
        let deck = Deck::builtin().unwrap();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let outcome = play_game(&mut rng, &two_players(), &deck, &mut None).unwrap();
            let stats = outcome.stats;
            assert_eq!(stats.tiles_placed + stats.tiles_discarded, deck.tiles.len());
            assert_eq!(outcome.board.len(), stats.tiles_placed + 1);
        }
    }

    #[test]
    fn games_follow_the_rules() {
        let deck = Deck::builtin().unwrap();
        let players = PlayerColor::ALL.to_vec();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let board = play_game(&mut rng, &players, &deck, &mut None).unwrap().board;
            for &player in &players {
                for kind in [OccupantKind::Pawn, OccupantKind::Hut] {
                    assert!(board.occupant_count(player, kind) as u32 <= kind.occupants_count());
                }
            }
            // Gatherers and fishers leave as soon as their area closes.
            let partitions = board.partitions();
            assert!(partitions
                .forests()
                .areas()
                .all(|area| !(area.is_closed() && area.is_occupied())));
            assert!(partitions
                .rivers()
                .areas()
                .all(|area| !(area.is_closed() && area.is_occupied())));
        }
    }

    #[test]
    fn same_seed_same_game() {
        let deck = Deck::builtin().unwrap();
        let board_1 = play_game(&mut StdRng::seed_from_u64(7), &two_players(), &deck, &mut None)
            .unwrap()
            .board;
        let board_2 = play_game(&mut StdRng::seed_from_u64(7), &two_players(), &deck, &mut None)
            .unwrap()
            .board;
        assert_eq!(board_1, board_2);
    }

    #[test]
    fn no_players_no_game() {
        let deck = Deck::builtin().unwrap();
        assert!(play_game(&mut StdRng::seed_from_u64(0), &[], &deck, &mut None).is_err());
    }

    #[test]
    fn games_are_recorded() {
        let directory =
            std::env::temp_dir().join(format!("chacun-recordings-{}", std::process::id()));
        std::fs::create_dir_all(&directory).unwrap();
        let mut config = Config {
            rng: StdRng::seed_from_u64(3),
            recorder: Some(Recorder::new(directory.clone()).unwrap()),
            players: two_players(),
            deck: Deck::builtin().unwrap(),
        };
        let total = play_games(&mut config, 2).unwrap();
        assert_eq!(
            total.tiles_placed + total.tiles_discarded,
            2 * config.deck.tiles.len()
        );

        let json = std::fs::read_to_string(directory.join("game_000002.json")).unwrap();
        let recording: GameRecording = serde_json::from_str(&json).unwrap();
        std::fs::remove_dir_all(&directory).unwrap();
        assert_eq!(recording.players, two_players());
        assert_eq!(recording.turns.len(), config.deck.tiles.len());
    }

    #[test]
    fn recorder_needs_a_directory() {
        let missing = std::env::temp_dir().join("chacun-no-such-directory");
        assert!(Recorder::new(missing).is_err());
    }
}

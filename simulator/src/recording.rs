use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use chacun::{Occupant, PlayerColor, Pos, Rotation};
use serde::{Deserialize, Serialize};

pub struct Recorder {
    num: usize,
    directory: PathBuf,
    turns: Vec<TurnRecord>,
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self {
            num: 1,
            directory,
            turns: Vec::new(),
        })
    }

    pub fn store_turn(&mut self, turn: TurnRecord) {
        self.turns.push(turn);
    }

    /// Writes the turns stored since the last call into the next game file.
    pub fn write_game_recording(&mut self, players: &[PlayerColor]) -> anyhow::Result<()> {
        let filepath = self.directory.join(format!("game_{:0>6}.json", self.num));
        let mut writer = BufWriter::new(File::create(filepath)?);
        let recording = GameRecording {
            players: players.to_vec(),
            turns: std::mem::take(&mut self.turns),
        };
        serde_json::to_writer_pretty(&mut writer, &recording)?;
        writer.flush()?;
        self.num += 1;
        Ok(())
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct GameRecording {
    pub players: Vec<PlayerColor>,
    pub turns: Vec<TurnRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TurnRecord {
    Placed {
        player: PlayerColor,
        tile_id: u32,
        pos: Pos,
        rotation: Rotation,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        occupant: Option<Occupant>,
        /// Pawns sent home because the tile closed their forest or river.
        returned_pawns: usize,
    },
    Discarded {
        tile_id: u32,
    },
}

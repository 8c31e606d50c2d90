mod deck;
mod error;
mod game;
mod recording;
pub use deck::*;
pub use error::*;
pub use game::*;
pub use recording::*;

use chacun::PlayerColor;

pub struct Config {
    pub rng: rand::rngs::StdRng,
    pub recorder: Option<recording::Recorder>,
    pub players: Vec<PlayerColor>,
    pub deck: deck::Deck,
}

pub use area::*;
pub use bbox::*;
pub use board::*;
pub use errors::*;
pub use partitions::*;
pub use placed_tile::*;
pub use tile::*;
pub use visualization::*;
pub use zone::*;

#[cfg(test)]
mod arbitrary;
mod area;
mod bbox;
mod board;
pub mod catalog;
mod errors;
mod partitions;
mod placed_tile;
mod tile;
mod visualization;
mod zone;

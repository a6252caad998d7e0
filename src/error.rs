use thiserror::Error;

/// Failures of the simulation core.
///
/// Both variants describe a board too small for the configured round; they
/// are never produced on the default 40x30 grid.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum GameError {
    #[error("no free cell left for food on the {width}x{height} board")]
    BoardFull { width: u16, height: u16 },

    #[error("a {width}x{height} board cannot fit a snake of length {win_length} plus food")]
    GridTooSmall {
        width: u16,
        height: u16,
        win_length: usize,
    },
}

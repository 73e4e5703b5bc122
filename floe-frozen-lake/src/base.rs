//! Frozen Lake grid world.
use crate::FrozenLakeConfig;
use anyhow::{bail, Result};
use floe_core::{Action, Env, State, Step};
use log::debug;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use std::fmt;

/// Move left.
pub const LEFT: Action = 0;
/// Move down.
pub const DOWN: Action = 1;
/// Move right.
pub const RIGHT: Action = 2;
/// Move up.
pub const UP: Action = 3;

/// A tile of the lake.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tile {
    /// Starting point, safe.
    Start,
    /// Frozen surface, safe.
    Frozen,
    /// Hole, fall to your doom.
    Hole,
    /// Goal, where the frisbee is located.
    Goal,
}

impl Tile {
    fn parse(c: char) -> Result<Self> {
        Ok(match c {
            'S' => Self::Start,
            'F' => Self::Frozen,
            'H' => Self::Hole,
            'G' => Self::Goal,
            _ => bail!("unknown tile '{}', expected one of S, F, H, G", c),
        })
    }

    /// `true` if entering the tile ends the episode.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Hole | Self::Goal)
    }

    fn as_char(&self) -> char {
        match self {
            Self::Start => 'S',
            Self::Frozen => 'F',
            Self::Hole => 'H',
            Self::Goal => 'G',
        }
    }
}

/// Frozen Lake environment.
///
/// The agent walks on a grid of tiles. The state is the index of the tile
/// the agent stands on, `row * n_cols + col`. Moving into the border keeps the
/// agent in place. Entering a hole or the goal ends the episode; the goal gives
/// reward 1, everything else reward 0.
pub struct FrozenLake {
    n_rows: usize,
    n_cols: usize,
    tiles: Vec<Tile>,
    start: State,
    state: State,
    is_slippery: bool,
    seed: u64,
    rng: SmallRng,
}

impl FrozenLake {
    /// The tile of a state.
    pub fn tile(&self, state: State) -> Option<Tile> {
        self.tiles.get(state).copied()
    }

    /// The current state.
    pub fn state(&self) -> State {
        self.state
    }

    /// The grid size as `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols)
    }

    /// The state reached by moving from `state` in direction `dir`.
    fn moved(&self, state: State, dir: Action) -> State {
        let (mut row, mut col) = (state / self.n_cols, state % self.n_cols);
        match dir {
            LEFT => col = col.saturating_sub(1),
            DOWN => row = (row + 1).min(self.n_rows - 1),
            RIGHT => col = (col + 1).min(self.n_cols - 1),
            _ => row = row.saturating_sub(1),
        }
        row * self.n_cols + col
    }
}

fn parse_map(map: &[String]) -> Result<(usize, Vec<Tile>)> {
    let n_cols = match map.first() {
        Some(row) if !row.is_empty() => row.chars().count(),
        _ => bail!("the map is empty"),
    };
    let mut tiles = Vec::with_capacity(map.len() * n_cols);
    for (i, row) in map.iter().enumerate() {
        if row.chars().count() != n_cols {
            bail!(
                "row {} has {} tiles, expected {}",
                i,
                row.chars().count(),
                n_cols
            );
        }
        for c in row.chars() {
            tiles.push(Tile::parse(c)?);
        }
    }
    Ok((n_cols, tiles))
}

impl Env for FrozenLake {
    type Config = FrozenLakeConfig;

    /// Builds the lake from its map.
    ///
    /// Fails if the map is not rectangular, has an unknown tile, or has not
    /// exactly one start and at least one goal.
    fn build(config: &Self::Config, seed: i64) -> Result<Self> {
        let (n_cols, tiles) = parse_map(&config.map)?;
        let starts = tiles
            .iter()
            .enumerate()
            .filter(|(_, t)| **t == Tile::Start)
            .map(|(i, _)| i)
            .collect::<Vec<_>>();
        if starts.len() != 1 {
            bail!("the map has {} starts, expected 1", starts.len());
        }
        if !tiles.contains(&Tile::Goal) {
            bail!("the map has no goal");
        }
        debug!(
            "Build Frozen Lake {}x{} (slippery: {})",
            config.map.len(),
            n_cols,
            config.is_slippery
        );

        let seed = seed as u64;
        Ok(Self {
            n_rows: config.map.len(),
            n_cols,
            tiles,
            start: starts[0],
            state: starts[0],
            is_slippery: config.is_slippery,
            seed,
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    fn n_states(&self) -> usize {
        self.tiles.len()
    }

    fn n_actions(&self) -> usize {
        4
    }

    fn reset(&mut self) -> Result<State> {
        self.state = self.start;
        Ok(self.state)
    }

    /// Walks one tile.
    ///
    /// Once the agent stands on a hole or the goal, every step keeps it there
    /// with reward 0 and reports the episode as terminated.
    fn step(&mut self, act: Action) -> Result<Step> {
        if act >= 4 {
            bail!("action {} is out of range (n_actions = 4)", act);
        }
        if self.tiles[self.state].is_terminal() {
            return Ok(Step::new(act, self.state, 0.0, true, false));
        }

        let dir = if self.is_slippery {
            // intended direction or either perpendicular one
            (act + 3 + self.rng.gen_range(0..3)) % 4
        } else {
            act
        };
        self.state = self.moved(self.state, dir);

        let tile = self.tiles[self.state];
        let reward = if tile == Tile::Goal { 1.0 } else { 0.0 };
        Ok(Step::new(act, self.state, reward, tile.is_terminal(), false))
    }

    /// Resets the lake and reseeds the slipping with `ix`.
    ///
    /// Evaluation passes with the same indices see the same slips.
    fn reset_with_index(&mut self, ix: usize) -> Result<State> {
        self.rng = SmallRng::seed_from_u64(self.seed.wrapping_add(ix as u64));
        self.reset()
    }
}

impl fmt::Display for FrozenLake {
    /// The map with the agent drawn as `*`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.tiles.chunks(self.n_cols).enumerate() {
            for (j, tile) in row.iter().enumerate() {
                if i * self.n_cols + j == self.state {
                    write!(f, "*")?;
                } else {
                    write!(f, "{}", tile.as_char())?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

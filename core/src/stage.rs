use alloc::vec::Vec;
use core::ops::RangeInclusive;
use serde::{Deserialize, Serialize};

use crate::*;

/// A run of consecutive levels sharing one board size and tap count.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    pub size: Size,
    pub taps: TapCount,
    pub levels: Level,
}

impl Stage {
    pub const fn new(size: Size, taps: TapCount, levels: Level) -> Self {
        Self { size, taps, levels }
    }

    pub const fn config(&self) -> LevelConfig {
        LevelConfig {
            size: self.size,
            taps: self.taps,
        }
    }
}

/// Board size and required taps for one level.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub size: Size,
    pub taps: TapCount,
}

pub const DEFAULT_STAGES: [Stage; 10] = [
    Stage::new(4, 1, 10),
    Stage::new(4, 2, 10),
    Stage::new(5, 1, 10),
    Stage::new(5, 2, 10),
    Stage::new(6, 2, 10),
    Stage::new(6, 3, 10),
    Stage::new(7, 3, 10),
    Stage::new(7, 4, 10),
    Stage::new(8, 3, 10),
    Stage::new(8, 4, 10),
];

pub const MIN_SIZE: Size = 4;
pub const MAX_SIZE: Size = 9;

const EXTRAPOLATED_BASE_SIZE: Level = 6;
const EXTRAPOLATED_SIZE_STEP: Level = 10;
const EXTRAPOLATED_TAP_CYCLE: Level = 5;

/// Row of the level-info listing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageInfo {
    pub number: StageNumber,
    pub first_level: Level,
    pub last_level: Level,
    pub size: Size,
    pub taps: TapCount,
}

impl StageInfo {
    pub fn levels(&self) -> RangeInclusive<Level> {
        self.first_level..=self.last_level
    }

    pub fn contains(&self, level: Level) -> bool {
        self.levels().contains(&level)
    }
}

/// Ordered stage table. Levels past the end of the table are extrapolated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageTable {
    stages: Vec<Stage>,
}

impl StageTable {
    pub fn new(stages: Vec<Stage>) -> Result<Self> {
        let valid = !stages.is_empty()
            && stages
                .iter()
                .all(|stage| stage.size > 0 && stage.taps > 0 && stage.levels > 0);
        if valid {
            Ok(Self { stages })
        } else {
            Err(GameError::InvalidStageTable)
        }
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn total_levels(&self) -> Level {
        total_levels(&self.stages)
    }

    pub fn stage_for_level(&self, level: Level) -> StageNumber {
        stage_number(&self.stages, level)
    }

    pub fn config_for_level(&self, level: Level) -> Result<LevelConfig> {
        level_config(&self.stages, level)
    }

    pub fn iter(&self) -> impl Iterator<Item = StageInfo> + '_ {
        self.stages.iter().zip(1..).scan(0, |levels_before, (stage, number)| {
            let first_level = *levels_before + 1;
            *levels_before += stage.levels;
            Some(StageInfo {
                number,
                first_level,
                last_level: *levels_before,
                size: stage.size,
                taps: stage.taps,
            })
        })
    }
}

impl Default for StageTable {
    fn default() -> Self {
        Self {
            stages: DEFAULT_STAGES.to_vec(),
        }
    }
}

/// Stage number of `level` in the default table.
///
/// Returns 0 for level 0. Every level past the table belongs to the stage
/// right after the last one.
pub fn stage_for_level(level: Level) -> StageNumber {
    stage_number(&DEFAULT_STAGES, level)
}

fn total_levels(stages: &[Stage]) -> Level {
    stages.iter().map(|stage| stage.levels).sum()
}

fn stage_number(stages: &[Stage], level: Level) -> StageNumber {
    if level == 0 {
        return 0;
    }

    let mut remaining = level;
    let mut number = 1;
    for stage in stages {
        if remaining <= stage.levels {
            return number;
        }
        remaining -= stage.levels;
        number += 1;
    }
    number
}

fn level_config(stages: &[Stage], level: Level) -> Result<LevelConfig> {
    if level == 0 {
        return Err(GameError::InvalidLevel);
    }

    let mut remaining = level;
    for stage in stages {
        if remaining <= stage.levels {
            return Ok(stage.config());
        }
        remaining -= stage.levels;
    }

    Ok(extrapolate(level - total_levels(stages)))
}

/// Configuration for the `beyond`-th level past the end of the table.
fn extrapolate(beyond: Level) -> LevelConfig {
    let size = (EXTRAPOLATED_BASE_SIZE + beyond / EXTRAPOLATED_SIZE_STEP)
        .clamp(MIN_SIZE.into(), MAX_SIZE.into());
    let taps = 1 + beyond % EXTRAPOLATED_TAP_CYCLE;

    // both are clamped well inside `u8`
    LevelConfig {
        size: size as Size,
        taps: taps as TapCount,
    }
}

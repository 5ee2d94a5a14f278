use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::*;

/// How long a cleared or failed result stays on screen before the next round.
pub const RESULT_DELAY: Duration = Duration::from_millis(1500);

/// One attempt at a problem: the live board and what is left to spend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    problem: Problem,
    board: Board,
    taps_left: TapCount,
    failed_attempts: u32,
}

impl Round {
    fn new(problem: Problem, failed_attempts: u32) -> Self {
        Self {
            board: problem.initial_board().clone(),
            taps_left: problem.required_taps(),
            problem,
            failed_attempts,
        }
    }

    fn reset(&self) -> Self {
        Self::new(self.problem.clone(), self.failed_attempts)
    }

    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn taps_left(&self) -> TapCount {
        self.taps_left
    }

    pub fn failed_attempts(&self) -> u32 {
        self.failed_attempts
    }

    pub fn level(&self) -> Level {
        self.problem.level()
    }
}

/// Shown once the player ends the game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub last_cleared_level: Level,
    pub last_cleared_stage: StageNumber,
    pub failed_attempts: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "camelCase")]
pub enum SessionState {
    Loading {
        level: Level,
        #[serde(rename = "failedAttempts")]
        failed_attempts: u32,
    },
    Playing(Round),
    Cleared(Round),
    Failed(Round),
    Finished(Summary),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    Loaded(Problem),
    Tap(Coord2),
    /// The result delay has elapsed.
    Advance,
    EndGame,
    Restart,
}

/// Work a transition hands back to whoever drives the session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    /// Produce a problem for `level` and send it back as [`SessionEvent::Loaded`].
    Generate { level: Level },
    /// Send `event` once `after` has elapsed.
    Schedule { after: Duration, event: SessionEvent },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub state: SessionState,
    pub effect: Option<Effect>,
}

impl Transition {
    fn to(state: SessionState) -> Self {
        Self {
            state,
            effect: None,
        }
    }

    fn with(state: SessionState, effect: Effect) -> Self {
        Self {
            state,
            effect: Some(effect),
        }
    }
}

impl SessionState {
    /// Initial state of a fresh session, waiting for the problem of level 1.
    pub fn start() -> Transition {
        Self::start_at(1)
    }

    pub fn start_at(level: Level) -> Transition {
        Self::loading(level, 0)
    }

    fn loading(level: Level, failed_attempts: u32) -> Transition {
        Transition::with(
            Self::Loading {
                level,
                failed_attempts,
            },
            Effect::Generate { level },
        )
    }

    pub const fn is_playing(&self) -> bool {
        matches!(self, Self::Playing(_))
    }

    pub const fn is_finished(&self) -> bool {
        matches!(self, Self::Finished(_))
    }

    pub fn round(&self) -> Option<&Round> {
        match self {
            Self::Playing(round) | Self::Cleared(round) | Self::Failed(round) => Some(round),
            Self::Loading { .. } | Self::Finished(_) => None,
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self {
            Self::Loading { level, .. } => Some(*level),
            Self::Playing(round) | Self::Cleared(round) | Self::Failed(round) => {
                Some(round.level())
            }
            Self::Finished(_) => None,
        }
    }

    /// Computes the state following `event` without touching `self`.
    ///
    /// Stage numbers in the summary come from the default stage table.
    pub fn transition(&self, event: SessionEvent) -> Result<Transition> {
        self.step(event, &stage_for_level)
    }

    /// Like [`transition`](Self::transition), numbering stages by `stages`.
    pub fn transition_in(&self, event: SessionEvent, stages: &StageTable) -> Result<Transition> {
        self.step(event, &|level| stages.stage_for_level(level))
    }

    fn step(
        &self,
        event: SessionEvent,
        stage_of: &dyn Fn(Level) -> StageNumber,
    ) -> Result<Transition> {
        use SessionEvent::*;
        use SessionState::*;

        match (self, event) {
            (
                Loading {
                    level,
                    failed_attempts,
                },
                Loaded(problem),
            ) => {
                if problem.level() != *level {
                    log::warn!(
                        "Loaded level {} while waiting for level {}",
                        problem.level(),
                        level
                    );
                }
                Ok(Transition::to(Playing(Round::new(problem, *failed_attempts))))
            }
            (Playing(round), Tap(coords)) => Self::tap(round, coords),
            (Cleared(round), Advance) => {
                Ok(Self::loading(round.level() + 1, round.failed_attempts))
            }
            (Failed(round), Advance) => Ok(Transition::to(Playing(round.reset()))),
            (Finished(_), Restart) => Ok(Self::loading(1, 0)),
            (Finished(_), _) => Err(GameError::UnexpectedEvent),
            (state, EndGame) => Ok(Transition::to(Finished(state.summarize(stage_of)))),
            _ => Err(GameError::UnexpectedEvent),
        }
    }

    fn tap(round: &Round, coords: Coord2) -> Result<Transition> {
        round.board.validate_coords(coords)?;
        log::trace!("tap at {:?}, {} taps left", coords, round.taps_left);

        let mut next = round.clone();
        next.board.flip(coords);
        next.taps_left = next.taps_left.saturating_sub(1);

        if next.taps_left > 0 {
            return Ok(Transition::to(Self::Playing(next)));
        }

        let advance = Effect::Schedule {
            after: RESULT_DELAY,
            event: SessionEvent::Advance,
        };
        if next.problem.is_solved_by(&next.board) {
            log::debug!("level {} cleared", next.level());
            Ok(Transition::with(Self::Cleared(next), advance))
        } else {
            next.failed_attempts += 1;
            log::debug!(
                "level {} failed, {} failures so far",
                next.level(),
                next.failed_attempts
            );
            Ok(Transition::with(Self::Failed(next), advance))
        }
    }

    /// Result screen numbers for the current state, with stages from the
    /// default table.
    pub fn summary(&self) -> Summary {
        self.summarize(&stage_for_level)
    }

    pub fn summary_in(&self, stages: &StageTable) -> Summary {
        self.summarize(&|level| stages.stage_for_level(level))
    }

    fn summarize(&self, stage_of: &dyn Fn(Level) -> StageNumber) -> Summary {
        let (last_cleared_level, failed_attempts) = match self {
            Self::Loading {
                level,
                failed_attempts,
            } => (level.saturating_sub(1), *failed_attempts),
            Self::Playing(round) | Self::Failed(round) => {
                (round.level().saturating_sub(1), round.failed_attempts)
            }
            Self::Cleared(round) => (round.level(), round.failed_attempts),
            Self::Finished(summary) => return *summary,
        };

        Summary {
            last_cleared_level,
            last_cleared_stage: stage_of(last_cleared_level),
            failed_attempts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn playing(level: Level, seed: u64) -> SessionState {
        let problem = RandomProblemGenerator::new(seed).generate(level).unwrap();
        let loading = SessionState::Loading {
            level,
            failed_attempts: 0,
        };
        loading.transition(SessionEvent::Loaded(problem)).unwrap().state
    }

    fn apply_all(
        mut state: SessionState,
        taps: impl IntoIterator<Item = Coord2>,
    ) -> Transition {
        let mut last = Transition::to(state.clone());
        for tap in taps {
            last = state.transition(SessionEvent::Tap(tap)).unwrap();
            state = last.state.clone();
        }
        last
    }

    #[test]
    fn start_requests_level_one() {
        let start = SessionState::start();

        assert_eq!(
            start.state,
            SessionState::Loading {
                level: 1,
                failed_attempts: 0
            }
        );
        assert_eq!(start.effect, Some(Effect::Generate { level: 1 }));
    }

    #[test]
    fn loaded_problem_starts_round() {
        let state = playing(11, 1);
        let round = state.round().unwrap();

        assert!(state.is_playing());
        assert_eq!(round.taps_left(), 2);
        assert_eq!(round.board(), round.problem().initial_board());
    }

    #[test]
    fn solving_clears_and_schedules_next_level() {
        let state = playing(15, 2);
        let solution = state.round().unwrap().problem().solution().to_vec();

        let last = apply_all(state, solution);

        assert!(matches!(last.state, SessionState::Cleared(_)));
        assert_eq!(
            last.effect,
            Some(Effect::Schedule {
                after: RESULT_DELAY,
                event: SessionEvent::Advance
            })
        );

        let next = last.state.transition(SessionEvent::Advance).unwrap();
        assert_eq!(next.state.level(), Some(16));
        assert_eq!(next.effect, Some(Effect::Generate { level: 16 }));
    }

    #[test]
    fn wrong_taps_fail_and_reset_round() {
        let state = playing(1, 3);
        let problem = state.round().unwrap().problem().clone();
        // on a 4x4 board no two centres share a window
        let &(row, col) = problem.solution().first().unwrap();
        let wrong = ((row + 2) % 4, (col + 2) % 4);

        let failed = state.transition(SessionEvent::Tap(wrong)).unwrap();

        let SessionState::Failed(round) = &failed.state else {
            panic!("expected failure, got {:?}", failed.state);
        };
        assert_eq!(round.failed_attempts(), 1);
        assert_eq!(round.taps_left(), 0);

        let retry = failed.state.transition(SessionEvent::Advance).unwrap();
        let round = retry.state.round().unwrap();
        assert!(retry.state.is_playing());
        assert_eq!(round.board(), problem.initial_board());
        assert_eq!(round.taps_left(), 1);
        assert_eq!(round.failed_attempts(), 1);
        assert_eq!(retry.effect, None);
    }

    #[test]
    fn off_board_tap_is_rejected() {
        let state = playing(1, 4);

        assert_eq!(
            state.transition(SessionEvent::Tap((4, 0))),
            Err(GameError::InvalidCoords)
        );
        assert_eq!(
            state.transition(SessionEvent::Tap((0, -1))),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn events_out_of_phase_are_rejected() {
        let state = playing(1, 5);
        let loading = SessionState::start().state;

        assert_eq!(
            state.transition(SessionEvent::Advance),
            Err(GameError::UnexpectedEvent)
        );
        assert_eq!(
            loading.transition(SessionEvent::Tap((0, 0))),
            Err(GameError::UnexpectedEvent)
        );
        assert_eq!(
            state.transition(SessionEvent::Restart),
            Err(GameError::UnexpectedEvent)
        );
    }

    #[test]
    fn end_game_summarizes_progress() {
        let state = playing(25, 6);

        let finished = state.transition(SessionEvent::EndGame).unwrap().state;

        assert_eq!(
            finished,
            SessionState::Finished(Summary {
                last_cleared_level: 24,
                last_cleared_stage: 3,
                failed_attempts: 0,
            })
        );
    }

    #[test]
    fn end_game_right_after_clear_counts_that_level() {
        let state = playing(10, 7);
        let solution = state.round().unwrap().problem().solution().to_vec();
        let cleared = apply_all(state, solution).state;

        assert_eq!(cleared.summary().last_cleared_level, 10);
        assert_eq!(cleared.summary().last_cleared_stage, 1);
    }

    #[test]
    fn end_game_on_first_level_has_no_stage() {
        let summary = playing(1, 8).summary();

        assert_eq!(summary.last_cleared_level, 0);
        assert_eq!(summary.last_cleared_stage, 0);
    }

    #[test]
    fn end_game_numbers_stages_by_the_given_table() {
        let stages = StageTable::new(vec![Stage::new(4, 1, 2), Stage::new(5, 1, 2)]).unwrap();
        let state = playing(4, 10);

        let finished = state
            .transition_in(SessionEvent::EndGame, &stages)
            .unwrap()
            .state;

        assert_eq!(finished.summary().last_cleared_level, 3);
        assert_eq!(finished.summary().last_cleared_stage, 2);
        assert_eq!(state.summary_in(&stages).last_cleared_stage, 2);
        assert_eq!(state.summary().last_cleared_stage, 1);
    }

    #[test]
    fn finished_ignores_stale_advance_and_restarts() {
        let finished = playing(3, 9)
            .transition(SessionEvent::EndGame)
            .unwrap()
            .state;

        assert_eq!(
            finished.transition(SessionEvent::Advance),
            Err(GameError::UnexpectedEvent)
        );

        let restart = finished.transition(SessionEvent::Restart).unwrap();
        assert_eq!(
            restart.state,
            SessionState::Loading {
                level: 1,
                failed_attempts: 0
            }
        );
        assert_eq!(restart.effect, Some(Effect::Generate { level: 1 }));
    }

    #[test]
    fn state_serializes_with_phase_tag() {
        let json = serde_json::to_value(SessionState::start().state).unwrap();

        assert_eq!(json["phase"], "loading");
        assert_eq!(json["level"], 1);
        assert_eq!(json["failedAttempts"], 0);
    }
}

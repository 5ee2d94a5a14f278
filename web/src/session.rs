use puzzle_panel_core::{Game, RandomProblemGenerator, Scheduled, SessionEvent};
use wasm_bindgen::prelude::*;

use crate::{Args, js_error, random_seed};

/// A running game for the JS front end.
///
/// Taps that end a round return the delay in milliseconds after which the
/// caller should invoke `advance`. The session never starts timers itself.
#[wasm_bindgen]
pub struct GameSession {
    game: Game<RandomProblemGenerator>,
    pending: Option<SessionEvent>,
}

impl GameSession {
    pub fn try_new(seed: u64, level: u32) -> anyhow::Result<Self> {
        log::debug!("new session, seed: {seed}, level: {level}");
        Ok(Self {
            game: Game::starting_at(RandomProblemGenerator::new(seed), level)?,
            pending: None,
        })
    }

    /// Explicit values win over the URL hash arguments. Without either, the
    /// seed is random and play starts at the level from `args`.
    pub fn try_from_args(
        seed: Option<u64>,
        level: Option<u32>,
        args: &Args,
    ) -> anyhow::Result<Self> {
        let seed = seed.or(args.seed()).unwrap_or_else(random_seed);
        Self::try_new(seed, level.unwrap_or(args.level()))
    }

    pub fn game(&self) -> &Game<RandomProblemGenerator> {
        &self.game
    }

    pub fn try_tap(&mut self, row: i32, col: i32) -> anyhow::Result<Option<u32>> {
        let scheduled = self.game.tap((row, col))?;
        Ok(self.hold(scheduled))
    }

    /// Delivers the event held back by the last round-ending tap.
    pub fn try_advance(&mut self) -> anyhow::Result<()> {
        let Some(event) = self.pending.take() else {
            anyhow::bail!("nothing to advance");
        };
        let scheduled = self.game.dispatch(event)?;
        self.hold(scheduled);
        Ok(())
    }

    pub fn try_end_game(&mut self) -> anyhow::Result<String> {
        self.pending = None;
        Ok(serde_json::to_string(&self.game.end_game()?)?)
    }

    pub fn try_restart(&mut self) -> anyhow::Result<()> {
        self.pending = None;
        Ok(self.game.restart()?)
    }

    pub fn try_state(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string(self.game.state())?)
    }

    fn hold(&mut self, scheduled: Option<Scheduled>) -> Option<u32> {
        let Scheduled { after, event } = scheduled?;
        self.pending = Some(event);
        Some(after.as_millis().try_into().unwrap_or(u32::MAX))
    }
}

#[wasm_bindgen]
impl GameSession {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<u64>, level: Option<u32>) -> Result<GameSession, JsError> {
        let args = Args::from_location().map_err(js_error)?;
        Self::try_from_args(seed, level, &args).map_err(js_error)
    }

    pub fn tap(&mut self, row: i32, col: i32) -> Result<Option<u32>, JsError> {
        self.try_tap(row, col).map_err(js_error)
    }

    pub fn advance(&mut self) -> Result<(), JsError> {
        self.try_advance().map_err(js_error)
    }

    #[wasm_bindgen(js_name = endGame)]
    pub fn end_game(&mut self) -> Result<String, JsError> {
        self.try_end_game().map_err(js_error)
    }

    pub fn restart(&mut self) -> Result<(), JsError> {
        self.try_restart().map_err(js_error)
    }

    pub fn state(&self) -> Result<String, JsError> {
        self.try_state().map_err(js_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn solve(session: &mut GameSession) -> Option<u32> {
        let solution = session
            .game()
            .state()
            .round()
            .unwrap()
            .problem()
            .solution()
            .to_vec();
        let mut delay = None;
        for (row, col) in solution {
            delay = session.try_tap(row, col).unwrap();
        }
        delay
    }

    #[test]
    fn clear_then_advance() {
        let mut session = GameSession::try_new(1, 1).unwrap();

        assert_eq!(solve(&mut session), Some(1500));
        let state: Value = serde_json::from_str(&session.try_state().unwrap()).unwrap();
        assert_eq!(state["phase"], "cleared");

        session.try_advance().unwrap();
        let state: Value = serde_json::from_str(&session.try_state().unwrap()).unwrap();
        assert_eq!(state["phase"], "playing");
        assert_eq!(state["problem"]["level"], 2);
    }

    #[test]
    fn advance_without_pending_event_fails() {
        let mut session = GameSession::try_new(2, 1).unwrap();

        assert!(session.try_advance().is_err());
    }

    #[test]
    fn end_game_drops_pending_advance() {
        let mut session = GameSession::try_new(3, 7).unwrap();
        solve(&mut session);

        let summary: Value = serde_json::from_str(&session.try_end_game().unwrap()).unwrap();

        assert_eq!(summary["lastClearedLevel"], 7);
        assert_eq!(summary["lastClearedStage"], 1);
        assert!(session.try_advance().is_err());

        session.try_restart().unwrap();
        assert_eq!(session.game().state().level(), Some(1));
    }

    #[test]
    fn hash_args_fill_in_missing_seed_and_level() {
        let args = Args::from_hash("#--seed=9&--level=12").unwrap();

        let from_hash = GameSession::try_from_args(None, None, &args).unwrap();
        let same_seed = GameSession::try_new(9, 12).unwrap();
        assert_eq!(from_hash.game().state(), same_seed.game().state());
        assert_eq!(from_hash.game().state().level(), Some(12));

        let explicit = GameSession::try_from_args(Some(3), Some(30), &args).unwrap();
        let same_explicit = GameSession::try_new(3, 30).unwrap();
        assert_eq!(explicit.game().state(), same_explicit.game().state());
    }

    #[test]
    fn off_board_tap_is_an_error() {
        let mut session = GameSession::try_new(4, 1).unwrap();

        assert!(session.try_tap(9, 9).is_err());
    }
}

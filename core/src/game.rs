use core::time::Duration;

use crate::*;

/// An event the caller has to feed back through [`Game::dispatch`] after a delay.
#[derive(Clone, Debug, PartialEq)]
pub struct Scheduled {
    pub after: Duration,
    pub event: SessionEvent,
}

/// Runs a session against a generator. Problem generation happens inline,
/// delayed events are returned to the caller, who owns the timers.
#[derive(Clone, Debug)]
pub struct Game<G> {
    state: SessionState,
    generator: G,
}

impl<G: ProblemGenerator> Game<G> {
    pub fn new(generator: G) -> Result<Self> {
        Self::starting_at(generator, 1)
    }

    pub fn starting_at(generator: G, level: Level) -> Result<Self> {
        let transition = SessionState::start_at(level);
        let mut game = Self {
            state: transition.state.clone(),
            generator,
        };
        game.apply(transition)?;
        Ok(game)
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn dispatch(&mut self, event: SessionEvent) -> Result<Option<Scheduled>> {
        let transition = self.state.transition_in(event, self.generator.stages())?;
        self.apply(transition)
    }

    pub fn tap(&mut self, coords: Coord2) -> Result<Option<Scheduled>> {
        self.dispatch(SessionEvent::Tap(coords))
    }

    pub fn advance(&mut self) -> Result<Option<Scheduled>> {
        self.dispatch(SessionEvent::Advance)
    }

    /// Ends the game, or returns the existing summary if it already ended.
    pub fn end_game(&mut self) -> Result<Summary> {
        if !self.state.is_finished() {
            self.dispatch(SessionEvent::EndGame)?;
        }
        Ok(self.state.summary_in(self.generator.stages()))
    }

    pub fn restart(&mut self) -> Result<()> {
        self.dispatch(SessionEvent::Restart).map(|_| ())
    }

    fn apply(&mut self, mut transition: Transition) -> Result<Option<Scheduled>> {
        loop {
            match transition.effect {
                None => {
                    self.state = transition.state;
                    return Ok(None);
                }
                Some(Effect::Schedule { after, event }) => {
                    self.state = transition.state;
                    return Ok(Some(Scheduled { after, event }));
                }
                Some(Effect::Generate { level }) => {
                    let problem = self.generator.generate(level)?;
                    transition = transition
                        .state
                        .transition_in(SessionEvent::Loaded(problem), self.generator.stages())?;
                }
            }
        }
    }
}

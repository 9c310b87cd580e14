//! Environment interfaces
//!
//! `TennisEnv` wraps one court: it owns the game state, its random source
//! and a renderer, and turns button vectors into frames and rewards.
//! `VecEnv` runs several courts in lockstep with the act/observe shape used
//! by batched RL trainers, resetting each court as soon as it finishes.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{BUTTON_DOWN, BUTTON_UP, CHANNELS, NUM_BUTTONS};
use crate::error::{Result, TennisError};
use crate::render::{Palette, Renderer, build_renderer, compose};
use crate::settings::{EnvConfig, ResetMode};
use crate::sim::{GameState, PaddleInput, RngState, Rules, TickInput, full_reset, tick};

/// One agent's held buttons for a step; only UP (4) and DOWN (5) act
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action(pub [bool; NUM_BUTTONS]);

impl Action {
    pub const NOOP: Action = Action([false; NUM_BUTTONS]);

    pub fn up() -> Self {
        Self::press(BUTTON_UP)
    }

    pub fn down() -> Self {
        Self::press(BUTTON_DOWN)
    }

    /// Only `button` held
    pub fn press(button: usize) -> Self {
        let mut buttons = [false; NUM_BUTTONS];
        buttons[button] = true;
        Action(buttons)
    }

    /// Every button an independent coin flip
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Action(std::array::from_fn(|_| rng.random()))
    }

    pub fn paddle_input(&self) -> PaddleInput {
        PaddleInput {
            up: self.0[BUTTON_UP],
            down: self.0[BUTTON_DOWN],
        }
    }
}

impl From<[bool; NUM_BUTTONS]> for Action {
    fn from(buttons: [bool; NUM_BUTTONS]) -> Self {
        Action(buttons)
    }
}

impl TryFrom<&[bool]> for Action {
    type Error = TennisError;

    fn try_from(buttons: &[bool]) -> Result<Self> {
        let buttons: [bool; NUM_BUTTONS] =
            buttons.try_into().map_err(|_| TennisError::ActionLength {
                expected: NUM_BUTTONS,
                found: buttons.len(),
            })?;
        Ok(Action(buttons))
    }
}

/// RGB frame, row-major from the top-left, shape (height, width, 3)
#[derive(Clone, PartialEq, Eq)]
pub struct Observation {
    pixels: Vec<u8>,
    width: usize,
    height: usize,
}

impl Observation {
    fn new(pixels: Vec<u8>, width: u32, height: u32) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize * CHANNELS);
        Self {
            pixels,
            width: width as usize,
            height: height as usize,
        }
    }

    /// (height, width, channels)
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.height, self.width, CHANNELS)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let i = (y * self.width + x) * CHANNELS;
        [self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]]
    }
}

impl std::fmt::Debug for Observation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observation")
            .field("shape", &self.shape())
            .finish_non_exhaustive()
    }
}

/// Bookkeeping reported alongside every step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepInfo {
    /// Steps taken in the episode this step belonged to
    pub step: u64,
    pub p1_score: u32,
    pub p2_score: u32,
}

/// Result of a step (or of a reset)
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub obs: Observation,
    /// Player 1's reward; player 2 sees the negation
    pub reward: f32,
    pub done: bool,
    /// `obs` begins a new episode
    pub first: bool,
    pub info: StepInfo,
}

impl Step {
    /// Reward for agent 0 (paddle 1) or agent 1 (paddle 2)
    pub fn agent_reward(&self, agent: usize) -> f32 {
        if agent == 0 { self.reward } else { -self.reward }
    }
}

/// A single court
pub struct TennisEnv<R = Pcg32> {
    config: EnvConfig,
    rules: Rules,
    palette: Palette,
    state: GameState,
    rng: R,
    renderer: Box<dyn Renderer>,
    last: Step,
    episodes: u64,
}

impl TennisEnv<Pcg32> {
    /// Build an environment seeded from `config.seed`; ready to step
    pub fn new(config: EnvConfig) -> Result<Self> {
        let rng = RngState::new(config.seed).to_rng();
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> TennisEnv<R> {
    /// Build an environment drawing from an injected random source
    pub fn with_rng(config: EnvConfig, rng: R) -> Result<Self> {
        config.validate()?;
        let renderer = build_renderer(config.backend, config.screen_width, config.screen_height)?;
        log::info!(
            "Created environment: {} player(s), first to {}, {:?} acceleration, {:?} reset, {} backend",
            config.num_players,
            config.max_score,
            config.accel_mode(),
            config.reset_mode,
            config.backend
        );

        let mut env = Self {
            rules: config.rules(),
            palette: Palette::default(),
            state: GameState::new(),
            rng,
            renderer,
            last: Step {
                obs: Observation::new(Vec::new(), 0, 0),
                reward: 0.0,
                done: false,
                first: true,
                info: StepInfo::default(),
            },
            episodes: 0,
            config,
        };
        env.reset();
        Ok(env)
    }

    /// Agents expected per step
    pub fn num_agents(&self) -> usize {
        self.config.num_players as usize
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Most recent step (or reset)
    pub fn last(&self) -> &Step {
        &self.last
    }

    /// Episodes finished so far
    pub fn episodes(&self) -> u64 {
        self.episodes
    }

    /// Start a new episode and return its first frame
    pub fn reset(&mut self) -> &Observation {
        full_reset(
            &mut self.state,
            self.rules.accel_mode,
            self.rules.p2_human,
            &mut self.rng,
        );
        self.last = Step {
            obs: self.render(),
            reward: 0.0,
            done: false,
            first: true,
            info: self.info(),
        };
        &self.last.obs
    }

    /// Advance one step with one action per agent.
    ///
    /// In manual reset mode, stepping after `done` panics.
    pub fn step(&mut self, actions: &[Action]) -> Result<&Step> {
        if actions.len() != self.num_agents() {
            return Err(TennisError::ActionCount {
                expected: self.num_agents(),
                found: actions.len(),
            });
        }

        let input = TickInput {
            p1: actions[0].paddle_input(),
            p2: actions.get(1).map(Action::paddle_input),
        };
        let outcome = tick(&mut self.state, &input, &self.rules, &mut self.rng);
        let info = self.info();

        let mut first = false;
        if outcome.done {
            self.episodes += 1;
            log::info!(
                "Episode {} finished after {} steps: {} - {}",
                self.episodes,
                info.step,
                info.p1_score,
                info.p2_score
            );
            if self.config.reset_mode == ResetMode::Auto {
                full_reset(
                    &mut self.state,
                    self.rules.accel_mode,
                    self.rules.p2_human,
                    &mut self.rng,
                );
                first = true;
            }
        }

        self.last = Step {
            obs: self.render(),
            reward: outcome.reward,
            done: outcome.done,
            first,
            info,
        };
        Ok(&self.last)
    }

    fn info(&self) -> StepInfo {
        StepInfo {
            step: self.state.step_count,
            p1_score: self.state.p1_score,
            p2_score: self.state.p2_score,
        }
    }

    fn render(&mut self) -> Observation {
        let pixels = compose(self.renderer.as_mut(), &self.state, &self.palette);
        Observation::new(pixels, self.config.screen_width, self.config.screen_height)
    }
}

/// Per-agent view of a batched environment
#[derive(Debug)]
pub struct Batch<'a> {
    pub rewards: Vec<f32>,
    pub obs: Vec<&'a Observation>,
    pub first: Vec<bool>,
}

/// Several courts stepped together, each resetting itself when it finishes.
///
/// Agents are laid out court by court: with two players, court `i`
/// contributes agents `2i` (paddle 1) and `2i + 1` (paddle 2).
pub struct VecEnv {
    envs: Vec<TennisEnv>,
    num_players: usize,
}

impl VecEnv {
    pub fn new(config: EnvConfig) -> Result<Self> {
        config.validate()?;
        let envs = (0..config.num_envs)
            .map(|i| {
                let court = EnvConfig {
                    num_envs: 1,
                    reset_mode: ResetMode::Auto,
                    ..config.clone()
                };
                let rng = RngState::with_stream(config.seed, i as u64).to_rng();
                TennisEnv::with_rng(court, rng)
            })
            .collect::<Result<Vec<_>>>()?;
        log::info!("Created batched environment with {} courts", envs.len());

        Ok(Self {
            envs,
            num_players: config.num_players as usize,
        })
    }

    pub fn num_envs(&self) -> usize {
        self.envs.len()
    }

    pub fn num_agents(&self) -> usize {
        self.envs.len() * self.num_players
    }

    pub fn envs(&self) -> &[TennisEnv] {
        &self.envs
    }

    /// Step every court; `actions` holds one entry per agent
    pub fn act(&mut self, actions: &[Action]) -> Result<()> {
        if actions.len() != self.num_agents() {
            return Err(TennisError::ActionCount {
                expected: self.num_agents(),
                found: actions.len(),
            });
        }
        for (env, court_actions) in self.envs.iter_mut().zip(actions.chunks(self.num_players)) {
            env.step(court_actions)?;
        }
        Ok(())
    }

    /// Reward, frame and `first` flag for every agent
    pub fn observe(&self) -> Batch<'_> {
        let mut batch = Batch {
            rewards: Vec::with_capacity(self.num_agents()),
            obs: Vec::with_capacity(self.num_agents()),
            first: Vec::with_capacity(self.num_agents()),
        };
        for env in &self.envs {
            let last = env.last();
            for agent in 0..self.num_players {
                batch.rewards.push(last.agent_reward(agent));
                batch.obs.push(&last.obs);
                batch.first.push(last.first);
            }
        }
        batch
    }
}

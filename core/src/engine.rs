use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Demo -> Playing, on the first press
/// - Playing -> Halfway -> NearWin -> Win, as pairs are found
/// - Win -> Demo, once the celebration is over
/// - any but Win -> Settings -> back to the same state, on the settings hold gesture, which is
///   ignored once the round is won
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    Demo,
    Playing,
    Halfway,
    NearWin,
    Win,
    Settings,
}

impl GameState {
    /// Progress state for `found` out of `total` pairs.
    pub const fn from_progress(found: CellCount, total: CellCount) -> Self {
        let found = found as u16 * 4;
        let total = total as u16;
        if found < total * 2 {
            Self::Playing
        } else if found < total * 3 {
            Self::Halfway
        } else if found < total * 4 {
            Self::NearWin
        } else {
            Self::Win
        }
    }

    /// Indicates a round is being played and picks count as selections
    pub const fn is_in_progress(self) -> bool {
        matches!(self, Self::Playing | Self::Halfway | Self::NearWin)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::Demo
    }
}

/// What happened during one tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TickReport {
    pub pressed: Option<Coord2>,
    pub hold_action: Option<Action>,
    pub selection: SelectOutcome,
    pub settings: SettingsOutcome,
    pub state: GameState,
    pub processing_complete: bool,
}

impl TickReport {
    const fn idle(state: GameState, processing_complete: bool) -> Self {
        Self {
            pressed: None,
            hold_action: None,
            selection: SelectOutcome::NoChange,
            settings: SettingsOutcome::NoChange,
            state,
            processing_complete,
        }
    }
}

/// Owns the board and composes input, selection, settings and blinking every tick.
///
/// The grid and the audio subsystem are held as capabilities, the engine only talks to them through
/// [`GridDriver`] and [`AudioPlayer`].
pub struct GameEngine<G, A> {
    config: GameConfig,
    driver: G,
    audio: A,
    rng: SmallRng,
    board: Board,
    input: InputDebouncer,
    round: Round,
    settings: SettingsOverlay,
    demo: DemoPlayer,
    celebration: Option<Celebration>,
    state: GameState,
    processing_complete: bool,
}

impl<G: GridDriver, A: AudioPlayer> GameEngine<G, A> {
    pub fn new(config: GameConfig, driver: G, audio: A) -> Result<Self> {
        let mut rng = SmallRng::seed_from_u64(config.seed.unwrap_or_default());
        let board = Self::generate_board(&mut rng, &config)?;
        let mut engine = Self {
            config,
            driver,
            audio,
            rng,
            board,
            input: InputDebouncer::new(),
            round: Round::new(),
            settings: SettingsOverlay::new(&config),
            demo: DemoPlayer::new(),
            celebration: None,
            state: GameState::Demo,
            processing_complete: true,
        };

        engine.driver.set_brightness(engine.settings.brightness());
        for voice in Voice::ALL {
            engine.audio.set_level(voice, engine.settings.level(voice));
        }
        engine.driver.fill(Color::OFF);
        Ok(engine)
    }

    /// Fresh pairing with the settings toggle attached to the origin, every time.
    fn generate_board(rng: &mut SmallRng, config: &GameConfig) -> Result<Board> {
        use rand::prelude::*;

        let seed: u64 = rng.random();
        let cells = RandomPairGenerator::new(seed).generate(GRID_SIZE)?;
        let mut board = Board::from_cells(cells);
        board.attach_hold(ORIGIN, Action::ToggleSettings, config.hold_delay());
        log::debug!("Generated grid from seed {}", seed);
        Ok(board)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cell_at(&self, coords: Coord2) -> &Cell {
        &self.board[coords]
    }

    pub fn selected(&self) -> Option<Coord2> {
        self.round.selected()
    }

    pub fn found_pairs(&self) -> CellCount {
        self.round.found_pairs()
    }

    pub fn total_pairs(&self) -> CellCount {
        self.board.total_pairs()
    }

    pub fn settings(&self) -> &SettingsOverlay {
        &self.settings
    }

    /// No blink was left pending by the last tick.
    pub fn processing_complete(&self) -> bool {
        self.processing_complete
    }

    pub fn is_celebrating(&self) -> bool {
        self.celebration.is_some()
    }

    pub fn driver(&self) -> &G {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut G {
        &mut self.driver
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    /// Starts a new round: new pairing, nothing matched, back to the demo.
    pub fn reset_all(&mut self) -> Result<()> {
        self.board = Self::generate_board(&mut self.rng, &self.config)?;
        self.round = Round::new();
        self.input.reset();
        self.demo.reset();
        self.celebration = None;
        self.settings.close();
        self.processing_complete = true;
        self.set_state(GameState::Demo);
        self.driver.fill(Color::OFF);
        log::info!("New round");
        Ok(())
    }

    /// Runs one pass of the polling loop with `now` as the time for every timer.
    pub fn tick(&mut self, now: Timestamp) -> Result<TickReport> {
        if let Some(celebration) = self.celebration {
            if celebration.is_over(now) {
                self.reset_all()?;
            } else {
                self.driver.fill(celebration.color_at(now));
            }
            return Ok(TickReport::idle(self.state, self.processing_complete));
        }

        let pressed = self.driver.read_pressed();
        for &coords in &pressed {
            self.board.validate_coords(coords)?;
        }

        let events = self
            .input
            .process(&pressed, &mut self.board, now, self.config.confirm_blink());
        let mut report = TickReport::idle(self.state, false);
        report.pressed = events.pressed;

        if let Some((_, action)) = events.hold_action {
            self.handle_pressed_state(action);
            report.hold_action = Some(action);
        }

        if events.pressed.is_some() && self.state == GameState::Demo {
            self.leave_demo();
        }

        if self.state == GameState::Settings {
            report.settings = self.handle_setting_selection(events.pressed);
        } else if self.state.is_in_progress() {
            report.selection = self.handle_selection(events.pressed, now);
        }

        if self.state == GameState::Demo {
            self.demo
                .step(&mut self.board, &mut self.rng, now, &self.config);
        }

        let complete = self.board.process_blinks(now, self.config.reveal_colors);
        if self.state == GameState::Settings {
            self.settings.render(&mut self.board);
        } else if let Some(selected) = self.round.selected() {
            if !self.board[selected].is_blinking() {
                let color = self.board[selected].color();
                self.board.paint(selected, color);
            }
        }
        self.flush();

        self.processing_complete = complete;
        if complete {
            self.audio.handle_audio_for_state(self.state);
            if self.state == GameState::Win {
                log::info!("Round won, celebrating");
                self.celebration = Some(Celebration::new(now, self.config.celebration()));
            }
        }

        report.state = self.state;
        report.processing_complete = complete;
        Ok(report)
    }

    /// Picks a cell during a round, see [`Round::handle_selection`].
    pub fn handle_selection(&mut self, key: Option<Coord2>, now: Timestamp) -> SelectOutcome {
        let outcome = self
            .round
            .handle_selection(&mut self.board, key, now, &self.config);
        if outcome == SelectOutcome::Matched {
            self.audio.play_correct_sound();
            let state = GameState::from_progress(self.round.found_pairs(), self.total_pairs());
            self.set_state(state);
        }
        outcome
    }

    /// Routes a press to the settings overlay and applies the new level.
    pub fn handle_setting_selection(&mut self, key: Option<Coord2>) -> SettingsOutcome {
        let outcome = self.settings.handle_key(key);
        match outcome {
            SettingsOutcome::NoChange => {}
            SettingsOutcome::Brightness(brightness) => self.driver.set_brightness(brightness),
            SettingsOutcome::Level(voice, level) => {
                self.audio.set_level(voice, level);
                if voice == Voice::Effects {
                    self.audio.play_correct_sound();
                }
            }
        }
        outcome
    }

    pub fn handle_pressed_state(&mut self, action: Action) {
        match action {
            Action::ToggleSettings => self.toggle_settings(),
        }
    }

    pub fn toggle_settings(&mut self) {
        if self.state == GameState::Win {
            log::debug!("Round won, not opening settings");
            return;
        }
        if self.state == GameState::Settings {
            let restored = self.settings.close().unwrap_or_else(|| {
                GameState::from_progress(self.round.found_pairs(), self.total_pairs())
            });
            self.set_state(restored);
            self.render_board();
        } else {
            self.settings.open(self.state);
            self.set_state(GameState::Settings);
            self.settings.render(&mut self.board);
        }
    }

    /// First press ends the attract mode and wipes its flashes.
    fn leave_demo(&mut self) {
        for coords in self.board.iter_coords() {
            self.board[coords].reset_blink();
        }
        self.demo.reset();
        let state = GameState::from_progress(self.round.found_pairs(), self.total_pairs());
        self.set_state(state);
        self.render_board();
    }

    /// Repaints idle cells from live round state.
    fn render_board(&mut self) {
        let selected = self.round.selected();
        for coords in self.board.iter_coords() {
            let cell = &self.board[coords];
            if cell.is_blinking() {
                continue;
            }
            let color = if cell.is_matched() {
                Color::MATCHED
            } else if selected == Some(coords) {
                cell.color()
            } else {
                Color::OFF
            };
            self.board.paint(coords, color);
        }
    }

    fn set_state(&mut self, state: GameState) {
        if self.state != state {
            log::info!("State {:?} -> {:?}", self.state, state);
            self.state = state;
        }
    }

    fn flush(&mut self) {
        for (coords, color) in self.board.take_updates() {
            self.driver.set_pixel(coords, color);
        }
    }
}

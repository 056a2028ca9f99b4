//! Brightness and volume overlay, toggled by holding the origin cell.
//!
//! One row per parameter: the first column steps down, the last steps up, the ones in between
//! jump straight to a value proportional to their position.

use serde::{Deserialize, Serialize};

use crate::*;

pub const MIN_BRIGHTNESS: f32 = 0.2;
pub const MIN_STEPPED_LEVEL: f32 = 0.2;

const DECREMENT_X: Coord = 0;
const INCREMENT_X: Coord = GRID_WIDTH - 1;
const JUMP_STEPS: Coord = INCREMENT_X - DECREMENT_X - 2;
const EPSILON: f32 = 1e-3;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Parameter {
    Brightness,
    Level(Voice),
}

impl Parameter {
    pub const fn for_row(y: Coord) -> Option<Self> {
        match y {
            0 => Some(Parameter::Brightness),
            1 => Some(Parameter::Level(Voice::Music)),
            2 => Some(Parameter::Level(Voice::Effects)),
            _ => None,
        }
    }

    const fn color(self) -> Color {
        match self {
            Parameter::Brightness => Color::WHITE,
            Parameter::Level(Voice::Music) => Color::CYAN,
            Parameter::Level(Voice::Effects) => Color::VIOLET,
        }
    }

    const fn stepped_min(self) -> f32 {
        match self {
            Parameter::Brightness => MIN_BRIGHTNESS,
            Parameter::Level(_) => MIN_STEPPED_LEVEL,
        }
    }

    const fn jump_min(self) -> f32 {
        match self {
            Parameter::Brightness => MIN_BRIGHTNESS,
            Parameter::Level(_) => 0.0,
        }
    }
}

/// Value a jump cell in column `x` stands for.
fn jump_value(x: Coord) -> f32 {
    f32::from(x - DECREMENT_X - 1) / f32::from(JUMP_STEPS)
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SettingsOutcome {
    NoChange,
    Brightness(f32),
    Level(Voice, f32),
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SettingsOverlay {
    brightness: f32,
    levels: [f32; 2],
    step: f32,
    stashed: Option<GameState>,
}

impl SettingsOverlay {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            brightness: config.brightness.clamp(MIN_BRIGHTNESS, 1.0),
            levels: [
                config.music_volume.clamp(0.0, 1.0),
                config.effects_volume.clamp(0.0, 1.0),
            ],
            step: config.adjust_step,
            stashed: None,
        }
    }

    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    pub fn level(&self, voice: Voice) -> f32 {
        self.levels[voice.index()]
    }

    pub fn is_open(&self) -> bool {
        self.stashed.is_some()
    }

    /// Remembers the state to come back to.
    pub fn open(&mut self, state: GameState) {
        self.stashed = Some(state);
    }

    pub fn close(&mut self) -> Option<GameState> {
        self.stashed.take()
    }

    pub fn value(&self, parameter: Parameter) -> f32 {
        match parameter {
            Parameter::Brightness => self.brightness,
            Parameter::Level(voice) => self.level(voice),
        }
    }

    fn set_value(&mut self, parameter: Parameter, value: f32) {
        match parameter {
            Parameter::Brightness => self.brightness = value,
            Parameter::Level(voice) => self.levels[voice.index()] = value,
        }
    }

    pub fn handle_key(&mut self, key: Option<Coord2>) -> SettingsOutcome {
        let Some((x, y)) = key else {
            return SettingsOutcome::NoChange;
        };
        let Some(parameter) = Parameter::for_row(y) else {
            return SettingsOutcome::NoChange;
        };

        let current = self.value(parameter);
        let value = match x {
            DECREMENT_X => (current - self.step).clamp(parameter.stepped_min(), 1.0),
            INCREMENT_X => (current + self.step).clamp(parameter.stepped_min(), 1.0),
            x => jump_value(x).clamp(parameter.jump_min(), 1.0),
        };
        self.set_value(parameter, value);
        log::debug!("{:?} set to {:.2}", parameter, value);

        match parameter {
            Parameter::Brightness => SettingsOutcome::Brightness(value),
            Parameter::Level(voice) => SettingsOutcome::Level(voice, value),
        }
    }

    /// Paints the layout on every cell that is not in the middle of a blink.
    pub fn render(&self, board: &mut Board) {
        for coords in board.iter_coords() {
            if board[coords].is_blinking() {
                continue;
            }
            let color = self.color_at(coords);
            board.paint(coords, color);
        }
    }

    fn color_at(&self, (x, y): Coord2) -> Color {
        let Some(parameter) = Parameter::for_row(y) else {
            return Color::OFF;
        };
        match x {
            DECREMENT_X => Color::RED,
            INCREMENT_X => Color::GREEN,
            x if jump_value(x) <= self.value(parameter) + EPSILON => parameter.color(),
            _ => parameter.color().dimmed(0.1),
        }
    }
}

mod tiles;

pub use tiles::{tone_url, Feedback, Sound, Tile, ALL_PITCHES, FLASH_MS, PLAY_INTERVAL_MS};

use crate::schedule::Timeline;
use rand::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use yew::Reducible;

const SEED_SEQUENCE: [Tile; 4] = [Tile::One, Tile::Two, Tile::Three, Tile::Four];
const FIRST_LEVEL_DELAY_MS: f64 = 1000.;
const NEXT_STEP_DELAY_MS: f64 = PLAY_INTERVAL_MS + 600.;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Waiting,
    Listening,
    Inputting,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProgressTone {
    Neutral,
    Correct,
    Wrong,
}

/// What the input progress row shows: one mark per target symbol, filled up
/// to the accepted input length, tinted once the outcome is known.
#[derive(Clone, PartialEq)]
pub struct Progress {
    pub slots: usize,
    pub filled: usize,
    pub tone: ProgressTone,
}

impl Progress {
    fn hidden() -> Self {
        Progress {
            slots: 0,
            filled: 0,
            tone: ProgressTone::Neutral,
        }
    }
}

/// Everything the engine defers. Each variant is one of the original timer
/// callbacks, applied when its deadline on the timeline passes.
#[derive(Clone)]
enum Event {
    BeginLevel,
    PlayNote(usize),
    BeginInput,
    LightOff(Tile),
    WinFlourish,
    AllOff,
    Relisten,
    FinishGameOver,
}

#[derive(Clone)]
pub struct MemoryGame {
    sequence: Vec<Tile>,
    level: usize,
    replays_left: u8,
    phase: Phase,
    input: Vec<Tile>,
    rng: StdRng,
    timeline: Timeline<Event>,
    lit: [bool; 4],
    all_on: bool,
    /// Engine-relative milliseconds of the last applied instant.
    now: f64,
    /// Wall-clock origin; zero when driven with synthetic time.
    begin_at: f64,
    pub status: String,
    pub progress: Progress,
    pub report: Option<String>,
    sounds: Rc<RefCell<Vec<Sound>>>,
}

impl MemoryGame {
    pub fn new() -> Self {
        let random = js_sys::Math::random();
        let mut game = MemoryGame::with_seed(u64::from_be_bytes(random.to_be_bytes()));
        game.begin_at = js_sys::Date::now();
        game
    }

    pub fn with_seed(seed: u64) -> Self {
        let mut timeline = Timeline::new();
        timeline.schedule(FIRST_LEVEL_DELAY_MS, Event::BeginLevel);
        MemoryGame {
            sequence: SEED_SEQUENCE.to_vec(),
            level: 0,
            replays_left: 1,
            phase: Phase::Waiting,
            input: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
            timeline,
            lit: [false; 4],
            all_on: false,
            now: 0.,
            begin_at: 0.,
            status: "How to ?".to_string(),
            progress: Progress::hidden(),
            report: None,
            sounds: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Applies every event due by `now` (engine-relative ms), each at its own
    /// deadline so follow-up scheduling stays exact across coarse steps.
    pub fn advance(&mut self, now: f64) {
        while let Some((deadline, event)) = self.timeline.pop_due(now) {
            self.now = deadline;
            self.apply(event);
        }
        self.now = now;
    }

    pub fn handle_input(&mut self, tile: Tile) {
        if self.phase != Phase::Inputting {
            return;
        }

        self.input.push(tile);
        self.progress.filled = self.input.len();
        self.flash_and_play(tile);

        if self.sequence.starts_with(&self.input) {
            if self.input.len() == self.sequence.len() {
                self.complete_level();
            }
        } else {
            self.progress.tone = ProgressTone::Wrong;
            if self.replays_left > 0 {
                self.replay_current_level();
            } else {
                self.game_over();
            }
        }
    }

    pub fn restart(&mut self) {
        self.report = None;
        self.start_new_level();
    }

    pub fn lit(&self, tile: Tile) -> bool {
        self.lit[tile.index()]
    }

    pub fn input_enabled(&self) -> bool {
        self.phase == Phase::Inputting
    }

    pub fn take_sounds(&self) -> Vec<Sound> {
        std::mem::take(self.sounds.borrow_mut().as_mut())
    }

    fn apply(&mut self, event: Event) {
        match event {
            Event::BeginLevel => self.start_new_level(),
            Event::PlayNote(index) => {
                if let Some(&tile) = self.sequence.get(index) {
                    self.flash_and_play(tile);
                }
            }
            Event::BeginInput => self.start_inputting(),
            Event::LightOff(tile) => {
                // A flourish in flight keeps every tile lit until AllOff.
                if !self.all_on {
                    self.lit[tile.index()] = false;
                }
            }
            Event::WinFlourish => {
                self.turn_all_on();
                self.play_feedback(Feedback::Correct);
                self.status = "Correct!".to_string();
                self.progress.tone = ProgressTone::Correct;
            }
            Event::AllOff => self.turn_all_off(),
            Event::Relisten => {
                self.status = self.level_status();
                self.start_listening();
            }
            Event::FinishGameOver => {
                self.progress = Progress::hidden();
                self.turn_all_off();
                self.report = Some(if self.level <= 1 {
                    "Oops! You didn't accomplish any level.".to_string()
                } else {
                    format!("Your Memory Level: {}", self.level - 1)
                });
                self.level = 0;
            }
        }
    }

    fn start_new_level(&mut self) {
        self.replays_left = 1;

        // Level 0 is the warm-up: the answer is always the fixed seed.
        if self.level == 0 {
            self.sequence = SEED_SEQUENCE.to_vec();
        } else {
            for _ in 0..2 {
                let tile = Tile::random(&mut self.rng);
                self.sequence.push(tile);
            }
        }
        self.status = self.level_status();

        log_level(self.level, &self.sequence);
        self.start_listening();
    }

    fn level_status(&self) -> String {
        if self.level == 0 {
            "Click in the flashing order".to_string()
        } else {
            format!("Memory Level: {}", self.level)
        }
    }

    fn start_listening(&mut self) {
        self.phase = Phase::Listening;
        self.progress = Progress {
            slots: self.sequence.len(),
            filled: 0,
            tone: ProgressTone::Neutral,
        };

        // Note i sounds on the (i + 1)-th cadence tick; input opens one tick
        // after the last note.
        for index in 0..self.sequence.len() {
            self.timeline.schedule(
                self.now + (index as f64 + 1.) * PLAY_INTERVAL_MS,
                Event::PlayNote(index),
            );
        }
        self.timeline.schedule(
            self.now + (self.sequence.len() as f64 + 1.) * PLAY_INTERVAL_MS,
            Event::BeginInput,
        );
    }

    fn start_inputting(&mut self) {
        self.phase = Phase::Inputting;
        self.input.clear();
    }

    fn complete_level(&mut self) {
        self.replays_left = 1;
        self.level += 1;
        self.phase = Phase::Waiting;

        self.timeline
            .schedule(self.now + PLAY_INTERVAL_MS, Event::WinFlourish);
        self.timeline
            .schedule(self.now + PLAY_INTERVAL_MS * 2., Event::AllOff);
        self.timeline
            .schedule(self.now + NEXT_STEP_DELAY_MS, Event::BeginLevel);
    }

    fn replay_current_level(&mut self) {
        self.replays_left -= 1;
        self.phase = Phase::Waiting;
        self.turn_all_on();
        self.play_feedback(Feedback::Wrong);

        self.timeline
            .schedule(self.now + PLAY_INTERVAL_MS, Event::AllOff);
        self.timeline
            .schedule(self.now + NEXT_STEP_DELAY_MS, Event::Relisten);
    }

    fn game_over(&mut self) {
        self.phase = Phase::Waiting;
        self.turn_all_on();
        self.play_feedback(Feedback::Wrong);

        self.timeline
            .schedule(self.now + PLAY_INTERVAL_MS, Event::FinishGameOver);
    }

    fn flash_and_play(&mut self, tile: Tile) {
        self.lit[tile.index()] = true;
        self.sounds.borrow_mut().push(Sound::Note(tile));
        self.timeline
            .schedule(self.now + FLASH_MS, Event::LightOff(tile));
    }

    fn turn_all_on(&mut self) {
        self.all_on = true;
        self.lit = [true; 4];
    }

    fn turn_all_off(&mut self) {
        self.all_on = false;
        self.lit = [false; 4];
    }

    fn play_feedback(&mut self, feedback: Feedback) {
        self.sounds.borrow_mut().push(Sound::Chord(feedback));
    }
}

#[cfg(target_arch = "wasm32")]
fn log_level(level: usize, sequence: &[Tile]) {
    let line = format!(
        "level {}: '{}'",
        level,
        sequence.iter().map(|tile| tile.pitch()).collect::<String>()
    );
    web_sys::console::log_1(&wasm_bindgen::JsValue::from(line));
}

#[cfg(not(target_arch = "wasm32"))]
fn log_level(_level: usize, _sequence: &[Tile]) {}

pub enum GameAction {
    Input(Tile),
    Restart,
    Animate,
}

impl Reducible for MemoryGame {
    type Action = GameAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut game = (*self).clone();

        match action {
            GameAction::Input(tile) => game.handle_input(tile),
            GameAction::Restart => game.restart(),
            GameAction::Animate => {
                let now = js_sys::Date::now() - game.begin_at;
                game.advance(now);
            }
        }

        game.into()
    }
}

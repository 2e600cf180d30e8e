//! Static tile and sound configuration, mirroring the block/sound data the
//! page is built from.

use rand::prelude::*;

pub const PLAY_INTERVAL_MS: f64 = 400.;
pub const FLASH_MS: f64 = 100.;

/// The four tile identifiers. Each tile doubles as its own pitch id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tile {
    One,
    Two,
    Three,
    Four,
}

impl Tile {
    pub const ALL: [Tile; 4] = [Tile::One, Tile::Two, Tile::Three, Tile::Four];

    pub fn index(self) -> usize {
        match self {
            Tile::One => 0,
            Tile::Two => 1,
            Tile::Three => 2,
            Tile::Four => 3,
        }
    }

    pub fn pitch(self) -> &'static str {
        match self {
            Tile::One => "1",
            Tile::Two => "2",
            Tile::Three => "3",
            Tile::Four => "4",
        }
    }

    pub fn random(rng: &mut StdRng) -> Tile {
        Tile::ALL[rng.gen_range(0..Tile::ALL.len())]
    }
}

/// Feedback chords played when a level is won or an input diverges. Every
/// pitch in a set starts at once. The 5.5 in the wrong set is carried over
/// from the original sound data as-is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    Wrong,
}

impl Feedback {
    pub fn pitches(self) -> &'static [&'static str] {
        match self {
            Feedback::Correct => &["1", "3", "5", "8"],
            Feedback::Wrong => &["2", "4", "5.5", "7"],
        }
    }
}

/// Every pitch id the game can ever ask the audio layer for.
pub const ALL_PITCHES: [&str; 8] = ["1", "2", "3", "4", "5", "5.5", "7", "8"];

pub fn tone_url(pitch: &str) -> String {
    format!("https://awiclass.monoame.com/pianosound/set/{}.wav", pitch)
}

/// Audio effects emitted by the engine and drained by the UI each frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sound {
    Note(Tile),
    Chord(Feedback),
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_feedback_sets_cover_known_pitches() {
        for feedback in [Feedback::Correct, Feedback::Wrong] {
            for pitch in feedback.pitches() {
                assert!(ALL_PITCHES.contains(pitch), "unknown pitch {}", pitch);
            }
        }
    }

    #[test]
    fn test_tile_pitches_are_their_ids() {
        for (i, tile) in Tile::ALL.iter().enumerate() {
            assert_eq!(tile.index(), i);
            assert_eq!(tile.pitch(), (i + 1).to_string());
        }
    }

    #[test]
    fn test_tone_url_scheme() {
        assert_eq!(
            tone_url("5.5"),
            "https://awiclass.monoame.com/pianosound/set/5.5.wav"
        );
    }
}

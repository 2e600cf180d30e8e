use super::block::Block;
use super::progress::InputProgress;
use crate::game::{tone_url, GameAction, MemoryGame, Sound, Tile, ALL_PITCHES};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use yew::prelude::*;

fn raf_loop(mut func: impl FnMut() + 'static) {
    let f = Rc::new(RefCell::new(None));
    let g = f.clone();

    let request_animation_frame = |window: &web_sys::Window, f: &Closure<dyn FnMut()>| {
        window
            .request_animation_frame(f.as_ref().unchecked_ref())
            .unwrap();
    };

    let window = web_sys::window().unwrap();
    let cloned_window = window.clone();
    *f.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        func();
        request_animation_frame(&cloned_window, g.borrow().as_ref().unwrap());
    }) as Box<dyn FnMut()>));
    request_animation_frame(&window, f.borrow().as_ref().unwrap());
}

struct Audio {
    context: Rc<web_sys::AudioContext>,
    buf: web_sys::AudioBuffer,
}

impl Audio {
    fn new(context: Rc<web_sys::AudioContext>, buf: web_sys::AudioBuffer) -> Self {
        Audio { context, buf }
    }

    /// Each call starts a fresh buffer source, so a tone always plays from
    /// the beginning even while an earlier playback of it is still sounding.
    fn play(&self) {
        let node = self.context.create_buffer_source().unwrap();
        node.set_buffer(Some(&self.buf));
        node.connect_with_audio_node(&self.context.destination())
            .unwrap();
        node.start().unwrap();
    }
}

async fn resolve_promise<T: From<JsValue>>(promise: js_sys::Promise) -> Option<T> {
    wasm_bindgen_futures::JsFuture::from(promise)
        .await
        .ok()
        .map(Into::into)
}

struct LazyAudio {
    context: Rc<web_sys::AudioContext>,
    src: String,
    audio: Arc<Mutex<Option<Audio>>>,
}

impl LazyAudio {
    fn new(src: &str, context: Rc<web_sys::AudioContext>) -> LazyAudio {
        LazyAudio {
            context,
            src: src.to_string(),
            audio: Arc::new(Mutex::new(None)),
        }
    }

    // A failed fetch or decode leaves the slot empty; playback then stays
    // silent rather than failing.
    async fn load(&self) {
        let is_loaded = {
            let audio = self.audio.lock().unwrap();
            audio.is_some()
        };
        if is_loaded {
            return;
        }

        let window = web_sys::window().unwrap();
        let Some(res) = resolve_promise::<web_sys::Response>(window.fetch_with_str(&self.src)).await
        else {
            return;
        };
        let Ok(buffer_promise) = res.array_buffer() else {
            return;
        };
        let Some(array_buffer) = resolve_promise::<js_sys::ArrayBuffer>(buffer_promise).await
        else {
            return;
        };
        let Ok(decode_promise) = self.context.decode_audio_data(&array_buffer) else {
            return;
        };
        let Some(buffer) = resolve_promise::<web_sys::AudioBuffer>(decode_promise).await else {
            return;
        };

        let mut audio = self.audio.lock().unwrap();
        *audio = Some(Audio::new(self.context.clone(), buffer));
    }

    async fn play(&self) {
        self.load().await;
        let audio = self.audio.lock().unwrap();
        if let Some(audio) = audio.as_ref() {
            audio.play();
        }
    }
}

/// All eight piano tones the game uses, fetched lazily from the pitch-keyed
/// sample URLs and decoded once.
struct ToneBank {
    tones: Vec<(&'static str, Rc<LazyAudio>)>,
}

impl ToneBank {
    fn new(context: Rc<web_sys::AudioContext>) -> Self {
        let tones = ALL_PITCHES
            .iter()
            .map(|&pitch| {
                (
                    pitch,
                    Rc::new(LazyAudio::new(&tone_url(pitch), context.clone())),
                )
            })
            .collect();
        ToneBank { tones }
    }

    fn preload(&self) {
        for (_, tone) in &self.tones {
            let tone = tone.clone();
            wasm_bindgen_futures::spawn_local(async move { tone.load().await });
        }
    }

    fn play(&self, pitch: &str) {
        if let Some((_, tone)) = self.tones.iter().find(|(name, _)| *name == pitch) {
            let tone = tone.clone();
            wasm_bindgen_futures::spawn_local(async move { tone.play().await });
        }
    }
}

#[function_component(Game)]
pub fn game_component() -> Html {
    let game = use_reducer(MemoryGame::new);

    let audio_context = use_ref(|| web_sys::AudioContext::new().unwrap());
    let tones = use_ref({
        let context = audio_context;
        move || ToneBank::new(context)
    });

    {
        let tones = tones.clone();
        let game = game.clone();
        use_effect_with_deps(
            move |_| {
                tones.preload();
                raf_loop(move || game.dispatch(GameAction::Animate));
                || ()
            },
            (),
        );
    }

    for sound in game.take_sounds() {
        match sound {
            Sound::Note(tile) => tones.play(tile.pitch()),
            Sound::Chord(feedback) => {
                // All pitches of a feedback set start simultaneously.
                for pitch in feedback.pitches() {
                    tones.play(pitch);
                }
            }
        }
    }

    let on_block = {
        let game = game.clone();
        Callback::from(move |tile: Tile| game.dispatch(GameAction::Input(tile)))
    };
    let on_restart = {
        let game = game.clone();
        Callback::from(move |_: web_sys::MouseEvent| game.dispatch(GameAction::Restart))
    };

    let enabled = game.input_enabled();
    let wrap_class = if game.report.is_some() {
        "wrap blur"
    } else {
        "wrap"
    };

    let end_window = match &game.report {
        Some(report) => html! {
            <div class="endWindow">
                <div class="memoryLevel">{report.clone()}</div>
                <div class="restart" onclick={on_restart}>{"Try Again"}</div>
            </div>
        },
        None => html! {},
    };

    html! {
        <>
            <div class={wrap_class}>
                <div class="infos">
                    <h1 class="title">{"Memory Bloxx"}</h1>
                    <h2 class="status">{game.status.clone()}</h2>
                </div>
                <div class="columns">
                    <div class="row">
                        <Block tile={Tile::One} lit={game.lit(Tile::One)} enabled={enabled} onclick={on_block.clone()} />
                        <Block tile={Tile::Two} lit={game.lit(Tile::Two)} enabled={enabled} onclick={on_block.clone()} />
                    </div>
                    <div class="row">
                        <Block tile={Tile::Three} lit={game.lit(Tile::Three)} enabled={enabled} onclick={on_block.clone()} />
                        <Block tile={Tile::Four} lit={game.lit(Tile::Four)} enabled={enabled} onclick={on_block} />
                    </div>
                    <div class="row">
                        <InputProgress progress={game.progress.clone()} />
                    </div>
                </div>
            </div>
            {end_window}
        </>
    }
}

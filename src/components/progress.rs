use crate::game::{Progress, ProgressTone};
use yew::prelude::*;

#[derive(Clone, Properties, PartialEq)]
pub struct Props {
    pub progress: Progress,
}

/// The circle row under the blocks, rebuilt on every render: one circle per
/// target symbol, filled up to the accepted input length.
#[function_component(InputProgress)]
pub fn input_progress(props: &Props) -> Html {
    let Progress {
        slots,
        filled,
        tone,
    } = props.progress.clone();

    let class = match tone {
        ProgressTone::Neutral => "inputProgress",
        ProgressTone::Correct => "inputProgress correct",
        ProgressTone::Wrong => "inputProgress wrong",
    };

    let circles = (0..slots).map(|i| {
        let class = if i < filled { "circle correct" } else { "circle" };
        html! {
            <div class={class} />
        }
    });

    html! {
        <div class={class}>
            {for circles}
        </div>
    }
}

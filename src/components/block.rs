use crate::game::Tile;
use yew::prelude::*;

#[derive(Clone, Properties, PartialEq)]
pub struct Props {
    pub tile: Tile,
    pub lit: bool,
    pub enabled: bool,
    pub onclick: Callback<Tile>,
}

#[function_component(Block)]
pub fn block(props: &Props) -> Html {
    let Props {
        tile,
        lit,
        enabled,
        onclick,
    } = props.clone();

    let mut class = format!("block block{}", tile.index() + 1);
    if lit {
        class.push_str(" light");
    }
    if !enabled {
        class.push_str(" stopInputting");
    }

    let onclick = Callback::from(move |_: web_sys::MouseEvent| onclick.emit(tile));

    html! {
        <div class={class} onclick={onclick} />
    }
}

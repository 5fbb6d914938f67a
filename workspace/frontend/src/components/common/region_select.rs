use common::REGIONS;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct RegionSelectProps {
    /// Empty string means no region.
    pub value: AttrValue,
    pub on_change: Callback<String>,
    /// Adds an empty "any region" entry.
    #[prop_or_default]
    pub allow_clear: bool,
    #[prop_or_default]
    pub disabled: bool,
}

#[function_component(RegionSelect)]
pub fn region_select(props: &RegionSelectProps) -> Html {
    let on_change = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            on_change.emit(select.value());
        })
    };

    html! {
        <select class="select select-bordered select-sm w-48" onchange={on_change} disabled={props.disabled}>
            {if props.allow_clear {
                html! { <option value="" selected={props.value.is_empty()}>{"Region"}</option> }
            } else {
                html! {}
            }}
            { for REGIONS.iter().map(|region| html! {
                <option value={*region} selected={props.value.as_str() == *region}>{*region}</option>
            }) }
        </select>
    }
}

use compute::pagination::{page_count, visible_pages};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PaginationProps {
    pub current_page: usize,
    pub total_items: usize,
    pub items_per_page: usize,
    pub on_page_change: Callback<usize>,
}

#[function_component(Pagination)]
pub fn pagination(props: &PaginationProps) -> Html {
    let total_pages = page_count(props.total_items, props.items_per_page);

    if total_pages <= 1 {
        return html! {};
    }

    let current = props.current_page;

    let on_previous = {
        let on_page_change = props.on_page_change.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            if current > 1 {
                on_page_change.emit(current - 1);
            }
        })
    };

    let on_next = {
        let on_page_change = props.on_page_change.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            if current < total_pages {
                on_page_change.emit(current + 1);
            }
        })
    };

    html! {
        <div class="flex justify-center items-center gap-2 my-4">
            <button class="btn btn-sm" disabled={current <= 1} onclick={on_previous}>
                <i class="fas fa-chevron-left"></i>
            </button>

            {for visible_pages(current, total_pages).into_iter().map(|page| {
                if page == 0 {
                    html! { <span class="px-2">{"..."}</span> }
                } else {
                    let on_click = {
                        let on_page_change = props.on_page_change.clone();
                        Callback::from(move |e: MouseEvent| {
                            e.prevent_default();
                            on_page_change.emit(page);
                        })
                    };

                    html! {
                        <button
                            class={classes!("btn", "btn-sm", (page == current).then_some("btn-primary"))}
                            onclick={on_click}
                        >
                            {page}
                        </button>
                    }
                }
            })}

            <button class="btn btn-sm" disabled={current >= total_pages} onclick={on_next}>
                <i class="fas fa-chevron-right"></i>
            </button>

            <div class="ml-4 text-sm text-base-content/70">
                {format!("Page {} of {} ({} items)", current, total_pages, props.total_items)}
            </div>
        </div>
    }
}

use chrono::{Datelike, Local};
use yew::prelude::*;
use super::navbar::Navbar;
use super::sidebar::Sidebar;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub children: Children,
    pub title: AttrValue,
}

#[function_component(Layout)]
pub fn layout(props: &Props) -> Html {
    let year = Local::now().year();

    html! {
        <div class="drawer lg:drawer-open">
            <input id="nav-drawer" type="checkbox" class="drawer-toggle" />
            <div class="drawer-content flex flex-col min-h-screen bg-base-200">
                <Navbar title={props.title.clone()} />
                <main class="flex-1 p-6 overflow-y-auto">
                    <div class="card bg-base-100 shadow">
                        <div class="card-body">
                            { for props.children.iter() }
                        </div>
                    </div>
                </main>
                <footer class="footer footer-center p-4 text-base-content/70">
                    <p>{format!("© {} PowerCast", year)}</p>
                </footer>
            </div>
            <Sidebar />
        </div>
    }
}

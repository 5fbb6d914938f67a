use yew::prelude::*;

#[derive(Clone, Copy, PartialEq, Default)]
pub enum BannerKind {
    #[default]
    Error,
    Info,
    Success,
}

impl BannerKind {
    fn alert_class(&self) -> &'static str {
        match self {
            BannerKind::Error => "alert-error",
            BannerKind::Info => "alert-info",
            BannerKind::Success => "alert-success",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            BannerKind::Error => "fas fa-exclamation-circle",
            BannerKind::Info => "fas fa-info-circle",
            BannerKind::Success => "fas fa-check-circle",
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct BannerProps {
    pub message: String,
    #[prop_or_default]
    pub kind: BannerKind,
    #[prop_or_default]
    pub description: Option<Html>,
    #[prop_or_default]
    pub on_retry: Option<Callback<()>>,
}

/// Inline message shown above page content.
#[function_component(Banner)]
pub fn banner(props: &BannerProps) -> Html {
    if props.kind == BannerKind::Error {
        log::warn!("Displaying error to user: {}", props.message);
    }

    html! {
        <div class={classes!("alert", props.kind.alert_class(), "my-3")}>
            <i class={props.kind.icon()}></i>
            <div class="flex flex-col gap-1">
                <span class="font-semibold">{&props.message}</span>
                {props.description.clone().unwrap_or_default()}
            </div>
            {if let Some(on_retry) = &props.on_retry {
                let on_retry = on_retry.clone();
                html! {
                    <button
                        class="btn btn-sm"
                        onclick={Callback::from(move |_| {
                            log::debug!("User clicked retry button");
                            on_retry.emit(());
                        })}
                    >
                        <i class="fas fa-redo"></i>
                        {" Try Again"}
                    </button>
                }
            } else {
                html! {}
            }}
        </div>
    }
}

use plotly::common::{Mode, Title};
use plotly::layout::Axis;
use plotly::{Layout, Scatter};
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;
use yew::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Plotly)]
    fn newPlot(div_id: &str, data: JsValue, layout: JsValue);
}

/// One line of the chart; `None` leaves a gap.
#[derive(Clone, PartialEq, Debug)]
pub struct ChartSeries {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

#[derive(Properties, PartialEq)]
pub struct LineChartProps {
    pub div_id: AttrValue,
    pub x: Vec<String>,
    pub series: Vec<ChartSeries>,
    #[prop_or_default]
    pub y_title: Option<AttrValue>,
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, String> {
    let json = serde_json::to_string(value).map_err(|e| e.to_string())?;
    js_sys::JSON::parse(&json).map_err(|e| format!("{:?}", e))
}

fn render(div_id: &str, props_x: &[String], series: &[ChartSeries], y_title: Option<&str>) -> Result<(), String> {
    let data = js_sys::Array::new();
    for line in series {
        let trace = Scatter::new(props_x.to_vec(), line.values.clone())
            .mode(Mode::Lines)
            .name(&line.name);
        data.push(&to_js(&trace)?);
    }

    let mut y_axis = Axis::new();
    if let Some(title) = y_title {
        y_axis = y_axis.title(Title::with_text(title));
    }
    let layout = Layout::new()
        .height(360)
        .show_legend(series.len() > 1)
        .x_axis(Axis::new().n_ticks(8))
        .y_axis(y_axis);

    newPlot(div_id, data.into(), to_js(&layout)?);
    Ok(())
}

/// Plotly line chart sharing one x axis of timestamps.
#[function_component(LineChart)]
pub fn line_chart(props: &LineChartProps) -> Html {
    let container_ref = use_node_ref();

    {
        let x = props.x.clone();
        let series = props.series.clone();
        let div_id = props.div_id.clone();
        let y_title = props.y_title.clone();
        use_effect_with((container_ref.clone(), x, series), move |(container_ref, x, series)| {
            if let Some(element) = container_ref.cast::<HtmlElement>() {
                element.set_id(&div_id);
                if let Err(e) = render(&div_id, x, series, y_title.as_deref()) {
                    log::error!("Failed to draw chart {}: {}", div_id, e);
                }
            }
            || ()
        });
    }

    html! {
        <div ref={container_ref} style="width:100%; height:360px;"></div>
    }
}

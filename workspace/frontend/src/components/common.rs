pub mod line_chart;
pub mod pagination;
pub mod region_select;

pub mod confidence_badge;
pub mod kpi_card;
pub mod property_form;
pub mod toast;
pub mod trend_chart;
pub mod valuation_table;

use crate::{config::Config, services::hr_api::HrApi};
use chrono::{Local, NaiveDate};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn HrApi>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(api: Arc<dyn HrApi>, config: Config) -> Self {
        Self {
            api,
            config: Arc::new(config),
        }
    }

    /// Local calendar date; anchors `this_month` and the daily sheet.
    pub fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

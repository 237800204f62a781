use crate::commands::search::api::Workshop;

use super::config::WorkshopConfig;

#[derive(Debug, Clone)]
pub struct PoiseData {
    workshop: Workshop,
}

impl PoiseData {
    pub(crate) fn new(config: &WorkshopConfig) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent())
            .build()?;

        Ok(Self {
            workshop: Workshop::new(client),
        })
    }

    pub(crate) const fn workshop(&self) -> &Workshop {
        &self.workshop
    }
}

//! Statement download

use banklink_config::{Config, StatementFormat};
use banklink_core::AccountCache;
use banklink_statement::StatementExporter;
use chrono::NaiveDate;
use std::path::PathBuf;

use super::ControllerContext;
use crate::forms::SubmitOutcome;

pub struct StatementController {
    exporter: StatementExporter,
    output_dir: PathBuf,
}

impl StatementController {
    pub fn new(exporter: StatementExporter, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            exporter,
            output_dir: output_dir.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            StatementExporter::from_config(config),
            config.statement.output_dir.clone(),
        )
    }

    pub fn exporter(&self) -> &StatementExporter {
        &self.exporter
    }

    /// Export `account_id` as of `today` and save it under the output directory
    pub async fn download(
        &self,
        ctx: &ControllerContext,
        cache: &AccountCache,
        account_id: &str,
        format: Option<StatementFormat>,
        today: NaiveDate,
    ) -> SubmitOutcome {
        let user = match ctx.session.current_user() {
            Ok(user) => user,
            Err(e) => {
                log::warn!("Cached profile unreadable, using default holder: {}", e);
                None
            }
        };

        let saved = match self
            .exporter
            .export(cache, account_id.trim(), user.as_ref(), today, format)
            .await
        {
            Ok(exported) => exported
                .save_to(&self.output_dir)
                .await
                .map(|path| (exported.success_message(), path)),
            Err(e) => Err(e),
        };

        match saved {
            Ok((message, path)) => {
                ctx.notify_success(message.clone());
                log::info!("Statement written to {}", path.display());
                SubmitOutcome::Succeeded(message)
            }
            Err(e) => {
                log::error!("Statement export failed: {}", e.to_details());
                let message = e.user_message();
                ctx.notify_error(message.clone());
                SubmitOutcome::Failed(message)
            }
        }
    }
}

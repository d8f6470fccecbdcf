//! Statement export: PDF first, CSV when the PDF path fails

use banklink_config::{Config, StatementFormat};
use banklink_core::{AccountCache, User};
use banklink_utils::CurrencyFormat;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

use crate::csv::CsvRenderer;
use crate::document::{resolve_holder, StatementDocument};
use crate::error::StatementResult;
use crate::renderer::{LazyRenderer, StatementRenderer};

/// Settings the exporter reads from the `statement` and `currency` sections
#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub title: String,
    pub default_holder: String,
    pub format: StatementFormat,
    pub currency: CurrencyFormat,
}

impl ExportSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            title: config.statement.title.clone(),
            default_holder: config.statement.default_holder.clone(),
            format: config.statement.format,
            currency: CurrencyFormat::new(
                config.currency.symbol.clone(),
                config.currency.decimal_places,
            ),
        }
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// A rendered statement ready to be saved
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedStatement {
    pub account_id: String,
    pub account_name: String,
    pub file_name: String,
    pub format: StatementFormat,
    pub bytes: Vec<u8>,
    /// True when PDF was wanted but CSV was produced
    pub fell_back: bool,
}

impl ExportedStatement {
    /// `PDF statement downloaded for <name>` or the CSV equivalent
    pub fn success_message(&self) -> String {
        format!(
            "{} statement downloaded for {}",
            self.format.extension().to_uppercase(),
            self.account_name
        )
    }

    /// Write into `dir`, creating it when missing
    pub async fn save_to(&self, dir: &Path) -> StatementResult<PathBuf> {
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(&self.file_name);
        tokio::fs::write(&path, &self.bytes).await?;
        log::info!("Saved {} ({} bytes)", path.display(), self.bytes.len());
        Ok(path)
    }
}

pub struct StatementExporter {
    pdf: LazyRenderer,
    csv: CsvRenderer,
    settings: ExportSettings,
}

impl StatementExporter {
    pub fn new(pdf: LazyRenderer, settings: ExportSettings) -> Self {
        Self {
            pdf,
            csv: CsvRenderer,
            settings,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(LazyRenderer::builtin(), ExportSettings::from_config(config))
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    pub fn pdf_renderer(&self) -> &LazyRenderer {
        &self.pdf
    }

    /// Render the statement for `account_id` from the cache
    ///
    /// Fails only for unknown accounts or when CSV itself cannot be produced.
    pub async fn export(
        &self,
        cache: &AccountCache,
        account_id: &str,
        user: Option<&User>,
        today: NaiveDate,
        format: Option<StatementFormat>,
    ) -> StatementResult<ExportedStatement> {
        let account = cache.get(account_id)?;
        let holder = resolve_holder(account, user, &self.settings.default_holder);
        let doc = StatementDocument::build(
            &self.settings.title,
            account_id,
            account,
            holder,
            today,
            &self.settings.currency,
        );

        let wanted = format.unwrap_or(self.settings.format);
        let (format, bytes) = match wanted {
            StatementFormat::Pdf => match self.render_pdf(&doc).await {
                Ok(bytes) => (StatementFormat::Pdf, bytes),
                Err(e) => {
                    log::warn!("PDF statement for {} failed, using CSV: {}", account_id, e);
                    (StatementFormat::Csv, self.csv.render(&doc)?)
                }
            },
            StatementFormat::Csv => (StatementFormat::Csv, self.csv.render(&doc)?),
        };

        log::info!(
            "Exported {} statement for {} ({} transactions)",
            format,
            account_id,
            doc.total_transactions()
        );
        Ok(ExportedStatement {
            account_id: account_id.to_string(),
            account_name: doc.account_name.clone(),
            file_name: doc.file_name(format),
            format,
            bytes,
            fell_back: wanted != format,
        })
    }

    async fn render_pdf(&self, doc: &StatementDocument) -> StatementResult<Vec<u8>> {
        let renderer = self.pdf.get().await?;
        renderer.render(doc)
    }
}

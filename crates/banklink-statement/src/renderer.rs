//! Renderer seam and single-flight loading of the PDF renderer

use async_trait::async_trait;
use banklink_config::StatementFormat;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::document::StatementDocument;
use crate::error::{StatementError, StatementResult};
use crate::pdf::{PdfCore, PdfRenderer, TableExtension};

/// Turns a statement into file bytes
pub trait StatementRenderer: Send + Sync {
    fn format(&self) -> StatementFormat;

    fn render(&self, doc: &StatementDocument) -> StatementResult<Vec<u8>>;
}

/// Supplies the two stages the PDF renderer is built from
#[async_trait]
pub trait RendererLoader: Send + Sync {
    async fn load_core(&self) -> StatementResult<PdfCore>;

    /// Runs only after `load_core` succeeded
    async fn load_table_extension(&self, core: &PdfCore) -> StatementResult<TableExtension>;
}

/// Loader for the built-in Helvetica layout
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinLoader;

#[async_trait]
impl RendererLoader for BuiltinLoader {
    async fn load_core(&self) -> StatementResult<PdfCore> {
        Ok(PdfCore::helvetica())
    }

    async fn load_table_extension(&self, _core: &PdfCore) -> StatementResult<TableExtension> {
        Ok(TableExtension::grid())
    }
}

/// Renderer availability as seen by callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    NotLoaded,
    Loading,
    Ready,
}

impl LoadState {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => LoadState::Loading,
            2 => LoadState::Ready,
            _ => LoadState::NotLoaded,
        }
    }

    fn as_u8(self) -> u8 {
        match self {
            LoadState::NotLoaded => 0,
            LoadState::Loading => 1,
            LoadState::Ready => 2,
        }
    }
}

/// PDF renderer loaded on first use and shared afterwards
///
/// Concurrent callers wait on the same load. A failed load leaves the
/// state at `NotLoaded` so the next request tries again.
pub struct LazyRenderer {
    loader: Arc<dyn RendererLoader>,
    cell: OnceCell<Arc<PdfRenderer>>,
    state: AtomicU8,
}

impl LazyRenderer {
    pub fn new(loader: Arc<dyn RendererLoader>) -> Self {
        Self {
            loader,
            cell: OnceCell::new(),
            state: AtomicU8::new(LoadState::NotLoaded.as_u8()),
        }
    }

    pub fn builtin() -> Self {
        Self::new(Arc::new(BuiltinLoader))
    }

    pub fn state(&self) -> LoadState {
        LoadState::from_u8(self.state.load(Ordering::Acquire))
    }

    fn set_state(&self, state: LoadState) {
        self.state.store(state.as_u8(), Ordering::Release);
    }

    /// The loaded renderer, loading it first if needed
    pub async fn get(&self) -> StatementResult<Arc<PdfRenderer>> {
        let renderer = self
            .cell
            .get_or_try_init(|| async {
                self.set_state(LoadState::Loading);
                log::debug!("Loading PDF renderer");

                let loaded = async {
                    let core = self.loader.load_core().await?;
                    let table = self.loader.load_table_extension(&core).await?;
                    Ok::<_, StatementError>(Arc::new(PdfRenderer::new(core, table)))
                }
                .await;

                match &loaded {
                    Ok(_) => {
                        self.set_state(LoadState::Ready);
                        log::info!("PDF renderer ready");
                    }
                    Err(e) => {
                        self.set_state(LoadState::NotLoaded);
                        log::warn!("PDF renderer failed to load: {}", e);
                    }
                }
                loaded
            })
            .await?;
        Ok(Arc::clone(renderer))
    }
}

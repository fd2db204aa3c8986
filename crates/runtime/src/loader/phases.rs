//! The two phases this subsystem injects into the host's loading sequence,
//! plus a stand-in for the host's bulk content phase.

use std::any::Any;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use item_content::catalog::{PartCatalog, PartDefinition, EVA_FEMALE, EVA_MALE, is_reserved_eva};
use item_content::loaders::ConfigLoader;
use item_core::StowageConfig;
use tracing::{debug, error, info, warn};

use crate::loader::phase::LoadingPhase;

/// State shared between the loading phases.
///
/// The configuration snapshot is written once by [`ConfigPhase`] and
/// read-only thereafter; the catalog is written by the bulk content phase
/// and extended (capability attach points only) by the population phase.
#[derive(Debug, Default)]
pub struct LoaderContext {
    pub config: StowageConfig,
    pub catalog: PartCatalog,
}

impl LoaderContext {
    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::default()))
    }
}

/// Synchronous, single-step phase that loads the stowage configuration.
///
/// Must run strictly before bulk content load: the population phase and any
/// config-aware part modules read the snapshot. A missing settings source is
/// logged and replaced by compiled-in defaults; it never fails the load.
pub struct ConfigPhase {
    path: PathBuf,
    ctx: Rc<RefCell<LoaderContext>>,
    ready: bool,
}

impl ConfigPhase {
    pub fn new(path: PathBuf, ctx: Rc<RefCell<LoaderContext>>) -> Self {
        Self {
            path,
            ctx,
            ready: false,
        }
    }
}

impl LoadingPhase for ConfigPhase {
    fn title(&self) -> &str {
        "Stowage configuration"
    }

    fn start(&mut self) {
        info!("loading stowage configuration");
        self.ctx.borrow_mut().config = ConfigLoader::load_or_default(&self.path);
        self.ready = true;
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Stand-in for the host's bulk part-content loader.
///
/// In the real host this phase is opaque; it instantiates every part
/// definition and runs the third-party patch pass over them. Here it
/// installs a prepared definition list into the shared catalog so the
/// ordering contract can be exercised.
pub struct BulkContentPhase {
    parts: Vec<PartDefinition>,
    ctx: Rc<RefCell<LoaderContext>>,
    ready: bool,
}

impl BulkContentPhase {
    pub fn new(parts: Vec<PartDefinition>, ctx: Rc<RefCell<LoaderContext>>) -> Self {
        Self {
            parts,
            ctx,
            ready: false,
        }
    }
}

impl LoadingPhase for BulkContentPhase {
    fn title(&self) -> &str {
        "Part content"
    }

    fn start(&mut self) {
        let parts = std::mem::take(&mut self.parts);
        info!(count = parts.len(), "bulk part content loaded");
        self.ctx.borrow_mut().catalog.set_parts(parts);
        self.ready = true;
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Incremental phase that walks every loaded part definition once and
/// attaches one inventory capability per passenger seat.
///
/// Must run strictly after bulk content load so the patch pass has settled.
/// Processes one definition per frame and reports `processed / total`.
/// The agent's own EVA definitions are configured directly in
/// [`LoadingPhase::start`]; they are excluded from the per-seat iteration.
pub struct InventoryPopulationPhase {
    ctx: Rc<RefCell<LoaderContext>>,
    processed: usize,
    total: usize,
    attached: usize,
    started: bool,
}

impl InventoryPopulationPhase {
    pub fn new(ctx: Rc<RefCell<LoaderContext>>) -> Self {
        Self {
            ctx,
            processed: 0,
            total: 0,
            attached: 0,
            started: false,
        }
    }

    /// Inventory capabilities attached so far.
    pub fn attached(&self) -> usize {
        self.attached
    }
}

impl LoadingPhase for InventoryPopulationPhase {
    fn title(&self) -> &str {
        "Stowage inventories"
    }

    fn start(&mut self) {
        let ctx = &mut *self.ctx.borrow_mut();
        self.total = ctx.catalog.len();
        self.processed = 0;
        self.started = true;

        // The EVA agent definitions never pass the crew-capacity filter; they
        // are configured here by direct lookup.
        for name in [EVA_MALE, EVA_FEMALE] {
            match ctx
                .catalog
                .configure_eva(name, &ctx.config.seat_inventory, &ctx.config.agent_pickup)
            {
                Ok(()) => debug!(part = name, "agent inventory configured"),
                Err(e) => warn!(part = name, "cannot configure agent inventory: {e}"),
            }
        }
        info!(total = self.total, "populating seat inventories");
    }

    fn tick(&mut self) {
        let ctx = &mut *self.ctx.borrow_mut();
        let Some(part) = ctx.catalog.at(self.processed) else {
            self.processed = self.total;
            return;
        };
        let name = part.name.clone();
        let capacity = part.crew_capacity;

        if !is_reserved_eva(&name) && capacity >= 1 {
            debug!(part = %name, capacity, "found part with passenger capacity");
            for seat in 0..capacity {
                match ctx
                    .catalog
                    .attach_seat_inventory(&name, seat, &ctx.config.seat_inventory)
                {
                    Ok(()) => self.attached += 1,
                    // Partial success is acceptable; keep going with the
                    // remaining seats and parts.
                    Err(e) => error!(part = %name, seat, "seat inventory not attached: {e}"),
                }
            }
        }
        self.processed += 1;
    }

    fn is_ready(&self) -> bool {
        self.started && self.processed >= self.total
    }

    fn progress_fraction(&self) -> f32 {
        if !self.started {
            0.0
        } else if self.total == 0 {
            1.0
        } else {
            self.processed as f32 / self.total as f32
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

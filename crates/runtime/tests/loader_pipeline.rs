//! End-to-end tests for the startup loading sequence: phase insertion,
//! ordering, incremental population, and progress reporting.

use std::any::Any;
use std::io::Write;
use std::path::PathBuf;

use item_content::catalog::{EVA_FEMALE, EVA_MALE, InventoryKind, PartDefinition};
use runtime::{
    BulkContentPhase, InventoryPopulationPhase, LoaderContext, LoadingPhase, LoadingScreen,
    Orchestrator, OrchestratorState, TaskStatus,
};

fn init_logs() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// An opaque host phase that completes after a fixed number of frames.
struct HostPhase {
    title: &'static str,
    frames_left: u32,
}

impl HostPhase {
    fn new(title: &'static str, frames: u32) -> Self {
        Self {
            title,
            frames_left: frames,
        }
    }
}

impl LoadingPhase for HostPhase {
    fn title(&self) -> &str {
        self.title
    }

    fn start(&mut self) {}

    fn tick(&mut self) {
        self.frames_left = self.frames_left.saturating_sub(1);
    }

    fn is_ready(&self) -> bool {
        self.frames_left == 0
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn sample_parts() -> Vec<PartDefinition> {
    vec![
        PartDefinition::new(EVA_MALE, 1),
        PartDefinition::new(EVA_FEMALE, 1),
        PartDefinition::new("commandPod", 3),
        PartDefinition::new("girder", 0),
        PartDefinition::new("crewCabin", 4),
        PartDefinition::new("scienceLab", 2),
    ]
}

fn install(parts: Vec<PartDefinition>, config_path: PathBuf) -> Orchestrator {
    let ctx = LoaderContext::shared();
    let screen = LoadingScreen::new(vec![
        Box::new(HostPhase::new("Expansions", 2)),
        Box::new(BulkContentPhase::new(parts, ctx.clone())),
        Box::new(HostPhase::new("Finalizing", 1)),
    ]);
    Orchestrator::install::<BulkContentPhase>(screen, ctx, config_path).unwrap()
}

#[test]
fn phases_are_inserted_around_bulk_content() {
    init_logs();
    let orchestrator = install(sample_parts(), PathBuf::from("/nonexistent/settings.ron"));
    assert_eq!(
        orchestrator.screen().titles(),
        vec![
            "Expansions",
            "Stowage configuration",
            "Part content",
            "Stowage inventories",
            "Finalizing",
        ]
    );
}

#[test]
fn install_fails_without_a_bulk_content_phase() {
    let ctx = LoaderContext::shared();
    let screen = LoadingScreen::new(vec![Box::new(HostPhase::new("Expansions", 1))]);
    let err = Orchestrator::install::<BulkContentPhase>(
        screen,
        ctx,
        PathBuf::from("/nonexistent/settings.ron"),
    )
    .err()
    .unwrap();
    assert_eq!(err, runtime::InstallError::BulkPhaseNotFound);
}

#[test]
fn orchestrator_walks_its_states_in_order_and_reaches_done() {
    let mut orchestrator = install(sample_parts(), PathBuf::from("/nonexistent/settings.ron"));
    assert_eq!(orchestrator.state(), OrchestratorState::NotStarted);

    let mut seen = vec![orchestrator.state()];
    for _ in 0..100 {
        let status = orchestrator.tick();
        let state = orchestrator.state();
        if seen.last() != Some(&state) {
            seen.push(state);
        }
        if status == TaskStatus::Done {
            break;
        }
    }
    assert_eq!(
        seen,
        vec![
            OrchestratorState::NotStarted,
            OrchestratorState::AwaitingConfigPhase,
            OrchestratorState::AwaitingBulkContentPhase,
            OrchestratorState::AwaitingInventoryPopulationPhase,
            OrchestratorState::Done,
        ]
    );
}

#[test]
fn population_attaches_one_inventory_per_passenger_seat() {
    let ctx = LoaderContext::shared();
    let screen = LoadingScreen::new(vec![Box::new(BulkContentPhase::new(
        sample_parts(),
        ctx.clone(),
    ))]);
    let mut orchestrator =
        Orchestrator::install::<BulkContentPhase>(screen, ctx.clone(), "/nope.ron".into())
            .unwrap();
    orchestrator.run_to_completion(100);

    let ctx = ctx.borrow();
    // commandPod 3 + crewCabin 4 + scienceLab 2; girder has no seats and the
    // EVA definitions are excluded from the iteration.
    assert_eq!(ctx.catalog.get("commandPod").unwrap().inventories.len(), 3);
    assert_eq!(ctx.catalog.get("crewCabin").unwrap().inventories.len(), 4);
    assert_eq!(ctx.catalog.get("scienceLab").unwrap().inventories.len(), 2);
    assert_eq!(ctx.catalog.get("girder").unwrap().inventories.len(), 0);
    assert!(
        ctx.catalog
            .get("commandPod")
            .unwrap()
            .inventories
            .iter()
            .all(|inv| inv.kind == InventoryKind::Pod)
    );

    // The agent definitions were configured by direct lookup instead.
    for name in [EVA_MALE, EVA_FEMALE] {
        let eva = ctx.catalog.get(name).unwrap();
        assert_eq!(eva.inventories.len(), 1);
        assert_eq!(eva.inventories[0].kind, InventoryKind::Eva);
        assert!(eva.pickup.is_some());
    }

    // Σ c_i pod inventories + 2 EVA inventories.
    assert_eq!(ctx.catalog.total_inventories(), 9 + 2);
}

#[test]
fn population_progress_reaches_one_exactly_on_the_last_definition() {
    let ctx = LoaderContext::shared();
    let screen = LoadingScreen::new(vec![Box::new(BulkContentPhase::new(
        sample_parts(),
        ctx.clone(),
    ))]);
    let mut orchestrator =
        Orchestrator::install::<BulkContentPhase>(screen, ctx, "/nope.ron".into()).unwrap();

    let total = sample_parts().len();
    let population_index = 2; // config, bulk, population
    let mut last_progress = 0.0f32;
    for _ in 0..100 {
        let status = orchestrator.tick();
        let phase = orchestrator.screen().phase(population_index).unwrap();
        let progress = phase.progress_fraction();
        assert!(progress >= last_progress, "progress must be monotonic");
        assert!((0.0..=1.0).contains(&progress));
        // Progress hits 1.0 exactly when the last definition is processed.
        if progress < 1.0 {
            assert!(!phase.is_ready());
        }
        last_progress = progress;
        if status == TaskStatus::Done {
            break;
        }
    }
    assert_eq!(last_progress, 1.0);

    let population = orchestrator
        .screen()
        .phase(population_index)
        .unwrap()
        .as_any()
        .downcast_ref::<InventoryPopulationPhase>()
        .unwrap();
    // 3 + 4 + 2 pod seats across the sample definitions.
    assert_eq!(population.attached(), 9);
    assert_eq!(total, 6);
}

#[test]
fn per_seat_failures_do_not_stop_the_population() {
    let mut parts = sample_parts();
    parts.push(PartDefinition::new("corrupted", 5).without_prefab());
    let ctx = LoaderContext::shared();
    let screen = LoadingScreen::new(vec![Box::new(BulkContentPhase::new(parts, ctx.clone()))]);
    let mut orchestrator =
        Orchestrator::install::<BulkContentPhase>(screen, ctx.clone(), "/nope.ron".into())
            .unwrap();
    orchestrator.run_to_completion(100);

    assert_eq!(orchestrator.state(), OrchestratorState::Done);
    let ctx = ctx.borrow();
    assert_eq!(ctx.catalog.get("corrupted").unwrap().inventories.len(), 0);
    // Every other part still got its inventories.
    assert_eq!(ctx.catalog.get("crewCabin").unwrap().inventories.len(), 4);
}

#[test]
fn missing_config_never_aborts_startup() {
    init_logs();
    let mut orchestrator = install(sample_parts(), PathBuf::from("/definitely/not/here.ron"));
    orchestrator.run_to_completion(100);
    assert_eq!(orchestrator.state(), OrchestratorState::Done);
}

#[test]
fn loaded_config_flows_into_seat_inventories() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(
        br#"(
            seat_inventory: (slots_x: 6, slots_y: 2, max_volume: 120.0),
            agent_pickup: (allow_static_attach: true),
        )"#,
    )
    .unwrap();

    let ctx = LoaderContext::shared();
    let screen = LoadingScreen::new(vec![Box::new(BulkContentPhase::new(
        sample_parts(),
        ctx.clone(),
    ))]);
    let mut orchestrator =
        Orchestrator::install::<BulkContentPhase>(screen, ctx.clone(), file.path().to_path_buf())
            .unwrap();
    orchestrator.run_to_completion(100);

    let ctx = ctx.borrow();
    let pod = ctx.catalog.get("commandPod").unwrap();
    assert_eq!(pod.inventories[0].settings.slots_x, 6);
    assert_eq!(pod.inventories[0].settings.max_volume, 120.0);
    let eva = ctx.catalog.get(EVA_MALE).unwrap();
    assert!(eva.pickup.as_ref().unwrap().allow_static_attach);
}

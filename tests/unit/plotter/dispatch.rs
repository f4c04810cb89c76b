use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::json;

use super::*;
use crate::figure::recording::{DrawCommand, RecordingFigure};
use crate::registry::capability::PlotCapability;

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "trackplot_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn keep_open() -> PlotterOpts {
    PlotterOpts { close_after: false }
}

/// Registry with a counting `spy` plot (requires `x`) and a `title` plot that records its name.
fn spy_registry(calls: Arc<AtomicUsize>) -> PlotRegistry {
    let reg = PlotRegistry::new();
    reg.register_plot("spy", Some(vec!["x".to_string()]), move |_, _, _| {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });
    reg.register_plot("title", None, |ax, _, kwargs| {
        let t = kwargs.get("text").and_then(Value::as_str).unwrap_or("");
        ax.set_title(t);
        Ok(())
    });
    reg
}

fn titles(fig: &RecordingFigure, target: TargetId) -> Vec<String> {
    fig.axes(target)
        .unwrap()
        .commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Title { title } => Some(title.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn bad_layer_does_not_stop_sibling_layer() {
    let calls = Arc::new(AtomicUsize::new(0));
    let reg = spy_registry(calls.clone());
    let plan = RenderPlan::new().with(
        (0, 0),
        vec![PlotConfig::new(), PlotConfig::named("spy")],
    );

    let mut plotter = Plotter::with_registry(RecordingFigure::subplots(1, 1), plan, &reg)
        .data(json!({ "x": [1, 2, 3] }));
    let report = plotter.plot(None).unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(report.drawn.len(), 1);
    assert_eq!(report.drawn[0].layer, 1);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].layer, 0);
    assert!(report.skipped[0].reason.contains("unresolved plot configuration"));
    assert_eq!(plotter.figure().shown(), 1);
}

#[test]
fn unregistered_name_is_skipped_and_pass_completes() {
    let calls = Arc::new(AtomicUsize::new(0));
    let reg = spy_registry(calls.clone());
    let plan = RenderPlan::new()
        .with((0, 0), PlotConfig::named("does.not.exist"))
        .with((0, 1), PlotConfig::named("title").arg("text", "ok"));

    let mut plotter =
        Plotter::with_registry(RecordingFigure::subplots(1, 2), plan, &reg).opts(keep_open());
    let report = plotter.plot(None).unwrap();

    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].target, TargetId::new(0, 0));
    assert!(report.skipped[0].reason.contains("plot definition not found"));
    assert_eq!(titles(plotter.figure(), TargetId::new(0, 1)), vec!["ok"]);
}

#[test]
fn unmet_requirement_is_skipped_without_drawing() {
    let calls = Arc::new(AtomicUsize::new(0));
    let reg = spy_registry(calls.clone());
    let plan = RenderPlan::new().with((0, 0), PlotConfig::named("spy"));

    let mut plotter = Plotter::with_registry(RecordingFigure::subplots(1, 1), plan, &reg)
        .data(json!({ "y": [1] }));
    let report = plotter.plot(None).unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(report.skipped[0].reason.contains("not satisfied: x"));
}

#[test]
fn single_entries_are_isolated_too() {
    let calls = Arc::new(AtomicUsize::new(0));
    let reg = spy_registry(calls.clone());
    let plan = RenderPlan::new()
        .with((0, 0), PlotConfig::new())
        .with((0, 1), PlotConfig::named("spy"));

    let report = Plotter::with_registry(RecordingFigure::subplots(1, 2), plan, &reg)
        .data(json!({ "x": [] }))
        .plot(None)
        .unwrap();
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn missing_target_is_skipped() {
    let reg = spy_registry(Arc::new(AtomicUsize::new(0)));
    let plan = RenderPlan::new().with((5, 5), PlotConfig::named("title"));

    let report = Plotter::with_registry(RecordingFigure::subplots(1, 1), plan, &reg)
        .plot(None)
        .unwrap();
    assert!(report.skipped[0].reason.contains("render target not found: 5,5"));
}

#[test]
fn draw_error_aborts_pass() {
    let reg = PlotRegistry::new();
    reg.register_plot("boom", None, |_, _, _| anyhow::bail!("renderer crashed"));
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    reg.register_plot("after", None, move |_, _, _| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });
    let plan = RenderPlan::new()
        .with((0, 0), PlotConfig::named("boom"))
        .with((0, 1), PlotConfig::named("after"));

    let mut plotter = Plotter::with_registry(RecordingFigure::subplots(1, 2), plan, &reg);
    let err = plotter.plot(None).unwrap_err();

    assert!(matches!(err, PlotError::Draw { .. }));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(plotter.figure().shown(), 0);
}

#[test]
fn direct_reference_bypasses_registry() {
    let reg = PlotRegistry::new();
    let cap = PlotCapability::new("adhoc", None, |ax, _, _| {
        ax.set_title("adhoc");
        Ok(())
    });
    let plan = RenderPlan::new().with((0, 0), PlotConfig::named(cap));

    let mut plotter =
        Plotter::with_registry(RecordingFigure::subplots(1, 1), plan, &reg).opts(keep_open());
    let report = plotter.plot(None).unwrap();

    assert!(reg.is_empty());
    assert_eq!(report.drawn[0].plot, "adhoc");
    assert_eq!(titles(plotter.figure(), TargetId::new(0, 0)), vec!["adhoc"]);
}

#[test]
fn layers_draw_in_list_order() {
    let reg = spy_registry(Arc::new(AtomicUsize::new(0)));
    let plan = RenderPlan::new().with(
        (0, 0),
        vec![
            PlotConfig::named("title").arg("text", "bottom"),
            PlotConfig::named("title").arg("text", "top"),
        ],
    );

    let mut plotter =
        Plotter::with_registry(RecordingFigure::subplots(1, 1), plan, &reg).opts(keep_open());
    plotter.plot(None).unwrap();
    assert_eq!(
        titles(plotter.figure(), TargetId::new(0, 0)),
        vec!["bottom", "top"]
    );
}

#[test]
fn inline_config_args_override_layer_kwargs() {
    let reg = spy_registry(Arc::new(AtomicUsize::new(0)));
    let cfg = PlotConfig::named("title").arg("text", "explicit").config(
        json!({ "args": { "text": "configured" } })
            .as_object()
            .cloned()
            .unwrap(),
    );
    let plan = RenderPlan::new().with((0, 0), cfg);

    let mut plotter =
        Plotter::with_registry(RecordingFigure::subplots(1, 1), plan, &reg).opts(keep_open());
    plotter.plot(None).unwrap();
    assert_eq!(titles(plotter.figure(), TargetId::new(0, 0)), vec!["configured"]);
}

#[test]
fn config_file_is_reread_every_pass() {
    let dir = temp_dir("dispatch_reread");
    let path = dir.join("plots.yaml");
    std::fs::write(&path, "main:\n  plot: title\n  args:\n    text: first\n").unwrap();

    let reg = spy_registry(Arc::new(AtomicUsize::new(0)));
    let plan = RenderPlan::new().with((0, 0), PlotConfig::from_config("main"));
    let mut plotter = Plotter::with_registry(RecordingFigure::subplots(1, 1), plan, &reg)
        .config(path.clone())
        .opts(keep_open());

    plotter.plot(None).unwrap();
    std::fs::write(&path, "main:\n  plot: title\n  args:\n    text: second\n").unwrap();
    plotter.plot(None).unwrap();

    assert_eq!(
        titles(plotter.figure(), TargetId::new(0, 0)),
        vec!["first", "second"]
    );
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn config_load_failure_aborts_before_drawing() {
    let calls = Arc::new(AtomicUsize::new(0));
    let reg = spy_registry(calls.clone());
    let plan = RenderPlan::new().with((0, 0), PlotConfig::named("spy"));

    let err = Plotter::with_registry(RecordingFigure::subplots(1, 1), plan, &reg)
        .data(json!({ "x": [1] }))
        .config("missing/plots.yaml")
        .plot(None)
        .unwrap_err();
    assert!(matches!(err, PlotError::ConfigSource(_)));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn save_persists_then_closes_by_default() {
    let dir = temp_dir("dispatch_save");
    let out = dir.join("fig.json");
    let reg = spy_registry(Arc::new(AtomicUsize::new(0)));
    let plan = RenderPlan::new().with((0, 0), PlotConfig::named("title").arg("text", "saved"));

    let mut plotter = Plotter::with_registry(RecordingFigure::subplots(1, 1), plan, &reg);
    let report = plotter.plot(Some(&out)).unwrap();

    assert_eq!(report.output.as_deref(), Some(out.as_path()));
    assert_eq!(plotter.figure().shown(), 0);
    assert_eq!(plotter.figure().closed(), 1);
    assert!(titles(plotter.figure(), TargetId::new(0, 0)).is_empty());

    let record = crate::figure::recording::FigureRecord::from_path(&out).unwrap();
    assert_eq!(
        record.axes[0].commands,
        vec![DrawCommand::Title {
            title: "saved".to_string()
        }]
    );
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn figure_props_are_applied() {
    let reg = PlotRegistry::new();
    let mut plotter =
        Plotter::with_registry(RecordingFigure::subplots(1, 1), RenderPlan::new(), &reg)
            .font(json!({ "family": "serif" }).as_object().cloned().unwrap())
            .font_size(12.0)
            .opts(keep_open());
    plotter.plot(None).unwrap();

    let props = plotter.figure().props();
    assert_eq!(props.font_size, Some(12.0));
    assert_eq!(props.font.as_ref().unwrap()["family"], json!("serif"));
}

#[test]
fn indexing_by_target_edits_the_plan() {
    let reg = spy_registry(Arc::new(AtomicUsize::new(0)));
    let mut plotter =
        Plotter::with_registry(RecordingFigure::subplots(2, 2), RenderPlan::new(), &reg)
            .opts(keep_open());
    plotter.set((1, 1), PlotConfig::named("title").arg("text", "late"));
    assert!(plotter.get((1, 1)).is_some());
    assert!(plotter.get((0, 0)).is_none());

    plotter.set_data(Some(Arc::new(json!({}))));
    let report = plotter.plot(None).unwrap();
    assert_eq!(report.drawn.len(), 1);
    assert_eq!(titles(plotter.figure(), TargetId::new(1, 1)), vec!["late"]);
}

use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::json;

use super::*;
use crate::figure::backend::Figure;
use crate::figure::recording::RecordingFigure;
use crate::figure::target::TargetId;

fn spy(name: &str, reqs: Option<Vec<&str>>, calls: Arc<AtomicUsize>) -> PlotCapability {
    PlotCapability::new(
        name,
        reqs.map(|r| r.into_iter().map(String::from).collect()),
        move |_ax, _data, _kwargs| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        },
    )
}

#[test]
fn satisfied_requirements_invoke_draw() {
    let calls = Arc::new(AtomicUsize::new(0));
    let cap = spy("example.1", Some(vec!["x1", "y1"]), calls.clone());
    let mut fig = RecordingFigure::subplots(1, 1);
    let ax = fig.target_mut(TargetId::new(0, 0)).unwrap();

    cap.invoke(ax, &json!({ "x1": [1], "y1": [2] }), &Kwargs::new())
        .unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn missing_requirement_fails_before_draw() {
    let calls = Arc::new(AtomicUsize::new(0));
    let cap = spy("example.1", Some(vec!["x1", "y1"]), calls.clone());
    let mut fig = RecordingFigure::subplots(1, 1);
    let ax = fig.target_mut(TargetId::new(0, 0)).unwrap();

    let err = cap
        .invoke(ax, &json!({ "x1": [1] }), &Kwargs::new())
        .unwrap_err();
    match err {
        PlotError::DataRequirement { plot, key } => {
            assert_eq!(plot, "example.1");
            assert_eq!(key, "y1");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn none_requirements_skip_check() {
    let calls = Arc::new(AtomicUsize::new(0));
    let cap = spy("free", None, calls.clone());
    let mut fig = RecordingFigure::subplots(1, 1);
    let ax = fig.target_mut(TargetId::new(0, 0)).unwrap();

    cap.invoke(ax, &serde_json::Value::Null, &Kwargs::new())
        .unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(cap.data_requirements().is_none());
}

#[test]
fn empty_requirement_list_accepts_any_dataset() {
    let calls = Arc::new(AtomicUsize::new(0));
    let cap = spy("empty", Some(vec![]), calls.clone());
    assert!(cap.check_requirements(&serde_json::Value::Null).is_ok());
    assert_eq!(cap.data_requirements(), Some(&[][..]));
}

#[test]
fn draw_errors_propagate_as_draw() {
    let cap = PlotCapability::new("broken", None, |_ax, _data, _kwargs| {
        anyhow::bail!("axis exploded")
    });
    let mut fig = RecordingFigure::subplots(1, 1);
    let ax = fig.target_mut(TargetId::new(0, 0)).unwrap();

    let err = cap
        .invoke(ax, &serde_json::Value::Null, &Kwargs::new())
        .unwrap_err();
    assert!(matches!(err, PlotError::Draw { ref plot, .. } if plot == "broken"));
    assert!(!err.is_recoverable());
    assert!(err.to_string().contains("axis exploded"));
    let source = std::error::Error::source(&err).expect("draw error keeps its source");
    assert!(source.to_string().contains("axis exploded"));
}

#[test]
fn draw_receives_kwargs_and_target() {
    let cap = PlotCapability::new("titled", None, |ax, _data, kwargs| {
        let title = kwargs
            .get("title")
            .and_then(|v| v.as_str())
            .unwrap_or("untitled");
        ax.set_title(title);
        Ok(())
    });
    let mut fig = RecordingFigure::subplots(1, 1);
    let kwargs = json!({ "title": "hits" }).as_object().cloned().unwrap();
    cap.invoke(
        fig.target_mut(TargetId::new(0, 0)).unwrap(),
        &serde_json::Value::Null,
        &kwargs,
    )
    .unwrap();

    let cmds = &fig.axes(TargetId::new(0, 0)).unwrap().commands;
    assert_eq!(
        cmds,
        &vec![crate::figure::recording::DrawCommand::Title {
            title: "hits".to_string()
        }]
    );
}

#[test]
fn debug_omits_draw_closure() {
    let cap = PlotCapability::new("dbg", Some(vec!["a".to_string()]), |_, _, _| Ok(()));
    let s = format!("{cap:?}");
    assert!(s.contains("dbg"));
    assert!(s.contains("\"a\""));
}

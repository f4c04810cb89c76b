use serde_json::json;

use super::*;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "trackplot_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

#[test]
fn subplots_lay_out_row_major_targets() {
    let fig = RecordingFigure::subplots(2, 3);
    let targets = fig.targets();
    assert_eq!(targets.len(), 6);
    assert_eq!(targets[0], TargetId::new(0, 0));
    assert_eq!(targets[3], TargetId::new(1, 0));
    assert_eq!(targets[5], TargetId::new(1, 2));
}

#[test]
fn axes_record_calls_in_order() {
    let mut fig = RecordingFigure::subplots(1, 1);
    let ax = fig.target_mut(TargetId::new(0, 0)).unwrap();
    ax.line(&[0.0, 1.0], &[1.0, 0.0], &Kwargs::new());
    ax.set_label(Axis::X, "x [mm]");
    ax.legend();

    let cmds = &fig.axes(TargetId::new(0, 0)).unwrap().commands;
    assert_eq!(cmds.len(), 3);
    assert!(matches!(cmds[0], DrawCommand::Line { .. }));
    assert_eq!(
        cmds[1],
        DrawCommand::Label {
            axis: Axis::X,
            label: "x [mm]".to_string()
        }
    );
    assert_eq!(cmds[2], DrawCommand::Legend);
}

#[test]
fn unknown_target_is_none() {
    let mut fig = RecordingFigure::subplots(1, 1);
    assert!(fig.target_mut(TargetId::new(3, 3)).is_none());
}

#[test]
fn properties_merge_font_and_override_size() {
    let mut fig = RecordingFigure::subplots(1, 1);
    fig.set_properties(&FigureProps {
        font: json!({ "family": "serif", "size": 8 }).as_object().cloned(),
        font_size: None,
    })
    .unwrap();
    fig.set_properties(&FigureProps {
        font: json!({ "weight": "bold" }).as_object().cloned(),
        font_size: Some(14.0),
    })
    .unwrap();

    let font = fig.props().font.as_ref().unwrap();
    assert_eq!(font["family"], json!("serif"));
    assert_eq!(font["weight"], json!("bold"));
    assert_eq!(fig.props().font_size, Some(14.0));

    assert!(
        fig.set_properties(&FigureProps {
            font: None,
            font_size: Some(-1.0)
        })
        .is_err()
    );
}

#[test]
fn save_writes_readable_record() {
    let dir = temp_path("recording_save");
    let out = dir.join("nested").join("fig.json");

    let mut fig = RecordingFigure::subplots(1, 2);
    fig.target_mut(TargetId::new(0, 1))
        .unwrap()
        .hist(&[0.1, 0.2], 10, &Kwargs::new());
    fig.save(&out).unwrap();

    let record = FigureRecord::from_path(&out).unwrap();
    assert_eq!(record, fig.record());
    assert_eq!(fig.saved(), &[out.clone()]);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn saved_gaps_read_back_as_nan() {
    let dir = temp_path("recording_gaps");
    let out = dir.join("fig.json");

    let mut fig = RecordingFigure::subplots(1, 1);
    let ax = fig.target_mut(TargetId::new(0, 0)).unwrap();
    ax.line(&[0.0, 1.0, 2.0], &[1.0, f64::NAN, 3.0], &Kwargs::new());
    ax.text(f64::NAN, 0.5, "note");
    fig.save(&out).unwrap();

    let raw = std::fs::read_to_string(&out).unwrap();
    assert!(raw.contains("null"), "{raw}");

    let record = FigureRecord::from_path(&out).unwrap();
    match &record.axes[0].commands[..] {
        [DrawCommand::Line { x, y, .. }, DrawCommand::Text { x: tx, y: ty, text }] => {
            assert_eq!(x, &vec![0.0, 1.0, 2.0]);
            assert_eq!(y[0], 1.0);
            assert!(y[1].is_nan());
            assert_eq!(y[2], 3.0);
            assert!(tx.is_nan());
            assert_eq!(*ty, 0.5);
            assert_eq!(text, "note");
        }
        other => panic!("unexpected commands {other:?}"),
    }

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn save_output_is_complete_before_return() {
    let dir = temp_path("recording_flush");
    let out = dir.join("fig.json");

    let mut fig = RecordingFigure::subplots(2, 2);
    for target in fig.targets() {
        let values: Vec<f64> = (0..2_000).map(f64::from).collect();
        fig.target_mut(target)
            .unwrap()
            .hist(&values, 20, &Kwargs::new());
    }
    fig.save(&out).unwrap();

    let raw = std::fs::read_to_string(&out).unwrap();
    let parsed: FigureRecord = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed, fig.record());

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn close_releases_recorded_state() {
    let mut fig = RecordingFigure::subplots(1, 1);
    fig.target_mut(TargetId::new(0, 0)).unwrap().set_title("t");
    fig.show().unwrap();
    fig.close();
    assert_eq!(fig.shown(), 1);
    assert_eq!(fig.closed(), 1);
    assert!(fig.axes(TargetId::new(0, 0)).unwrap().commands.is_empty());
}

#[test]
fn target_id_text_form() {
    let id: TargetId = "1, 2".parse().unwrap();
    assert_eq!(id, TargetId::new(1, 2));
    assert_eq!(id.to_string(), "1,2");
    assert!("12".parse::<TargetId>().is_err());
    assert!("a,b".parse::<TargetId>().is_err());
}

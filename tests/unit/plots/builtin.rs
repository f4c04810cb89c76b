use serde_json::json;

use super::*;
use crate::figure::recording::{DrawCommand, RecordedAxes};
use crate::figure::target::TargetId;
use crate::foundation::error::PlotError;

#[test]
fn builtin_names_are_unique() {
    let mut names: Vec<_> = BUILTIN_PLOTS.iter().map(|p| p.name).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), BUILTIN_PLOTS.len());
}

#[test]
fn registration_installs_every_plot_with_requirements() {
    let reg = PlotRegistry::new();
    register_builtin_plots(&reg);

    assert_eq!(reg.len(), BUILTIN_PLOTS.len());
    let hist = reg.lookup("hist").unwrap();
    assert_eq!(hist.data_requirements(), Some(&["values".to_string()][..]));
    let hits = reg.lookup("hits.2d").unwrap();
    assert_eq!(hits.data_requirements(), Some(&["hits".to_string()][..]));
}

#[test]
fn registered_plot_checks_requirements_before_drawing() {
    let reg = PlotRegistry::new();
    register_builtin_plots(&reg);
    let mut ax = RecordedAxes {
        target: TargetId::new(0, 0),
        commands: Vec::new(),
    };

    let err = reg
        .lookup("xy.line")
        .unwrap()
        .invoke(&mut ax, &json!({ "x": [1.0] }), &Kwargs::new())
        .unwrap_err();
    assert!(matches!(err, PlotError::DataRequirement { ref key, .. } if key == "y"));
    assert!(ax.commands.is_empty());

    reg.lookup("xy.line")
        .unwrap()
        .invoke(&mut ax, &json!({ "x": [1.0], "y": [2.0] }), &Kwargs::new())
        .unwrap();
    assert!(matches!(ax.commands[0], DrawCommand::Line { .. }));
}

#[test]
fn exatrkx_names_are_registered() {
    let reg = PlotRegistry::new();
    register_builtin_plots(&reg);

    for (alias, short) in [("exatrkx.train_log", "train_log"), ("exatrkx.hits.2d", "hits.2d")] {
        assert_eq!(
            reg.lookup(alias).unwrap().data_requirements(),
            reg.lookup(short).unwrap().data_requirements()
        );
    }
    let pairs = reg.lookup("exatrkx.hit_pairs.2d").unwrap();
    assert_eq!(
        pairs.data_requirements(),
        Some(&["hits".to_string(), "pairs".to_string()][..])
    );
    assert!(reg.contains("exatrkx.hit_pairs.hist"));
    assert!(reg.contains("exatrkx.performance.score_distribution"));
}

#[test]
fn alias_draws_like_its_short_name() {
    let reg = PlotRegistry::new();
    register_builtin_plots(&reg);
    let data = json!({ "hits": { "x": [1.0], "y": [2.0] } });

    let mut short = RecordedAxes {
        target: TargetId::new(0, 0),
        commands: Vec::new(),
    };
    let mut alias = short.clone();
    reg.lookup("hits.2d")
        .unwrap()
        .invoke(&mut short, &data, &Kwargs::new())
        .unwrap();
    reg.lookup("exatrkx.hits.2d")
        .unwrap()
        .invoke(&mut alias, &data, &Kwargs::new())
        .unwrap();
    assert_eq!(short.commands, alias.commands);
}

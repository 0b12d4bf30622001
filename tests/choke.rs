//! Hi-hat choke through the same command ring the live engine uses.

use saavy_rhythm::{
    coupling::Coupling,
    dsp::SILENCE_FLOOR,
    graph::{queue, GraphError, GraphRenderer},
    voices::{ParamKind, VoiceParams},
    Instrument,
};

const SR: f32 = 48_000.0;

#[test]
fn open_hat_cuts_closed_hat_across_the_queue() {
    let (mut graph, mut feed) = queue::channel(1024, SR);
    let mut renderer = GraphRenderer::new(SR);
    let mut coupling = Coupling::new();
    let params = VoiceParams::new();

    // Both triggers are issued ahead of time, before any audio is rendered
    let closed = coupling
        .trigger(
            &mut graph,
            Instrument::ClosedHat,
            0.1,
            &params.settings(Instrument::ClosedHat, 0.0),
        )
        .unwrap();
    coupling
        .trigger(
            &mut graph,
            Instrument::OpenHat,
            0.14,
            &params.settings(Instrument::OpenHat, 0.0),
        )
        .unwrap();

    assert!(feed.drain_into(&mut renderer) > 0);

    let ringing = renderer.param_value(closed.gain, 0.139).unwrap();
    let cut = renderer.param_value(closed.gain, 0.145).unwrap();
    assert!(ringing > 0.01);
    assert!(cut <= 1e-3);
    assert!((cut - SILENCE_FLOOR).abs() < 1e-6);
}

#[test]
fn closed_hat_after_open_hat_is_not_choked() {
    let (mut graph, mut feed) = queue::channel(1024, SR);
    let mut renderer = GraphRenderer::new(SR);
    let mut coupling = Coupling::new();
    let params = VoiceParams::new();

    let open = coupling
        .trigger(&mut graph, Instrument::OpenHat, 0.0, &params.settings(Instrument::OpenHat, 0.0))
        .unwrap();
    let closed = coupling
        .trigger(
            &mut graph,
            Instrument::ClosedHat,
            0.05,
            &params.settings(Instrument::ClosedHat, 0.0),
        )
        .unwrap();
    feed.drain_into(&mut renderer);

    // Choke only runs one way
    assert!(renderer.param_value(open.gain, 0.06).unwrap() > 0.1);
    assert!(renderer.param_value(closed.gain, 0.06).unwrap() > 0.1);
}

#[test]
fn choked_graph_is_collected() {
    let (mut graph, mut feed) = queue::channel(1024, SR);
    let mut renderer = GraphRenderer::new(SR);
    let mut coupling = Coupling::new();
    let params = VoiceParams::new();

    coupling
        .trigger(&mut graph, Instrument::ClosedHat, 0.0, &params.settings(Instrument::ClosedHat, 0.0))
        .unwrap();
    let open = coupling
        .trigger(&mut graph, Instrument::OpenHat, 0.02, &params.settings(Instrument::OpenHat, 0.0))
        .unwrap();
    feed.drain_into(&mut renderer);

    let mut out = vec![0.0; ((open.end + 0.3) * SR as f64) as usize];
    renderer.render(&mut out);
    assert_eq!(renderer.node_count(), 0);
}

#[test]
fn dropped_triggers_keep_the_sounding_hat_chokable() {
    // Room for one hat voice at a time
    let (mut graph, mut feed) = queue::channel(64, SR);
    let mut renderer = GraphRenderer::new(SR);
    let mut coupling = Coupling::new();
    let params = VoiceParams::new();

    let closed = coupling
        .trigger(
            &mut graph,
            Instrument::ClosedHat,
            0.10,
            &params.settings(Instrument::ClosedHat, 0.0),
        )
        .unwrap();

    // Neither of these fits behind the first hat
    let dropped_open = coupling.trigger(
        &mut graph,
        Instrument::OpenHat,
        0.105,
        &params.settings(Instrument::OpenHat, 0.0),
    );
    assert!(matches!(dropped_open, Err(GraphError::QueueFull { .. })));
    let dropped_closed = coupling.trigger(
        &mut graph,
        Instrument::ClosedHat,
        0.11,
        &params.settings(Instrument::ClosedHat, 0.0),
    );
    assert!(matches!(dropped_closed, Err(GraphError::QueueFull { .. })));

    feed.drain_into(&mut renderer);
    coupling
        .trigger(
            &mut graph,
            Instrument::OpenHat,
            0.14,
            &params.settings(Instrument::OpenHat, 0.0),
        )
        .unwrap();
    feed.drain_into(&mut renderer);

    assert!(renderer.param_value(closed.gain, 0.139).unwrap() > 0.01);
    assert!(renderer.param_value(closed.gain, 0.145).unwrap() <= 1e-3);
}

#[test]
fn long_closed_hat_is_cut_like_a_short_one() {
    let (mut graph, mut feed) = queue::channel(1024, SR);
    let mut renderer = GraphRenderer::new(SR);
    let mut coupling = Coupling::new();
    let mut params = VoiceParams::new();
    params
        .set(Instrument::ClosedHat, ParamKind::Decay, 1.0)
        .unwrap();

    let closed = coupling
        .trigger(
            &mut graph,
            Instrument::ClosedHat,
            0.1,
            &params.settings(Instrument::ClosedHat, 0.0),
        )
        .unwrap();
    coupling
        .trigger(
            &mut graph,
            Instrument::OpenHat,
            0.2,
            &params.settings(Instrument::OpenHat, 0.0),
        )
        .unwrap();
    feed.drain_into(&mut renderer);

    // Without the choke this hat would still ring well past 0.3 s
    assert!(closed.end > 0.3);
    assert!(renderer.param_value(closed.gain, 0.199).unwrap() > 0.01);
    assert!(renderer.param_value(closed.gain, 0.205).unwrap() <= 1e-3);
}

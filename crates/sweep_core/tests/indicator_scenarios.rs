//! End-to-end indicator scenarios on a manual clock.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use sweep_core::{
    ExitStrategy, IndicatorConfig, IndicatorEvent, ManualClock, Phase, ProgressIndicator, Simulation,
    ToggleScript,
};
use tracing::field::{Field, Visit};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

/// Records `(message, cancelled)` for every `sweep.indicator` event.
#[derive(Clone, Default)]
struct IndicatorEvents(Arc<Mutex<Vec<(String, Option<u64>)>>>);

#[derive(Default)]
struct EventFields {
    message: String,
    cancelled: Option<u64>,
}

impl Visit for EventFields {
    fn record_u64(&mut self, field: &Field, value: u64) {
        if field.name() == "cancelled" {
            self.cancelled = Some(value);
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        if field.name() == "cancelled" {
            self.cancelled = u64::try_from(value).ok();
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        }
    }
}

impl<S: tracing::Subscriber> Layer<S> for IndicatorEvents {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        if event.metadata().target() != "sweep.indicator" {
            return;
        }
        let mut fields = EventFields::default();
        event.record(&mut fields);
        self.0.lock().unwrap().push((fields.message, fields.cancelled));
    }
}

impl IndicatorEvents {
    fn len(&self) -> usize {
        self.0.lock().unwrap().len()
    }

    fn dropped(&self) -> Vec<Option<u64>> {
        self.0
            .lock()
            .unwrap()
            .iter()
            .filter(|(message, _)| message == "dropped with animations in flight")
            .map(|(_, cancelled)| *cancelled)
            .collect()
    }
}

#[test]
fn two_seconds_on_then_off() {
    let script: ToggleScript = "on:2000,off:2000".parse().unwrap();
    let report = Simulation::new(IndicatorConfig::default()).run(&script);

    let exit_started = report
        .events
        .iter()
        .find(|e| e.event == IndicatorEvent::ExitStarted)
        .map(|e| e.at)
        .expect("exit started");
    assert_eq!(exit_started, ms(2000));

    let loops_before_exit = report
        .events
        .iter()
        .filter(|e| matches!(e.event, IndicatorEvent::LoopStarted { .. }) && e.at <= exit_started)
        .count();
    assert!(loops_before_exit >= 2, "only {} loops", loops_before_exit);

    let hidden_at = report.hidden_at().expect("hidden");
    assert!(hidden_at - exit_started <= ms(1050), "hidden after {:?}", hidden_at - exit_started);
    assert!(report.within_track());
    assert_eq!(report.final_frame(), None);
    assert_eq!(report.active_animations, 0);
}

#[test]
fn never_shown_starts_nothing() {
    let script: ToggleScript = "off:3000".parse().unwrap();
    let report = Simulation::new(IndicatorConfig::default()).run(&script);
    assert!(report.events.is_empty());
    assert!(report.samples.iter().all(|s| s.frame.is_none()));
    assert_eq!(report.active_animations, 0);
}

#[test]
fn rapid_toggles_settle_hidden_with_nothing_running() {
    let clock = ManualClock::new();
    let mut ind = ProgressIndicator::with_clock(IndicatorConfig::default(), clock.clone());

    for _ in 0..5 {
        ind.set_should_show(false);
        clock.advance(ms(40));
        ind.tick();
        ind.set_should_show(true);
        clock.advance(ms(60));
        ind.tick();
        assert!(ind.frame().is_some());
        ind.set_should_show(false);
        clock.advance(ms(50));
        ind.tick();
    }
    assert_eq!(ind.phase(), Phase::Exiting);

    clock.advance(ms(1000));
    let events = ind.tick();
    assert_eq!(events.last(), Some(&IndicatorEvent::Hidden));
    assert_eq!(ind.frame(), None);
    assert_eq!(ind.active_animations(), 0);
    assert_eq!(ind.loops_started(), 0);

    // Quiet afterwards.
    clock.advance(ms(5000));
    assert!(ind.tick().is_empty());
}

#[test]
fn toggling_back_on_during_exit_keeps_segment_visible() {
    for strategy in [ExitStrategy::Sweep, ExitStrategy::Fade] {
        let clock = ManualClock::new();
        let config = IndicatorConfig::default().with_exit_strategy(strategy);
        let mut ind = ProgressIndicator::with_clock(config, clock.clone());
        ind.set_should_show(true);
        clock.advance(ms(1200));
        ind.tick();
        ind.set_should_show(false);
        clock.advance(ms(100));
        ind.tick();
        ind.set_should_show(true);

        // Keep it on long enough for the loop to resume and produce a non-empty segment.
        let mut saw_segment = false;
        for _ in 0..100 {
            clock.advance(ms(16));
            ind.tick();
            let frame = ind.frame().expect("visible while on");
            if frame.trail_width > 1.0 && frame.opacity > 0.99 {
                saw_segment = true;
            }
        }
        assert!(saw_segment, "{:?}: segment never came back", strategy);
        assert_eq!(ind.phase(), Phase::Looping);
        assert_eq!(ind.active_animations(), 1);
    }
}

#[test]
fn dropping_while_shown_cancels_everything() {
    let events = IndicatorEvents::default();
    let subscriber = tracing_subscriber::registry().with(events.clone());

    tracing::subscriber::with_default(subscriber, || {
        let clock = ManualClock::new();
        let in_flight = {
            let mut ind = ProgressIndicator::with_clock(IndicatorConfig::default(), clock.clone());
            ind.set_should_show(true);
            clock.advance(ms(900));
            ind.tick();
            ind.active_animations()
        };
        assert!(in_flight > 0);
        assert_eq!(events.dropped(), vec![Some(in_flight as u64)]);

        // The clock outlives the indicator; advancing it emits nothing.
        let logged = events.len();
        clock.advance(ms(10_000));
        assert_eq!(events.len(), logged);
    });
}

#[test]
fn dropping_while_hidden_logs_nothing() {
    let events = IndicatorEvents::default();
    let subscriber = tracing_subscriber::registry().with(events.clone());

    tracing::subscriber::with_default(subscriber, || {
        let clock = ManualClock::new();
        {
            let mut ind = ProgressIndicator::with_clock(IndicatorConfig::default(), clock.clone());
            ind.tick();
            assert_eq!(ind.active_animations(), 0);
        }
        assert!(events.dropped().is_empty());
    });
}

#[test]
fn fade_strategy_hides_after_fade_duration() {
    let script: ToggleScript = "on:1000,off:1000".parse().unwrap();
    let config = IndicatorConfig::default().with_exit_strategy(ExitStrategy::Fade);
    let report = Simulation::new(config)
        .with_frame_interval(ms(10))
        .run(&script);
    assert_eq!(report.hidden_at(), Some(ms(1300)));

    // Opacity only goes down while fading.
    let fading: Vec<f64> = report
        .samples
        .iter()
        .filter_map(|s| s.frame)
        .filter(|f| f.phase == Phase::Exiting)
        .map(|f| f.opacity)
        .collect();
    assert!(!fading.is_empty());
    assert!(fading.windows(2).all(|w| w[1] <= w[0] + 1e-12));
}

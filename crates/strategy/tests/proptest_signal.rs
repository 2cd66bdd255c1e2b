use proptest::prelude::*;

use common::{Bar, TradeDirection};
use strategy::indicators::{moving_average, stochastic_oscillator_default};
use strategy::signal::{call_fires, put_fires};
use strategy::{analyze, annotate, evaluate, AnnotatedBar, IndicatorPeriods, SignalParams};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_bar() -> impl Strategy<Value = Bar> {
    (1.0..500.0_f64, 0.0..5.0_f64, 0.0..5.0_f64, 0.0..1.0_f64).prop_map(
        |(open, up, down, frac)| {
            let high = open + up;
            let low = open - down;
            Bar::new(open, high, low, low + (high - low) * frac)
        },
    )
}

fn arb_value() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![
        1 => Just(None),
        4 => (0.0..300.0_f64).prop_map(Some),
    ]
}

fn arb_annotated() -> impl Strategy<Value = AnnotatedBar> {
    (
        arb_bar(),
        arb_value(),
        arb_value(),
        arb_value(),
        prop_oneof![1 => Just(None), 4 => (0.0..100.0_f64).prop_map(Some)],
    )
        .prop_map(|(bar, ma_fast, ma_slow, ma_trend, k)| AnnotatedBar {
            bar,
            ma_fast,
            ma_slow,
            ma_trend,
            k,
            d: None,
        })
}

proptest! {
    /// MA is defined exactly from index `period - 1` and equals the window mean.
    #[test]
    fn moving_average_matches_window_mean(
        series in prop::collection::vec(-1000.0..1000.0_f64, 1..60),
        period in 1usize..20,
    ) {
        let result = moving_average(&series, period);
        prop_assert_eq!(result.len(), series.len());
        for (i, value) in result.iter().enumerate() {
            if i + 1 >= period {
                let window = &series[i + 1 - period..=i];
                let mean = window.iter().sum::<f64>() / period as f64;
                prop_assert!((value.unwrap() - mean).abs() < 1e-9);
            } else {
                prop_assert!(value.is_none());
            }
        }
    }

    /// %K stays in [0, 100] when defined and %D is defined iff its %K window is.
    #[test]
    fn stochastic_bounds_and_definedness(bars in prop::collection::vec(arb_bar(), 0..60)) {
        let highs: Vec<f64> = bars.iter().map(|b| b.high).collect();
        let lows: Vec<f64> = bars.iter().map(|b| b.low).collect();
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let st = stochastic_oscillator_default(&highs, &lows, &closes);

        for k in st.k.iter().flatten() {
            prop_assert!((-1e-9..=100.0 + 1e-9).contains(k));
        }
        for i in 0..st.d.len() {
            let window_defined = i >= 2 && st.k[i - 2..=i].iter().all(Option::is_some);
            prop_assert_eq!(st.d[i].is_some(), window_defined);
        }
    }

    /// No pair of bars can satisfy both rule sets.
    #[test]
    fn call_and_put_are_mutually_exclusive(
        prev in arb_annotated(),
        last in arb_annotated(),
        oversold in 0.0..100.0_f64,
        overbought in 0.0..100.0_f64,
    ) {
        let params = SignalParams { oversold, overbought, ..SignalParams::default() };
        prop_assert!(!(call_fires(&prev, &last, &params) && put_fires(&prev, &last, &params)));
    }

    /// Arbitrary well-formed sequences always yield a decision, identically on repeat.
    #[test]
    fn evaluation_never_fails_and_is_idempotent(
        bars in prop::collection::vec(arb_bar(), 2..260),
    ) {
        let params = SignalParams::default();
        let first = analyze(&bars, &params);
        prop_assert!(first.is_ok());
        let first = first.unwrap();
        prop_assert_eq!(&first, &analyze(&bars, &params).unwrap());

        let annotated = annotate(&bars, &IndicatorPeriods::default());
        prop_assert_eq!(&first, &evaluate(&annotated, &params).unwrap());

        if bars.len() < 201 {
            prop_assert_eq!(first.direction, TradeDirection::NoTrade);
        }
    }
}
